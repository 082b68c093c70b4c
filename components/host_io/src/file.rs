//! File reading in three shapes.
//!
//! A file can be read blocking on the loop thread, via an error-first
//! completion callback, or via an eventual. The callback and eventual forms
//! perform the read on the driver and post the result back to the loop, so a
//! blocking read issued afterwards still traces first: it occupies the loop
//! thread while the posted completion waits its turn.

use crate::driver::IoDriver;
use async_core::{Eventual, Scheduler};
use core_types::{RuntimeError, Value};
use std::path::{Path, PathBuf};
use tokio::runtime::Handle;

/// Text encoding for file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8; invalid sequences are a decode error
    #[default]
    Utf8,
    /// ISO-8859-1; every byte maps to a char
    Latin1,
}

impl TextEncoding {
    /// Decodes raw file bytes into text.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, RuntimeError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes)
                .map_err(|e| RuntimeError::decode(format!("invalid utf-8: {e}"))),
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(|b| b as char).collect()),
        }
    }
}

/// Reads files for code running on the loop.
pub struct FileReader {
    handle: Handle,
    scheduler: Scheduler,
}

impl FileReader {
    /// Creates a reader that performs non-blocking reads on `driver` and
    /// posts completions to `scheduler`'s loop.
    pub fn new(driver: &IoDriver, scheduler: &Scheduler) -> Self {
        Self {
            handle: driver.handle(),
            scheduler: scheduler.clone(),
        }
    }

    /// Reads a file to text, blocking the loop thread until done.
    pub fn read_to_string_sync(
        &self,
        path: impl AsRef<Path>,
        encoding: TextEncoding,
    ) -> Result<String, RuntimeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| RuntimeError::io(format!("{}: {e}", path.display())))?;
        encoding.decode(bytes)
    }

    /// Reads a file to text on the driver; `on_done` runs on the loop thread
    /// with the result once the completion is delivered.
    pub fn read_to_string<F>(&self, path: impl Into<PathBuf>, encoding: TextEncoding, on_done: F)
    where
        F: FnOnce(Result<String, RuntimeError>) -> Result<(), RuntimeError> + 'static,
    {
        let sender = self.scheduler.register_io(move |result| {
            on_done(result.map(|value| match value {
                Value::Text(text) => text,
                other => other.to_text(),
            }))
        });
        let path = path.into();
        self.handle.spawn(async move {
            let outcome = read_file(path, encoding).await;
            sender.complete(outcome.map(Value::Text));
        });
    }

    /// Reads a file to text on the driver, returning an eventual that
    /// fulfills with the contents.
    pub fn read_to_string_deferred(
        &self,
        path: impl Into<PathBuf>,
        encoding: TextEncoding,
    ) -> Eventual {
        let eventual = Eventual::new(&self.scheduler);
        let settle = eventual.clone();
        let sender = self.scheduler.register_io(move |result| {
            match result {
                Ok(value) => settle.resolve(value),
                Err(error) => settle.reject(error),
            }
            Ok(())
        });
        let path = path.into();
        self.handle.spawn(async move {
            let outcome = read_file(path, encoding).await;
            sender.complete(outcome.map(Value::Text));
        });
        eventual
    }
}

impl std::fmt::Debug for FileReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FileReader {{ ... }}")
    }
}

async fn read_file(path: PathBuf, encoding: TextEncoding) -> Result<String, RuntimeError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| RuntimeError::io(format!("{}: {e}", path.display())))?;
    encoding.decode(bytes)
}
