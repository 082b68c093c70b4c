//! The host I/O driver.
//!
//! Owns the tokio runtime that performs file and network operations off the
//! loop thread, plus the shared HTTP client. Results come back to the loop
//! through completion senders, so user-visible continuations still execute on
//! the single loop thread.

use core_types::RuntimeError;
use tokio::runtime::{Builder, Handle, Runtime};

/// Driver for host I/O operations.
///
/// Must outlive the operations it performs: dropping the driver cancels
/// in-flight work, whose completion senders then post internal errors to the
/// loop instead of results.
pub struct IoDriver {
    runtime: Runtime,
    client: reqwest::Client,
}

impl IoDriver {
    /// Starts the driver runtime.
    pub fn new() -> Result<Self, RuntimeError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("eventide-io")
            .enable_all()
            .build()
            .map_err(|e| RuntimeError::internal(format!("failed to start i/o driver: {e}")))?;
        Ok(Self {
            runtime,
            client: reqwest::Client::new(),
        })
    }

    pub(crate) fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    pub(crate) fn client(&self) -> reqwest::Client {
        self.client.clone()
    }
}

impl std::fmt::Debug for IoDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IoDriver {{ ... }}")
    }
}
