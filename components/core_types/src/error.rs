//! Runtime error types.
//!
//! This module provides the error taxonomy shared by the event bus, the run
//! loop and the host I/O adapters.

use thiserror::Error;

/// The kind of runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// File or device I/O failure
    #[error("i/o failure")]
    Io,
    /// Network transport failure
    #[error("http failure")]
    Http,
    /// Text encoding or JSON decoding failure
    #[error("decode failure")]
    Decode,
    /// Programmer error, fatal to the current synchronous execution
    #[error("reference error")]
    Reference,
    /// Internal bookkeeping failure
    #[error("internal error")]
    Internal,
}

/// A runtime error with a kind and a human-readable message.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, RuntimeError};
///
/// let error = RuntimeError::io("no such file: notes.txt");
/// assert_eq!(error.kind, ErrorKind::Io);
/// assert!(error.to_string().contains("notes.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RuntimeError {
    /// The kind of failure
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
}

impl RuntimeError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an I/O failure error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    /// Creates a network transport error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Http, message)
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Creates a programmer error.
    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Reference, message)
    }

    /// Creates an internal bookkeeping error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}
