//! Core value and error types for the Eventide runtime.
//!
//! This crate provides the foundational types shared by every component:
//! dynamic payload values and the runtime error taxonomy.
//!
//! # Overview
//!
//! - [`Value`] - Dynamic payload carried by event emissions and eventuals
//! - [`RuntimeError`] - Runtime error with kind and message
//! - [`ErrorKind`] - The error taxonomy (I/O, HTTP, decode, reference,
//!   internal)
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, RuntimeError, Value};
//!
//! let greeting = Value::from("hello");
//! assert!(greeting.is_truthy());
//! assert_eq!(greeting.type_of(), "text");
//!
//! let error = RuntimeError::io("file not found");
//! assert_eq!(error.kind, ErrorKind::Io);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{ErrorKind, RuntimeError};
pub use value::Value;
