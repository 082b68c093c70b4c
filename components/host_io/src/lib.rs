//! Host-facing I/O adapters for Eventide.
//!
//! This crate wraps host primitives behind narrow contracts and bridges
//! their results back onto the run loop:
//! - [`IoDriver`] - tokio runtime + HTTP client performing the actual work
//! - [`FileReader`] - blocking, callback-style and eventual-style file reads
//! - [`Fetcher`] / [`FetchResponse`] - HTTP fetches with asynchronous body
//!   decoding
//! - [`Console`] - write-only trace sink behind a writer trait
//! - [`ExitHooks`] - run-once shutdown callbacks
//!
//! # Examples
//!
//! ```
//! use host_io::Console;
//! use core_types::Value;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let output = Rc::new(RefCell::new(Vec::new()));
//! let console = Console::new_with_output(output.clone());
//! console.log(&[Value::from("ready")]);
//! assert_eq!(output.borrow()[0], "ready");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod console;
pub mod driver;
pub mod exit;
pub mod fetch;
pub mod file;

pub use console::{Console, ConsoleWriter};
pub use driver::IoDriver;
pub use exit::ExitHooks;
pub use fetch::{FetchResponse, Fetcher};
pub use file::{FileReader, TextEncoding};
