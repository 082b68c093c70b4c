//! Eventide demonstration CLI library
//!
//! Provides the DemoRuntime struct and supporting modules for the eventide
//! binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod demos;
pub mod error;
pub mod runtime;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use runtime::{DemoOptions, DemoRuntime};
