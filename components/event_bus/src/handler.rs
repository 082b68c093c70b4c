//! Event handler callbacks.

use core_types::{RuntimeError, Value};

/// A registered event handler.
///
/// Wraps a fallible closure invoked with the arguments of each emission. A
/// handler may be invoked any number of times; its error aborts the emission
/// that invoked it.
pub struct Handler {
    callback: Box<dyn FnMut(&[Value]) -> Result<(), RuntimeError>>,
}

impl Handler {
    /// Creates a new handler from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(&[Value]) -> Result<(), RuntimeError> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Invokes the handler with the given arguments.
    pub fn call(&mut self, args: &[Value]) -> Result<(), RuntimeError> {
        (self.callback)(args)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler {{ ... }}")
    }
}
