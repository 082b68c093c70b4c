//! The event registry.

use crate::handler::Handler;
use core_types::{RuntimeError, Value};
use std::collections::HashMap;

/// A registry mapping event names to ordered lists of handlers.
///
/// Registration appends; emission invokes every handler for the name
/// synchronously, in registration order. Emitting a name with no handlers is
/// a no-op. Handler failures are not caught: the first error aborts the
/// emission and propagates to the caller of [`emit`](EventBus::emit).
///
/// There is deliberately no unregistration, no once-only handlers and no
/// wildcard matching.
///
/// # Examples
///
/// ```
/// use event_bus::{EventBus, Handler};
///
/// let mut bus = EventBus::new();
/// bus.register("ready", Handler::new(|_args| Ok(())));
/// assert_eq!(bus.handler_count("ready"), 1);
/// bus.emit("ready", &[]).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct EventBus {
    handlers: HashMap<String, Vec<Handler>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Appends `handler` to the ordered list for `event_name`, creating the
    /// list if absent.
    pub fn register(&mut self, event_name: impl Into<String>, handler: Handler) {
        self.handlers
            .entry(event_name.into())
            .or_default()
            .push(handler);
    }

    /// Invokes every handler registered for `event_name`, in registration
    /// order, passing `args`.
    ///
    /// A name with no handlers returns `Ok(())` without effect. A handler
    /// error aborts the emission; handlers registered after the failing one
    /// are not invoked for this emission.
    pub fn emit(&mut self, event_name: &str, args: &[Value]) -> Result<(), RuntimeError> {
        if let Some(list) = self.handlers.get_mut(event_name) {
            for handler in list.iter_mut() {
                handler.call(args)?;
            }
        }
        Ok(())
    }

    /// Returns the number of handlers registered for `event_name`.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map_or(0, Vec::len)
    }

    /// Returns true if at least one handler is registered for `event_name`.
    pub fn has_handlers(&self, event_name: &str) -> bool {
        self.handler_count(event_name) > 0
    }
}
