//! Named-event bus with synchronous, ordered emission.
//!
//! This crate provides the event-emission facility of the runtime: handlers
//! are registered under a name and invoked synchronously, in registration
//! order, whenever that name is emitted.
//!
//! The registry is an explicitly constructed, explicitly owned instance.
//! There is no process-wide singleton; whichever component needs to emit or
//! register holds the bus (or a mutable borrow of it).
//!
//! # Examples
//!
//! ```
//! use event_bus::{EventBus, Handler};
//!
//! let mut bus = EventBus::new();
//! bus.register("lunch", Handler::new(|_args| {
//!     println!("yum");
//!     Ok(())
//! }));
//! bus.emit("lunch", &[]).unwrap();
//! bus.emit("lunch", &[]).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bus;
mod handler;

pub use bus::EventBus;
pub use handler::Handler;
