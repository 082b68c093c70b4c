//! Single-threaded cooperative scheduling for Eventide.
//!
//! This crate provides the asynchronous core of the runtime:
//! - Run loop with task, microtask and deferred-task queues
//! - Three-state asynchronous result handles with chained continuations
//! - An I/O completion bridge for work performed off the loop thread
//!
//! # Overview
//!
//! - [`RunLoop`] - Main loop coordinating task execution
//! - [`Scheduler`] - Cloneable handle for enqueueing work on the loop
//! - [`Eventual`] - Pending → fulfilled | rejected result handle
//! - [`Task`] / [`Microtask`] - Units of work for the two queues
//!
//! All synchronous code of a turn completes before any deferred continuation
//! from that turn runs; microtasks drain completely after each task; deferred
//! tasks run no earlier than their delay.
//!
//! # Examples
//!
//! ## Run loop usage
//!
//! ```
//! use async_core::{RunLoop, Task};
//!
//! let mut run_loop = RunLoop::new();
//! run_loop.enqueue_task(Task::new(|| Ok(())));
//! run_loop.run_until_done().unwrap();
//! ```
//!
//! ## Eventual usage
//!
//! ```
//! use async_core::{Eventual, EventualState, RunLoop};
//! use core_types::Value;
//!
//! let mut run_loop = RunLoop::new();
//! let scheduler = run_loop.scheduler();
//!
//! let eventual = Eventual::new(&scheduler);
//! let greeting = eventual.map(|value| Ok(Value::Text(format!("{}!", value.to_text()))));
//!
//! eventual.resolve(Value::from("hey there"));
//! run_loop.run_until_done().unwrap();
//!
//! assert_eq!(greeting.value(), Some(Value::from("hey there!")));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eventual;
pub mod run_loop;
pub mod task_queue;
pub mod timer;

// Re-export main types at crate root
pub use eventual::{Continuation, Eventual, EventualState, Recovery};
pub use run_loop::{CompletionSender, RunLoop, Scheduler};
pub use task_queue::{Microtask, MicrotaskQueue, Task, TaskQueue};
pub use timer::TimerQueue;
