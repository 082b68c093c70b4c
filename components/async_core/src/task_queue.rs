//! Task and microtask queue management.
//!
//! This module provides the task and microtask queues used by the run loop.
//! Tasks are executed one at a time, with all microtasks draining after each
//! task.

use core_types::RuntimeError;
use std::collections::VecDeque;

/// A task to be executed by the run loop.
///
/// Tasks represent work for a future turn of the loop: timer expirations and
/// I/O completions land here. Task closures are effects; values produced
/// asynchronously travel through eventuals instead of task return values.
pub struct Task {
    callback: Box<dyn FnOnce() -> Result<(), RuntimeError>>,
}

impl Task {
    /// Creates a new task from a closure.
    ///
    /// A closure that needs to schedule further work captures a
    /// [`Scheduler`](crate::Scheduler) clone.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), RuntimeError> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Executes the task.
    ///
    /// An error halts the current turn and propagates out of the loop.
    pub fn run(self) -> Result<(), RuntimeError> {
        (self.callback)()
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {{ ... }}")
    }
}

/// A microtask to be executed by the run loop.
///
/// Microtasks run after the current task completes and before the next task
/// starts; eventual continuations are scheduled here.
pub struct Microtask {
    callback: Box<dyn FnOnce() -> Result<(), RuntimeError>>,
}

impl Microtask {
    /// Creates a new microtask from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), RuntimeError> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Executes the microtask.
    pub fn run(self) -> Result<(), RuntimeError> {
        (self.callback)()
    }
}

impl std::fmt::Debug for Microtask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Microtask {{ ... }}")
    }
}

/// A FIFO queue for tasks.
#[derive(Debug, Default)]
pub struct TaskQueue {
    queue: VecDeque<Task>,
}

impl TaskQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a task to the end of the queue.
    pub fn enqueue(&mut self, task: Task) {
        self.queue.push_back(task);
    }

    /// Removes and returns the next task.
    pub fn dequeue(&mut self) -> Option<Task> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// A FIFO queue for microtasks.
///
/// Drained completely after each task, including microtasks enqueued while
/// draining.
#[derive(Debug, Default)]
pub struct MicrotaskQueue {
    queue: VecDeque<Microtask>,
}

impl MicrotaskQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a microtask to the end of the queue.
    pub fn enqueue(&mut self, microtask: Microtask) {
        self.queue.push_back(microtask);
    }

    /// Removes and returns the next microtask.
    pub fn dequeue(&mut self) -> Option<Microtask> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued microtasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
