//! Deferred task scheduling.
//!
//! A deferred task becomes eligible once its delay has elapsed; it is then
//! promoted onto the task queue, so it can never run before pending
//! synchronous work drains.

use crate::task_queue::Task;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

/// A deferred task waiting for its due instant.
struct TimerEntry {
    due: Instant,
    /// FIFO tie-breaker for entries sharing a due instant.
    seq: u64,
    task: Task,
}

// Ordering considers only (due, seq); the task payload is opaque.
impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// A queue of deferred tasks ordered by due instant.
///
/// Entries scheduled for the same instant pop in scheduling order.
#[derive(Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<TimerEntry>>,
    next_seq: u64,
}

impl TimerQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `task` to become eligible at `due`.
    pub fn schedule(&mut self, due: Instant, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(TimerEntry { due, seq, task }));
    }

    /// Removes and returns the earliest task whose due instant has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<Task> {
        let due = self.next_due()?;
        if due <= now {
            self.heap.pop().map(|Reverse(entry)| entry.task)
        } else {
            None
        }
    }

    /// Returns the earliest due instant, if any task is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Returns true if no deferred tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of pending deferred tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("len", &self.heap.len())
            .finish()
    }
}
