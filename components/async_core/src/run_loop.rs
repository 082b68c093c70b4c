//! Run loop implementation.
//!
//! This module provides the loop that coordinates task, microtask, timer and
//! I/O-completion execution. One turn of the loop:
//! 1. Drains microtasks left pending by synchronous code or a prior turn
//! 2. Delivers ready I/O completions onto the task queue
//! 3. Promotes due deferred tasks onto the task queue
//! 4. Takes the oldest task and executes it
//! 5. Drains the microtask queue completely
//!
//! The leading drain is what keeps a zero-delay deferred task from running
//! ahead of continuations queued by the synchronous code of the same turn.
//!
//! User code runs on a single logical thread. Host I/O may run elsewhere, but
//! its continuations execute only here, when the loop delivers the posted
//! completion.

use crate::task_queue::{Microtask, MicrotaskQueue, Task, TaskQueue};
use crate::timer::TimerQueue;
use core_types::{RuntimeError, Value};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

type IoContinuation = Box<dyn FnOnce(Result<Value, RuntimeError>) -> Result<(), RuntimeError>>;
type RejectionHook = Box<dyn FnMut(&RuntimeError)>;

/// An I/O result posted back to the loop by a driver thread.
struct IoCompletion {
    id: u64,
    result: Result<Value, RuntimeError>,
}

/// The sending half of a registered I/O completion.
///
/// Handed to whichever thread performs the operation; consumed by
/// [`complete`](CompletionSender::complete). A sender dropped without
/// completing posts an internal error so the loop never parks on a
/// continuation that can no longer arrive.
pub struct CompletionSender {
    id: u64,
    tx: Option<Sender<IoCompletion>>,
}

impl CompletionSender {
    /// Posts the operation's result to the loop.
    pub fn complete(mut self, result: Result<Value, RuntimeError>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(IoCompletion {
                id: self.id,
                result,
            });
        }
    }
}

impl Drop for CompletionSender {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(IoCompletion {
                id: self.id,
                result: Err(RuntimeError::internal(
                    "i/o completion dropped before a result was posted",
                )),
            });
        }
    }
}

impl std::fmt::Debug for CompletionSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSender")
            .field("id", &self.id)
            .finish()
    }
}

struct LoopState {
    tasks: TaskQueue,
    microtasks: MicrotaskQueue,
    timers: TimerQueue,
    io_waiters: HashMap<u64, IoContinuation>,
    next_io_id: u64,
    completion_tx: Sender<IoCompletion>,
    unhandled: Vec<RuntimeError>,
    // Option so the hook can be taken out while it runs; a hook that
    // re-enters the scheduler would otherwise hit a RefCell double borrow.
    rejection_hook: Option<RejectionHook>,
}

/// A cloneable handle for scheduling work on a [`RunLoop`].
///
/// Tasks, microtasks, deferred tasks and I/O continuations are all enqueued
/// through a scheduler. Closures that need to schedule follow-up work capture
/// their own clone.
#[derive(Clone)]
pub struct Scheduler {
    state: Rc<RefCell<LoopState>>,
}

impl Scheduler {
    /// Adds a task to the task queue.
    pub fn enqueue_task(&self, task: Task) {
        self.state.borrow_mut().tasks.enqueue(task);
    }

    /// Adds a microtask to the microtask queue.
    pub fn enqueue_microtask(&self, microtask: Microtask) {
        self.state.borrow_mut().microtasks.enqueue(microtask);
    }

    /// Schedules `task` to run once `delay` has elapsed.
    ///
    /// The task runs no earlier than its delay and never before pending
    /// synchronous work completes.
    pub fn set_timer(&self, delay: Duration, task: Task) {
        let due = Instant::now() + delay;
        self.state.borrow_mut().timers.schedule(due, task);
    }

    /// Registers a loop-side continuation for an I/O operation and returns
    /// the sender the performing thread completes it with.
    ///
    /// The continuation runs as a task on the loop thread once the result
    /// arrives.
    pub fn register_io<F>(&self, on_complete: F) -> CompletionSender
    where
        F: FnOnce(Result<Value, RuntimeError>) -> Result<(), RuntimeError> + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.next_io_id;
        state.next_io_id += 1;
        state.io_waiters.insert(id, Box::new(on_complete));
        CompletionSender {
            id,
            tx: Some(state.completion_tx.clone()),
        }
    }

    /// Returns the number of I/O operations still awaiting completion.
    pub fn pending_io(&self) -> usize {
        self.state.borrow().io_waiters.len()
    }

    /// Surfaces an asynchronous failure that no failure handler consumed.
    ///
    /// The failure is passed to the loop's rejection hook and retained for
    /// [`RunLoop::take_unhandled_rejections`].
    pub fn report_unhandled(&self, error: RuntimeError) {
        let mut hook = self.state.borrow_mut().rejection_hook.take();
        if let Some(h) = hook.as_mut() {
            h(&error);
        }
        let mut state = self.state.borrow_mut();
        if let Some(h) = hook {
            state.rejection_hook.get_or_insert(h);
        }
        state.unhandled.push(error);
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scheduler {{ ... }}")
    }
}

/// The run loop.
///
/// # Examples
///
/// ```
/// use async_core::{RunLoop, Task};
///
/// let mut run_loop = RunLoop::new();
/// run_loop.enqueue_task(Task::new(|| Ok(())));
/// run_loop.run_until_done().unwrap();
/// ```
pub struct RunLoop {
    state: Rc<RefCell<LoopState>>,
    completion_rx: Receiver<IoCompletion>,
    scheduler: Scheduler,
}

impl RunLoop {
    /// Creates a new loop with empty queues.
    ///
    /// The default rejection hook writes unhandled failures to stderr.
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = channel::unbounded();
        let state = Rc::new(RefCell::new(LoopState {
            tasks: TaskQueue::new(),
            microtasks: MicrotaskQueue::new(),
            timers: TimerQueue::new(),
            io_waiters: HashMap::new(),
            next_io_id: 0,
            completion_tx,
            unhandled: Vec::new(),
            rejection_hook: Some(Box::new(|error: &RuntimeError| {
                eprintln!("unhandled rejection: {error}");
            })),
        }));
        Self {
            scheduler: Scheduler {
                state: state.clone(),
            },
            state,
            completion_rx,
        }
    }

    /// Returns a scheduling handle for this loop.
    pub fn scheduler(&self) -> Scheduler {
        self.scheduler.clone()
    }

    /// Adds a task to the task queue.
    pub fn enqueue_task(&mut self, task: Task) {
        self.scheduler.enqueue_task(task);
    }

    /// Adds a microtask to the microtask queue.
    pub fn enqueue_microtask(&mut self, microtask: Microtask) {
        self.scheduler.enqueue_microtask(microtask);
    }

    /// Returns true if the task queue is empty.
    pub fn is_task_queue_empty(&self) -> bool {
        self.state.borrow().tasks.is_empty()
    }

    /// Returns true if the microtask queue is empty.
    pub fn is_microtask_queue_empty(&self) -> bool {
        self.state.borrow().microtasks.is_empty()
    }

    /// Replaces the hook that receives unhandled rejections.
    ///
    /// The hook must not schedule work or otherwise re-enter the loop.
    pub fn set_rejection_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&RuntimeError) + 'static,
    {
        self.state.borrow_mut().rejection_hook = Some(Box::new(hook));
    }

    /// Returns the unhandled rejections surfaced so far, clearing the record.
    pub fn take_unhandled_rejections(&mut self) -> Vec<RuntimeError> {
        std::mem::take(&mut self.state.borrow_mut().unhandled)
    }

    /// Runs the loop until no tasks, microtasks, deferred tasks or pending
    /// I/O operations remain.
    ///
    /// Parks on the completion channel, or sleeps until the next timer, when
    /// only deferred work is outstanding. Returns the first task or microtask
    /// error.
    pub fn run_until_done(&mut self) -> Result<(), RuntimeError> {
        loop {
            // Pending continuations run before any deferred task becomes a
            // task, including on the very first turn.
            self.run_all_microtasks()?;
            self.drain_ready_completions();
            self.promote_due_timers();

            let task = self.state.borrow_mut().tasks.dequeue();
            if let Some(task) = task {
                task.run()?;
            }

            self.run_all_microtasks()?;

            let idle = {
                let state = self.state.borrow();
                state.tasks.is_empty() && state.microtasks.is_empty()
            };
            if idle && !self.wait_for_deferred_work() {
                return Ok(());
            }
        }
    }

    /// Runs all microtasks in the queue until empty.
    ///
    /// Microtasks enqueued while draining are also processed before this
    /// method returns.
    pub fn run_all_microtasks(&mut self) -> Result<(), RuntimeError> {
        loop {
            let microtask = self.state.borrow_mut().microtasks.dequeue();
            match microtask {
                Some(microtask) => microtask.run()?,
                None => return Ok(()),
            }
        }
    }

    /// Processes one complete turn: pending microtasks drain, ready
    /// completions and due timers are promoted, one task runs, then all
    /// microtasks drain again.
    pub fn process_one_turn(&mut self) -> Result<(), RuntimeError> {
        self.run_all_microtasks()?;
        self.drain_ready_completions();
        self.promote_due_timers();

        let task = self.state.borrow_mut().tasks.dequeue();
        if let Some(task) = task {
            task.run()?;
        }

        self.run_all_microtasks()
    }

    /// Moves completions that have already arrived onto the task queue.
    fn drain_ready_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.deliver(completion);
        }
    }

    /// Moves deferred tasks whose delay has elapsed onto the task queue.
    fn promote_due_timers(&mut self) {
        let now = Instant::now();
        let mut state = self.state.borrow_mut();
        while let Some(task) = state.timers.pop_due(now) {
            state.tasks.enqueue(task);
        }
    }

    fn deliver(&mut self, completion: IoCompletion) {
        let waiter = self.state.borrow_mut().io_waiters.remove(&completion.id);
        if let Some(waiter) = waiter {
            let result = completion.result;
            self.state
                .borrow_mut()
                .tasks
                .enqueue(Task::new(move || waiter(result)));
        }
    }

    /// Blocks until deferred work becomes runnable.
    ///
    /// Returns false when no timers or I/O operations are outstanding, i.e.
    /// the loop is done.
    fn wait_for_deferred_work(&mut self) -> bool {
        let (next_due, io_pending) = {
            let state = self.state.borrow();
            (state.timers.next_due(), !state.io_waiters.is_empty())
        };
        match (next_due, io_pending) {
            (None, false) => false,
            (Some(due), false) => {
                let now = Instant::now();
                if due > now {
                    std::thread::sleep(due - now);
                }
                true
            }
            (None, true) => match self.completion_rx.recv() {
                Ok(completion) => {
                    self.deliver(completion);
                    true
                }
                Err(_) => false,
            },
            (Some(due), true) => {
                let wait = due.saturating_duration_since(Instant::now());
                match self.completion_rx.recv_timeout(wait) {
                    Ok(completion) => self.deliver(completion),
                    Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
                }
                true
            }
        }
    }
}

impl Default for RunLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RunLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RunLoop")
            .field("tasks", &state.tasks.len())
            .field("microtasks", &state.microtasks.len())
            .field("timers", &state.timers.len())
            .field("pending_io", &state.io_waiters.len())
            .finish()
    }
}
