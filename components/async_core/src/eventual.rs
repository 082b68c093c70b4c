//! Asynchronous result handles.
//!
//! An [`Eventual`] represents the eventual completion (or failure) of an
//! asynchronous operation and its resulting value. It starts pending and
//! settles exactly once, to fulfilled or rejected; continuations attached
//! with [`then`](Eventual::then) run as microtasks on the owning loop, in
//! chain order.

use crate::run_loop::Scheduler;
use crate::task_queue::{Microtask, Task};
use core_types::{RuntimeError, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// The state of an eventual.
///
/// Once settled (fulfilled or rejected), an eventual cannot change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventualState {
    /// Neither fulfilled nor rejected yet
    Pending,
    /// Settled with a value
    Fulfilled,
    /// Settled with an error
    Rejected,
}

/// A fulfillment continuation.
///
/// Receives the settled value and produces the next value in the chain; an
/// error rejects the chained eventual.
pub struct Continuation {
    callback: Box<dyn FnOnce(Value) -> Result<Value, RuntimeError>>,
}

impl Continuation {
    /// Creates a new continuation from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Value) -> Result<Value, RuntimeError> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Consumes the continuation, applying it to `value`.
    pub fn run(self, value: Value) -> Result<Value, RuntimeError> {
        (self.callback)(value)
    }
}

impl std::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Continuation {{ ... }}")
    }
}

/// A rejection continuation.
///
/// Receives the settled error; returning a value recovers the chain,
/// returning an error keeps it rejected.
pub struct Recovery {
    callback: Box<dyn FnOnce(RuntimeError) -> Result<Value, RuntimeError>>,
}

impl Recovery {
    /// Creates a new recovery from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(RuntimeError) -> Result<Value, RuntimeError> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Consumes the recovery, applying it to `error`.
    pub fn run(self, error: RuntimeError) -> Result<Value, RuntimeError> {
        (self.callback)(error)
    }
}

impl std::fmt::Debug for Recovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recovery {{ ... }}")
    }
}

/// Handlers registered for one `then` call, plus the eventual they settle.
struct Reaction {
    chained: Eventual,
    on_fulfilled: Option<Continuation>,
    on_rejected: Option<Recovery>,
}

struct Inner {
    state: EventualState,
    value: Option<Value>,
    error: Option<RuntimeError>,
    reactions: Vec<Reaction>,
    /// Whether any reaction was ever attached. A rejection with none is an
    /// unhandled rejection.
    reaction_attached: bool,
    unhandled_reported: bool,
}

/// An asynchronous result handle.
///
/// Cloning shares the underlying cell: callers holding any clone observe the
/// same settlement. Callers receive the handle immediately; code after the
/// producing call observes [`EventualState::Pending`], not the final value,
/// unless it attaches a continuation and lets the loop run.
///
/// # Examples
///
/// ```
/// use async_core::{Eventual, EventualState, RunLoop};
/// use core_types::Value;
///
/// let run_loop = RunLoop::new();
/// let scheduler = run_loop.scheduler();
///
/// let eventual = Eventual::new(&scheduler);
/// assert_eq!(eventual.state(), EventualState::Pending);
///
/// eventual.resolve(Value::from("ready"));
/// assert_eq!(eventual.state(), EventualState::Fulfilled);
/// ```
#[derive(Clone)]
pub struct Eventual {
    inner: Rc<RefCell<Inner>>,
    scheduler: Scheduler,
}

impl Eventual {
    /// Creates a new pending eventual scheduled on `scheduler`'s loop.
    pub fn new(scheduler: &Scheduler) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: EventualState::Pending,
                value: None,
                error: None,
                reactions: Vec::new(),
                reaction_attached: false,
                unhandled_reported: false,
            })),
            scheduler: scheduler.clone(),
        }
    }

    /// Creates an eventual already fulfilled with `value`.
    pub fn fulfilled(scheduler: &Scheduler, value: Value) -> Self {
        let eventual = Self::new(scheduler);
        eventual.resolve(value);
        eventual
    }

    /// Creates an eventual already rejected with `error`.
    pub fn rejected(scheduler: &Scheduler, error: RuntimeError) -> Self {
        let eventual = Self::new(scheduler);
        eventual.reject(error);
        eventual
    }

    /// Creates an eventual that fulfills with `value` once `delay` elapses.
    pub fn resolve_after(scheduler: &Scheduler, delay: Duration, value: Value) -> Self {
        let eventual = Self::new(scheduler);
        let handle = eventual.clone();
        scheduler.set_timer(
            delay,
            Task::new(move || {
                handle.resolve(value);
                Ok(())
            }),
        );
        eventual
    }

    /// Returns the current state.
    pub fn state(&self) -> EventualState {
        self.inner.borrow().state.clone()
    }

    /// Returns the fulfillment value, if settled fulfilled.
    pub fn value(&self) -> Option<Value> {
        self.inner.borrow().value.clone()
    }

    /// Returns the rejection error, if settled rejected.
    pub fn error(&self) -> Option<RuntimeError> {
        self.inner.borrow().error.clone()
    }

    /// Fulfills the eventual with `value`.
    ///
    /// A no-op if already settled. Attached continuations are scheduled as
    /// microtasks, in attachment order.
    pub fn resolve(&self, value: Value) {
        let reactions = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != EventualState::Pending {
                return;
            }
            inner.state = EventualState::Fulfilled;
            inner.value = Some(value.clone());
            std::mem::take(&mut inner.reactions)
        };
        for reaction in reactions {
            Self::schedule_reaction(&self.scheduler, reaction, Ok(value.clone()));
        }
    }

    /// Rejects the eventual with `error`.
    ///
    /// A no-op if already settled. Attached reactions are scheduled as
    /// microtasks; with no reaction attached, the failure is surfaced through
    /// the loop's rejection hook one microtask-turn later.
    pub fn reject(&self, error: RuntimeError) {
        let (reactions, unobserved) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != EventualState::Pending {
                return;
            }
            inner.state = EventualState::Rejected;
            inner.error = Some(error.clone());
            let reactions = std::mem::take(&mut inner.reactions);
            (reactions, !inner.reaction_attached)
        };
        for reaction in reactions {
            Self::schedule_reaction(&self.scheduler, reaction, Err(error.clone()));
        }
        if unobserved {
            self.schedule_unhandled_check();
        }
    }

    /// Attaches handlers for fulfillment and/or rejection.
    ///
    /// Returns the chained eventual settled by the handlers' results. A
    /// missing fulfillment handler passes the value through; a missing
    /// rejection handler propagates the rejection to the chained eventual.
    pub fn then(
        &self,
        on_fulfilled: Option<Continuation>,
        on_rejected: Option<Recovery>,
    ) -> Eventual {
        let chained = Eventual::new(&self.scheduler);
        let reaction = Reaction {
            chained: chained.clone(),
            on_fulfilled,
            on_rejected,
        };

        let settled = {
            let mut inner = self.inner.borrow_mut();
            inner.reaction_attached = true;
            match inner.state.clone() {
                EventualState::Pending => {
                    inner.reactions.push(reaction);
                    None
                }
                EventualState::Fulfilled => {
                    Some((reaction, Ok(inner.value.clone().unwrap_or(Value::Undefined))))
                }
                EventualState::Rejected => Some((
                    reaction,
                    Err(inner
                        .error
                        .clone()
                        .unwrap_or_else(|| RuntimeError::internal("rejected without error"))),
                )),
            }
        };
        if let Some((reaction, outcome)) = settled {
            Self::schedule_reaction(&self.scheduler, reaction, outcome);
        }

        chained
    }

    /// Attaches a fulfillment continuation; sugar over [`then`](Self::then).
    pub fn map<F>(&self, f: F) -> Eventual
    where
        F: FnOnce(Value) -> Result<Value, RuntimeError> + 'static,
    {
        self.then(Some(Continuation::new(f)), None)
    }

    /// Attaches a rejection handler; sugar over [`then`](Self::then).
    pub fn catch<F>(&self, f: F) -> Eventual
    where
        F: FnOnce(RuntimeError) -> Result<Value, RuntimeError> + 'static,
    {
        self.then(None, Some(Recovery::new(f)))
    }

    /// Joins `sources` into one eventual.
    ///
    /// Fulfills with the list of results in input order once every source
    /// fulfills; rejects with the first rejection.
    pub fn all(scheduler: &Scheduler, sources: Vec<Eventual>) -> Eventual {
        struct JoinState {
            results: Vec<Option<Value>>,
            remaining: usize,
        }

        let joined = Eventual::new(scheduler);
        if sources.is_empty() {
            joined.resolve(Value::List(Vec::new()));
            return joined;
        }

        let join = Rc::new(RefCell::new(JoinState {
            results: vec![None; sources.len()],
            remaining: sources.len(),
        }));

        for (index, source) in sources.into_iter().enumerate() {
            let join = join.clone();
            let on_fulfilled = joined.clone();
            let on_rejected = joined.clone();
            source.then(
                Some(Continuation::new(move |value| {
                    let finished = {
                        let mut join = join.borrow_mut();
                        join.results[index] = Some(value);
                        join.remaining -= 1;
                        if join.remaining == 0 {
                            Some(
                                join.results
                                    .iter_mut()
                                    .map(|slot| slot.take().unwrap_or(Value::Undefined))
                                    .collect::<Vec<_>>(),
                            )
                        } else {
                            None
                        }
                    };
                    if let Some(items) = finished {
                        on_fulfilled.resolve(Value::List(items));
                    }
                    Ok(Value::Undefined)
                })),
                // First rejection wins; reject on a settled eventual is a
                // no-op. Recovering here keeps the join's internal chain from
                // surfacing a second, spurious unhandled rejection.
                Some(Recovery::new(move |error| {
                    on_rejected.reject(error);
                    Ok(Value::Undefined)
                })),
            );
        }

        joined
    }

    fn schedule_reaction(
        scheduler: &Scheduler,
        reaction: Reaction,
        outcome: Result<Value, RuntimeError>,
    ) {
        scheduler.enqueue_microtask(Microtask::new(move || {
            let Reaction {
                chained,
                on_fulfilled,
                on_rejected,
            } = reaction;
            match outcome {
                Ok(value) => match on_fulfilled {
                    Some(continuation) => match continuation.run(value) {
                        Ok(next) => chained.resolve(next),
                        Err(error) => chained.reject(error),
                    },
                    None => chained.resolve(value),
                },
                Err(error) => match on_rejected {
                    Some(recovery) => match recovery.run(error) {
                        Ok(next) => chained.resolve(next),
                        Err(error) => chained.reject(error),
                    },
                    None => chained.reject(error),
                },
            }
            Ok(())
        }));
    }

    /// Queues the microtask that reports this rejection if nothing observes
    /// it by the time the current microtask burst drains.
    fn schedule_unhandled_check(&self) {
        let inner = self.inner.clone();
        let scheduler = self.scheduler.clone();
        self.scheduler.enqueue_microtask(Microtask::new(move || {
            let report = {
                let mut guard = inner.borrow_mut();
                if guard.reaction_attached || guard.unhandled_reported {
                    None
                } else {
                    guard.unhandled_reported = true;
                    guard.error.clone()
                }
            };
            if let Some(error) = report {
                scheduler.report_unhandled(error);
            }
            Ok(())
        }));
    }
}

impl std::fmt::Debug for Eventual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Eventual")
            .field("state", &inner.state)
            .field("reactions", &inner.reactions.len())
            .finish()
    }
}
