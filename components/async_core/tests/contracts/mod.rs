//! Contract tests for the async_core component
//!
//! These tests pin the public API surface other components build against.

use async_core::{
    Continuation, Eventual, EventualState, Microtask, RunLoop, Scheduler, Task,
};
use core_types::{RuntimeError, Value};

mod run_loop_contract {
    use super::*;

    #[test]
    fn run_loop_new_returns_self() {
        let run_loop = RunLoop::new();
        let _ = run_loop;
    }

    #[test]
    fn run_loop_hands_out_cloneable_schedulers() {
        let run_loop = RunLoop::new();
        let scheduler: Scheduler = run_loop.scheduler();
        let _clone: Scheduler = scheduler.clone();
    }

    #[test]
    fn run_loop_enqueue_task_accepts_task() {
        let mut run_loop = RunLoop::new();
        run_loop.enqueue_task(Task::new(|| Ok(())));
    }

    #[test]
    fn run_loop_enqueue_microtask_accepts_microtask() {
        let mut run_loop = RunLoop::new();
        run_loop.enqueue_microtask(Microtask::new(|| Ok(())));
    }

    #[test]
    fn run_until_done_returns_result() {
        let mut run_loop = RunLoop::new();
        let result: Result<(), RuntimeError> = run_loop.run_until_done();
        assert!(result.is_ok());
    }

    #[test]
    fn completion_sender_is_send() {
        fn assert_send<T: Send>(_value: &T) {}
        let run_loop = RunLoop::new();
        let sender = run_loop.scheduler().register_io(|_result| Ok(()));
        assert_send(&sender);
        sender.complete(Ok(Value::Undefined));
    }
}

mod eventual_contract {
    use super::*;

    #[test]
    fn eventual_new_is_pending() {
        let run_loop = RunLoop::new();
        let eventual = Eventual::new(&run_loop.scheduler());
        assert!(matches!(eventual.state(), EventualState::Pending));
    }

    #[test]
    fn eventual_resolve_takes_value() {
        let run_loop = RunLoop::new();
        let eventual = Eventual::new(&run_loop.scheduler());
        eventual.resolve(Value::from("x"));
    }

    #[test]
    fn eventual_reject_takes_error() {
        let mut run_loop = RunLoop::new();
        run_loop.set_rejection_hook(|_error| {});
        let eventual = Eventual::new(&run_loop.scheduler());
        eventual.reject(RuntimeError::internal("contract"));
        run_loop.run_until_done().unwrap();
    }

    #[test]
    fn eventual_then_returns_eventual() {
        let run_loop = RunLoop::new();
        let eventual = Eventual::new(&run_loop.scheduler());
        let chained: Eventual = eventual.then(Some(Continuation::new(Ok)), None);
        assert!(matches!(chained.state(), EventualState::Pending));
    }

    #[test]
    fn eventual_clones_share_settlement() {
        let run_loop = RunLoop::new();
        let eventual = Eventual::new(&run_loop.scheduler());
        let alias = eventual.clone();
        eventual.resolve(Value::from("shared"));
        assert!(matches!(alias.state(), EventualState::Fulfilled));
    }
}

mod eventual_state_contract {
    use super::*;

    #[test]
    fn state_has_pending_variant() {
        assert!(matches!(EventualState::Pending, EventualState::Pending));
    }

    #[test]
    fn state_has_fulfilled_variant() {
        assert!(matches!(EventualState::Fulfilled, EventualState::Fulfilled));
    }

    #[test]
    fn state_has_rejected_variant() {
        assert!(matches!(EventualState::Rejected, EventualState::Rejected));
    }
}
