//! Unit tests for the run loop's ordering contract.

use async_core::{Eventual, Microtask, RunLoop, Task};
use core_types::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

type Trace = Rc<RefCell<Vec<String>>>;

fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

fn push(log: &Trace, line: impl Into<String>) {
    log.borrow_mut().push(line.into());
}

#[test]
fn synchronous_code_runs_before_any_continuation() {
    let log = trace();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let l = log.clone();
    scheduler.set_timer(
        Duration::from_millis(0),
        Task::new(move || {
            push(&l, "timer");
            Ok(())
        }),
    );
    let l = log.clone();
    scheduler.enqueue_microtask(Microtask::new(move || {
        push(&l, "microtask");
        Ok(())
    }));

    // Statements between scheduling and running the loop are the
    // "synchronous code" of this turn.
    push(&log, "sync-1");
    push(&log, "sync-2");

    run_loop.run_until_done().unwrap();

    assert_eq!(*log.borrow(), vec!["sync-1", "sync-2", "microtask", "timer"]);
}

#[test]
fn chain_steps_are_not_interleaved_with_longer_timers() {
    let log = trace();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    // A longer-delay deferred task scheduled before the chain exists.
    let l = log.clone();
    scheduler.set_timer(
        Duration::from_millis(60),
        Task::new(move || {
            push(&l, "long-timer");
            Ok(())
        }),
    );

    let seed = Eventual::resolve_after(&scheduler, Duration::from_millis(5), Value::from("seed"));
    let mut chain = seed;
    for step in 1..=4 {
        let l = log.clone();
        chain = chain.map(move |value| {
            push(&l, format!("step-{step}"));
            Ok(value)
        });
    }

    run_loop.run_until_done().unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["step-1", "step-2", "step-3", "step-4", "long-timer"]
    );
}

#[test]
fn a_pending_handle_is_returned_before_the_value_exists() {
    let log = trace();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    // The producing call hands back a placeholder immediately.
    let handle = Eventual::resolve_after(&scheduler, Duration::from_millis(5), Value::from("5"));

    let l = log.clone();
    let _printed = handle.map(move |value| {
        push(&l, format!("inside: {}", value.to_text()));
        Ok(value)
    });
    push(&log, format!("outside: {:?}", handle.state()));

    run_loop.run_until_done().unwrap();

    assert_eq!(*log.borrow(), vec!["outside: Pending", "inside: 5"]);
}

#[test]
fn process_one_turn_runs_one_task_and_all_microtasks() {
    let log = trace();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    for tag in ["task-1", "task-2"] {
        let l = log.clone();
        let s = scheduler.clone();
        run_loop.enqueue_task(Task::new(move || {
            push(&l, tag);
            let l2 = l.clone();
            s.enqueue_microtask(Microtask::new(move || {
                push(&l2, format!("micro-after-{tag}"));
                Ok(())
            }));
            Ok(())
        }));
    }

    run_loop.process_one_turn().unwrap();
    assert_eq!(*log.borrow(), vec!["task-1", "micro-after-task-1"]);

    run_loop.process_one_turn().unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["task-1", "micro-after-task-1", "task-2", "micro-after-task-2"]
    );
}

#[test]
fn microtasks_enqueued_while_draining_run_in_the_same_burst() {
    let log = trace();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let l = log.clone();
    let s = scheduler.clone();
    run_loop.enqueue_microtask(Microtask::new(move || {
        push(&l, "outer");
        let l2 = l.clone();
        s.enqueue_microtask(Microtask::new(move || {
            push(&l2, "inner");
            Ok(())
        }));
        Ok(())
    }));

    run_loop.run_all_microtasks().unwrap();

    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}
