//! Tests pinning the documented ordering contract.
//!
//! These assert on the contract itself rather than incidental scheduler
//! behavior: synchronous work first, then same-turn continuations, then
//! deferred tasks; blocking I/O holds the loop thread ahead of posted
//! completions.

use async_core::{Eventual, EventualState, Microtask, RunLoop, Task};
use core_types::Value;
use host_io::{Console, FileReader, IoDriver, TextEncoding};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn captured_console() -> (Rc<Console>, Rc<RefCell<Vec<String>>>) {
    let output = Rc::new(RefCell::new(Vec::new()));
    (Rc::new(Console::new_with_output(output.clone())), output)
}

#[test]
fn synchronous_work_always_precedes_continuations_and_timers() {
    let (console, output) = captured_console();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let c = console.clone();
    scheduler.set_timer(
        Duration::ZERO,
        Task::new(move || {
            c.print("timer");
            Ok(())
        }),
    );
    let c = console.clone();
    scheduler.enqueue_microtask(Microtask::new(move || {
        c.print("microtask");
        Ok(())
    }));
    console.print("sync");

    run_loop.run_until_done().unwrap();

    assert_eq!(*output.borrow(), vec!["sync", "microtask", "timer"]);
}

#[test]
fn a_deferred_task_never_runs_before_its_delay() {
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let fired_at = Rc::new(RefCell::new(None));
    let f = fired_at.clone();
    let started = Instant::now();
    scheduler.set_timer(
        Duration::from_millis(50),
        Task::new(move || {
            *f.borrow_mut() = Some(started.elapsed());
            Ok(())
        }),
    );

    run_loop.run_until_done().unwrap();

    let elapsed = fired_at.borrow().expect("timer should have fired");
    assert!(elapsed >= Duration::from_millis(50));
}

#[test]
fn blocking_read_traces_before_the_nonblocking_read_issued_first() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"shared resource").unwrap();

    let (console, output) = captured_console();
    let mut run_loop = RunLoop::new();
    let driver = IoDriver::new().unwrap();
    let reader = FileReader::new(&driver, &run_loop.scheduler());

    let c = console.clone();
    reader.read_to_string(file.path(), TextEncoding::Utf8, move |_result| {
        c.print("non-blocking read completed");
        Ok(())
    });

    reader
        .read_to_string_sync(file.path(), TextEncoding::Utf8)
        .unwrap();
    console.print("blocking read completed");

    run_loop.run_until_done().unwrap();

    assert_eq!(
        *output.borrow(),
        vec!["blocking read completed", "non-blocking read completed"]
    );
}

#[test]
fn chain_steps_run_in_order_and_ahead_of_longer_timers() {
    let (console, output) = captured_console();
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let c = console.clone();
    scheduler.set_timer(
        Duration::from_millis(80),
        Task::new(move || {
            c.print("late timer");
            Ok(())
        }),
    );

    let mut chain =
        Eventual::resolve_after(&scheduler, Duration::from_millis(10), Value::from("start"));
    for step in ["one", "two", "three"] {
        let c = console.clone();
        chain = chain.map(move |value| {
            c.print(&format!("chain {step}"));
            Ok(value)
        });
    }

    run_loop.run_until_done().unwrap();

    assert_eq!(
        *output.borrow(),
        vec!["chain one", "chain two", "chain three", "late timer"]
    );
}

#[test]
fn callers_observe_a_placeholder_until_they_wait() {
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let handle = Eventual::resolve_after(&scheduler, Duration::from_millis(5), Value::from("v"));

    // Code after the producing call sees the placeholder, not the value.
    assert_eq!(handle.state(), EventualState::Pending);
    assert_eq!(handle.value(), None);

    run_loop.run_until_done().unwrap();

    assert_eq!(handle.state(), EventualState::Fulfilled);
    assert_eq!(handle.value(), Some(Value::from("v")));
}
