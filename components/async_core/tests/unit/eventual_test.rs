//! Unit tests for eventual chains.

use async_core::{Eventual, EventualState, RunLoop};
use core_types::{RuntimeError, Value};
use std::time::Duration;

fn append(suffix: &'static str) -> impl FnOnce(Value) -> Result<Value, RuntimeError> {
    move |value| Ok(Value::Text(format!("{}{}", value.to_text(), suffix)))
}

#[test]
fn each_continuation_consumes_the_previous_result() {
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let seed = Eventual::new(&scheduler);
    let chained = seed
        .map(append(" one"))
        .map(append(" two"))
        .map(append(" three"));

    seed.resolve(Value::from("seed"));
    run_loop.run_until_done().unwrap();

    assert_eq!(chained.value(), Some(Value::from("seed one two three")));
}

#[test]
fn timer_backed_chain_produces_the_expected_sentence() {
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let chained =
        Eventual::resolve_after(&scheduler, Duration::from_millis(300), Value::from("foo"))
            .map(append(" and bar"))
            .map(append(" and bar again"))
            .map(append(" and again"))
            .map(append(" and again"));

    run_loop.run_until_done().unwrap();

    assert_eq!(
        chained.value(),
        Some(Value::from("foo and bar and bar again and again and again"))
    );
}

#[test]
fn continuation_error_rejects_the_chained_eventual() {
    let mut run_loop = RunLoop::new();
    run_loop.set_rejection_hook(|_error| {});
    let scheduler = run_loop.scheduler();

    let seed = Eventual::fulfilled(&scheduler, Value::from("ok"));
    let failed = seed.map(|_value| Err(RuntimeError::decode("went wrong in the middle")));
    let recovered = failed.catch(|error| Ok(Value::Text(format!("recovered: {}", error.message))));

    run_loop.run_until_done().unwrap();

    assert_eq!(failed.state(), EventualState::Rejected);
    assert_eq!(
        recovered.value(),
        Some(Value::from("recovered: went wrong in the middle"))
    );
}

#[test]
fn rejection_skips_fulfillment_handlers_until_a_recovery() {
    let mut run_loop = RunLoop::new();
    run_loop.set_rejection_hook(|_error| {});
    let scheduler = run_loop.scheduler();

    let failed = Eventual::rejected(&scheduler, RuntimeError::io("missing"));
    let skipped = failed.map(append(" never-applied"));
    let recovered = skipped.catch(|error| Ok(Value::Text(error.message)));
    let resumed = recovered.map(append(" then-continued"));

    run_loop.run_until_done().unwrap();

    assert_eq!(resumed.value(), Some(Value::from("missing then-continued")));
}

#[test]
fn late_continuations_on_a_settled_eventual_still_run() {
    let mut run_loop = RunLoop::new();
    let scheduler = run_loop.scheduler();

    let settled = Eventual::fulfilled(&scheduler, Value::from("done"));
    run_loop.run_until_done().unwrap();

    let late = settled.map(append(" late"));
    run_loop.run_until_done().unwrap();

    assert_eq!(late.value(), Some(Value::from("done late")));
}

#[test]
fn unhandled_rejection_in_the_middle_of_a_chain_is_surfaced_once() {
    let mut run_loop = RunLoop::new();
    run_loop.set_rejection_hook(|_error| {});
    let scheduler = run_loop.scheduler();

    let failed = Eventual::rejected(&scheduler, RuntimeError::http("tail has no catch"));
    let _tail = failed.map(append(" a")).map(append(" b"));

    run_loop.run_until_done().unwrap();

    let unhandled = run_loop.take_unhandled_rejections();
    assert_eq!(unhandled.len(), 1);
    assert_eq!(unhandled[0].message, "tail has no catch");
}
