//! The execution-order demonstrations.
//!
//! Each demonstration schedules work against the run loop and traces what it
//! observes to the console; the caller drains the loop afterwards. Together
//! they walk through the ordering contract: synchronous statements first,
//! then continuations, then deferred tasks, with blocking I/O holding the
//! loop thread ahead of posted completions.

use async_core::{Eventual, Microtask, Scheduler, Task};
use core_types::{RuntimeError, Value};
use event_bus::{EventBus, Handler};
use host_io::{Console, FetchResponse, Fetcher, FileReader, TextEncoding};
use std::rc::Rc;
use std::time::Duration;

/// Names of all demonstrations, in presentation order.
pub const DEMO_NAMES: &[&str] = &[
    "events",
    "ordering",
    "chain",
    "handle",
    "files",
    "fetch",
    "join",
];

const NOT_FOUND_URL: &str =
    "https://mdn.github.io/learning-area/javascript/apis/fetching-data/can-store/not-found";
const SUPERHEROES_URL: &str =
    "https://mdn.github.io/learning-area/javascript/oojs/json/superheroes.json";

/// Registers a handler for a named event and emits the event twice; every
/// emission invokes the handlers in full registration order.
pub fn events(console: &Rc<Console>) -> Result<(), RuntimeError> {
    let mut bus = EventBus::new();

    let c = console.clone();
    bus.register(
        "lunch",
        Handler::new(move |_args| {
            c.print("yum 🌮🍩🌯");
            Ok(())
        }),
    );

    bus.emit("lunch", &[])?;
    bus.emit("lunch", &[])?;
    Ok(())
}

/// Shows synchronous statements tracing before a continuation, which traces
/// before a deferred task, even a zero-delay one scheduled first.
pub fn ordering(scheduler: &Scheduler, console: &Rc<Console>) -> Result<(), RuntimeError> {
    let c = console.clone();
    scheduler.set_timer(
        Duration::ZERO,
        Task::new(move || {
            c.print("deferred: timer fired");
            Ok(())
        }),
    );

    let c = console.clone();
    scheduler.enqueue_microtask(Microtask::new(move || {
        c.print("continuation: microtask ran");
        Ok(())
    }));

    console.print("sync: first statement");
    console.print("sync: second statement");
    Ok(())
}

/// A timer-based resolution chained through four continuations, each
/// consuming the previous step's value.
pub fn chain(scheduler: &Scheduler, console: &Rc<Console>) -> Result<(), RuntimeError> {
    let c = console.clone();
    Eventual::resolve_after(scheduler, Duration::from_millis(300), Value::from("foo"))
        .map(|value| Ok(Value::Text(format!("{} and bar", value.to_text()))))
        .map(|value| Ok(Value::Text(format!("{} and bar again", value.to_text()))))
        .map(|value| Ok(Value::Text(format!("{} and again", value.to_text()))))
        .map(|value| Ok(Value::Text(format!("{} and again", value.to_text()))))
        .map(move |value| {
            c.print(&value.to_text());
            Ok(value)
        });
    Ok(())
}

/// Calls a suspending function without waiting for it: the caller observes
/// the pending handle, the continuation inside observes the value.
pub fn handle(scheduler: &Scheduler, console: &Rc<Console>) -> Result<(), RuntimeError> {
    let result = suspended_greeting(scheduler, console);
    console.print(&format!("outside: {:?}", result.state()));
    Ok(())
}

fn suspended_greeting(scheduler: &Scheduler, console: &Rc<Console>) -> Eventual {
    let c = console.clone();
    Eventual::fulfilled(scheduler, Value::from("Hey there")).map(move |value| {
        c.print(&format!("inside: {}", value.to_text()));
        Ok(Value::Number(5.0))
    })
}

/// Reads one file three ways: a callback-style read issued first, a blocking
/// read that still traces first, and an eventual-style read.
pub fn files(reader: &FileReader, console: &Rc<Console>, path: &str) -> Result<(), RuntimeError> {
    let c = console.clone();
    reader.read_to_string(path, TextEncoding::Utf8, move |result| {
        match result {
            Ok(contents) => c.print(&format!(
                "async read done ({} bytes), probably after the sync read despite being issued first",
                contents.len()
            )),
            Err(error) => c.error(&[Value::Text(error.to_string())]),
        }
        Ok(())
    });

    let contents = reader.read_to_string_sync(path, TextEncoding::Utf8)?;
    console.print(&format!("sync read done: {} bytes", contents.len()));

    let c = console.clone();
    reader
        .read_to_string_deferred(path, TextEncoding::Utf8)
        .map(move |value| {
            c.print(&format!(
                "deferred read done: {} bytes",
                value.to_text().len()
            ));
            Ok(value)
        });
    Ok(())
}

/// Fetches structured data and prints the first record's name; a transport
/// or decode failure lands in the failure handler instead.
pub fn fetch(fetcher: &Fetcher, console: &Rc<Console>, url: &str) -> Result<(), RuntimeError> {
    let c = console.clone();
    let on_failure = console.clone();
    fetcher
        .fetch_json(url)
        .map(move |data| {
            let name = first_record_name(&data);
            c.print(&name);
            Ok(Value::Undefined)
        })
        .catch(move |error| {
            on_failure.error(&[Value::Text(error.to_string())]);
            Ok(Value::Undefined)
        });
    Ok(())
}

fn first_record_name(data: &Value) -> String {
    match data {
        Value::Json(items) => items
            .get(0)
            .and_then(|item| item.get("name"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("(no name)")
            .to_string(),
        _ => "(no data)".to_string(),
    }
}

/// Joins three fetches and prints "url: status" for each response once all
/// arrive; the first transport failure rejects the whole join.
pub fn join(
    fetcher: &Fetcher,
    scheduler: &Scheduler,
    console: &Rc<Console>,
    primary_url: &str,
) -> Result<(), RuntimeError> {
    let sources = [primary_url, NOT_FOUND_URL, SUPERHEROES_URL]
        .into_iter()
        .map(|url| fetcher.fetch_deferred(url))
        .collect();

    let c = console.clone();
    let on_failure = console.clone();
    Eventual::all(scheduler, sources)
        .map(move |value| {
            if let Value::List(payloads) = value {
                for payload in payloads {
                    let response = FetchResponse::from_value(payload)?;
                    c.print(&format!("{}: {}", response.url(), response.status()));
                }
            }
            Ok(Value::Undefined)
        })
        .catch(move |error| {
            on_failure.error(&[Value::Text(format!("Failed to fetch: {}", error.message))]);
            Ok(Value::Undefined)
        });
    Ok(())
}
