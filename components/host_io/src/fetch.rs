//! HTTP fetching through a narrow contract.
//!
//! A fetch asynchronously yields a [`FetchResponse`] exposing the status
//! code, the final URL, and a body-decoding operation that asynchronously
//! yields structured data. Non-2xx statuses are transport-level successes;
//! only network failures surface as rejections.

use crate::driver::IoDriver;
use async_core::{Eventual, Microtask, Scheduler};
use core_types::{RuntimeError, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::runtime::Handle;

/// A completed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    status: u16,
    url: String,
    body: String,
}

impl FetchResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The URL the response was served from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, RuntimeError> {
        serde_json::from_str(&self.body)
            .map_err(|e| RuntimeError::decode(format!("invalid json body from {}: {e}", self.url)))
    }

    /// Decodes the body as JSON on a later microtask turn, returning an
    /// eventual that fulfills with the structured data.
    pub fn json_deferred(&self, scheduler: &Scheduler) -> Eventual {
        let eventual = Eventual::new(scheduler);
        let settle = eventual.clone();
        let body = self.body.clone();
        let url = self.url.clone();
        scheduler.enqueue_microtask(Microtask::new(move || {
            match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(data) => settle.resolve(Value::Json(data)),
                Err(e) => settle.reject(RuntimeError::decode(format!(
                    "invalid json body from {url}: {e}"
                ))),
            }
            Ok(())
        }));
        eventual
    }

    /// Renders the response into the loop's payload shape.
    pub fn to_value(&self) -> Value {
        Value::Json(json!({
            "status": self.status,
            "url": self.url,
            "body": self.body,
        }))
    }

    /// Rebuilds a response from [`to_value`](Self::to_value) output.
    pub fn from_value(value: Value) -> Result<Self, RuntimeError> {
        let data = match value {
            Value::Json(data) => data,
            _ => return Err(RuntimeError::internal("fetch completion was not json")),
        };
        serde_json::from_value(data)
            .map_err(|e| RuntimeError::internal(format!("malformed fetch completion: {e}")))
    }
}

/// Issues HTTP fetches for code running on the loop.
pub struct Fetcher {
    handle: Handle,
    client: reqwest::Client,
    scheduler: Scheduler,
}

impl Fetcher {
    /// Creates a fetcher that performs requests on `driver` and posts
    /// completions to `scheduler`'s loop.
    pub fn new(driver: &IoDriver, scheduler: &Scheduler) -> Self {
        Self {
            handle: driver.handle(),
            client: driver.client(),
            scheduler: scheduler.clone(),
        }
    }

    /// Fetches `url`; `on_response` runs on the loop thread once the
    /// response (or the transport failure) arrives.
    pub fn fetch<F>(&self, url: impl Into<String>, on_response: F)
    where
        F: FnOnce(Result<FetchResponse, RuntimeError>) -> Result<(), RuntimeError> + 'static,
    {
        let sender = self
            .scheduler
            .register_io(move |result| on_response(result.and_then(FetchResponse::from_value)));
        let url = url.into();
        let client = self.client.clone();
        self.handle.spawn(async move {
            sender.complete(perform_fetch(client, url).await);
        });
    }

    /// Fetches `url`, returning an eventual that fulfills with the response
    /// in its payload shape (see [`FetchResponse::from_value`]).
    pub fn fetch_deferred(&self, url: impl Into<String>) -> Eventual {
        let eventual = Eventual::new(&self.scheduler);
        let settle = eventual.clone();
        let sender = self.scheduler.register_io(move |result| {
            match result {
                Ok(value) => settle.resolve(value),
                Err(error) => settle.reject(error),
            }
            Ok(())
        });
        let url = url.into();
        let client = self.client.clone();
        self.handle.spawn(async move {
            sender.complete(perform_fetch(client, url).await);
        });
        eventual
    }

    /// Fetches `url` and decodes the body, returning an eventual that
    /// fulfills with the structured data.
    pub fn fetch_json(&self, url: impl Into<String>) -> Eventual {
        self.fetch_deferred(url)
            .map(|value| FetchResponse::from_value(value)?.json().map(Value::Json))
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fetcher {{ ... }}")
    }
}

async fn perform_fetch(client: reqwest::Client, url: String) -> Result<Value, RuntimeError> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| RuntimeError::http(format!("failed to fetch {url}: {e}")))?;
    let status = response.status().as_u16();
    let served_from = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|e| RuntimeError::http(format!("failed to read body from {url}: {e}")))?;
    Ok(FetchResponse::new(status, served_from, body).to_value())
}
