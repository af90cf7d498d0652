//! Scripted transport used by unit tests.

#![allow(clippy::unwrap_used, clippy::panic, clippy::new_without_default)]

use std::sync::Mutex;

use futures::StreamExt;
use serde_json::Value;
use wardrobe_domain::{BlobData, RequestDescriptor, ResponseOutcome, ServerEvent};

use crate::ports::{EventStream, Transport, TransportError};

type SendHandler = Box<
    dyn Fn(&RequestDescriptor, Option<&str>) -> Result<ResponseOutcome<Value>, TransportError>
        + Send
        + Sync,
>;
type FetchHandler =
    Box<dyn Fn(&str, &str) -> Result<ResponseOutcome<BlobData>, TransportError> + Send + Sync>;
type StreamHandler = Box<
    dyn Fn(&str) -> Result<ResponseOutcome<Vec<ServerEvent>>, TransportError> + Send + Sync,
>;

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub target: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Transport whose replies are computed by closures.
pub struct ScriptedTransport {
    on_send: SendHandler,
    on_fetch: FetchHandler,
    on_stream: StreamHandler,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            on_send: Box::new(|request, _| {
                panic!("unexpected send to {}", request.endpoint)
            }),
            on_fetch: Box::new(|url, _| panic!("unexpected fetch of {url}")),
            on_stream: Box::new(|url| panic!("unexpected stream to {url}")),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_send(
        mut self,
        handler: impl Fn(&RequestDescriptor, Option<&str>) -> Result<ResponseOutcome<Value>, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_send = Box::new(handler);
        self
    }

    pub fn on_fetch(
        mut self,
        handler: impl Fn(&str, &str) -> Result<ResponseOutcome<BlobData>, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_fetch = Box::new(handler);
        self
    }

    pub fn on_stream(
        mut self,
        handler: impl Fn(&str) -> Result<ResponseOutcome<Vec<ServerEvent>>, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.on_stream = Box::new(handler);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose target starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.target.starts_with(prefix))
            .count()
    }

    fn record(&self, target: &str, bearer: Option<&str>, body: Option<Value>) {
        self.calls.lock().unwrap().push(Call {
            target: target.to_string(),
            bearer: bearer.map(str::to_string),
            body,
        });
    }
}

impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
        bearer: Option<&str>,
    ) -> Result<ResponseOutcome<Value>, TransportError> {
        self.record(&request.endpoint, bearer, request.body.as_json().cloned());
        tokio::task::yield_now().await;
        (self.on_send)(request, bearer)
    }

    async fn fetch_bytes(
        &self,
        url: &str,
        bearer: &str,
    ) -> Result<ResponseOutcome<BlobData>, TransportError> {
        self.record(url, Some(bearer), None);
        tokio::task::yield_now().await;
        (self.on_fetch)(url, bearer)
    }

    async fn connect_stream(
        &self,
        url: &str,
    ) -> Result<ResponseOutcome<EventStream>, TransportError> {
        self.record(url, None, None);
        tokio::task::yield_now().await;
        (self.on_stream)(url).map(|outcome| {
            outcome.map(|events| futures::stream::iter(events.into_iter().map(Ok)).boxed())
        })
    }
}
