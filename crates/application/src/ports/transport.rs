//! Authenticated transport port

use std::future::Future;
use std::pin::Pin;

use futures::Stream;
use serde_json::Value;
use wardrobe_domain::{BlobData, RequestDescriptor, ResponseOutcome, ServerEvent};

/// Stream of events from an open server-push connection.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ServerEvent, TransportError>> + Send>>;

/// Transport-level failures.
///
/// Expected HTTP outcomes (401, other 4xx/5xx) are never errors; they are
/// reported through [`ResponseOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The endpoint could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Redirect limit reached.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The request body could not be encoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A successful response carried a body that could not be decoded.
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

/// Port for performing exactly one HTTP exchange.
///
/// Implementations attach the bearer token when given one, classify the
/// response and never touch the token store or retry.
pub trait Transport: Send + Sync {
    /// Sends a request and decodes a JSON reply.
    ///
    /// An empty success body decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns an error on connectivity failures or a malformed success body.
    fn send(
        &self,
        request: &RequestDescriptor,
        bearer: Option<&str>,
    ) -> impl Future<Output = Result<ResponseOutcome<Value>, TransportError>> + Send;

    /// Fetches a binary resource with a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error on connectivity failures.
    fn fetch_bytes(
        &self,
        url: &str,
        bearer: &str,
    ) -> impl Future<Output = Result<ResponseOutcome<BlobData>, TransportError>> + Send;

    /// Opens a server-sent event stream.
    ///
    /// Credentials travel in the URL; no `Authorization` header is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    fn connect_stream(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ResponseOutcome<EventStream>, TransportError>> + Send;
}
