//! Handle over an open server-push connection.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use wardrobe_domain::{ServerEvent, token_preview};

use crate::ports::{EventStream, TransportError};

/// Live event stream opened by a session.
///
/// The token embedded at connect time is never renewed in place; once the
/// server closes the connection the stream ends and the caller reopens it.
pub struct StreamHandle {
    inner: EventStream,
    endpoint: String,
    token_preview: String,
}

impl StreamHandle {
    pub(crate) fn new(inner: EventStream, endpoint: &str, token: &str) -> Self {
        Self {
            inner,
            endpoint: endpoint.to_string(),
            token_preview: token_preview(token),
        }
    }

    /// Endpoint the stream was opened against, without credentials.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Stream for StreamHandle {
    type Item = Result<ServerEvent, TransportError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token_preview)
            .finish_non_exhaustive()
    }
}
