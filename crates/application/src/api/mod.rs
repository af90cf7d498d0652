//! Typed access to the media library backend.
//!
//! [`LibraryApi`] wraps a [`Session`] so every call gets the refresh-and-retry
//! behaviour, and decodes replies into the DTOs of `wardrobe_domain::library`.

mod backups;
mod diary;
mod images;
mod messages;
mod search;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wardrobe_domain::RequestDescriptor;

use crate::auth::Session;
use crate::error::{SessionError, SessionResult};
use crate::ports::{TokenStore, Transport};

/// Client for the library endpoints.
pub struct LibraryApi<T, S> {
    session: Arc<Session<T, S>>,
}

impl<T, S> Clone for LibraryApi<T, S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<T: Transport, S: TokenStore> LibraryApi<T, S> {
    /// Creates a client on top of a session.
    pub const fn new(session: Arc<Session<T, S>>) -> Self {
        Self { session }
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &Session<T, S> {
        &self.session
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> SessionResult<R> {
        let body = self.session.request(&RequestDescriptor::get(endpoint)).await?;
        decode(body)
    }

    async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &B,
    ) -> SessionResult<R> {
        let request = RequestDescriptor::post(endpoint, payload)?;
        let body = self.session.request(&request).await?;
        decode(body)
    }

    /// Posts and ignores whatever the server answers with.
    async fn post_unit<B: Serialize + Sync>(&self, endpoint: &str, payload: &B) -> SessionResult<()> {
        let request = RequestDescriptor::post(endpoint, payload)?;
        self.session.request(&request).await?;
        Ok(())
    }

    /// Posts an empty JSON object.
    async fn post_empty(&self, endpoint: &str) -> SessionResult<Value> {
        self.session
            .request(&RequestDescriptor::post_json(endpoint, json!({})))
            .await
    }
}

fn decode<R: DeserializeOwned>(body: Value) -> SessionResult<R> {
    serde_json::from_value(body).map_err(|e| SessionError::Decode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::testing::ScriptedTransport;
    use wardrobe_domain::{ResponseOutcome, TokenPair};

    pub(super) fn api(
        transport: ScriptedTransport,
    ) -> (
        LibraryApi<ScriptedTransport, MemoryTokenStore>,
        Arc<ScriptedTransport>,
    ) {
        let transport = Arc::new(transport);
        let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new("A1", "R1")));
        let session = Session::new(Arc::clone(&transport), store);
        (LibraryApi::new(Arc::new(session)), transport)
    }

    /// Answers every send with `reply`.
    pub(super) fn replying(reply: Value) -> ScriptedTransport {
        ScriptedTransport::new().on_send(move |_, _| Ok(ResponseOutcome::Ok(reply.clone())))
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_decode_error() {
        let (api, _) = api(replying(json!({"unexpected": true})));

        let result: SessionResult<Vec<String>> = api.get("/api/keyword/list/").await;

        assert!(matches!(result, Err(SessionError::Decode(_))));
    }

    #[tokio::test]
    async fn test_post_empty_sends_empty_object() {
        let (api, transport) = api(replying(Value::Null));

        api.post_empty("/api/ocrmission/clean/").await.unwrap();

        assert_eq!(transport.calls()[0].body, Some(json!({})));
    }
}
