use futures::{Stream, StreamExt};
use tracing::warn;
use wardrobe_domain::library::{MessageData, MessageRef};

use super::{LibraryApi, decode};
use crate::error::{SessionError, SessionResult};
use crate::ports::{TokenStore, Transport};

impl<T: Transport, S: TokenStore> LibraryApi<T, S> {
    /// Lists notification messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn messages(&self) -> SessionResult<Vec<MessageData>> {
        let body = self.post_empty("/api/message/list/").await?;
        decode(body)
    }

    /// Marks one message read, or all of them when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_message_read(&self, id: Option<i64>) -> SessionResult<()> {
        self.post_unit("/api/message/read/", &MessageRef { id }).await
    }

    /// Deletes every read message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_read_messages(&self) -> SessionResult<()> {
        self.post_empty("/api/message/clear_read/").await?;
        Ok(())
    }

    /// Follows the live message feed.
    ///
    /// Events whose payload is not a message are reported as
    /// [`SessionError::Decode`] without ending the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be opened.
    pub async fn message_stream(
        &self,
    ) -> SessionResult<impl Stream<Item = SessionResult<MessageData>> + Send + Unpin> {
        let stream = self.session.open_message_stream().await?;
        Ok(stream.map(|event| -> SessionResult<MessageData> {
            let event = event?;
            event.json::<MessageData>().map_err(|e| {
                warn!(event = event.event_type(), error = %e, "Unreadable message event");
                SessionError::Decode(e.to_string())
            })
        }))
    }
}
