//! Server-push event types.

use serde::de::DeserializeOwned;

/// Event type used when the server does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// One event received from a server-sent event stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerEvent {
    /// Last event ID (`id:` field).
    pub id: Option<String>,
    /// Event type (`event:` field).
    pub event: Option<String>,
    /// Payload; multiple `data:` lines are joined with `\n`.
    pub data: String,
    /// Reconnection delay hint in milliseconds (`retry:` field).
    pub retry_ms: Option<u64>,
}

impl ServerEvent {
    /// Creates an unnamed event carrying `data`.
    #[must_use]
    pub fn message(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Returns the event type, defaulting to `message`.
    #[must_use]
    pub fn event_type(&self) -> &str {
        self.event.as_deref().unwrap_or(DEFAULT_EVENT_TYPE)
    }

    /// Decodes the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_default_event_type() {
        assert_eq!(ServerEvent::message("x").event_type(), "message");

        let named = ServerEvent {
            event: Some("ping".to_string()),
            ..ServerEvent::default()
        };
        assert_eq!(named.event_type(), "ping");
    }

    #[test]
    fn test_json_payload() {
        let event = ServerEvent::message(r#"{"text":"done"}"#);
        let value: Value = event.json().unwrap();
        assert_eq!(value["text"], "done");
    }

    #[test]
    fn test_invalid_json_payload() {
        assert!(ServerEvent::message("not json").json::<Value>().is_err());
    }
}
