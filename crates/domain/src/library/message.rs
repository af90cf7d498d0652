//! Notification messages.

use serde::{Deserialize, Serialize};

/// A server notification, listed or pushed over the live feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    /// Message identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Message category
    #[serde(rename = "type")]
    pub kind: String,
    /// Message text
    pub text: String,
    /// Severity
    pub level: String,
    /// Creation time as sent by the server
    pub timestamp: String,
    /// Read state
    pub status: String,
    /// Optional link to the related item
    #[serde(default)]
    pub link: Option<String>,
}

/// Body of the mark-read call; no id marks everything read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct MessageRef {
    /// Message to mark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}
