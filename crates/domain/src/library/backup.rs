//! Backup records.

use serde::{Deserialize, Serialize};

/// One backup listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Backup identifier, also used to download and delete it
    pub timestamp: String,
    /// Free-form note entered when the backup was made
    #[serde(default)]
    pub comment: String,
}

/// Body of the backup creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct CreateBackupRequest {
    /// Optional note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of the backup deletion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteBackupRequest {
    /// Backup to delete
    pub timestamp: String,
}
