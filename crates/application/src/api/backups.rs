use wardrobe_domain::QueryParams;
use wardrobe_domain::library::{BackupRecord, CreateBackupRequest, DeleteBackupRequest};

use super::LibraryApi;
use crate::error::SessionResult;
use crate::ports::{TokenStore, Transport};

impl<T: Transport, S: TokenStore> LibraryApi<T, S> {
    /// Lists the server-side backups.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn list_backups(&self) -> SessionResult<Vec<BackupRecord>> {
        self.get("/api/backup/list/").await
    }

    /// Creates a backup with an optional comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_backup(&self, comment: Option<&str>) -> SessionResult<()> {
        let request = CreateBackupRequest {
            comment: comment.map(str::to_string),
        };
        self.post_unit("/api/backup/create/", &request).await
    }

    /// Deletes the backup taken at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_backup(&self, timestamp: &str) -> SessionResult<()> {
        let request = DeleteBackupRequest {
            timestamp: timestamp.to_string(),
        };
        self.post_unit("/api/backup/delete/", &request).await
    }

    /// Returns a download link for a backup, authenticated through the URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::NotAuthenticated`] when no token is stored.
    pub async fn backup_download_url(&self, timestamp: &str) -> SessionResult<String> {
        let endpoint = QueryParams::new()
            .with("timestamp", timestamp)
            .append_to("/api/backup/download/");
        self.session.tokenized_url(&endpoint).await
    }
}
