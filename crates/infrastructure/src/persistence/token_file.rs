//! File-backed token store.
//!
//! Tokens are kept in a small JSON file, by default in the platform config
//! directory:
//! ```json
//! {
//!   "schema_version": 1,
//!   "entries": {
//!     "wardrobe-access-token": "eyJhbGciOi...",
//!     "wardrobe-refresh-token": "eyJhbGciOi..."
//!   },
//!   "updated_at": "2024-01-01T00:00:00Z"
//! }
//! ```
//! Every write goes to an owner-only temporary file first and is then
//! renamed over the real one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use wardrobe_application::ports::{Clock, FileSystem, FileSystemError, TokenStore, TokenStoreError};
use wardrobe_domain::TokenPair;
use wardrobe_domain::auth::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    schema_version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

fn to_io_error(e: FileSystemError) -> std::io::Error {
    match e {
        FileSystemError::Io(io_err) => io_err,
        FileSystemError::NotFound(path) => {
            std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())
        }
        FileSystemError::PermissionDenied(path) => std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            path.display().to_string(),
        ),
    }
}

/// Token store persisted to a JSON file.
#[derive(Debug)]
pub struct FileTokenStore<F, C> {
    fs: F,
    clock: C,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl<F: FileSystem, C: Clock> FileTokenStore<F, C> {
    /// Creates a store backed by the file at `path`.
    pub fn new(fs: F, clock: C, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            clock,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the token file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn load(&self) -> Result<TokenFile, TokenStoreError> {
        if !self.fs.exists(&self.path).await {
            return Ok(TokenFile::default());
        }

        let content = self.fs.read_file(&self.path).await.map_err(to_io_error)?;
        from_json_bytes(&content).map_err(|e| TokenStoreError::Serialization(e.to_string()))
    }

    async fn save(&self, mut file: TokenFile) -> Result<(), TokenStoreError> {
        file.schema_version = SCHEMA_VERSION;
        file.updated_at = Some(self.clock.now());

        let content =
            to_json_stable_bytes(&file).map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        let temp = self.temp_path();

        self.fs
            .write_private_file(&temp, &content)
            .await
            .map_err(to_io_error)?;
        self.fs
            .rename(&temp, &self.path)
            .await
            .map_err(to_io_error)?;

        debug!(path = %self.path.display(), "Token file written");
        Ok(())
    }

    async fn entry(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        Ok(self.load().await?.entries.remove(key))
    }

    async fn update(&self, entries: &[(&str, &str)]) -> Result<(), TokenStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load().await?;
        for (key, value) in entries {
            file.entries.insert((*key).to_string(), (*value).to_string());
        }
        self.save(file).await
    }
}

#[async_trait]
impl<F: FileSystem, C: Clock> TokenStore for FileTokenStore<F, C> {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        self.entry(ACCESS_TOKEN_KEY).await
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        self.entry(REFRESH_TOKEN_KEY).await
    }

    async fn set_tokens(&self, pair: &TokenPair) -> Result<(), TokenStoreError> {
        self.update(&[
            (ACCESS_TOKEN_KEY, pair.access.as_str()),
            (REFRESH_TOKEN_KEY, pair.refresh.as_str()),
        ])
        .await
    }

    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.update(&[(ACCESS_TOKEN_KEY, token)]).await
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        let _guard = self.write_lock.lock().await;
        if self.fs.exists(&self.path).await {
            self.fs
                .remove_file(&self.path)
                .await
                .map_err(to_io_error)?;
            debug!(path = %self.path.display(), "Token file removed");
        }
        Ok(())
    }

    async fn tokens(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        let mut file = self.load().await?;
        let access = file.entries.remove(ACCESS_TOKEN_KEY);
        let refresh = file.entries.remove(REFRESH_TOKEN_KEY);
        Ok(access.zip(refresh).map(|(access, refresh)| TokenPair { access, refresh }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::TokioFileSystem;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        }
    }

    fn store(path: &Path) -> FileTokenStore<TokioFileSystem, FixedClock> {
        FileTokenStore::new(TokioFileSystem::new(), FixedClock, path)
    }

    #[tokio::test]
    async fn test_missing_file_means_no_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir.path().join("tokens.json"));

        assert_eq!(store.access_token().await.unwrap(), None);
        assert!(store.tokens().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tokens_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe").join("tokens.json");
        store(&path)
            .set_tokens(&TokenPair::new("A1", "R1"))
            .await
            .unwrap();

        let reopened = store(&path);

        assert_eq!(
            reopened.tokens().await.unwrap(),
            Some(TokenPair::new("A1", "R1"))
        );
    }

    #[tokio::test]
    async fn test_file_uses_well_known_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        store(&path)
            .set_tokens(&TokenPair::new("A1", "R1"))
            .await
            .unwrap();

        let written: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();

        assert_eq!(written["schema_version"], 1);
        assert_eq!(written["entries"]["wardrobe-access-token"], "A1");
        assert_eq!(written["entries"]["wardrobe-refresh-token"], "R1");
        assert_eq!(written["updated_at"], "2024-01-01T00:00:00Z");
        assert!(!dir.path().join("tokens.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_access_token_keeps_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir.path().join("tokens.json"));
        store.set_tokens(&TokenPair::new("A1", "R1")).await.unwrap();

        store.set_access_token("A2").await.unwrap();

        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("A2"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("R1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = store(&path);
        store.set_tokens(&TokenPair::new("A1", "R1")).await.unwrap();
        store.set_access_token("A2").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = store(&path);
        store.set_tokens(&TokenPair::new("A1", "R1")).await.unwrap();

        store.clear().await.unwrap();

        assert!(!path.exists());
        assert_eq!(store.refresh_token().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = store(&path).access_token().await;

        assert!(matches!(result, Err(TokenStoreError::Serialization(_))));
    }
}
