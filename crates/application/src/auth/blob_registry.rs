//! Registry of fetched binary resources.
//!
//! Bytes fetched for display are kept here under an [`ObjectUrl`] until the
//! caller revokes it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use wardrobe_domain::{BlobData, ObjectUrl};

/// Thread-safe map of object URLs to blob payloads.
#[derive(Debug, Clone, Default)]
pub struct BlobRegistry {
    blobs: Arc<RwLock<HashMap<ObjectUrl, Arc<BlobData>>>>,
}

impl BlobRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a blob and returns its fresh object URL.
    pub async fn register(&self, blob: BlobData) -> ObjectUrl {
        let url = ObjectUrl::generate();
        self.blobs.write().await.insert(url.clone(), Arc::new(blob));
        url
    }

    /// Looks up a registered blob.
    pub async fn get(&self, url: &ObjectUrl) -> Option<Arc<BlobData>> {
        self.blobs.read().await.get(url).cloned()
    }

    /// Releases a blob. Returns false if the URL was not registered.
    pub async fn revoke(&self, url: &ObjectUrl) -> bool {
        self.blobs.write().await.remove(url).is_some()
    }

    /// Number of registered blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Returns true if nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    /// Releases every blob.
    pub async fn clear(&self) {
        self.blobs.write().await.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn png() -> BlobData {
        BlobData::new(vec![0x89, b'P', b'N', b'G'], Some("image/png".to_string()))
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = BlobRegistry::new();
        let url = registry.register(png()).await;

        let blob = registry.get(&url).await.unwrap();
        assert_eq!(blob.len(), 4);
        assert_eq!(blob.content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_revoke() {
        let registry = BlobRegistry::new();
        let url = registry.register(png()).await;

        assert!(registry.revoke(&url).await);
        assert!(registry.get(&url).await.is_none());
        assert!(!registry.revoke(&url).await);
    }

    #[tokio::test]
    async fn test_clear() {
        let registry = BlobRegistry::new();
        registry.register(png()).await;
        registry.register(png()).await;
        assert_eq!(registry.len().await, 2);

        registry.clear().await;
        assert!(registry.is_empty().await);
    }
}
