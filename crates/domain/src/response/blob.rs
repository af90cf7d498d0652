//! Binary payloads and the handles that reference them.

use std::fmt;

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

const OBJECT_URL_SCHEME: &str = "blob:";

/// Raw bytes of a successful binary response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobData {
    /// Response body
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the server
    pub content_type: Option<String>,
}

impl BlobData {
    /// Creates a blob from bytes and an optional content type.
    #[must_use]
    pub const fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Locally revocable reference to a registered blob (`blob:<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Allocates a fresh object URL.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{OBJECT_URL_SCHEME}{}", Uuid::now_v7()))
    }

    /// Parses an existing object URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a `blob:` URL.
    pub fn parse(value: &str) -> DomainResult<Self> {
        value
            .strip_prefix(OBJECT_URL_SCHEME)
            .filter(|rest| Uuid::parse_str(rest).is_ok())
            .map(|_| Self(value.to_string()))
            .ok_or_else(|| DomainError::InvalidObjectUrl(value.to_string()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an image element should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Bytes fetched and registered; release with a revoke when no longer shown.
    Object(ObjectUrl),
    /// Loading failed; show the well-known placeholder instead.
    Fallback(String),
}

impl ImageSource {
    /// Returns the reference to hand to a renderer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Object(url) => url.as_str(),
            Self::Fallback(path) => path,
        }
    }

    /// Returns true if the placeholder is being shown.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Returns the object URL, if one was registered.
    #[must_use]
    pub const fn object_url(&self) -> Option<&ObjectUrl> {
        match self {
            Self::Object(url) => Some(url),
            Self::Fallback(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_object_url_format() {
        let url = ObjectUrl::generate();
        assert!(url.as_str().starts_with("blob:"));
        // blob: + 36 char uuid
        assert_eq!(url.as_str().len(), 41);
    }

    #[test]
    fn test_generate_object_url_uniqueness() {
        assert_ne!(ObjectUrl::generate(), ObjectUrl::generate());
    }

    #[test]
    fn test_parse_round_trips_generated_url() {
        let url = ObjectUrl::generate();
        assert_eq!(ObjectUrl::parse(url.as_str()).unwrap(), url);
    }

    #[test]
    fn test_parse_rejects_other_urls() {
        assert!(ObjectUrl::parse("/default-image.jpg").is_err());
        assert!(ObjectUrl::parse("blob:not-a-uuid").is_err());
    }

    #[test]
    fn test_image_source_accessors() {
        let fallback = ImageSource::Fallback("/default-image.jpg".to_string());
        assert!(fallback.is_fallback());
        assert_eq!(fallback.as_str(), "/default-image.jpg");
        assert!(fallback.object_url().is_none());

        let url = ObjectUrl::generate();
        let object = ImageSource::Object(url.clone());
        assert!(!object.is_fallback());
        assert_eq!(object.object_url(), Some(&url));
    }
}
