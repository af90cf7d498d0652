//! HTTP Request body types

use serde_json::Value;

/// A single field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    /// Plain text field.
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File upload field.
    File {
        /// Field name
        name: String,
        /// File name reported to the server
        file_name: String,
        /// Raw file contents
        bytes: Vec<u8>,
        /// Explicit content type; guessed from the file name when absent
        content_type: Option<String>,
    },
}

impl MultipartPart {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Multipart form contents.
///
/// Kept as plain data so the same form can be encoded again when a request
/// is retried after a token refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
            content_type: None,
        });
        self
    }

    /// Adds a file field with an explicit content type.
    #[must_use]
    pub fn file_with_type(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
            content_type: Some(content_type.into()),
        });
        self
    }

    /// Returns the form fields in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// Returns whether the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document, sent with `Content-Type: application/json`
    Json(Value),
    /// Multipart form; the boundary header is produced by the HTTP stack
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns whether the body is sent as JSON.
    #[must_use]
    pub const fn encode_as_json(&self) -> bool {
        !matches!(self, Self::Multipart(_))
    }

    /// Returns whether there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Json(_) => false,
            Self::Multipart(form) => form.is_empty(),
        }
    }

    /// Returns the JSON payload, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}
