//! Image metadata.

use serde::{Deserialize, Serialize};

/// A name/value property attached to an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageProperty {
    /// Property name
    pub name: String,
    /// Property value
    pub value: String,
}

impl ImageProperty {
    /// Creates a property.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Full detail of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetail {
    /// Image identifier (file name on the server)
    pub src: String,
    /// Title
    pub title: String,
    /// Date associated with the image
    pub date: String,
    /// OCR or user text
    #[serde(default)]
    pub text: String,
    /// Keywords
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Properties; the backend spells this field `propertys`
    #[serde(default, rename = "propertys", skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<ImageProperty>>,
}

/// Body naming a single image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Image identifier
    pub src: String,
}

impl ImageRef {
    /// Creates a reference to `src`.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

/// Title/date edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfoUpdate {
    /// Image identifier
    pub src: String,
    /// New title
    pub title: String,
    /// New date
    pub date: String,
}

/// Text edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageTextUpdate {
    /// Image identifier
    pub src: String,
    /// New text
    pub text: String,
}

/// Keyword added to or removed from an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordChange {
    /// Image identifier
    pub src: String,
    /// Keyword
    pub keyword: String,
}

/// Property added to or removed from an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyChange {
    /// Image identifier
    pub src: String,
    /// Property name
    pub name: String,
    /// Property value
    pub value: String,
}

/// Reply to an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    /// Content hash of the stored file
    pub md5: String,
    /// Server note, e.g. for duplicates
    #[serde(default)]
    pub message: Option<String>,
}
