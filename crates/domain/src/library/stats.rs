//! Library statistics, hints and metadata prediction.

use serde::{Deserialize, Serialize};

use super::ImageProperty;

/// Counters for the whole library or one image type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStatistics {
    /// All images
    pub total_amount: u64,
    /// Images added in the last year
    pub last_year_amount: u64,
    /// Images added in the last month
    pub last_month_amount: u64,
}

/// Counters for one image type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStatistics {
    /// Image type
    #[serde(rename = "type")]
    pub kind: String,
    /// All images of this type
    pub total_amount: u64,
    /// Added in the last year
    pub last_year_amount: u64,
    /// Added in the last month
    pub last_month_amount: u64,
}

/// Reply of the statistics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatResponse {
    /// Library-wide counters
    pub overall: OverallStatistics,
    /// Per-type counters
    pub types: Vec<TypeStatistics>,
}

/// Known keywords and property names, for autocompletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchHintResponse {
    /// Known keywords
    pub keywords: Vec<String>,
    /// Known property names
    pub properties: Vec<String>,
}

/// A randomly picked image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomImage {
    /// Image identifier
    pub src: String,
    /// Title
    pub title: String,
}

/// Body of the metadata prediction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePredictRequest<'a> {
    /// Free-text description of the image
    pub description: &'a str,
}

/// Keywords and properties suggested for a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImagePredictResponse {
    /// Suggested keywords
    pub keywords: Vec<String>,
    /// Suggested properties
    pub properties: Vec<ImageProperty>,
}
