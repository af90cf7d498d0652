//! Image search and saved searches.

use serde::{Deserialize, Serialize};

use super::ImageProperty;

/// Image search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free text
    pub search_key: String,
    /// Page number, starting at 1
    pub page: u32,
    /// Lower date bound, empty for none
    pub date_from: String,
    /// Upper date bound, empty for none
    pub date_to: String,
    /// Match against titles
    pub by_name: bool,
    /// Match against OCR text
    pub by_full_text: bool,
    /// Sort column
    pub order_by: String,
    /// `asc` or `desc`
    pub order: String,
    /// Results per page
    pub page_size: u32,
    /// Required keywords
    pub keywords: Vec<String>,
    /// Required properties
    pub properties: Vec<ImageProperty>,
    /// Keywords that must not match
    pub excluded_keywords: Vec<String>,
    /// Properties that must not match
    pub excluded_properties: Vec<ImageProperty>,
    /// Exact property matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_precise: Option<bool>,
}

impl SearchRequest {
    /// Creates a first-page title and text search for `search_key`.
    #[must_use]
    pub fn text(search_key: impl Into<String>) -> Self {
        Self {
            search_key: search_key.into(),
            page: 1,
            date_from: String::new(),
            date_to: String::new(),
            by_name: true,
            by_full_text: true,
            order_by: "date".to_string(),
            order: "desc".to_string(),
            page_size: 20,
            keywords: Vec::new(),
            properties: Vec::new(),
            excluded_keywords: Vec::new(),
            excluded_properties: Vec::new(),
            properties_precise: None,
        }
    }
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Image identifier
    pub src: String,
    /// Title
    pub title: String,
    /// Date
    pub date: String,
}

/// Reply to a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of pages
    pub total_page: u64,
    /// Number of hits
    pub total: u64,
    /// Hits on this page
    pub href_list: Vec<SearchHit>,
}

/// Search form state as stored by the saved-search endpoints.
///
/// This uses the form's own field names, which differ from [`SearchRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearchParams {
    /// Free text
    pub searchword: String,
    /// Lower date bound
    pub date_from: String,
    /// Upper date bound
    pub date_to: String,
    /// Match against titles
    pub search_by_title: bool,
    /// Match against OCR text
    pub search_by_content: bool,
    /// Sort column
    pub sort_by: String,
    /// `asc` or `desc`
    pub sort_order: String,
    /// Page number
    pub page: u32,
    /// Required keywords
    pub keywords: Vec<String>,
    /// Required properties
    pub properties: Vec<ImageProperty>,
    /// Keywords that must not match
    pub excluded_keywords: Vec<String>,
    /// Properties that must not match
    pub excluded_properties: Vec<ImageProperty>,
    /// Exact property matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_precise: Option<bool>,
}

/// One saved search in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchItem {
    /// Display name
    pub name: String,
    /// Identifier
    pub id: i64,
}

/// Body of the saved-search creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSavedSearch<'a> {
    /// Display name
    pub name: &'a str,
    /// Stored form state
    pub searchparams: &'a SavedSearchParams,
}

/// Body naming an item by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdRef {
    /// Identifier
    pub id: i64,
}

/// Reply carrying the id of a created item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    /// Identifier
    pub id: i64,
}
