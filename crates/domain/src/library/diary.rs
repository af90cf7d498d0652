//! Diary entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryItem {
    /// Entry identifier
    pub id: i64,
    /// Entry date (`YYYY-MM-DD`)
    pub date: String,
    /// Entry text
    pub text: String,
}

/// Paging parameters for the most recent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRecentParams {
    /// Page number, starting at 1
    pub page: u32,
    /// Entries per page
    pub page_size: u32,
    /// Sort column
    pub order_by: String,
    /// `asc` or `desc`
    pub order: String,
}

impl Default for DiaryRecentParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            order_by: "date".to_string(),
            order: "desc".to_string(),
        }
    }
}

/// Reply to a recent-entries search; extra fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRecentResponse {
    /// Entries on the page
    #[serde(default)]
    pub text_list: Option<Vec<DiaryItem>>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full-text search parameters for the diary overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryOverviewParams {
    /// Search text
    pub search_key: String,
    /// Lower date bound, empty for none
    pub date_from: String,
    /// Upper date bound, empty for none
    pub date_to: String,
    /// Sort column
    pub order_by: String,
    /// `asc` or `desc`
    pub order: String,
    /// Page number, starting at 1
    pub page: u32,
    /// Entries per page
    pub page_size: u32,
}

/// Reply to a diary overview search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryOverviewResponse {
    /// Number of pages
    pub total_page: u64,
    /// Number of matching entries
    pub total_items: u64,
    /// Entries on the page
    pub text_list: Vec<DiaryItem>,
}

/// A new diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDiaryEntry {
    /// Entry date
    pub date: String,
    /// Entry text
    pub text: String,
}

/// An edit of an existing diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryUpdate {
    /// Entry identifier
    pub id: i64,
    /// Entry date
    pub date: String,
    /// Entry text
    pub text: String,
}
