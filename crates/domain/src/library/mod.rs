//! Request and response shapes of the media library backend.
//!
//! Field names follow the backend's camelCase wire format.

mod backup;
mod diary;
mod image;
mod message;
mod ocr;
mod search;
mod stats;

pub use backup::{BackupRecord, CreateBackupRequest, DeleteBackupRequest};
pub use diary::{
    DiaryItem, DiaryOverviewParams, DiaryOverviewResponse, DiaryRecentParams,
    DiaryRecentResponse, DiaryUpdate, NewDiaryEntry,
};
pub use image::{
    ImageDetail, ImageInfoUpdate, ImageProperty, ImageRef, ImageTextUpdate, ImageUploadResponse,
    KeywordChange, PropertyChange,
};
pub use message::{MessageData, MessageRef};
pub use ocr::OcrMissionItem;
pub use search::{
    CreatedId, IdRef, NewSavedSearch, SavedSearchItem, SavedSearchParams, SearchHit,
    SearchRequest, SearchResponse,
};
pub use stats::{
    ImagePredictRequest, ImagePredictResponse, OverallStatistics, RandomImage,
    SearchHintResponse, StatResponse, TypeStatistics,
};
