//! OCR missions.

use serde::{Deserialize, Serialize};

/// An OCR job queued for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrMissionItem {
    /// Image identifier
    pub src: String,
    /// Job state as reported by the server
    pub status: String,
}
