use wardrobe_domain::library::{
    DiaryOverviewParams, DiaryOverviewResponse, DiaryRecentParams, DiaryRecentResponse,
    DiaryUpdate, IdRef, NewDiaryEntry,
};

use super::LibraryApi;
use crate::error::SessionResult;
use crate::ports::{TokenStore, Transport};

const DIARY_SEARCH: &str = "/api/diary/search/";

impl<T: Transport, S: TokenStore> LibraryApi<T, S> {
    /// Returns a page of the most recent diary entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn recent_diary(&self, params: &DiaryRecentParams) -> SessionResult<DiaryRecentResponse> {
        self.post(DIARY_SEARCH, params).await
    }

    /// Searches diary entries by text and date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn search_diary(
        &self,
        params: &DiaryOverviewParams,
    ) -> SessionResult<DiaryOverviewResponse> {
        self.post(DIARY_SEARCH, params).await
    }

    /// Adds a diary entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_diary(&self, entry: &NewDiaryEntry) -> SessionResult<()> {
        self.post_unit("/api/diary/new/", entry).await
    }

    /// Rewrites an existing diary entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_diary(&self, update: &DiaryUpdate) -> SessionResult<()> {
        self.post_unit("/api/diary/edit/", update).await
    }

    /// Deletes a diary entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_diary(&self, id: i64) -> SessionResult<()> {
        self.post_unit("/api/diary/delete/", &IdRef { id }).await
    }
}
