use serde_json::Value;
use wardrobe_domain::QueryParams;
use wardrobe_domain::library::{
    CreatedId, IdRef, ImagePredictRequest, ImagePredictResponse, NewSavedSearch, RandomImage,
    SavedSearchItem, SavedSearchParams, SearchHintResponse, SearchRequest, SearchResponse,
    StatResponse,
};

use super::LibraryApi;
use crate::error::SessionResult;
use crate::ports::{TokenStore, Transport};

impl<T: Transport, S: TokenStore> LibraryApi<T, S> {
    /// Searches images.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn search(&self, request: &SearchRequest) -> SessionResult<SearchResponse> {
        self.post("/api/search/", request).await
    }

    /// Returns the known keywords and property names.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn search_hints(&self) -> SessionResult<SearchHintResponse> {
        self.get("/api/searchhint/").await
    }

    /// Asks the server to generate usage tips.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn generate_tips(&self) -> SessionResult<Value> {
        self.get("/api/generatetips/").await
    }

    /// Picks a random image, optionally restricted to a keyword.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn random_image(&self, keyword: Option<&str>) -> SessionResult<RandomImage> {
        let params = keyword.map_or_else(QueryParams::new, |keyword| {
            QueryParams::new().with("keyword", keyword)
        });
        self.get(&params.append_to("/api/random/")).await
    }

    /// Returns library statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn statistics(&self) -> SessionResult<StatResponse> {
        self.get("/api/statistics/").await
    }

    /// Suggests keywords and properties for a description.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn predict_metadata(&self, description: &str) -> SessionResult<ImagePredictResponse> {
        self.post("/api/metadata/predict/", &ImagePredictRequest { description })
            .await
    }

    /// Lists saved searches.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn saved_searches(&self) -> SessionResult<Vec<SavedSearchItem>> {
        self.get("/api/savedsearch/list/").await
    }

    /// Loads the parameters of a saved search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn saved_search(&self, id: i64) -> SessionResult<SavedSearchParams> {
        self.post("/api/savedsearch/get/", &IdRef { id }).await
    }

    /// Saves a search under a name and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn create_saved_search(
        &self,
        name: &str,
        params: &SavedSearchParams,
    ) -> SessionResult<i64> {
        let created: CreatedId = self
            .post(
                "/api/savedsearch/create/",
                &NewSavedSearch {
                    name,
                    searchparams: params,
                },
            )
            .await?;
        Ok(created.id)
    }

    /// Deletes a saved search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_saved_search(&self, id: i64) -> SessionResult<()> {
        self.post_unit("/api/savedsearch/delete/", &IdRef { id }).await
    }
}
