use wardrobe_domain::library::{
    ImageDetail, ImageInfoUpdate, ImageProperty, ImageRef, ImageTextUpdate, ImageUploadResponse,
    KeywordChange, OcrMissionItem, PropertyChange,
};
use wardrobe_domain::{MultipartForm, RequestDescriptor};

use super::{LibraryApi, decode};
use crate::error::SessionResult;
use crate::ports::{TokenStore, Transport};

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

impl<T: Transport, S: TokenStore> LibraryApi<T, S> {
    /// Returns the metadata of one image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn image_detail(&self, src: &str) -> SessionResult<ImageDetail> {
        self.post("/api/image/get/", &ImageRef::new(src)).await
    }

    /// Updates title and date of an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn set_image_info(&self, update: &ImageInfoUpdate) -> SessionResult<()> {
        self.post_unit("/api/image/set/", update).await
    }

    /// Updates the free text of an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn set_image_text(&self, src: &str, text: &str) -> SessionResult<()> {
        let update = ImageTextUpdate {
            src: src.to_string(),
            text: text.to_string(),
        };
        self.post_unit("/api/text/set/", &update).await
    }

    /// Deletes an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_image(&self, src: &str) -> SessionResult<()> {
        self.post_unit("/api/image/delete/", &ImageRef::new(src)).await
    }

    /// Uploads a prepared multipart form.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn upload_image_form(&self, form: MultipartForm) -> SessionResult<ImageUploadResponse> {
        let request = RequestDescriptor::post_multipart("/api/image/new/", form);
        let body = self.session.request(&request).await?;
        decode(body)
    }

    /// Uploads one image file.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> SessionResult<ImageUploadResponse> {
        self.upload_image_form(MultipartForm::new().file(UPLOAD_FIELD, file_name, bytes))
            .await
    }

    /// Lists images still waiting for metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn list_unprocessed_images(&self) -> SessionResult<Vec<String>> {
        let body = self.post_empty("/api/image/listblanks/").await?;
        decode(body)
    }

    /// Queues an image for reprocessing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reprocess_image(&self, src: &str) -> SessionResult<()> {
        self.post_unit("/api/image/reprocess/", &ImageRef::new(src)).await
    }

    /// Lists the keywords of an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn keywords(&self, src: &str) -> SessionResult<Vec<String>> {
        self.post("/api/keyword/list/", &ImageRef::new(src)).await
    }

    /// Adds a keyword to an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_keyword(&self, src: &str, keyword: &str) -> SessionResult<()> {
        self.post_unit("/api/keyword/create/", &keyword_change(src, keyword))
            .await
    }

    /// Removes a keyword from an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_keyword(&self, src: &str, keyword: &str) -> SessionResult<()> {
        self.post_unit("/api/keyword/delete/", &keyword_change(src, keyword))
            .await
    }

    /// Lists the properties of an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn properties(&self, src: &str) -> SessionResult<Vec<ImageProperty>> {
        self.post("/api/property/list/", &ImageRef::new(src)).await
    }

    /// Adds a property to an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_property(&self, src: &str, property: &ImageProperty) -> SessionResult<()> {
        self.post_unit("/api/property/create/", &property_change(src, property))
            .await
    }

    /// Removes a property from an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_property(&self, src: &str, property: &ImageProperty) -> SessionResult<()> {
        self.post_unit("/api/property/delete/", &property_change(src, property))
            .await
    }

    /// Lists OCR missions and their status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub async fn ocr_missions(&self) -> SessionResult<Vec<OcrMissionItem>> {
        self.get("/api/ocrmission/get/").await
    }

    /// Queues OCR for an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn new_ocr_mission(&self, src: &str) -> SessionResult<()> {
        self.post_unit("/api/ocrmission/new/", &ImageRef::new(src)).await
    }

    /// Removes finished OCR missions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clean_ocr_missions(&self) -> SessionResult<()> {
        self.post_empty("/api/ocrmission/clean/").await?;
        Ok(())
    }

    /// Puts an OCR mission back into the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reset_ocr_mission(&self, src: &str) -> SessionResult<()> {
        self.post_unit("/api/ocrmission/reset/", &ImageRef::new(src)).await
    }

    /// Runs OCR for one image now.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn execute_ocr_mission(&self, src: &str) -> SessionResult<()> {
        self.post_unit("/api/ocrmission/execute/", &ImageRef::new(src))
            .await
    }

    /// Runs every queued OCR mission.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn execute_all_ocr_missions(&self) -> SessionResult<()> {
        self.post_empty("/api/ocrmission/executeall/").await?;
        Ok(())
    }
}

fn keyword_change(src: &str, keyword: &str) -> KeywordChange {
    KeywordChange {
        src: src.to_string(),
        keyword: keyword.to_string(),
    }
}

fn property_change(src: &str, property: &ImageProperty) -> PropertyChange {
    PropertyChange {
        src: src.to_string(),
        name: property.name.clone(),
        value: property.value.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::super::tests::{api, replying};
    use super::*;
    use crate::testing::ScriptedTransport;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use wardrobe_domain::{MultipartPart, RequestBody, ResponseOutcome};

    #[tokio::test]
    async fn test_image_detail_reads_property_list() {
        let (api, transport) = api(replying(json!({
            "src": "abc.jpg",
            "title": "Coat",
            "date": "2024-01-01",
            "keywords": ["winter"],
            "propertys": [{"name": "color", "value": "red"}]
        })));

        let detail = api.image_detail("abc.jpg").await.unwrap();

        assert_eq!(detail.text, "");
        assert_eq!(
            detail.properties,
            Some(vec![ImageProperty::new("color", "red")])
        );
        assert_eq!(transport.calls()[0].body, Some(json!({"src": "abc.jpg"})));
    }

    #[tokio::test]
    async fn test_add_property_body() {
        let (api, transport) = api(replying(Value::Null));

        api.add_property("abc.jpg", &ImageProperty::new("color", "red"))
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.target, "/api/property/create/");
        assert_eq!(
            call.body,
            Some(json!({"src": "abc.jpg", "name": "color", "value": "red"}))
        );
    }

    #[tokio::test]
    async fn test_upload_image_sends_multipart() {
        let transport = ScriptedTransport::new().on_send(|request, _| {
            match &request.body {
                RequestBody::Multipart(form) => match &form.parts()[0] {
                    MultipartPart::File {
                        name, file_name, ..
                    } => {
                        assert_eq!(name, UPLOAD_FIELD);
                        assert_eq!(file_name, "coat.jpg");
                    }
                    MultipartPart::Text { .. } => panic!("expected a file part"),
                },
                other => panic!("expected multipart, got {other:?}"),
            }
            Ok(ResponseOutcome::Ok(json!({"md5": "d41d8cd9"})))
        });
        let (api, _) = api(transport);

        let response = api.upload_image("coat.jpg", vec![1, 2, 3]).await.unwrap();

        assert_eq!(response.md5, "d41d8cd9");
        assert_eq!(response.message, None);
    }

    #[tokio::test]
    async fn test_ocr_missions() {
        let (api, _) = api(replying(json!([{"src": "a.jpg", "status": "pending"}])));

        let missions = api.ocr_missions().await.unwrap();

        assert_eq!(missions[0].status, "pending");
    }
}
