//! Request descriptor type

use serde::Serialize;
use serde_json::Value;

use super::{HttpMethod, MultipartForm, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Describes one logical call against the backend.
///
/// The endpoint is either a path relative to the configured base URL
/// (`/api/search/`) or an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Target endpoint
    pub endpoint: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request body; ignored for GET
    pub body: RequestBody,
}

impl RequestDescriptor {
    /// Creates a GET request.
    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: HttpMethod::Get,
            body: RequestBody::Empty,
        }
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post_json(endpoint: impl Into<String>, payload: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: HttpMethod::Post,
            body: RequestBody::Json(payload),
        }
    }

    /// Creates a POST request with a multipart body.
    #[must_use]
    pub fn post_multipart(endpoint: impl Into<String>, form: MultipartForm) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: HttpMethod::Post,
            body: RequestBody::Multipart(form),
        }
    }

    /// Creates a POST request from any serializable payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn post<T: Serialize>(endpoint: impl Into<String>, payload: &T) -> DomainResult<Self> {
        let value =
            serde_json::to_value(payload).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self::post_json(endpoint, value))
    }

    /// Returns whether the body is sent as JSON.
    #[must_use]
    pub const fn encode_as_json(&self) -> bool {
        self.body.encode_as_json()
    }

    /// Checks that the descriptor can be sent.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty endpoint or a GET carrying a multipart body.
    pub fn validate(&self) -> DomainResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(DomainError::InvalidUrl("endpoint is empty".to_string()));
        }
        if !self.method.has_body() && matches!(self.body, RequestBody::Multipart(_)) {
            return Err(DomainError::InvalidBody(
                "multipart body requires POST".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        src: String,
    }

    #[test]
    fn test_get_has_no_body() {
        let request = RequestDescriptor::get("/api/statistics/");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_post_serializes_payload() {
        let request = RequestDescriptor::post(
            "/api/image/get/",
            &Payload {
                src: "abc.jpg".to_string(),
            },
        )
        .unwrap();
        assert_eq!(request.body.as_json(), Some(&json!({"src": "abc.jpg"})));
        assert!(request.encode_as_json());
    }

    #[test]
    fn test_multipart_is_not_json() {
        let request =
            RequestDescriptor::post_multipart("/api/image/new/", MultipartForm::new().text("a", "b"));
        assert!(!request.encode_as_json());
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let request = RequestDescriptor::get("  ");
        assert!(matches!(request.validate(), Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_multipart_get() {
        let mut request = RequestDescriptor::get("/api/image/new/");
        request.body = RequestBody::Multipart(MultipartForm::new());
        assert!(matches!(request.validate(), Err(DomainError::InvalidBody(_))));
    }
}
