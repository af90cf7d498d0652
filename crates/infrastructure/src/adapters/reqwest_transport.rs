//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port: one HTTP exchange per call,
//! bearer attached when given, outcome classified as success, unauthorized
//! or failed. It never retries and never touches the token store.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tracing::debug;
use wardrobe_application::ports::{EventStream, Transport, TransportError};
use wardrobe_domain::response::UNAUTHORIZED;
use wardrobe_domain::{BlobData, HttpMethod, RequestBody, RequestDescriptor, ResponseOutcome};

use crate::http::{build_form, event_stream};

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("wardrobe/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 10;

/// HTTP transport backed by `reqwest::Client`.
///
/// Relative endpoints are joined onto the base URL; absolute URLs are used
/// as given.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Creates a transport for a backend with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_user_agent(base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a transport with a custom user agent.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - No request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn with_user_agent(base_url: &str, user_agent: &str) -> Result<Self, TransportError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| {
                let path = endpoint.split_once('?').map_or(endpoint, |(path, _)| path);
                TransportError::InvalidUrl(format!("{e}: {path}"))
            })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Attaches the request body; GET requests never carry one.
    fn build_body(
        builder: reqwest::RequestBuilder,
        request: &RequestDescriptor,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        if !request.method.has_body() {
            return Ok(builder);
        }

        match &request.body {
            RequestBody::Empty => Ok(builder),
            RequestBody::Json(value) => Ok(builder.json(value)),
            RequestBody::Multipart(form) => Ok(builder.multipart(build_form(form)?)),
        }
    }

    /// Maps reqwest errors to `TransportError`.
    ///
    /// The URL is stripped first; stream URLs carry the access token.
    fn map_error(error: reqwest::Error) -> TransportError {
        let error = error.without_url();
        if error.is_timeout() {
            return TransportError::Timeout;
        }

        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }

        if error.is_redirect() {
            return TransportError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }

        TransportError::Other(error.to_string())
    }

    /// Reads a failed response's body as JSON, if it is JSON.
    async fn error_body(response: Response) -> Option<Value> {
        let bytes = response.bytes().await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
        bearer: Option<&str>,
    ) -> Result<ResponseOutcome<Value>, TransportError> {
        let url = self.resolve(&request.endpoint)?;
        let path = url.path().to_string();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        builder = Self::build_body(builder, request)?;

        let response = builder.send().await.map_err(Self::map_error)?;
        let status = response.status();
        debug!(method = %request.method, path = %path, status = status.as_u16(), "HTTP response");

        if status.as_u16() == UNAUTHORIZED {
            return Ok(ResponseOutcome::Unauthorized);
        }
        if !status.is_success() {
            return Ok(ResponseOutcome::Failed {
                status: status.as_u16(),
                body: Self::error_body(response).await,
            });
        }

        let bytes = response.bytes().await.map_err(Self::map_error)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResponseOutcome::Ok(Value::Null));
        }
        let value =
            serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(ResponseOutcome::Ok(value))
    }

    async fn fetch_bytes(
        &self,
        url: &str,
        bearer: &str,
    ) -> Result<ResponseOutcome<BlobData>, TransportError> {
        let url = self.resolve(url)?;
        let path = url.path().to_string();

        let response = self
            .client
            .get(url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(Self::map_error)?;
        let status = response.status();
        debug!(path = %path, status = status.as_u16(), "Binary response");

        if status.as_u16() == UNAUTHORIZED {
            return Ok(ResponseOutcome::Unauthorized);
        }
        if !status.is_success() {
            return Ok(ResponseOutcome::Failed {
                status: status.as_u16(),
                body: Self::error_body(response).await,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(Self::map_error)?;

        Ok(ResponseOutcome::Ok(BlobData::new(bytes.to_vec(), content_type)))
    }

    async fn connect_stream(
        &self,
        url: &str,
    ) -> Result<ResponseOutcome<EventStream>, TransportError> {
        let url = self.resolve(url)?;
        let path = url.path().to_string();

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(Self::map_error)?;
        let status = response.status();
        debug!(path = %path, status = status.as_u16(), "Stream response");

        if status.as_u16() == UNAUTHORIZED {
            return Ok(ResponseOutcome::Unauthorized);
        }
        if !status.is_success() {
            return Ok(ResponseOutcome::Failed {
                status: status.as_u16(),
                body: Self::error_body(response).await,
            });
        }

        Ok(ResponseOutcome::Ok(event_stream(response)))
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, TransportError> {
    let mut url =
        Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {base_url}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wardrobe_domain::{MultipartForm, ServerEvent};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn transport(server: &MockServer) -> ReqwestTransport {
        ReqwestTransport::new(&server.uri()).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let transport = ReqwestTransport::new("http://library.local:8000").unwrap();

        assert_eq!(
            transport.resolve("/api/search/").unwrap().as_str(),
            "http://library.local:8000/api/search/"
        );
        assert_eq!(
            transport
                .resolve("https://cdn.example.com/a.jpg")
                .unwrap()
                .as_str(),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ReqwestTransport::new("not a url"),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_attaches_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/statistics/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .send(&RequestDescriptor::get("/api/statistics/"), Some("A1"))
            .await
            .unwrap();

        assert_eq!(outcome, ResponseOutcome::Ok(json!({"data": 1})));
    }

    #[tokio::test]
    async fn test_send_json_body_without_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/refresh/"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"refresh": "R1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .mount(&server)
            .await;

        let request = RequestDescriptor::post_json("/api/refresh/", json!({"refresh": "R1"}));
        let outcome = transport(&server).await.send(&request, None).await.unwrap();

        assert_eq!(outcome, ResponseOutcome::Ok(json!({"access": "A2"})));
        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_get_sends_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut request = RequestDescriptor::get("/api/backup/list/");
        request.body = RequestBody::Json(json!({}));
        transport(&server).await.send(&request, Some("A1")).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert!(received[0].body.is_empty());
        assert!(received[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_regardless_of_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "token expired"})),
            )
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .send(&RequestDescriptor::get("/api/data/"), Some("A1"))
            .await
            .unwrap();

        assert_eq!(outcome, ResponseOutcome::Unauthorized);
    }

    #[tokio::test]
    async fn test_failed_keeps_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "server"})))
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .send(&RequestDescriptor::get("/api/data/"), Some("A1"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ResponseOutcome::Failed {
                status: 500,
                body: Some(json!({"error": "server"})),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_with_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .send(&RequestDescriptor::get("/api/data/"), Some("A1"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ResponseOutcome::Failed {
                status: 502,
                body: None,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let request = RequestDescriptor::post_json("/api/diary/delete/", json!({"id": 1}));
        let outcome = transport(&server)
            .await
            .send(&request, Some("A1"))
            .await
            .unwrap();

        assert_eq!(outcome, ResponseOutcome::Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let result = transport(&server)
            .await
            .send(&RequestDescriptor::get("/api/data/"), Some("A1"))
            .await;

        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn test_multipart_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/image/new/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"md5": "abc"})))
            .mount(&server)
            .await;

        let form = MultipartForm::new().file("file", "coat.jpg", b"jpeg bytes".to_vec());
        let request = RequestDescriptor::post_multipart("/api/image/new/", form);
        transport(&server)
            .await
            .send(&request, Some("A1"))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        let content_type = received[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&received[0].body);
        assert!(body.contains("filename=\"coat.jpg\""));
        assert!(body.contains("image/jpeg"));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let transport = ReqwestTransport::new(&format!("http://{address}")).unwrap();

        let result = transport
            .send(&RequestDescriptor::get("/api/data/"), Some("A1"))
            .await;

        assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_connection_failure_hides_token_query() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let transport = ReqwestTransport::new(&format!("http://{address}")).unwrap();

        let Err(error) = transport
            .connect_stream("/api/message/stream/?token=SECRETTOKEN123")
            .await
        else {
            panic!("expected a connection failure");
        };

        assert!(matches!(error, TransportError::ConnectionFailed(_)));
        assert!(!error.to_string().contains("SECRETTOKEN123"));
        assert!(!format!("{error:?}").contains("SECRETTOKEN123"));
    }

    #[test]
    fn test_invalid_endpoint_hides_query() {
        let transport = ReqwestTransport::new("http://localhost:8000/").unwrap();

        let error = transport
            .resolve("http://[broken/api/?token=SECRETTOKEN123")
            .unwrap_err();

        assert!(matches!(error, TransportError::InvalidUrl(_)));
        assert!(!error.to_string().contains("SECRETTOKEN123"));
    }

    #[tokio::test]
    async fn test_fetch_bytes_keeps_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/static/abc.png"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1_u8, 2, 3], "image/png"))
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .fetch_bytes("/static/abc.png", "A1")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ResponseOutcome::Ok(BlobData::new(vec![1, 2, 3], Some("image/png".to_string())))
        );
    }

    #[tokio::test]
    async fn test_fetch_bytes_not_found() {
        let server = MockServer::start().await;

        let outcome = transport(&server)
            .await
            .fetch_bytes("/static/missing.png", "A1")
            .await
            .unwrap();

        assert!(matches!(outcome, ResponseOutcome::Failed { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_connect_stream_yields_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/message/stream/"))
            .and(query_param("token", "A1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("data: one\n\nevent: notice\ndata: two\n\n", "text/event-stream"),
            )
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .connect_stream("/api/message/stream/?token=A1")
            .await
            .unwrap();

        let ResponseOutcome::Ok(stream) = outcome else {
            panic!("expected an open stream");
        };
        let events: Vec<ServerEvent> = stream.map(Result::unwrap).collect().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type(), "notice");

        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_connect_stream_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let outcome = transport(&server)
            .await
            .connect_stream("/api/message/stream/?token=stale")
            .await
            .unwrap();

        assert!(outcome.is_unauthorized());
    }
}
