//! Upstream REST client
//!
//! Every call to the upstream platform follows the same conversation:
//! build request → attach service credentials → send → read full body →
//! classify 2xx / non-2xx → decode JSON on success, otherwise surface the
//! status and raw body as [`UpstreamError::Status`].
//!
//! [`UpstreamTransport`] is the seam: [`HttpTransport`] talks to the network
//! with reqwest, tests plug in a canned transport. [`UpstreamClient`] does the
//! classification and decoding once for every call site.

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::query::QueryParams;

/// Boxed transport error
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Header carrying the platform API key
pub const API_KEY_HEADER: &str = "apikey";

/// Upstream call failure
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Request payload could not be serialized
    #[error("upstream request could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured timeout elapsed
    #[error("upstream request timed out")]
    Timeout,

    /// Connection, TLS or body read failure
    #[error("upstream transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-2xx answer; `body` is the raw upstream body
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx answer whose body does not match the expected shape
    #[error("upstream response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

impl UpstreamError {
    /// Upstream HTTP status, when the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw upstream body of a non-2xx answer
    pub fn body(&self) -> Option<&str> {
        match self {
            UpstreamError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(Box::new(err))
        }
    }
}

// ============================================================================
// Request / Response
// ============================================================================

/// One upstream call, independent of the transport
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    method: Method,
    path: String,
    query: QueryParams,
    body: Option<Vec<u8>>,
}

impl UpstreamRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Serialize `payload` as the JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self, UpstreamError> {
        self.body = Some(serde_json::to_vec(payload).map_err(UpstreamError::Encode)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Raw upstream answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx answer, or [`UpstreamError::Status`]
    pub fn into_success_body(self) -> Result<Vec<u8>, UpstreamError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(UpstreamError::Status {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Sends one request and returns the full answer, whatever its status
#[trait_variant::make(UpstreamTransport: Send)]
pub trait LocalUpstreamTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// reqwest-backed transport
///
/// Holds one connection-pooled client, safe for concurrent reuse.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpTransport {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Build the wire request with service credentials attached as both
    /// `apikey` and `Authorization: Bearer`.
    pub fn build_request(&self, request: &UpstreamRequest) -> Result<reqwest::Request, UpstreamError> {
        let url = self.config.url_for(request.path(), request.query());
        let key = self.config.service_key();

        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| UpstreamError::Transport(Box::new(e)))?;
        let api_key =
            HeaderValue::from_str(key).map_err(|e| UpstreamError::Transport(Box::new(e)))?;

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .header(API_KEY_HEADER, api_key)
            .header(header::AUTHORIZATION, bearer)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        Ok(builder.build()?)
    }
}

impl UpstreamTransport for HttpTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let wire = self.build_request(&request)?;
        let response = self.client.execute(wire).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(UpstreamResponse::new(status, body.to_vec()))
    }
}

// ============================================================================
// Client
// ============================================================================

/// Shared upstream client injected into every bridge/repository
pub struct UpstreamClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for UpstreamClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> UpstreamClient<T>
where
    T: UpstreamTransport + Sync,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send and classify; returns the raw body of a 2xx answer
    pub async fn execute(&self, request: UpstreamRequest) -> Result<Vec<u8>, UpstreamError> {
        let method = request.method().clone();
        let path = request.path().to_owned();

        let response = self.transport.send(request).await?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status,
            "Upstream call completed"
        );

        response.into_success_body()
    }

    /// Send, classify and decode the JSON body of a 2xx answer
    pub async fn fetch<R: DeserializeOwned>(&self, request: UpstreamRequest) -> Result<R, UpstreamError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(UpstreamError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[tokio::test]
    async fn test_success_is_decoded() {
        let client = UpstreamClient::new(ScriptedTransport::new(vec![Ok(UpstreamResponse::new(
            200,
            r#"[{"id":"a"}]"#,
        ))]));

        let rows: Vec<Row> = client
            .fetch(UpstreamRequest::get("/rest/v1/profiles"))
            .await
            .unwrap();
        assert_eq!(rows, vec![Row { id: "a".into() }]);
    }

    #[tokio::test]
    async fn test_non_2xx_surfaces_status_and_body() {
        let client = UpstreamClient::new(ScriptedTransport::new(vec![Ok(UpstreamResponse::new(
            400,
            r#"{"error":"invalid_grant"}"#,
        ))]));

        let err = client
            .fetch::<serde_json::Value>(UpstreamRequest::post("/auth/v1/token"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some(r#"{"error":"invalid_grant"}"#));
    }

    #[tokio::test]
    async fn test_bad_json_on_success_is_decode_error() {
        let client = UpstreamClient::new(ScriptedTransport::new(vec![Ok(UpstreamResponse::new(
            200, "not json",
        ))]));

        let err = client
            .fetch::<Vec<Row>>(UpstreamRequest::get("/rest/v1/profiles"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let client = UpstreamClient::new(ScriptedTransport::new(vec![Err(
            UpstreamError::Transport("connection refused".into()),
        )]));

        let err = client
            .execute(UpstreamRequest::post("/auth/v1/recover"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }

    #[tokio::test]
    async fn test_request_reaches_transport_unchanged() {
        let client = UpstreamClient::new(ScriptedTransport::new(vec![Ok(UpstreamResponse::new(
            204,
            Vec::new(),
        ))]));

        let request = UpstreamRequest::post("/auth/v1/recover")
            .with_json(&serde_json::json!({ "email": "a@b.co" }))
            .unwrap();
        client.execute(request).await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method(), &Method::POST);
        assert_eq!(sent[0].path(), "/auth/v1/recover");
        let body: serde_json::Value = serde_json::from_slice(sent[0].body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "email": "a@b.co" }));
    }

    #[test]
    fn test_http_transport_attaches_service_credentials() {
        let config = UpstreamConfig::new("https://example.supabase.co", Some("svc-key".into()));
        let transport = HttpTransport::new(config).unwrap();

        let request = UpstreamRequest::get("/rest/v1/profiles")
            .with_query(QueryParams::new().eq("id", "42"));
        let wire = transport.build_request(&request).unwrap();

        assert_eq!(
            wire.url().as_str(),
            "https://example.supabase.co/rest/v1/profiles?id=eq.42"
        );
        assert_eq!(wire.method(), &Method::GET);
        assert_eq!(wire.headers()[API_KEY_HEADER], "svc-key");
        assert_eq!(wire.headers()[header::AUTHORIZATION], "Bearer svc-key");
        assert_eq!(wire.headers()[header::ACCEPT], "application/json");
        assert!(wire.body().is_none());
    }

    #[test]
    fn test_http_transport_without_key_still_builds() {
        let config = UpstreamConfig::new("https://example.supabase.co", None);
        let transport = HttpTransport::new(config).unwrap();

        let request = UpstreamRequest::post("/auth/v1/signup")
            .with_json(&serde_json::json!({ "email": "a@b.co" }))
            .unwrap();
        let wire = transport.build_request(&request).unwrap();

        assert_eq!(wire.headers()[API_KEY_HEADER], "");
        assert_eq!(wire.headers()[header::AUTHORIZATION], "Bearer ");
        assert!(wire.body().and_then(|b| b.as_bytes()).is_some());
    }
}
