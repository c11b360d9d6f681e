//! Upstream adapter for the AMap web service API.
//!
//! Every tool maps to exactly one `GET` request. An [`UpstreamRequestTemplate`]
//! fixes the path and query keys; the base URL and credential come from
//! configuration through [`Endpoint`]. The [`Upstream`] trait is the network
//! seam: [`AmapClient`] performs real requests, tests substitute a mock.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use super::validator::TypedArgs;

/// Provider name used in soft error messages.
pub const PROVIDER_NAME: &str = "AMap";

/// Default AMap web service base URL.
pub const DEFAULT_BASE_URL: &str = "https://restapi.amap.com";

/// Query key carrying the credential.
const CREDENTIAL_KEY: &str = "key";

/// Failures talking to the provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Connection, DNS, TLS or timeout failure.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be read.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

impl UpstreamError {
    /// Build from a reqwest error without leaking the request URL (it carries
    /// the credential), keeping the source chain for context.
    fn from_reqwest(err: reqwest::Error, decode: bool) -> Self {
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if decode {
            Self::InvalidBody(message)
        } else {
            Self::Transport(message)
        }
    }
}

/// Static per-tool request layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamRequestTemplate {
    /// Path appended to the base URL.
    pub path: &'static str,

    /// Parameter name to query key, for keys that differ from the parameter.
    pub query_mapping: &'static [(&'static str, &'static str)],

    /// Fixed query parameters sent on every call.
    pub static_params: &'static [(&'static str, &'static str)],
}

impl UpstreamRequestTemplate {
    /// A template forwarding every parameter under its own name.
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            query_mapping: &[],
            static_params: &[],
        }
    }

    /// Query key for a parameter.
    pub fn query_key(&self, param: &'static str) -> &'static str {
        self.query_mapping
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, key)| *key)
            .unwrap_or(param)
    }

    /// Assemble the request for validated arguments.
    ///
    /// Order: credential, static parameters, then arguments in declaration
    /// order. Absent arguments produce no key.
    pub fn build(&self, endpoint: &Endpoint, args: &TypedArgs) -> UpstreamRequest {
        let mut query = Vec::with_capacity(1 + self.static_params.len() + args.len());
        query.push((CREDENTIAL_KEY.to_string(), endpoint.api_key.clone()));
        query.extend(
            self.static_params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        query.extend(
            args.iter()
                .map(|(name, value)| (self.query_key(name).to_string(), value.to_query_value())),
        );

        UpstreamRequest {
            url: format!("{}{}", endpoint.base_url.trim_end_matches('/'), self.path),
            query,
        }
    }
}

/// Where requests go and which credential they carry.
#[derive(Clone)]
pub struct Endpoint {
    pub base_url: String,
    pub api_key: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// A fully assembled `GET` request.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl UpstreamRequest {
    /// Value of a query key, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// URL with the encoded query string and the credential masked, for logs.
    pub fn redacted_url(&self) -> String {
        let masked: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| {
                if k == CREDENTIAL_KEY {
                    (k.as_str(), "REDACTED")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        match serde_urlencoded::to_string(&masked) {
            Ok(qs) if !qs.is_empty() => format!("{}?{}", self.url, qs),
            _ => self.url.clone(),
        }
    }
}

impl fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted_url())
    }
}

/// A provider response body.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// A JSON document. Object keys keep the order the provider sent.
    Json(Value),
    /// Any other payload (`output=xml`), kept as received.
    Text(String),
}

impl UpstreamBody {
    /// Classify a raw body: JSON when it parses, text otherwise.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// Compact JSON for documents, the raw text otherwise.
impl fmt::Display for UpstreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Network seam: performs one request and yields the response body.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, request: &UpstreamRequest) -> Result<UpstreamBody, UpstreamError>;
}

/// reqwest-backed client for the AMap web service.
#[derive(Debug, Clone)]
pub struct AmapClient {
    client: reqwest::Client,
}

impl AmapClient {
    /// Create a client. `None` keeps reqwest's default (no request deadline).
    pub fn new(timeout: Option<Duration>) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for AmapClient {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get(&self, request: &UpstreamRequest) -> Result<UpstreamBody, UpstreamError> {
        debug!("GET {}", request.redacted_url());

        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, false))?;

        debug!("Upstream answered with status {}", response.status());

        // The body, not the status, carries the provider's own error codes.
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, true))?;

        Ok(UpstreamBody::from_text(text))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::catalog::{ParameterSpec, ToolDescriptor};
    use crate::domains::tools::validator::{EnumPolicy, validate};
    use super::mock::serve_once;
    use serde_json::json;
    use tokio::net::TcpListener;

    const JSON: &str = "application/json";

    const PARAMS: &[ParameterSpec] = &[
        ParameterSpec::string("keywords", "").required(),
        ParameterSpec::string("city", ""),
        ParameterSpec::number("page", ""),
    ];

    const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: "keyword_search",
        description: "",
        parameters: PARAMS,
    };

    fn typed(value: Value) -> TypedArgs {
        let Value::Object(map) = value else {
            panic!("arguments must be an object");
        };
        validate(&DESCRIPTOR, &map, EnumPolicy::Strict).unwrap()
    }

    fn endpoint(base: &str) -> Endpoint {
        Endpoint::new(base, "secret-key")
    }

    #[test]
    fn test_build_request_layout() {
        let template = UpstreamRequestTemplate::get("/v3/place/text");
        let request = template.build(
            &endpoint("https://restapi.amap.com/"),
            &typed(json!({"keywords": "coffee", "page": 2})),
        );

        assert_eq!(request.url, "https://restapi.amap.com/v3/place/text");
        assert_eq!(
            request.query,
            vec![
                ("key".to_string(), "secret-key".to_string()),
                ("keywords".to_string(), "coffee".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
        assert!(request.query_value("city").is_none());
    }

    #[test]
    fn test_query_mapping_and_static_params() {
        let template = UpstreamRequestTemplate {
            path: "/v3/place/text",
            query_mapping: &[("keywords", "q")],
            static_params: &[("output", "json")],
        };
        let request = template.build(&endpoint("http://x"), &typed(json!({"keywords": "tea"})));

        assert_eq!(request.query_value("q"), Some("tea"));
        assert_eq!(request.query_value("keywords"), None);
        assert_eq!(request.query_value("output"), Some("json"));
        assert_eq!(template.query_key("city"), "city");
    }

    #[test]
    fn test_redaction() {
        let request = UpstreamRequestTemplate::get("/v3/place/detail")
            .build(&endpoint("http://x"), &typed(json!({"keywords": "a b"})));
        let shown = format!("{:?}", request);
        assert!(!shown.contains("secret-key"));
        assert!(shown.contains("key=REDACTED"));
        assert!(shown.contains("keywords=a+b"));
        assert!(!format!("{:?}", endpoint("http://x")).contains("secret-key"));
    }

    #[tokio::test]
    async fn test_client_returns_body_and_sends_query() {
        let (base, server) = serve_once("200 OK", JSON, r#"{"status":"1","count":"0"}"#).await;
        let client = AmapClient::new(None).unwrap();
        let request = UpstreamRequestTemplate::get("/v3/place/text")
            .build(&endpoint(&base), &typed(json!({"keywords": "park"})));

        let body = client.get(&request).await.unwrap();
        assert_eq!(body, UpstreamBody::Json(json!({"status": "1", "count": "0"})));

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /v3/place/text?"));
        assert!(request_line.contains("key=secret-key"));
        assert!(request_line.contains("keywords=park"));
    }

    #[tokio::test]
    async fn test_client_passes_error_status_body_through() {
        let (base, _server) = serve_once(
            "500 Internal Server Error",
            JSON,
            r#"{"status":"0","info":"INVALID_USER_KEY"}"#,
        )
        .await;
        let client = AmapClient::new(None).unwrap();
        let request = UpstreamRequestTemplate::get("/v3/place/detail")
            .build(&endpoint(&base), &typed(json!({"keywords": "x"})));

        let body = client.get(&request).await.unwrap();
        assert_eq!(body.to_string(), r#"{"status":"0","info":"INVALID_USER_KEY"}"#);
    }

    #[tokio::test]
    async fn test_client_keeps_provider_key_order() {
        const BODY: &str =
            r#"{"status":"1","info":"OK","infocode":"10000","count":"0","pois":[{"name":"b","id":"a"}]}"#;
        let (base, _server) = serve_once("200 OK", JSON, BODY).await;
        let client = AmapClient::new(None).unwrap();
        let request = UpstreamRequestTemplate::get("/v3/place/detail")
            .build(&endpoint(&base), &typed(json!({"keywords": "x"})));

        let body = client.get(&request).await.unwrap();
        assert!(matches!(body, UpstreamBody::Json(_)));
        assert_eq!(body.to_string(), BODY);
    }

    #[tokio::test]
    async fn test_client_passes_xml_body_through_as_text() {
        const BODY: &str =
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><response><status>1</status></response>";
        let (base, _server) = serve_once("200 OK", "text/xml", BODY).await;
        let client = AmapClient::new(None).unwrap();
        let request = UpstreamRequestTemplate::get("/v3/assistant/coordinate/convert")
            .build(&endpoint(&base), &typed(json!({"keywords": "x"})));

        let body = client.get(&request).await.unwrap();
        assert_eq!(body, UpstreamBody::Text(BODY.to_string()));
        assert_eq!(body.to_string(), BODY);
    }

    #[test]
    fn test_body_classification() {
        assert_eq!(
            UpstreamBody::from_text(r#"{"status":"1"}"#.to_string()),
            UpstreamBody::Json(json!({"status": "1"}))
        );
        assert_eq!(
            UpstreamBody::from_text(String::new()),
            UpstreamBody::Text(String::new())
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error_without_credential() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = AmapClient::new(Some(Duration::from_secs(5))).unwrap();
        let request = UpstreamRequestTemplate::get("/v3/direction/walking")
            .build(&endpoint(&base), &typed(json!({"keywords": "x"})));

        let err = client.get(&request).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
        assert!(!err.to_string().contains("secret-key"));
    }
}
