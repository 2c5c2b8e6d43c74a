//! REST client with pluggable authentication, retries, and error translation
//!
//! Every provider binding builds a [`RestRequest`] and hands it to a shared
//! [`RestClient`]. The client resolves the URL against its endpoint, lets the
//! [`Authenticator`] attach credentials or a signature, sends the request and
//! turns non-2xx responses into typed [`Error`]s.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, HttpFailure, Result};

/// Content type used for form-encoded bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// RFC 3986 unreserved characters pass through, everything else is escaped
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// As [`COMPONENT_ENCODE_SET`] but keeping `/` separators
const PATH_ENCODE_SET: &AsciiSet = &COMPONENT_ENCODE_SET.remove(b'/');

/// Attaches credentials to outgoing requests.
///
/// Implementations add token headers or sign the fully built request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authorize a request right before it is sent
    async fn authorize(&self, request: &mut reqwest::Request) -> Result<()>;

    /// Drop cached credentials after the server rejected them
    async fn invalidate(&self) {}
}

/// Authenticator for endpoints that need no credentials
#[derive(Clone, Debug, Default)]
pub struct NoAuth;

#[async_trait]
impl Authenticator for NoAuth {
    async fn authorize(&self, _request: &mut reqwest::Request) -> Result<()> {
        Ok(())
    }
}

/// A request body together with its content type
#[derive(Clone, Debug)]
pub struct Payload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl Payload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A request relative to the client endpoint
#[derive(Clone, Debug)]
pub struct RestRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<Payload>,
}

impl RestRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.body.as_ref()
    }

    /// Append a query parameter. An empty value renders as `key=`.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set a header, replacing any previous value
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidConfig(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidConfig(format!("invalid header value for {name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set several headers
    pub fn headers<'a, I>(mut self, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in headers {
            self = self.header(name, value)?;
        }
        Ok(self)
    }

    /// Serialize a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body)?;
        self.body = Some(Payload::new(bytes).with_content_type("application/json"));
        Ok(self)
    }

    /// Serialize a form-encoded body
    pub fn form<F: Serialize + ?Sized>(mut self, form: &F) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(form)
            .map_err(|e| Error::Parse(format!("failed to encode form: {e}")))?;
        self.body = Some(Payload::new(encoded).with_content_type(FORM_CONTENT_TYPE));
        Ok(self)
    }

    /// Attach a raw body
    pub fn body(mut self, payload: Payload) -> Self {
        self.body = Some(payload);
        self
    }
}

/// A fully read response
#[derive(Clone, Debug)]
pub struct RestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// A header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn header_u64(&self, name: &str) -> Option<u64> {
        self.header(name).and_then(|v| v.trim().parse().ok())
    }

    /// Headers starting with `prefix` (case-insensitive), keyed by the lower-cased remainder
    pub fn headers_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        let prefix = prefix.to_ascii_lowercase();
        self.headers
            .iter()
            .filter_map(|(name, value)| {
                let key = name.as_str().strip_prefix(prefix.as_str())?;
                let value = value.to_str().ok()?;
                Some((key.to_string(), value.to_string()))
            })
            .collect()
    }
}

/// HTTP client bound to one service endpoint
pub struct RestClient {
    client: Client,
    endpoint: String,
    config: ClientConfig,
    authenticator: Arc<dyn Authenticator>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("endpoint", &self.endpoint)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a new client for `endpoint`
    pub fn new(
        endpoint: &str,
        config: ClientConfig,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self> {
        let client = build_http_client(&config)?;
        Ok(Self::with_http_client(client, endpoint, config, authenticator))
    }

    /// Create a client that shares an existing connection pool
    pub fn with_http_client(
        client: Client,
        endpoint: &str,
        config: ClientConfig,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            config,
            authenticator,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Build the full URL for a request path, without the query
    pub fn build_url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{}", self.endpoint, path)
        } else {
            format!("{}/{}", self.endpoint, path)
        }
    }

    fn to_http_request(&self, request: &RestRequest) -> Result<reqwest::Request> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.build_url(&request.path))
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(payload) = &request.body {
            if let Some(content_type) = &payload.content_type {
                if !request.headers.contains_key(CONTENT_TYPE) {
                    builder = builder.header(CONTENT_TYPE, content_type);
                }
            }
            // Bytes clone is O(1)
            builder = builder.body(payload.bytes.clone());
        } else if matches!(request.method, Method::PUT | Method::POST) {
            builder = builder.header(reqwest::header::CONTENT_LENGTH, "0");
        }

        Ok(builder.build()?)
    }

    /// Send a request, retrying transient failures and re-authenticating once on 401
    pub async fn execute(&self, request: RestRequest) -> Result<RestResponse> {
        let retry = &self.config.retry;
        let mut attempt = 0;
        let mut reauthenticated = false;

        loop {
            attempt += 1;
            let mut http_request = self.to_http_request(&request)?;
            let url = http_request.url().to_string();
            self.authenticator.authorize(&mut http_request).await?;

            let started = Instant::now();
            debug!(target: "stratus::wire", "Sending request: {} {}", request.method, url);

            match self.client.execute(http_request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(
                        target: "stratus::wire",
                        "Received response: {} {} -> {} in {:?}",
                        request.method,
                        url,
                        status.as_u16(),
                        started.elapsed()
                    );

                    if status == StatusCode::UNAUTHORIZED && !reauthenticated {
                        warn!("Credentials rejected for {}, re-authenticating...", url);
                        self.authenticator.invalidate().await;
                        reauthenticated = true;
                        continue;
                    }

                    if crate::retry::is_retryable(status) && attempt < retry.max_attempts {
                        let delay = retry.delay_for(attempt);
                        warn!(
                            "Request {} {} returned {}, retrying in {:?} (attempt {}/{})",
                            request.method,
                            url,
                            status.as_u16(),
                            delay,
                            attempt,
                            retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return self.handle_response(&request.method, &url, response).await;
                }
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < retry.max_attempts => {
                    let delay = retry.delay_for(attempt);
                    warn!(
                        "Request {} {} failed: {}, retrying in {:?}",
                        request.method, url, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Send a request and parse a JSON response body
    pub async fn execute_json<T: DeserializeOwned>(&self, request: RestRequest) -> Result<T> {
        self.execute(request).await?.json()
    }

    async fn handle_response(
        &self,
        method: &Method,
        url: &str,
        response: reqwest::Response,
    ) -> Result<RestResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(RestResponse {
                status,
                headers,
                body,
            })
        } else {
            let failure = HttpFailure {
                method: method.clone(),
                url: url.to_string(),
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            };
            debug!("Request failed: {}", failure);
            Err(Error::from_failure(failure))
        }
    }
}

/// Build the underlying reqwest client from the shared configuration
pub fn build_http_client(config: &ClientConfig) -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .timeout(Duration::from_millis(config.read_timeout_ms))
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// Percent-encode a single path component (RFC 3986 unreserved set kept)
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

/// Percent-encode a slash-separated path, keeping the separators
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> RestClient {
        RestClient::new(endpoint, ClientConfig::default(), Arc::new(NoAuth)).unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = client("http://localhost:9696/");
        assert_eq!(
            client.build_url("/v2.0/routers"),
            "http://localhost:9696/v2.0/routers"
        );
        assert_eq!(
            client.build_url("v2.0/routers"),
            "http://localhost:9696/v2.0/routers"
        );
        assert_eq!(client.build_url(""), "http://localhost:9696");
    }

    #[test]
    fn test_query_is_form_encoded() {
        let client = client("http://localhost:8080/v1/AUTH_demo");
        let request = RestRequest::get("/photos")
            .query("format", "json")
            .query("prefix", "a b/c");
        let http_request = client.to_http_request(&request).unwrap();
        assert_eq!(
            http_request.url().as_str(),
            "http://localhost:8080/v1/AUTH_demo/photos?format=json&prefix=a+b%2Fc"
        );

        let request = RestRequest::post("").query("bulk-delete", "");
        let http_request = client.to_http_request(&request).unwrap();
        assert_eq!(
            http_request.url().as_str(),
            "http://localhost:8080/v1/AUTH_demo?bulk-delete="
        );

        let http_request = client.to_http_request(&RestRequest::get("/photos")).unwrap();
        assert_eq!(http_request.url().query(), None);
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("dir/my file.txt"), "dir/my%20file.txt");
        assert_eq!(encode_path("a+b/ü"), "a%2Bb/%C3%BC");
        assert_eq!(encode_component("a/b~c"), "a%2Fb~c");
    }

    #[test]
    fn test_request_builder() {
        let request = RestRequest::put("/v2.0/fw/firewalls/abc")
            .query("fields", "id")
            .header("X-Auth-Token", "token")
            .unwrap()
            .json(&serde_json::json!({"firewall": {"name": "fw"}}))
            .unwrap();

        assert_eq!(*request.method(), Method::PUT);
        assert_eq!(request.path(), "/v2.0/fw/firewalls/abc");
        assert_eq!(request.query_params().len(), 1);
        assert_eq!(
            request.header_map().get("x-auth-token").unwrap(),
            "token"
        );
        let payload = request.payload().unwrap();
        assert_eq!(payload.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = RestRequest::get("/").header("bad header", "x");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_headers_with_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-Object-Meta-ApiName").unwrap(),
            HeaderValue::from_static("swift"),
        );
        headers.insert(
            HeaderName::from_bytes(b"X-Object-Meta-Version").unwrap(),
            HeaderValue::from_static("v1"),
        );
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        let response = RestResponse {
            status: StatusCode::OK,
            headers,
            body: Bytes::new(),
        };

        let mut meta = response.headers_with_prefix("X-Object-Meta-");
        meta.sort();
        assert_eq!(
            meta,
            vec![
                ("apiname".to_string(), "swift".to_string()),
                ("version".to_string(), "v1".to_string()),
            ]
        );
    }
}
