// Content API HTTP client.
// Builds request URLs, sends requests and classifies responses by kind.

use std::time::Duration;

use reqwest::{
    Client, Method, Response, StatusCode, Url,
    header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::{ClientConfig, Deployment};
use crate::error::{KcError, Result};

/// How a response body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Body decoded as JSON; non-2xx is an error.
    #[default]
    Json,
    /// Body returned as text; non-2xx is an error.
    Text,
    /// Only the status code matters; every status is returned.
    Status,
}

/// Decoded outcome of [`ResourceClient::call`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Text(String),
    Status(StatusCode),
}

/// A single API call described as data.
///
/// Path segments are appended to the client's base URL one by one, so
/// identifiers are percent-encoded and cannot change the shape of the path.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    /// Only consulted by [`ResourceClient::call`]. The typed helpers
    /// (`call_json`, `call_text`, `call_status`) imply their own kind.
    pub kind: ResponseKind,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            kind: ResponseKind::Json,
            timeout: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Adds one `key` pair per value. An empty list still sends `key=`
    /// because the API expects the key to be present.
    pub fn query_list<I, S>(mut self, key: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let before = self.query.len();
        self.query
            .extend(values.into_iter().map(|v| (key, v.to_string())));
        if self.query.len() == before {
            self.query.push((key, String::new()));
        }
        self
    }

    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// How [`ResourceClient::call`] should interpret the response.
    pub fn expect(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Per-call timeout, overriding the client's.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for one API deployment.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    client: Client,
    base: Url,
    timeout: Option<Duration>,
}

impl ResourceClient {
    /// Create a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| KcError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(KcError::InvalidUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| KcError::InvalidHeader(e.to_string()))?,
        );
        if let Some(session) = &config.session {
            let mut cookie = HeaderValue::from_str(&format!("session={}", session))
                .map_err(|e| KcError::InvalidHeader(e.to_string()))?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base,
            timeout: config.timeout,
        })
    }

    /// Create a client for an arbitrary base URL with default settings.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    /// Create a client for one of the known deployments.
    pub fn for_deployment(deployment: Deployment) -> Result<Self> {
        Self::new(ClientConfig::for_deployment(deployment))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// A view of this client whose calls time out after `timeout`.
    /// Shares the connection pool with `self`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            client: self.client.clone(),
            base: self.base.clone(),
            timeout: Some(timeout),
        }
    }

    /// Absolute URL for a request, including its query string.
    ///
    /// Empty, `.` and `..` segments are rejected: URL normalization would
    /// drop or collapse them and address a different resource.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        if let Some(segment) = request
            .segments
            .iter()
            .find(|s| matches!(s.as_str(), "" | "." | ".."))
        {
            return Err(KcError::InvalidIdentifier(segment.clone()));
        }

        let mut url = self.base.clone();
        // Checked at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(&request.segments);
        }
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Issue a request and decode the response according to its kind.
    pub async fn call(&self, request: ApiRequest) -> Result<Reply> {
        match request.kind {
            ResponseKind::Json => self.call_json(request).await.map(Reply::Json),
            ResponseKind::Text => self.call_text(request).await.map(Reply::Text),
            ResponseKind::Status => self.call_status(request).await.map(Reply::Status),
        }
    }

    /// Issue a request and decode a 2xx body as JSON.
    pub async fn call_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = check_response(self.send(&request).await?)?;
        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| KcError::Decode { status, source })
    }

    /// Issue a request and return a 2xx body as text.
    pub async fn call_text(&self, request: ApiRequest) -> Result<String> {
        let response = check_response(self.send(&request).await?)?;
        Ok(response.text().await?)
    }

    /// Issue a request and return only its status code.
    pub async fn call_status(&self, request: ApiRequest) -> Result<StatusCode> {
        let response = self.send(&request).await?;
        Ok(response.status())
    }

    async fn send(&self, request: &ApiRequest) -> Result<Response> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout.or(self.timeout) {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        debug!(status = %response.status(), "received response");
        Ok(response)
    }
}

/// Reject non-2xx responses without reading the body.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(KcError::RemoteStatus {
            status,
            url: response.url().to_string(),
        })
    }
}
