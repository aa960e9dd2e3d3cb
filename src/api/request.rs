//! HTTP transport for the backend API
//!
//! Every API client goes through [`ApiClient::make_request`], which resolves
//! the path against the right origin, sends JSON, keeps session cookies, and
//! turns backend failures into [`ApiError`]s.

use std::time::{Duration, Instant};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use crate::config::ApiConfig;
use crate::models::{ApiEnvelope, ErrorBody};
use crate::utils::errors::{ApiError, ProjectHubError, Result};
use crate::utils::helpers::{join_url, truncate_text};
use crate::utils::logging::log_api_call;

/// Where a request is issued from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallOrigin {
    /// Browser-side: goes through the app origin and its `/api` proxy
    #[default]
    Browser,
    /// Server-side page loaders: talk to the backend directly
    Server,
}

/// Method, body and extra headers of a single call
#[derive(Debug, Clone)]
pub struct RequestInit {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestInit {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a header; invalid values are rejected as input errors
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| ProjectHubError::InvalidInput(format!("Invalid {} header: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Shared HTTP client for the backend API
///
/// Browser-origin calls keep a cookie jar shared by all clones. Server-origin
/// calls never use it; they carry the cookies of the request being served.
#[derive(Debug, Clone)]
pub struct ApiClient {
    browser: Client,
    server: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let browser = Self::builder(&config)
            .cookie_store(true)
            .build()
            .map_err(ProjectHubError::Http)?;
        let server = Self::builder(&config)
            .build()
            .map_err(ProjectHubError::Http)?;

        Ok(Self { browser, server, config })
    }

    fn builder(config: &ApiConfig) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn route(&self, origin: CallOrigin) -> (&Client, &str) {
        match origin {
            CallOrigin::Browser => (&self.browser, &self.config.base_url),
            CallOrigin::Server => (&self.server, &self.config.server_base_url),
        }
    }

    /// Issue one request and unwrap the backend envelope
    pub async fn make_request(
        &self,
        path: &str,
        init: RequestInit,
        origin: CallOrigin,
    ) -> Result<ApiEnvelope<Value>> {
        let (client, base_url) = self.route(origin);
        let url = join_url(base_url, path)?;
        let method = init.method.clone();

        debug!(method = %method, url = %url, origin = ?origin, "Making API request");

        let mut request = client
            .request(init.method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .headers(init.headers);

        if let Some(body) = &init.body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProjectHubError::Api(ApiError::Timeout)
            } else if e.is_connect() {
                ProjectHubError::Api(ApiError::Unreachable(e.to_string()))
            } else {
                ProjectHubError::Api(ApiError::RequestFailed(e.to_string()))
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProjectHubError::Api(ApiError::InvalidResponse(e.to_string())))?;

        log_api_call(
            method.as_str(),
            path,
            status.as_u16(),
            started.elapsed().as_millis() as u64,
        );

        if !status.is_success() {
            return Err(status_error(status, &text).into());
        }

        parse_envelope(&text)
    }
}

/// Decode the success body; an empty body is an empty envelope
fn parse_envelope(text: &str) -> Result<ApiEnvelope<Value>> {
    if text.trim().is_empty() {
        return Ok(ApiEnvelope::default());
    }

    serde_json::from_str(text).map_err(|e| {
        warn!(error = %e, body = %truncate_text(text, 200), "Failed to decode API response");
        ProjectHubError::Api(ApiError::InvalidResponse(e.to_string()))
    })
}

/// Build the error for a non-success response
fn status_error(status: StatusCode, text: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => ApiError::Status {
            status,
            error_code: Some(body.error_code),
            message: body.message,
        },
        Err(_) => {
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                truncate_text(text.trim(), 200)
            };
            ApiError::Status {
                status,
                error_code: None,
                message,
            }
        }
    }
}

/// Decode the envelope payload into `T`
pub fn decode_data<T: DeserializeOwned>(envelope: ApiEnvelope<Value>) -> Result<Option<T>> {
    match envelope.data {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ProjectHubError::Api(ApiError::InvalidResponse(e.to_string()))),
    }
}

/// Decode the envelope payload, failing when it is absent
pub fn require_data<T: DeserializeOwned>(envelope: ApiEnvelope<Value>, what: &str) -> Result<T> {
    decode_data(envelope)?.ok_or_else(|| ProjectHubError::Api(ApiError::MissingData(what.to_string())))
}
