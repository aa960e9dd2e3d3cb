//! Path-prefix reverse proxy
//!
//! Forwards matching requests to an upstream origin unchanged apart from
//! hop-by-hop headers, and relays the upstream response.

use std::collections::BTreeMap;
use std::sync::Arc;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::{redirect, Client};
use tracing::{debug, warn};
use crate::utils::errors::{ProjectHubError, Result};
use crate::utils::helpers::join_url;

/// Largest request body the proxy will buffer
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// One `prefix -> target` forwarding rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    /// Path prefix without trailing slash; empty matches everything
    pub prefix: String,
    pub target: String,
}

impl ProxyRule {
    pub fn new(prefix: &str, target: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            target: target.to_string(),
        }
    }

    /// Whether the rule covers `path` on a segment boundary
    pub fn matches(&self, path: &str) -> bool {
        if self.prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Ordered set of rules; longer prefixes are tried first
#[derive(Debug, Clone, Default)]
pub struct ProxyRules {
    rules: Vec<ProxyRule>,
}

impl ProxyRules {
    pub fn from_config(proxy: &BTreeMap<String, String>) -> Self {
        let mut rules: Vec<ProxyRule> = proxy
            .iter()
            .map(|(prefix, target)| ProxyRule::new(prefix, target))
            .collect();
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules }
    }

    pub fn match_path(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProxyRule> {
        self.rules.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Upstream client plus the rules it forwards by
#[derive(Debug, Clone)]
pub struct ProxyState {
    client: Client,
    rules: Arc<ProxyRules>,
}

impl ProxyState {
    pub fn new(rules: ProxyRules) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ProjectHubError::Http)?;

        Ok(Self {
            client,
            rules: Arc::new(rules),
        })
    }

    pub fn rules(&self) -> &ProxyRules {
        &self.rules
    }

    /// Forward `req` if a rule covers its path, otherwise hand it back
    ///
    /// Upstream failures become `502 Bad Gateway`.
    pub async fn dispatch(&self, req: Request) -> std::result::Result<Response, Request> {
        let path = req.uri().path().to_string();
        let Some(rule) = self.rules.match_path(&path).cloned() else {
            return Err(req);
        };

        match self.forward(&rule, req).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(path = %path, target = %rule.target, error = %e, "Proxy request failed");
                Ok((StatusCode::BAD_GATEWAY, format!("Upstream {} unavailable", rule.target)).into_response())
            }
        }
    }

    async fn forward(&self, rule: &ProxyRule, req: Request) -> Result<Response> {
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        let url = join_url(&rule.target, &path_and_query)?;

        debug!(method = %req.method(), upstream = %url, "Proxying request");

        let method = req.method().clone();
        let headers = strip_hop_by_hop(req.headers());
        let body = to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| ProjectHubError::InvalidInput(format!("Failed to read request body: {}", e)))?;

        let upstream = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers());
        let bytes = upstream.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let hop_by_hop: [HeaderName; 8] = [
        header::CONNECTION,
        header::HOST,
        header::PROXY_AUTHENTICATE,
        header::PROXY_AUTHORIZATION,
        header::TE,
        header::TRAILER,
        header::TRANSFER_ENCODING,
        header::UPGRADE,
    ];

    let mut headers = headers.clone();
    for name in hop_by_hop {
        headers.remove(name);
    }
    // Bodies are re-framed on both legs
    headers.remove(header::CONTENT_LENGTH);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ProxyRules {
        let mut map = BTreeMap::new();
        map.insert("/api".to_string(), "http://localhost:8000".to_string());
        map.insert("/api/v2/".to_string(), "http://localhost:9000".to_string());
        ProxyRules::from_config(&map)
    }

    #[test]
    fn test_prefix_matches_on_segment_boundary() {
        let rule = ProxyRule::new("/api", "http://localhost:8000");
        assert!(rule.matches("/api"));
        assert!(rule.matches("/api/"));
        assert!(rule.matches("/api/v1/projects"));
        assert!(!rule.matches("/apis"));
        assert!(!rule.matches("/login"));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let rules = rules();
        assert_eq!(rules.match_path("/api/v2/things").map(|r| r.target.as_str()), Some("http://localhost:9000"));
        assert_eq!(rules.match_path("/api/v1/projects").map(|r| r.target.as_str()), Some("http://localhost:8000"));
        assert!(rules.match_path("/settings").is_none());
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "localhost:3000".parse().unwrap());
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(header::COOKIE, "access_token=abc".parse().unwrap());

        let stripped = strip_hop_by_hop(&headers);
        assert!(stripped.get(header::HOST).is_none());
        assert!(stripped.get(header::CONNECTION).is_none());
        assert_eq!(stripped.get(header::COOKIE).unwrap(), "access_token=abc");
    }

    #[test]
    fn test_prefixes_are_literal() {
        let mut map = BTreeMap::new();
        map.insert("/api/:version".to_string(), "http://localhost:9000".to_string());
        map.insert("/api".to_string(), "http://localhost:8000".to_string());
        let rules = ProxyRules::from_config(&map);

        assert_eq!(rules.match_path("/api/:version/x").map(|r| r.target.as_str()), Some("http://localhost:9000"));
        assert_eq!(rules.match_path("/api/v1/x").map(|r| r.target.as_str()), Some("http://localhost:8000"));
    }
}
