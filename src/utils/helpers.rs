//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the crate.

use url::Url;
use crate::utils::errors::Result;

/// A single request cookie as seen by a page loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Build a `Cookie` request header from individual cookies
///
/// Each cookie becomes `name=value`; pairs are joined with `"; "`.
pub fn build_cookie_header(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|cookie| format!("{}={}", cookie.name, cookie.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Percent-encode a value so it can be used as one path segment
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Resolve an absolute request path against a base URL
///
/// Any path already present on the base is kept as a prefix.
pub fn join_url(base: &str, path: &str) -> Result<Url> {
    let base = Url::parse(base)?;
    let prefix = base.path().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let mut url = base.clone();
    let (path_part, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    url.set_path(&format!("{}/{}", prefix, path_part));
    url.set_query(query);
    Ok(url)
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
