//! Server-side page loaders
//!
//! A loader receives the incoming request's cookies and the user resolved by
//! the authentication hook, and either produces page data or redirects.

pub mod settings;

use crate::models::User;
use crate::utils::helpers::{build_cookie_header, Cookie};

/// Per-request values set by the authentication hook
#[derive(Debug, Clone, Default)]
pub struct Locals {
    pub user: Option<User>,
}

/// What a loader sees of the incoming request
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub cookies: Vec<Cookie>,
    pub locals: Locals,
}

impl PageContext {
    pub fn new(cookies: Vec<Cookie>, user: Option<User>) -> Self {
        Self {
            cookies,
            locals: Locals { user },
        }
    }

    /// Every request cookie as a single `Cookie` header value
    pub fn cookie_header(&self) -> String {
        build_cookie_header(&self.cookies)
    }
}

/// Result of running a loader
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Data(T),
    Redirect { status: u16, location: String },
}

impl<T> PageOutcome<T> {
    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        PageOutcome::Redirect {
            status,
            location: location.into(),
        }
    }

    pub fn data(self) -> Option<T> {
        match self {
            PageOutcome::Data(data) => Some(data),
            PageOutcome::Redirect { .. } => None,
        }
    }
}

pub use settings::{load as load_settings_page, SettingsPageData};
