//! ProjectHub client
//!
//! Client-side access layer of the ProjectHub web application: typed clients
//! for the authentication, projects and user settings endpoints, the
//! server-side loader of the settings page, and a development server that
//! proxies `/api` to the backend.

pub mod config;
pub mod api;
pub mod models;
pub mod state;
pub mod pages;
pub mod dev_server;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ProjectHubError, ApiError, Result};

// Re-export main components for easy access
pub use api::{ApiFactory, ApiClient, AuthApi, ProjectsApi, UsersApi, CallOrigin};
pub use state::{AuthStore, SessionStorage};
pub use dev_server::{DevServer, ServeMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
