//! Backend API clients
//!
//! This module contains the resource clients (auth, projects, user settings)
//! and the HTTP transport they share.

pub mod auth;
pub mod projects;
pub mod request;
pub mod users;

// Re-export commonly used clients
pub use auth::AuthApi;
pub use projects::ProjectsApi;
pub use request::{ApiClient, CallOrigin, RequestInit};
pub use users::UsersApi;

use crate::config::settings::Settings;
use crate::state::{AuthStore, SessionStorage};
use crate::utils::errors::Result;

/// Factory for creating and wiring all API clients
///
/// All clients created by one factory share a connection pool and cookie
/// jar, so a session established by `auth` is visible to `projects`.
#[derive(Debug, Clone)]
pub struct ApiFactory {
    client: ApiClient,
    pub auth: AuthApi,
    pub projects: ProjectsApi,
    pub users: UsersApi,
}

impl ApiFactory {
    /// Create a new ApiFactory with all clients initialized
    pub fn new(settings: &Settings, store: AuthStore, session: SessionStorage) -> Result<Self> {
        let client = ApiClient::new(settings.api.clone())?;

        Ok(Self {
            auth: AuthApi::new(client.clone(), store, session),
            projects: ProjectsApi::new(client.clone()),
            users: UsersApi::new(client.clone(), None, None),
            client,
        })
    }

    /// Create a factory with a fresh store and session storage from settings
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let session = SessionStorage::from_config(&settings.session).await?;
        Self::new(settings, AuthStore::new(), session)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// User settings client that forwards the given cookies
    pub fn users_with_cookies(&self, cookie_header: String, called_from: CallOrigin) -> UsersApi {
        UsersApi::new(self.client.clone(), Some(cookie_header), Some(called_from))
    }
}
