//! User settings API
//!
//! Used both from the browser and from server-side page loaders. Loaders
//! have no cookie jar of their own, so they pass the incoming request's
//! cookies explicitly.

use reqwest::header::COOKIE;
use crate::api::request::{require_data, ApiClient, CallOrigin, RequestInit};
use crate::models::{UserSettings, UserUpdateRequest};
use crate::utils::errors::Result;

pub const USER_SETTINGS_PATH: &str = "/api/v1/user/settings";

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
    cookie_header: Option<String>,
    called_from: CallOrigin,
}

impl UsersApi {
    pub fn new(client: ApiClient, cookie_header: Option<String>, called_from: Option<CallOrigin>) -> Self {
        Self {
            client,
            cookie_header,
            called_from: called_from.unwrap_or_default(),
        }
    }

    pub fn called_from(&self) -> CallOrigin {
        self.called_from
    }

    fn with_cookies(&self, init: RequestInit) -> Result<RequestInit> {
        match self.cookie_header.as_deref() {
            Some(cookies) if !cookies.is_empty() => init.header(COOKIE, cookies),
            _ => Ok(init),
        }
    }

    pub async fn get_user_settings(&self) -> Result<UserSettings> {
        let init = self.with_cookies(RequestInit::get())?;
        let envelope = self
            .client
            .make_request(USER_SETTINGS_PATH, init, self.called_from)
            .await?;
        require_data(envelope, "user settings")
    }

    pub async fn update_user_settings(&self, update: &UserUpdateRequest) -> Result<()> {
        let init = self.with_cookies(RequestInit::put().json(update)?)?;
        self.client
            .make_request(USER_SETTINGS_PATH, init, self.called_from)
            .await?;
        Ok(())
    }
}
