//! Loader for the protected user settings page

use serde::Serialize;
use tracing::debug;
use crate::api::{ApiFactory, CallOrigin};
use crate::models::UserSettings;
use crate::utils::errors::Result;
use super::{PageContext, PageOutcome};

pub const LOGIN_ROUTE: &str = "/login";

/// Data handed to the settings page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsPageData {
    pub user: UserSettings,
}

/// Load the settings page, redirecting anonymous visitors to the login page
pub async fn load(ctx: &PageContext, api: &ApiFactory) -> Result<PageOutcome<SettingsPageData>> {
    let cookie_header = ctx.cookie_header();

    if ctx.locals.user.is_none() {
        debug!("Settings page requested without a user, redirecting to login");
        return Ok(PageOutcome::redirect(302, LOGIN_ROUTE));
    }

    let users = api.users_with_cookies(cookie_header, CallOrigin::Server);
    let user = users.get_user_settings().await?;

    Ok(PageOutcome::Data(SettingsPageData { user }))
}
