//! Authentication API
//!
//! Email/password and Google OAuth sign-in, session checks, token refresh
//! and logout. Successful sign-ins update the shared [`AuthStore`].

use tracing::{debug, error, info, warn};
use crate::api::request::{decode_data, ApiClient, CallOrigin, RequestInit};
use crate::models::{LoginRequest, SignupRequest, User};
use crate::state::{AuthStore, SessionStorage, USER_EMAIL_KEY};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_user_action};

pub const LOGIN_PATH: &str = "/oauth/email/login";
pub const REGISTER_PATH: &str = "/oauth/email/register";
pub const GOOGLE_URL_PATH: &str = "/oauth/google/get-url";
pub const GOOGLE_CALLBACK_PATH: &str = "/oauth/google/callback";
pub const REFRESH_TOKEN_PATH: &str = "/oauth/refresh-token";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";
pub const CURRENT_USER_PATH: &str = "/api/v1/auth/current-user";

/// Authentication client
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
    store: AuthStore,
    session: SessionStorage,
}

impl AuthApi {
    pub fn new(client: ApiClient, store: AuthStore, session: SessionStorage) -> Self {
        Self { client, store, session }
    }

    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    pub fn session(&self) -> &SessionStorage {
        &self.session
    }

    /// Sign in with email and password, then load the current user
    ///
    /// The store is marked loading for the duration; on failure the flag is
    /// reset and the error returned.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<()> {
        let init = RequestInit::post().json(credentials)?;
        self.store.set_loading(true);

        if let Err(e) = self.client.make_request(LOGIN_PATH, init, CallOrigin::Browser).await {
            self.store.set_loading(false);
            log_api_error("auth.login", &e.to_string(), Some(credentials.email.as_str()));
            return Err(e);
        }

        if let Err(e) = self.session.set(USER_EMAIL_KEY, &credentials.email).await {
            warn!(error = %e, "Failed to persist user email");
        }

        log_user_action(Some(credentials.email.as_str()), "login", None);
        self.get_current_user().await;
        Ok(())
    }

    /// Register a new account; the caller signs in separately
    pub async fn signup(&self, user: &SignupRequest) -> Result<()> {
        let init = RequestInit::post().json(user)?;
        self.client.make_request(REGISTER_PATH, init, CallOrigin::Browser).await?;

        log_user_action(Some(user.email.as_str()), "signup", None);
        Ok(())
    }

    /// Sign out; local state is cleared even if the server call fails
    pub async fn logout(&self) {
        if let Err(e) = self
            .client
            .make_request(LOGOUT_PATH, RequestInit::delete(), CallOrigin::Browser)
            .await
        {
            error!(error = %e, "Logout error");
        }

        let email = self.session.get(USER_EMAIL_KEY).await;
        if let Err(e) = self.session.remove(USER_EMAIL_KEY).await {
            warn!(error = %e, "Failed to remove persisted user email");
        }
        self.store.clear_user();

        log_user_action(email.as_deref(), "logout", None);
    }

    /// Fetch the signed-in user and publish it to the store
    ///
    /// Failures are logged and reported as `None`.
    pub async fn get_current_user(&self) -> Option<User> {
        match self.fetch_current_user().await {
            Ok(Some(user)) => {
                self.store.set_user(user.clone());
                Some(user)
            }
            Ok(None) => {
                debug!("No current user in response");
                None
            }
            Err(e) => {
                error!(error = %e, "Failed to get current user");
                None
            }
        }
    }

    async fn fetch_current_user(&self) -> Result<Option<User>> {
        let envelope = self
            .client
            .make_request(CURRENT_USER_PATH, RequestInit::get(), CallOrigin::Browser)
            .await?;
        decode_data(envelope)
    }

    /// Check whether a session cookie is still valid
    pub async fn check_session(&self) -> Option<User> {
        self.get_current_user().await
    }

    /// URL of the Google consent screen; empty when the backend sends none
    pub async fn get_google_auth_url(&self) -> Result<String> {
        let envelope = self
            .client
            .make_request(GOOGLE_URL_PATH, RequestInit::get(), CallOrigin::Browser)
            .await?;
        Ok(decode_data::<String>(envelope)?.unwrap_or_default())
    }

    /// Complete a Google sign-in with the authorization code
    pub async fn handle_google_callback(&self, code: &str) -> Result<()> {
        self.store.set_loading(true);

        let path = format!("{}?code={}", GOOGLE_CALLBACK_PATH, urlencoding::encode(code));
        if let Err(e) = self
            .client
            .make_request(&path, RequestInit::get(), CallOrigin::Browser)
            .await
        {
            self.store.set_loading(false);
            log_api_error("auth.google_callback", &e.to_string(), None);
            return Err(e);
        }

        info!("Google sign-in completed");
        self.get_current_user().await;
        Ok(())
    }

    /// Ask the backend to rotate the access token cookie
    pub async fn refresh_token(&self) -> Result<()> {
        self.client
            .make_request(REFRESH_TOKEN_PATH, RequestInit::get(), CallOrigin::Browser)
            .await
            .map(|_| ())
            .map_err(|e| {
                error!(error = %e, "Token refresh failed");
                e
            })
    }
}
