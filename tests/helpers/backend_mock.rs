//! Mock ProjectHub backend for testing
//!
//! This module provides a mock HTTP server that simulates the ProjectHub
//! backend API. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock backend server for testing
pub struct BackendMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failure() -> Self {
        Self {
            success: false,
            ..Self::default()
        }
    }

    pub fn with_response(body: Value) -> Self {
        Self {
            custom_response: Some(body),
            ..Self::default()
        }
    }
}

impl BackendMockServer {
    /// Create a new mock backend server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn respond(config: MockResponseConfig, success_status: u16, default_data: Value, error_status: u16, error_code: &str) -> ResponseTemplate {
        let body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                json!({ "success": true, "code": success_status, "data": default_data })
            } else {
                error_body(error_code)
            }
        });

        let mut response = ResponseTemplate::new(if config.success { success_status } else { error_status })
            .set_body_json(body);

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        response
    }

    /// Setup mock for an arbitrary endpoint
    pub async fn mock_endpoint(&self, http_method: &str, endpoint: &str, config: MockResponseConfig) {
        let response = Self::respond(config, 200, Value::Null, 500, "internal_server_error");

        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the email login endpoint
    pub async fn mock_login(&self, config: MockResponseConfig) {
        let response = Self::respond(config, 200, Value::Null, 401, "unauthorized");

        Mock::given(method("POST"))
            .and(path("/oauth/email/login"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the current-user endpoint
    pub async fn mock_current_user(&self, config: MockResponseConfig) {
        let response = Self::respond(config, 200, test_user_json(), 401, "unauthorized");

        Mock::given(method("GET"))
            .and(path("/api/v1/auth/current-user"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the logout endpoint
    pub async fn mock_logout(&self, config: MockResponseConfig) {
        let response = Self::respond(config, 200, Value::Null, 500, "internal_server_error");

        Mock::given(method("DELETE"))
            .and(path("/api/v1/auth/logout"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the user settings endpoint
    pub async fn mock_user_settings(&self, config: MockResponseConfig) {
        let response = Self::respond(config, 200, test_settings_json(), 401, "unauthorized");

        Mock::given(method("GET"))
            .and(path("/api/v1/user/settings"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup the mocks for a signed-in session
    pub async fn setup_default_mocks(&self) {
        self.mock_login(MockResponseConfig::default()).await;
        self.mock_current_user(MockResponseConfig::default()).await;
        self.mock_logout(MockResponseConfig::default()).await;
        self.mock_user_settings(MockResponseConfig::default()).await;
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let received_requests = self.server.received_requests().await.unwrap();
        let matching_requests = received_requests
            .iter()
            .filter(|req| req.url.path() == endpoint)
            .count();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, endpoint, matching_requests
        );
    }
}

/// Backend error body for the given code
pub fn error_body(error_code: &str) -> Value {
    json!({
        "error_code": error_code,
        "message": format!("mock failure: {}", error_code),
        "success": false
    })
}

pub fn test_user_json() -> Value {
    json!({
        "id": "0b7d6a52-3c61-4c7e-9a8e-2f1f0c9d1e11",
        "email": test_email(),
        "fullname": "Ana Lima",
        "avatar_url": null,
        "is_active": true,
        "created_at": "2025-01-10T08:00:00Z",
        "updated_at": "2025-01-11T09:30:00Z"
    })
}

pub fn test_settings_json() -> Value {
    json!({
        "fullname": "Ana Lima",
        "email": test_email(),
        "provider": "email"
    })
}

pub fn test_email() -> String {
    "ana@example.com".to_string()
}
