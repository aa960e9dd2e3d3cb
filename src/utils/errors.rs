//! Error handling for ProjectHub
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for ProjectHub
#[derive(Error, Debug)]
pub enum ProjectHubError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Backend API specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        status: StatusCode,
        error_code: Option<String>,
        message: String,
    },

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out")]
    Timeout,

    #[error("API unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("API response had no data for {0}")]
    MissingData(String),
}

/// Result type alias for ProjectHub operations
pub type Result<T> = std::result::Result<T, ProjectHubError>;

impl ApiError {
    /// HTTP status of the failed response, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend error code (`error_code` field of the error body)
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Status { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// Whether the backend rejected the session
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl ProjectHubError {
    /// Access the inner API error, if any
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ProjectHubError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ProjectHubError::Http(_) => true,
            ProjectHubError::Api(ApiError::Status { status, .. }) => status.is_server_error(),
            ProjectHubError::Api(ApiError::Timeout) => true,
            ProjectHubError::Api(ApiError::Unreachable(_)) => true,
            ProjectHubError::Api(_) => false,
            ProjectHubError::Serialization(_) => false,
            ProjectHubError::Config(_) => false,
            ProjectHubError::Io(_) => true,
            ProjectHubError::UrlParse(_) => false,
            ProjectHubError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProjectHubError::Config(_) => ErrorSeverity::Critical,
            ProjectHubError::Api(ApiError::Status { status, .. }) if status.is_client_error() => {
                ErrorSeverity::Warning
            }
            ProjectHubError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> ApiError {
        ApiError::Status {
            status,
            error_code: Some("unauthorized".to_string()),
            message: "Authentication required".to_string(),
        }
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(status_error(StatusCode::UNAUTHORIZED).is_unauthorized());
        assert!(!status_error(StatusCode::FORBIDDEN).is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
    }

    #[test]
    fn test_recoverability() {
        let server = ProjectHubError::Api(status_error(StatusCode::BAD_GATEWAY));
        let client = ProjectHubError::Api(status_error(StatusCode::BAD_REQUEST));
        assert!(server.is_recoverable());
        assert!(!client.is_recoverable());
        assert!(ProjectHubError::Api(ApiError::Timeout).is_recoverable());
        assert!(!ProjectHubError::Config("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_severity() {
        let client = ProjectHubError::Api(status_error(StatusCode::NOT_FOUND));
        assert_eq!(client.severity(), ErrorSeverity::Warning);
        assert_eq!(ProjectHubError::Config("x".to_string()).severity(), ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_status_display() {
        let err = status_error(StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized: Authentication required");
        assert_eq!(err.error_code(), Some("unauthorized"));
    }
}
