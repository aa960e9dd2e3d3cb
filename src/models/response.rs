//! Backend response envelopes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success envelope wrapping every backend payload
///
/// All fields are optional: `DELETE` handlers answer with only a code, and
/// some endpoints answer with an empty body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T = Value> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Failure body produced by the backend error handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let json = r#"{"success": true, "code": 200, "data": ["a", "b"]}"#;
        let envelope: ApiEnvelope<Vec<String>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(envelope.message.is_none());
    }

    #[test]
    fn test_envelope_null_data() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"code": 200, "data": null}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.code, Some(200));
    }

    #[test]
    fn test_error_body() {
        let json = r#"{"error_code": "unauthorized", "message": "Authentication required. Please sign in to continue.", "success": false}"#;
        let body: ErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error_code, "unauthorized");
        assert!(!body.success);
    }
}
