//! Client-facing response types
//!
//! Every failure leaving the HTTP boundary is serialized as the two-field
//! `{error, message}` body. The `error` field is a short category label for
//! programmatic handling, `message` carries the human-readable detail.

use serde::{Deserialize, Serialize};

/// Structured error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error category, e.g. "Not found" or "Validation error"
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_serializes_two_fields() {
        let body = ErrorBody::new("Not found", "User with id 7 not found");
        let json = serde_json::to_value(&body).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["error"], "Not found");
        assert_eq!(object["message"], "User with id 7 not found");
    }
}
