//! Text-generation error types

use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this error came back from the service itself rather
    /// than the transport
    pub fn is_api_error(&self) -> bool {
        matches!(self, LlmError::ApiError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_api_error() {
        let err = LlmError::ApiError {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(err.is_api_error());

        let err = LlmError::InvalidResponse("Bad JSON".to_string());
        assert!(!err.is_api_error());
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::ApiError {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: rate limited");
    }
}
