//! Provider error types and handling

use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when talking to an OpenAI-compatible endpoint
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint returned an error we have no better mapping for
    #[error("Provider error: {code}: {message}")]
    Api { code: String, message: String },

    /// Timeout occurred in the transport
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response decoded but is missing required parts
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Response exceeded the configured size limit
    #[error("Response size {size} exceeds maximum {max}")]
    ResponseTooLarge { size: usize, max: usize },

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Service unavailable
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ProviderError::Authentication("bad key".into()).to_string(),
            "Authentication failed: bad key"
        );
        assert_eq!(
            ProviderError::ResponseTooLarge { size: 20, max: 10 }.to_string(),
            "Response size 20 exceeds maximum 10"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ProviderError::from(err), ProviderError::ParseError(_)));
    }
}
