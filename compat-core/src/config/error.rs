//! Errors raised while loading or validating a provider config

use thiserror::Error;

/// Failure to produce a usable [`ProviderConfig`](super::ProviderConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config from '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Environment variable '{var}' not found")]
    EnvVarNotFound { var: String },
}

/// A config field that failed validation
#[derive(Debug, Error)]
#[error("Validation failed at '{field_path}': {kind}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `extra_headers.X-Title`
    pub field_path: String,
    pub kind: ValidationErrorKind,
}

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("required field is missing")]
    RequiredFieldMissing,

    #[error("value out of range: {message}")]
    OutOfRange { message: String },

    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("unresolved placeholder: {placeholder}")]
    UnresolvedPlaceholder { placeholder: String },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
        }
    }

    pub fn required(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::RequiredFieldMissing)
    }

    pub fn out_of_range(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(field_path, ValidationErrorKind::OutOfRange { message })
    }

    pub fn invalid_format(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(field_path, ValidationErrorKind::InvalidFormat { message })
    }

    pub fn invalid_url(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(field_path, ValidationErrorKind::InvalidUrl { message })
    }

    /// `placeholder` is echoed in the message, so callers redact secrets first
    pub fn unresolved_placeholder(
        field_path: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        let placeholder = placeholder.into();
        Self::new(field_path, ValidationErrorKind::UnresolvedPlaceholder { placeholder })
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::invalid_url("api_base", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Validation failed at 'api_base': invalid URL: relative URL without a base"
        );
        assert!(matches!(err.kind, ValidationErrorKind::InvalidUrl { .. }));
    }

    #[test]
    fn test_validation_error_converts_into_config_error() {
        let err: ConfigError = ValidationError::required("default_model").into();
        assert!(err.to_string().contains("'default_model'"));
    }
}
