//! Configuration validation utilities

use super::env::contains_placeholder;
use super::error::ValidationError;
use super::schema::ProviderConfig;

/// Validator run after a config has been loaded and interpolated
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &ProviderConfig) -> Result<(), ValidationError> {
        config.validate()?;
        self.validate_placeholders(config)?;
        Ok(())
    }

    /// Placeholders surviving interpolation mean the config was built by hand
    /// from raw text; they would otherwise reach the wire verbatim.
    fn validate_placeholders(&self, config: &ProviderConfig) -> Result<(), ValidationError> {
        // The key itself is never echoed into the error
        if contains_placeholder(config.api_key.expose_secret()) {
            return Err(ValidationError::unresolved_placeholder("api_key", "[REDACTED]"));
        }
        if contains_placeholder(&config.api_base) {
            return Err(ValidationError::unresolved_placeholder(
                "api_base",
                config.api_base.as_str(),
            ));
        }
        if contains_placeholder(&config.default_model) {
            return Err(ValidationError::unresolved_placeholder(
                "default_model",
                config.default_model.as_str(),
            ));
        }
        for (name, value) in &config.extra_headers {
            if contains_placeholder(value) {
                return Err(ValidationError::unresolved_placeholder(
                    format!("extra_headers.{}", name),
                    value.as_str(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_resolved_config() {
        let config = ProviderConfig::new("sk-test", "https://api.openai.com/v1", "gpt-4o-mini");
        assert!(ConfigValidator::new().validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_unresolved_api_key() {
        let config = ProviderConfig::new("${OPENAI_API_KEY}", "https://api.openai.com/v1", "gpt-4o");
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.field_path, "api_key");
        assert!(!err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_rejects_unresolved_header() {
        let config = ProviderConfig::new("k", "https://api.openai.com/v1", "gpt-4o")
            .with_header("X-Team", "${TEAM_ID}");
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.field_path, "extra_headers.X-Team");
    }
}
