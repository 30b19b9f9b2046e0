//! Configuration schema structures with serde support

use super::error::ValidationError;
use super::secrets::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default credential for local servers that ignore auth
pub const DEFAULT_API_KEY: &str = "no-key";

/// Default endpoint, matching a locally hosted OpenAI-compatible server
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/v1";

/// Default model name
pub const DEFAULT_MODEL: &str = "default";

/// Maximum response size (10MB)
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;

/// Construction-time settings for one OpenAI-compatible endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key (supports environment variable interpolation)
    #[serde(default = "default_api_key")]
    pub api_key: SecretString,

    /// Base URL of the API, e.g. `https://api.openai.com/v1`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model used when a request does not override it
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sent as `OpenAI-Organization` when present
    #[serde(default)]
    pub organization_id: Option<String>,

    /// Additional headers sent with every request
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_headers: BTreeMap<String, String>,

    /// Transport connect timeout
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// Transport total request timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Responses larger than this are rejected
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

fn default_api_key() -> SecretString {
    SecretString::new(DEFAULT_API_KEY)
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            api_base: default_api_base(),
            default_model: default_model(),
            organization_id: None,
            extra_headers: BTreeMap::new(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ProviderConfig {
    /// Create a config from the three required settings
    pub fn new(
        api_key: impl Into<SecretString>,
        api_base: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            default_model: default_model.into(),
            ..Default::default()
        }
    }

    /// Set the organization header
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Add an extra header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Set transport timeouts
    pub fn with_timeouts(mut self, connect_secs: Option<u64>, request_secs: Option<u64>) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.request_timeout_secs = request_secs;
        self
    }

    /// Base URL without a trailing slash
    pub fn normalized_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_base.is_empty() {
            return Err(ValidationError::required("api_base"));
        }

        match url::Url::parse(&self.api_base) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(ValidationError::invalid_url(
                        "api_base",
                        format!("URL scheme must be http or https, got: {}", url.scheme()),
                    ));
                }
            }
            Err(e) => {
                return Err(ValidationError::invalid_url("api_base", e.to_string()));
            }
        }

        if self.default_model.trim().is_empty() {
            return Err(ValidationError::required("default_model"));
        }

        if self.max_response_bytes == 0 {
            return Err(ValidationError::out_of_range(
                "max_response_bytes",
                "Must be greater than 0",
            ));
        }

        for (name, value) in &self.extra_headers {
            if name.trim().is_empty() {
                return Err(ValidationError::invalid_format(
                    "extra_headers",
                    "Header names must not be empty",
                ));
            }
            if value.contains('\n') || value.contains('\r') {
                return Err(ValidationError::invalid_format(
                    format!("extra_headers.{}", name),
                    "Header values must not contain line breaks",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationErrorKind;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.api_key.expose_secret(), "no-key");
        assert_eq!(config.api_base, "http://localhost:8000/v1");
        assert_eq!(config.default_model, "default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = ProviderConfig::new("k", "ftp://example.com", "m");
        let err = config.validate().unwrap_err();
        assert_eq!(err.field_path, "api_base");
        assert!(matches!(err.kind, ValidationErrorKind::InvalidUrl { .. }));
    }

    #[test]
    fn test_rejects_empty_model() {
        let config = ProviderConfig::new("k", "http://localhost:1234/v1", "  ");
        let err = config.validate().unwrap_err();
        assert_eq!(err.field_path, "default_model");
    }

    #[test]
    fn test_normalized_base() {
        let config = ProviderConfig::new("k", "http://localhost:1234/v1/", "m");
        assert_eq!(config.normalized_base(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "api_base: https://api.example.com/v1\n";
        let config: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api_base, "https://api.example.com/v1");
        assert_eq!(config.default_model, "default");
        assert_eq!(config.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES);
    }
}
