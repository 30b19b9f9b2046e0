//! Configuration module
//!
//! This module provides the provider configuration schema, loading from
//! YAML/JSON files or the environment, and validation.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{interpolate_env_vars, ENV_API_BASE, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{
    ProviderConfig, DEFAULT_API_BASE, DEFAULT_API_KEY, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_MODEL,
};
pub use secrets::SecretString;
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;
use tracing::debug;

fn read_interpolated(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    // Interpolate environment variables before parsing
    env::interpolate_env_vars(&content)
}

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<ProviderConfig> {
    let path = path.as_ref();
    let interpolated = read_interpolated(path)?;

    let config: ProviderConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    debug!("Loaded provider config from {}", path.display());
    Ok(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<ProviderConfig> {
    let path = path.as_ref();
    let interpolated = read_interpolated(path)?;

    let config: ProviderConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    debug!("Loaded provider config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
api_key: sk-test
api_base: https://api.together.xyz/v1
default_model: meta-llama/Llama-3-70b-chat-hf
organization_id: org-123
extra_headers:
  X-Title: compat
request_timeout_secs: 120
"#;
        let config: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_model, "meta-llama/Llama-3-70b-chat-hf");
        assert_eq!(config.organization_id.as_deref(), Some("org-123"));
        assert_eq!(config.extra_headers.get("X-Title").map(String::as_str), Some("compat"));
        assert_eq!(config.request_timeout_secs, Some(120));
        assert_eq!(config.connect_timeout_secs, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "api_base: http://localhost:8000/v1\nroutes: []\n";
        assert!(serde_yaml::from_str::<ProviderConfig>(yaml).is_err());
    }
}
