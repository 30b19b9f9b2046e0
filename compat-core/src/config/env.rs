//! Environment variable interpolation and env-based configuration

use super::error::{ConfigError, ConfigResult};
use super::schema::ProviderConfig;
use super::secrets::SecretString;
use regex::{Captures, Regex};
use std::env;
use std::sync::LazyLock;

/// Variable holding the API key
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Variable holding the base URL
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";

/// Older spelling of the base URL variable, still honoured
pub const ENV_API_BASE: &str = "OPENAI_API_BASE";

/// Variable holding the default model
pub const ENV_MODEL: &str = "OPENAI_MODEL";

/// `${VAR}` or `${VAR:-fallback}`
static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}").expect("env var pattern is valid")
});

/// Interpolate environment variables in a configuration string
pub fn interpolate_env_vars(content: &str) -> ConfigResult<String> {
    interpolate_with(content, |name| env::var(name).ok())
}

pub(crate) fn interpolate_with<F>(content: &str, lookup: F) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing: Option<String> = None;

    let result = ENV_VAR_PATTERN.replace_all(content, |cap: &Captures<'_>| {
        let var_name = &cap[1];
        match (lookup(var_name), cap.get(2)) {
            (Some(value), _) => value,
            (None, Some(fallback)) => fallback.as_str().to_string(),
            (None, None) => {
                // Report the first missing variable
                if missing.is_none() {
                    missing = Some(var_name.to_string());
                }
                String::new()
            }
        }
    });

    match missing {
        Some(var) => Err(ConfigError::EnvVarNotFound { var }),
        None => Ok(result.into_owned()),
    }
}

/// Whether a value still contains a `${...}` placeholder
pub fn contains_placeholder(value: &str) -> bool {
    ENV_VAR_PATTERN.is_match(value)
}

impl ProviderConfig {
    /// Build a config from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `OPENAI_MODEL`
    ///
    /// Unset variables fall back to the defaults of [`ProviderConfig::default`].
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = ProviderConfig::default();
        if let Some(key) = non_empty(ENV_API_KEY) {
            config.api_key = SecretString::new(key);
        }
        if let Some(base) = non_empty(ENV_BASE_URL).or_else(|| non_empty(ENV_API_BASE)) {
            config.api_base = base;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            config.default_model = model;
        }

        config.validate()?;
        Ok(config)
    }
}
