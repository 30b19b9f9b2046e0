//! HTTP client implementation using reqwest

use crate::config::ProviderConfig;
use crate::http::error::map_http_error;
use crate::http::{CallKind, RequestOptions};
use crate::providers::{ProviderError, ProviderResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Default user agent
const USER_AGENT: &str = concat!("compat-core/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one endpoint and credential
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: Client,

    /// Base URL without a trailing slash
    base_url: String,

    /// Headers sent with every request
    default_headers: HeaderMap,

    /// Maximum response size to prevent OOM
    max_response_size: usize,
}

impl HttpClient {
    /// Create a client from a provider configuration
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        let mut builder = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .gzip(true);

        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.normalized_base().to_string(),
            default_headers: build_headers(config)?,
            max_response_size: config.max_response_bytes,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a call kind
    pub fn build_url(&self, call_kind: CallKind) -> String {
        format!("{}{}", self.base_url, call_kind.endpoint())
    }

    /// Issue a bodiless request and decode the JSON reply
    pub async fn get_json<T: DeserializeOwned>(&self, options: RequestOptions) -> ProviderResult<T> {
        let request = self.request(&options);
        self.execute(request, &options).await
    }

    /// Issue a request with a JSON body and decode the JSON reply
    pub async fn post_json<B, T>(&self, options: RequestOptions, body: &B) -> ProviderResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(&options).json(body);
        self.execute(request, &options).await
    }

    fn request(&self, options: &RequestOptions) -> RequestBuilder {
        let url = self.build_url(options.call_kind);
        debug!("Request URL: {} [request_id: {}]", url, options.request_id);

        self.client
            .request(options.call_kind.method(), &url)
            .headers(self.default_headers.clone())
            .header("X-Request-ID", options.request_id.to_string())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        options: &RequestOptions,
    ) -> ProviderResult<T> {
        let request_id = options.request_id;

        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(e, request_id))?;

        let status = response.status();
        debug!("Response status: {} [request_id: {}]", status, request_id);

        if !status.is_success() {
            // Capture headers for retry-after parsing
            let headers = response.headers().clone();
            // Oversized error bodies are dropped; the status alone is mapped
            let body = match self.check_content_length(&response) {
                Ok(()) => response
                    .text()
                    .await
                    .ok()
                    .filter(|b| b.len() <= self.max_response_size),
                Err(_) => None,
            };

            warn!(
                "Request to {} failed with status {} [request_id: {}]",
                options.call_kind.endpoint(),
                status,
                request_id
            );

            return Err(map_http_error(status, Some(&headers), body, request_id));
        }

        self.check_content_length(&response)?;

        let response_text = response.text().await.map_err(|e| ProviderError::Network(format!(
            "Failed to read response body: {} [request_id: {}]",
            e, request_id
        )))?;

        // Chunked responses carry no content length
        if response_text.len() > self.max_response_size {
            return Err(ProviderError::ResponseTooLarge {
                size: response_text.len(),
                max: self.max_response_size,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!(
                "Failed to parse response from {} [request_id: {}]: {}",
                options.call_kind.endpoint(),
                request_id,
                e
            );
            ProviderError::ParseError(format!("{} [request_id: {}]", e, request_id))
        })
    }

    /// Check response size to prevent OOM
    fn check_content_length(&self, response: &Response) -> ProviderResult<()> {
        if let Some(content_length) = response.content_length() {
            let size = usize::try_from(content_length).unwrap_or(usize::MAX);
            if size > self.max_response_size {
                return Err(ProviderError::ResponseTooLarge {
                    size,
                    max: self.max_response_size,
                });
            }
        }

        Ok(())
    }
}

/// Build the headers sent with every request
fn build_headers(config: &ProviderConfig) -> ProviderResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret()))
        .map_err(|_| {
            ProviderError::Configuration("API key contains invalid header characters".to_string())
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    if let Some(org_id) = &config.organization_id {
        let value = HeaderValue::from_str(org_id).map_err(|_| {
            ProviderError::Configuration(format!("Invalid organization id: {}", org_id))
        })?;
        headers.insert("OpenAI-Organization", value);
    }

    for (name, value) in &config.extra_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ProviderError::Configuration(format!("Invalid header name: {}", name))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            ProviderError::Configuration(format!("Invalid value for header {}", name))
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

fn map_transport_error(e: reqwest::Error, request_id: Uuid) -> ProviderError {
    if e.is_timeout() {
        warn!("Request timeout [request_id: {}]", request_id);
        ProviderError::Timeout(format!("{} [request_id: {}]", e, request_id))
    } else if e.is_connect() {
        error!("Connection error [request_id: {}]: {}", request_id, e);
        ProviderError::Network(format!("Connection failed: {} [request_id: {}]", e, request_id))
    } else {
        error!("Request error [request_id: {}]: {}", request_id, e);
        ProviderError::Network(format!("{} [request_id: {}]", e, request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let config = ProviderConfig::new("k", "http://localhost:8000/v1/", "m");
        let client = HttpClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/v1");
        assert_eq!(
            client.build_url(CallKind::ChatCompletions),
            "http://localhost:8000/v1/chat/completions"
        );
        assert_eq!(client.build_url(CallKind::ListModels), "http://localhost:8000/v1/models");
    }

    #[test]
    fn test_headers_include_auth_org_and_extras() {
        let config = ProviderConfig::new("sk-test", "http://localhost:8000/v1", "m")
            .with_organization("org-1")
            .with_header("X-Title", "compat");
        let headers = build_headers(&config).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get("OpenAI-Organization").unwrap(), "org-1");
        assert_eq!(headers.get("x-title").unwrap(), "compat");
    }

    #[test]
    fn test_invalid_api_key_is_configuration_error() {
        let config = ProviderConfig::new("bad\nkey", "http://localhost:8000/v1", "m");
        assert!(matches!(
            HttpClient::from_config(&config),
            Err(ProviderError::Configuration(_))
        ));
    }
}
