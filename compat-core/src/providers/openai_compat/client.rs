//! OpenAI-compatible client implementation

use super::catalog::ModelCatalog;
use super::converter::{from_wire_model_list, from_wire_response, to_wire_request};
use super::types::{WireModelList, WireResponse};
use crate::config::{ProviderConfig, SecretString};
use crate::http::{CallKind, HttpClient, RequestOptions};
use crate::protocol::{ChatRequest, ChatResponse};
use crate::providers::{LlmProvider, ProviderResult};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Adapter for any endpoint speaking the OpenAI chat completion API
pub struct OpenAICompatProvider {
    config: ProviderConfig,
    http: HttpClient,
    catalog: ModelCatalog,
}

impl OpenAICompatProvider {
    /// Create a new provider
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let http = HttpClient::from_config(&config)?;
        let catalog = ModelCatalog::new(config.default_model.clone());

        Ok(Self {
            config,
            http,
            catalog,
        })
    }

    /// Create a provider from the three required settings
    pub fn with_credentials(
        api_key: impl Into<SecretString>,
        api_base: impl Into<String>,
        default_model: impl Into<String>,
    ) -> ProviderResult<Self> {
        Self::new(ProviderConfig::new(api_key, api_base, default_model))
    }

    /// Configuration this provider was built with
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Whether the model catalog has been loaded
    pub fn models_loaded(&self) -> bool {
        self.catalog.is_loaded()
    }

    /// Chat call with errors kept as values
    pub async fn try_chat(&self, request: &ChatRequest) -> ProviderResult<ChatResponse> {
        let body = to_wire_request(request, self.catalog.current());
        debug!(
            "Sending chat request: model={}, messages={}, tools={}",
            body.model,
            body.messages.len(),
            body.tools.as_ref().map_or(0, Vec::len)
        );

        let response: WireResponse = self
            .http
            .post_json(RequestOptions::new(CallKind::ChatCompletions), &body)
            .await?;

        from_wire_response(response)
    }

    /// Fetch the model listing from the endpoint
    pub async fn fetch_models(&self) -> ProviderResult<Vec<String>> {
        let list: WireModelList = self
            .http
            .get_json(RequestOptions::new(CallKind::ListModels))
            .await?;

        let models = from_wire_model_list(list);
        info!(
            "{}: fetched {} models from {}",
            self.name(),
            models.len(),
            self.http.base_url()
        );
        Ok(models)
    }

    async fn ensure_models_loaded(&mut self) {
        if self.catalog.is_loaded() {
            return;
        }

        let models = match self.fetch_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!("{}: failed to fetch models: {}", self.name(), e);
                Vec::new()
            }
        };
        self.catalog.replace(models);
    }
}

#[async_trait]
impl LlmProvider for OpenAICompatProvider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    async fn chat(&self, request: ChatRequest) -> ChatResponse {
        match self.try_chat(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{}: chat request failed: {}", self.name(), e);
                ChatResponse::error(format!("Error: {}", e))
            }
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn current_model(&self) -> &str {
        self.catalog.current()
    }

    fn set_model(&mut self, name: &str) -> bool {
        let verified = self.catalog.is_loaded();
        if !self.catalog.select(name) {
            return false;
        }

        if verified {
            info!("{}: switched to model {}", self.name(), name);
        } else {
            info!("{}: set model to {} (not verified)", self.name(), name);
        }
        true
    }

    async fn list_models(&mut self) -> Vec<String> {
        self.ensure_models_loaded().await;
        self.catalog.models().to_vec()
    }

    async fn refresh_models(&mut self) -> bool {
        match self.fetch_models().await {
            Ok(models) => {
                self.catalog.replace(models);
                true
            }
            Err(e) => {
                // Prior catalog and loaded flag stay as they were
                warn!("{}: failed to refresh models: {}", self.name(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAICompatProvider {
        OpenAICompatProvider::with_credentials("sk-test", "http://localhost:8000/v1", "local-model")
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let provider = provider();
        assert_eq!(provider.name(), "openai_compat");
        assert_eq!(provider.default_model(), "local-model");
        assert_eq!(provider.current_model(), "local-model");
        assert!(!provider.models_loaded());
    }

    #[test]
    fn test_set_model_before_load() {
        let mut provider = provider();
        assert!(provider.set_model("gpt-x"));
        assert_eq!(provider.current_model(), "gpt-x");
        assert_eq!(provider.default_model(), "local-model");
        assert!(!provider.set_model(""));
        assert_eq!(provider.current_model(), "gpt-x");
    }
}
