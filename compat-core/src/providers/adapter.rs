//! Provider adapter trait
//!
//! Defines the operations a runtime relies on from any chat provider.

use crate::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;

/// Core trait implemented by chat providers
///
/// `chat` never fails: errors come back as a response whose finish reason is
/// `"error"`. Catalog operations take `&mut self`; callers sharing an adapter
/// across tasks serialize access themselves.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Send one chat completion request
    async fn chat(&self, request: ChatRequest) -> ChatResponse;

    /// Model configured at construction
    fn default_model(&self) -> &str;

    /// Model used when a request does not override it
    fn current_model(&self) -> &str;

    /// Switch the session model, returning whether the switch happened
    fn set_model(&mut self, name: &str) -> bool;

    /// Models the endpoint serves, loaded on first use
    async fn list_models(&mut self) -> Vec<String>;

    /// Reload the model list, returning whether the fetch succeeded
    async fn refresh_models(&mut self) -> bool;
}
