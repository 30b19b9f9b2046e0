//! Compat Core Library
//!
//! An adapter that lets an agent runtime talk to any OpenAI-compatible chat
//! completion endpoint, with model catalog bookkeeping.

pub mod config;
pub mod http;
pub mod json_repair;
pub mod protocol;
pub mod providers;

pub use config::ProviderConfig;
pub use protocol::{ChatRequest, ChatResponse, Message, ToolCallRequest, ToolDefinition};
pub use providers::{LlmProvider, OpenAICompatProvider, ProviderError, ProviderResult};

/// Returns the version of the Compat Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
