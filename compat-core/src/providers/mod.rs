//! Provider abstraction
//!
//! This module holds the provider trait the runtime programs against, the
//! shared error type, and the OpenAI-compatible adapter.

pub mod adapter;
pub mod error;
pub mod openai_compat;

pub use adapter::LlmProvider;
pub use error::{ProviderError, ProviderResult};

// Re-export concrete providers
pub use openai_compat::OpenAICompatProvider;
