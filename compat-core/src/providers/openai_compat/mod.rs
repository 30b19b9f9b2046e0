//! OpenAI-compatible provider implementation
//!
//! This module provides an adapter for any endpoint that implements the
//! OpenAI chat completion and model listing APIs (OpenAI itself, vLLM,
//! llama.cpp, Ollama, LM Studio, hosted gateways).

pub mod catalog;
mod client;
pub mod converter;
pub mod types;

pub use catalog::ModelCatalog;
pub use client::OpenAICompatProvider;
pub use types::{WireModelList, WireRequest, WireResponse};
