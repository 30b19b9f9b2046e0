//! Shared helpers for integration tests

#![allow(dead_code)]

use compat_core::OpenAICompatProvider;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Install a test-friendly subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Provider pointed at `{mock}/v1`
pub fn provider_for(server: &MockServer) -> OpenAICompatProvider {
    init_tracing();
    OpenAICompatProvider::with_credentials("test-key", format!("{}/v1", server.uri()), "local-model")
        .expect("Failed to create provider")
}

/// Provider pointed at a port nothing listens on
pub fn unreachable_provider() -> OpenAICompatProvider {
    init_tracing();
    OpenAICompatProvider::with_credentials("test-key", "http://127.0.0.1:1/v1", "local-model")
        .expect("Failed to create provider")
}

/// A plain assistant reply
pub fn text_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "local-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
    })
}

/// An assistant reply carrying the given `(id, name, arguments)` tool calls
pub fn tool_call_completion(calls: &[(&str, &str, &str)]) -> Value {
    let tool_calls: Vec<Value> = calls
        .iter()
        .map(|(id, name, arguments)| {
            json!({
                "id": id,
                "type": "function",
                "function": {"name": name, "arguments": arguments}
            })
        })
        .collect();

    json!({
        "id": "chatcmpl-456",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "local-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": null, "tool_calls": tool_calls},
            "finish_reason": "tool_calls"
        }]
    })
}

/// A `GET /models` listing
pub fn model_listing(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "object": "model", "owned_by": "system"}))
        .collect();
    json!({"object": "list", "data": data})
}
