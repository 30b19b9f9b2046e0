//! OpenAI-compatible wire types
//!
//! These types match the chat completion and model listing formats and are
//! used for serialization/deserialization on the wire only. Response fields
//! mostly default, since self-hosted servers omit many of them.

use crate::protocol::{Message, ToolDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct WireRequest {
    pub model: String,

    pub messages: Vec<Message>,

    pub max_tokens: u32,

    pub temperature: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<WireChoice>,

    #[serde(default)]
    pub usage: Option<WireUsage>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct WireChoice {
    #[serde(default)]
    pub index: usize,

    pub message: WireMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice
#[derive(Debug, Default, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,

    /// Reasoning trace exposed by DeepSeek-style and vLLM reasoning servers
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

/// Tool call inside an assistant message
#[derive(Debug, Deserialize)]
pub struct WireToolCall {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub tool_type: Option<String>,

    pub function: WireFunctionCall,
}

/// Function name and arguments of a tool call
#[derive(Debug, Deserialize)]
pub struct WireFunctionCall {
    #[serde(default)]
    pub name: Option<String>,

    /// Normally a JSON-encoded string; some servers send an object
    #[serde(default)]
    pub arguments: Value,
}

/// Token usage; any count may be missing or `null`
#[derive(Debug, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,

    #[serde(default)]
    pub completion_tokens: Option<u64>,

    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// `GET /models` response
#[derive(Debug, Deserialize)]
pub struct WireModelList {
    #[serde(default)]
    pub object: Option<String>,

    pub data: Vec<WireModel>,
}

/// One entry of the model listing
#[derive(Debug, Deserialize)]
pub struct WireModel {
    pub id: String,

    #[serde(default)]
    pub object: Option<String>,

    #[serde(default)]
    pub owned_by: Option<String>,
}
