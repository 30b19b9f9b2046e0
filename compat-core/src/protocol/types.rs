//! Core protocol types exchanged with the calling runtime
//!
//! Inbound shapes (`Message`, `ToolDefinition`) mirror the OpenAI chat
//! completion format so a runtime can hand them over without conversion.
//! Outbound shapes (`ChatResponse`, `ToolCallRequest`) are provider-neutral
//! and are the only types callers should depend on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Finish reason reported when the vendor omits one
pub const FINISH_REASON_STOP: &str = "stop";

/// Finish reason of the sentinel response produced for a failed call
pub const FINISH_REASON_ERROR: &str = "error";

/// Default output token bound for a chat request
pub const DEFAULT_MAX_TOKENS: i64 = 4096;

/// Default sampling temperature for a chat request
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions that guide the model's behavior
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
    /// Tool response
    Tool,
    /// Legacy function call result
    Function,
}

/// Content of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Structured content parts (text, image_url, ...), forwarded untouched
    Parts(Vec<Value>),
}

impl MessageContent {
    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(s) => s.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }

    /// Get text representation
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s.as_str()),
            MessageContent::Parts(_) => None,
        }
    }
}

/// A message in the conversation
///
/// `content` is always serialized, including as `null`, so that a sanitized
/// message never silently drops the field. Unknown vendor fields survive a
/// round trip through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,

    /// Content of the message
    #[serde(default)]
    pub content: Option<MessageContent>,

    /// Optional name for the message sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tool calls issued by an assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Tool call ID (for tool response messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Reasoning trace echoed back on assistant messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,

    /// Vendor-specific fields carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    fn with_role(role: MessageRole, content: Option<MessageContent>) -> Self {
        Self {
            role,
            content,
            name: None,
            tool_calls: None,
            tool_call_id: None,
            reasoning_content: None,
            extra: Map::new(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, Some(MessageContent::Text(content.into())))
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, Some(MessageContent::Text(content.into())))
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, Some(MessageContent::Text(content.into())))
    }

    /// Create an assistant message that only carries tool calls
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        let mut msg = Self::with_role(MessageRole::Assistant, None);
        msg.tool_calls = Some(tool_calls);
        msg
    }

    /// Create a tool response message
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut msg = Self::with_role(MessageRole::Tool, Some(MessageContent::Text(content.into())));
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }

    /// Create a message with an explicit (possibly absent) content
    pub fn new(role: MessageRole, content: Option<MessageContent>) -> Self {
        Self::with_role(role, content)
    }

    /// True when content is absent or empty
    pub fn has_empty_content(&self) -> bool {
        self.content.as_ref().map_or(true, MessageContent::is_empty)
    }
}

/// Function call carried on an assistant message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to call
    pub name: String,

    /// Arguments to the function as a JSON string
    pub arguments: String,
}

/// Tool call carried on an assistant message in the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,

    /// Type of tool (usually "function")
    #[serde(rename = "type")]
    pub tool_type: String,

    /// Function information
    pub function: FunctionCall,
}

/// Tool definition for function calling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Type of tool (usually "function")
    #[serde(rename = "type")]
    pub tool_type: String,

    /// Function definition
    pub function: FunctionDefinition,

    /// Vendor-specific fields carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolDefinition {
    /// Create a function tool definition
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,

    /// Function description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameters schema (JSON Schema)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,

    /// Vendor-specific fields (e.g. `strict`) carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Chat request as handed over by the runtime
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Messages in the conversation
    pub messages: Vec<Message>,

    /// Tool definitions the model may choose to call
    pub tools: Option<Vec<ToolDefinition>>,

    /// Model override for this call only
    pub model: Option<String>,

    /// Maximum tokens to generate; values below 1 are raised to 1 on the wire
    pub max_tokens: i64,

    /// Sampling temperature
    pub temperature: f32,
}

impl ChatRequest {
    /// Create a new chat request with default sampling parameters
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: None,
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set tool definitions
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Override the model for this call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Call identifier, echoed back in the tool response message
    pub id: String,

    /// Tool name
    pub name: String,

    /// Parsed arguments
    pub arguments: Value,
}

/// Normalized result of a chat call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text content
    pub content: Option<String>,

    /// Tool calls in the order the model emitted them
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,

    /// Why generation stopped
    pub finish_reason: String,

    /// Token counts keyed by `prompt_tokens`, `completion_tokens`, `total_tokens`
    #[serde(default)]
    pub usage: BTreeMap<String, u64>,

    /// Reasoning trace, for endpoints that expose one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

impl ChatResponse {
    /// Sentinel response for a failed call
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: Some(message.into()),
            tool_calls: Vec::new(),
            finish_reason: FINISH_REASON_ERROR.to_string(),
            usage: BTreeMap::new(),
            reasoning_content: None,
        }
    }

    /// Whether the model requested any tool calls
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Whether this is the sentinel error response
    pub fn is_error(&self) -> bool {
        self.finish_reason == FINISH_REASON_ERROR
    }
}
