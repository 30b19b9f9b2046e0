//! Conversion between the runtime protocol and the OpenAI-compatible wire format

use super::types::{WireModelList, WireRequest, WireResponse, WireToolCall, WireUsage};
use crate::json_repair;
use crate::protocol::{
    ChatRequest, ChatResponse, Message, MessageContent, ToolCallRequest, FINISH_REASON_STOP,
};
use crate::providers::{ProviderError, ProviderResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// Build the wire request for `request`, falling back to `current_model`
pub fn to_wire_request(request: &ChatRequest, current_model: &str) -> WireRequest {
    let model = request
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(current_model)
        .to_string();

    let tools = request.tools.as_ref().filter(|t| !t.is_empty()).cloned();
    let tool_choice = tools.as_ref().map(|_| Value::String("auto".to_string()));

    WireRequest {
        model,
        messages: sanitize_empty_content(&request.messages),
        max_tokens: clamp_max_tokens(request.max_tokens),
        temperature: request.temperature,
        tools,
        tool_choice,
    }
}

/// Replace absent or empty message content with an explicit empty string
///
/// Several endpoints reject `null` content on assistant and tool messages.
pub fn sanitize_empty_content(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .map(|message| {
            if message.has_empty_content() {
                let mut message = message.clone();
                message.content = Some(MessageContent::Text(String::new()));
                message
            } else {
                message.clone()
            }
        })
        .collect()
}

/// Clamp the output token bound into `1..=u32::MAX`
pub fn clamp_max_tokens(max_tokens: i64) -> u32 {
    u32::try_from(max_tokens.max(1)).unwrap_or(u32::MAX)
}

/// Convert a wire response into the runtime-neutral response
pub fn from_wire_response(response: WireResponse) -> ProviderResult<ChatResponse> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("response contains no choices".to_string()))?;

    let message = choice.message;
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(from_wire_tool_call)
        .collect();

    Ok(ChatResponse {
        content: message.content,
        tool_calls,
        finish_reason: choice
            .finish_reason
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| FINISH_REASON_STOP.to_string()),
        usage: response.usage.map(from_wire_usage).unwrap_or_default(),
        reasoning_content: message.reasoning_content.filter(|r| !r.is_empty()),
    })
}

fn from_wire_tool_call(call: WireToolCall) -> ToolCallRequest {
    let arguments = match call.function.arguments {
        Value::String(raw) => json_repair::loads(&raw),
        Value::Null => Value::Object(Default::default()),
        structured => structured,
    };

    ToolCallRequest {
        id: call.id.unwrap_or_default(),
        name: call.function.name.unwrap_or_default(),
        arguments,
    }
}

/// Present counts only; `null` or missing counts are left out
fn from_wire_usage(usage: WireUsage) -> BTreeMap<String, u64> {
    [
        ("prompt_tokens", usage.prompt_tokens),
        ("completion_tokens", usage.completion_tokens),
        ("total_tokens", usage.total_tokens),
    ]
    .into_iter()
    .filter_map(|(key, count)| count.map(|c| (key.to_string(), c)))
    .collect()
}

/// Model identifiers in server listing order
pub fn from_wire_model_list(list: WireModelList) -> Vec<String> {
    list.data.into_iter().map(|m| m.id).collect()
}
