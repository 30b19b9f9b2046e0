//! Protocol module for the runtime-facing request/response structures
//!
//! This module defines the boundary types shared between the calling runtime
//! and the provider adapter. Inbound shapes follow the OpenAI chat format;
//! outbound shapes are provider-neutral.

pub mod types;

pub use types::{
    ChatRequest, ChatResponse, FunctionCall, FunctionDefinition, Message, MessageContent,
    MessageRole, ToolCall, ToolCallRequest, ToolDefinition, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE, FINISH_REASON_ERROR, FINISH_REASON_STOP,
};
