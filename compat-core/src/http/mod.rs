//! HTTP layer for talking to OpenAI-compatible endpoints
//!
//! This module owns the transport details the adapter should not care about:
//! - one long-lived `reqwest` client per adapter
//! - auth and extra headers
//! - error mapping from HTTP status and error envelopes
//! - request ID generation for log correlation

pub mod client;
pub mod error;

pub use client::HttpClient;
pub use error::{map_http_error, parse_retry_after};

use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of API call being made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    /// `POST /chat/completions`
    ChatCompletions,
    /// `GET /models`
    ListModels,
}

impl CallKind {
    /// Get the endpoint path for this call kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            CallKind::ChatCompletions => "/chat/completions",
            CallKind::ListModels => "/models",
        }
    }

    /// HTTP method used for this call kind
    pub fn method(&self) -> Method {
        match self {
            CallKind::ChatCompletions => Method::POST,
            CallKind::ListModels => Method::GET,
        }
    }
}

/// Options for a single HTTP request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Type of API call
    pub call_kind: CallKind,

    /// Unique request ID for correlation
    pub request_id: Uuid,
}

impl RequestOptions {
    /// Create new request options with a generated request ID
    pub fn new(call_kind: CallKind) -> Self {
        Self {
            call_kind,
            request_id: Uuid::new_v4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_kind_endpoints() {
        assert_eq!(CallKind::ChatCompletions.endpoint(), "/chat/completions");
        assert_eq!(CallKind::ListModels.endpoint(), "/models");
        assert_eq!(CallKind::ChatCompletions.method(), Method::POST);
        assert_eq!(CallKind::ListModels.method(), Method::GET);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestOptions::new(CallKind::ListModels);
        let b = RequestOptions::new(CallKind::ListModels);
        assert_ne!(a.request_id, b.request_id);
    }
}
