//! HTTP error mapping utilities

use crate::providers::ProviderError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

/// Map HTTP status code and response body to a ProviderError
pub fn map_http_error(
    status: StatusCode,
    headers: Option<&HeaderMap>,
    body: Option<String>,
    request_id: Uuid,
) -> ProviderError {
    let error_details = body
        .as_deref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|v| extract_error_details(&v));

    let error_message = error_details
        .as_ref()
        .map(|d| d.message.clone())
        .or_else(|| body.clone().filter(|b| !b.trim().is_empty()))
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    let message_with_id = format!("{} [request_id: {}]", error_message, request_id);

    // Error envelopes with a recognised type take precedence over the status
    if let Some(kind) = error_details.as_ref().and_then(|d| d.kind.as_deref()) {
        match kind {
            "invalid_api_key" | "authentication_error" => {
                return ProviderError::Authentication(message_with_id)
            }
            "model_not_found" => return ProviderError::ModelNotFound(message_with_id),
            _ => {}
        }
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Authentication(message_with_id)
        }

        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = headers
                .and_then(|h| h.get(RETRY_AFTER))
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .or_else(|| error_details.as_ref().and_then(|d| d.retry_after_seconds));

            ProviderError::RateLimit {
                message: message_with_id,
                retry_after_secs,
            }
        }

        StatusCode::NOT_FOUND => ProviderError::ModelNotFound(
            extract_model_from_error(&error_message).unwrap_or(message_with_id),
        ),

        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::Timeout(message_with_id)
        }

        status if status.is_server_error() => ProviderError::ServiceUnavailable(message_with_id),

        status if status.is_client_error() => ProviderError::InvalidRequest(message_with_id),

        _ => ProviderError::Api {
            code: format!("HTTP_{}", status.as_u16()),
            message: message_with_id,
        },
    }
}

/// Error details extracted from response body
struct ErrorDetails {
    message: String,
    kind: Option<String>,
    retry_after_seconds: Option<u64>,
}

/// Extract error details from JSON response
fn extract_error_details(json: &Value) -> Option<ErrorDetails> {
    // OpenAI format: { "error": { "message": "...", "type": "...", "code": "..." } }
    if let Some(error) = json.get("error") {
        if let Some(message) = error.get("message").and_then(Value::as_str) {
            let kind = error
                .get("code")
                .and_then(Value::as_str)
                .or_else(|| error.get("type").and_then(Value::as_str))
                .map(str::to_string);
            return Some(ErrorDetails {
                message: message.to_string(),
                kind,
                retry_after_seconds: error.get("retry_after").and_then(Value::as_u64),
            });
        }
    }

    // Generic format: { "message": "..." } as served by several local gateways
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        return Some(ErrorDetails {
            message: message.to_string(),
            kind: None,
            retry_after_seconds: json.get("retry_after").and_then(Value::as_u64),
        });
    }

    if let Some(error) = json.get("error").and_then(Value::as_str) {
        return Some(ErrorDetails {
            message: error.to_string(),
            kind: None,
            retry_after_seconds: None,
        });
    }

    None
}

/// Try to extract model name from error message
fn extract_model_from_error(message: &str) -> Option<String> {
    for quote in ['\'', '"', '`'] {
        let pattern = format!("model {}", quote);
        if let Some(start) = message.find(&pattern) {
            let start = start + pattern.len();
            if let Some(end) = message[start..].find(quote) {
                return Some(message[start..start + end].to_string());
            }
        }
    }

    None
}

/// Parse Retry-After header value
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    // HTTP-date values are not honoured
    header_value.trim().parse::<u64>().ok()
}
