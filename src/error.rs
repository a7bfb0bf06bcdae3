//! Error types for the search API client
//!
//! Provides a unified error taxonomy using thiserror. Every failure mode of
//! a request is classified into a small closed set of kinds so upstream
//! logic can decide whether to retry, surface to the user, or log silently.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the search API client.
///
/// Each variant fixes its own HTTP status code and machine-readable code.
/// The optional `context` on [`ApiError::Api`] is an opaque diagnostic bag
/// and is never used for control flow.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection refused, ...)
    #[error("Network error: {message}")]
    Network {
        /// Description of the underlying transport failure
        message: String,
    },

    /// A request attempt exceeded its deadline
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The per-attempt timeout that was exceeded, in milliseconds
        timeout_ms: u64,
    },

    /// The backend rejected the request with HTTP 429
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimit {
        /// Server-supplied retry-after hint in seconds (default 60)
        retry_after_secs: u64,
    },

    /// The backend (or client-side validation) rejected the request data
    #[error("Validation failed for field '{field}': {message}")]
    Validation {
        /// The offending field
        field: String,
        /// Human-readable reason
        message: String,
    },

    /// Any other non-2xx response, including server errors
    #[error("API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Machine-readable error code
        code: String,
        /// Human-readable message
        message: String,
        /// Opaque diagnostic payload, if the server supplied one
        context: Option<Value>,
    },
}

impl ApiError {
    // == Status Code ==
    /// Returns the HTTP status code associated with this error.
    ///
    /// Transport-level failures (network, timeout) carry status 0 since no
    /// HTTP response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Network { .. } | ApiError::Timeout { .. } => 0,
            ApiError::RateLimit { .. } => 429,
            ApiError::Validation { .. } => 400,
            ApiError::Api { status, .. } => *status,
        }
    }

    // == Code ==
    /// Returns the machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Network { .. } => "NETWORK_ERROR",
            ApiError::Timeout { .. } => "TIMEOUT",
            ApiError::RateLimit { .. } => "RATE_LIMITED",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Api { code, .. } => code,
        }
    }

    // == Is Retryable ==
    /// Decides whether a failed attempt may be retried.
    ///
    /// Timeouts, network failures and rate limits are always retryable.
    /// Generic API errors are retryable when the status is a server error
    /// (>= 500) or 429. Validation errors are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout { .. } | ApiError::Network { .. } | ApiError::RateLimit { .. } => {
                true
            }
            ApiError::Api { status, .. } => *status >= 500 || *status == 429,
            ApiError::Validation { .. } => false,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the search API client.
pub type Result<T> = std::result::Result<T, ApiError>;

// == Error Body ==
/// Shape of a JSON error body as returned by the backend.
///
/// All fields are optional; backends differ in how much detail they attach.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
    #[serde(default, rename = "retryAfter")]
    retry_after: Option<u64>,
    #[serde(default)]
    context: Option<Value>,
}

// == Parse Error Response ==
/// Builds a typed [`ApiError`] from a non-2xx HTTP response.
///
/// Attempts to decode a JSON error body and maps the status code:
/// - 400 -> [`ApiError::Validation`] (reads the offending `field`)
/// - 429 -> [`ApiError::RateLimit`] (reads `retryAfter`, default 60s)
/// - 5xx -> generic [`ApiError::Api`] with code `SERVER_ERROR`
/// - anything else -> generic [`ApiError::Api`] with the server's
///   `code`/`message` when present
///
/// If the body cannot be decoded as JSON, returns a generic error with
/// code `PARSE_ERROR` and no context.
pub async fn parse_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();

    let body = match response.json::<ErrorBody>().await {
        Ok(body) => body,
        Err(_) => {
            return ApiError::Api {
                status,
                code: "PARSE_ERROR".to_string(),
                message: format!("Failed to parse error response (HTTP {})", status),
                context: None,
            }
        }
    };

    from_error_body(status, body)
}

/// Maps a decoded error body and status code to a typed error.
fn from_error_body(status: u16, body: ErrorBody) -> ApiError {
    let message = body
        .message
        .unwrap_or_else(|| format!("Request failed with HTTP {}", status));

    match status {
        400 => ApiError::Validation {
            field: body.field.unwrap_or_else(|| "unknown".to_string()),
            message,
        },
        429 => ApiError::RateLimit {
            retry_after_secs: body.retry_after.unwrap_or(60),
        },
        500 | 502 | 503 | 504 => ApiError::Api {
            status,
            code: body.code.unwrap_or_else(|| "SERVER_ERROR".to_string()),
            message,
            context: body.context,
        },
        _ => ApiError::Api {
            status,
            code: body.code.unwrap_or_else(|| "HTTP_ERROR".to_string()),
            message,
            context: body.context,
        },
    }
}
