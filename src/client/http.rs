//! HTTP Client Module
//!
//! Executes one logical GET/POST against the backend, bounding latency per
//! attempt with a timeout and retrying transient failures with exponential
//! backoff. This is the single retry point in the whole system; no other
//! layer retries.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{parse_error_response, ApiError, Result};

// == Retry Config ==
/// Governs the backoff loop for one logical request.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total attempts, initial try included (minimum 1)
    pub attempts: u32,
    /// Base delay; the sleep after attempt `n` is `delay * 2^(n-1)`
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(300),
        }
    }
}

// == Request Options ==
/// Per-call options for [`HttpClient::request`].
///
/// `timeout` and `retry` fall back to the client's defaults when unset.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Additional request headers
    pub headers: Vec<(String, String)>,
    /// JSON body (POST only)
    pub body: Option<Value>,
    /// Per-attempt timeout override
    pub timeout: Option<Duration>,
    /// Retry policy override
    pub retry: Option<RetryConfig>,
}

// == HTTP Client ==
/// Retrying HTTP client over reqwest.
///
/// Timeout semantics are per-attempt, not per-logical-call: a request with
/// N attempts has a worst-case latency of `N * timeout` plus the backoff
/// delays in between.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    default_timeout: Duration,
    default_retry: RetryConfig,
}

impl HttpClient {
    // == Constructor ==
    /// Creates a client with the given per-attempt timeout and retry policy.
    pub fn new(default_timeout: Duration, default_retry: RetryConfig) -> Self {
        Self {
            inner: ReqwestClient::new(),
            default_timeout,
            default_retry,
        }
    }

    /// Creates a client from the shared configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.request_timeout,
            RetryConfig {
                attempts: config.retry_attempts,
                delay: config.retry_delay,
            },
        )
    }

    // == Request ==
    /// Executes one logical request and decodes the JSON payload.
    ///
    /// Per attempt: the call is bounded by the timeout; a non-2xx response
    /// is mapped to a typed error; a transport rejection becomes a network
    /// or timeout error. After a failed attempt a non-retryable error is
    /// rethrown immediately; a retryable one sleeps `delay * 2^(n-1)` and
    /// retries until attempts are exhausted, then the last error is thrown.
    ///
    /// A successful payload shaped `{"success": true, "data": ...}` is
    /// unwrapped to `data`; any other payload is returned verbatim. This
    /// is the client's one normalization rule and applies to every
    /// operation identically.
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        options: RequestOptions,
    ) -> Result<Value> {
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let retry = options.retry.unwrap_or(self.default_retry);
        let attempts = retry.attempts.max(1);

        for attempt in 1..=attempts {
            debug!(%method, %url, attempt, "sending request");

            match self.execute(method.clone(), url.clone(), &options, timeout).await {
                Ok(payload) => return Ok(payload),
                Err(err) => {
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    if attempt == attempts {
                        warn!(%method, %url, attempts, error = %err, "retries exhausted");
                        return Err(err);
                    }

                    let delay = backoff_delay(retry.delay, attempt);
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying after backoff"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        // The loop always returns on the final attempt
        Err(ApiError::Network {
            message: "retry loop exhausted without producing a result".to_string(),
        })
    }

    // == Get ==
    /// Convenience wrapper fixing the method to GET.
    pub async fn get(&self, url: Url, options: RequestOptions) -> Result<Value> {
        self.request(Method::GET, url, options).await
    }

    // == Post ==
    /// Convenience wrapper fixing the method to POST with a JSON body.
    pub async fn post(&self, url: Url, body: Value, mut options: RequestOptions) -> Result<Value> {
        options.body = Some(body);
        self.request(Method::POST, url, options).await
    }

    /// Runs a single attempt: send, classify, decode, unwrap.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        options: &RequestOptions,
        timeout: Duration,
    ) -> Result<Value> {
        let mut builder = self.inner.request(method, url).timeout(timeout);

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| classify_transport_error(&err, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(response).await);
        }

        // The per-request timeout covers the body read too, so a transport
        // failure can still surface here; only genuine decode failures are
        // parse errors.
        let payload: Value = response.json().await.map_err(|err| {
            if err.is_decode() && !err.is_timeout() {
                ApiError::Api {
                    status: status.as_u16(),
                    code: "PARSE_ERROR".to_string(),
                    message: "Failed to parse response body as JSON".to_string(),
                    context: None,
                }
            } else {
                classify_transport_error(&err, timeout)
            }
        })?;

        Ok(unwrap_envelope(payload))
    }
}

/// Maps a transport-level reqwest error to the taxonomy.
fn classify_transport_error(err: &reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        ApiError::Network {
            message: err.to_string(),
        }
    }
}

/// Exponential backoff: `base * 2^(attempt-1)`, shift capped to avoid overflow.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let shift = attempt.saturating_sub(1).min(8);
    base.saturating_mul(1u32 << shift)
}

/// Unwraps the `{"success": true, "data": ...}` response envelope.
///
/// Any payload not matching the envelope shape is returned unchanged.
fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map)
            if map.get("success") == Some(&Value::Bool(true)) && map.contains_key("data") =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let base = Duration::from_millis(100);

        assert_eq!(backoff_delay(base, 1), Duration::from_millis(100));
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(200));
        assert_eq!(backoff_delay(base, 3), Duration::from_millis(400));
        assert_eq!(backoff_delay(base, 4), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_shift_is_capped() {
        let base = Duration::from_millis(1);
        assert_eq!(backoff_delay(base, 40), backoff_delay(base, 9));
    }

    #[test]
    fn test_backoff_zero_base() {
        assert_eq!(backoff_delay(Duration::ZERO, 3), Duration::ZERO);
    }

    #[test]
    fn test_unwrap_envelope() {
        let enveloped = json!({"success": true, "data": {"products": [], "total": 0}});
        assert_eq!(unwrap_envelope(enveloped), json!({"products": [], "total": 0}));
    }

    #[test]
    fn test_unwrap_passes_bare_payload_through() {
        let bare = json!({"products": [], "total": 0});
        assert_eq!(unwrap_envelope(bare.clone()), bare);
    }

    #[test]
    fn test_unwrap_ignores_failed_envelope() {
        // success != true means the shape is not the envelope
        let not_envelope = json!({"success": false, "data": {"x": 1}});
        assert_eq!(unwrap_envelope(not_envelope.clone()), not_envelope);
    }

    #[test]
    fn test_unwrap_requires_data_field() {
        let missing_data = json!({"success": true, "total": 3});
        assert_eq!(unwrap_envelope(missing_data.clone()), missing_data);
    }

    #[test]
    fn test_unwrap_non_object_payloads() {
        assert_eq!(unwrap_envelope(json!(["a", "b"])), json!(["a", "b"]));
        assert_eq!(unwrap_envelope(json!(42)), json!(42));
    }

    #[test]
    fn test_retry_config_default() {
        let retry = RetryConfig::default();
        assert_eq!(retry.attempts, 3);
        assert_eq!(retry.delay, Duration::from_millis(300));
    }
}
