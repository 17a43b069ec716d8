//! Shared HTTP plumbing
//!
//! Sends a prepared `RequestBuilder`, logs it, classifies transport-level
//! failures and retries the transient ones. Response decoding is left to the
//! caller, which knows the API envelope.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound for a server supplied `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// Raw HTTP response: status code and body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends one request and returns the status code and body.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`], 502/503/504 become
    /// [`ProviderError::NetworkError`]; every other status is returned to the
    /// caller so the API envelope can be inspected.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<HttpResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Retry-After has to be read before the body consumes the response
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        Ok(HttpResponse { status, body })
    }

    /// Same as [`execute_request`](Self::execute_request), retrying transient
    /// failures up to `max_retries` times.
    ///
    /// Only [`ProviderError::is_retryable`] errors are retried. The delay is the
    /// server's `Retry-After` (capped at 30s) when rate limited, otherwise
    /// exponential backoff starting at 100ms and capped at 10s.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<HttpResponse, ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, provider_name, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, provider_name, method_name, url)
                    .await;
            };

            match Self::execute_request(req, provider_name, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }

    /// Parses a JSON body, logging the raw text on failure.
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!("[{provider_name}] Raw response: {}", truncate_for_log(body));
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_100ms() {
        assert_eq!(backoff_delay(0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn backoff_capped_at_10s() {
        assert_eq!(backoff_delay(7), Duration::from_millis(10_000));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_millis(10_000));
    }

    #[test]
    fn rate_limit_delay_uses_retry_after() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".into(),
            retry_after: Some(5),
            raw_message: None,
        };
        assert_eq!(retry_delay(&e, 0), Duration::from_secs(5));
    }

    #[test]
    fn rate_limit_delay_is_capped() {
        let e = ProviderError::RateLimited {
            provider: "cloudflare".into(),
            retry_after: Some(600),
            raw_message: None,
        };
        assert_eq!(retry_delay(&e, 0), Duration::from_secs(30));
    }

    #[test]
    fn network_error_delay_falls_back_to_backoff() {
        let e = ProviderError::NetworkError {
            provider: "cloudflare".into(),
            detail: "reset".into(),
        };
        assert_eq!(retry_delay(&e, 2), Duration::from_millis(400));
    }

    #[test]
    fn parse_json_invalid_is_parse_error() {
        let result: Result<serde_json::Value, ProviderError> =
            HttpUtils::parse_json("not json", "cloudflare");
        assert!(
            matches!(
                &result,
                Err(ProviderError::ParseError { provider, .. }) if provider == "cloudflare"
            ),
            "unexpected parse result: {result:?}"
        );
    }
}
