//! HTTP transport with bounded retry.

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::request::WireRequest;
use super::response::provider_status;
use crate::error::{ApiError, Result, status_is_retryable};

const USER_AGENT: &str = concat!("ytr/", env!("CARGO_PKG_VERSION"));

/// Status and body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Delivers wire requests to the provider.
///
/// Any HTTP response, whatever its status, is `Ok`; only failures to get a
/// response at all are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: &WireRequest) -> impl Future<Output = Result<WireResponse>> + Send;
}

/// How often and how patiently failed requests are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based): `base_delay * 2^(retry-1)`,
    /// capped at `max_delay`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Timeout and retry settings for [`HttpTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Whether an attempt's outcome should be retried.
fn should_retry(outcome: &Result<WireResponse>) -> bool {
    match outcome {
        Ok(response) => status_is_retryable(provider_status(response)),
        Err(err) => err.is_retryable(),
    }
}

/// Runs `attempt` until it succeeds, fails permanently, or the policy runs out
/// of retries. The last outcome is returned as is.
pub async fn with_retry<F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Result<WireResponse>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<WireResponse>>,
{
    let mut retries = 0;

    loop {
        let outcome = attempt().await;

        if !should_retry(&outcome) || retries >= policy.max_retries {
            return outcome;
        }

        retries += 1;
        let delay = policy.delay_for(retries);
        match &outcome {
            Ok(response) => warn!(
                status = provider_status(response),
                retry = retries,
                delay_ms = delay.as_millis() as u64,
                "provider returned a server error, retrying"
            ),
            Err(err) => warn!(
                error = %err,
                retry = retries,
                delay_ms = delay.as_millis() as u64,
                "request failed, retrying"
            ),
        }
        sleep(delay).await;
    }
}

/// [`Transport`] over a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    async fn send_once(&self, request: &WireRequest) -> Result<WireResponse> {
        debug!(url = %request.url, "sending translation request");

        let response = self
            .client
            .post(&request.url)
            .form(&request.params)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.network_error(e))?;

        debug!(status, bytes = body.len(), "received provider response");
        Ok(WireResponse { status, body })
    }

    fn network_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::network(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs_f64()
            ))
        } else {
            // Endpoint URLs stay out of error messages
            ApiError::network(err.without_url().to_string())
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        with_retry(&self.config.retry, || self.send_once(request)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(350));
        assert_eq!(policy.delay_for(40), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_success_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(2), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(WireResponse::new(200, "{}"))
        })
        .await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried_until_limit() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(2), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(WireResponse::new(500, ""))
        })
        .await;

        assert_eq!(result.unwrap().status, 500);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_server_error_code_in_ok_body_is_retried() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(2), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(WireResponse::new(200, r#"{"code":503,"message":"busy"}"#))
        })
        .await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_error_code_in_ok_body_is_not_retried() {
        let calls = AtomicU32::new(0);
        let _ = with_retry(&fast_policy(2), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(WireResponse::new(200, r#"{"code":401,"message":"bad key"}"#))
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(2), || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiError::network("connection reset"))
            } else {
                Ok(WireResponse::new(200, "{}"))
            }
        })
        .await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        for status in [400, 401, 403, 429, 501] {
            let calls = AtomicU32::new(0);
            let result = with_retry(&fast_policy(2), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(WireResponse::new(status, ""))
            })
            .await;

            assert_eq!(result.unwrap().status, status);
            assert_eq!(calls.load(Ordering::SeqCst), 1, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(2), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::invalid_input("bad"))
        })
        .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_network_error_surfaces_after_retries() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(1), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::network("unreachable"))
        })
        .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Network);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_retries, 2);
    }
}
