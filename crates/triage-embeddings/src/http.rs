//! JSON-over-HTTP calls to provider endpoints with bounded retry.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use triage_core::errors::ProviderError;
use triage_core::retry::RetryPolicy;

/// Per-request timeout for the underlying HTTP client. The caller's own
/// deadline usually fires first.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared HTTP client.
pub fn build_client(provider: &str) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(HTTP_REQUEST_TIMEOUT)
        .user_agent(concat!("triage/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::Unavailable {
            provider: provider.to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })
}

/// POST `body` as JSON with a bearer token, retrying transient failures.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    provider: &str,
    endpoint: &str,
    api_key: &str,
    body: &B,
    policy: &RetryPolicy,
) -> Result<Value, ProviderError> {
    let mut attempt = 0;
    loop {
        let started = Instant::now();
        match post_once(client, provider, endpoint, api_key, body, started).await {
            Ok(value) => return Ok(value),
            Err(e) if policy.should_retry(&e, attempt) => {
                let delay = policy.backoff(attempt);
                warn!(
                    provider,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "provider call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn post_once<B: Serialize + ?Sized>(
    client: &Client,
    provider: &str,
    endpoint: &str,
    api_key: &str,
    body: &B,
    started: Instant,
) -> Result<Value, ProviderError> {
    let response = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(provider, &e, started))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(provider, &e, started))?;
    debug!(provider, status = status.as_u16(), bytes = text.len(), "provider responded");

    if !status.is_success() {
        return Err(status_error(provider, status, &text));
    }
    serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
        provider: provider.to_string(),
        reason: format!("body is not JSON: {e}"),
    })
}

fn transport_error(provider: &str, error: &reqwest::Error, started: Instant) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    } else {
        ProviderError::Unavailable {
            provider: provider.to_string(),
            reason: error.to_string(),
        }
    }
}

/// Map a non-success HTTP status onto the provider error taxonomy.
pub fn status_error(provider: &str, status: StatusCode, body: &str) -> ProviderError {
    let provider = provider.to_string();
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::QuotaExhausted { provider },
        StatusCode::REQUEST_TIMEOUT => ProviderError::Unavailable {
            provider,
            reason: "HTTP 408".to_string(),
        },
        s if s.is_server_error() => ProviderError::Unavailable {
            provider,
            reason: format!("HTTP {}", s.as_u16()),
        },
        s => ProviderError::InvalidResponse {
            provider,
            reason: format!("HTTP {}: {}", s.as_u16(), truncate(body, 200)),
        },
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
