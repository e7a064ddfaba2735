// src/error_recovery.rs
//! Retry on rate limiting for wolai fetches.
//!
//! Only rate limiting is retried. Every other failure is classified once and
//! returned to the caller as a terminal error for that block.

use crate::constants::RATE_LIMIT_BACKOFF;
use crate::error::{classify_fetch_failure, AppError, FetchFailure};
use crate::types::BlockId;
use std::time::Duration;

/// How rate-limited fetches are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed wait between a rate-limit response and the next attempt.
    pub delay: Duration,
    /// Total attempts allowed per fetch; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: RATE_LIMIT_BACKOFF,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn allows_another(&self, attempts_made: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts_made < max)
    }
}

/// Runs `operation` for `block_id`, sleeping and retrying while the API
/// reports rate limiting.
///
/// Errors come back classified: `TokenInvalid`, `PermissionDenied`,
/// `RateLimitExhausted` when the attempt bound is hit, and `FetchFailed`
/// for everything else.
pub async fn retry_on_rate_limit<F, T, Fut>(
    block_id: &BlockId,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        match classify_fetch_failure(&error) {
            FetchFailure::RateLimited => {
                if !policy.allows_another(attempt) {
                    log::error!(
                        "Still rate limited on block {} after {} attempts, giving up",
                        block_id,
                        attempt
                    );
                    return Err(AppError::RateLimitExhausted {
                        block_id: block_id.clone(),
                        attempts: attempt,
                    });
                }
                log::warn!(
                    "Rate limited while fetching block {} (attempt {}), retrying in {:?}",
                    block_id,
                    attempt,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
            FetchFailure::TokenInvalid => return Err(AppError::TokenInvalid),
            FetchFailure::PermissionDenied => {
                return Err(AppError::PermissionDenied {
                    block_id: block_id.clone(),
                })
            }
            FetchFailure::Unknown { detail } => {
                return Err(AppError::FetchFailed {
                    block_id: block_id.clone(),
                    detail,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WolaiErrorCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn service_error(code: WolaiErrorCode) -> AppError {
        AppError::WolaiService {
            code,
            message: "boom".to_string(),
            status: reqwest::StatusCode::BAD_REQUEST,
        }
    }

    fn block() -> BlockId {
        BlockId::from_api("blockAAAA1")
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_waits_then_retries() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let result = retry_on_rate_limit(&block(), &RetryPolicy::default(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(service_error(WolaiErrorCode::RateLimited))
                } else {
                    Ok("children")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, "children");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_bound_is_honored() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default().with_max_attempts(Some(3));

        let err = retry_on_rate_limit(&block(), &policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(service_error(WolaiErrorCode::RateLimited)) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(err, AppError::RateLimitExhausted { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_fatal_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let err = retry_on_rate_limit(&block(), &RetryPolicy::default(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(service_error(WolaiErrorCode::PermissionDenied)) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, AppError::PermissionDenied { block_id } if block_id == block()));

        let err = retry_on_rate_limit(&block(), &RetryPolicy::default(), || async {
            Err::<(), _>(service_error(WolaiErrorCode::TokenInvalid))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_other_failures_become_fetch_failed() {
        let err = retry_on_rate_limit(&block(), &RetryPolicy::default(), || async {
            Err::<(), _>(AppError::MalformedResponse("not json".into()))
        })
        .await
        .unwrap_err();

        match err {
            AppError::FetchFailed { block_id, detail } => {
                assert_eq!(block_id, block());
                assert!(detail.contains("not json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
