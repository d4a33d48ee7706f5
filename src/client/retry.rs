//! Bounded retry with linear backoff for transient API failures
//!
//! One policy for every call in the crate. Retries network-level failures
//! and responses whose status is in the retryable set; everything else
//! propagates after a single attempt.

use std::future::Future;
use std::time::Duration;

use log::debug;

use crate::error::ApiError;

/// Statuses retried when no policy override is given
pub const DEFAULT_RETRYABLE: &[u16] = &[429, 502, 503, 504];

/// Retry policy: attempt bound, base delay, and retryable status set.
/// Immutable once constructed, shared by all calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt bound, including the first (minimum 1)
    pub max_attempts: u32,
    /// Base delay; the sleep before attempt n is `base_delay * (n - 1)`
    pub base_delay: Duration,
    /// HTTP statuses considered transient
    pub retryable: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(2),
            retryable: DEFAULT_RETRYABLE.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default retryable status set.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            ..Self::default()
        }
    }

    /// Replace the retryable status set.
    pub fn retryable(mut self, statuses: &[u16]) -> Self {
        self.retryable = statuses.to_vec();
        self
    }

    /// Whether this error is worth another attempt under this policy.
    pub fn is_transient(&self, err: &ApiError) -> bool {
        match err {
            ApiError::Network(_) => true,
            _ => err
                .status()
                .map(|status| self.retryable.contains(&status))
                .unwrap_or(false),
        }
    }
}

/// Run `op`, retrying transient failures per `policy`.
///
/// The sleep grows as a fixed multiple of the base delay, not compounding.
/// On exhaustion the last error is surfaced wrapped in
/// [`ApiError::Exhausted`] with the true attempt count; non-transient errors
/// propagate immediately after exactly one attempt.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if policy.is_transient(&err) => {
                if attempt >= max_attempts {
                    return Err(ApiError::Exhausted {
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
                let delay = policy.base_delay * attempt;
                debug!(
                    "Transient failure on attempt {}/{}, retrying in {:?}: {}",
                    attempt, max_attempts, delay, err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    fn server_error() -> ApiError {
        ApiError::Server {
            status: 503,
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(5), || {
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ApiError>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_attempts_are_failures_plus_one() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(5), || {
            let calls = &calls;
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(server_error())
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_true_attempt_count() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ApiError> = with_retry(&fast_policy(3), || {
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(server_error())
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result.unwrap_err() {
            ApiError::Exhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert_eq!(source.status(), Some(503));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_makes_exactly_one_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ApiError> = with_retry(&fast_policy(5), || {
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::NotFound("cloud 9".to_string()))
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_network_errors_are_transient() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ApiError> = with_retry(&fast_policy(2), || {
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Network("connection reset".to_string()))
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            result.unwrap_err(),
            ApiError::Exhausted { attempts: 2, .. }
        ));
    }

    #[test]
    fn test_auth_errors_never_transient() {
        let policy = RetryPolicy::default();
        assert!(!policy.is_transient(&ApiError::Unauthorized));
        assert!(!policy.is_transient(&ApiError::Forbidden));
        assert!(!policy.is_transient(&ApiError::Parse("drift".to_string())));
        assert!(policy.is_transient(&server_error()));
        assert!(policy.is_transient(&ApiError::BadRequest {
            status: 429,
            body: String::new(),
        }));
    }

    #[test]
    fn test_retryable_set_is_configurable() {
        let policy = RetryPolicy::default().retryable(&[503]);
        assert!(policy.is_transient(&server_error()));
        assert!(!policy.is_transient(&ApiError::Server {
            status: 502,
            body: String::new(),
        }));
    }
}
