//! Retry logic with exponential backoff
//!
//! Only [`Error::is_retryable`] failures are retried (`ProviderUnavailable`
//! and `ToolTimeout`), plus `MalformedResponse` when the policy opts in.

use handoff_core::{Error, ErrorKind, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Backoff multiplier (typically 2.0 for exponential backoff)
    pub backoff_multiplier: f64,

    /// Also retry model responses that could not be classified
    pub retry_malformed: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            retry_malformed: false,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
            retry_malformed: false,
        }
    }

    /// Create a policy with no retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_secs(0),
            max_backoff: Duration::from_secs(0),
            backoff_multiplier: 1.0,
            retry_malformed: false,
        }
    }

    /// Create a policy with fast retries (for testing)
    pub fn fast() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            retry_malformed: false,
        }
    }

    /// Same policy with a different attempt count
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Same policy, also retrying malformed model responses
    pub fn with_retry_malformed(mut self, retry_malformed: bool) -> Self {
        self.retry_malformed = retry_malformed;
        self
    }

    /// Calculate backoff duration for a given attempt
    fn backoff_duration(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        let backoff = Duration::from_millis(backoff_ms as u64);

        // Cap at max backoff
        if backoff > self.max_backoff {
            self.max_backoff
        } else {
            backoff
        }
    }

    /// Check if an error should be retried under this policy
    pub fn should_retry(&self, error: &Error) -> bool {
        error.is_retryable() || (self.retry_malformed && error.kind() == ErrorKind::MalformedResponse)
    }

    /// Execute an async operation with retry logic
    ///
    /// # Arguments
    ///
    /// * `operation_name` - Name of the operation (for logging)
    /// * `operation` - Async operation to execute
    ///
    /// # Returns
    ///
    /// Result of the operation, or the last error if all attempts fail
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                operation = operation_name,
                attempt,
                max_attempts,
                "Attempting operation"
            );

            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(
                            operation = operation_name,
                            retries = attempt - 1,
                            "Operation succeeded after retries"
                        );
                    }
                    return Ok(result);
                }
                Err(e) if !self.should_retry(&e) => {
                    debug!(operation = operation_name, error = %e, "Non-retryable error");
                    return Err(e);
                }
                Err(e) if attempt >= max_attempts => {
                    warn!(
                        operation = operation_name,
                        attempts = attempt,
                        error = %e,
                        "Operation failed after all attempts"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let backoff = self.backoff_duration(attempt);
                    warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts,
                        error = %e,
                        backoff = ?backoff,
                        "Operation failed, retrying"
                    );
                    sleep(backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(100));
        assert_eq!(policy.max_backoff, Duration::from_secs(10));
        assert!((policy.backoff_multiplier - 2.0).abs() < f64::EPSILON);
        assert!(!policy.retry_malformed);
    }

    #[test]
    fn test_no_retry_policy() {
        let policy = RetryPolicy::no_retry();
        assert_eq!(policy.max_attempts, 1);
    }

    #[test]
    fn test_backoff_calculation() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_duration(0), Duration::from_secs(0));
        assert_eq!(policy.backoff_duration(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_duration(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_duration(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_duration(4), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let policy = RetryPolicy::new(10, Duration::from_secs(1), Duration::from_secs(5), 2.0);
        assert_eq!(policy.backoff_duration(10), Duration::from_secs(5));
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::fast();
        assert!(policy.should_retry(&Error::ProviderUnavailable("down".to_string())));
        assert!(policy.should_retry(&Error::ToolTimeout {
            tool: "get_flights".to_string(),
            timeout: Duration::from_secs(1),
        }));
        assert!(!policy.should_retry(&Error::MalformedResponse("?".to_string())));
        assert!(!policy.should_retry(&Error::ToolNotFound("x".to_string())));

        let lenient = policy.with_retry_malformed(true);
        assert!(lenient.should_retry(&Error::MalformedResponse("?".to_string())));
        assert!(!lenient.should_retry(&Error::Cancelled));
    }

    async fn run_counting(policy: &RetryPolicy, fail_until: u32, error: Error) -> (Result<i32>, u32) {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = policy
            .execute("test_op", || {
                let counter = counter.clone();
                let error = error.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n <= fail_until { Err(error) } else { Ok(42) }
                }
            })
            .await;

        (result, attempts.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_execute_success_first_try() {
        let (result, attempts) =
            run_counting(&RetryPolicy::fast(), 0, Error::ProviderUnavailable("x".into())).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_execute_success_after_retry() {
        let (result, attempts) =
            run_counting(&RetryPolicy::fast(), 1, Error::ProviderUnavailable("x".into())).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn test_execute_all_attempts_fail() {
        let (result, attempts) =
            run_counting(&RetryPolicy::fast(), 10, Error::ProviderUnavailable("x".into())).await;
        assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_execute_non_retryable_error() {
        let (result, attempts) = run_counting(
            &RetryPolicy::fast(),
            10,
            Error::InvalidHandoff {
                from: "a".into(),
                target: "b".into(),
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let policy = RetryPolicy::fast().with_max_attempts(0);
        let (result, attempts) = run_counting(&policy, 0, Error::Cancelled).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts, 1);
    }
}
