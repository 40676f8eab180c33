//! Retry logic with exponential backoff
//!
//! The Figma API rate-limits aggressively (429) and occasionally serves
//! transient 5xx responses; this module provides the retry loop the API
//! client wraps every request in. Delays grow exponentially up to a cap,
//! with optional jitter to prevent thundering herd.

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (rate limiting, server errors, timeouts) should return
/// `true`. Permanent failures (bad token, malformed response, missing nodes)
/// should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            // Rate limits and server errors clear up on their own
            Error::ApiStatus { status, .. } => *status == 429 || *status >= 500,
            Error::DownloadStatus { status, .. } => *status == 429 || *status >= 500,
            // Network errors are retryable when they look transient
            Error::Network(e) => e.is_timeout() || e.is_connect(),
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::Interrupted
            ),
            // An API-level error in a 200 response is a definitive answer
            Error::Api(_) => false,
            // Configuration and input errors are permanent
            Error::Config { .. } => false,
            Error::InvalidUrl(_) => false,
            Error::NodesNotFound(_) => false,
            Error::OutputDir { .. } => false,
            // Malformed response bodies won't improve on retry
            Error::Serialization(_) => false,
        }
    }
}

/// Execute an async operation with exponential backoff retry logic
///
/// Retries `operation` up to `config.max_attempts` times after the initial
/// call, but only while the returned error classifies as retryable. Returns
/// the successful result or the last error once attempts are exhausted.
pub async fn request_with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                attempt += 1;

                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis(),
                    "Request failed, retrying"
                );

                let jittered_delay = if config.jitter { add_jitter(delay) } else { delay };
                tokio::time::sleep(jittered_delay).await;

                let next_delay =
                    Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier);
                delay = next_delay.min(config.max_delay);
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "Request failed after all retry attempts exhausted"
                    );
                } else {
                    tracing::error!(error = %e, "Request failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}

/// Add random jitter to a delay to prevent thundering herd
///
/// Jitter is uniformly distributed between 0% and 100% of the delay, so the
/// actual delay falls between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                TestError::Transient => write!(f, "transient error"),
                TestError::Permanent => write!(f, "permanent error"),
            }
        }
    }

    impl IsRetryable for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient)
        }
    }

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[tokio::test]
    async fn success_does_not_retry() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = request_with_retry(&fast_config(3), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 1, "should only call once");
    }

    #[tokio::test]
    async fn transient_error_retries_then_succeeds() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = request_with_retry(&fast_config(3), || {
            let counter = counter_clone.clone();
            async move {
                let count = counter.fetch_add(1, Ordering::SeqCst);
                if count < 2 {
                    Err(TestError::Transient)
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(
            counter.load(Ordering::SeqCst),
            3,
            "should retry twice before success"
        );
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_error() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = request_with_retry(&fast_config(2), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(TestError::Transient)
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(
            counter.load(Ordering::SeqCst),
            3,
            "should try initial + 2 retries"
        );
    }

    #[tokio::test]
    async fn permanent_error_does_not_retry() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = request_with_retry(&fast_config(3), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(TestError::Permanent)
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(
            counter.load(Ordering::SeqCst),
            1,
            "should not retry permanent error"
        );
    }

    #[tokio::test]
    async fn backoff_delays_are_capped_at_max_delay() {
        // Aggressive multiplier: without capping, delays would be 10ms, 100ms, 1000ms
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
            backoff_multiplier: 10.0,
            jitter: false,
        };

        let start = std::time::Instant::now();
        let _result =
            request_with_retry(&config, || async { Err::<i32, _>(TestError::Transient) }).await;
        let elapsed = start.elapsed();

        // 10ms + 50ms + 50ms = 110ms expected; generous upper bound for CI
        assert!(
            elapsed >= Duration::from_millis(100),
            "should wait at least 100ms, waited {elapsed:?}"
        );
        assert!(
            elapsed < Duration::from_secs(2),
            "delays should be capped, waited {elapsed:?}"
        );
    }

    #[test]
    fn add_jitter_stays_within_bounds() {
        let delay = Duration::from_millis(50);
        for i in 0..200 {
            let jittered = add_jitter(delay);
            assert!(
                jittered >= delay,
                "iteration {i}: jittered {jittered:?} < base delay {delay:?}"
            );
            assert!(
                jittered <= delay * 2,
                "iteration {i}: jittered {jittered:?} > 2x base delay"
            );
        }
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        let rate_limited = Error::ApiStatus {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert!(rate_limited.is_retryable());

        let server_error = Error::ApiStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(server_error.is_retryable());

        let download_server_error = Error::DownloadStatus {
            status: 500,
            url: "https://images.example.com/a.png".to_string(),
        };
        assert!(download_server_error.is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let forbidden = Error::ApiStatus {
            status: 403,
            body: "invalid token".to_string(),
        };
        assert!(!forbidden.is_retryable(), "bad credentials are permanent");

        let not_found = Error::ApiStatus {
            status: 404,
            body: "no such file".to_string(),
        };
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn io_errors_classify_by_kind() {
        let timeout = Error::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout"));
        assert!(timeout.is_retryable());

        let denied = Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(!denied.is_retryable(), "PermissionDenied is permanent");
    }

    #[test]
    fn input_errors_are_not_retryable() {
        assert!(!Error::InvalidUrl("https://example.com".to_string()).is_retryable());
        assert!(!Error::NodesNotFound("1:2".to_string()).is_retryable());
        assert!(
            !Error::Config {
                message: "bad format".to_string(),
                key: None,
            }
            .is_retryable()
        );
        assert!(!Error::Api("render failed".to_string()).is_retryable());
    }
}
