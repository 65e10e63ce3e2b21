use std::time::Duration;

use reqwest::StatusCode;

/// Exponential backoff retry policy applied to every outbound request.
///
/// The delay before retry attempt `n` (1-based) is `backoff_base * 2^n`.
/// There is no jitter and no circuit breaking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Unit multiplied by `2^attempt` to get each delay.
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Six retries waiting 2, 4, 8, 16, 32 and 64 seconds.
    pub fn standard() -> Self {
        Self::new(6, Duration::from_secs(1))
    }

    pub fn new(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
        }
    }

    /// Returns whether retry attempt `attempt` (1-based) is still allowed.
    pub fn allows(&self, attempt: u32) -> bool {
        attempt >= 1 && attempt <= self.max_retries
    }

    /// Delay to wait before retry attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.min(30);
        self.backoff_base.saturating_mul(1u32 << exp)
    }

    /// The full delay schedule, one entry per allowed retry.
    pub fn delays(&self) -> Vec<Duration> {
        (1..=self.max_retries)
            .map(|attempt| self.delay_for(attempt))
            .collect()
    }

    /// Server errors, 408 and 404 are retried.
    pub fn should_retry_status(&self, status: StatusCode) -> bool {
        status.is_server_error()
            || status == StatusCode::REQUEST_TIMEOUT
            || status == StatusCode::NOT_FOUND
    }

    pub fn should_retry_transport(&self, err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::RetryPolicy;

    #[test]
    fn standard_schedule_doubles_from_two_seconds() {
        let secs: Vec<u64> = RetryPolicy::standard()
            .delays()
            .into_iter()
            .map(|delay| delay.as_secs())
            .collect();
        assert_eq!(secs, vec![2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn allows_exactly_max_retries() {
        let policy = RetryPolicy::standard();
        assert!(!policy.allows(0));
        assert!((1..=6).all(|attempt| policy.allows(attempt)));
        assert!(!policy.allows(7));
    }

    #[test]
    fn not_found_and_server_errors_are_retryable() {
        let policy = RetryPolicy::standard();
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::REQUEST_TIMEOUT,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert!(policy.should_retry_status(status), "{status}");
        }
    }

    #[test]
    fn client_errors_other_than_not_found_are_final() {
        let policy = RetryPolicy::standard();
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert!(!policy.should_retry_status(status), "{status}");
        }
    }

    #[test]
    fn huge_attempt_numbers_saturate_instead_of_overflowing() {
        let policy = RetryPolicy::new(100, Duration::from_secs(u64::MAX / 2));
        assert_eq!(policy.delay_for(90), Duration::MAX);
    }
}
