use std::time::Duration;
use crate::config::constants::sleep_duration_millis;
use crate::structs::config::reconciler_config::ReconcilerConfig;

/// Delay schedule for fetching a result that may not be durable yet: one
/// settle delay before the first attempt, then a fixed delay before each
/// not-found retry. The retry cap is always finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub settle_delay: Duration,
    pub retry_delay: Duration,
    pub max_not_found_retries: u32,
}

impl RetryPolicy {
    pub fn new(settle_delay: Duration, retry_delay: Duration, max_not_found_retries: u32) -> Self {
        Self {
            settle_delay,
            retry_delay,
            max_not_found_retries,
        }
    }

    /// Same retry budget, no settle delay. Used when loading an analysis
    /// directly rather than right after a job finished.
    pub fn without_settle(self) -> Self {
        Self {
            settle_delay: Duration::ZERO,
            ..self
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_not_found_retries.saturating_add(1)
    }

    pub fn delay_before_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            self.settle_delay
        } else {
            self.retry_delay
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ReconcilerConfig::default())
    }
}

impl From<&ReconcilerConfig> for RetryPolicy {
    fn from(config: &ReconcilerConfig) -> Self {
        Self::new(
            sleep_duration_millis(config.settle_delay_ms),
            sleep_duration_millis(config.retry_delay_ms),
            config.max_not_found_retries,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay_before_attempt(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_before_attempt(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_before_attempt(3), Duration::from_millis(2000));
    }

    #[test]
    fn without_settle_keeps_budget() {
        let policy = RetryPolicy::default().without_settle();
        assert_eq!(policy.delay_before_attempt(0), Duration::ZERO);
        assert_eq!(policy.max_not_found_retries, 3);
    }

    #[test]
    fn huge_cap_does_not_wrap() {
        let policy = RetryPolicy::new(Duration::ZERO, Duration::from_millis(1), u32::MAX);
        assert_eq!(policy.max_attempts(), u32::MAX);
    }
}
