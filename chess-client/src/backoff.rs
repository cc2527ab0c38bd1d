use std::time::Duration;

/// Reconnect delays, expressed as data.
///
/// Attempt `n` (1-based) waits `delays[n - 1]`; attempts past the end of the
/// list reuse the last delay. Once `max_attempts` is exceeded the channel
/// gives up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    pub delays: Vec<Duration>,
    pub max_attempts: Option<u32>,
}

impl BackoffSchedule {
    pub fn new(delays: Vec<Duration>, max_attempts: Option<u32>) -> Self {
        Self {
            delays,
            max_attempts,
        }
    }

    /// Delay before reconnect attempt `attempt`, or `None` to give up.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 {
            return Some(Duration::ZERO);
        }
        if self.max_attempts.is_some_and(|max| attempt > max) {
            return None;
        }
        let index = (attempt as usize - 1).min(self.delays.len().saturating_sub(1));
        Some(self.delays.get(index).copied().unwrap_or(Duration::ZERO))
    }
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self::new(
            vec![
                Duration::from_millis(250),
                Duration::from_millis(500),
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(5),
            ],
            None,
        )
    }
}
