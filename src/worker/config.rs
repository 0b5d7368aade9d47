//! Worker configuration

use std::time::Duration;

/// Smallest accepted firing period
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// What a worker does with a running countdown when it receives another "start"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RestartPolicy {
    /// Detach the previous countdown: it keeps firing until it completes on
    /// its own and can no longer be cancelled
    #[default]
    Overwrite,
    /// Cancel the previous countdown before arming the new one
    Replace,
}

/// Configuration shared by every countdown a worker runs
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub period: Duration,
    pub restart_policy: RestartPolicy,
}

impl WorkerConfig {
    /// Create a configuration, clamping the period to at least one millisecond
    pub fn new(period: Duration, restart_policy: RestartPolicy) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            restart_policy,
        }
    }

    /// Same configuration with a different restart policy
    pub fn with_restart_policy(mut self, restart_policy: RestartPolicy) -> Self {
        self.restart_policy = restart_policy;
        self
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), RestartPolicy::Overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_is_clamped() {
        let config = WorkerConfig::new(Duration::ZERO, RestartPolicy::Replace);
        assert_eq!(config.period, MIN_PERIOD);
        assert_eq!(WorkerConfig::default().period, Duration::from_secs(1));
    }
}
