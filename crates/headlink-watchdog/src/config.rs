//! Thread watcher configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{WatchdogError, WatchdogResult};
use crate::platform::MAX_NICE;

/// Default interval between two sweeps.
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_secs(1);

/// Thread watcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadWatcherConfig {
    /// Period used by [`ThreadWatcher::start`](crate::ThreadWatcher::start).
    pub sweep_period: Duration,
    /// Whether sweeps lower the priority of watched threads.
    pub reduce_priority: bool,
    /// Nice increment applied to each watched thread per sweep.
    pub niceness_step: i32,
}

impl Default for ThreadWatcherConfig {
    fn default() -> Self {
        Self {
            sweep_period: DEFAULT_SWEEP_PERIOD,
            reduce_priority: true,
            niceness_step: 1,
        }
    }
}

impl ThreadWatcherConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep period is zero or the niceness step is
    /// outside `1..=19`.
    pub fn validate(&self) -> WatchdogResult<()> {
        if self.sweep_period.is_zero() {
            return Err(WatchdogError::invalid_configuration(
                "sweep_period must be greater than 0",
            ));
        }
        if !(1..=MAX_NICE).contains(&self.niceness_step) {
            return Err(WatchdogError::invalid_configuration(format!(
                "niceness_step must be within 1..={MAX_NICE}, got {}",
                self.niceness_step
            )));
        }
        Ok(())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ThreadWatcherConfigBuilder {
        ThreadWatcherConfigBuilder::default()
    }
}

/// Builder for `ThreadWatcherConfig`.
#[derive(Debug, Default)]
pub struct ThreadWatcherConfigBuilder {
    config: ThreadWatcherConfig,
}

impl ThreadWatcherConfigBuilder {
    /// Set the sweep period.
    #[must_use]
    pub fn sweep_period(mut self, period: Duration) -> Self {
        self.config.sweep_period = period;
        self
    }

    /// Set the sweep period in milliseconds.
    #[must_use]
    pub fn sweep_period_ms(mut self, ms: u64) -> Self {
        self.config.sweep_period = Duration::from_millis(ms);
        self
    }

    /// Enable or disable priority reduction.
    #[must_use]
    pub fn reduce_priority(mut self, enabled: bool) -> Self {
        self.config.reduce_priority = enabled;
        self
    }

    /// Set the nice increment per sweep.
    #[must_use]
    pub fn niceness_step(mut self, step: i32) -> Self {
        self.config.niceness_step = step;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<ThreadWatcherConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ThreadWatcherConfig::default();
        assert!(matches!(config.validate(), Ok(_)));
        assert_eq!(config.sweep_period, Duration::from_secs(1));
        assert!(config.reduce_priority);
    }

    #[test]
    fn test_config_builder() -> WatchdogResult<()> {
        let config = ThreadWatcherConfig::builder()
            .sweep_period_ms(250)
            .reduce_priority(false)
            .niceness_step(3)
            .build()?;

        assert_eq!(config.sweep_period, Duration::from_millis(250));
        assert!(!config.reduce_priority);
        assert_eq!(config.niceness_step, 3);
        Ok(())
    }

    #[test]
    fn test_config_validation() {
        let config = ThreadWatcherConfig {
            sweep_period: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(_)));

        for step in [0, -1, 20] {
            let config = ThreadWatcherConfig {
                niceness_step: step,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(WatchdogError::InvalidConfiguration(_))),
                "step {step} should be rejected"
            );
        }
    }

    #[test]
    fn test_config_serde() -> Result<(), Box<dyn std::error::Error>> {
        let config = ThreadWatcherConfig::builder()
            .sweep_period_ms(100)
            .niceness_step(2)
            .build()?;
        let json = serde_json::to_string(&config)?;
        let back: ThreadWatcherConfig = serde_json::from_str(&json)?;
        assert_eq!(config, back);
        Ok(())
    }
}
