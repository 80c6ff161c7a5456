//! Controller configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default toast lifetime: 5 seconds.
pub const DEFAULT_TOAST_TTL_SECS: u64 = 5;

/// Default period of the toast sweeper: 5 seconds.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5;

/// Configuration for the session/view controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ControllerConfig {
    /// Seconds a toast stays visible after creation
    #[cfg_attr(
        feature = "config",
        arg(long = "toast-ttl", env = "WEEV_TOAST_TTL", default_value = "5")
    )]
    #[serde(default = "default_toast_ttl")]
    pub toast_ttl: u64,

    /// Seconds between sweeps that drop dismissed toasts
    #[cfg_attr(
        feature = "config",
        arg(
            long = "toast-sweep-interval",
            env = "WEEV_TOAST_SWEEP_INTERVAL",
            default_value = "5"
        )
    )]
    #[serde(default = "default_sweep_interval")]
    pub toast_sweep_interval: u64,
}

fn default_toast_ttl() -> u64 {
    DEFAULT_TOAST_TTL_SECS
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            toast_ttl: default_toast_ttl(),
            toast_sweep_interval: default_sweep_interval(),
        }
    }
}

impl ControllerConfig {
    /// Returns the toast lifetime as a Duration.
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_ttl)
    }

    /// Returns the sweep period as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.toast_sweep_interval)
    }

    /// Set the toast lifetime in seconds.
    #[must_use]
    pub fn with_toast_ttl(mut self, secs: u64) -> Self {
        self.toast_ttl = secs;
        self
    }

    /// Set the sweep period in seconds.
    #[must_use]
    pub fn with_sweep_interval(mut self, secs: u64) -> Self {
        self.toast_sweep_interval = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.toast_ttl(), Duration::from_secs(5));
        assert_eq!(config.sweep_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ControllerConfig::default()
            .with_toast_ttl(2)
            .with_sweep_interval(1);
        assert_eq!(config.toast_ttl, 2);
        assert_eq!(config.toast_sweep_interval, 1);
    }
}
