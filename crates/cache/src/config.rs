//! Cache configuration

use lapse_core::constants::{DEFAULT_SWEEP_INTERVAL, DEFAULT_WEAK_EVICTION_THRESHOLD};
use lapse_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`WeakEvictionCache`](crate::WeakEvictionCache).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Idle time after which an entry's holder is demoted to weak.
    pub weak_eviction_threshold: Duration,
    /// Cadence of the background sweeper. A zero interval disables the
    /// background task entirely; only manual sweeps run.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            weak_eviction_threshold: DEFAULT_WEAK_EVICTION_THRESHOLD,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl CacheConfig {
    /// Create a configuration from the two cache timings.
    pub fn new(weak_eviction_threshold: Duration, sweep_interval: Duration) -> Self {
        Self {
            weak_eviction_threshold,
            sweep_interval,
        }
    }

    /// Validate the configuration.
    ///
    /// A zero threshold is rejected: it would make every entry demotable
    /// the instant it is inserted, leaving no strong window at all.
    pub fn validate(&self) -> Result<()> {
        if self.weak_eviction_threshold.is_zero() {
            return Err(Error::configuration(
                "weak_eviction_threshold must be non-zero",
            ));
        }
        Ok(())
    }

    /// Whether a background sweeper should run for this configuration.
    pub fn sweeping_enabled(&self) -> bool {
        !self.sweep_interval.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shared_constants() {
        let config = CacheConfig::default();
        assert_eq!(config.weak_eviction_threshold, Duration::from_secs(4));
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
        assert!(config.sweeping_enabled());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let config = CacheConfig::new(Duration::ZERO, Duration::from_secs(1));
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn zero_interval_disables_background_sweeping() {
        let config = CacheConfig::new(Duration::from_secs(4), Duration::ZERO);
        assert!(config.validate().is_ok());
        assert!(!config.sweeping_enabled());
    }
}
