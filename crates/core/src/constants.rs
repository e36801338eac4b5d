/// Constants used throughout the lapse codebase
use std::time::Duration;

/// Idle time after which an entry's holder becomes eligible for demotion.
pub const DEFAULT_WEAK_EVICTION_THRESHOLD: Duration = Duration::from_secs(4);

/// Cadence of the background sweeper.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);
