//! Cache statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Internal atomic counters, bumped at the call sites that observe each
/// event.
#[derive(Debug, Default)]
pub(crate) struct CacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    pub overwrites: AtomicU64,
    pub removals: AtomicU64,
    pub demotions: AtomicU64,
    pub reclamations: AtomicU64,
}

impl CacheStats {
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            demotions: self.demotions.load(Ordering::Relaxed),
            reclamations: self.reclamations.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    /// Successful lookups.
    pub hits: u64,
    /// Lookups of absent or reclaimed keys.
    pub misses: u64,
    /// Insertions of previously absent keys.
    pub insertions: u64,
    /// Insertions that replaced an existing entry.
    pub overwrites: u64,
    /// Explicit removals.
    pub removals: u64,
    /// Strong-to-weak demotions performed by sweeps.
    pub demotions: u64,
    /// Lookups that found the value already reclaimed.
    pub reclamations: u64,
}

impl CacheStatsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_is_zero_without_lookups() {
        let stats = CacheStats::default();
        assert_eq!(stats.snapshot().hit_rate(), 0.0);
    }

    #[test]
    fn snapshot_reflects_recorded_counters() {
        let stats = CacheStats::default();
        stats.hits.fetch_add(3, Ordering::Relaxed);
        stats.misses.fetch_add(1, Ordering::Relaxed);
        stats.demotions.fetch_add(2, Ordering::Relaxed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.hits, 3);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.demotions, 2);
        assert_eq!(snapshot.hit_rate(), 0.75);
    }
}
