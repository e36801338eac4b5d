//! Cache entry bookkeeping

use crate::holder::ReferenceHolder;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A reference holder paired with its last-access timestamp.
///
/// Owned by exactly one map slot. The timestamp is refreshed on every
/// successful read; the sweeper only ever demotes the holder and never
/// mutates the timestamp.
pub struct CacheEntry<V> {
    holder: ReferenceHolder<V>,
    last_access: RwLock<Instant>,
}

/// Point-in-time view of an entry, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryDiagnostics {
    /// Whether the holder still strongly retains the value.
    pub is_strong: bool,
    /// Whether the value is still alive in either state.
    pub is_live: bool,
    /// Time since the entry was last accessed.
    pub idle: Duration,
}

impl<V> CacheEntry<V> {
    /// Create a strongly-held entry with `last_access = now`.
    pub fn new(value: Arc<V>) -> Self {
        Self {
            holder: ReferenceHolder::new_strong(value),
            last_access: RwLock::new(Instant::now()),
        }
    }

    /// Refresh the last-access timestamp.
    ///
    /// This restarts the entry's recency window; it does not undo a prior
    /// demotion.
    pub fn touch(&self) {
        *self.last_access.write() = Instant::now();
    }

    /// Time elapsed since the last access, as seen from `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*self.last_access.read())
    }

    /// Return the value if it is still alive.
    pub fn try_get(&self) -> Option<Arc<V>> {
        self.holder.try_get()
    }

    /// Whether the holder still strongly retains the value.
    pub fn is_strong(&self) -> bool {
        self.holder.is_strong()
    }

    /// Demote the holder to weak. Returns `true` if the transition happened.
    pub fn demote(&self) -> bool {
        self.holder.demote()
    }

    /// Snapshot the entry's state without refreshing its recency.
    pub fn diagnostics(&self, now: Instant) -> EntryDiagnostics {
        EntryDiagnostics {
            is_strong: self.holder.is_strong(),
            is_live: self.holder.try_get().is_some(),
            idle: self.idle_for(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn touch_resets_the_idle_clock() {
        let entry = CacheEntry::new(Arc::new(1u8));
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(entry.idle_for(Instant::now()), Duration::from_secs(3));

        entry.touch();
        assert_eq!(entry.idle_for(Instant::now()), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn diagnostics_report_state_liveness_and_idle() {
        let value = Arc::new(9u32);
        let entry = CacheEntry::new(Arc::clone(&value));
        tokio::time::sleep(Duration::from_secs(1)).await;

        let diag = entry.diagnostics(Instant::now());
        assert!(diag.is_strong);
        assert!(diag.is_live);
        assert_eq!(diag.idle, Duration::from_secs(1));

        entry.demote();
        drop(value);
        let diag = entry.diagnostics(Instant::now());
        assert!(!diag.is_strong);
        assert!(!diag.is_live);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_style_demotion_leaves_timestamp_alone() {
        let value = Arc::new(0u8);
        let entry = CacheEntry::new(Arc::clone(&value));
        tokio::time::sleep(Duration::from_secs(2)).await;

        entry.demote();
        assert_eq!(
            entry.idle_for(Instant::now()),
            Duration::from_secs(2),
            "demotion must not refresh recency"
        );
    }
}
