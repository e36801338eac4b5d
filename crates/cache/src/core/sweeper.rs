//! Background sweeper task
//!
//! A dedicated task that wakes on a fixed cadence and demotes every entry
//! whose idle time has reached the eviction threshold. The sweeper only
//! ever demotes holders; it never removes map entries (removal happens
//! lazily on access, or explicitly).

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;

use super::types::{CacheInner, WeakEvictionCache};

/// Spawn the sweeper for `cache`, if its configuration enables one.
pub(super) fn start_sweeper<K, V>(
    cache: &WeakEvictionCache<K, V>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    if !cache.inner.config.sweeping_enabled() {
        return;
    }
    let sweep_interval = cache.inner.config.sweep_interval;

    // The task keeps only a weak handle on the cache so it never extends
    // the cache's lifetime.
    let weak_inner = Arc::downgrade(&cache.inner);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tracing::debug!(interval_ms = sweep_interval.as_millis() as u64, "sweeper started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(inner) = weak_inner.upgrade() else { break };
                    sweep_pass(&inner);
                }
                // Fires on dispose() as well as when the last cache handle
                // is dropped with the sender.
                _ = shutdown_rx.changed() => break,
            }
        }

        tracing::debug!("sweeper stopped");
    });

    *cache.inner.sweeper_handle.lock() = Some(handle);
}

/// One demotion pass over all entries. Returns the number demoted.
pub(super) fn sweep_pass<K, V>(inner: &CacheInner<K, V>) -> usize
where
    K: Eq + Hash + Debug,
{
    let now = Instant::now();
    let threshold = inner.config.weak_eviction_threshold;
    let mut demoted = 0usize;

    for entry_ref in inner.entries.iter() {
        let entry = entry_ref.value();
        if !entry.is_strong() {
            continue;
        }
        let idle = entry.idle_for(now);
        if idle < threshold {
            continue;
        }
        if entry.demote() {
            demoted += 1;
            inner.stats.demotions.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                key = ?entry_ref.key(),
                idle_ms = idle.as_millis() as u64,
                "demoted entry to weak"
            );
            if let Some(hook) = &inner.on_demotion {
                hook(entry_ref.key(), idle);
            }
        }
    }

    if demoted > 0 {
        tracing::debug!(demoted, "sweep pass complete");
    }
    demoted
}
