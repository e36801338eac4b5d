//! Core cache types and structures

use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::stats::CacheStats;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Diagnostic hook invoked with the key and its idle time each time the
/// sweeper demotes an entry. Observability only, never correctness.
pub type DemotionHook<K> = Arc<dyn Fn(&K, Duration) + Send + Sync>;

/// A time-windowed cache whose idle entries are demoted from strong to
/// weak references by a background sweeper.
///
/// Cheap to clone; clones share the same underlying cache.
pub struct WeakEvictionCache<K, V> {
    pub(super) inner: Arc<CacheInner<K, V>>,
}

pub(super) struct CacheInner<K, V> {
    /// Configuration
    pub config: CacheConfig,
    /// Key-to-entry table
    pub entries: DashMap<K, Arc<CacheEntry<V>>>,
    /// Statistics
    pub stats: CacheStats,
    /// Set once by `dispose`; checked by every operation
    pub disposed: AtomicBool,
    /// Signals the sweeper to stop
    pub shutdown_tx: watch::Sender<bool>,
    /// Background sweeper task handle
    pub sweeper_handle: Mutex<Option<JoinHandle<()>>>,
    /// Optional demotion observer
    pub on_demotion: Option<DemotionHook<K>>,
}

impl<K, V> Clone for WeakEvictionCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Drop for CacheInner<K, V> {
    fn drop(&mut self) {
        // Backstop for caches dropped without dispose(): dropping
        // `shutdown_tx` already ends the sweeper loop, aborting just cuts
        // short a sweep that is mid-pass.
        if let Some(handle) = self.sweeper_handle.lock().take() {
            handle.abort();
        }
    }
}

impl<K: Eq + Hash, V> std::fmt::Debug for WeakEvictionCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakEvictionCache")
            .field("config", &self.inner.config)
            .field("entry_count", &self.inner.entries.len())
            .finish()
    }
}
