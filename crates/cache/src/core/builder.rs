//! Cache construction

use crate::config::CacheConfig;
use crate::stats::CacheStats;
use dashmap::DashMap;
use lapse_core::Result;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use super::sweeper::start_sweeper;
use super::types::{CacheInner, DemotionHook, WeakEvictionCache};

/// Builder for a [`WeakEvictionCache`], used when a demotion hook is
/// wanted. `WeakEvictionCache::new` covers the plain case.
pub struct Builder<K, V> {
    config: CacheConfig,
    on_demotion: Option<DemotionHook<K>>,
    marker: PhantomData<fn() -> V>,
}

impl<K, V> Builder<K, V>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            on_demotion: None,
            marker: PhantomData,
        }
    }

    /// Install a diagnostic hook invoked with the key and its idle time
    /// each time the sweeper demotes an entry.
    ///
    /// The hook runs inside the sweep pass, while the entry's map shard
    /// is held: it must be quick and must not call back into the cache.
    #[must_use]
    pub fn on_demotion(mut self, hook: impl Fn(&K, Duration) + Send + Sync + 'static) -> Self {
        self.on_demotion = Some(Arc::new(hook));
        self
    }

    /// Validate the configuration, build the cache, and start its
    /// background sweeper.
    ///
    /// Must be called from within a tokio runtime unless background
    /// sweeping is disabled by a zero interval.
    pub fn build(self) -> Result<WeakEvictionCache<K, V>> {
        self.config.validate()?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let inner = Arc::new(CacheInner {
            config: self.config,
            entries: DashMap::new(),
            stats: CacheStats::default(),
            disposed: AtomicBool::new(false),
            shutdown_tx,
            sweeper_handle: Mutex::new(None),
            on_demotion: self.on_demotion,
        });

        let cache = WeakEvictionCache { inner };
        start_sweeper(&cache, shutdown_rx);
        Ok(cache)
    }
}

impl<K, V> WeakEvictionCache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Create a new cache and start its background sweeper.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Builder::new(config).build()
    }

    /// Start building a cache, for callers that want a demotion hook.
    pub fn builder(config: CacheConfig) -> Builder<K, V> {
        Builder::new(config)
    }
}
