//! Public cache operations

use crate::entry::{CacheEntry, EntryDiagnostics};
use crate::stats::CacheStatsSnapshot;
use lapse_core::{Error, Result};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::time::Instant;

use super::sweeper::sweep_pass;
use super::types::WeakEvictionCache;

impl<K, V> WeakEvictionCache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Insert `value` under `key`, strongly held, with a fresh recency
    /// window. An existing entry for `key` is overwritten.
    ///
    /// The cache retains the value until the sweeper demotes the entry;
    /// after that it lives only as long as callers hold clones of the
    /// `Arc`.
    pub fn add(&self, key: K, value: Arc<V>) -> Result<()> {
        self.ensure_open("add")?;

        // Entries are fully constructed before insertion, so a concurrent
        // reader can never observe a half-written entry.
        let entry = Arc::new(CacheEntry::new(value));
        match self.inner.entries.insert(key, entry) {
            Some(_previous) => {
                self.inner.stats.overwrites.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.inner.stats.insertions.fetch_add(1, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Look up `key`, refreshing its recency window on success.
    ///
    /// Absence is a normal outcome: both a missing key and a reclaimed
    /// value yield `Ok(None)`. A reclaimed entry is purged eagerly on the
    /// failed lookup. The refresh restarts the idle clock only; it does
    /// not undo a prior demotion.
    pub fn try_get(&self, key: &K) -> Result<Option<Arc<V>>> {
        self.ensure_open("try_get")?;

        // Clone the entry handle out of the map so the shard lock is not
        // held while taking the entry's own locks.
        let entry = match self.inner.entries.get(key) {
            Some(guard) => Arc::clone(guard.value()),
            None => {
                self.inner.stats.misses.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }
        };

        match entry.try_get() {
            Some(value) => {
                entry.touch();
                self.inner.stats.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(value))
            }
            None => {
                // The value was reclaimed, so the key is logically absent.
                // Purge the slot only if it still holds this exact entry; a
                // concurrent overwrite must survive.
                self.inner
                    .entries
                    .remove_if(key, |_, current| Arc::ptr_eq(current, &entry));
                self.inner.stats.reclamations.fetch_add(1, Ordering::Relaxed);
                self.inner.stats.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(key = ?key, "purged reclaimed entry");
                Ok(None)
            }
        }
    }

    /// Delete `key` unconditionally. Idempotent: removing an absent key
    /// reports `Ok(false)`, never an error.
    pub fn remove(&self, key: &K) -> Result<bool> {
        self.ensure_open("remove")?;

        let removed = self.inner.entries.remove(key).is_some();
        if removed {
            self.inner.stats.removals.fetch_add(1, Ordering::Relaxed);
        }
        Ok(removed)
    }

    /// Run one demotion pass right now, on the caller's thread. Returns
    /// the number of entries demoted. This is the same pass the background
    /// sweeper runs on its cadence.
    pub fn sweep(&self) -> Result<usize> {
        self.ensure_open("sweep")?;
        Ok(sweep_pass(&self.inner))
    }

    /// Snapshot a single entry's holder state, liveness, and idle time
    /// without refreshing its recency.
    pub fn inspect(&self, key: &K) -> Result<Option<EntryDiagnostics>> {
        self.ensure_open("inspect")?;

        let now = Instant::now();
        Ok(self
            .inner
            .entries
            .get(key)
            .map(|guard| guard.value().diagnostics(now)))
    }

    /// Number of physically present entries, which may include entries
    /// whose value has been reclaimed but not yet purged.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Snapshot the cache's counters.
    pub fn stats(&self) -> Result<CacheStatsSnapshot> {
        self.ensure_open("stats")?;
        Ok(self.inner.stats.snapshot())
    }

    /// Stop the sweeper, wait for it to terminate, and release all
    /// entries. Afterwards every other operation fails with
    /// [`Error::AlreadyDisposed`].
    ///
    /// Idempotent: the first caller performs the shutdown, later calls are
    /// no-ops. A panic inside the sweeper is a broken invariant and is
    /// resurfaced here rather than swallowed.
    pub async fn dispose(&self) -> Result<()> {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let _ = self.inner.shutdown_tx.send(true);
        let handle = self.inner.sweeper_handle.lock().take();
        if let Some(handle) = handle {
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => std::panic::resume_unwind(e.into_panic()),
            }
        }

        self.inner.entries.clear();
        tracing::debug!("cache disposed");
        Ok(())
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        if self.inner.disposed.load(Ordering::SeqCst) {
            return Err(Error::already_disposed(operation));
        }
        Ok(())
    }
}
