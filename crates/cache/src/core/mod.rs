//! The weak-eviction cache itself
//!
//! Foreground `add`/`try_get`/`remove` traffic shares the key-to-entry
//! table with a single background sweeper. Structural mutations go through
//! the concurrent map's atomic per-key operations; per-entry state uses the
//! entry's own locks, so a sweep never blocks foreground traffic for longer
//! than one entry's critical section.

mod builder;
mod operations;
mod sweeper;
mod types;

pub use builder::Builder;
pub use types::{DemotionHook, WeakEvictionCache};

#[cfg(test)]
mod tests;
