//! Strong-to-weak reference holders
//!
//! A [`ReferenceHolder`] starts out retaining its value and can be demoted
//! exactly once to a non-retaining weak handle. The reclaimable-handle
//! capability is `std::sync::Arc`/`Weak`: once demoted, the value lives
//! only as long as some caller still holds a strong reference, and the
//! holder observes reclamation through failed upgrades.

use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

enum Slot<T> {
    Strong(Arc<T>),
    Weak(Weak<T>),
}

/// A reference that is either strong (retaining) or weak (reclaimable).
///
/// The transition is one-way: there is no operation that writes a strong
/// state after construction, so a demoted holder can never be re-promoted.
pub struct ReferenceHolder<T> {
    slot: RwLock<Slot<T>>,
}

impl<T> ReferenceHolder<T> {
    /// Create a holder that strongly retains `value`.
    pub fn new_strong(value: Arc<T>) -> Self {
        Self {
            slot: RwLock::new(Slot::Strong(value)),
        }
    }

    /// Release the retaining reference, keeping only a weak handle.
    ///
    /// Returns `true` if the transition happened. Demoting an already-weak
    /// holder is a no-op returning `false`. From this point on the value is
    /// eligible for reclamation as soon as no caller holds a strong
    /// reference to it.
    pub fn demote(&self) -> bool {
        let mut slot = self.slot.write();
        if let Slot::Strong(value) = &*slot {
            let weak = Arc::downgrade(value);
            *slot = Slot::Weak(weak);
            true
        } else {
            false
        }
    }

    /// Return the value if it is still alive in either state.
    ///
    /// This is the only way reclamation is observed: a weak holder whose
    /// value has been reclaimed yields `None`.
    pub fn try_get(&self) -> Option<Arc<T>> {
        match &*self.slot.read() {
            Slot::Strong(value) => Some(Arc::clone(value)),
            Slot::Weak(weak) => weak.upgrade(),
        }
    }

    /// Whether the holder still retains its value.
    pub fn is_strong(&self) -> bool {
        matches!(&*self.slot.read(), Slot::Strong(_))
    }
}

impl<T> fmt::Debug for ReferenceHolder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_strong() { "strong" } else { "weak" };
        f.debug_struct("ReferenceHolder")
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_holder_retains_value() {
        let holder = ReferenceHolder::new_strong(Arc::new(41));
        assert!(holder.is_strong());
        assert_eq!(*holder.try_get().unwrap(), 41);
    }

    #[test]
    fn demotion_is_one_way_and_idempotent() {
        let value = Arc::new("v".to_string());
        let holder = ReferenceHolder::new_strong(Arc::clone(&value));
        assert!(holder.demote());
        assert!(!holder.is_strong());
        assert!(!holder.demote(), "second demotion is a no-op");
    }

    #[test]
    fn weak_holder_observes_reclamation() {
        let value = Arc::new(7u8);
        let holder = ReferenceHolder::new_strong(Arc::clone(&value));
        holder.demote();
        assert_eq!(
            *holder.try_get().unwrap(),
            7,
            "still live while the caller holds it"
        );
        drop(value);
        assert!(
            holder.try_get().is_none(),
            "reclaimed after the last strong reference is gone"
        );
    }

    #[test]
    fn strong_holder_keeps_value_alive_on_its_own() {
        let holder = ReferenceHolder::new_strong(Arc::new(vec![1, 2, 3]));
        assert_eq!(holder.try_get().unwrap().len(), 3);
    }
}
