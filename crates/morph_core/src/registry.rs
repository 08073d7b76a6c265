//! Layout Registry - scoped snapshot storage keyed by layout identity
//!
//! The registry outlives the heroes that use it: an instance writes its
//! snapshot when it unmounts and whichever instance next mounts with the same
//! identity reads it back. Entries are never deleted by heroes; a stale entry
//! simply waits for an identity that may never come back.
//!
//! There is no global registry. Each transition group owns one (usually via
//! [`HeroContext`](crate::context::HeroContext)) and hands it to its heroes.
//!
//! Only one live instance per identity is expected at a time. Reads and
//! writes are individually guarded, but nothing spans a read and a later
//! write, so two instances sharing an identity resolve last-writer-wins.
//!
//! # Example
//!
//! ```rust
//! use morph_core::{LayoutRegistry, PropertySet, Snapshot};
//!
//! let registry = LayoutRegistry::new();
//! assert!(registry.read_snapshot(Some("avatar")).is_empty());
//!
//! registry.write_snapshot(Some("avatar"), Snapshot::from(PropertySet::new().with("x", 4.0)));
//! assert_eq!(registry.read_snapshot(Some("avatar")).x(), Some(4.0));
//!
//! // Without an identity nothing is read or written
//! registry.write_snapshot(None, Snapshot::new());
//! assert_eq!(registry.len(), 1);
//! ```

use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::snapshot::Snapshot;

/// An empty identity is treated like no identity at all
fn participating(identity: Option<&str>) -> Option<&str> {
    identity.filter(|id| !id.is_empty())
}

/// Registry shared between the heroes of one scope
pub type SharedRegistry = Arc<LayoutRegistry>;

/// Snapshot store keyed by layout identity
#[derive(Default)]
pub struct LayoutRegistry {
    snapshots: RwLock<FxHashMap<String, Snapshot>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedRegistry {
        Arc::new(Self::new())
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<String, Snapshot>> {
        self.snapshots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<String, Snapshot>> {
        self.snapshots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot recorded for `identity`, or an empty one
    ///
    /// An absent or empty identity never participates and always reads empty.
    pub fn read_snapshot(&self, identity: Option<&str>) -> Snapshot {
        let Some(identity) = participating(identity) else {
            return Snapshot::new();
        };
        let snapshot = self.get(identity).unwrap_or_default();
        tracing::trace!(identity, found = !snapshot.is_empty(), "layout registry read");
        snapshot
    }

    /// Record `snapshot` for `identity`, replacing any previous entry
    ///
    /// No-op when `identity` is `None` or empty.
    pub fn write_snapshot(&self, identity: Option<&str>, snapshot: Snapshot) {
        let Some(identity) = participating(identity) else {
            return;
        };
        tracing::trace!(identity, props = snapshot.properties().len(), "layout registry write");
        self.set(identity, snapshot);
    }

    /// Get the snapshot for a key if one exists
    pub fn get(&self, key: &str) -> Option<Snapshot> {
        self.read().get(key).cloned()
    }

    /// Set the snapshot for a key (overwrites)
    pub fn set(&self, key: &str, snapshot: Snapshot) {
        self.write().insert(key.to_string(), snapshot);
    }

    /// Drop the snapshot for a key
    pub fn remove(&self, key: &str) -> Option<Snapshot> {
        self.write().remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// All identities with a recorded snapshot
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Forget every snapshot (scope teardown)
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl std::fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutRegistry")
            .field("identities", &self.keys())
            .finish()
    }
}
