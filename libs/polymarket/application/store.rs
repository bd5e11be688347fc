//! Snapshot state store
//!
//! The collector is the only writer. Readers such as the monitor get a
//! [`SnapshotView`], which exposes reads only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::Snapshot;

/// Latest snapshot per tracked instrument, keyed by token id
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: RwLock<HashMap<String, Arc<Snapshot>>>,
    /// Tracked token ids in discovery order
    tracked: RwLock<Vec<String>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only handle for other tasks
    pub fn view(self: &Arc<Self>) -> SnapshotView {
        SnapshotView {
            store: Arc::clone(self),
        }
    }

    /// Replace the tracked set and evict snapshots outside it.
    ///
    /// Returns the number of evicted snapshots.
    pub fn replace_tracked(&self, token_ids: Vec<String>) -> usize {
        let keep: HashSet<&str> = token_ids.iter().map(String::as_str).collect();

        let mut snapshots = self.snapshots.write();
        let before = snapshots.len();
        snapshots.retain(|token_id, _| keep.contains(token_id.as_str()));
        let evicted = before - snapshots.len();
        drop(snapshots);

        *self.tracked.write() = token_ids;
        evicted
    }

    /// Store the latest snapshot, replacing any previous one wholesale
    pub fn upsert(&self, snapshot: Snapshot) {
        self.snapshots
            .write()
            .insert(snapshot.token_id.clone(), Arc::new(snapshot));
    }

    /// Drop instruments from the tracked set along with their snapshots
    pub fn retire(&self, token_ids: &HashSet<String>) {
        if token_ids.is_empty() {
            return;
        }
        self.tracked.write().retain(|id| !token_ids.contains(id));
        self.snapshots
            .write()
            .retain(|token_id, _| !token_ids.contains(token_id));
    }

    pub fn get(&self, token_id: &str) -> Option<Arc<Snapshot>> {
        self.snapshots.read().get(token_id).cloned()
    }

    pub fn tracked_ids(&self) -> Vec<String> {
        self.tracked.read().clone()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }

    /// Up to `limit` snapshots following the tracked order
    pub fn snapshots_in_order(&self, limit: usize) -> Vec<Arc<Snapshot>> {
        let tracked = self.tracked.read();
        let snapshots = self.snapshots.read();
        tracked
            .iter()
            .filter_map(|id| snapshots.get(id).cloned())
            .take(limit)
            .collect()
    }
}

/// Read-only access to a [`SnapshotStore`]
#[derive(Debug, Clone)]
pub struct SnapshotView {
    store: Arc<SnapshotStore>,
}

impl SnapshotView {
    pub fn get(&self, token_id: &str) -> Option<Arc<Snapshot>> {
        self.store.get(token_id)
    }

    pub fn tracked_ids(&self) -> Vec<String> {
        self.store.tracked_ids()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn snapshots_in_order(&self, limit: usize) -> Vec<Arc<Snapshot>> {
        self.store.snapshots_in_order(limit)
    }
}
