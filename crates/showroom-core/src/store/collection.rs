// ── Reactive resource collection ──
//
// Concurrent id lookups backed by `DashMap`, plus an ordered snapshot
// pushed to subscribers through a `watch` channel. The backend's list
// order is preserved in the snapshot. Each replacement carries the
// generation of the fetch that produced it; an older generation never
// overwrites a newer one.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::EntityId;

pub(crate) type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Local cache of one resource list. Replaced wholesale on every load.
pub(crate) struct ResourceCollection<T: Send + Sync + 'static> {
    by_id: DashMap<EntityId, Arc<T>>,

    /// Bumped on every replacement, including no-op ones.
    version: watch::Sender<u64>,

    snapshot: watch::Sender<Snapshot<T>>,

    /// Generation of the last applied replacement.
    applied: Mutex<u64>,
}

impl<T: Send + Sync + 'static> ResourceCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
            applied: Mutex::new(0),
        }
    }

    /// Swap in a freshly fetched list, keeping its order. Returns `false`
    /// (and changes nothing) when a newer generation was already applied.
    pub(crate) fn replace_all(&self, generation: u64, items: Vec<(EntityId, T)>) -> bool {
        let mut applied = self.applied.lock().unwrap_or_else(PoisonError::into_inner);
        if generation <= *applied {
            return false;
        }
        *applied = generation;

        let ordered: Vec<(EntityId, Arc<T>)> = items
            .into_iter()
            .map(|(id, item)| (id, Arc::new(item)))
            .collect();

        // Drop rows that disappeared since the previous load.
        let fresh: HashSet<EntityId> = ordered.iter().map(|(id, _)| *id).collect();
        self.by_id.retain(|id, _| fresh.contains(id));
        for (id, item) in &ordered {
            self.by_id.insert(*id, Arc::clone(item));
        }

        self.publish(ordered.into_iter().map(|(_, item)| item).collect());
        true
    }

    /// Remove all entities, unless a newer generation was applied.
    pub(crate) fn clear(&self, generation: u64) -> bool {
        self.replace_all(generation, Vec::new())
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<Arc<T>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn publish(&self, values: Vec<Arc<T>>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}
