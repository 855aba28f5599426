//! # Ledgers
//!
//! Run-scoped bookkeeping: which locations have been processed, and which
//! entities this engine created and has not yet settled.

use crate::{EntityId, ItemType, LocationId, Placement};
use std::collections::{HashMap, HashSet};

/// Locations already processed in the current run.
///
/// Entries are never removed while the run lasts, so a location the host
/// enumerates again is not rolled a second time.
#[derive(Debug, Clone, Default)]
pub struct VolumeLedger {
    seen: HashSet<LocationId>,
}

impl VolumeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unseen(&self, location: LocationId) -> bool {
        !self.seen.contains(&location)
    }

    /// Marks a location as processed. Returns true if it was not marked before.
    pub fn mark_seen(&mut self, location: LocationId) -> bool {
        self.seen.insert(location)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.seen.clear();
    }
}

/// An entity created by this engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub id: EntityId,
    pub item_name: String,
    pub item_type: ItemType,
    /// Location the entity was spawned at
    pub origin: LocationId,
    pub placement: Placement,
}

/// Entities this engine spawned and that are still in the world, in the
/// order they were registered.
#[derive(Debug, Clone, Default)]
pub struct LifecycleLedger {
    entities: HashMap<EntityId, TrackedEntity>,
    order: Vec<EntityId>,
}

impl LifecycleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entity: TrackedEntity) {
        let id = entity.id;
        if self.entities.insert(id, entity).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&TrackedEntity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<TrackedEntity> {
        let removed = self.entities.remove(&id)?;
        self.order.retain(|&tracked| tracked != id);
        Some(removed)
    }

    /// Snapshot of tracked ids in registration order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedEntity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
    }
}
