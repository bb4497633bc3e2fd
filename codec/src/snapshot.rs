//! Frame snapshots: all objects' packed state at one tick.

use std::collections::BTreeSet;
use std::sync::Arc;

use schema::ClassDescriptor;

use crate::error::{CodecError, CodecResult};
use crate::packed::PackedObject;
use crate::types::{ObjectId, Tick, ZoneId};

/// One object's identity and packed state within a snapshot.
///
/// An entry always carries its packed object; absence of an entry in a slot
/// is what "does not exist this tick" means.
#[derive(Debug, Clone)]
pub struct FrameSnapshotEntry {
    class: Arc<ClassDescriptor>,
    object_id: ObjectId,
    zone: ZoneId,
    packed: Arc<PackedObject>,
}

impl FrameSnapshotEntry {
    /// Creates a snapshot entry.
    #[must_use]
    pub const fn new(
        class: Arc<ClassDescriptor>,
        object_id: ObjectId,
        zone: ZoneId,
        packed: Arc<PackedObject>,
    ) -> Self {
        Self {
            class,
            object_id,
            zone,
            packed,
        }
    }

    /// Returns the entry's class descriptor.
    #[must_use]
    pub const fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    /// Returns the entry's object id.
    #[must_use]
    pub const fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Returns the entry's interest zone.
    #[must_use]
    pub const fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Returns the entry's packed state.
    #[must_use]
    pub const fn packed(&self) -> &Arc<PackedObject> {
        &self.packed
    }
}

/// All objects' packed state at one tick.
///
/// A growable arena of entry slots plus an ordered valid-index set. Slots are
/// addressed by caller-chosen indices; iteration visits valid entries in
/// ascending slot order. Once fully packed the snapshot is treated as sealed:
/// formatting only reads.
#[derive(Debug)]
pub struct FrameSnapshot {
    tick: Tick,
    slots: Vec<Option<FrameSnapshotEntry>>,
    valid: BTreeSet<usize>,
}

impl FrameSnapshot {
    /// Creates an empty snapshot for `tick`.
    #[must_use]
    pub const fn new(tick: Tick) -> Self {
        Self {
            tick,
            slots: Vec::new(),
            valid: BTreeSet::new(),
        }
    }

    /// Creates an empty snapshot with pre-allocated slot capacity.
    #[must_use]
    pub fn with_capacity(tick: Tick, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            tick,
            slots,
            valid: BTreeSet::new(),
        }
    }

    /// Returns the snapshot's tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Returns the number of valid entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.valid.len()
    }

    /// Returns `true` if no entries are valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Returns the number of allocated slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Places an entry in a slot and marks it valid, growing the arena as
    /// needed. Inserting into an occupied slot is an error.
    pub fn insert(&mut self, index: usize, entry: FrameSnapshotEntry) -> CodecResult<()> {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        if self.slots[index].is_some() {
            return Err(CodecError::EntryOccupied { index });
        }
        self.slots[index] = Some(entry);
        self.valid.insert(index);
        Ok(())
    }

    /// Returns the entry in `index`, if valid.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&FrameSnapshotEntry> {
        self.slots.get(index)?.as_ref()
    }

    /// Removes and returns the entry in `index`.
    pub fn remove(&mut self, index: usize) -> Option<FrameSnapshotEntry> {
        let entry = self.slots.get_mut(index)?.take();
        if entry.is_some() {
            self.valid.remove(&index);
        }
        entry
    }

    /// Iterates valid entries in ascending slot order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &FrameSnapshotEntry)> {
        self.valid
            .iter()
            .filter_map(move |&index| self.slots[index].as_ref().map(|entry| (index, entry)))
    }

    /// Finds the entry for an object id, if present.
    #[must_use]
    pub fn find_object(&self, object_id: ObjectId) -> Option<&FrameSnapshotEntry> {
        self.entries()
            .map(|(_, entry)| entry)
            .find(|entry| entry.object_id() == object_id)
    }
}
