//! Per-object change history.

use schema::FieldIndex;

use crate::types::Tick;

/// Per-field change history for one object across its lifetime.
///
/// Stores only the most recent tick at which each field's encoding changed,
/// so memory stays proportional to the field count regardless of how many
/// ticks have passed. The cost of that compression is deliberate: a field
/// that changed and later changed back is still reported as changed, which is
/// safe because the recipient's baseline still holds the old bytes.
///
/// The table size is fixed at construction; class schemas are static.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeFrameList {
    last_changed: Vec<Tick>,
}

impl ChangeFrameList {
    /// Creates a fresh history with every field stamped at `origin`.
    ///
    /// A fresh list means "everything changed at `origin`": queries against
    /// any earlier tick report all fields, which is what a recipient with no
    /// baseline needs.
    #[must_use]
    pub fn new(field_count: usize, origin: Tick) -> Self {
        Self {
            last_changed: vec![origin; field_count],
        }
    }

    /// Returns the number of fields tracked.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.last_changed.len()
    }

    /// Returns the last tick at which `index` changed, if in range.
    #[must_use]
    pub fn last_changed_tick(&self, index: FieldIndex) -> Option<Tick> {
        self.last_changed.get(index as usize).copied()
    }

    /// Stamps `tick` onto every listed field index.
    ///
    /// The authority clock is monotonic: `tick` must not precede a previously
    /// recorded tick. Out-of-range indices are ignored.
    pub fn record_changes(&mut self, fields: &[FieldIndex], tick: Tick) {
        for &index in fields {
            if let Some(slot) = self.last_changed.get_mut(index as usize) {
                debug_assert!(*slot <= tick, "change history ticks must be monotonic");
                *slot = tick;
            }
        }
    }

    /// Returns every field index whose last change is after `tick`.
    ///
    /// A field with `last_changed <= tick` is guaranteed unchanged since
    /// `tick`; any change would have bumped its stamp.
    #[must_use]
    pub fn changed_since(&self, tick: Tick) -> Vec<FieldIndex> {
        self.last_changed
            .iter()
            .enumerate()
            .filter(|(_, last)| **last > tick)
            .map(|(index, _)| index as FieldIndex)
            .collect()
    }
}
