//! Snapshot packing orchestration and per-recipient update formatting.

use std::collections::HashMap;
use std::sync::Arc;

use bytestream::ByteWriter;
use schema::{ClassDescriptor, FieldIndex};
use wire::{write_object_header, write_update_header, ObjectHeader, UpdateHeader};

use crate::changes::ChangeFrameList;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::packed::{FieldDelta, PackedField, PackedObject};
use crate::snapshot::{FrameSnapshot, FrameSnapshotEntry};
use crate::state::ObjectState;
use crate::types::{ObjectId, Tick, ZoneId};

/// The cached "last sent" state of one object: the packed baseline plus its
/// change history. The history belongs to the evolving object, not to any one
/// packing; it moves to the replacement baseline when the state changes.
#[derive(Debug)]
struct Baseline {
    packed: Arc<PackedObject>,
    changes: ChangeFrameList,
}

/// Orchestrates per-tick packing and formats updates for recipients.
///
/// Exactly one encoding pass mutates a manager at a time (`&mut self` on the
/// packing path enforces this). Formatting methods take `&self` and never
/// mutate, so sealed snapshots can be formatted for many recipients
/// concurrently.
#[derive(Debug, Default)]
pub struct FrameSnapshotManager {
    baselines: HashMap<ObjectId, Baseline>,
    limits: CodecLimits,
}

impl FrameSnapshotManager {
    /// Creates a manager with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with explicit limits.
    #[must_use]
    pub fn with_limits(limits: CodecLimits) -> Self {
        Self {
            baselines: HashMap::new(),
            limits,
        }
    }

    /// Installs `packed` as the new cached baseline for its object id,
    /// replacing any prior baseline, and returns the shared handle.
    pub fn create_packed_object(
        &mut self,
        packed: PackedObject,
        changes: ChangeFrameList,
    ) -> Arc<PackedObject> {
        let object_id = packed.object_id();
        let packed = Arc::new(packed);
        self.baselines.insert(
            object_id,
            Baseline {
                packed: Arc::clone(&packed),
                changes,
            },
        );
        packed
    }

    /// Returns the cached baseline for an object, or `None` if it has never
    /// been packed (or was evicted).
    #[must_use]
    pub fn get_prev_sent_packet(&self, object_id: ObjectId) -> Option<&Arc<PackedObject>> {
        self.baselines.get(&object_id).map(|b| &b.packed)
    }

    /// Evicts the cached baseline and change history for an object.
    ///
    /// Mandatory on object destruction: a future object reusing this id must
    /// not inherit another object's change history. Returns `true` if a
    /// baseline was present.
    pub fn remove_prev_sent_packet(&mut self, object_id: ObjectId) -> bool {
        self.baselines.remove(&object_id).is_some()
    }

    /// Returns the field indices changed since `tick` for a tracked object.
    #[must_use]
    pub fn changed_fields_since(&self, object_id: ObjectId, tick: Tick) -> Option<Vec<FieldIndex>> {
        self.baselines
            .get(&object_id)
            .map(|b| b.changes.changed_since(tick))
    }

    /// Returns the number of tracked baselines.
    #[must_use]
    pub fn baseline_count(&self) -> usize {
        self.baselines.len()
    }

    /// Packs one object's current state into `snapshot` at `entry_index`.
    ///
    /// Every parameter field in the class's inherited order is encoded (codec
    /// default when the state has no value), the result is diffed against the
    /// cached baseline, and the change history is carried forward:
    ///
    /// - no baseline: fresh history stamped at the snapshot tick
    /// - identical state: the previous baseline is reused for the entry with
    ///   no new allocation and the cache is left untouched
    /// - incomparable (schema changed): fresh history, old history dropped
    /// - otherwise: the history moves off the outgoing baseline, changed
    ///   indices are stamped at the snapshot tick, and the new packing
    ///   becomes the baseline
    ///
    /// On a packing failure the snapshot entry is not marked valid and the
    /// cache is unchanged; other objects in the snapshot are unaffected.
    pub fn pack_object_in_snapshot(
        &mut self,
        snapshot: &mut FrameSnapshot,
        entry_index: usize,
        state: &dyn ObjectState,
        object_id: ObjectId,
        zone: ZoneId,
        class: &Arc<ClassDescriptor>,
    ) -> CodecResult<()> {
        let tick = snapshot.tick();
        let field_total = class.num_inherited_fields();

        let mut data = Vec::new();
        let mut fields = Vec::new();
        for raw_index in 0..field_total {
            let index = raw_index as FieldIndex;
            let Some(descriptor) = class.inherited_field(index) else {
                break;
            };
            let Some(param) = descriptor.as_parameter() else {
                continue;
            };
            let value = state
                .get_field(index)
                .unwrap_or_else(|| param.default_value());
            let offset = data.len();
            let length = param
                .pack(&value, &mut data)
                .map_err(|error| CodecError::Value {
                    object_id,
                    field_index: index,
                    error,
                })?;
            fields.push(PackedField {
                index,
                offset,
                length,
            });
        }

        if data.len() > self.limits.max_packed_bytes_per_object {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::PackedBytesPerObject,
                limit: self.limits.max_packed_bytes_per_object,
                actual: data.len(),
            });
        }

        let packed = PackedObject::new(object_id, Arc::clone(class), tick, data, fields);

        let action = match self.baselines.get(&object_id) {
            None => BaselineAction::Fresh,
            Some(prev) => match packed.calc_delta(&prev.packed) {
                FieldDelta::Incomparable => BaselineAction::Fresh,
                FieldDelta::Changed(changed) if changed.is_empty() => {
                    BaselineAction::Reuse(Arc::clone(&prev.packed))
                }
                FieldDelta::Changed(changed) => BaselineAction::Carry(changed),
            },
        };

        let (packed, changes) = match action {
            BaselineAction::Reuse(prev) => {
                snapshot.insert(
                    entry_index,
                    FrameSnapshotEntry::new(Arc::clone(class), object_id, zone, prev),
                )?;
                return Ok(());
            }
            BaselineAction::Fresh => (packed, ChangeFrameList::new(field_total, tick)),
            BaselineAction::Carry(changed) => {
                let taken = self.baselines.remove(&object_id).map(|b| b.changes);
                let mut changes = match taken {
                    Some(list) if list.field_count() == field_total => list,
                    _ => ChangeFrameList::new(field_total, tick),
                };
                changes.record_changes(&changed, tick);
                (packed, changes)
            }
        };

        let shared = self.create_packed_object(packed, changes);
        snapshot.insert(
            entry_index,
            FrameSnapshotEntry::new(Arc::clone(class), object_id, zone, shared),
        )?;
        Ok(())
    }

    /// Formats an **absolute** update for recipients interested in `zones`:
    /// every packed field of every in-zone entry. Used when a recipient has
    /// no baseline to diff against.
    ///
    /// Returns the number of bytes written to `out`.
    pub fn client_format_snapshot(
        &self,
        snapshot: &FrameSnapshot,
        zones: &[ZoneId],
        out: &mut [u8],
    ) -> CodecResult<usize> {
        let count = snapshot
            .entries()
            .filter(|(_, entry)| zones.contains(&entry.zone()))
            .count();
        self.check_object_count(count)?;

        let mut writer = ByteWriter::new(out);
        write_update_header(
            &mut writer,
            &UpdateHeader::absolute(snapshot.tick().raw(), count as u16),
        )?;

        for (_, entry) in snapshot.entries() {
            if !zones.contains(&entry.zone()) {
                continue;
            }
            let packed = entry.packed();
            write_object_header(
                &mut writer,
                &ObjectHeader {
                    object_id: entry.object_id().raw(),
                    field_count: packed.fields().len() as u16,
                },
            )?;
            for field in packed.fields() {
                writer.write_u16(field.index)?;
                writer.write_bytes(
                    &packed.data()[field.offset..field.offset + field.length],
                )?;
            }
        }
        Ok(writer.finish())
    }

    /// Formats a **delta** update relative to a recipient's last-acknowledged
    /// tick (`from.tick()`): only fields changed since then, with objects
    /// whose fields are all unchanged omitted entirely.
    ///
    /// An in-zone entry whose change history is no longer tracked (the object
    /// was destroyed after the snapshot was sealed) degrades to a full resend
    /// of its packed fields.
    ///
    /// Returns the number of bytes written to `out`.
    pub fn client_format_delta_snapshot(
        &self,
        from: &FrameSnapshot,
        to: &FrameSnapshot,
        zones: &[ZoneId],
        out: &mut [u8],
    ) -> CodecResult<usize> {
        if from.tick() >= to.tick() {
            return Err(CodecError::InvalidTickOrder {
                from: from.tick(),
                to: to.tick(),
            });
        }

        let mut blocks: Vec<(&FrameSnapshotEntry, Vec<PackedField>)> = Vec::new();
        for (_, entry) in to.entries() {
            if !zones.contains(&entry.zone()) {
                continue;
            }
            let packed = entry.packed();
            let changed = self
                .changed_fields_since(entry.object_id(), from.tick())
                .unwrap_or_else(|| packed.fields().iter().map(|f| f.index).collect());
            // Change history covers the whole field table; keep only fields
            // this packing actually carries.
            let fields: Vec<PackedField> = packed
                .fields()
                .iter()
                .filter(|field| changed.contains(&field.index))
                .copied()
                .collect();
            if fields.is_empty() {
                continue;
            }
            blocks.push((entry, fields));
        }
        self.check_object_count(blocks.len())?;

        let mut writer = ByteWriter::new(out);
        write_update_header(
            &mut writer,
            &UpdateHeader::delta(to.tick().raw(), blocks.len() as u16),
        )?;

        for (entry, fields) in blocks {
            let packed = entry.packed();
            write_object_header(
                &mut writer,
                &ObjectHeader {
                    object_id: entry.object_id().raw(),
                    field_count: fields.len() as u16,
                },
            )?;
            for field in fields {
                writer.write_u16(field.index)?;
                writer.write_bytes(&packed.data()[field.offset..field.offset + field.length])?;
            }
        }
        Ok(writer.finish())
    }

    fn check_object_count(&self, count: usize) -> CodecResult<()> {
        let limit = self.limits.max_objects_per_update.min(u16::MAX as usize);
        if count > limit {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::ObjectsPerUpdate,
                limit,
                actual: count,
            });
        }
        Ok(())
    }
}

enum BaselineAction {
    Fresh,
    Reuse(Arc<PackedObject>),
    Carry(Vec<FieldIndex>),
}
