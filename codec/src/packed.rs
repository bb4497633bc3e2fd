//! Immutable packed object state.

use std::sync::Arc;

use bytestream::ByteWriter;
use schema::{ClassDescriptor, FieldIndex};

use crate::error::CodecResult;
use crate::types::{ObjectId, Tick};

/// Location of one field's encoding inside a packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedField {
    pub index: FieldIndex,
    pub offset: usize,
    pub length: usize,
}

/// Result of diffing two packed objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDelta {
    /// The two states cannot be compared (field table size mismatch or an
    /// empty buffer); callers must treat every field as changed.
    Incomparable,

    /// Field indices whose encoding differs. Empty means identical state.
    Changed(Vec<FieldIndex>),
}

/// One object's fully-encoded field state for one tick.
///
/// Immutable after construction. The field table is in ascending field-index
/// order and spans the buffer without overlap; absent indices are simply
/// omitted (method fields, or unchanged fields in a sparse encoding).
#[derive(Debug)]
pub struct PackedObject {
    object_id: ObjectId,
    class: Arc<ClassDescriptor>,
    tick: Tick,
    data: Vec<u8>,
    fields: Vec<PackedField>,
}

impl PackedObject {
    /// Creates a packed object from an encoded buffer and its field table.
    #[must_use]
    pub fn new(
        object_id: ObjectId,
        class: Arc<ClassDescriptor>,
        tick: Tick,
        data: Vec<u8>,
        fields: Vec<PackedField>,
    ) -> Self {
        debug_assert!(
            fields.windows(2).all(|pair| pair[0].index < pair[1].index),
            "field table must be in ascending index order"
        );
        debug_assert!(
            fields
                .iter()
                .all(|field| field.offset + field.length <= data.len()),
            "field ranges must stay inside the buffer"
        );
        Self {
            object_id,
            class,
            tick,
            data,
            fields,
        }
    }

    /// Returns the owning object id.
    #[must_use]
    pub const fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Returns the owning class descriptor.
    #[must_use]
    pub const fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    /// Returns the tick this state was packed at.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Returns the encoded buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the field table.
    #[must_use]
    pub fn fields(&self) -> &[PackedField] {
        &self.fields
    }

    /// Returns the encoded bytes of one field, or `None` if not packed here.
    #[must_use]
    pub fn field_bytes(&self, index: FieldIndex) -> Option<&[u8]> {
        let slot = self
            .fields
            .binary_search_by_key(&index, |field| field.index)
            .ok()?;
        let field = &self.fields[slot];
        Some(&self.data[field.offset..field.offset + field.length])
    }

    /// Serializes this object standalone: `field_count: u16`, then per field
    /// `field_index: u16 | raw bytes`, in table order.
    pub fn pack_datagram(&self, out: &mut [u8]) -> CodecResult<usize> {
        let mut writer = ByteWriter::new(out);
        writer.write_u16(self.fields.len() as u16)?;
        for field in &self.fields {
            writer.write_u16(field.index)?;
            writer.write_bytes(&self.data[field.offset..field.offset + field.length])?;
        }
        Ok(writer.finish())
    }

    /// Diffs this state against a previous packing of the same object.
    ///
    /// Comparison is byte-exact per field: encoded length first (a length
    /// mismatch is definitionally a change), then the raw bytes. This detects
    /// any change in encoded representation without type-specific equality.
    #[must_use]
    pub fn calc_delta(&self, prev: &Self) -> FieldDelta {
        if self.fields.len() != prev.fields.len() || self.data.is_empty() || prev.data.is_empty() {
            return FieldDelta::Incomparable;
        }

        let mut changed = Vec::new();
        for (lhs, rhs) in self.fields.iter().zip(prev.fields.iter()) {
            if lhs.index != rhs.index || lhs.length != rhs.length {
                changed.push(lhs.index);
                continue;
            }
            let lhs_bytes = &self.data[lhs.offset..lhs.offset + lhs.length];
            let rhs_bytes = &prev.data[rhs.offset..rhs.offset + rhs.length];
            if lhs_bytes != rhs_bytes {
                changed.push(lhs.index);
            }
        }
        FieldDelta::Changed(changed)
    }
}
