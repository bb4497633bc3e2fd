//! Update header types and read/write helpers.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{DecodeError, LimitKind, WireResult};
use crate::limits::Limits;

/// Update header size in bytes: tick(4) + delta_flag(1) + object_count(2).
pub const HEADER_SIZE: usize = 4 + 1 + 2;

/// Per-object header size in bytes: object_id(4) + field_count(2).
pub const OBJECT_HEADER_SIZE: usize = 4 + 2;

/// The kind of state update a message carries.
///
/// Encoded as the single delta-flag byte following the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Full state for every emitted field.
    Absolute,
    /// Only fields changed since the recipient's acknowledged tick.
    Delta,
}

impl UpdateKind {
    /// Returns the delta-flag byte for this kind.
    #[must_use]
    pub const fn flag(self) -> u8 {
        match self {
            Self::Absolute => 0,
            Self::Delta => 1,
        }
    }

    /// Parses a delta-flag byte.
    pub const fn from_flag(flag: u8) -> WireResult<Self> {
        match flag {
            0 => Ok(Self::Absolute),
            1 => Ok(Self::Delta),
            _ => Err(DecodeError::InvalidDeltaFlag { flag }),
        }
    }
}

/// Header of an update message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateHeader {
    /// Simulation tick this update represents. For deltas, the *to* tick.
    pub tick: u32,
    /// Absolute or delta.
    pub kind: UpdateKind,
    /// Number of object blocks following the header.
    pub object_count: u16,
}

impl UpdateHeader {
    /// Creates a header for an absolute update.
    #[must_use]
    pub const fn absolute(tick: u32, object_count: u16) -> Self {
        Self {
            tick,
            kind: UpdateKind::Absolute,
            object_count,
        }
    }

    /// Creates a header for a delta update.
    #[must_use]
    pub const fn delta(tick: u32, object_count: u16) -> Self {
        Self {
            tick,
            kind: UpdateKind::Delta,
            object_count,
        }
    }
}

/// Header of one object block within an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    /// Stable object identifier.
    pub object_id: u32,
    /// Number of `(field_index, bytes)` pairs following.
    pub field_count: u16,
}

/// Writes an update header.
pub fn write_update_header(
    writer: &mut ByteWriter<'_>,
    header: &UpdateHeader,
) -> bytestream::ByteResult<()> {
    writer.write_u32(header.tick)?;
    writer.write_u8(header.kind.flag())?;
    writer.write_u16(header.object_count)?;
    Ok(())
}

/// Reads and validates an update header.
pub fn read_update_header(reader: &mut ByteReader<'_>, limits: &Limits) -> WireResult<UpdateHeader> {
    let tick = reader.read_u32()?;
    let kind = UpdateKind::from_flag(reader.read_u8()?)?;
    let object_count = reader.read_u16()?;

    if object_count as usize > limits.max_objects {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::Objects,
            limit: limits.max_objects,
            actual: object_count as usize,
        });
    }

    Ok(UpdateHeader {
        tick,
        kind,
        object_count,
    })
}

/// Writes an object block header.
pub fn write_object_header(
    writer: &mut ByteWriter<'_>,
    header: &ObjectHeader,
) -> bytestream::ByteResult<()> {
    writer.write_u32(header.object_id)?;
    writer.write_u16(header.field_count)?;
    Ok(())
}

/// Reads and validates an object block header.
pub fn read_object_header(reader: &mut ByteReader<'_>, limits: &Limits) -> WireResult<ObjectHeader> {
    let object_id = reader.read_u32()?;
    let field_count = reader.read_u16()?;

    if field_count as usize > limits.max_fields_per_object {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::FieldsPerObject,
            limit: limits.max_fields_per_object,
            actual: field_count as usize,
        });
    }

    Ok(ObjectHeader {
        object_id,
        field_count,
    })
}
