//! Error types for codec operations.

use std::fmt;

use schema::{FieldIndex, ValueError};

use crate::types::{ObjectId, Tick};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during snapshot packing, formatting, and decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Wire framing error.
    Wire(wire::DecodeError),

    /// A field value failed to pack or unpack.
    Value {
        object_id: ObjectId,
        field_index: FieldIndex,
        error: ValueError,
    },

    /// Output buffer is too small.
    OutputTooSmall { needed: usize, available: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A snapshot slot already holds a valid entry.
    EntryOccupied { index: usize },

    /// Delta formatting requires the source snapshot to precede the target.
    InvalidTickOrder { from: Tick, to: Tick },

    /// An update referenced an object id the receiver does not know.
    UnknownObject { object_id: ObjectId },

    /// An update referenced a field index outside the class's field table.
    UnknownField {
        object_id: ObjectId,
        field_index: FieldIndex,
        num_fields: usize,
    },

    /// An update carried state for a method field.
    MethodField {
        object_id: ObjectId,
        field_index: FieldIndex,
    },

    /// Bytes remained after the last object block.
    TrailingData { remaining: usize },
}

/// Specific codec limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    ObjectsPerUpdate,
    FieldsPerObject,
    PackedBytesPerObject,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Value {
                object_id,
                field_index,
                error,
            } => {
                write!(
                    f,
                    "value error for object {} field {field_index}: {error}",
                    object_id.raw()
                )
            }
            Self::OutputTooSmall { needed, available } => {
                write!(f, "output too small: need {needed}, have {available}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::EntryOccupied { index } => {
                write!(f, "snapshot entry {index} already occupied")
            }
            Self::InvalidTickOrder { from, to } => {
                write!(
                    f,
                    "delta source tick {} is not before target tick {}",
                    from.raw(),
                    to.raw()
                )
            }
            Self::UnknownObject { object_id } => {
                write!(f, "unknown object {}", object_id.raw())
            }
            Self::UnknownField {
                object_id,
                field_index,
                num_fields,
            } => {
                write!(
                    f,
                    "field index {field_index} out of range for object {} ({num_fields} fields)",
                    object_id.raw()
                )
            }
            Self::MethodField {
                object_id,
                field_index,
            } => {
                write!(
                    f,
                    "field index {field_index} on object {} is a method, not state",
                    object_id.raw()
                )
            }
            Self::TrailingData { remaining } => {
                write!(f, "trailing data after last object: {remaining} bytes")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ObjectsPerUpdate => "objects per update",
            Self::FieldsPerObject => "fields per object",
            Self::PackedBytesPerObject => "packed bytes per object",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Value { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<bytestream::ByteError> for CodecError {
    fn from(err: bytestream::ByteError) -> Self {
        match err {
            bytestream::ByteError::BufferFull { needed, available } => {
                Self::OutputTooSmall { needed, available }
            }
            bytestream::ByteError::UnexpectedEof { .. } => Self::Wire(err.into()),
        }
    }
}
