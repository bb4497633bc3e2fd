//! Decoding and applying incoming update messages.
//!
//! Application is fail-closed: the whole message is decoded and validated
//! against the receiver's class table before any object state is touched.
//! Partially-applied object state is worse than none.

use bytestream::ByteReader;
use wire::{read_object_header, read_update_header, UpdateKind};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::state::ObjectTable;
use crate::types::{ObjectId, Tick};
use schema::{FieldIndex, ParamValue};

/// One decoded field of an object block.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub index: FieldIndex,
    pub value: ParamValue,
}

/// One decoded object block.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedObject {
    pub object_id: ObjectId,
    pub fields: Vec<DecodedField>,
}

/// A fully decoded update message.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedUpdate {
    pub tick: Tick,
    pub kind: UpdateKind,
    pub objects: Vec<DecodedObject>,
}

/// Decodes an update message against the receiver's class table.
///
/// Unknown object ids, out-of-range field indices, method-field indices, and
/// trailing bytes are hard errors: they indicate sender/receiver schema or
/// interest-set desynchronization and abort the whole message.
pub fn decode_update<T: ObjectTable + ?Sized>(
    bytes: &[u8],
    table: &T,
    wire_limits: &wire::Limits,
    limits: &CodecLimits,
) -> CodecResult<DecodedUpdate> {
    if bytes.len() > wire_limits.max_message_bytes {
        return Err(CodecError::Wire(wire::DecodeError::LimitsExceeded {
            kind: wire::LimitKind::MessageBytes,
            limit: wire_limits.max_message_bytes,
            actual: bytes.len(),
        }));
    }

    let mut reader = ByteReader::new(bytes);
    let header = read_update_header(&mut reader, wire_limits)?;
    if header.object_count as usize > limits.max_objects_per_update {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::ObjectsPerUpdate,
            limit: limits.max_objects_per_update,
            actual: header.object_count as usize,
        });
    }

    let mut objects = Vec::with_capacity(header.object_count as usize);
    for _ in 0..header.object_count {
        let block = read_object_header(&mut reader, wire_limits)?;
        let object_id = ObjectId::new(block.object_id);
        let Some(class) = table.class_of(object_id) else {
            return Err(CodecError::UnknownObject { object_id });
        };
        if block.field_count as usize > limits.max_fields_per_object {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::FieldsPerObject,
                limit: limits.max_fields_per_object,
                actual: block.field_count as usize,
            });
        }

        let mut fields = Vec::with_capacity(block.field_count as usize);
        for _ in 0..block.field_count {
            let index = reader.read_u16().map_err(wire::DecodeError::from)?;
            let Some(descriptor) = class.inherited_field(index) else {
                return Err(CodecError::UnknownField {
                    object_id,
                    field_index: index,
                    num_fields: class.num_inherited_fields(),
                });
            };
            let Some(param) = descriptor.as_parameter() else {
                return Err(CodecError::MethodField {
                    object_id,
                    field_index: index,
                });
            };
            let (value, consumed) = param.unpack(reader.rest()).map_err(|error| {
                CodecError::Value {
                    object_id,
                    field_index: index,
                    error,
                }
            })?;
            reader.read_bytes(consumed).map_err(wire::DecodeError::from)?;
            fields.push(DecodedField { index, value });
        }
        objects.push(DecodedObject { object_id, fields });
    }

    if !reader.is_empty() {
        return Err(CodecError::TrailingData {
            remaining: reader.remaining(),
        });
    }

    Ok(DecodedUpdate {
        tick: Tick::new(header.tick),
        kind: header.kind,
        objects,
    })
}

/// Decodes an update and applies every field to the receiver's objects.
///
/// The message is validated in full first; on any error no state is touched.
/// Returns the update's tick.
pub fn apply_update<T: ObjectTable + ?Sized>(
    bytes: &[u8],
    table: &mut T,
    wire_limits: &wire::Limits,
    limits: &CodecLimits,
) -> CodecResult<Tick> {
    let decoded = decode_update(bytes, table, wire_limits, limits)?;

    for object in &decoded.objects {
        if table.state_mut(object.object_id).is_none() {
            return Err(CodecError::UnknownObject {
                object_id: object.object_id,
            });
        }
    }

    for object in &decoded.objects {
        let Some(state) = table.state_mut(object.object_id) else {
            continue;
        };
        for field in &object.fields {
            state.set_field(field.index, field.value.clone());
        }
    }

    Ok(decoded.tick)
}
