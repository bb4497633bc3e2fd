//! Inspection and decoding helpers for captured tickrep update messages.
//!
//! A capture is the raw bytes of one update message. Walking past the field
//! headers requires knowing each object's class, so the tools take a
//! *capture manifest*: the class registry plus an object-id-to-class-id map,
//! as JSON.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytestream::ByteReader;
use codec::{decode_update, CodecLimits, ObjectId, ObjectState, ObjectTable};
use schema::{registry_hash, ClassDescriptor, ClassId, ClassRegistry, ParamValue};
use serde::{Deserialize, Serialize};
use wire::{read_object_header, read_update_header, UpdateKind};

/// The schema context for a capture: classes plus which class each object is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureManifest {
    pub registry: ClassRegistry,
    /// object id -> class id
    pub objects: HashMap<u32, u16>,
}

impl CaptureManifest {
    /// Validates the registry and resolves the object map into a lookup
    /// table usable by the codec.
    pub fn build_table(&self) -> Result<ManifestTable> {
        self.registry
            .validate()
            .map_err(|err| anyhow!("manifest registry invalid: {err}"))?;

        let mut classes = HashMap::new();
        for (&object_id, &class_id) in &self.objects {
            let class = self
                .registry
                .get(ClassId::new(class_id))
                .ok_or_else(|| anyhow!("object {object_id} references unknown class {class_id}"))?;
            classes.insert(ObjectId::new(object_id), Arc::new(class.clone()));
        }
        Ok(ManifestTable { classes })
    }

    /// Returns the registry's deterministic hash.
    #[must_use]
    pub fn registry_hash(&self) -> u64 {
        registry_hash(&self.registry)
    }
}

/// Read-only object lookup backed by a manifest. Decode-only: it exposes no
/// mutable state.
#[derive(Debug)]
pub struct ManifestTable {
    classes: HashMap<ObjectId, Arc<ClassDescriptor>>,
}

impl ObjectTable for ManifestTable {
    fn class_of(&self, id: ObjectId) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(&id)
    }

    fn state_mut(&mut self, _id: ObjectId) -> Option<&mut dyn ObjectState> {
        None
    }
}

/// Structure and size summary of one capture.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub total_bytes: usize,
    pub tick: u32,
    pub delta: bool,
    pub object_count: u16,
    /// Per-object breakdown; present only when a manifest was supplied.
    pub objects: Option<Vec<ObjectReport>>,
}

/// Size summary of one object block.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectReport {
    pub object_id: u32,
    pub field_count: u16,
    pub encoded_bytes: usize,
}

/// Summarizes a capture's header, and with a manifest its object blocks.
pub fn inspect_update(
    bytes: &[u8],
    manifest: Option<&CaptureManifest>,
    wire_limits: &wire::Limits,
) -> Result<InspectReport> {
    let mut reader = ByteReader::new(bytes);
    let header = read_update_header(&mut reader, wire_limits).context("read update header")?;

    let objects = match manifest {
        Some(manifest) => {
            let table = manifest.build_table()?;
            Some(walk_object_blocks(&mut reader, header.object_count, &table, wire_limits)?)
        }
        None => None,
    };

    Ok(InspectReport {
        total_bytes: bytes.len(),
        tick: header.tick,
        delta: header.kind == UpdateKind::Delta,
        object_count: header.object_count,
        objects,
    })
}

fn walk_object_blocks(
    reader: &mut ByteReader<'_>,
    object_count: u16,
    table: &ManifestTable,
    wire_limits: &wire::Limits,
) -> Result<Vec<ObjectReport>> {
    let mut reports = Vec::with_capacity(object_count as usize);
    for _ in 0..object_count {
        let start = reader.position();
        let block = read_object_header(reader, wire_limits).context("read object header")?;
        let class = table
            .class_of(ObjectId::new(block.object_id))
            .ok_or_else(|| anyhow!("object {} not in manifest", block.object_id))?;

        for _ in 0..block.field_count {
            let index = reader.read_u16().context("read field index")?;
            let field = class
                .inherited_field(index)
                .ok_or_else(|| anyhow!("field index {index} out of range"))?;
            let param = field
                .as_parameter()
                .ok_or_else(|| anyhow!("field {index} ({}) is a method", field.name))?;
            let (_, consumed) = param
                .unpack(reader.rest())
                .map_err(|err| anyhow!("field {index} ({}): {err}", field.name))?;
            reader.read_bytes(consumed).context("skip field bytes")?;
        }

        reports.push(ObjectReport {
            object_id: block.object_id,
            field_count: block.field_count,
            encoded_bytes: reader.position() - start,
        });
    }
    Ok(reports)
}

/// Fully decoded capture, field names resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeOutput {
    pub tick: u32,
    pub delta: bool,
    pub objects: Vec<DecodeObject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecodeObject {
    pub object_id: u32,
    pub fields: Vec<DecodeField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecodeField {
    pub index: u16,
    pub name: String,
    pub value: ParamValue,
}

/// Decodes a capture into named field values.
pub fn decode_update_output(
    bytes: &[u8],
    manifest: &CaptureManifest,
    wire_limits: &wire::Limits,
    codec_limits: &CodecLimits,
) -> Result<DecodeOutput> {
    let table = manifest.build_table()?;
    let decoded = decode_update(bytes, &table, wire_limits, codec_limits)
        .map_err(|err| anyhow!("decode failed: {err}"))?;

    let mut objects = Vec::with_capacity(decoded.objects.len());
    for object in decoded.objects {
        let class = table
            .class_of(object.object_id)
            .ok_or_else(|| anyhow!("object {} not in manifest", object.object_id.raw()))?;
        let fields = object
            .fields
            .into_iter()
            .map(|field| {
                let name = class
                    .inherited_field(field.index)
                    .map_or_else(String::new, |descriptor| descriptor.name.clone());
                DecodeField {
                    index: field.index,
                    name,
                    value: field.value,
                }
            })
            .collect();
        objects.push(DecodeObject {
            object_id: object.object_id.raw(),
            fields,
        });
    }

    Ok(DecodeOutput {
        tick: decoded.tick.raw(),
        delta: decoded.kind == UpdateKind::Delta,
        objects,
    })
}

/// Renders a decode as an indented human-readable listing.
#[must_use]
pub fn format_decode_pretty(output: &DecodeOutput) -> String {
    let kind = if output.delta { "delta" } else { "absolute" };
    let mut text = format!(
        "tick {} ({kind}), {} object(s)\n",
        output.tick,
        output.objects.len()
    );
    for object in &output.objects {
        let _ = writeln!(text, "  object {}", object.object_id);
        for field in &object.fields {
            let _ = writeln!(text, "    [{}] {} = {:?}", field.index, field.name, field.value);
        }
    }
    text
}
