//! Deterministic class registry hashing.

use blake3::Hasher;

use crate::class::ClassRegistry;
use crate::field::{FieldKind, ParamType};

/// Computes a deterministic hash for registry compatibility checking.
///
/// Peers compare this value out-of-band before trusting each other's field
/// indices; a mismatch is the schema desynchronization case that otherwise
/// surfaces as unknown-field decode errors.
#[must_use]
pub fn registry_hash(registry: &ClassRegistry) -> u64 {
    let mut hasher = Hasher::new();
    write_u32(&mut hasher, registry.classes.len() as u32);

    for class in &registry.classes {
        write_u16(&mut hasher, class.id.raw());
        write_str(&mut hasher, &class.name);
        write_u32(&mut hasher, class.fields.len() as u32);

        for field in &class.fields {
            write_str(&mut hasher, &field.name);
            write_kind(&mut hasher, &field.kind);
        }
    }

    let hash = hasher.finalize();
    let bytes = hash.as_bytes();
    u64::from_le_bytes(bytes[0..8].try_into().unwrap())
}

fn write_kind(hasher: &mut Hasher, kind: &FieldKind) {
    match kind {
        FieldKind::Method => write_u8(hasher, 0),
        FieldKind::Parameter(ty) => {
            write_u8(hasher, 1);
            write_param_type(hasher, ty);
        }
    }
}

fn write_param_type(hasher: &mut Hasher, ty: &ParamType) {
    match ty {
        ParamType::Bool => write_u8(hasher, 0),
        ParamType::U8 => write_u8(hasher, 1),
        ParamType::U16 => write_u8(hasher, 2),
        ParamType::U32 => write_u8(hasher, 3),
        ParamType::U64 => write_u8(hasher, 4),
        ParamType::I8 => write_u8(hasher, 5),
        ParamType::I16 => write_u8(hasher, 6),
        ParamType::I32 => write_u8(hasher, 7),
        ParamType::I64 => write_u8(hasher, 8),
        ParamType::F32 => write_u8(hasher, 9),
        ParamType::F64 => write_u8(hasher, 10),
        ParamType::Str { max_len } => {
            write_u8(hasher, 11);
            write_u16(hasher, *max_len);
        }
        ParamType::Blob { max_len } => {
            write_u8(hasher, 12);
            write_u16(hasher, *max_len);
        }
        ParamType::Vec3 => write_u8(hasher, 13),
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u16(hasher: &mut Hasher, value: u16) {
    hasher.update(&value.to_le_bytes());
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{ClassDescriptor, ClassId};
    use crate::field::FieldDescriptor;

    fn registry() -> ClassRegistry {
        let class = ClassDescriptor::new(ClassId::new(1), "Avatar")
            .field(FieldDescriptor::parameter("pos", ParamType::Vec3))
            .field(FieldDescriptor::parameter("name", ParamType::str(32)))
            .field(FieldDescriptor::method("play_emote"));
        ClassRegistry::new(vec![class]).unwrap()
    }

    #[test]
    fn registry_hash_is_stable() {
        let r = registry();
        assert_eq!(registry_hash(&r), registry_hash(&r));
    }

    #[test]
    fn registry_hash_changes_with_field_order() {
        let a = ClassRegistry::new(vec![ClassDescriptor::new(ClassId::new(1), "A")
            .field(FieldDescriptor::parameter("x", ParamType::U8))
            .field(FieldDescriptor::parameter("y", ParamType::U16))])
        .unwrap();
        let b = ClassRegistry::new(vec![ClassDescriptor::new(ClassId::new(1), "A")
            .field(FieldDescriptor::parameter("y", ParamType::U16))
            .field(FieldDescriptor::parameter("x", ParamType::U8))])
        .unwrap();
        assert_ne!(registry_hash(&a), registry_hash(&b));
    }

    #[test]
    fn registry_hash_changes_with_param_type() {
        let a = ClassRegistry::new(vec![ClassDescriptor::new(ClassId::new(1), "A")
            .field(FieldDescriptor::parameter("x", ParamType::str(16)))])
        .unwrap();
        let b = ClassRegistry::new(vec![ClassDescriptor::new(ClassId::new(1), "A")
            .field(FieldDescriptor::parameter("x", ParamType::str(17)))])
        .unwrap();
        assert_ne!(registry_hash(&a), registry_hash(&b));
    }

    #[test]
    fn registry_hash_distinguishes_method_from_parameter() {
        let a = ClassRegistry::new(vec![ClassDescriptor::new(ClassId::new(1), "A")
            .field(FieldDescriptor::parameter("x", ParamType::Bool))])
        .unwrap();
        let b = ClassRegistry::new(vec![
            ClassDescriptor::new(ClassId::new(1), "A").field(FieldDescriptor::method("x"))
        ])
        .unwrap();
        assert_ne!(registry_hash(&a), registry_hash(&b));
    }

    #[test]
    fn empty_registry_hashes() {
        let empty = ClassRegistry::default();
        assert_ne!(registry_hash(&empty), registry_hash(&registry()));
    }
}
