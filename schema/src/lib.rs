//! Class descriptors and field value codec for the tickrep codec.
//!
//! This crate defines how replicated object state is described and encoded:
//! - Class descriptors: the flattened, inheritance-ordered field table of a
//!   replicable class
//! - Field descriptors: parameter fields (replicated values) vs method fields
//!   (RPC slots, never packed)
//! - The parameter value codec: `pack` / `unpack` / defaults, one byte-exact
//!   encoding per parameter type
//! - Deterministic registry hashing for desynchronization detection
//!
//! # Encoding convention
//!
//! All values encode little-endian with fixed widths; strings and blobs carry
//! a `u16` length prefix. The encoding is byte-exact: equal values always
//! produce identical bytes, which is what the delta layer's byte comparison
//! relies on.

mod class;
mod error;
mod field;
mod hash;
mod value;

pub use class::{ClassDescriptor, ClassId, ClassRegistry};
pub use error::{SchemaError, SchemaResult, ValueError, ValueResult};
pub use field::{FieldDescriptor, FieldKind, ParamType};
pub use hash::registry_hash;
pub use value::ParamValue;

/// A 0-based position in a class's inherited field table.
pub type FieldIndex = u16;

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn public_api_exports() {
        let _ = ClassId::new(1);
        let _ = ParamType::bool();
        let _ = ParamValue::Bool(true);

        let _: SchemaResult<()> = Ok(());
        let _: ValueResult<()> = Ok(());
    }

    #[test]
    fn field_index_size_matches_wire_format() {
        assert_eq!(size_of::<FieldIndex>(), 2);
    }
}
