//! Capability traits for replicated object state access.

use std::sync::Arc;

use schema::{ClassDescriptor, FieldIndex, ParamValue};

use crate::types::ObjectId;

/// Typed field access for one replicable object.
///
/// This replaces dynamic attribute/proxy lookup with a fixed interface: the
/// packer reads current values through [`get_field`](Self::get_field) and the
/// receive path writes decoded values through [`set_field`](Self::set_field).
/// An implementation is free to intercept individual indices (the classic
/// "receive proxy") instead of storing the value directly.
pub trait ObjectState {
    /// Returns the current value for a field, or `None` to fall back to the
    /// parameter's codec default.
    fn get_field(&self, index: FieldIndex) -> Option<ParamValue>;

    /// Applies a decoded value to a field.
    ///
    /// Values are fully validated against the class schema before this is
    /// called, so application is infallible.
    fn set_field(&mut self, index: FieldIndex, value: ParamValue);
}

/// Lookup of known objects on the receiving side.
pub trait ObjectTable {
    /// Returns the class descriptor for an object id, or `None` if unknown.
    fn class_of(&self, id: ObjectId) -> Option<&Arc<ClassDescriptor>>;

    /// Returns mutable state access for an object id, or `None` if unknown.
    fn state_mut(&mut self, id: ObjectId) -> Option<&mut dyn ObjectState>;
}
