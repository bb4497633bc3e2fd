//! Class descriptors and the class registry.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::field::FieldDescriptor;
use crate::FieldIndex;

/// A stable class identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassId(u16);

impl ClassId {
    /// Creates a new class id.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw class id value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for ClassId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<ClassId> for u16 {
    fn from(id: ClassId) -> Self {
        id.0
    }
}

/// A replicable class: its id, name, and flattened inherited field table.
///
/// The field table is already in inheritance order (base-class fields first);
/// how that flattening is produced is the declaring layer's business. Field
/// indices are positions in this table and are stable for the lifetime of the
/// schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDescriptor {
    pub id: ClassId,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    /// Creates a new class with no fields.
    #[must_use]
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the end of the inherited field table.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the number of fields in the inherited field table.
    #[must_use]
    pub fn num_inherited_fields(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field at `index`, or `None` if out of range.
    #[must_use]
    pub fn inherited_field(&self, index: FieldIndex) -> Option<&FieldDescriptor> {
        self.fields.get(index as usize)
    }

    /// Validates per-class invariants.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.fields.len() > usize::from(FieldIndex::MAX) {
            return Err(SchemaError::TooManyFields {
                class: self.id,
                count: self.fields.len(),
            });
        }
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName {
                    class: self.id,
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// An ordered registry of class descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassRegistry {
    pub classes: Vec<ClassDescriptor>,
}

impl ClassRegistry {
    /// Creates a registry from classes after validation.
    pub fn new(classes: Vec<ClassDescriptor>) -> SchemaResult<Self> {
        let registry = Self { classes };
        registry.validate()?;
        Ok(registry)
    }

    /// Validates registry invariants.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut ids = HashSet::new();
        for class in &self.classes {
            if !ids.insert(class.id) {
                return Err(SchemaError::DuplicateClassId { id: class.id });
            }
            class.validate()?;
        }
        Ok(())
    }

    /// Looks up a class by id.
    #[must_use]
    pub fn get(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.id == id)
    }
}
