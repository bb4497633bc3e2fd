//! Field descriptors and parameter type definitions.

/// The wire type of a parameter field (representation only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamType {
    /// Boolean (one byte, 0 or 1).
    Bool,

    /// Unsigned integers, fixed width.
    U8,
    U16,
    U32,
    U64,

    /// Signed integers, fixed width.
    I8,
    I16,
    I32,
    I64,

    /// IEEE-754 floats.
    F32,
    F64,

    /// UTF-8 string, `u16` length prefix.
    Str { max_len: u16 },

    /// Raw bytes, `u16` length prefix.
    Blob { max_len: u16 },

    /// Three `f32` components.
    Vec3,
}

impl ParamType {
    /// Creates a boolean parameter type.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Bool
    }

    /// Creates a string parameter type with a length cap.
    #[must_use]
    pub const fn str(max_len: u16) -> Self {
        Self::Str { max_len }
    }

    /// Creates a blob parameter type with a length cap.
    #[must_use]
    pub const fn blob(max_len: u16) -> Self {
        Self::Blob { max_len }
    }

    /// Creates a three-component vector parameter type.
    #[must_use]
    pub const fn vec3() -> Self {
        Self::Vec3
    }
}

/// What a field on a class is: a replicated parameter or a method slot.
///
/// Method fields occupy an index in the inherited field table (so indices
/// stay stable across the whole class) but are never packed into snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    Parameter(ParamType),
    Method,
}

/// A field definition within a class's inherited field table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a parameter field.
    #[must_use]
    pub fn parameter(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Parameter(ty),
        }
    }

    /// Creates a method field (never packed).
    #[must_use]
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Method,
        }
    }

    /// Returns the parameter type, or `None` for method fields.
    #[must_use]
    pub const fn as_parameter(&self) -> Option<&ParamType> {
        match &self.kind {
            FieldKind::Parameter(ty) => Some(ty),
            FieldKind::Method => None,
        }
    }
}
