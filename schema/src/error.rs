//! Error types for schema validation and value coding.

use std::fmt;

use crate::ClassId;

/// Result type for schema validation.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for value pack/unpack operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur while validating a class registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two classes share an id.
    DuplicateClassId { id: ClassId },

    /// Two fields on one class share a name.
    DuplicateFieldName { class: ClassId, name: String },

    /// A class has more fields than a `u16` index can address.
    TooManyFields { class: ClassId, count: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateClassId { id } => {
                write!(f, "duplicate class id {}", id.raw())
            }
            Self::DuplicateFieldName { class, name } => {
                write!(f, "duplicate field name {name:?} on class {}", class.raw())
            }
            Self::TooManyFields { class, count } => {
                write!(f, "class {} has {count} fields, max 65535", class.raw())
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors that can occur while packing or unpacking a parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The value's variant does not match the parameter type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An unsigned value does not fit the parameter width.
    UnsignedOutOfRange { max: u64, value: u64 },

    /// A signed value does not fit the parameter width.
    SignedOutOfRange { min: i64, max: i64, value: i64 },

    /// A string exceeds the declared cap.
    StringTooLong { len: usize, max: u16 },

    /// A blob exceeds the declared cap.
    BlobTooLong { len: usize, max: u16 },

    /// A boolean byte was neither 0 nor 1.
    InvalidBool { raw: u8 },

    /// String bytes were not valid UTF-8.
    InvalidUtf8,

    /// Underlying byte cursor error (truncation).
    Byte(bytestream::ByteError),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
            Self::UnsignedOutOfRange { max, value } => {
                write!(f, "unsigned value {value} exceeds max {max}")
            }
            Self::SignedOutOfRange { min, max, value } => {
                write!(f, "signed value {value} outside [{min}, {max}]")
            }
            Self::StringTooLong { len, max } => {
                write!(f, "string of {len} bytes exceeds cap {max}")
            }
            Self::BlobTooLong { len, max } => {
                write!(f, "blob of {len} bytes exceeds cap {max}")
            }
            Self::InvalidBool { raw } => {
                write!(f, "invalid bool byte 0x{raw:02X}")
            }
            Self::InvalidUtf8 => {
                write!(f, "string bytes are not valid UTF-8")
            }
            Self::Byte(e) => write!(f, "byte cursor error: {e}"),
        }
    }
}

impl std::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Byte(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bytestream::ByteError> for ValueError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Byte(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display() {
        let err = SchemaError::DuplicateFieldName {
            class: ClassId::new(3),
            name: "pos".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("pos"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn value_error_display_type_mismatch() {
        let err = ValueError::TypeMismatch {
            expected: "u32",
            found: "str",
        };
        assert!(err.to_string().contains("u32"));
    }

    #[test]
    fn value_error_from_byte_error() {
        let err: ValueError = bytestream::ByteError::UnexpectedEof {
            requested: 4,
            available: 0,
        }
        .into();
        assert!(matches!(err, ValueError::Byte(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<SchemaError>();
        assert_error::<ValueError>();
    }
}
