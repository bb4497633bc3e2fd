//! Error types for wire format operations.

use std::fmt;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// High-level decode errors for update framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Underlying byte cursor error (truncation).
    Byte(bytestream::ByteError),

    /// The delta-flag byte was neither 0 nor 1.
    InvalidDeltaFlag { flag: u8 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    MessageBytes,
    Objects,
    FieldsPerObject,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(e) => write!(f, "byte cursor error: {e}"),
            Self::InvalidDeltaFlag { flag } => {
                write!(f, "invalid delta flag: 0x{flag:02X}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MessageBytes => "message bytes",
            Self::Objects => "objects",
            Self::FieldsPerObject => "fields per object",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Byte(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bytestream::ByteError> for DecodeError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Byte(err)
    }
}
