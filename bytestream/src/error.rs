//! Error types for byte cursor operations.

use std::fmt;

/// Result type for byte cursor operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteError {
    /// A read requested more bytes than remain in the buffer.
    UnexpectedEof { requested: usize, available: usize },

    /// A write needed more space than remains in the buffer.
    BufferFull { needed: usize, available: usize },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected end of buffer: requested {requested} bytes, {available} available"
                )
            }
            Self::BufferFull { needed, available } => {
                write!(f, "buffer full: need {needed} bytes, {available} available")
            }
        }
    }
}

impl std::error::Error for ByteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = ByteError::UnexpectedEof {
            requested: 4,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn error_display_buffer_full() {
        let err = ByteError::BufferFull {
            needed: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ByteError>();
    }
}
