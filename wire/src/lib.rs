//! Update-message framing and layout for the tickrep codec.
//!
//! This crate defines the byte layout shared by both update kinds:
//!
//! ```text
//! tick: u32 | delta_flag: u8 | object_count: u16
//!   then per object:  object_id: u32 | field_count: u16
//!   then per field:   field_index: u16 | raw encoded bytes
//! ```
//!
//! All integers are little-endian (see `bytestream`). The raw encoded bytes
//! of a field carry no length prefix; their extent is known only to the
//! schema layer, so walking past the field headers requires a class
//! descriptor and happens in `codec`, not here.

mod error;
mod header;
mod limits;

pub use error::{DecodeError, LimitKind, WireResult};
pub use header::{
    read_object_header, read_update_header, write_object_header, write_update_header, ObjectHeader,
    UpdateHeader, UpdateKind, HEADER_SIZE, OBJECT_HEADER_SIZE,
};
pub use limits::Limits;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = UpdateKind::Absolute;
        let _ = UpdateHeader::absolute(1, 0);
        let limits = Limits::default();
        assert!(limits.max_message_bytes > 0);

        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn header_sizes() {
        // tick(4) + delta_flag(1) + object_count(2)
        assert_eq!(HEADER_SIZE, 7);
        // object_id(4) + field_count(2)
        assert_eq!(OBJECT_HEADER_SIZE, 6);
    }
}
