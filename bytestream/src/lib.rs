//! Low-level byte cursor primitives for the tickrep codec.
//!
//! All multi-byte integers are encoded little-endian. This is the single
//! endianness convention for the whole workspace; higher layers (wire, schema)
//! build on these primitives and never touch byte order themselves.
//!
//! # Design Principles
//!
//! - **Caller-provided buffers** - The writer borrows a `&mut [u8]` and
//!   reports how much it used; no allocation on the encode path.
//! - **Bounded reads** - Every read checks the remaining length and fails
//!   with a typed error instead of panicking.

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let mut buf = [0u8; 8];
        let writer = ByteWriter::new(&mut buf);
        assert_eq!(writer.position(), 0);

        let reader = ByteReader::new(&buf);
        assert_eq!(reader.remaining(), 8);

        let _: ByteResult<()> = Ok(());
    }
}
