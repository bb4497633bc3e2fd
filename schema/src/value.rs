//! Parameter values and the pack/unpack codec.

use bytestream::ByteReader;

use crate::error::{ValueError, ValueResult};
use crate::field::ParamType;

/// A decoded parameter value.
///
/// Unsigned widths share the `UInt` variant and signed widths share `Int`;
/// the parameter type supplies the width when packing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParamValue {
    Bool(bool),
    UInt(u64),
    Int(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Blob(Vec<u8>),
    Vec3([f32; 3]),
}

impl ParamValue {
    fn name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::UInt(_) => "uint",
            Self::Int(_) => "int",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Str(_) => "str",
            Self::Blob(_) => "blob",
            Self::Vec3(_) => "vec3",
        }
    }
}

impl ParamType {
    const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str { .. } => "str",
            Self::Blob { .. } => "blob",
            Self::Vec3 => "vec3",
        }
    }

    /// Returns the default value for this parameter type.
    #[must_use]
    pub const fn default_value(&self) -> ParamValue {
        match self {
            Self::Bool => ParamValue::Bool(false),
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => ParamValue::UInt(0),
            Self::I8 | Self::I16 | Self::I32 | Self::I64 => ParamValue::Int(0),
            Self::F32 => ParamValue::F32(0.0),
            Self::F64 => ParamValue::F64(0.0),
            Self::Str { .. } => ParamValue::Str(String::new()),
            Self::Blob { .. } => ParamValue::Blob(Vec::new()),
            Self::Vec3 => ParamValue::Vec3([0.0; 3]),
        }
    }

    /// Returns the encoded bytes of the default value.
    #[must_use]
    pub fn default_bytes(&self) -> Vec<u8> {
        match self {
            Self::Bool | Self::U8 | Self::I8 => vec![0],
            Self::U16 | Self::I16 | Self::Str { .. } | Self::Blob { .. } => vec![0; 2],
            Self::U32 | Self::I32 | Self::F32 => vec![0; 4],
            Self::U64 | Self::I64 | Self::F64 => vec![0; 8],
            Self::Vec3 => vec![0; 12],
        }
    }

    /// Packs a value, appending its encoding to `out`.
    ///
    /// Returns the number of bytes appended. The value's variant must match
    /// this parameter type and fit its range.
    pub fn pack(&self, value: &ParamValue, out: &mut Vec<u8>) -> ValueResult<usize> {
        let start = out.len();
        match (self, value) {
            (Self::Bool, ParamValue::Bool(v)) => out.push(u8::from(*v)),
            (Self::U8, ParamValue::UInt(v)) => {
                out.push(check_unsigned(*v, u64::from(u8::MAX))? as u8);
            }
            (Self::U16, ParamValue::UInt(v)) => {
                let v = check_unsigned(*v, u64::from(u16::MAX))? as u16;
                out.extend_from_slice(&v.to_le_bytes());
            }
            (Self::U32, ParamValue::UInt(v)) => {
                let v = check_unsigned(*v, u64::from(u32::MAX))? as u32;
                out.extend_from_slice(&v.to_le_bytes());
            }
            (Self::U64, ParamValue::UInt(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::I8, ParamValue::Int(v)) => {
                let v = check_signed(*v, i64::from(i8::MIN), i64::from(i8::MAX))? as i8;
                out.push(v as u8);
            }
            (Self::I16, ParamValue::Int(v)) => {
                let v = check_signed(*v, i64::from(i16::MIN), i64::from(i16::MAX))? as i16;
                out.extend_from_slice(&v.to_le_bytes());
            }
            (Self::I32, ParamValue::Int(v)) => {
                let v = check_signed(*v, i64::from(i32::MIN), i64::from(i32::MAX))? as i32;
                out.extend_from_slice(&v.to_le_bytes());
            }
            (Self::I64, ParamValue::Int(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::F32, ParamValue::F32(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::F64, ParamValue::F64(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Str { max_len }, ParamValue::Str(s)) => {
                if s.len() > *max_len as usize {
                    return Err(ValueError::StringTooLong {
                        len: s.len(),
                        max: *max_len,
                    });
                }
                out.extend_from_slice(&(s.len() as u16).to_le_bytes());
                out.extend_from_slice(s.as_bytes());
            }
            (Self::Blob { max_len }, ParamValue::Blob(b)) => {
                if b.len() > *max_len as usize {
                    return Err(ValueError::BlobTooLong {
                        len: b.len(),
                        max: *max_len,
                    });
                }
                out.extend_from_slice(&(b.len() as u16).to_le_bytes());
                out.extend_from_slice(b);
            }
            (Self::Vec3, ParamValue::Vec3(v)) => {
                for component in v {
                    out.extend_from_slice(&component.to_le_bytes());
                }
            }
            (ty, value) => {
                return Err(ValueError::TypeMismatch {
                    expected: ty.name(),
                    found: value.name(),
                });
            }
        }
        Ok(out.len() - start)
    }

    /// Unpacks a value from the front of `bytes`.
    ///
    /// Returns the value and the number of bytes consumed.
    pub fn unpack(&self, bytes: &[u8]) -> ValueResult<(ParamValue, usize)> {
        let mut reader = ByteReader::new(bytes);
        let value = match self {
            Self::Bool => match reader.read_u8()? {
                0 => ParamValue::Bool(false),
                1 => ParamValue::Bool(true),
                raw => return Err(ValueError::InvalidBool { raw }),
            },
            Self::U8 => ParamValue::UInt(u64::from(reader.read_u8()?)),
            Self::U16 => ParamValue::UInt(u64::from(reader.read_u16()?)),
            Self::U32 => ParamValue::UInt(u64::from(reader.read_u32()?)),
            Self::U64 => ParamValue::UInt(reader.read_u64()?),
            Self::I8 => ParamValue::Int(i64::from(reader.read_i8()?)),
            Self::I16 => ParamValue::Int(i64::from(reader.read_i16()?)),
            Self::I32 => ParamValue::Int(i64::from(reader.read_i32()?)),
            Self::I64 => ParamValue::Int(reader.read_i64()?),
            Self::F32 => ParamValue::F32(reader.read_f32()?),
            Self::F64 => ParamValue::F64(reader.read_f64()?),
            Self::Str { max_len } => {
                let len = reader.read_u16()?;
                if len > *max_len {
                    return Err(ValueError::StringTooLong {
                        len: len as usize,
                        max: *max_len,
                    });
                }
                let raw = reader.read_bytes(len as usize)?;
                let s = std::str::from_utf8(raw).map_err(|_| ValueError::InvalidUtf8)?;
                ParamValue::Str(s.to_owned())
            }
            Self::Blob { max_len } => {
                let len = reader.read_u16()?;
                if len > *max_len {
                    return Err(ValueError::BlobTooLong {
                        len: len as usize,
                        max: *max_len,
                    });
                }
                ParamValue::Blob(reader.read_bytes(len as usize)?.to_vec())
            }
            Self::Vec3 => {
                let mut v = [0.0f32; 3];
                for component in &mut v {
                    *component = reader.read_f32()?;
                }
                ParamValue::Vec3(v)
            }
        };
        Ok((value, reader.position()))
    }
}

fn check_unsigned(value: u64, max: u64) -> ValueResult<u64> {
    if value > max {
        return Err(ValueError::UnsignedOutOfRange { max, value });
    }
    Ok(value)
}

fn check_signed(value: i64, min: i64, max: i64) -> ValueResult<i64> {
    if value < min || value > max {
        return Err(ValueError::SignedOutOfRange { min, max, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(ty: ParamType, value: ParamValue) {
        let mut buf = Vec::new();
        let written = ty.pack(&value, &mut buf).unwrap();
        assert_eq!(written, buf.len());
        let (decoded, consumed) = ty.unpack(&buf).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, value);
    }

    #[test]
    fn roundtrip_bool() {
        roundtrip(ParamType::Bool, ParamValue::Bool(true));
        roundtrip(ParamType::Bool, ParamValue::Bool(false));
    }

    #[test]
    fn roundtrip_unsigned_extremes() {
        roundtrip(ParamType::U8, ParamValue::UInt(0));
        roundtrip(ParamType::U8, ParamValue::UInt(u64::from(u8::MAX)));
        roundtrip(ParamType::U16, ParamValue::UInt(u64::from(u16::MAX)));
        roundtrip(ParamType::U32, ParamValue::UInt(u64::from(u32::MAX)));
        roundtrip(ParamType::U64, ParamValue::UInt(u64::MAX));
    }

    #[test]
    fn roundtrip_signed_extremes() {
        roundtrip(ParamType::I8, ParamValue::Int(i64::from(i8::MIN)));
        roundtrip(ParamType::I8, ParamValue::Int(i64::from(i8::MAX)));
        roundtrip(ParamType::I16, ParamValue::Int(i64::from(i16::MIN)));
        roundtrip(ParamType::I32, ParamValue::Int(i64::from(i32::MAX)));
        roundtrip(ParamType::I64, ParamValue::Int(i64::MIN));
        roundtrip(ParamType::I64, ParamValue::Int(i64::MAX));
    }

    #[test]
    fn roundtrip_floats() {
        roundtrip(ParamType::F32, ParamValue::F32(-1.5));
        roundtrip(ParamType::F64, ParamValue::F64(1e300));
    }

    #[test]
    fn roundtrip_empty_string_and_blob() {
        roundtrip(ParamType::str(16), ParamValue::Str(String::new()));
        roundtrip(ParamType::blob(16), ParamValue::Blob(Vec::new()));
    }

    #[test]
    fn roundtrip_string_and_blob() {
        roundtrip(ParamType::str(16), ParamValue::Str("avatar".into()));
        roundtrip(ParamType::blob(16), ParamValue::Blob(vec![0, 255, 7]));
    }

    #[test]
    fn roundtrip_vec3() {
        roundtrip(ParamType::Vec3, ParamValue::Vec3([1.0, -2.5, 1e10]));
    }

    #[test]
    fn pack_rejects_type_mismatch() {
        let mut buf = Vec::new();
        let err = ParamType::U8
            .pack(&ParamValue::Str("x".into()), &mut buf)
            .unwrap_err();
        assert!(matches!(err, ValueError::TypeMismatch { .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn pack_rejects_unsigned_overflow() {
        let mut buf = Vec::new();
        let err = ParamType::U8
            .pack(&ParamValue::UInt(256), &mut buf)
            .unwrap_err();
        assert!(matches!(err, ValueError::UnsignedOutOfRange { .. }));
    }

    #[test]
    fn pack_rejects_signed_overflow() {
        let mut buf = Vec::new();
        let err = ParamType::I16
            .pack(&ParamValue::Int(40_000), &mut buf)
            .unwrap_err();
        assert!(matches!(err, ValueError::SignedOutOfRange { .. }));
    }

    #[test]
    fn pack_rejects_oversized_string() {
        let mut buf = Vec::new();
        let err = ParamType::str(3)
            .pack(&ParamValue::Str("abcd".into()), &mut buf)
            .unwrap_err();
        assert!(matches!(err, ValueError::StringTooLong { len: 4, max: 3 }));
    }

    #[test]
    fn unpack_rejects_oversized_length_prefix() {
        // Length prefix of 5 with a cap of 3.
        let bytes = [5u8, 0, b'a', b'b', b'c', b'd', b'e'];
        let err = ParamType::str(3).unpack(&bytes).unwrap_err();
        assert!(matches!(err, ValueError::StringTooLong { len: 5, max: 3 }));
    }

    #[test]
    fn unpack_rejects_invalid_bool() {
        let err = ParamType::Bool.unpack(&[2]).unwrap_err();
        assert!(matches!(err, ValueError::InvalidBool { raw: 2 }));
    }

    #[test]
    fn unpack_rejects_invalid_utf8() {
        let bytes = [2u8, 0, 0xFF, 0xFE];
        let err = ParamType::str(8).unpack(&bytes).unwrap_err();
        assert!(matches!(err, ValueError::InvalidUtf8));
    }

    #[test]
    fn unpack_rejects_truncated_input() {
        let err = ParamType::U32.unpack(&[1, 2]).unwrap_err();
        assert!(matches!(err, ValueError::Byte(_)));
    }

    #[test]
    fn unpack_reports_consumed_bytes_not_total() {
        let mut buf = Vec::new();
        ParamType::U16.pack(&ParamValue::UInt(7), &mut buf).unwrap();
        buf.extend_from_slice(&[0xAA, 0xBB]); // trailing bytes of the next field
        let (value, consumed) = ParamType::U16.unpack(&buf).unwrap();
        assert_eq!(value, ParamValue::UInt(7));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn default_bytes_match_packed_default() {
        let types = [
            ParamType::Bool,
            ParamType::U8,
            ParamType::U16,
            ParamType::U32,
            ParamType::U64,
            ParamType::I8,
            ParamType::I16,
            ParamType::I32,
            ParamType::I64,
            ParamType::F32,
            ParamType::F64,
            ParamType::str(8),
            ParamType::blob(8),
            ParamType::Vec3,
        ];
        for ty in types {
            let mut packed = Vec::new();
            ty.pack(&ty.default_value(), &mut packed).unwrap();
            assert_eq!(packed, ty.default_bytes(), "{ty:?}");
        }
    }

    #[test]
    fn equal_values_pack_to_identical_bytes() {
        // The delta layer relies on byte-exact comparison.
        let mut a = Vec::new();
        let mut b = Vec::new();
        ParamType::Vec3
            .pack(&ParamValue::Vec3([1.0, 2.0, 3.0]), &mut a)
            .unwrap();
        ParamType::Vec3
            .pack(&ParamValue::Vec3([1.0, 2.0, 3.0]), &mut b)
            .unwrap();
        assert_eq!(a, b);
    }
}
