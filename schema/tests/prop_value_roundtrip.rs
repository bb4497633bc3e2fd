use proptest::prelude::*;
use schema::{ParamType, ParamValue};

fn typed_value() -> impl Strategy<Value = (ParamType, ParamValue)> {
    prop_oneof![
        any::<bool>().prop_map(|v| (ParamType::Bool, ParamValue::Bool(v))),
        any::<u8>().prop_map(|v| (ParamType::U8, ParamValue::UInt(u64::from(v)))),
        any::<u16>().prop_map(|v| (ParamType::U16, ParamValue::UInt(u64::from(v)))),
        any::<u32>().prop_map(|v| (ParamType::U32, ParamValue::UInt(u64::from(v)))),
        any::<u64>().prop_map(|v| (ParamType::U64, ParamValue::UInt(v))),
        any::<i8>().prop_map(|v| (ParamType::I8, ParamValue::Int(i64::from(v)))),
        any::<i16>().prop_map(|v| (ParamType::I16, ParamValue::Int(i64::from(v)))),
        any::<i32>().prop_map(|v| (ParamType::I32, ParamValue::Int(i64::from(v)))),
        any::<i64>().prop_map(|v| (ParamType::I64, ParamValue::Int(v))),
        prop::num::f32::NORMAL.prop_map(|v| (ParamType::F32, ParamValue::F32(v))),
        prop::num::f64::NORMAL.prop_map(|v| (ParamType::F64, ParamValue::F64(v))),
        "[a-z0-9 ]{0,16}".prop_map(|s| (ParamType::str(16), ParamValue::Str(s))),
        prop::collection::vec(any::<u8>(), 0..16)
            .prop_map(|b| (ParamType::blob(16), ParamValue::Blob(b))),
        prop::array::uniform3(prop::num::f32::NORMAL)
            .prop_map(|v| (ParamType::Vec3, ParamValue::Vec3(v))),
    ]
}

proptest! {
    #[test]
    fn prop_pack_unpack_roundtrip((ty, value) in typed_value()) {
        let mut buf = Vec::new();
        let written = ty.pack(&value, &mut buf).unwrap();
        prop_assert_eq!(written, buf.len());

        let (decoded, consumed) = ty.unpack(&buf).unwrap();
        prop_assert_eq!(consumed, buf.len());
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_unpack_ignores_trailing_bytes((ty, value) in typed_value(), tail in prop::collection::vec(any::<u8>(), 1..8)) {
        let mut buf = Vec::new();
        ty.pack(&value, &mut buf).unwrap();
        let clean_len = buf.len();
        buf.extend_from_slice(&tail);

        let (decoded, consumed) = ty.unpack(&buf).unwrap();
        prop_assert_eq!(consumed, clean_len);
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_equal_values_encode_identically((ty, value) in typed_value()) {
        let mut a = Vec::new();
        let mut b = Vec::new();
        ty.pack(&value, &mut a).unwrap();
        ty.pack(&value, &mut b).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_unpack_arbitrary_bytes_never_panics((ty, _) in typed_value(), bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let _ = ty.unpack(&bytes);
    }
}
