//! Property-based tests for the value container's core laws: text
//! round-trips, conversion totality, copy idempotence, and container
//! consistency.
use filtra_variant::{
    Color, FlatArray, GridArray, JaggedArray, Kind, Point, PointF, Range, RangeF, Size, TypeTag,
    Value,
};
use proptest::prelude::*;

mod strategies {
    use super::*;

    pub const NUMERIC_KINDS: [Kind; 8] = [
        Kind::Int8,
        Kind::Int16,
        Kind::Int32,
        Kind::UInt8,
        Kind::UInt16,
        Kind::UInt32,
        Kind::Float32,
        Kind::Float64,
    ];

    /// Finite doubles, weighted toward the boundary values that narrow
    /// formatters get wrong.
    pub fn finite_f64() -> impl Strategy<Value = f64> {
        prop_oneof![
            4 => any::<f64>().prop_filter("finite", |x| x.is_finite()),
            1 => prop::sample::select(vec![
                0.0,
                -0.0,
                f64::MAX,
                f64::MIN,
                f64::MIN_POSITIVE,
                5e-324,
                0.1,
                1e16,
                1e17,
            ]),
        ]
    }

    pub fn finite_f32() -> impl Strategy<Value = f32> {
        prop_oneof![
            4 => any::<f32>().prop_filter("finite", |x| x.is_finite()),
            1 => prop::sample::select(vec![0.0f32, -0.0, f32::MAX, f32::MIN_POSITIVE, 1e-45]),
        ]
    }

    fn numeric_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i8>().prop_map(Value::from),
            any::<i16>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            any::<u8>().prop_map(Value::from),
            any::<u16>().prop_map(Value::from),
            any::<u32>().prop_map(Value::from),
            finite_f32().prop_map(Value::from),
            finite_f64().prop_map(Value::from),
        ]
    }

    fn composite_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[a-zA-Z0-9 |\\[\\]]{0,20}".prop_map(Value::from),
            any::<u32>().prop_map(|argb| Value::from(Color(argb))),
            (any::<i32>(), any::<i32>()).prop_map(|(a, b)| Value::from(Range::new(a, b))),
            (finite_f64(), finite_f64()).prop_map(|(a, b)| Value::from(RangeF::new(a, b))),
            (any::<i32>(), any::<i32>()).prop_map(|(x, y)| Value::from(Point::new(x, y))),
            (finite_f64(), finite_f64()).prop_map(|(x, y)| Value::from(PointF::new(x, y))),
            (any::<i32>(), any::<i32>()).prop_map(|(w, h)| Value::from(Size::new(w, h))),
        ]
    }

    /// Scalar values of every kind with a canonical text form.
    pub fn encodable_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![numeric_scalar(), composite_scalar()]
    }
}

proptest! {
    #[test]
    fn scalar_text_round_trip(value in strategies::encodable_scalar()) {
        let encoded = value.encode().unwrap();
        let decoded = Value::decode(value.kind(), &encoded).unwrap();
        prop_assert_eq!(decoded.try_eq(&value), Ok(true), "via {:?}", encoded);
    }

    // String is the one kind whose encoding is the identity, so the text
    // form must survive decode byte-for-byte even with grammar characters.
    #[test]
    fn string_text_form_is_identity(s in "[ -~]{0,30}") {
        let value = Value::from(s.as_str());
        prop_assert_eq!(value.encode().unwrap(), s.clone());
        let decoded = Value::decode(Kind::String, &s).unwrap();
        prop_assert_eq!(decoded.try_eq(&value), Ok(true));
    }

    #[test]
    fn copy_is_structurally_equal(value in strategies::encodable_scalar()) {
        prop_assert_eq!(value.try_eq(&value.clone()), Ok(true));
    }

    #[test]
    fn int_widening_preserves_value(n in any::<i8>()) {
        let v = Value::from(n);
        for target in [Kind::Int16, Kind::Int32, Kind::Float32, Kind::Float64] {
            let widened = v.convert(target).unwrap();
            let back = widened.convert(Kind::Int8).unwrap();
            prop_assert_eq!(back.try_eq(&v), Ok(true));
        }
    }

    #[test]
    fn flat_set_then_get_returns_the_stored_value(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let mut a = FlatArray::new(Kind::Int32, values.len()).unwrap();
        for (i, n) in values.iter().enumerate() {
            a.set(i, &Value::from(*n)).unwrap();
        }
        for (i, n) in values.iter().enumerate() {
            prop_assert_eq!(a.get(i).unwrap(), Value::Int32(*n));
        }
        prop_assert!(a.get(values.len()).is_err());
    }

    #[test]
    fn flat_text_round_trip(values in prop::collection::vec(any::<i32>(), 0..12)) {
        let items: Vec<Value> = values.iter().copied().map(Value::from).collect();
        let a = FlatArray::from_values(Kind::Int32, items).unwrap();
        let encoded = Value::from(a.clone()).encode().unwrap();
        let decoded = Value::decode(TypeTag::flat(Kind::Int32), &encoded).unwrap();
        prop_assert_eq!(decoded.try_eq(&Value::from(a)), Ok(true));
        prop_assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn grid_text_round_trip(
        rows in 0usize..4,
        cols in 0usize..4,
        seed in prop::collection::vec(strategies::finite_f32(), 16),
    ) {
        let mut g = GridArray::new(Kind::Float32, rows, cols).unwrap();
        for row in 0..rows {
            for col in 0..cols {
                g.set(row, col, &Value::from(seed[row * cols + col])).unwrap();
            }
        }
        let encoded = Value::from(g.clone()).encode().unwrap();
        let decoded = Value::decode(TypeTag::grid(Kind::Float32), &encoded).unwrap();
        prop_assert_eq!(decoded.try_eq(&Value::from(g)), Ok(true));
        prop_assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn jagged_flatten_length_is_the_sum_of_sub_arrays(
        lens in prop::collection::vec(prop::option::of(0usize..8), 0..8),
    ) {
        let mut j = JaggedArray::new(Kind::Int32, lens.len()).unwrap();
        let mut expected = 0;
        for (i, len) in lens.iter().enumerate() {
            if let Some(len) = len {
                j.alloc_slot(i, *len).unwrap();
                expected += len;
            }
        }
        prop_assert_eq!(j.flatten().len(), expected);
    }

    #[test]
    fn jagged_text_round_trip(lens in prop::collection::vec(prop::option::of(0usize..5), 0..6)) {
        let mut j = JaggedArray::new(Kind::UInt16, lens.len()).unwrap();
        let mut counter = 0u16;
        for (i, len) in lens.iter().enumerate() {
            if let Some(len) = len {
                j.alloc_slot(i, *len).unwrap();
                for inner in 0..*len {
                    j.set(i, inner, &Value::from(counter)).unwrap();
                    counter += 1;
                }
            }
        }
        let encoded = Value::from(j.clone()).encode().unwrap();
        let decoded = Value::decode(TypeTag::jagged(Kind::UInt16), &encoded).unwrap();
        prop_assert_eq!(decoded.try_eq(&Value::from(j)), Ok(true));
        prop_assert_eq!(decoded.encode().unwrap(), encoded);
    }
}

#[test]
fn conversion_totality_over_numeric_kind_pairs() {
    for from in strategies::NUMERIC_KINDS {
        let one = Value::from(1u8).convert(from).unwrap();
        for to in strategies::NUMERIC_KINDS {
            let converted = one.convert(to).unwrap();
            assert_eq!(converted.kind(), to);
            // a representative in-range value survives the round through
            // the widest numeric type
            let wide = converted.convert(Kind::Float64).unwrap();
            assert_eq!(wide, Value::Float64(1.0), "{from} -> {to}");
        }
    }
}

#[test]
fn integer_boundary_values_round_trip() {
    let cases = [
        Value::from(i8::MIN),
        Value::from(i8::MAX),
        Value::from(i16::MIN),
        Value::from(i32::MIN),
        Value::from(i32::MAX),
        Value::from(u8::MAX),
        Value::from(u16::MAX),
        Value::from(u32::MAX),
    ];
    for value in cases {
        let encoded = value.encode().unwrap();
        let decoded = Value::decode(value.kind(), &encoded).unwrap();
        assert_eq!(decoded.try_eq(&value), Ok(true), "via {encoded:?}");
    }
}

#[test]
fn float_specials_round_trip_canonically() {
    for (x, token) in [
        (f64::NAN, "nan"),
        (f64::INFINITY, "inf"),
        (f64::NEG_INFINITY, "-inf"),
    ] {
        let value = Value::from(x);
        let encoded = value.encode().unwrap();
        assert_eq!(encoded, token);
        let decoded = Value::decode(Kind::Float64, &encoded).unwrap();
        assert_eq!(decoded.try_eq(&value), Ok(true));
    }
}
