use crate::{Value, ValueError};

/// Strict structural comparison shared by [`Value::try_eq`] and the array
/// containers.
///
/// The outcome is three-way: `Ok(true)` definitely equal, `Ok(false)`
/// definitely not equal, `Err` not comparable at all (differing type tags,
/// or container geometry that rules the comparison out). Floats compare
/// bit-exact; there is no epsilon tolerance.
pub(crate) fn strict_eq(a: &Value, b: &Value) -> Result<bool, ValueError> {
    match (a, b) {
        (Value::Empty, Value::Empty) | (Value::Null, Value::Null) => Ok(true),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Int8(x), Value::Int8(y)) => Ok(x == y),
        (Value::Int16(x), Value::Int16(y)) => Ok(x == y),
        (Value::Int32(x), Value::Int32(y)) => Ok(x == y),
        (Value::UInt8(x), Value::UInt8(y)) => Ok(x == y),
        (Value::UInt16(x), Value::UInt16(y)) => Ok(x == y),
        (Value::UInt32(x), Value::UInt32(y)) => Ok(x == y),
        (Value::Float32(x), Value::Float32(y)) => Ok(x.to_bits() == y.to_bits()),
        (Value::Float64(x), Value::Float64(y)) => Ok(x.to_bits() == y.to_bits()),
        (Value::String(x), Value::String(y)) => Ok(x == y),
        (Value::Color(x), Value::Color(y)) => Ok(x == y),
        (Value::Range(x), Value::Range(y)) => Ok(x == y),
        (Value::RangeF(x), Value::RangeF(y)) => Ok(x == y),
        (Value::Point(x), Value::Point(y)) => Ok(x == y),
        (Value::PointF(x), Value::PointF(y)) => Ok(x == y),
        (Value::Size(x), Value::Size(y)) => Ok(x == y),
        // Historical behavior kept for compatibility with existing callers:
        // image descriptors report equal only when their buffers differ.
        (Value::Image(x), Value::Image(y)) => Ok(!x.same_buffer(y)),
        (Value::Array(x), Value::Array(y)) => x.try_eq(y),
        (Value::Grid(x), Value::Grid(y)) => x.try_eq(y),
        (Value::Jagged(x), Value::Jagged(y)) => x.try_eq(y),
        _ => Err(ValueError::Incompatible {
            from: a.type_tag(),
            to: b.type_tag(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{FlatArray, GridArray};
    use crate::{ImageRef, Kind, TypeTag};
    use rstest::rstest;

    #[rstest]
    #[case(Value::Empty, Value::Empty)]
    #[case(Value::Null, Value::Null)]
    #[case(Value::from(true), Value::from(true))]
    #[case(Value::from(-9i8), Value::from(-9i8))]
    #[case(Value::from("same"), Value::from("same"))]
    #[case(Value::from(f32::NAN), Value::from(f32::NAN))]
    #[case(Value::from(f64::NAN), Value::from(f64::NAN))]
    fn test_equal(#[case] a: Value, #[case] b: Value) {
        assert_eq!(strict_eq(&a, &b), Ok(true));
    }

    #[rstest]
    #[case(Value::from(true), Value::from(false))]
    #[case(Value::from(1i32), Value::from(2i32))]
    #[case(Value::from("a"), Value::from("b"))]
    #[case(Value::from(0.0f64), Value::from(-0.0f64))]
    #[case(Value::from(0.0f32), Value::from(-0.0f32))]
    fn test_not_equal(#[case] a: Value, #[case] b: Value) {
        assert_eq!(strict_eq(&a, &b), Ok(false));
    }

    #[rstest]
    #[case(Value::from(1i32), Value::from(1i16))]
    #[case(Value::from(1.0f32), Value::from(1.0f64))]
    #[case(Value::Empty, Value::Null)]
    #[case(Value::from("1"), Value::from(1i32))]
    fn test_incomparable_kinds(#[case] a: Value, #[case] b: Value) {
        assert_eq!(
            strict_eq(&a, &b),
            Err(ValueError::Incompatible {
                from: a.type_tag(),
                to: b.type_tag(),
            })
        );
    }

    #[test]
    fn test_scalar_never_compares_with_container() {
        let scalar = Value::from(1i32);
        let array = Value::from(FlatArray::new(Kind::Int32, 1).unwrap());
        assert_eq!(
            strict_eq(&scalar, &array),
            Err(ValueError::Incompatible {
                from: TypeTag::scalar(Kind::Int32),
                to: TypeTag::flat(Kind::Int32),
            })
        );
    }

    #[test]
    fn test_flat_never_compares_with_grid() {
        let flat = Value::from(FlatArray::new(Kind::Int32, 4).unwrap());
        let grid = Value::from(GridArray::new(Kind::Int32, 2, 2).unwrap());
        assert!(strict_eq(&flat, &grid).is_err());
    }

    // Pins the historical image rule: equal exactly when the buffers differ.
    #[test]
    fn test_image_equality_requires_distinct_buffers() {
        let first = [0u8; 4];
        let second = [0u8; 4];
        let a = Value::from(ImageRef::new(first.as_ptr(), 2, 2, 2, 0));
        let same = Value::from(ImageRef::new(first.as_ptr(), 2, 2, 2, 0));
        let other = Value::from(ImageRef::new(second.as_ptr(), 2, 2, 2, 0));
        assert_eq!(strict_eq(&a, &same), Ok(false));
        assert_eq!(strict_eq(&a, &other), Ok(true));
        assert_eq!(strict_eq(&a, &a.clone()), Ok(false));
    }
}
