use crate::codec;
use crate::{Kind, Point, PointF, Range, RangeF, Shape, TypeTag, Value, ValueError};

/// The coercion matrix: total over every pair of type tags, not symmetric.
/// Identity is always a plain deep copy; everything the matrix does not
/// cover reports [`ValueError::Incompatible`].
pub(crate) fn convert(value: &Value, target: TypeTag) -> Result<Value, ValueError> {
    if value.type_tag() == target {
        return Ok(value.clone());
    }
    let incompatible = || ValueError::Incompatible {
        from: value.type_tag(),
        to: target,
    };
    match target.shape {
        Shape::Scalar => convert_scalar(value, target.kind),
        Shape::Flat => match value {
            Value::Array(a) => a.change_type(target.kind).map(Value::Array),
            Value::Grid(g) => {
                let flat = g.to_flat();
                if flat.elem() == target.kind {
                    Ok(Value::Array(flat))
                } else {
                    flat.change_type(target.kind).map(Value::Array)
                }
            }
            // No implicit cross-kind jagged flatten.
            Value::Jagged(j) if j.elem() == target.kind => Ok(Value::Array(j.flatten())),
            _ => Err(incompatible()),
        },
        Shape::Grid => match value {
            Value::Grid(g) => g.change_type(target.kind).map(Value::Grid),
            _ => Err(incompatible()),
        },
        Shape::Jagged => match value {
            Value::Jagged(j) => j.change_type(target.kind).map(Value::Jagged),
            _ => Err(incompatible()),
        },
    }
}

fn convert_scalar(value: &Value, target: Kind) -> Result<Value, ValueError> {
    // Every encodable value has a canonical text form.
    if target == Kind::String {
        return codec::encode_value(value).map(Value::String);
    }
    let incompatible = || ValueError::incompatible(value.type_tag(), target);
    match value {
        Value::Bool(b) if numeric_or_bool(target) => narrow_int(i64::from(*b), target),
        Value::Int8(n) if numeric_or_bool(target) => narrow_int(i64::from(*n), target),
        Value::Int16(n) if numeric_or_bool(target) => narrow_int(i64::from(*n), target),
        Value::Int32(n) if numeric_or_bool(target) => narrow_int(i64::from(*n), target),
        Value::UInt8(n) if numeric_or_bool(target) => narrow_int(i64::from(*n), target),
        Value::UInt16(n) if numeric_or_bool(target) => narrow_int(i64::from(*n), target),
        Value::UInt32(n) if numeric_or_bool(target) => narrow_int(i64::from(*n), target),
        Value::Float32(x) if numeric_or_bool(target) => narrow_float(f64::from(*x), target),
        Value::Float64(x) if numeric_or_bool(target) => narrow_float(*x, target),
        Value::String(s) => codec::parse_scalar(target, s),
        Value::Range(r) if target == Kind::RangeF => Ok(Value::RangeF(RangeF::new(
            f64::from(r.min),
            f64::from(r.max),
        ))),
        Value::RangeF(r) if target == Kind::Range => Ok(Value::Range(Range::new(
            field_to_i32(r.min, target)?,
            field_to_i32(r.max, target)?,
        ))),
        Value::Point(p) if target == Kind::PointF => {
            Ok(Value::PointF(PointF::new(f64::from(p.x), f64::from(p.y))))
        }
        Value::PointF(p) if target == Kind::Point => Ok(Value::Point(Point::new(
            field_to_i32(p.x, target)?,
            field_to_i32(p.y, target)?,
        ))),
        _ => Err(incompatible()),
    }
}

#[inline(always)]
fn numeric_or_bool(kind: Kind) -> bool {
    kind.is_numeric() || kind == Kind::Bool
}

/// Narrows an integer (promoted to `i64`, wide enough for every integer
/// kind) into the target, range-checked rather than wrapped or saturated.
pub(crate) fn narrow_int(n: i64, target: Kind) -> Result<Value, ValueError> {
    let out_of_range = || ValueError::OutOfRange {
        value: n.to_string(),
        target,
    };
    match target {
        Kind::Bool => match n {
            0 => Ok(Value::FALSE),
            1 => Ok(Value::TRUE),
            _ => Err(out_of_range()),
        },
        Kind::Int8 => i8::try_from(n).map(Value::Int8).map_err(|_| out_of_range()),
        Kind::Int16 => i16::try_from(n).map(Value::Int16).map_err(|_| out_of_range()),
        Kind::Int32 => i32::try_from(n).map(Value::Int32).map_err(|_| out_of_range()),
        Kind::UInt8 => u8::try_from(n).map(Value::UInt8).map_err(|_| out_of_range()),
        Kind::UInt16 => u16::try_from(n).map(Value::UInt16).map_err(|_| out_of_range()),
        Kind::UInt32 => u32::try_from(n).map(Value::UInt32).map_err(|_| out_of_range()),
        Kind::Float32 => Ok(Value::Float32(n as f32)),
        Kind::Float64 => Ok(Value::Float64(n as f64)),
        _ => unreachable!("narrow_int takes numeric or bool targets only"),
    }
}

/// Narrows a float (promoted to `f64`) into the target. Integer targets
/// truncate toward zero after a NaN/range check.
pub(crate) fn narrow_float(x: f64, target: Kind) -> Result<Value, ValueError> {
    let out_of_range = || ValueError::OutOfRange {
        value: codec::fmt_float(x),
        target,
    };
    match target {
        Kind::Bool => {
            if x == 0.0 {
                Ok(Value::FALSE)
            } else if x == 1.0 {
                Ok(Value::TRUE)
            } else {
                Err(out_of_range())
            }
        }
        Kind::Int8 => truncated(x, f64::from(i8::MIN), f64::from(i8::MAX))
            .map(|t| Value::Int8(t as i8))
            .ok_or_else(out_of_range),
        Kind::Int16 => truncated(x, f64::from(i16::MIN), f64::from(i16::MAX))
            .map(|t| Value::Int16(t as i16))
            .ok_or_else(out_of_range),
        Kind::Int32 => truncated(x, f64::from(i32::MIN), f64::from(i32::MAX))
            .map(|t| Value::Int32(t as i32))
            .ok_or_else(out_of_range),
        Kind::UInt8 => truncated(x, 0.0, f64::from(u8::MAX))
            .map(|t| Value::UInt8(t as u8))
            .ok_or_else(out_of_range),
        Kind::UInt16 => truncated(x, 0.0, f64::from(u16::MAX))
            .map(|t| Value::UInt16(t as u16))
            .ok_or_else(out_of_range),
        Kind::UInt32 => truncated(x, 0.0, f64::from(u32::MAX))
            .map(|t| Value::UInt32(t as u32))
            .ok_or_else(out_of_range),
        Kind::Float32 => {
            if x.is_finite() && x.abs() > f64::from(f32::MAX) {
                Err(out_of_range())
            } else {
                Ok(Value::Float32(x as f32))
            }
        }
        Kind::Float64 => Ok(Value::Float64(x)),
        _ => unreachable!("narrow_float takes numeric or bool targets only"),
    }
}

fn truncated(x: f64, min: f64, max: f64) -> Option<f64> {
    if x.is_nan() {
        return None;
    }
    let t = x.trunc();
    (min..=max).contains(&t).then_some(t)
}

fn field_to_i32(x: f64, target: Kind) -> Result<i32, ValueError> {
    truncated(x, f64::from(i32::MIN), f64::from(i32::MAX))
        .map(|t| t as i32)
        .ok_or_else(|| ValueError::OutOfRange {
            value: codec::fmt_float(x),
            target,
        })
}
