//! Canonical text encoding: the stable, round-trippable forms used for
//! persisted configuration and scripting marshalling.
//!
//! Scalars have one canonical rendering each; containers use the
//! self-describing grammar `[N]e0|e1|…` (flat), `[[R,C]]e0|…` (grid,
//! row-major) and back-to-back `[len]…` segments (jagged, `[]` for an
//! unallocated slot). The encoder and decoder are exact inverses for every
//! encodable value.

use crate::array::{FlatArray, GridArray, JaggedArray};
use crate::convert::{narrow_float, narrow_int};
use crate::error::{DecodeError, ValueError};
use crate::{Color, Kind, Point, PointF, Range, RangeF, Size, TypeTag, Value};

// ---------------------------------------------------------------------------
// encoding
// ---------------------------------------------------------------------------

/// Canonical text form of a value. Image values and containers with
/// string, image, or heterogeneous elements have no stable text form.
pub(crate) fn encode_value(value: &Value) -> Result<String, ValueError> {
    let not_textable = || ValueError::incompatible(value.type_tag(), Kind::String);
    match value {
        Value::Image(_) => Err(not_textable()),
        Value::Array(a) if !textable(a.elem()) => Err(not_textable()),
        Value::Grid(g) if !textable(g.elem()) => Err(not_textable()),
        Value::Jagged(j) if !textable(j.elem()) => Err(not_textable()),
        other => Ok(other.to_string()),
    }
}

/// Element kinds that may appear in the container grammar: scalar,
/// non-string, concrete.
fn textable(elem: Kind) -> bool {
    elem.is_element() && !matches!(elem, Kind::String | Kind::Image | Kind::Any)
}

/// 17-significant-digit rendering in the manner of C's `%.17g`: fixed
/// notation for decimal exponents in `[-4, 17)`, scientific otherwise,
/// trailing zeros stripped. Enough digits to reconstruct the exact bits.
pub(crate) fn fmt_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let sci = format!("{:.16e}", x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if mantissa.starts_with('-') { "-" } else { "" };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    if (-4..17).contains(&exp) {
        if exp >= 0 {
            let int_len = (exp + 1) as usize;
            if digits.len() <= int_len {
                format!("{sign}{digits}{}", "0".repeat(int_len - digits.len()))
            } else {
                format!("{sign}{}.{}", &digits[..int_len], &digits[int_len..])
            }
        } else {
            format!("{sign}0.{}{digits}", "0".repeat((-exp - 1) as usize))
        }
    } else {
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{sign}{head}e{exp:+03}")
        } else {
            format!("{sign}{head}.{tail}e{exp:+03}")
        }
    }
}

// ---------------------------------------------------------------------------
// scalar parsing
// ---------------------------------------------------------------------------

/// Parses the canonical form of a scalar kind.
pub(crate) fn parse_scalar(target: Kind, input: &str) -> Result<Value, ValueError> {
    let invalid = || ValueError::invalid_format(target, input);
    match target {
        Kind::Empty => input.is_empty().then_some(Value::Empty).ok_or_else(invalid),
        Kind::Null => input.is_empty().then_some(Value::Null).ok_or_else(invalid),
        Kind::Bool => match input {
            "true" => Ok(Value::TRUE),
            "false" => Ok(Value::FALSE),
            _ => Err(invalid()),
        },
        k if k.is_integer() => {
            let n: i64 = input.parse().map_err(|_| invalid())?;
            narrow_int(n, target)
        }
        Kind::Float32 | Kind::Float64 => {
            let x: f64 = input.parse().map_err(|_| invalid())?;
            narrow_float(x, target)
        }
        Kind::String => Ok(Value::String(input.to_string())),
        Kind::Color => Color::parse_hex(input).map(Value::Color),
        Kind::Range => {
            let (a, b) = components(input, target)?;
            Ok(Value::Range(Range::new(
                int_field(a, target, input)?,
                int_field(b, target, input)?,
            )))
        }
        Kind::RangeF => {
            let (a, b) = components(input, target)?;
            Ok(Value::RangeF(RangeF::new(
                float_field(a, target, input)?,
                float_field(b, target, input)?,
            )))
        }
        Kind::Point => {
            let (a, b) = components(input, target)?;
            Ok(Value::Point(Point::new(
                int_field(a, target, input)?,
                int_field(b, target, input)?,
            )))
        }
        Kind::PointF => {
            let (a, b) = components(input, target)?;
            Ok(Value::PointF(PointF::new(
                float_field(a, target, input)?,
                float_field(b, target, input)?,
            )))
        }
        Kind::Size => {
            let (a, b) = components(input, target)?;
            Ok(Value::Size(Size::new(
                int_field(a, target, input)?,
                int_field(b, target, input)?,
            )))
        }
        _ => Err(ValueError::incompatible(Kind::String, target)),
    }
}

/// Splits the bracketed pair form `[a, b]` into its two components.
fn components<'a>(input: &'a str, target: Kind) -> Result<(&'a str, &'a str), ValueError> {
    let body = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ValueError::invalid_format(target, input))?;
    let (a, b) = body
        .split_once(',')
        .ok_or_else(|| ValueError::invalid_format(target, input))?;
    Ok((a.trim(), b.trim()))
}

fn int_field(field: &str, target: Kind, input: &str) -> Result<i32, ValueError> {
    let n: i64 = field
        .parse()
        .map_err(|_| ValueError::invalid_format(target, input))?;
    i32::try_from(n).map_err(|_| ValueError::OutOfRange {
        value: n.to_string(),
        target,
    })
}

fn float_field(field: &str, target: Kind, input: &str) -> Result<f64, ValueError> {
    field
        .parse()
        .map_err(|_| ValueError::invalid_format(target, input))
}

// ---------------------------------------------------------------------------
// container decoding
// ---------------------------------------------------------------------------

pub(crate) fn decode_scalar(target: Kind, input: &str) -> Result<Value, DecodeError> {
    parse_scalar(target, input).map_err(|cause| DecodeError::new(cause, input, 0, input.len()))
}

pub(crate) fn decode_flat(elem: Kind, input: &str) -> Result<FlatArray, DecodeError> {
    check_decodable(elem, TypeTag::flat(elem))
        .map_err(|cause| DecodeError::new(cause, input, 0, input.len()))?;
    let (declared, body_start) = count_header(elem, input)?;
    let items = elements(elem, input, body_start, declared)?;
    Ok(FlatArray::from_raw(elem, items))
}

pub(crate) fn decode_grid(elem: Kind, input: &str) -> Result<GridArray, DecodeError> {
    let whole = |cause| DecodeError::new(cause, input, 0, input.len());
    check_decodable(elem, TypeTag::grid(elem)).map_err(whole)?;
    let invalid = || ValueError::invalid_format(elem, input);
    let rest = input.strip_prefix("[[").ok_or_else(|| whole(invalid()))?;
    let close = rest.find("]]").ok_or_else(|| whole(invalid()))?;
    let (rows, cols) = rest[..close]
        .split_once(',')
        .ok_or_else(|| whole(invalid()))?;
    let rows: usize = rows.trim().parse().map_err(|_| whole(invalid()))?;
    let cols: usize = cols.trim().parse().map_err(|_| whole(invalid()))?;
    let declared = rows.checked_mul(cols).ok_or_else(|| whole(invalid()))?;
    let body_start = 2 + close + 2;
    let items = elements(elem, input, body_start, declared)?;
    Ok(GridArray::from_raw(
        rows,
        cols,
        FlatArray::from_raw(elem, items),
    ))
}

/// Parses `declared` `|`-separated elements starting at `body_start`.
fn elements(
    elem: Kind,
    input: &str,
    body_start: usize,
    declared: usize,
) -> Result<Vec<Value>, DecodeError> {
    let body = &input[body_start..];
    if declared == 0 {
        if !body.is_empty() {
            return Err(DecodeError::new(
                ValueError::LengthMismatch {
                    expected: 0,
                    found: body.split('|').count(),
                },
                input,
                body_start,
                body.len(),
            ));
        }
        return Ok(Vec::new());
    }
    let pieces: Vec<&str> = body.split('|').collect();
    if pieces.len() != declared {
        return Err(DecodeError::new(
            ValueError::LengthMismatch {
                expected: declared,
                found: pieces.len(),
            },
            input,
            body_start,
            body.len(),
        ));
    }
    let mut items = Vec::with_capacity(declared);
    let mut offset = body_start;
    for piece in pieces {
        let value = parse_scalar(elem, piece)
            .map_err(|cause| DecodeError::new(cause, input, offset, piece.len()))?;
        items.push(value);
        offset += piece.len() + 1;
    }
    Ok(items)
}

/// Parses the `[N]` count header at the start of the input.
fn count_header(elem: Kind, input: &str) -> Result<(usize, usize), DecodeError> {
    let invalid = |at: usize, len: usize| {
        DecodeError::new(ValueError::invalid_format(elem, input), input, at, len)
    };
    let rest = input
        .strip_prefix('[')
        .ok_or_else(|| invalid(0, input.len()))?;
    let close = rest.find(']').ok_or_else(|| invalid(0, input.len()))?;
    let declared: usize = rest[..close].parse().map_err(|_| invalid(1, close))?;
    Ok((declared, close + 2))
}

pub(crate) fn decode_jagged(elem: Kind, input: &str) -> Result<JaggedArray, DecodeError> {
    check_decodable(elem, TypeTag::jagged(elem))
        .map_err(|cause| DecodeError::new(cause, input, 0, input.len()))?;
    // Composite elements carry brackets of their own, so they are scanned
    // bracket-aware rather than split on delimiters.
    let composite = matches!(
        elem,
        Kind::Range | Kind::RangeF | Kind::Point | Kind::PointF | Kind::Size
    );
    let invalid = |at: usize, len: usize| {
        DecodeError::new(ValueError::invalid_format(elem, input), input, at, len.max(1))
    };
    let short = |declared: usize, found: usize, at: usize| {
        DecodeError::new(
            ValueError::LengthMismatch {
                expected: declared,
                found,
            },
            input,
            at,
            input.len().saturating_sub(at),
        )
    };
    let bytes = input.as_bytes();
    let mut slots = Vec::new();
    let mut pos = 0;
    while pos < input.len() {
        // segment header: `[len]`, or `[]` for an unallocated slot
        if bytes[pos] != b'[' {
            return Err(invalid(pos, 1));
        }
        let close = input[pos..]
            .find(']')
            .ok_or_else(|| invalid(pos, input.len() - pos))?;
        let content = &input[pos + 1..pos + close];
        let header_at = pos;
        pos += close + 1;
        if content.is_empty() {
            slots.push(None);
            continue;
        }
        let declared: usize = content
            .parse()
            .map_err(|_| invalid(header_at + 1, content.len()))?;
        // a declared count can never exceed the remaining input
        let mut items = Vec::with_capacity(declared.min(input.len() - pos + 1));
        for i in 0..declared {
            let last = i + 1 == declared;
            if pos >= input.len() {
                return Err(short(declared, i, header_at));
            }
            let (piece_end, next) = if composite {
                if bytes[pos] != b'[' {
                    return Err(invalid(pos, 1));
                }
                let end = pos
                    + input[pos..]
                        .find(']')
                        .ok_or_else(|| invalid(pos, input.len() - pos))?;
                if last {
                    (end + 1, end + 1)
                } else if bytes.get(end + 1) == Some(&b'|') {
                    (end + 1, end + 2)
                } else {
                    return Err(short(declared, i + 1, header_at));
                }
            } else {
                let bar = input[pos..].find('|').map(|at| pos + at);
                let bracket = input[pos..].find('[').map(|at| pos + at);
                if last {
                    let end = bracket.unwrap_or(input.len());
                    (end, end)
                } else {
                    match (bar, bracket) {
                        (Some(bar), Some(bracket)) if bracket < bar => {
                            return Err(short(declared, i + 1, header_at));
                        }
                        (Some(bar), _) => (bar, bar + 1),
                        (None, _) => return Err(short(declared, i + 1, header_at)),
                    }
                }
            };
            let piece = &input[pos..piece_end];
            let value = parse_scalar(elem, piece)
                .map_err(|cause| DecodeError::new(cause, input, pos, piece.len()))?;
            items.push(value);
            pos = next;
        }
        slots.push(Some(FlatArray::from_raw(elem, items)));
    }
    Ok(JaggedArray::from_raw(elem, slots))
}

fn check_decodable(elem: Kind, target: TypeTag) -> Result<(), ValueError> {
    if !elem.is_element() {
        return Err(ValueError::InvalidElementKind(elem));
    }
    if !textable(elem) {
        return Err(ValueError::incompatible(Kind::String, target));
    }
    Ok(())
}
