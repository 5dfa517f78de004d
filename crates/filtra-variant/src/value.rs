use std::fmt;

use crate::array::{FlatArray, GridArray, JaggedArray};
use crate::error::{DecodeError, ValueError};
use crate::{cmp, codec, convert};
use crate::{Color, ImageRef, Kind, Point, PointF, Range, RangeF, Shape, Size, TypeTag};

/// A dynamically typed value passed across module and plug-in boundaries.
///
/// Exactly one payload is live, selected by the variant; `String` and
/// container payloads are owned and released on drop, while `Image` holds a
/// non-owning descriptor (see [`ImageRef`]).
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Empty,
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    Float32(f32),
    Float64(f64),
    String(String),
    Color(Color),
    Range(Range),
    RangeF(RangeF),
    Point(Point),
    PointF(PointF),
    Size(Size),
    Image(ImageRef),
    Array(FlatArray),
    Grid(GridArray),
    Jagged(JaggedArray),
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    pub fn new() -> Self {
        Value::Empty
    }

    /// Element kind for scalars, declared element kind for containers.
    #[inline(always)]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Empty => Kind::Empty,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int8(_) => Kind::Int8,
            Value::Int16(_) => Kind::Int16,
            Value::Int32(_) => Kind::Int32,
            Value::UInt8(_) => Kind::UInt8,
            Value::UInt16(_) => Kind::UInt16,
            Value::UInt32(_) => Kind::UInt32,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::String(_) => Kind::String,
            Value::Color(_) => Kind::Color,
            Value::Range(_) => Kind::Range,
            Value::RangeF(_) => Kind::RangeF,
            Value::Point(_) => Kind::Point,
            Value::PointF(_) => Kind::PointF,
            Value::Size(_) => Kind::Size,
            Value::Image(_) => Kind::Image,
            Value::Array(a) => a.elem(),
            Value::Grid(g) => g.elem(),
            Value::Jagged(j) => j.elem(),
        }
    }

    #[inline(always)]
    pub fn shape(&self) -> Shape {
        match self {
            Value::Array(_) => Shape::Flat,
            Value::Grid(_) => Shape::Grid,
            Value::Jagged(_) => Shape::Jagged,
            _ => Shape::Scalar,
        }
    }

    #[inline(always)]
    pub fn type_tag(&self) -> TypeTag {
        TypeTag {
            kind: self.kind(),
            shape: self.shape(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    #[inline(always)]
    pub fn is_array(&self) -> bool {
        self.shape() != Shape::Scalar
    }

    /// The default payload for a freshly allocated element of `kind`
    /// (`Any` slots start out empty).
    pub fn default_of(kind: Kind) -> Value {
        match kind {
            Kind::Empty | Kind::Any => Value::Empty,
            Kind::Null => Value::Null,
            Kind::Bool => Value::Bool(false),
            Kind::Int8 => Value::Int8(0),
            Kind::Int16 => Value::Int16(0),
            Kind::Int32 => Value::Int32(0),
            Kind::UInt8 => Value::UInt8(0),
            Kind::UInt16 => Value::UInt16(0),
            Kind::UInt32 => Value::UInt32(0),
            Kind::Float32 => Value::Float32(0.0),
            Kind::Float64 => Value::Float64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Color => Value::Color(Color::default()),
            Kind::Range => Value::Range(Range::default()),
            Kind::RangeF => Value::RangeF(RangeF::default()),
            Kind::Point => Value::Point(Point::default()),
            Kind::PointF => Value::PointF(PointF::default()),
            Kind::Size => Value::Size(Size::default()),
            Kind::Image => Value::Image(ImageRef::null()),
        }
    }

    /// Releases the payload and resets to `Empty`. Idempotent.
    pub fn clear(&mut self) {
        *self = Value::Empty;
    }

    /// Moves the payload out, leaving `Empty` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Builds a new value of the target type from this one, per the
    /// coercion matrix. The source is never mutated; on failure nothing is
    /// observable but the error.
    pub fn convert(&self, target: impl Into<TypeTag>) -> Result<Value, ValueError> {
        convert::convert(self, target.into())
    }

    /// Canonical text form for persistence and scripting marshalling.
    ///
    /// Image values and containers with string, image, or heterogeneous
    /// elements have no stable text form and are rejected.
    pub fn encode(&self) -> Result<String, ValueError> {
        codec::encode_value(self)
    }

    /// Decodes the canonical text form of the target type.
    pub fn decode(target: impl Into<TypeTag>, input: &str) -> Result<Value, DecodeError> {
        let target = target.into();
        match target.shape {
            Shape::Scalar => codec::decode_scalar(target.kind, input),
            Shape::Flat => codec::decode_flat(target.kind, input).map(Value::Array),
            Shape::Grid => codec::decode_grid(target.kind, input).map(Value::Grid),
            Shape::Jagged => codec::decode_jagged(target.kind, input).map(Value::Jagged),
        }
    }

    /// Strict structural comparison: `Ok(true)` equal, `Ok(false)` not
    /// equal, `Err` when the two values cannot be compared at all.
    pub fn try_eq(&self, other: &Value) -> Result<bool, ValueError> {
        cmp::strict_eq(self, other)
    }

    #[inline(always)]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(n) => Some(i64::from(*n)),
            Value::Int16(n) => Some(i64::from(*n)),
            Value::Int32(n) => Some(i64::from(*n)),
            Value::UInt8(n) => Some(i64::from(*n)),
            Value::UInt16(n) => Some(i64::from(*n)),
            Value::UInt32(n) => Some(i64::from(*n)),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(x) => Some(f64::from(*x)),
            Value::Float64(x) => Some(*x),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// Strict structural equality. Floats compare bit-exact; image descriptors
// compare by all fields here, unlike the historical try_eq rule.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Value::Image(a), Value::Image(b)) = (self, other) {
            return a == b;
        }
        matches!(cmp::strict_eq(self, other), Ok(true))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty | Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int8(n) => write!(f, "{n}"),
            Value::Int16(n) => write!(f, "{n}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::UInt8(n) => write!(f, "{n}"),
            Value::UInt16(n) => write!(f, "{n}"),
            Value::UInt32(n) => write!(f, "{n}"),
            Value::Float32(x) => f.write_str(&codec::fmt_float(f64::from(*x))),
            Value::Float64(x) => f.write_str(&codec::fmt_float(*x)),
            Value::String(s) => f.write_str(s),
            Value::Color(c) => write!(f, "{c}"),
            Value::Range(r) => write!(f, "{r}"),
            Value::RangeF(r) => write!(f, "{r}"),
            Value::Point(p) => write!(f, "{p}"),
            Value::PointF(p) => write!(f, "{p}"),
            Value::Size(s) => write!(f, "{s}"),
            Value::Image(img) => write!(f, "{img}"),
            Value::Array(a) => write!(f, "{a}"),
            Value::Grid(g) => write!(f, "{g}"),
            Value::Jagged(j) => write!(f, "{j}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int8(n)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int16(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::UInt8(n)
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::UInt16(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::UInt32(n)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float32(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float64(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Range> for Value {
    fn from(r: Range) -> Self {
        Value::Range(r)
    }
}

impl From<RangeF> for Value {
    fn from(r: RangeF) -> Self {
        Value::RangeF(r)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

impl From<PointF> for Value {
    fn from(p: PointF) -> Self {
        Value::PointF(p)
    }
}

impl From<Size> for Value {
    fn from(s: Size) -> Self {
        Value::Size(s)
    }
}

impl From<ImageRef> for Value {
    fn from(img: ImageRef) -> Self {
        Value::Image(img)
    }
}

impl From<FlatArray> for Value {
    fn from(a: FlatArray) -> Self {
        Value::Array(a)
    }
}

impl From<GridArray> for Value {
    fn from(g: GridArray) -> Self {
        Value::Grid(g)
    }
}

impl From<JaggedArray> for Value {
    fn from(j: JaggedArray) -> Self {
        Value::Jagged(j)
    }
}
