#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant for every payload a [`crate::Value`] can hold.
///
/// The explicit representation and ordering are part of the plug-in
/// boundary contract: persisted configurations and scripted calls identify
/// kinds by this numbering, so variants must never be reordered or removed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
    Empty = 0,
    Null = 1,
    Bool = 2,
    Int8 = 3,
    Int16 = 4,
    Int32 = 5,
    UInt8 = 6,
    UInt16 = 7,
    UInt32 = 8,
    Float32 = 9,
    Float64 = 10,
    String = 11,
    Color = 12,
    Range = 13,
    RangeF = 14,
    Point = 15,
    PointF = 16,
    Size = 17,
    Image = 18,
    /// Wildcard element kind: a container declared `Any` may hold
    /// heterogeneous elements.
    Any = 19,
}

impl Kind {
    /// Every kind, in discriminant order.
    pub const ALL: [Kind; 20] = [
        Kind::Empty,
        Kind::Null,
        Kind::Bool,
        Kind::Int8,
        Kind::Int16,
        Kind::Int32,
        Kind::UInt8,
        Kind::UInt16,
        Kind::UInt32,
        Kind::Float32,
        Kind::Float64,
        Kind::String,
        Kind::Color,
        Kind::Range,
        Kind::RangeF,
        Kind::Point,
        Kind::PointF,
        Kind::Size,
        Kind::Image,
        Kind::Any,
    ];

    #[inline(always)]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::UInt8 | Kind::UInt16 | Kind::UInt32
        )
    }

    #[inline(always)]
    pub fn is_float(self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    #[inline(always)]
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// `true` when the kind may be used as a container element kind.
    #[inline(always)]
    pub fn is_element(self) -> bool {
        !matches!(self, Kind::Empty | Kind::Null)
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Empty => "empty",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::UInt8 => "uint8",
            Kind::UInt16 => "uint16",
            Kind::UInt32 => "uint32",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Color => "color",
            Kind::Range => "range",
            Kind::RangeF => "rangef",
            Kind::Point => "point",
            Kind::PointF => "pointf",
            Kind::Size => "size",
            Kind::Image => "image",
            Kind::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container modifier: how a value is shaped around its element kind.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Shape {
    #[default]
    Scalar = 0,
    Flat = 1,
    Grid = 2,
    Jagged = 3,
}

/// Full runtime type of a value: element kind plus container modifier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag {
    pub kind: Kind,
    pub shape: Shape,
}

impl TypeTag {
    pub const fn scalar(kind: Kind) -> Self {
        TypeTag {
            kind,
            shape: Shape::Scalar,
        }
    }

    pub const fn flat(kind: Kind) -> Self {
        TypeTag {
            kind,
            shape: Shape::Flat,
        }
    }

    pub const fn grid(kind: Kind) -> Self {
        TypeTag {
            kind,
            shape: Shape::Grid,
        }
    }

    pub const fn jagged(kind: Kind) -> Self {
        TypeTag {
            kind,
            shape: Shape::Jagged,
        }
    }

    #[inline(always)]
    pub fn is_scalar(&self) -> bool {
        self.shape == Shape::Scalar
    }
}

impl From<Kind> for TypeTag {
    fn from(kind: Kind) -> Self {
        TypeTag::scalar(kind)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Scalar => write!(f, "{}", self.kind),
            Shape::Flat => write!(f, "{} array", self.kind),
            Shape::Grid => write!(f, "{} grid", self.kind),
            Shape::Jagged => write!(f, "{} jagged", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_discriminants_are_stable() {
        for (index, kind) in Kind::ALL.iter().enumerate() {
            assert_eq!(*kind as u8, index as u8);
        }
        assert!(Kind::ALL.is_sorted());
    }

    #[rstest]
    #[case(Kind::Empty, "empty")]
    #[case(Kind::Bool, "bool")]
    #[case(Kind::Int8, "int8")]
    #[case(Kind::UInt32, "uint32")]
    #[case(Kind::Float64, "float64")]
    #[case(Kind::String, "string")]
    #[case(Kind::RangeF, "rangef")]
    #[case(Kind::Any, "any")]
    fn test_kind_display(#[case] kind: Kind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
        assert_eq!(kind.name(), expected);
    }

    #[rstest]
    #[case(Kind::Int8, true, false, true)]
    #[case(Kind::UInt32, true, false, true)]
    #[case(Kind::Float32, false, true, true)]
    #[case(Kind::Float64, false, true, true)]
    #[case(Kind::Bool, false, false, false)]
    #[case(Kind::String, false, false, false)]
    #[case(Kind::Color, false, false, false)]
    #[case(Kind::Image, false, false, false)]
    fn test_kind_predicates(
        #[case] kind: Kind,
        #[case] integer: bool,
        #[case] float: bool,
        #[case] numeric: bool,
    ) {
        assert_eq!(kind.is_integer(), integer);
        assert_eq!(kind.is_float(), float);
        assert_eq!(kind.is_numeric(), numeric);
    }

    #[test]
    fn test_element_kinds() {
        assert!(!Kind::Empty.is_element());
        assert!(!Kind::Null.is_element());
        assert!(Kind::Bool.is_element());
        assert!(Kind::Image.is_element());
        assert!(Kind::Any.is_element());
    }

    #[rstest]
    #[case(TypeTag::scalar(Kind::Int32), "int32")]
    #[case(TypeTag::flat(Kind::Int32), "int32 array")]
    #[case(TypeTag::grid(Kind::Float32), "float32 grid")]
    #[case(TypeTag::jagged(Kind::UInt8), "uint8 jagged")]
    fn test_type_tag_display(#[case] tag: TypeTag, #[case] expected: &str) {
        assert_eq!(tag.to_string(), expected);
    }

    #[test]
    fn test_type_tag_from_kind() {
        let tag: TypeTag = Kind::Color.into();
        assert_eq!(tag, TypeTag::scalar(Kind::Color));
        assert!(tag.is_scalar());
        assert!(!TypeTag::flat(Kind::Color).is_scalar());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_kind_serde_round_trip() {
        let json = serde_json::to_string(&Kind::Int32).unwrap();
        assert_eq!(json, "\"Int32\"");
        let back: Kind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Kind::Int32);
    }
}
