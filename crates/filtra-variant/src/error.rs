use miette::{Diagnostic, LabeledSpan, SourceSpan};
use thiserror::Error;

use crate::{Kind, TypeTag};

/// Operational failures of the value container.
///
/// Every fallible operation reports one of these; nothing panics and no
/// destination is left partially written (staged results are dropped on
/// failure).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("no conversion or comparison from {from} to {to}")]
    Incompatible { from: TypeTag, to: TypeTag },
    #[error("{value} does not fit in {target}")]
    OutOfRange { value: String, target: Kind },
    #[error("cannot parse {input:?} as {target}")]
    InvalidFormat { target: Kind, input: String },
    #[error("{0} is not a valid element kind")]
    InvalidElementKind(Kind),
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("grid dimensions {left:?} do not match {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("sub-array {0} is not allocated")]
    EmptySlot(usize),
}

impl ValueError {
    pub(crate) fn incompatible(from: impl Into<TypeTag>, to: impl Into<TypeTag>) -> Self {
        ValueError::Incompatible {
            from: from.into(),
            to: to.into(),
        }
    }

    pub(crate) fn invalid_format(target: Kind, input: impl Into<String>) -> Self {
        ValueError::InvalidFormat {
            target,
            input: input.into(),
        }
    }
}

/// Text-decoding failure with the offending input and span for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{cause}")]
pub struct DecodeError {
    /// The underlying failure.
    pub cause: ValueError,
    /// The full input that was being decoded.
    pub input: String,
    /// The span of the input the failure points at.
    pub location: SourceSpan,
}

impl DecodeError {
    pub(crate) fn new(cause: ValueError, input: impl Into<String>, start: usize, len: usize) -> Self {
        DecodeError {
            cause,
            input: input.into(),
            location: SourceSpan::new(start.into(), len.max(1)),
        }
    }
}

impl Diagnostic for DecodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.cause {
            ValueError::Incompatible { .. } => "ValueError::Incompatible",
            ValueError::OutOfRange { .. } => "ValueError::OutOfRange",
            ValueError::InvalidFormat { .. } => "ValueError::InvalidFormat",
            ValueError::InvalidElementKind(_) => "ValueError::InvalidElementKind",
            ValueError::IndexOutOfBounds { .. } => "ValueError::IndexOutOfBounds",
            ValueError::LengthMismatch { .. } => "ValueError::LengthMismatch",
            ValueError::ShapeMismatch { .. } => "ValueError::ShapeMismatch",
            ValueError::EmptySlot(_) => "ValueError::EmptySlot",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let msg = match &self.cause {
            ValueError::InvalidFormat { target, .. } => {
                Some(format!("Expected the canonical {target} form."))
            }
            ValueError::LengthMismatch { expected, .. } => Some(format!(
                "The bracketed header declares {expected} elements; the element list must match it."
            )),
            ValueError::OutOfRange { target, .. } => {
                Some(format!("The parsed number does not fit in {target}."))
            }
            _ => None,
        };
        msg.map(|m| Box::new(m) as Box<dyn std::fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.input)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.cause.to_string()),
            self.location,
        ))))
    }
}
