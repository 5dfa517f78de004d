mod flat;
mod grid;
mod jagged;

pub use flat::FlatArray;
pub use grid::GridArray;
pub use jagged::JaggedArray;

use crate::{Kind, TypeTag, Value, ValueError};

pub(crate) fn ensure_element_kind(kind: Kind) -> Result<(), ValueError> {
    if kind.is_element() {
        Ok(())
    } else {
        Err(ValueError::InvalidElementKind(kind))
    }
}

/// `true` when `value` may be stored as-is in a container declared `elem`.
#[inline(always)]
pub(crate) fn element_matches(elem: Kind, value: &Value) -> bool {
    elem == Kind::Any || value.type_tag() == TypeTag::scalar(elem)
}
