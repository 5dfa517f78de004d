use std::fmt;

use itertools::Itertools;

use crate::array::{element_matches, ensure_element_kind};
use crate::{Kind, TypeTag, Value, ValueError};

/// Fixed-length sequence of values sharing one declared element kind.
///
/// An `Any` array may hold heterogeneous elements, including nested
/// containers; every other array holds exactly its declared scalar kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatArray {
    elem: Kind,
    items: Vec<Value>,
}

impl FlatArray {
    /// Allocates `len` elements initialized to the kind's default payload.
    pub fn new(elem: Kind, len: usize) -> Result<Self, ValueError> {
        ensure_element_kind(elem)?;
        Ok(FlatArray {
            elem,
            items: vec![Value::default_of(elem); len],
        })
    }

    /// Builds an array from existing values, verifying every element tag.
    pub fn from_values(elem: Kind, values: Vec<Value>) -> Result<Self, ValueError> {
        ensure_element_kind(elem)?;
        if let Some(v) = values.iter().find(|v| !element_matches(elem, v)) {
            return Err(ValueError::incompatible(v.type_tag(), elem));
        }
        Ok(FlatArray { elem, items: values })
    }

    // Callers guarantee every item already matches `elem`.
    pub(crate) fn from_raw(elem: Kind, items: Vec<Value>) -> Self {
        FlatArray { elem, items }
    }

    #[inline(always)]
    pub fn elem(&self) -> Kind {
        self.elem
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn check_index(&self, index: usize) -> Result<(), ValueError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ValueError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Returns a copy of the element, never a reference into the array.
    pub fn get(&self, index: usize) -> Result<Value, ValueError> {
        self.check_index(index)?;
        Ok(self.items[index].clone())
    }

    /// Stores a copy of `value`, converting it to the element kind first if
    /// the tags differ. The slot is untouched when conversion fails.
    pub fn set(&mut self, index: usize, value: &Value) -> Result<(), ValueError> {
        self.check_index(index)?;
        let stored = if element_matches(self.elem, value) {
            value.clone()
        } else {
            value.convert(self.elem)?
        };
        self.items[index] = stored;
        Ok(())
    }

    /// Relocates `value` into the slot without copying. Requires an exact
    /// tag match; on mismatch both sides are left unmodified. On success
    /// the slot's previous payload is dropped and `value` becomes empty.
    pub fn move_in(&mut self, index: usize, value: &mut Value) -> Result<(), ValueError> {
        self.check_index(index)?;
        if !element_matches(self.elem, value) {
            return Err(ValueError::incompatible(value.type_tag(), self.elem));
        }
        self.items[index] = value.take();
        Ok(())
    }

    /// Applies one source value to every element. The source is converted
    /// once, up front, so a conversion failure leaves the array untouched.
    pub fn fill(&mut self, value: &Value) -> Result<(), ValueError> {
        let stored = if element_matches(self.elem, value) {
            value.clone()
        } else {
            value.convert(self.elem)?
        };
        for slot in &mut self.items {
            *slot = stored.clone();
        }
        Ok(())
    }

    /// Builds a new array with every element converted to `target`.
    /// All-or-nothing: a single element failure drops the staged result and
    /// reports that element's error.
    pub fn change_type(&self, target: Kind) -> Result<FlatArray, ValueError> {
        ensure_element_kind(target)?;
        let mut items = Vec::with_capacity(self.items.len());
        for v in &self.items {
            items.push(if element_matches(target, v) {
                v.clone()
            } else {
                v.convert(target)?
            });
        }
        Ok(FlatArray { elem: target, items })
    }

    /// Structural comparison: `Err` when the element kinds differ or the
    /// lengths do not match, otherwise per-element strict equality,
    /// short-circuiting on the first mismatch.
    pub fn try_eq(&self, other: &FlatArray) -> Result<bool, ValueError> {
        if self.elem != other.elem {
            return Err(ValueError::incompatible(
                TypeTag::flat(self.elem),
                TypeTag::flat(other.elem),
            ));
        }
        if self.items.len() != other.items.len() {
            return Err(ValueError::LengthMismatch {
                expected: self.items.len(),
                found: other.items.len(),
            });
        }
        for (a, b) in self.items.iter().zip(&other.items) {
            if !a.try_eq(b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<'a> IntoIterator for &'a FlatArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for FlatArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.items.len())?;
        write!(f, "{}", self.items.iter().map(|v| v.to_string()).join("|"))
    }
}
