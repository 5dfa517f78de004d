use std::fmt;

use crate::array::{FlatArray, element_matches, ensure_element_kind};
use crate::{Kind, TypeTag, Value, ValueError};

/// Two-level array: a sequence of independently allocated sub-arrays.
///
/// Sub-arrays are only created through [`JaggedArray::alloc_slot`], so every
/// populated slot shares the outer element kind by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct JaggedArray {
    elem: Kind,
    slots: Vec<Option<FlatArray>>,
}

impl JaggedArray {
    pub fn new(elem: Kind, len: usize) -> Result<Self, ValueError> {
        ensure_element_kind(elem)?;
        Ok(JaggedArray {
            elem,
            slots: vec![None; len],
        })
    }

    pub(crate) fn from_raw(elem: Kind, slots: Vec<Option<FlatArray>>) -> Self {
        JaggedArray { elem, slots }
    }

    #[inline(always)]
    pub fn elem(&self) -> Kind {
        self.elem
    }

    /// Number of outer slots, allocated or not.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), ValueError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ValueError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            })
        }
    }

    fn allocated(&self, index: usize) -> Result<&FlatArray, ValueError> {
        self.check_index(index)?;
        self.slots[index]
            .as_ref()
            .ok_or(ValueError::EmptySlot(index))
    }

    fn allocated_mut(&mut self, index: usize) -> Result<&mut FlatArray, ValueError> {
        self.check_index(index)?;
        self.slots[index]
            .as_mut()
            .ok_or(ValueError::EmptySlot(index))
    }

    /// Allocates a sub-array of `len` default elements in the slot,
    /// replacing whatever was there before.
    pub fn alloc_slot(&mut self, index: usize, len: usize) -> Result<(), ValueError> {
        self.check_index(index)?;
        self.slots[index] = Some(FlatArray::new(self.elem, len)?);
        Ok(())
    }

    /// Releases the slot's sub-array, leaving it unallocated.
    pub fn clear_slot(&mut self, index: usize) -> Result<(), ValueError> {
        self.check_index(index)?;
        self.slots[index] = None;
        Ok(())
    }

    /// The slot's sub-array, or `None` when unallocated.
    pub fn slot(&self, index: usize) -> Result<Option<&FlatArray>, ValueError> {
        self.check_index(index)?;
        Ok(self.slots[index].as_ref())
    }

    pub fn get(&self, outer: usize, inner: usize) -> Result<Value, ValueError> {
        self.allocated(outer)?.get(inner)
    }

    pub fn set(&mut self, outer: usize, inner: usize, value: &Value) -> Result<(), ValueError> {
        self.allocated_mut(outer)?.set(inner, value)
    }

    pub fn move_in(
        &mut self,
        outer: usize,
        inner: usize,
        value: &mut Value,
    ) -> Result<(), ValueError> {
        self.allocated_mut(outer)?.move_in(inner, value)
    }

    /// Applies one source value to every element of every allocated slot.
    /// Converted once, up front; a conversion failure touches nothing.
    pub fn fill(&mut self, value: &Value) -> Result<(), ValueError> {
        let stored = if element_matches(self.elem, value) {
            value.clone()
        } else {
            value.convert(self.elem)?
        };
        for sub in self.slots.iter_mut().flatten() {
            sub.fill(&stored)?;
        }
        Ok(())
    }

    /// New jagged array with every allocated sub-array converted.
    /// All-or-nothing across all slots.
    pub fn change_type(&self, target: Kind) -> Result<JaggedArray, ValueError> {
        ensure_element_kind(target)?;
        let mut slots = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            slots.push(match slot {
                Some(sub) => Some(sub.change_type(target)?),
                None => None,
            });
        }
        Ok(JaggedArray {
            elem: target,
            slots,
        })
    }

    /// Concatenates every allocated sub-array into one flat array,
    /// preserving outer and inner order. Unallocated slots contribute
    /// nothing.
    pub fn flatten(&self) -> FlatArray {
        let total = self.slots.iter().flatten().map(FlatArray::len).sum();
        let mut items = Vec::with_capacity(total);
        for sub in self.slots.iter().flatten() {
            items.extend(sub.iter().cloned());
        }
        FlatArray::from_raw(self.elem, items)
    }

    /// Structural comparison. An allocated slot never equals an
    /// unallocated one; differing sub-array lengths are a distinct failure.
    pub fn try_eq(&self, other: &JaggedArray) -> Result<bool, ValueError> {
        if self.elem != other.elem {
            return Err(ValueError::incompatible(
                TypeTag::jagged(self.elem),
                TypeTag::jagged(other.elem),
            ));
        }
        if self.slots.len() != other.slots.len() {
            return Err(ValueError::LengthMismatch {
                expected: self.slots.len(),
                found: other.slots.len(),
            });
        }
        for (a, b) in self.slots.iter().zip(&other.slots) {
            match (a, b) {
                (None, None) => {}
                (Some(x), Some(y)) => {
                    if !x.try_eq(y)? {
                        return Ok(false);
                    }
                }
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

impl fmt::Display for JaggedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match slot {
                Some(sub) => write!(f, "{sub}")?,
                None => f.write_str("[]")?,
            }
        }
        Ok(())
    }
}
