use std::fmt;

use itertools::Itertools;

use crate::array::FlatArray;
use crate::{Kind, TypeTag, Value, ValueError};

/// Two-dimensional array stored row-major over a flat backing array.
#[derive(Debug, Clone, PartialEq)]
pub struct GridArray {
    rows: usize,
    cols: usize,
    items: FlatArray,
}

impl GridArray {
    pub fn new(elem: Kind, rows: usize, cols: usize) -> Result<Self, ValueError> {
        Ok(GridArray {
            rows,
            cols,
            items: FlatArray::new(elem, rows * cols)?,
        })
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, items: FlatArray) -> Self {
        GridArray { rows, cols, items }
    }

    #[inline(always)]
    pub fn elem(&self) -> Kind {
        self.items.elem()
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
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

    fn index_of(&self, row: usize, col: usize) -> Result<usize, ValueError> {
        if row >= self.rows {
            return Err(ValueError::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        if col >= self.cols {
            return Err(ValueError::IndexOutOfBounds {
                index: col,
                len: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Value, ValueError> {
        self.items.get(self.index_of(row, col)?)
    }

    pub fn set(&mut self, row: usize, col: usize, value: &Value) -> Result<(), ValueError> {
        let index = self.index_of(row, col)?;
        self.items.set(index, value)
    }

    pub fn move_in(&mut self, row: usize, col: usize, value: &mut Value) -> Result<(), ValueError> {
        let index = self.index_of(row, col)?;
        self.items.move_in(index, value)
    }

    pub fn fill(&mut self, value: &Value) -> Result<(), ValueError> {
        self.items.fill(value)
    }

    /// Row-major reinterpretation as a flat array.
    pub fn to_flat(&self) -> FlatArray {
        self.items.clone()
    }

    /// New grid of the same dimensions with every element converted.
    /// All-or-nothing, like [`FlatArray::change_type`].
    pub fn change_type(&self, target: Kind) -> Result<GridArray, ValueError> {
        Ok(GridArray {
            rows: self.rows,
            cols: self.cols,
            items: self.items.change_type(target)?,
        })
    }

    /// Structural comparison; differing dimensions are a distinct failure,
    /// not "not equal".
    pub fn try_eq(&self, other: &GridArray) -> Result<bool, ValueError> {
        if self.elem() != other.elem() {
            return Err(ValueError::incompatible(
                TypeTag::grid(self.elem()),
                TypeTag::grid(other.elem()),
            ));
        }
        if self.rows != other.rows || self.cols != other.cols {
            return Err(ValueError::ShapeMismatch {
                left: (self.rows, self.cols),
                right: (other.rows, other.cols),
            });
        }
        self.items.try_eq(&other.items)
    }
}

impl fmt::Display for GridArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{},{}]]", self.rows, self.cols)?;
        write!(f, "{}", self.items.iter().map(|v| v.to_string()).join("|"))
    }
}
