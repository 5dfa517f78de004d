//! `filtra-variant` is the dynamically typed value container of the filtra
//! image processing platform.
//!
//! Configuration values, effect properties, and scripted call arguments all
//! cross module and plug-in boundaries as a [`Value`]: a tagged union over
//! scalar kinds (integers, floats, bool, string, color, ranges, points,
//! sizes, an opaque image descriptor) and three container shapes
//! ([`FlatArray`], row-major [`GridArray`], two-level [`JaggedArray`]).
//!
//! Every kind carries a canonical text form for persistence, a total
//! conversion matrix with explicit failure modes, and a strict three-way
//! equality (`Ok(true)` / `Ok(false)` / `Err` when the values cannot be
//! compared).
//!
//! ## Examples
//!
//! ```
//! use filtra_variant::{Kind, Value};
//!
//! let v = Value::from(300u32);
//! assert!(v.convert(Kind::Int8).is_err());
//! assert_eq!(v.convert(Kind::Int16).unwrap(), Value::Int16(300));
//! assert_eq!(v.encode().unwrap(), "300");
//!
//! let decoded = Value::decode(Kind::Float64, "0.5").unwrap();
//! assert_eq!(decoded.try_eq(&Value::from(0.5f64)), Ok(true));
//! ```
//!
//! Containers convert and encode through the same machinery:
//!
//! ```
//! use filtra_variant::{FlatArray, Kind, Value};
//!
//! let mut a = FlatArray::new(Kind::Int32, 3).unwrap();
//! a.set(0, &Value::from(7i32)).unwrap();
//! assert_eq!(Value::from(a).encode().unwrap(), "[3]7|0|0");
//! ```

mod array;
mod cmp;
mod codec;
mod color;
mod convert;
mod error;
mod geom;
mod image;
mod kind;
mod value;

pub use array::{FlatArray, GridArray, JaggedArray};
pub use color::Color;
pub use error::{DecodeError, ValueError};
pub use geom::{Point, PointF, Range, RangeF, Size};
pub use image::ImageRef;
pub use kind::{Kind, Shape, TypeTag};
pub use value::Value;
