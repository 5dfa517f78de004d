#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Kind, ValueError};

/// Packed ARGB color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Color::from_argb(0xFF, r, g, b)
    }

    #[inline(always)]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline(always)]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline(always)]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline(always)]
    pub const fn is_opaque(self) -> bool {
        self.a() == 0xFF
    }

    /// Persistence form: `RRGGBB` when fully opaque, `AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            format!("{:08X}", self.0)
        }
    }

    /// Parses either hex form, case-insensitively.
    pub fn parse_hex(input: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::invalid_format(Kind::Color, input);
        if !input.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match input.len() {
            6 => u32::from_str_radix(input, 16)
                .map(|rgb| Color(0xFF00_0000 | rgb))
                .map_err(|_| invalid()),
            8 => u32::from_str_radix(input, 16).map(Color).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
