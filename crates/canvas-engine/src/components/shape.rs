use crate::api::error::{EngineError, Result};

/// RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0x0000_00FF);

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(u32::from_be_bytes([r, g, b, a]))
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xF) as u8 * 0x11;
                Ok(Color::rgba(nibble(8), nibble(4), nibble(0), 0xFF))
            }
            6 => Ok(Color((value << 8) | 0xFF)),
            8 => Ok(Color(value)),
            _ => Err(invalid()),
        }
    }

    pub fn alpha(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Host-side image handle. The engine never loads images itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageId(pub u32);

/// How an entity looks. Entities without a shape are invisible but still collide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Filled rectangle covering the body.
    Rectangle { color: Color },
    /// Image stretched over the body.
    Sprite { image: ImageId },
    /// Circle inscribed in the body's `2r x 2r` box.
    Circle { radius: f32, color: Color },
}
