use bytemuck::{Pod, Zeroable};

use crate::components::shape::{Color, ImageId};

/// Primitive kind carried in `DrawCommand::kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DrawKind {
    /// Filled rectangle; `style` is an RGBA color.
    Rect = 0,
    /// Image; `style` is an `ImageId`.
    Image = 1,
    /// Filled circle inside the box; `style` is an RGBA color.
    Circle = 2,
}

impl DrawKind {
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(DrawKind::Rect),
            1 => Some(DrawKind::Image),
            2 => Some(DrawKind::Circle),
            _ => None,
        }
    }
}

/// "Render primitive at (x, y, w, h) with style S".
/// Flat 8-word layout = 32 bytes stride, readable by a host as raw memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// A `DrawKind` discriminant.
    pub kind: u32,
    /// Packed RGBA color or image id, depending on `kind`.
    pub style: u32,
    /// Circle radius; zero for other kinds.
    pub radius: f32,
    pub _pad: u32,
}

impl DrawCommand {
    pub const WORDS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::WORDS * 4;

    pub fn rect(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind: DrawKind::Rect as u32,
            style: color.0,
            ..Self::default()
        }
    }

    pub fn image(x: f32, y: f32, width: f32, height: f32, image: ImageId) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind: DrawKind::Image as u32,
            style: image.0,
            ..Self::default()
        }
    }

    pub fn circle(x: f32, y: f32, radius: f32, color: Color) -> Self {
        let d = radius * 2.0;
        Self {
            x,
            y,
            width: d,
            height: d,
            kind: DrawKind::Circle as u32,
            style: color.0,
            radius,
            _pad: 0,
        }
    }

    pub fn draw_kind(&self) -> Option<DrawKind> {
        DrawKind::from_u32(self.kind)
    }
}
