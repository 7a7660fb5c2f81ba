//! Rendering collaborator contract.
//!
//! The engine never touches a real drawing surface. Each tick it clears the
//! surface once and then issues one `DrawCommand` per visible entity, in
//! insertion order. Backends (Canvas2D, wgpu, a test recorder) implement this.

use super::command::DrawCommand;

pub trait Renderer {
    /// Wipe the whole drawing surface.
    fn clear(&mut self, width: f32, height: f32);

    /// Draw one primitive.
    fn draw(&mut self, command: &DrawCommand);
}

/// Discards everything. For running the simulation without output.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self, _width: f32, _height: f32) {}
    fn draw(&mut self, _command: &DrawCommand) {}
}

/// Draw buffer holding the commands of the latest frame.
pub struct DrawBuffer {
    pub commands: Vec<DrawCommand>,
    /// Surface size passed to the last `clear`.
    pub surface: (f32, f32),
    /// Number of frames started.
    pub frames: u64,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            surface: (0.0, 0.0),
            frames: 0,
        }
    }

    pub fn command_count(&self) -> u32 {
        self.commands.len() as u32
    }

    /// The frame as raw bytes for a host-side reader.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.commands[..])
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawBuffer {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.surface = (width, height);
        self.frames += 1;
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }
}
