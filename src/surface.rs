//! Abstract drawable surface
//!
//! The core issues draw calls but never owns a canvas, window, or GPU
//! pipeline. Renderers implement [`Surface`] with whatever backend they
//! like; entities only know the four primitives below.

use glam::Vec2;

/// An RGBA color in 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// Opaque handle to an image the renderer has loaded
///
/// The core never decodes assets; a renderer that blits sprites assigns
/// whatever ids it wants and entities stay renderer-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageId(pub u32);

/// A 2D drawing capability: rectangle fill, arc fill, image blit, text
///
/// Angles follow math convention (radians, counter-clockwise); a full
/// circle is `0.0..TAU`.
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color);

    fn blit(&mut self, image: ImageId, pos: Vec2, size: Vec2);

    fn draw_text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);

    /// Full-circle convenience over [`Surface::fill_arc`]
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_arc(center, radius, 0.0, std::f32::consts::TAU, color);
    }
}

/// Test double that records every draw call
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCommand {
    Rect { pos: Vec2, size: Vec2 },
    Arc { center: Vec2, radius: f32 },
    Blit { image: ImageId, pos: Vec2 },
    Text { pos: Vec2, text: String },
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, _color: Color) {
        self.commands.push(DrawCommand::Rect { pos, size });
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, _start: f32, _end: f32, _color: Color) {
        self.commands.push(DrawCommand::Arc { center, radius });
    }

    fn blit(&mut self, image: ImageId, pos: Vec2, _size: Vec2) {
        self.commands.push(DrawCommand::Blit { image, pos });
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, _size: f32, _color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
        });
    }
}
