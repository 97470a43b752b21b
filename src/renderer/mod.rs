//! Rendering module
//!
//! Drawing is a read-only pass over `GameState`. Every entity is drawn with a
//! handful of 2D primitives on a `Surface`, offset by the arena camera so the
//! player stays at the focal point. Backends: `DrawList` (records commands,
//! used headless and in tests) and the browser canvas in `platform::web`.

pub mod draw_list;
pub mod shapes;

use glam::Vec2;

use crate::sim::geometry::Color;

pub use draw_list::{DrawCommand, DrawList};
pub use shapes::render_frame;

/// A 2D drawing target with a transform stack
pub trait Surface {
    /// Fill the whole surface, ignoring the current transform
    fn clear(&mut self, color: Color);
    /// Push the current transform
    fn save(&mut self);
    /// Pop the transform pushed by the matching `save`
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    /// Axis-aligned rectangle with its top-left corner at `pos`
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
}

/// Colors for game elements
pub mod colors {
    use crate::sim::geometry::Color;

    pub const BACKGROUND: Color = Color::rgb(8, 8, 16);
    pub const ARENA_EDGE: Color = Color::rgb(60, 60, 90);
    pub const ITEM: Color = Color::WHITE;
    /// Whole hull while a craft flashes from damage
    pub const HIT_FLASH: Color = Color::WHITE;
    pub const GLITCH_RING: Color = Color::rgb(120, 255, 200);
}
