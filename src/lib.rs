//! Glitch Arena - a top-down arena shooter with ship possession
//!
//! Core modules:
//! - `sim`: Deterministic simulation (crafts, bullets, collisions, glitching)
//! - `renderer`: Abstract draw surface and per-entity drawing
//! - `platform`: Key mapping and browser glue
//! - `persistence`: Minimal key-value store for the best score
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the host scheduler targets (one tick every 10 ms)
    pub const TICKS_PER_SECOND: u32 = 100;
    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tolerance (degrees) within which `look_towards` snaps onto the bearing
    pub const LOOK_SNAP_DEGREES: f32 = 2.0;
    /// Explosion ring starting radius
    pub const EXPLOSION_START_SIZE: f32 = 1.0;
    /// Item footprint (square, pixels)
    pub const ITEM_SIZE: f32 = 10.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Unit direction for a heading in degrees. Zero points up (negative y in
/// screen space), positive headings turn clockwise.
#[inline]
pub fn heading_to_direction(degrees: f32) -> glam::Vec2 {
    let radians = degrees.to_radians();
    glam::Vec2::new(radians.sin(), -radians.cos())
}

/// Bearing in degrees from `from` toward `to`, in the same convention as
/// [`heading_to_direction`].
#[inline]
pub fn bearing_degrees(from: glam::Vec2, to: glam::Vec2) -> f32 {
    let delta = from - to;
    -delta.x.atan2(delta.y).to_degrees()
}
