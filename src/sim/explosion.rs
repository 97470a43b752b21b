//! Explosions: expanding, flickering rings
//!
//! Growth is advanced by the simulation tick, so how often the host draws
//! has no effect on when an explosion finishes.

use glam::Vec2;

use super::geometry::Color;
use crate::consts::EXPLOSION_START_SIZE;

#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub color: Color,
    /// Current ring radius
    pub size: f32,
    pub max_size: f32,
    /// Marks the explosion left by the player's craft; its end resets the run
    pub is_player_explosion: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, color: Color, max_size: f32) -> Self {
        Self {
            pos,
            color,
            size: EXPLOSION_START_SIZE,
            max_size,
            is_player_explosion: false,
        }
    }

    /// The explosion left by a destroyed player craft
    pub fn player_death(pos: Vec2, color: Color, max_size: f32) -> Self {
        Self {
            is_player_explosion: true,
            ..Self::new(pos, color, max_size)
        }
    }

    /// Grow by one step
    pub fn advance(&mut self) {
        self.size += 1.0;
    }

    pub fn is_finished(&self) -> bool {
        self.size > self.max_size
    }

    /// Ring opacity: fades as it grows, blanked on alternating tenths
    pub fn opacity(&self) -> f32 {
        let opacity = ((self.max_size - self.size) / self.max_size).max(0.0);
        if ((opacity * 10.0).floor() as i32) % 2 == 0 {
            0.0
        } else {
            opacity
        }
    }
}
