//! Bullets: straight-line, fixed-velocity, finite-range projectiles

use glam::Vec2;

use super::collision::Circle;
use super::craft::CraftId;
use super::geometry::Color;
use crate::heading_to_direction;

/// Firing parameters for a new bullet
#[derive(Debug, Clone, Copy)]
pub struct ProjectileConfig {
    pub pos: Vec2,
    /// Firing heading in degrees
    pub heading: f32,
    pub speed: f32,
    /// Lifetime in ticks
    pub range: u32,
    pub radius: f32,
    pub color: Color,
    pub damage: f32,
    pub source: CraftId,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Fixed at construction; never follows the shooter's later rotation
    pub velocity: Vec2,
    /// Ticks left before the bullet expires
    pub range: u32,
    pub radius: f32,
    pub color: Color,
    pub damage: f32,
    /// Craft that fired it
    pub source: CraftId,
}

impl Projectile {
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            pos: config.pos,
            velocity: heading_to_direction(config.heading) * config.speed,
            range: config.range,
            radius: config.radius,
            color: config.color,
            damage: config.damage,
            source: config.source,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.pos += self.velocity;
        self.range = self.range.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.range == 0
    }

    pub fn bounding_circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bullet(heading: f32, range: u32) -> Projectile {
        Projectile::new(ProjectileConfig {
            pos: Vec2::ZERO,
            heading,
            speed: 4.0,
            range,
            radius: 2.0,
            color: Color::WHITE,
            damage: 2.0,
            source: CraftId(9),
        })
    }

    #[test]
    fn test_velocity_from_heading() {
        let right = bullet(90.0, 10);
        assert!((right.velocity.x - 4.0).abs() < 1e-4);
        assert!(right.velocity.y.abs() < 1e-4);

        let mut up = bullet(0.0, 10);
        up.update();
        assert_eq!(up.pos, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn test_bounding_circle() {
        let b = bullet(0.0, 3);
        assert_eq!(b.bounding_circle(), Circle::new(Vec2::ZERO, 2.0));
    }

    proptest! {
        #[test]
        fn prop_expires_after_exactly_range_updates(range in 1u32..300) {
            let mut b = bullet(45.0, range);
            for _ in 0..range - 1 {
                b.update();
                prop_assert!(!b.is_expired());
            }
            b.update();
            prop_assert!(b.is_expired());
        }
    }
}
