//! Collision detection and response
//!
//! Everything that collides is approximated by a bounding circle. Body
//! collisions between crafts trade damage proportional to their speed
//! difference and knock both crafts backward.

use glam::Vec2;

use super::craft::Craft;
use crate::tuning::Tuning;

/// A bounding circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn intersects(&self, other: &Circle) -> bool {
        circles_intersect(self, other)
    }
}

/// Circle-circle overlap, inclusive at exact tangency
#[inline]
pub fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    reach * reach >= a.center.distance_squared(b.center)
}

/// Strict axis-aligned box containment around `center`
#[inline]
pub fn box_contains(center: Vec2, half_extents: Vec2, point: Vec2) -> bool {
    point.x > center.x - half_extents.x
        && point.x < center.x + half_extents.x
        && point.y > center.y - half_extents.y
        && point.y < center.y + half_extents.y
}

/// Outcome of a body collision, applied identically to both crafts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyImpact {
    /// Health each craft loses (tutorial ships are exempt)
    pub damage: f32,
    /// Push speed each craft is knocked back with
    pub knockback: f32,
}

/// Impact for two crafts colliding at the given speeds
pub fn body_impact(speed_a: f32, speed_b: f32, tuning: &Tuning) -> BodyImpact {
    BodyImpact {
        damage: (speed_a - speed_b).abs() * tuning.collision_dampening,
        knockback: tuning.knockback_multiplier * speed_a.max(speed_b),
    }
}

/// Apply the body collision rule if the two crafts overlap
pub fn resolve_body_collision(a: &mut Craft, b: &mut Craft, tuning: &Tuning) -> Option<BodyImpact> {
    if !a.intersects(&b.bounding_circle()) {
        return None;
    }

    let impact = body_impact(a.speed, b.speed, tuning);
    for craft in [&mut *a, &mut *b] {
        if !craft.is_tutorial_ship {
            craft.damage(impact.damage);
        }
        craft.knock_back(impact.knockback);
    }
    a.last_attacker = Some(b.id);
    b.last_attacker = Some(a.id);

    Some(impact)
}
