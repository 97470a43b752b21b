//! Craft AI: enemy behaviours and the idle-mode autopilot
//!
//! AI never holds references into the arena. It sees a snapshot of nearby
//! crafts (`Sighting`s) and remembers its target by id, which is looked up
//! again every tick and dropped once the craft is gone.

use glam::Vec2;
use rand::Rng;

use super::craft::{Behavior, Craft, CraftId};
use super::geometry::random_bool;
use super::tick::TickInput;
use crate::consts::LOOK_SNAP_DEGREES;
use crate::tuning::Tuning;
use crate::{bearing_degrees, normalize_degrees};

/// A craft as seen by the AI this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub id: CraftId,
    pub pos: Vec2,
    pub weak: bool,
}

impl Sighting {
    pub fn of(craft: &Craft) -> Self {
        Self {
            id: craft.id,
            pos: craft.pos,
            weak: craft.is_weak(),
        }
    }
}

/// Targets are dropped once they wander this far beyond the aggro radius
const TARGET_LEASH: f32 = 1.5;

/// Re-resolve the craft's target, acquiring a new one if needed
pub fn refresh_target(craft: &mut Craft, others: &[Sighting], tuning: &Tuning) -> Option<Sighting> {
    if craft.behavior == Behavior::Lazy {
        craft.target = None;
        return None;
    }

    let leash = tuning.aggro_radius * TARGET_LEASH;
    let current = craft
        .target
        .and_then(|id| others.iter().find(|s| s.id == id))
        .filter(|s| s.pos.distance(craft.pos) <= leash)
        .copied();

    let resolved = current.or_else(|| {
        others
            .iter()
            .filter(|s| s.id != craft.id && s.pos.distance(craft.pos) <= tuning.aggro_radius)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(craft.pos)
                    .total_cmp(&b.pos.distance_squared(craft.pos))
            })
            .copied()
    });

    craft.target = resolved.map(|s| s.id);
    resolved
}

/// Steer an enemy for one tick. Returns true if it wants to fire.
pub fn drive_enemy<R: Rng + ?Sized>(
    craft: &mut Craft,
    others: &[Sighting],
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    let target = refresh_target(craft, others, tuning);

    if rng.random::<f32>() < tuning.enemy_turn_chance {
        match (craft.behavior, target) {
            (Behavior::Aggressive, Some(t)) => craft.look_towards(t.pos),
            (Behavior::Fearful, Some(t)) => craft.look_away_from(t.pos),
            _ => {
                if random_bool(rng) {
                    craft.rotate_clockwise();
                } else {
                    craft.rotate_counter_clockwise();
                }
            }
        }
    }

    craft.move_forward();

    rng.random::<f32>() < tuning.enemy_fire_chance * craft.aggressiveness
}

/// Distance the autopilot tries to keep from its prey
const AUTOPILOT_STANDOFF: f32 = 120.0;
/// Fire when the nose is within this many degrees of the prey
const AUTOPILOT_AIM_DEGREES: f32 = 8.0;

/// Input an AI pilot would give the player's craft this tick
pub fn autopilot(player: &Craft, others: &[Sighting]) -> TickInput {
    let mut input = TickInput::default();

    // Weak crafts in glitch reach are worth more than anything else
    let prey = others
        .iter()
        .filter(|s| s.weak)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .total_cmp(&b.pos.distance_squared(player.pos))
        })
        .or_else(|| {
            others.iter().min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .total_cmp(&b.pos.distance_squared(player.pos))
            })
        });

    let Some(prey) = prey else {
        return input;
    };

    let delta = normalize_degrees(bearing_degrees(player.pos, prey.pos) - player.heading);
    input.rotate_right = delta > LOOK_SNAP_DEGREES;
    input.rotate_left = delta < -LOOK_SNAP_DEGREES;

    let distance = player.pos.distance(prey.pos);
    if prey.weak {
        input.forward = true;
        input.glitch = distance <= player.glitch_radius * 2.0;
    } else {
        input.forward = distance > AUTOPILOT_STANDOFF;
        input.backward = distance < AUTOPILOT_STANDOFF * 0.5;
        input.fire = delta.abs() <= AUTOPILOT_AIM_DEGREES;
    }

    input
}
