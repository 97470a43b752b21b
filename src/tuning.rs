//! Data-driven game balance
//!
//! Every gameplay constant that is worth tweaking without a rebuild lives
//! here. Loaded from JSON; missing fields fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::persistence::StoreError;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Half-extent of the square arena; all crafts are clamped to ±this
    pub arena_half_extent: f32,
    /// Viewport point the player is kept centered on
    pub focal_point: Vec2,

    // === Crafts ===
    /// Health ratio at or below which a craft counts as weak (glitchable)
    pub weak_threshold: f32,
    /// Scale applied to |speedA - speedB| on body collisions
    pub collision_dampening: f32,
    /// Knockback speed = multiplier * max(speedA, speedB)
    pub knockback_multiplier: f32,
    /// Push speed lost per tick while knocked back
    pub push_decay: f32,
    /// Speed gained per tick while moving
    pub acceleration: f32,
    /// Degrees turned per rotate call
    pub rotation_speed: f32,
    /// Radius around a glitching craft inside which weak crafts are possessed
    pub glitch_radius: f32,
    /// Ticks for the glitch animation to saturate
    pub glitch_animation_ticks: u32,
    /// Ticks a craft flashes after taking damage
    pub hit_flash_ticks: u32,

    // === Scoring ===
    /// Awarded when the player destroys an enemy
    pub kill_score: u64,
    /// Awarded when the player glitches into an enemy
    pub possession_score: u64,
    /// Awarded when the player collects an item
    pub item_score: u64,

    // === Difficulty ===
    /// Live enemy cap at the start of a run
    pub starting_enemy_cap: u32,

    // === Enemy AI ===
    /// Per-tick chance that an enemy adjusts its heading
    pub enemy_turn_chance: f32,
    /// Per-tick chance (scaled by aggressiveness) that an enemy fires
    pub enemy_fire_chance: f32,
    /// Distance within which aggressive/fearful enemies pick a target
    pub aggro_radius: f32,

    // === Items ===
    /// Chance a destroyed enemy drops an item
    pub item_drop_chance: f32,
    /// Health restored by an item (never above max health)
    pub item_heal: f32,

    // === Effects ===
    /// Explosion ring radius at which the effect finishes
    pub explosion_max_size: f32,

    // === Tutorial ===
    /// Start new sessions in the tutorial
    pub tutorial: bool,
    /// Where the tutorial target ship sits relative to the origin
    pub tutorial_ship_offset: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Arena
            arena_half_extent: 1000.0,
            focal_point: Vec2::new(400.0, 300.0),

            // Crafts
            weak_threshold: 0.25,
            collision_dampening: 0.5,
            knockback_multiplier: 1.5,
            push_decay: 0.25,
            acceleration: 0.1,
            rotation_speed: 3.0,
            glitch_radius: 60.0,
            glitch_animation_ticks: 20,
            hit_flash_ticks: 6,

            // Scoring
            kill_score: 10,
            possession_score: 100,
            item_score: 5,

            // Difficulty
            starting_enemy_cap: 3,

            // Enemy AI
            enemy_turn_chance: 0.1,
            enemy_fire_chance: 0.05,
            aggro_radius: 300.0,

            // Items
            item_drop_chance: 0.3,
            item_heal: 10.0,

            // Effects
            explosion_max_size: 40.0,

            // Tutorial
            tutorial: true,
            tutorial_ship_offset: Vec2::new(0.0, -150.0),
        }
    }
}

impl Tuning {
    /// Tuning with the tutorial switched off (straight into the arena)
    pub fn without_tutorial() -> Self {
        Self {
            tutorial: false,
            ..Self::default()
        }
    }

    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "kill_score": 42, "tutorial": false }"#).unwrap();
        assert_eq!(tuning.kill_score, 42);
        assert!(!tuning.tutorial);
        assert_eq!(tuning.knockback_multiplier, Tuning::default().knockback_multiplier);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::without_tutorial();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
