//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by `GameState`)
//! - Stable iteration order (collection order, compacted once per tick)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod craft;
pub mod explosion;
pub mod factory;
pub mod geometry;
pub mod item;
pub mod projectile;
pub mod slots;
pub mod state;
pub mod tick;
pub mod tutorial;

pub use ai::Sighting;
pub use collision::{BodyImpact, Circle, circles_intersect, resolve_body_collision};
pub use craft::{Behavior, Craft, CraftConfig, CraftId, CraftLook, HullPart, Thrust, Weapon};
pub use explosion::Explosion;
pub use geometry::Color;
pub use item::Item;
pub use projectile::{Projectile, ProjectileConfig};
pub use slots::Slots;
pub use state::{GameEvent, GameState, PlayerSlot};
pub use tick::{TickInput, tick};
pub use tutorial::{TutorialProgress, TutorialStage};
