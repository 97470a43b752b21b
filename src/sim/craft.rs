//! Crafts: the player's ship and every enemy
//!
//! A craft carries its own physics (heading, speed, knockback), weapon
//! cooldown, health and glitch state. Arena-level decisions (who collides,
//! who gets possessed) live in `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, box_contains};
use super::geometry::{Color, to_radians, within};
use super::projectile::{Projectile, ProjectileConfig};
use crate::consts::LOOK_SNAP_DEGREES;
use crate::tuning::Tuning;
use crate::{bearing_degrees, heading_to_direction, normalize_degrees};

/// Stable craft identity, used for kill attribution and AI targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CraftId(pub u32);

/// Movement intent. Persists after thrust is released so the craft drifts
/// in the last direction while its speed bleeds off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Thrust {
    #[default]
    Idle,
    Forward,
    Backward,
}

/// How an enemy craft behaves when left to the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Behavior {
    /// Wanders, turning at random
    #[default]
    Lazy,
    /// Hunts the nearest craft and fires at it
    Aggressive,
    /// Turns away from nearby crafts
    Fearful,
}

/// One rectangular piece of a craft's hull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullPart {
    pub color: Color,
    pub width: f32,
    pub height: f32,
}

/// Cosmetic layout of a craft. Only `width`/`height` matter to the simulation
/// (they size the bounding circle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraftLook {
    pub width: f32,
    pub height: f32,
    pub body: HullPart,
    pub wings: HullPart,
    pub cockpit: Option<HullPart>,
    pub stripe: Option<HullPart>,
}

/// Weapon stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub bullet_speed: f32,
    /// Lifetime of a bullet, in ticks
    pub bullet_range: u32,
    pub bullet_radius: f32,
    pub bullet_color: Color,
    pub bullet_damage: f32,
    /// Cooldown between shots, in ticks
    pub bullet_delay: u32,
}

/// Everything needed to build a craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraftConfig {
    pub pos: Vec2,
    pub look: CraftLook,
    pub weapon: Weapon,
    pub max_health: f32,
    pub max_speed: f32,
    pub aggressiveness: f32,
    pub behavior: Behavior,
}

impl CraftConfig {
    /// A plain grey 30x30 craft with middling stats
    pub fn basic(pos: Vec2) -> Self {
        let grey = Color::rgb(160, 160, 160);
        Self {
            pos,
            look: CraftLook {
                width: 30.0,
                height: 30.0,
                body: HullPart {
                    color: grey,
                    width: 12.0,
                    height: 30.0,
                },
                wings: HullPart {
                    color: grey,
                    width: 9.0,
                    height: 10.0,
                },
                cockpit: None,
                stripe: None,
            },
            weapon: Weapon {
                bullet_speed: 6.0,
                bullet_range: 100,
                bullet_radius: 3.0,
                bullet_color: Color::WHITE,
                bullet_damage: 3.0,
                bullet_delay: 30,
            },
            max_health: 40.0,
            max_speed: 2.0,
            aggressiveness: 0.5,
            behavior: Behavior::Lazy,
        }
    }
}

/// A ship in the arena
#[derive(Debug, Clone)]
pub struct Craft {
    pub id: CraftId,
    pub pos: Vec2,
    /// Heading in degrees, unbounded (never wrapped)
    pub heading: f32,
    /// `heading` in radians as of the last update
    pub heading_radians: f32,
    /// Displacement applied by the last update
    pub velocity: Vec2,

    pub thrust: Thrust,
    pub is_moving: bool,
    pub speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub rotation_speed: f32,
    /// Knockback speed; overrides normal movement while positive
    pub push_speed: f32,
    pub push_decay: f32,

    pub health: f32,
    pub max_health: f32,
    pub weak_threshold: f32,

    pub weapon: Weapon,
    /// Ticks until the weapon can fire again
    pub cooldown: u32,

    pub glitch_radius: f32,
    pub glitching: bool,
    pub glitch_frame: u32,
    pub glitch_frames: u32,

    /// Ticks left on the damage flash
    pub hit_flash: u32,
    pub hit_flash_ticks: u32,

    pub behavior: Behavior,
    pub aggressiveness: f32,
    /// Non-owning AI target; re-resolved every tick
    pub target: Option<CraftId>,
    pub last_attacker: Option<CraftId>,
    /// Tutorial ships are never destroyed and ignore collision damage
    pub is_tutorial_ship: bool,

    pub look: CraftLook,
}

impl Craft {
    pub fn new(id: CraftId, config: CraftConfig, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: config.pos,
            heading: 0.0,
            heading_radians: 0.0,
            velocity: Vec2::ZERO,
            thrust: Thrust::Idle,
            is_moving: false,
            speed: 0.0,
            max_speed: config.max_speed,
            acceleration: tuning.acceleration,
            rotation_speed: tuning.rotation_speed,
            push_speed: 0.0,
            push_decay: tuning.push_decay,
            health: config.max_health,
            max_health: config.max_health,
            weak_threshold: tuning.weak_threshold,
            weapon: config.weapon,
            cooldown: 0,
            glitch_radius: tuning.glitch_radius,
            glitching: false,
            glitch_frame: 0,
            glitch_frames: tuning.glitch_animation_ticks,
            hit_flash: 0,
            hit_flash_ticks: tuning.hit_flash_ticks,
            behavior: config.behavior,
            aggressiveness: config.aggressiveness,
            target: None,
            last_attacker: None,
            is_tutorial_ship: false,
            look: config.look,
        }
    }

    /// Advance one tick of movement and timers
    pub fn update(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.hit_flash = self.hit_flash.saturating_sub(1);
        self.glitch_frame = if self.glitching {
            (self.glitch_frame + 1).min(self.glitch_frames)
        } else {
            0
        };

        let pushed = self.push_speed > 0.0;
        let effective_speed = if pushed { self.push_speed } else { self.speed };
        self.heading_radians = to_radians(self.heading);
        self.velocity = heading_to_direction(self.heading) * effective_speed;

        if pushed {
            self.pos -= self.velocity;
            self.push_speed = (self.push_speed - self.push_decay).max(0.0);
        } else {
            match self.thrust {
                Thrust::Forward => self.pos += self.velocity,
                Thrust::Backward => self.pos -= self.velocity,
                Thrust::Idle => {}
            }
        }

        self.speed = if self.is_moving {
            (self.speed + self.acceleration).min(self.max_speed)
        } else {
            (self.speed - self.acceleration).max(0.0)
        };
    }

    pub fn move_forward(&mut self) {
        self.thrust = Thrust::Forward;
        self.is_moving = true;
    }

    pub fn move_backward(&mut self) {
        self.thrust = Thrust::Backward;
        self.is_moving = true;
    }

    /// Release thrust; the craft keeps drifting until its speed runs out
    pub fn coast(&mut self) {
        self.is_moving = false;
    }

    pub fn rotate_clockwise(&mut self) {
        self.heading += self.rotation_speed;
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.heading -= self.rotation_speed;
    }

    /// Turn one rotation step toward `point`, snapping once within tolerance
    pub fn look_towards(&mut self, point: Vec2) {
        let bearing = bearing_degrees(self.pos, point);
        let delta = normalize_degrees(bearing - self.heading);
        if within(delta, 0.0, LOOK_SNAP_DEGREES) {
            self.heading += delta;
        } else if delta > 0.0 {
            self.rotate_clockwise();
        } else {
            self.rotate_counter_clockwise();
        }
    }

    /// Turn one rotation step away from `point`
    pub fn look_away_from(&mut self, point: Vec2) {
        let mirrored = self.pos * 2.0 - point;
        self.look_towards(mirrored);
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown == 0
    }

    /// Start the weapon cooldown
    pub fn shoot(&mut self) {
        self.cooldown = self.weapon.bullet_delay;
    }

    /// A bullet leaving this craft's nose right now
    pub fn get_bullet(&self) -> Projectile {
        Projectile::new(ProjectileConfig {
            pos: self.pos,
            heading: self.heading,
            speed: self.weapon.bullet_speed,
            range: self.weapon.bullet_range,
            radius: self.weapon.bullet_radius,
            color: self.weapon.bullet_color,
            damage: self.weapon.bullet_damage,
            source: self.id,
        })
    }

    /// Shoot if the cooldown allows, returning the bullet
    pub fn fire(&mut self) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        self.shoot();
        Some(self.get_bullet())
    }

    pub fn bounding_radius(&self) -> f32 {
        self.look.width.max(self.look.height) / 2.0
    }

    pub fn bounding_circle(&self) -> Circle {
        Circle::new(self.pos, self.bounding_radius())
    }

    pub fn intersects(&self, circle: &Circle) -> bool {
        self.bounding_circle().intersects(circle)
    }

    /// Axis-aligned pickup box around the craft
    pub fn contains(&self, point: Vec2) -> bool {
        let half = Vec2::new(self.look.width, self.look.height) / 2.0;
        box_contains(self.pos, half, point)
    }

    pub fn health_ratio(&self) -> f32 {
        self.health / self.max_health
    }

    /// Weak crafts can be glitched into
    pub fn is_weak(&self) -> bool {
        self.health_ratio() <= self.weak_threshold
    }

    pub fn can_be_glitched(&self) -> bool {
        self.is_weak()
    }

    /// Whether `circle` falls inside this craft's glitch reach
    pub fn is_in_glitch_range(&self, circle: &Circle) -> bool {
        Circle::new(self.pos, self.glitch_radius).intersects(circle)
    }

    pub fn set_glitching(&mut self, glitching: bool) {
        self.glitching = glitching;
    }

    pub fn damage(&mut self, amount: f32) {
        self.health -= amount;
        self.hit_flash = self.hit_flash_ticks;
    }

    /// Restore health, never above max
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn knock_back(&mut self, speed: f32) {
        self.push_speed = speed;
    }

    /// Destroyed once health drops strictly below zero (tutorial ships never are)
    pub fn is_destroyed(&self) -> bool {
        self.health < 0.0 && !self.is_tutorial_ship
    }

    /// Keep the craft inside the square arena
    pub fn clamp_to_arena(&mut self, half_extent: f32) {
        self.pos = self.pos.clamp(Vec2::splat(-half_extent), Vec2::splat(half_extent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn craft() -> Craft {
        Craft::new(CraftId(1), CraftConfig::basic(Vec2::ZERO), &Tuning::default())
    }

    #[test]
    fn test_forward_moves_up_at_zero_heading() {
        let mut c = craft();
        c.speed = 2.0;
        c.move_forward();
        c.update();
        assert!(c.pos.y < 0.0);
        assert!(c.pos.x.abs() < 1e-5);
    }

    #[test]
    fn test_acceleration_clamps_at_max_speed() {
        let mut c = craft();
        c.move_forward();
        for _ in 0..200 {
            c.update();
        }
        assert_eq!(c.speed, c.max_speed);
    }

    #[test]
    fn test_coasting_drifts_then_stops() {
        let mut c = craft();
        c.speed = 1.0;
        c.move_forward();
        c.coast();
        let start = c.pos;
        c.update();
        assert!(c.pos.y < start.y);
        for _ in 0..50 {
            c.update();
        }
        assert_eq!(c.speed, 0.0);
        let rest = c.pos;
        c.update();
        assert_eq!(c.pos, rest);
    }

    #[test]
    fn test_push_overrides_and_decays() {
        let mut c = craft();
        c.speed = 2.0;
        c.move_forward();
        c.knock_back(1.0);
        c.update();
        // Pushed backward (down), not forward
        assert!(c.pos.y > 0.0);
        assert_eq!(c.push_speed, 1.0 - c.push_decay);
        for _ in 0..10 {
            c.update();
        }
        assert_eq!(c.push_speed, 0.0);
        let y = c.pos.y;
        c.update();
        assert!(c.pos.y < y, "normal movement resumes after push");
    }

    #[test]
    fn test_heading_is_unbounded() {
        let mut c = craft();
        for _ in 0..200 {
            c.rotate_clockwise();
        }
        assert_eq!(c.heading, 200.0 * c.rotation_speed);
    }

    #[test]
    fn test_look_towards_steps_then_snaps() {
        let mut c = craft();
        let target = Vec2::new(100.0, 0.0); // bearing 90
        c.look_towards(target);
        assert_eq!(c.heading, c.rotation_speed);
        for _ in 0..100 {
            c.look_towards(target);
        }
        assert!((c.heading - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_look_towards_takes_short_way_after_many_turns() {
        let mut c = craft();
        c.heading = 720.0 + 10.0;
        c.look_towards(Vec2::new(0.0, -100.0)); // bearing 0
        assert_eq!(c.heading, 730.0 - c.rotation_speed);
    }

    #[test]
    fn test_cooldown_gates_firing() {
        let mut c = craft();
        let bullet = c.fire().unwrap();
        assert_eq!(bullet.source, c.id);
        assert!(c.fire().is_none());
        for _ in 0..c.weapon.bullet_delay {
            c.update();
        }
        assert!(c.can_shoot());
    }

    #[test]
    fn test_destroyed_is_strictly_below_zero() {
        let mut c = craft();
        c.damage(c.health);
        assert_eq!(c.health, 0.0);
        assert!(!c.is_destroyed());
        c.damage(0.5);
        assert!(c.is_destroyed());
        c.is_tutorial_ship = true;
        assert!(!c.is_destroyed());
    }

    #[test]
    fn test_damage_sets_flash() {
        let mut c = craft();
        c.damage(1.0);
        assert_eq!(c.hit_flash, c.hit_flash_ticks);
        c.update();
        assert_eq!(c.hit_flash, c.hit_flash_ticks - 1);
    }

    #[test]
    fn test_glitch_animation_saturates_and_resets() {
        let mut c = craft();
        c.set_glitching(true);
        for _ in 0..(c.glitch_frames + 5) {
            c.update();
        }
        assert_eq!(c.glitch_frame, c.glitch_frames);
        c.set_glitching(false);
        c.update();
        assert_eq!(c.glitch_frame, 0);
    }

    #[test]
    fn test_weak_threshold_boundary() {
        let mut c = craft();
        c.health = c.max_health * c.weak_threshold;
        assert!(c.is_weak());
        assert!(c.can_be_glitched());
        c.health += 0.01;
        assert!(!c.is_weak());
    }

    #[test]
    fn test_glitch_range_uses_glitch_radius() {
        let c = craft();
        let near = Circle::new(Vec2::new(c.glitch_radius + 5.0, 0.0), 10.0);
        let far = Circle::new(Vec2::new(c.glitch_radius + 50.0, 0.0), 10.0);
        assert!(c.is_in_glitch_range(&near));
        assert!(!c.is_in_glitch_range(&far));
        assert!(!c.intersects(&near));
    }

    #[test]
    fn test_heal_never_exceeds_max() {
        let mut c = craft();
        c.damage(5.0);
        c.heal(100.0);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_clamp_to_arena() {
        let mut c = craft();
        c.pos = Vec2::new(5000.0, -5000.0);
        c.clamp_to_arena(100.0);
        assert_eq!(c.pos, Vec2::new(100.0, -100.0));
    }

    proptest! {
        #[test]
        fn prop_health_never_exceeds_max(ops in proptest::collection::vec((0u8..4, 0.0f32..30.0), 0..60)) {
            let mut c = craft();
            for (op, amount) in ops {
                match op {
                    0 => c.damage(amount),
                    1 => c.heal(amount),
                    2 => c.restore_health(),
                    _ => c.update(),
                }
                prop_assert!(c.health <= c.max_health);
                prop_assert_eq!(c.is_weak(), c.health / c.max_health <= c.weak_threshold);
            }
        }
    }
}
