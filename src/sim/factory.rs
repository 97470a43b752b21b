//! Procedural craft generation
//!
//! Every call draws a fresh, self-contained configuration: nothing cosmetic
//! is shared between crafts, and optional hull features only exist together
//! with their dimensions.

use glam::Vec2;
use rand::Rng;

use super::craft::{Behavior, CraftConfig, CraftLook, HullPart, Weapon};
use super::geometry::{Color, random_bool, random_float, random_int};

/// Overall hull size range (pixels, each axis)
const HULL_SIZE: (i32, i32) = (20, 40);
/// Body width in tenths of the hull; wings split the remainder
const BODY_WIDTH_FACTOR: (i32, i32) = (3, 8);
const WING_HEIGHT_RATIO: (f32, f32) = (0.2, 0.5);
const BODY_HEIGHT_RATIO: (f32, f32) = (0.6, 1.0);
const COCKPIT_WIDTH_RATIO: (f32, f32) = (0.5, 1.0);
const COCKPIT_HEIGHT_RATIO: (f32, f32) = (0.1, 0.5);
const STRIPE_HEIGHT_RATIO: (f32, f32) = (0.0, 0.5);

const MAX_SPEED: (f32, f32) = (1.0, 3.0);
/// Bullet speed as a multiple of the craft's max speed
const BULLET_SPEED_FACTOR: (f32, f32) = (2.0, 4.0);
const BULLET_RANGE: (i32, i32) = (80, 140);
const BULLET_RADIUS: (i32, i32) = (2, 4);
const BULLET_DELAY: (i32, i32) = (20, 50);
const HEALTH: (i32, i32) = (20, 50);
const AGGRESSIVENESS: (f32, f32) = (0.0, 1.0);

/// Draw a random craft configuration at `pos`
pub fn generate<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> CraftConfig {
    let width = random_int(rng, HULL_SIZE.0, HULL_SIZE.1) as f32;
    let height = random_int(rng, HULL_SIZE.0, HULL_SIZE.1) as f32;

    let body_factor = random_int(rng, BODY_WIDTH_FACTOR.0, BODY_WIDTH_FACTOR.1) as f32;
    let wing_factor = (10.0 - body_factor) / 2.0;

    let wings = HullPart {
        color: Color::random(rng),
        width: width * wing_factor * 0.1,
        height: height * random_float(rng, WING_HEIGHT_RATIO.0, WING_HEIGHT_RATIO.1),
    };
    let body = HullPart {
        color: Color::random(rng),
        width: width * body_factor * 0.1,
        height: height * random_float(rng, BODY_HEIGHT_RATIO.0, BODY_HEIGHT_RATIO.1),
    };

    let cockpit = random_bool(rng).then(|| HullPart {
        color: Color::random(rng),
        width: body.width * random_float(rng, COCKPIT_WIDTH_RATIO.0, COCKPIT_WIDTH_RATIO.1),
        height: body.height * random_float(rng, COCKPIT_HEIGHT_RATIO.0, COCKPIT_HEIGHT_RATIO.1),
    });
    let stripe = random_bool(rng).then(|| HullPart {
        color: Color::random(rng),
        width: body.width,
        height: body.height * random_float(rng, STRIPE_HEIGHT_RATIO.0, STRIPE_HEIGHT_RATIO.1),
    });

    let max_speed = random_float(rng, MAX_SPEED.0, MAX_SPEED.1);
    let bullet_radius = random_int(rng, BULLET_RADIUS.0, BULLET_RADIUS.1) as f32;
    let weapon = Weapon {
        bullet_speed: max_speed * random_float(rng, BULLET_SPEED_FACTOR.0, BULLET_SPEED_FACTOR.1),
        bullet_range: random_int(rng, BULLET_RANGE.0, BULLET_RANGE.1) as u32,
        bullet_radius,
        bullet_color: Color::random(rng),
        bullet_damage: bullet_radius,
        bullet_delay: random_int(rng, BULLET_DELAY.0, BULLET_DELAY.1) as u32,
    };

    let behavior = match rng.random_range(0..3) {
        0 => Behavior::Lazy,
        1 => Behavior::Aggressive,
        _ => Behavior::Fearful,
    };

    CraftConfig {
        pos,
        look: CraftLook {
            width,
            height,
            body,
            wings,
            cockpit,
            stripe,
        },
        weapon,
        max_health: random_int(rng, HEALTH.0, HEALTH.1) as f32,
        max_speed,
        aggressiveness: random_float(rng, AGGRESSIVENESS.0, AGGRESSIVENESS.1),
        behavior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generated_configs_are_in_range() {
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..200 {
            let c = generate(&mut rng, Vec2::new(5.0, 6.0));
            assert_eq!(c.pos, Vec2::new(5.0, 6.0));
            assert!((20.0..=40.0).contains(&c.look.width));
            assert!((20.0..=40.0).contains(&c.look.height));
            // Body and both wings span the full hull width
            let span = c.look.body.width + 2.0 * c.look.wings.width;
            assert!((span - c.look.width).abs() < 1e-3);
            assert!((20.0..=50.0).contains(&c.max_health));
            assert!((80..=140).contains(&c.weapon.bullet_range));
            assert!((20..=50).contains(&c.weapon.bullet_delay));
            assert_eq!(c.weapon.bullet_damage, c.weapon.bullet_radius);
            assert!(c.weapon.bullet_speed >= c.max_speed * 2.0 - 1e-4);
            assert!(c.weapon.bullet_speed <= c.max_speed * 4.0 + 1e-4);
            assert!((0.0..=1.0).contains(&c.aggressiveness));
            if let Some(cockpit) = c.look.cockpit {
                assert!(cockpit.width <= c.look.body.width + 1e-4);
            }
            if let Some(stripe) = c.look.stripe {
                assert_eq!(stripe.width, c.look.body.width);
            }
        }
    }

    #[test]
    fn test_optional_features_vary() {
        let mut rng = Pcg32::seed_from_u64(1);
        let configs: Vec<_> = (0..100).map(|_| generate(&mut rng, Vec2::ZERO)).collect();
        assert!(configs.iter().any(|c| c.look.cockpit.is_some()));
        assert!(configs.iter().any(|c| c.look.cockpit.is_none()));
        assert!(configs.iter().any(|c| c.look.stripe.is_some()));
        assert!(configs.iter().any(|c| c.look.stripe.is_none()));
    }

    #[test]
    fn test_same_seed_same_craft() {
        let a = generate(&mut Pcg32::seed_from_u64(77), Vec2::ZERO);
        let b = generate(&mut Pcg32::seed_from_u64(77), Vec2::ZERO);
        assert_eq!(a, b);
    }
}
