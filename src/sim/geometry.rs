//! Geometry and randomness helpers shared by every entity

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Approximate equality: `|a - b| <= range`
#[inline]
pub fn within(a: f32, b: f32, range: f32) -> bool {
    (a - b).abs() <= range
}

/// Inclusive random integer in `[min, max]`
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Inclusive random float in `[min, max]`
pub fn random_float<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Fair coin flip
pub fn random_bool<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

/// Point offset from `center` by up to ±`buffer` on each axis (x and y are
/// drawn independently, so the result is uniform over a square).
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, center: Vec2, buffer: f32) -> Vec2 {
    Vec2::new(
        center.x + random_float(rng, -buffer, buffer),
        center.y + random_float(rng, -buffer, buffer),
    )
}

/// Opaque cosmetic color (the simulation never inspects it)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Random opaque color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }

    /// CSS `rgba(...)` string for canvas-style surfaces
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_to_radians() {
        assert!((to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((to_radians(-90.0) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_within_is_inclusive() {
        assert!(within(10.0, 12.0, 2.0));
        assert!(within(12.0, 10.0, 2.0));
        assert!(!within(10.0, 12.5, 2.0));
    }

    #[test]
    fn test_random_ranges_inclusive() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let i = random_int(&mut rng, 3, 5);
            assert!((3..=5).contains(&i));
            let f = random_float(&mut rng, 0.2, 0.5);
            assert!((0.2..=0.5).contains(&f));
        }
        assert_eq!(random_int(&mut rng, 4, 4), 4);
        assert_eq!(random_float(&mut rng, 1.5, 1.5), 1.5);
    }

    #[test]
    fn test_random_point_stays_in_square() {
        let mut rng = Pcg32::seed_from_u64(11);
        let center = Vec2::new(100.0, -50.0);
        for _ in 0..500 {
            let p = random_point(&mut rng, center, 25.0);
            assert!(within(p.x, center.x, 25.0));
            assert!(within(p.y, center.y, 25.0));
        }
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.5)");
        assert_eq!(Color::WHITE.with_alpha(4.0).a, 1.0);
    }
}
