//! Per-entity drawing on a `Surface`
//!
//! Positions are in arena space; every routine adds the camera offset
//! itself. Nothing here mutates the state, so a frame can be drawn any
//! number of times without changing the simulation.

use glam::Vec2;

use super::{Surface, colors};
use crate::sim::craft::{Craft, HullPart};
use crate::sim::explosion::Explosion;
use crate::sim::item::Item;
use crate::sim::projectile::Projectile;
use crate::sim::state::GameState;

/// Explosion ring line width
const EXPLOSION_LINE_WIDTH: f32 = 5.0;
const GLITCH_LINE_WIDTH: f32 = 2.0;
const ARENA_EDGE_WIDTH: f32 = 4.0;

/// Draw a full frame: background, arena edge, then every entity
pub fn render_frame(state: &GameState, surface: &mut dyn Surface) {
    let camera = state.camera;
    surface.clear(colors::BACKGROUND);
    arena_edge(surface, state.tuning.arena_half_extent, camera);

    for item in state.items.iter() {
        draw_item(surface, item, camera);
    }
    for bullet in state.bullets.iter() {
        draw_bullet(surface, bullet, camera);
    }
    for enemy in state.enemies.iter() {
        draw_craft(surface, enemy, camera);
    }
    if let Some(player) = state.player.craft() {
        draw_craft(surface, player, camera);
    }
    for explosion in state.explosions.iter() {
        draw_explosion(surface, explosion, camera);
    }
}

fn arena_edge(surface: &mut dyn Surface, half_extent: f32, camera: Vec2) {
    let min = camera - Vec2::splat(half_extent);
    let span = half_extent * 2.0;
    let w = ARENA_EDGE_WIDTH;
    surface.fill_rect(min - Vec2::splat(w), Vec2::new(span + 2.0 * w, w), colors::ARENA_EDGE);
    surface.fill_rect(min + Vec2::new(-w, span), Vec2::new(span + 2.0 * w, w), colors::ARENA_EDGE);
    surface.fill_rect(min - Vec2::new(w, 0.0), Vec2::new(w, span), colors::ARENA_EDGE);
    surface.fill_rect(min + Vec2::new(span, 0.0), Vec2::new(w, span), colors::ARENA_EDGE);
}

/// Draw a craft rotated by its heading: wings, body, then the optional
/// cockpit (nose end of the body) and stripe (across the middle).
pub fn draw_craft(surface: &mut dyn Surface, craft: &Craft, camera: Vec2) {
    let look = &craft.look;
    let flashing = craft.hit_flash > 0;

    surface.save();
    surface.translate(craft.pos + camera);
    surface.rotate(craft.heading_radians);

    let mut fill = |part: &HullPart, top_left: Vec2| {
        let color = if flashing { colors::HIT_FLASH } else { part.color };
        surface.fill_rect(top_left, Vec2::new(part.width, part.height), color);
    };

    // Both wings as one bar spanning the hull
    fill(
        &HullPart {
            width: look.width,
            ..look.wings
        },
        Vec2::new(-look.width / 2.0, -look.wings.height / 2.0),
    );
    fill(
        &look.body,
        Vec2::new(-look.body.width / 2.0, -look.body.height / 2.0),
    );
    if let Some(cockpit) = &look.cockpit {
        fill(cockpit, Vec2::new(-cockpit.width / 2.0, -look.body.height / 2.0));
    }
    if let Some(stripe) = &look.stripe {
        fill(stripe, Vec2::new(-stripe.width / 2.0, -stripe.height / 2.0));
    }

    if craft.glitching {
        let progress = craft.glitch_frame as f32 / craft.glitch_frames.max(1) as f32;
        surface.stroke_circle(
            Vec2::ZERO,
            craft.glitch_radius,
            GLITCH_LINE_WIDTH,
            colors::GLITCH_RING.with_alpha(progress),
        );
    }

    surface.restore();
}

pub fn draw_bullet(surface: &mut dyn Surface, bullet: &Projectile, camera: Vec2) {
    surface.fill_circle(bullet.pos + camera, bullet.radius, bullet.color);
}

pub fn draw_item(surface: &mut dyn Surface, item: &Item, camera: Vec2) {
    let half = Vec2::splat(item.size / 2.0);
    surface.fill_rect(item.pos - half + camera, Vec2::splat(item.size), colors::ITEM);
}

/// Flickering ring; skipped entirely on blank frames
pub fn draw_explosion(surface: &mut dyn Surface, explosion: &Explosion, camera: Vec2) {
    let opacity = explosion.opacity();
    if opacity <= 0.0 {
        return;
    }
    surface.stroke_circle(
        explosion.pos + camera,
        explosion.size,
        EXPLOSION_LINE_WIDTH,
        explosion.color.with_alpha(opacity),
    );
}
