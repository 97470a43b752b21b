//! Fixed-step simulation tick
//!
//! Core game loop that advances the arena by one frame. The passes run in a
//! fixed order and later passes see what earlier ones did, so the order is
//! part of the game rules:
//!
//! 1. tutorial stage gates
//! 2. player death
//! 3. player input and movement
//! 4. enemies (destruction, possession, collisions, AI, bullet hits)
//! 5. bullets (movement, expiry, hits on the player)
//! 6. items
//! 7. explosions (the player's death explosion ending resets the run)
//! 8. enemy spawning
//! 9. difficulty ratchet
//! 10. compaction
//!
//! Entities removed mid-tick only have their slot emptied; indices stay
//! valid until the compaction pass at the very end.

use glam::Vec2;
use rand::Rng;

use super::ai;
use super::collision::resolve_body_collision;
use super::craft::Craft;
use super::explosion::Explosion;
use super::geometry::random_point;
use super::item::Item;
use super::state::{GameEvent, GameState};

/// Player intents for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
    pub glitch: bool,
    /// Idle/demo mode - AI flies the player's craft
    pub idle_mode: bool,
}

/// Advance the arena by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        if let Some(player) = state.player.craft() {
            let others = state.sightings(player.id);
            input = TickInput {
                idle_mode: true,
                ..ai::autopilot(player, &others)
            };
        }
    }

    advance_tutorial(state);
    check_player_destroyed(state);
    update_player(state, &input);
    update_enemies(state);
    update_bullets(state);
    update_items(state);
    if update_explosions(state) {
        state.reset();
    }
    spawn_enemies(state);
    ratchet_difficulty(state);

    state.enemies.compact();
    state.bullets.compact();
    state.items.compact();
    state.explosions.compact();
}

fn advance_tutorial(state: &mut GameState) {
    if let Some(stage) = state.tutorial.advance() {
        state.announce_tutorial_stage(stage);
    }
}

fn check_player_destroyed(state: &mut GameState) {
    if !state.player.craft().is_some_and(Craft::is_destroyed) {
        return;
    }
    let Some(craft) = state.player.vacate() else {
        return;
    };

    log::info!("Player craft {:?} destroyed", craft.id);
    state.explosions.push(Explosion::player_death(
        craft.pos,
        craft.look.body.color,
        state.tuning.explosion_max_size,
    ));
    state.push_event(GameEvent::PlayerDestroyed { id: craft.id });
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let Some(player) = state.player.craft_mut() else {
        return;
    };

    if input.forward {
        player.move_forward();
    } else if input.backward {
        player.move_backward();
    } else {
        player.coast();
    }
    if input.rotate_right {
        player.rotate_clockwise();
    }
    if input.rotate_left {
        player.rotate_counter_clockwise();
    }
    if input.forward || input.backward || input.rotate_left || input.rotate_right {
        state.tutorial.has_moved = true;
    }

    let bullet = if input.fire { player.fire() } else { None };
    if bullet.is_some() {
        state.tutorial.has_shot = true;
    }

    player.set_glitching(input.glitch);
    if input.glitch {
        state.tutorial.has_glitched = true;
    }

    let before = player.pos;
    player.update();
    player.clamp_to_arena(state.tuning.arena_half_extent);
    state.camera -= player.pos - before;

    if let Some(bullet) = bullet {
        state.bullets.push(bullet);
    }
}

fn update_enemies(state: &mut GameState) {
    for i in 0..state.enemies.slot_count() {
        let Some(mut enemy) = state.enemies.take(i) else {
            continue;
        };

        enemy.update();

        if enemy.is_destroyed() {
            destroy_enemy(state, enemy);
            continue;
        }

        let glitched = state.player.craft().is_some_and(|player| {
            player.glitching
                && enemy.can_be_glitched()
                && player.is_in_glitch_range(&enemy.bounding_circle())
        });
        if glitched {
            possess(state, enemy);
            continue;
        }

        if let Some(player) = state.player.craft_mut() {
            resolve_body_collision(&mut enemy, player, &state.tuning);
        }
        // Pairs with an earlier slot were resolved when that enemy ran
        for (_, other) in state.enemies.iter_indexed_mut().filter(|(j, _)| *j > i) {
            resolve_body_collision(&mut enemy, other, &state.tuning);
        }

        if !enemy.is_tutorial_ship {
            let others = state.sightings(enemy.id);
            let wants_fire = ai::drive_enemy(&mut enemy, &others, &state.tuning, &mut state.rng);
            if wants_fire {
                if let Some(bullet) = enemy.fire() {
                    state.bullets.push(bullet);
                }
            }
        }

        for j in 0..state.bullets.slot_count() {
            let Some(bullet) = state.bullets.get(j) else {
                continue;
            };
            if bullet.source == enemy.id || !enemy.intersects(&bullet.bounding_circle()) {
                continue;
            }
            let (damage, source) = (bullet.damage, bullet.source);
            state.bullets.take(j);
            enemy.damage(damage);
            enemy.last_attacker = Some(source);
        }

        enemy.clamp_to_arena(state.tuning.arena_half_extent);
        state.enemies.restore(i, enemy);
    }
}

/// Score, explode and maybe drop an item for an enemy that just died.
/// Its slot has already been emptied.
fn destroy_enemy(state: &mut GameState, enemy: Craft) {
    let credited = enemy.last_attacker.is_some() && enemy.last_attacker == state.player.id();
    if credited {
        state.kills += 1;
        state.add_score(state.tuning.kill_score);
    }
    log::debug!("Enemy {:?} destroyed (credited: {})", enemy.id, credited);

    state.explosions.push(Explosion::new(
        enemy.pos,
        enemy.look.body.color,
        state.tuning.explosion_max_size,
    ));
    if state.rng.random::<f32>() < state.tuning.item_drop_chance {
        state.items.push(Item::new(enemy.pos));
    }
    state.push_event(GameEvent::EnemyDestroyed {
        id: enemy.id,
        credited,
    });
}

/// Move the player into `enemy`. The enemy takes the old craft's place and
/// the old craft is discarded.
fn possess(state: &mut GameState, mut enemy: Craft) {
    let Some(old) = state.player.vacate() else {
        return;
    };

    state.explosions.push(Explosion::new(
        enemy.pos,
        enemy.look.body.color,
        state.tuning.explosion_max_size,
    ));

    enemy.pos = old.pos;
    enemy.restore_health();
    enemy.is_tutorial_ship = false;
    enemy.target = None;
    enemy.set_glitching(false);
    enemy.coast();

    let (from, to) = (old.id, enemy.id);
    log::info!("Glitched from {:?} into {:?}", from, to);
    state.player.take_control(enemy);
    state.recenter_camera();
    state.add_score(state.tuning.possession_score);
    state.tutorial.has_possessed = true;
    state.push_event(GameEvent::Possessed { from, to });
}

fn update_bullets(state: &mut GameState) {
    for j in 0..state.bullets.slot_count() {
        let Some(bullet) = state.bullets.get_mut(j) else {
            continue;
        };
        bullet.update();
        if bullet.is_expired() {
            state.bullets.take(j);
            continue;
        }

        let hit = match state.player.craft_mut() {
            Some(player)
                if bullet.source != player.id && player.intersects(&bullet.bounding_circle()) =>
            {
                player.damage(bullet.damage);
                player.last_attacker = Some(bullet.source);
                true
            }
            _ => false,
        };
        if hit {
            state.bullets.take(j);
        }
    }
}

fn update_items(state: &mut GameState) {
    for j in 0..state.items.slot_count() {
        let Some(item) = state.items.get_mut(j) else {
            continue;
        };
        item.update();

        let collected = state.player.craft().is_some_and(|p| item.is_collected_by(p));
        if !collected {
            continue;
        }
        state.items.take(j);
        if let Some(player) = state.player.craft_mut() {
            player.heal(state.tuning.item_heal);
        }
        state.add_score(state.tuning.item_score);
        state.push_event(GameEvent::ItemCollected);
    }
}

/// Returns true if the player's death explosion just finished
fn update_explosions(state: &mut GameState) -> bool {
    let mut player_gone = false;
    for j in 0..state.explosions.slot_count() {
        let Some(explosion) = state.explosions.get_mut(j) else {
            continue;
        };
        explosion.advance();
        if explosion.is_finished() {
            player_gone |= explosion.is_player_explosion;
            state.explosions.take(j);
        }
    }
    player_gone
}

fn spawn_enemies(state: &mut GameState) {
    if state.tutorial.is_active() {
        return;
    }
    if state.enemies.live_count() as u32 >= state.enemy_cap {
        return;
    }
    let pos = random_point(&mut state.rng, Vec2::ZERO, state.tuning.arena_half_extent / 2.0);
    state.spawn_enemy(pos);
}

fn ratchet_difficulty(state: &mut GameState) {
    if state.kills > state.enemy_cap {
        state.enemy_cap += 1;
        log::info!("Enemy cap raised to {}", state.enemy_cap);
    }
}
