//! Arena state and core simulation types
//!
//! The arena owns every entity. The player's craft lives in its own slot,
//! separate from the enemy collection, and changes hands only through
//! `PlayerSlot` transitions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ai::Sighting;
use super::craft::{Craft, CraftId};
use super::explosion::Explosion;
use super::factory;
use super::item::Item;
use super::projectile::Projectile;
use super::slots::Slots;
use super::tutorial::{TutorialProgress, TutorialStage};
use crate::tuning::Tuning;

/// Undrained events kept before the oldest half is dropped
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Who the player is currently flying
#[derive(Debug, Clone, Default)]
pub enum PlayerSlot {
    /// Player craft destroyed; waiting for the death explosion to finish
    #[default]
    Absent,
    Controlled(Craft),
}

impl PlayerSlot {
    pub fn craft(&self) -> Option<&Craft> {
        match self {
            PlayerSlot::Controlled(craft) => Some(craft),
            PlayerSlot::Absent => None,
        }
    }

    pub fn craft_mut(&mut self) -> Option<&mut Craft> {
        match self {
            PlayerSlot::Controlled(craft) => Some(craft),
            PlayerSlot::Absent => None,
        }
    }

    pub fn id(&self) -> Option<CraftId> {
        self.craft().map(|c| c.id)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, PlayerSlot::Absent)
    }

    /// Empty the slot, returning the craft that was in it
    pub fn vacate(&mut self) -> Option<Craft> {
        match std::mem::take(self) {
            PlayerSlot::Controlled(craft) => Some(craft),
            PlayerSlot::Absent => None,
        }
    }

    /// Hand control to `craft`, returning the previous craft
    pub fn take_control(&mut self, craft: Craft) -> Option<Craft> {
        match std::mem::replace(self, PlayerSlot::Controlled(craft)) {
            PlayerSlot::Controlled(previous) => Some(previous),
            PlayerSlot::Absent => None,
        }
    }
}

/// Notifications for the host (HUD, tutorial text, persistence)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A tutorial stage began
    TutorialStage { stage: TutorialStage, text: &'static str },
    EnemySpawned { id: CraftId },
    /// An enemy was destroyed; `credited` if the player scored it
    EnemyDestroyed { id: CraftId, credited: bool },
    /// The player glitched from one craft into another
    Possessed { from: CraftId, to: CraftId },
    PlayerDestroyed { id: CraftId },
    ItemCollected,
    /// The run restarted after the player's death
    Reset,
    /// Score passed the previous best
    HighScore(u64),
}

/// Complete arena state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: PlayerSlot,
    pub enemies: Slots<Craft>,
    pub bullets: Slots<Projectile>,
    pub items: Slots<Item>,
    pub explosions: Slots<Explosion>,
    /// Map-center translation that keeps the player at the focal point
    pub camera: Vec2,
    pub score: u64,
    pub high_score: u64,
    /// Enemies destroyed by the player this run
    pub kills: u32,
    /// Most live enemies allowed at once
    pub enemy_cap: u32,
    pub tutorial: TutorialProgress,
    /// Hosts drain this once per tick; it is capped at `MAX_PENDING_EVENTS`
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            enemy_cap: tuning.starting_enemy_cap,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            player: PlayerSlot::Absent,
            enemies: Slots::new(),
            bullets: Slots::new(),
            items: Slots::new(),
            explosions: Slots::new(),
            camera: Vec2::ZERO,
            score: 0,
            high_score: 0,
            kills: 0,
            tutorial: TutorialProgress::inactive(),
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_player();
        if state.tuning.tutorial {
            state.start_tutorial();
        }

        state
    }

    /// Seed the best score carried over from earlier sessions
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Allocate a new craft ID
    pub fn next_craft_id(&mut self) -> CraftId {
        let id = CraftId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Put a freshly generated craft at the origin under player control
    pub fn spawn_player(&mut self) -> CraftId {
        let id = self.next_craft_id();
        let config = factory::generate(&mut self.rng, Vec2::ZERO);
        self.player.take_control(Craft::new(id, config, &self.tuning));
        self.recenter_camera();
        id
    }

    /// Generate a random enemy at `pos`
    pub fn spawn_enemy(&mut self, pos: Vec2) -> CraftId {
        let id = self.next_craft_id();
        let config = factory::generate(&mut self.rng, pos);
        self.enemies.push(Craft::new(id, config, &self.tuning));
        log::debug!("Spawned enemy {:?} at ({:.0}, {:.0})", id, pos.x, pos.y);
        self.push_event(GameEvent::EnemySpawned { id });
        id
    }

    fn start_tutorial(&mut self) {
        self.tutorial = TutorialProgress::start();

        let id = self.next_craft_id();
        let config = factory::generate(&mut self.rng, self.tuning.tutorial_ship_offset);
        let mut ship = Craft::new(id, config, &self.tuning);
        ship.is_tutorial_ship = true;
        self.enemies.push(ship);

        self.announce_tutorial_stage(TutorialStage::Move);
    }

    pub(crate) fn announce_tutorial_stage(&mut self, stage: TutorialStage) {
        log::info!("Tutorial stage {}: {}", stage.index(), stage.text());
        self.push_event(GameEvent::TutorialStage {
            stage,
            text: stage.text(),
        });
    }

    /// Put the player back at the focal point of the viewport
    pub fn recenter_camera(&mut self) {
        if let Some(player) = self.player.craft() {
            self.camera = self.tuning.focal_point - player.pos;
        }
    }

    /// Add to the score, tracking the best score
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::HighScore(self.score));
        }
    }

    /// Start a fresh run: new player craft, empty arena, starting difficulty
    pub fn reset(&mut self) {
        log::info!("Run over with score {} (best {})", self.score, self.high_score);

        self.enemies.clear();
        self.bullets.clear();
        self.items.clear();
        self.explosions.clear();
        self.score = 0;
        self.kills = 0;
        self.enemy_cap = self.tuning.starting_enemy_cap;
        self.tutorial = TutorialProgress::inactive();
        self.spawn_player();

        self.push_event(GameEvent::Reset);
    }

    /// Snapshot of every live craft except `exclude`, for AI decisions
    pub fn sightings(&self, exclude: CraftId) -> Vec<Sighting> {
        self.player
            .craft()
            .into_iter()
            .chain(self.enemies.iter())
            .filter(|c| c.id != exclude)
            .map(Sighting::of)
            .collect()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let dropped = self.events.len() / 2;
            self.events.drain(..dropped);
            log::debug!("Event queue not drained, dropped {} oldest events", dropped);
        }
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
