//! End-to-end runs through the public API

use glam::Vec2;
use glitch_arena::highscores::HighScore;
use glitch_arena::persistence::{FileStore, MemoryStore};
use glitch_arena::renderer::DrawList;
use glitch_arena::sim::{GameEvent, GameState, TickInput, TutorialStage, tick};
use glitch_arena::{Session, Tuning};

fn idle_mode() -> TickInput {
    TickInput {
        idle_mode: true,
        ..TickInput::default()
    }
}

#[test]
fn autopilot_session_keeps_frames_consistent() {
    let mut session = Session::new(2024, Tuning::without_tutorial(), Box::new(MemoryStore::new()));
    let mut frame = DrawList::new();
    let mut best_seen = 0;

    for _ in 0..5000 {
        for event in session.step(&idle_mode()) {
            if let GameEvent::HighScore(score) = event {
                best_seen = best_seen.max(score);
            }
        }

        let state = session.state();
        assert!(state.enemies.is_compact());
        assert!(state.bullets.is_compact());
        assert!(state.items.is_compact());
        assert!(state.explosions.is_compact());
        assert!(state.score <= state.high_score);

        frame.reset();
        session.render(&mut frame);
        assert!(frame.is_balanced());
    }

    assert_eq!(session.high_score(), best_seen);
}

#[test]
fn high_score_survives_reopening_the_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path);
    HighScore::new(5).save(&mut store).expect("seed store");

    let best = {
        let mut session = Session::new(7, Tuning::without_tutorial(), Box::new(store));
        assert_eq!(session.high_score(), 5);
        for _ in 0..4000 {
            session.step(&idle_mode());
        }
        session.high_score()
    };
    assert!(best >= 5);

    let reopened = FileStore::open(&path);
    assert_eq!(HighScore::load(&reopened).best, best);

    let session = Session::new(8, Tuning::without_tutorial(), Box::new(reopened));
    assert_eq!(session.state().high_score, best);
}

#[test]
fn tutorial_walkthrough() {
    let mut state = GameState::new(31, Tuning::default());
    let mut stages = Vec::new();
    let run = |state: &mut GameState, input: TickInput, stages: &mut Vec<TutorialStage>| {
        tick(state, &input);
        for event in state.drain_events() {
            if let GameEvent::TutorialStage { stage, .. } = event {
                stages.push(stage);
            }
        }
    };
    let press = |f: fn(&mut TickInput)| {
        let mut input = TickInput::default();
        f(&mut input);
        input
    };

    // The opening stage is announced on construction
    assert!(state.events().iter().any(|e| matches!(
        e,
        GameEvent::TutorialStage {
            stage: TutorialStage::Move,
            ..
        }
    )));
    state.drain_events();

    run(&mut state, press(|i| i.forward = true), &mut stages);
    run(&mut state, TickInput::default(), &mut stages);
    run(&mut state, press(|i| i.fire = true), &mut stages);
    run(&mut state, TickInput::default(), &mut stages);
    run(&mut state, press(|i| i.glitch = true), &mut stages);
    run(&mut state, TickInput::default(), &mut stages);
    assert_eq!(
        stages,
        vec![TutorialStage::Shoot, TutorialStage::Glitch, TutorialStage::Possess]
    );
    assert_eq!(state.enemies.live_count(), 1);

    // Drop the practice shot so it cannot hit the new hull, then weaken the
    // target ship and park it inside glitch reach
    state.bullets.clear();
    let player_pos = state.player.craft().map(|p| p.pos).unwrap_or(Vec2::ZERO);
    let ship = state
        .enemies
        .iter_mut()
        .find(|c| c.is_tutorial_ship)
        .expect("tutorial ship");
    let ship_id = ship.id;
    ship.health = 1.0;
    ship.pos = player_pos + Vec2::new(0.0, -50.0);

    run(&mut state, press(|i| i.glitch = true), &mut stages);
    let player = state.player.craft().expect("player");
    assert_eq!(player.id, ship_id);
    assert!(!player.is_tutorial_ship);
    assert_eq!(player.health, player.max_health);

    run(&mut state, TickInput::default(), &mut stages);
    assert_eq!(stages.last(), Some(&TutorialStage::Complete));
    assert!(!state.tutorial.is_active());
    // Regular spawning takes over once the tutorial is done
    assert_eq!(state.enemies.live_count(), 1);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut state = GameState::new(seed, Tuning::without_tutorial());
        let mut log = Vec::new();
        for _ in 0..1500 {
            tick(&mut state, &idle_mode());
            log.extend(state.drain_events());
        }
        (state.score, state.kills, log)
    };
    assert_eq!(run(5), run(5));
}
