//! Glitch Arena entry point
//!
//! On the web this boots the canvas game. Natively it runs a headless demo:
//! the autopilot flies the player for a fixed number of ticks, each frame is
//! drawn to a recording surface, and a summary is logged.
//!
//! Native environment:
//! - `GLITCH_TUNING`: path to a JSON tuning file
//! - `GLITCH_STORE`: path to the score store (default `glitch-arena-store.json`)
//! - `GLITCH_TICKS`: ticks to simulate (default 6000, one minute of play)
//! - `GLITCH_SEED`: run seed (default 1)

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    glitch_arena::platform::web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glitch_arena::persistence::FileStore;
    use glitch_arena::renderer::DrawList;
    use glitch_arena::sim::{GameEvent, TickInput};
    use glitch_arena::{Session, Tuning};

    env_logger::init();
    log::info!("Glitch Arena (native) starting...");

    let tuning = match std::env::var("GLITCH_TUNING") {
        Ok(path) => Tuning::load(path),
        Err(_) => Tuning::without_tutorial(),
    };
    let store_path =
        std::env::var("GLITCH_STORE").unwrap_or_else(|_| "glitch-arena-store.json".to_string());
    let ticks = env_number("GLITCH_TICKS", 6000);
    let seed = env_number("GLITCH_SEED", 1);

    let store = FileStore::open(store_path);
    log::info!("Scores stored in {}", store.path().display());
    let mut session = Session::new(seed, tuning, Box::new(store));
    let input = TickInput {
        idle_mode: true,
        ..TickInput::default()
    };

    let mut frame = DrawList::new();
    let (mut possessions, mut kills, mut deaths) = (0u32, 0u32, 0u32);
    for _ in 0..ticks {
        for event in session.step(&input) {
            match event {
                GameEvent::Possessed { .. } => possessions += 1,
                GameEvent::EnemyDestroyed { credited: true, .. } => kills += 1,
                GameEvent::PlayerDestroyed { .. } => deaths += 1,
                _ => {}
            }
        }
        frame.reset();
        session.render(&mut frame);
    }

    let state = session.state();
    log::info!(
        "Ran {} ticks: score {}, best {}, {} kills, {} possessions, {} deaths",
        state.time_ticks,
        state.score,
        session.high_score(),
        kills,
        possessions,
        deaths
    );
    log::info!(
        "Last frame: {} draw calls, {} enemies, {} bullets",
        frame.len(),
        state.enemies.live_count(),
        state.bullets.live_count()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn env_number(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("{}={:?} is not a number, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
