//! Browser host: canvas surface, LocalStorage, keyboard and frame loop

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, Storage};

use super::InputState;
use crate::persistence::{KeyValueStore, StoreError};
use crate::renderer::Surface;
use crate::session::{SIM_DT, Session};
use crate::sim::GameEvent;
use crate::sim::geometry::Color;
use crate::tuning::Tuning;

/// Browser LocalStorage. Private browsing modes may refuse access, in which
/// case reads find nothing and writes fail with `Unavailable`.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, high score will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable)
    }
}

/// `Surface` over a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self {
            context,
            width,
            height,
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.context.begin_path();
        check(
            "arc",
            self.context.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                TAU,
            ),
        );
    }
}

/// Canvas calls only fail on non-finite arguments; the frame still draws
fn check(call: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::debug!("canvas {} failed: {:?}", call, e);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Color) {
        self.context.save();
        check(
            "set_transform",
            self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        );
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
        self.context.restore();
    }

    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        check(
            "translate",
            self.context.translate(offset.x as f64, offset.y as f64),
        );
    }

    fn rotate(&mut self, radians: f32) {
        check("rotate", self.context.rotate(radians as f64));
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle_path(center, radius);
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.circle_path(center, radius);
        self.context.set_line_width(line_width as f64);
        self.context.set_stroke_style_str(&color.to_css());
        self.context.stroke();
    }
}

/// Everything the frame loop needs between callbacks
struct WebGame {
    session: Session,
    input: InputState,
    surface: CanvasSurface,
    document: Document,
    last_time: f64,
}

impl WebGame {
    fn frame(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time;

        let input = self.input.to_tick_input();
        let events = self.session.advance(dt, &input);
        for event in &events {
            self.show_event(event);
        }
        self.update_hud();
        self.session.render(&mut self.surface);
    }

    fn show_event(&self, event: &GameEvent) {
        match event {
            GameEvent::TutorialStage { text, .. } => self.set_text("instructions", text),
            GameEvent::Possessed { .. } => self.set_text("narrative", "Glitched!"),
            GameEvent::Reset => self.set_text("narrative", ""),
            _ => {}
        }
    }

    fn update_hud(&self) {
        let state = self.session.state();
        self.set_text("score", &state.score.to_string());
        self.set_text("high-score", &state.high_score.to_string());
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

/// Boot the game on the page's `#game` canvas
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
    }

    log::info!("Glitch Arena starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("game")
        .ok_or_else(|| JsValue::from_str("no #game canvas"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("#game is not a canvas"))?;
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("unexpected context type"))?;

    let (width, height) = (canvas.width() as f64, canvas.height() as f64);
    let tuning = Tuning {
        focal_point: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
        ..Tuning::default()
    };
    let seed = js_sys::Date::now() as u64;
    let session = Session::new(seed, tuning, Box::new(LocalStorageStore::open()));

    let game = Rc::new(RefCell::new(WebGame {
        session,
        input: InputState::new(),
        surface: CanvasSurface::new(context, width, height),
        document,
        last_time: 0.0,
    }));

    setup_input_handlers(&window, game.clone())?;
    request_animation_frame(game);

    log::info!("Glitch Arena running with seed {}", seed);
    Ok(())
}

fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<WebGame>>) -> Result<(), JsValue> {
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().input.key_down(event.key_code()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().input.key_up(event.key_code()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        // Keys released while unfocused never send keyup
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().input.release_all();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}
