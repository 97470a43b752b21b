//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes to `TickInput`)
//! - Storage (LocalStorage on web, files natively)
//! - The draw surface (2D canvas on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::InputState;
