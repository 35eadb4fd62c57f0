//! Ember Run core crate.
//!
//! An endless side-scrolling platformer: run right across streamed platforms,
//! grab water-cans to beat back the fire wall, or play the fire-free coin-run
//! variant. The simulation (`game` and the modules under it) is plain Rust and
//! runs natively for tests; `app` and `render` bind it to a browser canvas.

use wasm_bindgen::prelude::*;

pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod fire;
pub mod game;
pub mod geom;
pub mod input;
pub mod player;
pub mod world;

mod app;
mod render;

pub use config::{JumpModel, Tuning};
pub use error::{ConfigError, GameError};
pub use game::{Game, GameEvent, Score};
pub use geom::{Rect, Viewport};
pub use input::InputState;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Fire-escape variant with default tuning.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start(Tuning::default())?;
    Ok(())
}

/// Start a named preset (`"fire-escape"`, `"coin-run"`).
#[wasm_bindgen]
pub fn start_game_variant(name: &str) -> Result<(), JsValue> {
    let tuning = Tuning::preset(name).map_err(GameError::from)?;
    app::start(tuning)?;
    Ok(())
}

/// Start with tuning overrides given as JSON; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let tuning = Tuning::from_json(json).map_err(GameError::from)?;
    app::start(tuning)?;
    Ok(())
}

#[wasm_bindgen]
pub fn preset_names() -> String {
    config::PRESET_NAMES.join(",")
}
