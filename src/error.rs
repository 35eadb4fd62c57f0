//! Error types for tuning validation and the browser shell.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Problems with a [`crate::config::Tuning`] value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `min..max` pair where `min > max`.
    #[error("{field}: min {min} exceeds max {max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// A size or speed that has to be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// A quantity where zero is fine but a negative value is not.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    /// A probability outside `[0, 1]` (also used for the summed decoration chances).
    #[error("{field} must lie in [0, 1], got {value}")]
    Chance { field: &'static str, value: f64 },
    #[error("camera smoothing must lie in (0, 1], got {0}")]
    Smoothing(f64),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[cfg(feature = "serde_json")]
    #[error("tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while wiring the game into the page.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("canvas 2d context unavailable")]
    NoContext,
    /// A DOM call rejected with a JS exception; the message is stringified.
    #[error("dom: {0}")]
    Dom(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
