//! Gameplay tuning.
//!
//! `Tuning::default()` is the fire-escape variant: hold-to-rise thrust jump,
//! water-cans scattered on platforms, and a fire wall chasing from the left.
//! Other variants are expressed as presets over the same knobs rather than as
//! separate code paths.
//!
//! With the `serde` feature every struct (de)serializes with per-field
//! defaults, so a JSON override only needs the values it changes.

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the jump input turns into vertical velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum JumpModel {
    /// While held, upward acceleration is applied each frame down to
    /// `min_jump_velocity`; works in the air too.
    Thrust,
    /// A single upward kick of `velocity` when pressed while grounded.
    Impulse { velocity: f64 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub jump_acceleration: f64,
    pub min_jump_velocity: f64,
    pub move_speed: f64,
    /// Multiplier on `move_speed` while airborne.
    pub air_control: f64,
    /// Horizontal velocity multiplier per frame with no direction held.
    pub friction: f64,
    pub terminal_velocity: f64,
    pub jump: JumpModel,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.35,
            jump_acceleration: -1.05,
            min_jump_velocity: -8.4,
            move_speed: 8.4,
            air_control: 0.99,
            friction: 0.92,
            terminal_velocity: 8.4,
            jump: JumpModel::Thrust,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    /// Spawn x as a fraction of the viewport width.
    pub spawn_x_ratio: f64,
    /// Spawn y measured up from the bottom of the world.
    pub spawn_height: f64,
    pub run_frame_count: u32,
    /// Ticks per animation frame.
    pub frame_delay: u32,
    /// Minimum |vx| for a grounded player to count as running.
    pub run_threshold: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 40.0,
            spawn_x_ratio: 0.5,
            spawn_height: 300.0,
            run_frame_count: 4,
            frame_delay: 8,
            run_threshold: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    pub vertical_deadzone: f64,
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { vertical_deadzone: 150.0, smoothing: 0.15 }
    }
}

/// Platform streaming. Distances ending in `_screens` are multiples of the
/// viewport width so the world scales with the window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub generation_distance_screens: f64,
    pub cleanup_distance_screens: f64,
    pub ground_width_screens: f64,
    pub min_platform_spacing: f64,
    pub max_platform_spacing: f64,
    pub min_platform_width: f64,
    pub max_platform_width: f64,
    pub platform_height: f64,
    pub ground_height: f64,
    pub min_platform_y: f64,
    /// Lowest generated platform sits this far above the ground line.
    pub ground_clearance: f64,
    pub starter_platform_width: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            generation_distance_screens: 3.0,
            cleanup_distance_screens: 6.0,
            ground_width_screens: 3.0,
            min_platform_spacing: 150.0,
            max_platform_spacing: 300.0,
            min_platform_width: 150.0,
            max_platform_width: 280.0,
            platform_height: 20.0,
            ground_height: 40.0,
            min_platform_y: 100.0,
            ground_clearance: 80.0,
            starter_platform_width: 200.0,
        }
    }
}

/// At most one decoration per platform. The chances are checked in order
/// water-can, coin, emoji against a single roll, so they must sum to <= 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecorationConfig {
    pub water_can_chance: f64,
    pub coin_chance: f64,
    pub emoji_chance: f64,
    pub size: f64,
    pub water_can_score: u64,
    pub coin_value: u64,
    pub emoji_value: u64,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            water_can_chance: 0.4,
            coin_chance: 0.0,
            emoji_chance: 0.0,
            size: 25.0,
            water_can_score: 10,
            coin_value: 5,
            emoji_value: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireConfig {
    pub enabled: bool,
    pub width: f64,
    pub base_speed: f64,
    pub max_speed: f64,
    /// Speed gained per 16ms frame.
    pub acceleration: f64,
    /// Distance reported before the first fire update.
    pub start_distance: f64,
    pub particle_count: usize,
    pub min_particle_size: f64,
    pub max_particle_size: f64,
    pub min_particle_speed: f64,
    pub max_particle_speed: f64,
    pub particle_interval_ms: f64,
    /// Reference frame length for acceleration scaling.
    pub frame_ms: f64,
    /// Cap on a single step's elapsed frames (tab switches, debugger pauses).
    pub max_delta_frames: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 250.0,
            base_speed: 2.0,
            max_speed: 6.0,
            acceleration: 0.005,
            start_distance: 300.0,
            particle_count: 75,
            min_particle_size: 10.0,
            max_particle_size: 35.0,
            min_particle_speed: 1.5,
            max_particle_speed: 4.0,
            particle_interval_ms: 16.0,
            frame_ms: 16.0,
            max_delta_frames: 4.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub world: WorldConfig,
    pub decorations: DecorationConfig,
    pub fire: FireConfig,
}

pub const PRESET_NAMES: &[&str] = &["fire-escape", "coin-run"];

impl Tuning {
    /// Look up a named variant.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "fire-escape" => Ok(Self::default()),
            "coin-run" => Ok(Self::coin_run()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Classic platformer feel: heavier gravity, grounded impulse jump, coins
    /// and emoji to collect, and nothing chasing you.
    pub fn coin_run() -> Self {
        let mut t = Self::default();
        t.physics.gravity = 0.5;
        t.physics.terminal_velocity = 12.0;
        t.physics.jump = JumpModel::Impulse { velocity: 13.0 };
        t.decorations.water_can_chance = 0.0;
        t.decorations.coin_chance = 0.5;
        t.decorations.emoji_chance = 0.2;
        t.fire.enabled = false;
        t
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let t: Tuning = serde_json::from_str(json)?;
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        positive("physics.move_speed", p.move_speed)?;
        positive("physics.terminal_velocity", p.terminal_velocity)?;
        non_negative("physics.gravity", p.gravity)?;
        chance("physics.friction", p.friction)?;
        chance("physics.air_control", p.air_control)?;
        if let JumpModel::Impulse { velocity } = p.jump {
            positive("physics.jump.velocity", velocity)?;
        }

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        if self.player.run_frame_count == 0 {
            return Err(ConfigError::NonPositive { field: "player.run_frame_count", value: 0.0 });
        }

        let c = &self.camera;
        if !(c.smoothing > 0.0 && c.smoothing <= 1.0) {
            return Err(ConfigError::Smoothing(c.smoothing));
        }

        let w = &self.world;
        range("world.platform_spacing", w.min_platform_spacing, w.max_platform_spacing)?;
        range("world.platform_width", w.min_platform_width, w.max_platform_width)?;
        positive("world.min_platform_width", w.min_platform_width)?;
        positive("world.platform_height", w.platform_height)?;
        positive("world.ground_height", w.ground_height)?;
        positive("world.generation_distance_screens", w.generation_distance_screens)?;
        positive("world.ground_width_screens", w.ground_width_screens)?;
        positive("world.cleanup_distance_screens", w.cleanup_distance_screens)?;

        let d = &self.decorations;
        chance("decorations.water_can_chance", d.water_can_chance)?;
        chance("decorations.coin_chance", d.coin_chance)?;
        chance("decorations.emoji_chance", d.emoji_chance)?;
        chance("decorations.total_chance", d.water_can_chance + d.coin_chance + d.emoji_chance)?;
        positive("decorations.size", d.size)?;

        let f = &self.fire;
        if f.enabled {
            positive("fire.width", f.width)?;
            range("fire.speed", f.base_speed, f.max_speed)?;
            range("fire.particle_size", f.min_particle_size, f.max_particle_size)?;
            range("fire.particle_speed", f.min_particle_speed, f.max_particle_speed)?;
            positive("fire.frame_ms", f.frame_ms)?;
            positive("fire.max_delta_frames", f.max_delta_frames)?;
            non_negative("fire.particle_interval_ms", f.particle_interval_ms)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 { Ok(()) } else { Err(ConfigError::NonPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

fn chance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(ConfigError::Chance { field, value }) }
}

fn range(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max { Ok(()) } else { Err(ConfigError::InvalidRange { field, min, max }) }
}
