//! Heart Catch - a catch-the-falling-hearts arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, catches, session state)
//! - `game_loop`: Drives the countdown and frame timers from one timestamp stream
//! - `render`: Snapshot handed to whatever draws the game
//! - `input`: Device-agnostic input events mapped onto movement intents
//! - `config`: Data-driven game tuning

pub mod config;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use game_loop::{Autopilot, GameLoop};
pub use render::{LogRenderer, NullRenderer, Renderer, Snapshot, Sparkle};

/// Game configuration constants
pub mod consts {
    /// Session length in whole seconds
    pub const SESSION_SECS: u32 = 30;
    /// Countdown period (ms)
    pub const COUNTDOWN_PERIOD_MS: f64 = 1000.0;

    /// Default play field (units are CSS-pixel-like)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Paddle defaults
    pub const PLAYER_WIDTH: f32 = 96.0;
    pub const PLAYER_HEIGHT: f32 = 28.0;
    /// Gap between the paddle and the bottom of the field
    pub const PLAYER_BOTTOM_OFFSET: f32 = 24.0;
    /// Horizontal speed for keyboard movement (units/s)
    pub const PLAYER_SPEED: f32 = 380.0;

    /// Heart defaults
    pub const OBJECT_SIZE: f32 = 36.0;
    /// Spawn height, just above the visible field
    pub const SPAWN_Y: f32 = -40.0;
    /// How far below the field a heart may fall before it is dropped
    pub const DESPAWN_MARGIN: f32 = 60.0;
    pub const MIN_FALL_SPEED: f32 = 120.0;
    pub const MAX_FALL_SPEED: f32 = 200.0;

    /// Spawn ramp (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 650.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 12.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 380.0;

    /// Lifetime of the sparkle burst shown on a catch (ms)
    pub const SPARKLE_LIFETIME_MS: f64 = 700.0;
}

/// Clamp `value` into `[min, max]`, collapsing to `min` when the range is inverted
#[inline]
pub fn clamp_range(value: f32, min: f32, max: f32) -> f32 {
    if max < min {
        return min;
    }
    value.max(min).min(max)
}
