//! Game tuning
//!
//! Every gameplay number lives here so a session can be reconfigured from a
//! JSON file without recompiling. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::FieldGeometry;

/// Session and spawn tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Countdown length (whole seconds)
    pub duration_secs: u32,
    /// Paddle speed for held-direction movement (units/s)
    pub player_speed: f32,
    /// Heart spawn height (negative = above the field)
    pub spawn_y: f32,
    /// Distance below the field at which hearts are dropped
    pub despawn_margin: f32,

    // === Spawn ramp ===
    pub initial_spawn_interval_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Turn spawning off entirely (scripted scenarios, testing)
    pub spawn_enabled: bool,

    /// RNG seed for spawn positions, speeds and palette
    pub seed: u64,
    /// Initial field geometry
    pub field: FieldGeometry,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: SESSION_SECS,
            player_speed: PLAYER_SPEED,
            spawn_y: SPAWN_Y,
            despawn_margin: DESPAWN_MARGIN,

            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            min_fall_speed: MIN_FALL_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            spawn_enabled: true,

            seed: 0,
            field: FieldGeometry::default(),
        }
    }
}

impl GameConfig {
    /// Parse from JSON. Values are taken as-is; see [`GameConfig::sanitized`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults if it can't be read or parsed
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read config {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid config {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Repair values that would break session invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.duration_secs == 0 {
            log::warn!("duration_secs must be positive, using {}", defaults.duration_secs);
            self.duration_secs = defaults.duration_secs;
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            log::warn!("player_speed {} invalid, using {}", self.player_speed, defaults.player_speed);
            self.player_speed = defaults.player_speed;
        }
        if !(self.min_spawn_interval_ms.is_finite() && self.min_spawn_interval_ms > 0.0) {
            log::warn!("min_spawn_interval_ms invalid, using {}", defaults.min_spawn_interval_ms);
            self.min_spawn_interval_ms = defaults.min_spawn_interval_ms;
        }
        if self.initial_spawn_interval_ms.is_nan()
            || self.initial_spawn_interval_ms < self.min_spawn_interval_ms
        {
            log::warn!(
                "initial_spawn_interval_ms {} below floor {}, clamping",
                self.initial_spawn_interval_ms,
                self.min_spawn_interval_ms
            );
            self.initial_spawn_interval_ms = self.min_spawn_interval_ms;
        }
        if !(self.spawn_interval_step_ms.is_finite() && self.spawn_interval_step_ms >= 0.0) {
            self.spawn_interval_step_ms = 0.0;
        }
        if !(is_positive(self.min_fall_speed) && is_positive(self.max_fall_speed)) {
            log::warn!(
                "fall speeds {}..{} must be positive, using {}..{}",
                self.min_fall_speed,
                self.max_fall_speed,
                defaults.min_fall_speed,
                defaults.max_fall_speed
            );
            self.min_fall_speed = defaults.min_fall_speed;
            self.max_fall_speed = defaults.max_fall_speed;
        }
        if self.max_fall_speed < self.min_fall_speed {
            log::warn!("fall speed range inverted, swapping");
            std::mem::swap(&mut self.min_fall_speed, &mut self.max_fall_speed);
        }
        if !(self.spawn_y.is_finite() && self.despawn_margin.is_finite()) {
            log::warn!("spawn_y/despawn_margin must be finite, using defaults");
            self.spawn_y = defaults.spawn_y;
            self.despawn_margin = defaults.despawn_margin;
        }

        self.field = sanitize_field(self.field, defaults.field);
        self
    }
}

#[inline]
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Dimensions must be finite and positive; the bottom offset may be zero
fn sanitize_field(mut field: FieldGeometry, defaults: FieldGeometry) -> FieldGeometry {
    let dims = [
        (&mut field.field_width, defaults.field_width, "field_width"),
        (&mut field.field_height, defaults.field_height, "field_height"),
        (&mut field.player_width, defaults.player_width, "player_width"),
        (&mut field.player_height, defaults.player_height, "player_height"),
        (&mut field.object_size, defaults.object_size, "object_size"),
    ];
    for (value, fallback, name) in dims {
        if !is_positive(*value) {
            log::warn!("{} {} invalid, using {}", name, value, fallback);
            *value = fallback;
        }
    }
    if !(field.player_bottom_offset.is_finite() && field.player_bottom_offset >= 0.0) {
        log::warn!(
            "player_bottom_offset {} invalid, using {}",
            field.player_bottom_offset,
            defaults.player_bottom_offset
        );
        field.player_bottom_offset = defaults.player_bottom_offset;
    }
    field
}
