//! Heart spawning and the spawn-rate ramp
//!
//! Each spawn shortens the interval by a fixed step until it hits the floor,
//! which is the only difficulty curve the game has.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::state::{FallingObject, HeartStyle};
use crate::config::GameConfig;

/// Spawn tuning, copied out of the config at session creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    pub initial_interval_ms: f64,
    pub interval_step_ms: f64,
    pub min_interval_ms: f64,
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    pub spawn_y: f32,
}

impl SpawnParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            initial_interval_ms: config.initial_spawn_interval_ms,
            interval_step_ms: config.spawn_interval_step_ms,
            min_interval_ms: config.min_spawn_interval_ms,
            min_fall_speed: config.min_fall_speed,
            max_fall_speed: config.max_fall_speed,
            spawn_y: config.spawn_y,
        }
    }
}

/// Decides when a heart appears and what it looks like
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub params: SpawnParams,
    /// Timestamp of the last spawn (ms)
    pub last_spawn_ms: f64,
    /// Current gap between spawns (ms); non-increasing within a session
    pub interval_ms: f64,
    /// When false, `poll` never produces anything
    pub enabled: bool,
}

impl Spawner {
    pub fn new(params: SpawnParams, enabled: bool) -> Self {
        Self {
            params,
            last_spawn_ms: 0.0,
            interval_ms: params.initial_interval_ms,
            enabled,
        }
    }

    /// Back to the start of the ramp, with a spawn already due at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.interval_ms = self.params.initial_interval_ms;
        self.last_spawn_ms = now_ms - self.interval_ms;
    }

    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        self.enabled && now_ms - self.last_spawn_ms >= self.interval_ms
    }

    /// Spawn at most one heart if the interval has elapsed
    pub fn poll<R: Rng>(
        &mut self,
        now_ms: f64,
        id: u32,
        geometry: &FieldGeometry,
        rng: &mut R,
    ) -> Option<FallingObject> {
        if !self.is_due(now_ms) {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let x = rng.random::<f32>() * geometry.max_object_x();
        let style = HeartStyle::random(rng);
        let speed_span = (self.params.max_fall_speed - self.params.min_fall_speed).max(0.0);
        let fall_speed = self.params.min_fall_speed + rng.random::<f32>() * speed_span;

        self.step_interval();

        Some(FallingObject {
            id,
            pos: Vec2::new(x, self.params.spawn_y),
            size: geometry.object_size,
            fall_speed,
            style,
        })
    }

    /// Shorten the interval by one step, never below the floor
    fn step_interval(&mut self) {
        if self.interval_ms > self.params.min_interval_ms {
            self.interval_ms =
                (self.interval_ms - self.params.interval_step_ms).max(self.params.min_interval_ms);
        }
    }
}
