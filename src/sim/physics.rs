//! Paddle and heart movement
//!
//! Constant-velocity only: the paddle slides at a fixed speed while a
//! direction is held, hearts fall at their own fixed speed.

use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::state::{FallingObject, Player};

/// Held-direction input for the paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.left && !self.right
    }
}

/// Seconds elapsed since the previous frame.
///
/// The first frame of a session has no predecessor and yields zero, as do
/// timestamps that go backwards or are not finite.
pub fn frame_delta(last_frame_ms: Option<f64>, now_ms: f64) -> f32 {
    let Some(last) = last_frame_ms else {
        return 0.0;
    };
    let delta_ms = now_ms - last;
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return 0.0;
    }
    (delta_ms / 1000.0) as f32
}

/// Apply held-direction movement for `dt` seconds, then clamp to the field
pub fn move_player(player: &mut Player, intent: MovementIntent, dt: f32, geometry: &FieldGeometry) {
    if intent.is_idle() {
        return;
    }
    let distance = player.speed * dt.max(0.0);
    if intent.left {
        player.x -= distance;
    }
    if intent.right {
        player.x += distance;
    }
    player.x = geometry.clamp_player_x(player.x);
}

/// Put the paddle directly at `x` (pointer control), clamped to the field
pub fn place_player(player: &mut Player, x: f32, geometry: &FieldGeometry) {
    player.x = geometry.clamp_player_x(x);
}

/// Let a heart fall for `dt` seconds
#[inline]
pub fn advance_object(object: &mut FallingObject, dt: f32) {
    object.pos.y += object.fall_speed * dt.max(0.0);
}
