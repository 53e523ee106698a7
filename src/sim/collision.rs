//! Catch and out-of-bounds detection
//!
//! The catch test is lenient on purpose: it only asks whether the heart's
//! center is over the paddle and its bottom edge has reached the paddle's top
//! edge. A heart that is already below the paddle still counts while its
//! center is over it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;
use super::physics::advance_object;
use super::state::{FallingObject, Player};

/// The paddle's axis-aligned box for this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayerRect {
    pub fn new(player: &Player, geometry: &FieldGeometry) -> Self {
        Self {
            x: player.x,
            y: geometry.player_top(),
            width: geometry.player_width,
            height: geometry.player_height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Where the sparkle burst is anchored: top edge, horizontally centered
    #[inline]
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y)
    }
}

/// Heart center within the paddle span and heart bottom at or past the paddle top
#[inline]
pub fn is_caught(object: &FallingObject, paddle: &PlayerRect) -> bool {
    let center_x = object.center_x();
    center_x >= paddle.left() && center_x <= paddle.right() && object.bottom() >= paddle.top()
}

/// Heart has dropped past the bottom of the field by more than the margin
#[inline]
pub fn is_out_of_bounds(object: &FallingObject, despawn_y: f32) -> bool {
    object.pos.y > despawn_y
}

/// What happened to the hearts during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// (id, sparkle anchor) for every caught heart
    pub caught: Vec<(u32, Vec2)>,
    /// Ids of hearts that fell out of the field
    pub missed: Vec<u32>,
}

/// Move every heart, then drop the ones that left the field or were caught.
///
/// Each heart is moved and judged exactly once. Out-of-bounds is checked
/// first, so a heart is either missed or caught, never both.
pub fn resolve_objects(
    objects: &mut Vec<FallingObject>,
    paddle: &PlayerRect,
    despawn_y: f32,
    dt: f32,
) -> FrameOutcome {
    let mut outcome = FrameOutcome::default();

    objects.retain_mut(|object| {
        advance_object(object, dt);

        if is_out_of_bounds(object, despawn_y) {
            outcome.missed.push(object.id);
            return false;
        }

        if is_caught(object, paddle) {
            outcome.caught.push((object.id, paddle.top_center()));
            return false;
        }

        true
    });

    outcome
}
