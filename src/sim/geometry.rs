//! Play field geometry
//!
//! The presentation layer owns the real dimensions (they change on resize);
//! the simulation only ever sees this plain value.

use serde::{Deserialize, Serialize};

use crate::clamp_range;
use crate::consts::*;

/// Field and entity dimensions supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGeometry {
    pub field_width: f32,
    pub field_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the paddle's bottom edge and the field's bottom edge
    pub player_bottom_offset: f32,
    pub object_size: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            object_size: OBJECT_SIZE,
        }
    }
}

impl FieldGeometry {
    /// Rightmost legal paddle position (never negative)
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        (self.field_width - self.player_width).max(0.0)
    }

    /// Clamp a paddle x into `[0, field_width - player_width]`
    #[inline]
    pub fn clamp_player_x(&self, x: f32) -> f32 {
        clamp_range(x, 0.0, self.max_player_x())
    }

    /// Paddle x that centers it in the field
    #[inline]
    pub fn centered_player_x(&self) -> f32 {
        self.max_player_x() / 2.0
    }

    /// Y of the paddle's top edge
    #[inline]
    pub fn player_top(&self) -> f32 {
        self.field_height - self.player_height - self.player_bottom_offset
    }

    /// Rightmost spawn x for a heart
    #[inline]
    pub fn max_object_x(&self) -> f32 {
        (self.field_width - self.object_size).max(0.0)
    }

    /// A heart whose y exceeds this is fully off-screen
    #[inline]
    pub fn despawn_y(&self, margin: f32) -> f32 {
        self.field_height + margin
    }
}
