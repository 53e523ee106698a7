//! Simulation entity types
//!
//! Plain data only; the session owns every instance.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::FieldGeometry;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Countdown and frame loop active
    Running,
    /// Time ran out; stays here until the next start
    Ended,
}

/// Heart palette. Purely visual, picked uniformly at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeartStyle {
    Pink,
    Lavender,
    Mint,
    Peach,
    Sky,
}

impl HeartStyle {
    pub const ALL: [HeartStyle; 5] = [
        HeartStyle::Pink,
        HeartStyle::Lavender,
        HeartStyle::Mint,
        HeartStyle::Peach,
        HeartStyle::Sky,
    ];

    /// Uniform pick from the palette
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeartStyle::Pink => "pink",
            HeartStyle::Lavender => "lavender",
            HeartStyle::Mint => "mint",
            HeartStyle::Peach => "peach",
            HeartStyle::Sky => "sky",
        }
    }
}

/// The player's paddle. Only x moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Left edge
    pub x: f32,
    /// Horizontal speed for intent-driven movement (units/s)
    pub speed: f32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self { x: 0.0, speed }
    }

    /// Move to the field's horizontal center
    pub fn center(&mut self, geometry: &FieldGeometry) {
        self.x = geometry.centered_player_x();
    }
}

/// A falling heart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Top-left corner; x is fixed for the heart's lifetime
    pub pos: Vec2,
    /// Edge length of the (square) bounding box
    pub size: f32,
    /// Fall speed (units/s)
    pub fall_speed: f32,
    pub style: HeartStyle,
}

impl FallingObject {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }
}

/// Things that happened during a frame, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Spawned { id: u32 },
    /// A heart was caught; `at` is where the sparkle burst goes
    Caught { id: u32, at: Vec2 },
    /// A heart left the field without being caught
    Missed { id: u32 },
    Started,
    Ended { final_score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_palette_is_covered() {
        let mut rng = Pcg32::seed_from_u64(7);
        let seen: HashSet<_> = (0..500).map(|_| HeartStyle::random(&mut rng)).collect();
        assert_eq!(seen.len(), HeartStyle::ALL.len());
    }

    #[test]
    fn test_object_edges() {
        let obj = FallingObject {
            id: 1,
            pos: Vec2::new(102.0, 500.0),
            size: 36.0,
            fall_speed: 150.0,
            style: HeartStyle::Mint,
        };
        assert_eq!(obj.center_x(), 120.0);
        assert_eq!(obj.bottom(), 536.0);
    }

    #[test]
    fn test_player_center() {
        let geo = FieldGeometry {
            field_width: 300.0,
            player_width: 100.0,
            ..Default::default()
        };
        let mut player = Player::new(380.0);
        player.center(&geo);
        assert_eq!(player.x, 100.0);
    }
}
