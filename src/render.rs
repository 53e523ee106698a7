//! Presentation boundary
//!
//! The simulation never draws. Each frame the game loop captures a plain
//! [`Snapshot`] and hands it to a [`Renderer`], along with any sparkle bursts
//! from catches and the final score when the session ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SPARKLE_LIFETIME_MS;
use crate::sim::{HeartStyle, Session, SessionPhase};

/// A heart as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub style: HeartStyle,
}

/// Read-only view of a session for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u32,
    pub time_left: u32,
    pub player_x: f32,
    pub player_top: f32,
    pub hearts: Vec<HeartView>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            phase: session.phase,
            score: session.score,
            time_left: session.time_left,
            player_x: session.player.x,
            player_top: session.geometry().player_top(),
            hearts: session
                .objects
                .iter()
                .map(|o| HeartView {
                    id: o.id,
                    pos: o.pos,
                    size: o.size,
                    style: o.style,
                })
                .collect(),
        }
    }
}

/// Transient catch effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    /// Burst origin (paddle top-center at the moment of the catch)
    pub pos: Vec2,
    /// When the catch happened (ms)
    pub born_ms: f64,
}

impl Sparkle {
    pub fn new(pos: Vec2, born_ms: f64) -> Self {
        Self { pos, born_ms }
    }

    /// Whether the effect should still be on screen at `now_ms`
    pub fn is_alive(&self, now_ms: f64) -> bool {
        now_ms - self.born_ms < SPARKLE_LIFETIME_MS
    }
}

/// Whatever turns simulation state into pixels (or text, or nothing)
pub trait Renderer {
    /// Called once per frame after the simulation step
    fn render(&mut self, snapshot: &Snapshot);

    /// A heart was caught
    fn catch_effect(&mut self, _sparkle: Sparkle) {}

    /// The countdown ran out
    fn session_ended(&mut self, _final_score: u32) {}
}

/// Draws nothing. For headless runs and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

/// Logs a one-line summary whenever the countdown display changes
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_time_left: Option<u32>,
    sparkles: Vec<Sparkle>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sparkles still alive at `now_ms`; expired ones are dropped
    pub fn live_sparkles(&mut self, now_ms: f64) -> &[Sparkle] {
        self.sparkles.retain(|s| s.is_alive(now_ms));
        &self.sparkles
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        if self.last_time_left == Some(snapshot.time_left) {
            return;
        }
        self.last_time_left = Some(snapshot.time_left);
        log::info!(
            "[{:?}] {:>2}s left | score {:>3} | paddle x={:.0} | {} hearts falling",
            snapshot.phase,
            snapshot.time_left,
            snapshot.score,
            snapshot.player_x,
            snapshot.hearts.len()
        );
    }

    fn catch_effect(&mut self, sparkle: Sparkle) {
        log::debug!("Sparkle at ({:.0}, {:.0})", sparkle.pos.x, sparkle.pos.y);
        self.sparkles.push(sparkle);
    }

    fn session_ended(&mut self, final_score: u32) {
        log::info!("You're so sweet! Final score: {}", final_score);
    }
}
