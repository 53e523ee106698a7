//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Timestamps come from the caller, never a wall clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod physics;
pub mod session;
pub mod spawner;
pub mod state;
pub mod timer;

pub use collision::{FrameOutcome, PlayerRect, is_caught, is_out_of_bounds, resolve_objects};
pub use geometry::FieldGeometry;
pub use physics::{MovementIntent, advance_object, frame_delta, move_player, place_player};
pub use session::Session;
pub use spawner::{SpawnParams, Spawner};
pub use state::{FallingObject, HeartStyle, Player, SessionPhase, SimEvent};
pub use timer::{FrameRequest, IntervalTimer, TimerHandle};
