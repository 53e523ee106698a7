//! Frame driver
//!
//! One timestamp stream drives both logical timers: the 1 Hz countdown and
//! the per-frame update. Hosts call [`GameLoop::advance`] from their display
//! callback; tests and the headless binary call it with synthetic times.

use crate::config::GameConfig;
use crate::input::{InputEvent, Key, apply_input};
use crate::render::{Renderer, Snapshot, Sparkle};
use crate::sim::{Session, SimEvent};

/// Owns a session and the renderer it feeds
pub struct GameLoop<R: Renderer> {
    session: Session,
    renderer: R,
    frames: u64,
}

impl<R: Renderer> GameLoop<R> {
    pub fn new(config: &GameConfig, renderer: R) -> Self {
        Self {
            session: Session::new(config),
            renderer,
            frames: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frames rendered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forward an input event; returns true if it started a session
    pub fn input(&mut self, event: InputEvent, now_ms: f64) -> bool {
        apply_input(&mut self.session, event, now_ms)
    }

    /// Advance to `now_ms`: fire due countdown ticks, run the frame update if
    /// one was requested, then render.
    pub fn advance(&mut self, now_ms: f64) {
        while let Some(handle) = self.session.poll_countdown(now_ms) {
            self.session.countdown_tick(handle);
        }

        if self.session.frame_pending() {
            self.session.frame(now_ms);
        }

        for event in self.session.drain_events() {
            match event {
                SimEvent::Caught { at, .. } => {
                    self.renderer.catch_effect(Sparkle::new(at, now_ms));
                }
                SimEvent::Ended { final_score } => self.renderer.session_ended(final_score),
                _ => {}
            }
        }

        self.renderer.render(&Snapshot::capture(&self.session));
        self.frames += 1;
    }

    /// Start a session at `start_ms` and step it at a fixed frame period until
    /// it ends. Returns the final score.
    pub fn run_session(
        &mut self,
        start_ms: f64,
        frame_ms: f64,
        mut autopilot: Option<&mut Autopilot>,
    ) -> u32 {
        let frame_ms = frame_ms.max(1.0);
        self.input(InputEvent::StartPressed, start_ms);

        let mut now = start_ms;
        while self.session.is_running() {
            if let Some(pilot) = autopilot.as_deref_mut() {
                for event in pilot.steer(&self.session) {
                    self.input(event, now);
                }
            }
            self.advance(now);
            now += frame_ms;
        }

        self.session.score
    }
}

/// Demo-mode player: holds left/right to get under the lowest heart that can
/// still be caught.
#[derive(Debug, Default)]
pub struct Autopilot {
    holding_left: bool,
    holding_right: bool,
}

impl Autopilot {
    /// Paddle center may be this far from the target before moving
    const DEADBAND: f32 = 6.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Key transitions needed this frame
    pub fn steer(&mut self, session: &Session) -> Vec<InputEvent> {
        let geometry = session.geometry();
        let paddle_top = geometry.player_top();
        let paddle_center = session.player.x + geometry.player_width / 2.0;

        let target = session
            .objects
            .iter()
            .filter(|o| o.bottom() < paddle_top)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|o| o.center_x());

        let (want_left, want_right) = match target {
            Some(x) if x < paddle_center - Self::DEADBAND => (true, false),
            Some(x) if x > paddle_center + Self::DEADBAND => (false, true),
            _ => (false, false),
        };

        let mut events = Vec::new();
        if want_left != self.holding_left {
            self.holding_left = want_left;
            events.push(if want_left {
                InputEvent::KeyDown(Key::ArrowLeft)
            } else {
                InputEvent::KeyUp(Key::ArrowLeft)
            });
        }
        if want_right != self.holding_right {
            self.holding_right = want_right;
            events.push(if want_right {
                InputEvent::KeyDown(Key::ArrowRight)
            } else {
                InputEvent::KeyUp(Key::ArrowRight)
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use crate::sim::{FallingObject, HeartStyle, SessionPhase};
    use glam::Vec2;

    /// Counts callbacks so tests can check what the renderer saw
    #[derive(Default)]
    struct Recorder {
        renders: usize,
        sparkles: Vec<Sparkle>,
        ended: Vec<u32>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, _snapshot: &Snapshot) {
            self.renders += 1;
        }
        fn catch_effect(&mut self, sparkle: Sparkle) {
            self.sparkles.push(sparkle);
        }
        fn session_ended(&mut self, final_score: u32) {
            self.ended.push(final_score);
        }
    }

    fn quiet() -> GameConfig {
        GameConfig {
            spawn_enabled: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_advance_renders_every_call() {
        let mut game = GameLoop::new(&quiet(), Recorder::default());
        game.advance(0.0);
        game.advance(16.0);
        assert_eq!(game.renderer().renders, 2);
        assert_eq!(game.frames(), 2);
    }

    #[test]
    fn test_countdown_driven_by_timestamps() {
        let mut game = GameLoop::new(&quiet(), Recorder::default());
        game.input(InputEvent::StartPressed, 0.0);
        game.advance(0.0);
        game.advance(2500.0);
        assert_eq!(game.session().time_left, 28);
    }

    #[test]
    fn test_long_gap_ends_session_once() {
        let mut game = GameLoop::new(&quiet(), Recorder::default());
        game.input(InputEvent::StartPressed, 0.0);
        game.advance(60_000.0);
        assert_eq!(game.session().phase, SessionPhase::Ended);
        assert_eq!(game.session().time_left, 0);
        assert_eq!(game.renderer().ended, vec![0]);
    }

    #[test]
    fn test_catch_reaches_renderer() {
        let mut game = GameLoop::new(&quiet(), Recorder::default());
        game.input(InputEvent::StartPressed, 0.0);
        let top = game.session().geometry().player_top();
        let center = game.session().player.x + game.session().geometry().player_width / 2.0;
        game.session_mut().push_object(FallingObject {
            id: 0,
            pos: Vec2::new(center - 18.0, top - 36.0),
            size: 36.0,
            fall_speed: 150.0,
            style: HeartStyle::Lavender,
        });
        game.advance(100.0);
        assert_eq!(game.session().score, 1);
        assert_eq!(game.renderer().sparkles.len(), 1);
        assert_eq!(game.renderer().sparkles[0].born_ms, 100.0);
        assert_eq!(game.renderer().sparkles[0].pos.y, top);
    }

    #[test]
    fn test_run_session_returns_final_score() {
        let mut game = GameLoop::new(&GameConfig::default().with_seed(2024), NullRenderer);
        let mut pilot = Autopilot::new();
        let score = game.run_session(0.0, 1000.0 / 60.0, Some(&mut pilot));
        assert_eq!(game.session().phase, SessionPhase::Ended);
        assert_eq!(game.session().final_score(), Some(score));
        assert!(score > 0);
    }

    #[test]
    fn test_autopilot_moves_toward_heart() {
        let mut session = Session::new(&quiet());
        session.start(0.0);
        session.set_player_position(0.0);
        session.push_object(FallingObject {
            id: 0,
            pos: Vec2::new(400.0, 100.0),
            size: 36.0,
            fall_speed: 150.0,
            style: HeartStyle::Mint,
        });
        let mut pilot = Autopilot::new();
        assert_eq!(pilot.steer(&session), vec![InputEvent::KeyDown(Key::ArrowRight)]);
        // Held already, nothing new to send
        assert!(pilot.steer(&session).is_empty());
        session.objects.clear();
        assert_eq!(pilot.steer(&session), vec![InputEvent::KeyUp(Key::ArrowRight)]);
    }
}
