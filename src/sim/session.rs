//! Session state machine
//!
//! Idle -> Running -> Ended, with Ended -> Running on restart. The session
//! owns all game state; there are no globals. It never reads a clock: the
//! host passes timestamps (ms) into `start`, `frame` and `poll_countdown`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{PlayerRect, resolve_objects};
use super::geometry::FieldGeometry;
use super::physics::{MovementIntent, frame_delta, move_player, place_player};
use super::spawner::{SpawnParams, Spawner};
use super::state::{FallingObject, Player, SessionPhase, SimEvent};
use super::timer::{FrameRequest, IntervalTimer, TimerHandle};
use crate::config::GameConfig;
use crate::consts::COUNTDOWN_PERIOD_MS;

/// One play-through and everything it touches
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: SessionPhase,
    /// Hearts caught this session
    pub score: u32,
    /// Whole seconds left on the countdown
    pub time_left: u32,
    pub player: Player,
    pub intent: MovementIntent,
    /// Active hearts, in spawn order
    pub objects: Vec<FallingObject>,
    pub spawner: Spawner,
    /// Timestamp of the previous frame; `None` until the first frame of a session
    pub last_frame_ms: Option<f64>,
    geometry: FieldGeometry,
    duration_secs: u32,
    despawn_margin: f32,
    countdown: IntervalTimer,
    frame_request: FrameRequest,
    rng: Pcg32,
    next_id: u32,
    events: Vec<SimEvent>,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        let config = config.clone().sanitized();
        let geometry = config.field;
        let mut player = Player::new(config.player_speed);
        player.center(&geometry);

        Self {
            phase: SessionPhase::Idle,
            score: 0,
            time_left: config.duration_secs,
            player,
            intent: MovementIntent::default(),
            objects: Vec::new(),
            spawner: Spawner::new(SpawnParams::from_config(&config), config.spawn_enabled),
            last_frame_ms: None,
            geometry,
            duration_secs: config.duration_secs,
            despawn_margin: config.despawn_margin,
            countdown: IntervalTimer::new(COUNTDOWN_PERIOD_MS),
            frame_request: FrameRequest::default(),
            rng: Pcg32::seed_from_u64(config.seed),
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Final score once the session has ended
    pub fn final_score(&self) -> Option<u32> {
        (self.phase == SessionPhase::Ended).then_some(self.score)
    }

    /// Handle of the live countdown registration
    pub fn countdown_handle(&self) -> Option<TimerHandle> {
        self.countdown.handle()
    }

    /// Whether a frame callback is outstanding
    pub fn frame_pending(&self) -> bool {
        self.frame_request.is_pending()
    }

    /// Begin a new session at `now_ms`.
    ///
    /// Ignored while already running, so a double start never produces two
    /// countdowns. Returns whether a session actually started.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase == SessionPhase::Running {
            return false;
        }

        self.reset(now_ms);
        self.phase = SessionPhase::Running;
        self.countdown.every(now_ms);
        self.frame_request.request();
        self.events.push(SimEvent::Started);

        log::info!(
            "Session started: {}s, field {}x{}",
            self.duration_secs,
            self.geometry.field_width,
            self.geometry.field_height
        );
        true
    }

    /// Clear per-session state. Any previous countdown and frame request are
    /// dropped here, so nothing from the old session can fire into the new one.
    fn reset(&mut self, now_ms: f64) {
        if let Some(handle) = self.countdown.handle() {
            self.countdown.cancel(handle);
        }
        self.frame_request.cancel();

        self.objects.clear();
        self.score = 0;
        self.time_left = self.duration_secs;
        self.intent = MovementIntent::default();
        self.last_frame_ms = None;
        self.spawner.reset(now_ms);
        self.player.center(&self.geometry);
    }

    /// Stop the session. Only meaningful while running.
    pub fn end(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }

        if let Some(handle) = self.countdown.handle() {
            self.countdown.cancel(handle);
        }
        self.frame_request.cancel();
        self.intent = MovementIntent::default();
        self.phase = SessionPhase::Ended;
        self.events.push(SimEvent::Ended { final_score: self.score });

        log::info!("Session ended, final score {}", self.score);
    }

    /// Next due countdown tick at `now_ms`, if any
    pub fn poll_countdown(&mut self, now_ms: f64) -> Option<TimerHandle> {
        self.countdown.poll(now_ms)
    }

    /// One-second countdown tick. Ticks from a cancelled registration are dropped.
    pub fn countdown_tick(&mut self, handle: TimerHandle) {
        if self.phase != SessionPhase::Running || !self.countdown.is_current(handle) {
            log::debug!("Dropping stale countdown tick (epoch {})", handle.epoch());
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end();
        }
    }

    /// Per-frame update: paddle movement, spawning, falling and catches.
    ///
    /// Consumes the outstanding frame request and asks for the next one while
    /// the session keeps running.
    pub fn frame(&mut self, now_ms: f64) {
        if self.phase != SessionPhase::Running || !self.frame_request.take() {
            return;
        }

        let dt = frame_delta(self.last_frame_ms, now_ms);
        self.last_frame_ms = Some(now_ms);

        move_player(&mut self.player, self.intent, dt, &self.geometry);
        self.spawn(now_ms);
        self.update_objects(dt);

        self.frame_request.request();
    }

    fn spawn(&mut self, now_ms: f64) {
        let id = self.next_id;
        if let Some(object) = self.spawner.poll(now_ms, id, &self.geometry, &mut self.rng) {
            self.next_id += 1;
            log::debug!(
                "Spawned heart {} at x={:.1} ({} u/s, {}), next in {}ms",
                object.id,
                object.pos.x,
                object.fall_speed,
                object.style.as_str(),
                self.spawner.interval_ms
            );
            self.events.push(SimEvent::Spawned { id: object.id });
            self.objects.push(object);
        }
    }

    fn update_objects(&mut self, dt: f32) {
        let paddle = PlayerRect::new(&self.player, &self.geometry);
        let despawn_y = self.geometry.despawn_y(self.despawn_margin);
        let outcome = resolve_objects(&mut self.objects, &paddle, despawn_y, dt);

        for id in outcome.missed {
            self.events.push(SimEvent::Missed { id });
        }
        for (id, at) in outcome.caught {
            self.score += 1;
            log::debug!("Caught heart {}, score {}", id, self.score);
            self.events.push(SimEvent::Caught { id, at });
        }
    }

    /// Insert a heart directly, bypassing the spawner. Hook for scripted
    /// scenarios; the returned id replaces whatever `object.id` held.
    pub fn push_object(&mut self, mut object: FallingObject) -> u32 {
        object.id = self.next_id;
        self.next_id += 1;
        let id = object.id;
        self.objects.push(object);
        id
    }

    pub fn set_moving_left(&mut self, moving: bool) {
        self.intent.left = moving;
    }

    pub fn set_moving_right(&mut self, moving: bool) {
        self.intent.right = moving;
    }

    /// Pointer control: put the paddle's left edge at `x` (clamped)
    pub fn set_player_position(&mut self, x: f32) {
        place_player(&mut self.player, x, &self.geometry);
    }

    /// New field dimensions from the host. The paddle is re-clamped while running.
    pub fn resize(&mut self, geometry: FieldGeometry) {
        self.geometry = geometry;
        if self.phase == SessionPhase::Running {
            self.player.x = self.geometry.clamp_player_x(self.player.x);
        }
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
