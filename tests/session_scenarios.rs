//! End-to-end session scenarios driven with synthetic timestamps

use glam::Vec2;
use heart_catch::GameConfig;
use heart_catch::game_loop::{Autopilot, GameLoop};
use heart_catch::render::NullRenderer;
use heart_catch::sim::{
    FallingObject, FieldGeometry, HeartStyle, PlayerRect, Session, SessionPhase, SimEvent,
    is_caught,
};
use proptest::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn quiet_config() -> GameConfig {
    GameConfig {
        spawn_enabled: false,
        ..Default::default()
    }
}

fn heart(x: f32, y: f32) -> FallingObject {
    FallingObject {
        id: 0,
        pos: Vec2::new(x, y),
        size: 36.0,
        fall_speed: 150.0,
        style: HeartStyle::Pink,
    }
}

/// Step the session by hand the way the game loop does
fn step(session: &mut Session, now: f64) {
    while let Some(handle) = session.poll_countdown(now) {
        session.countdown_tick(handle);
    }
    session.frame(now);
}

#[test]
fn test_empty_session_ends_at_thirty_seconds() {
    let mut session = Session::new(&quiet_config());
    session.start(0.0);

    let mut now = 0.0;
    while now < 29_990.0 {
        step(&mut session, now);
        assert_eq!(session.phase, SessionPhase::Running);
        now += FRAME_MS;
    }

    step(&mut session, 30_000.0);
    assert_eq!(session.phase, SessionPhase::Ended);
    assert_eq!(session.time_left, 0);
    assert_eq!(session.score, 0);
    assert!(session.objects.is_empty());
}

#[test]
fn test_heart_landing_on_paddle_is_caught() {
    let field = FieldGeometry {
        player_width: 50.0,
        ..Default::default()
    };
    let mut session = Session::new(&GameConfig {
        field,
        ..quiet_config()
    });
    session.start(0.0);
    session.set_player_position(100.0);

    // Center x = 102 + 18 = 120; bottom exactly on the paddle top
    let top = field.player_top();
    session.push_object(heart(102.0, top - 36.0));
    session.frame(0.0);

    assert_eq!(session.score, 1);
    assert!(session.objects.is_empty());
    let caught: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::Caught { .. }))
        .collect();
    assert_eq!(caught.len(), 1);
}

#[test]
fn test_heart_beside_paddle_falls_out() {
    let mut session = Session::new(&quiet_config());
    session.start(0.0);
    session.set_player_position(0.0);
    let id = session.push_object(heart(400.0, 0.0));

    let mut now = 0.0;
    while !session.objects.is_empty() && now < 20_000.0 {
        session.frame(now);
        now += FRAME_MS;
    }

    assert!(session.objects.is_empty());
    assert_eq!(session.score, 0);
    let events = session.drain_events();
    assert!(events.contains(&SimEvent::Missed { id }));
}

#[test]
fn test_double_start_keeps_one_countdown() {
    let mut session = Session::new(&quiet_config());
    session.start(0.0);
    session.start(0.0);
    session.start(400.0);

    // Exactly one tick per second, not two or three
    step(&mut session, 1000.0);
    assert_eq!(session.time_left, 29);
    step(&mut session, 1500.0);
    assert_eq!(session.time_left, 29);
}

#[test]
fn test_restart_after_end_gets_fresh_countdown() {
    let mut session = Session::new(&quiet_config());
    session.start(0.0);
    let old = session.countdown_handle().unwrap();
    step(&mut session, 30_000.0);
    assert_eq!(session.phase, SessionPhase::Ended);

    assert!(session.start(31_000.0));
    session.countdown_tick(old);
    assert_eq!(session.time_left, 30);
    step(&mut session, 31_999.0);
    assert_eq!(session.time_left, 30);
    step(&mut session, 32_000.0);
    assert_eq!(session.time_left, 29);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = GameLoop::new(&GameConfig::default().with_seed(seed), NullRenderer);
        let mut pilot = Autopilot::new();
        game.run_session(0.0, FRAME_MS, Some(&mut pilot))
    };
    assert_eq!(play(77), play(77));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Score equals the number of catch events, catches satisfy the catch test
    /// at the moment they happen, and no surviving heart ever satisfied it.
    #[test]
    fn prop_score_matches_catches(
        seed in any::<u64>(),
        moves in prop::collection::vec((any::<bool>(), any::<bool>(), prop::option::of(0.0f32..480.0)), 60),
    ) {
        let mut session = Session::new(&GameConfig::default().with_seed(seed));
        session.start(0.0);

        let mut catches = 0u32;
        let mut now = 0.0;
        let mut frame = 0usize;
        while session.is_running() && now <= 12_000.0 {
            let (left, right, pointer) = moves[(frame / 10) % moves.len()];
            session.set_moving_left(left);
            session.set_moving_right(right);
            if let Some(x) = pointer {
                session.set_player_position(x);
            }

            step(&mut session, now);

            let geo = *session.geometry();
            prop_assert!(session.player.x >= 0.0 && session.player.x <= geo.max_player_x());
            let paddle = PlayerRect::new(&session.player, &geo);
            for obj in &session.objects {
                prop_assert!(!is_caught(obj, &paddle));
                prop_assert!(obj.pos.y >= -40.0);
            }

            for event in session.drain_events() {
                if matches!(event, SimEvent::Caught { .. }) {
                    catches += 1;
                }
            }
            prop_assert_eq!(session.score, catches);
            prop_assert!(session.spawner.interval_ms >= 380.0);

            now += FRAME_MS;
            frame += 1;
        }
    }
}
