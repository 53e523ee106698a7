//! Device-agnostic input
//!
//! Hosts translate raw keyboard/pointer/window events into [`InputEvent`]s;
//! `apply_input` turns those into session calls. Keys other than the arrows
//! and A/D are ignored.

use serde::{Deserialize, Serialize};

use crate::sim::{FieldGeometry, Session};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Char(char),
    Other,
}

/// Paddle direction a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Key {
    /// Map a DOM-style key name (`"ArrowLeft"`, `"a"`, ...)
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::ArrowLeft | Key::Char('a') => Some(Direction::Left),
            Key::ArrowRight | Key::Char('d') => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Raw-ish input, already stripped of device details
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer x relative to the field's left edge
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    PointerUp,
    StartPressed,
    Resize(FieldGeometry),
}

/// Paddle left edge that puts the paddle's center under the pointer
pub fn pointer_to_player_x(pointer_x: f32, geometry: &FieldGeometry) -> f32 {
    geometry.clamp_player_x(pointer_x - geometry.player_width / 2.0)
}

/// Feed one input event to the session.
///
/// Key presses, pointer moves and resizes only count while a session is
/// running; key releases always clear the held direction so nothing sticks
/// across sessions. Returns true when the event started a session.
pub fn apply_input(session: &mut Session, event: InputEvent, now_ms: f64) -> bool {
    match event {
        InputEvent::StartPressed => return session.start(now_ms),
        InputEvent::KeyUp(key) => match key.direction() {
            Some(Direction::Left) => session.set_moving_left(false),
            Some(Direction::Right) => session.set_moving_right(false),
            None => {}
        },
        _ if !session.is_running() => {}
        InputEvent::KeyDown(key) => match key.direction() {
            Some(Direction::Left) => session.set_moving_left(true),
            Some(Direction::Right) => session.set_moving_right(true),
            None => {}
        },
        InputEvent::PointerDown { x } | InputEvent::PointerMove { x } => {
            let target = pointer_to_player_x(x, session.geometry());
            session.set_player_position(target);
        }
        InputEvent::PointerUp => {}
        InputEvent::Resize(geometry) => session.resize(geometry),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::SessionPhase;

    fn running() -> Session {
        let mut session = Session::new(&GameConfig {
            spawn_enabled: false,
            ..Default::default()
        });
        session.start(0.0);
        session
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_name("ArrowLeft").direction(), Some(Direction::Left));
        assert_eq!(Key::from_name("a").direction(), Some(Direction::Left));
        assert_eq!(Key::from_name("d").direction(), Some(Direction::Right));
        assert_eq!(Key::from_name("ArrowRight").direction(), Some(Direction::Right));
        assert_eq!(Key::from_name("w").direction(), None);
        assert_eq!(Key::from_name("Shift"), Key::Other);
    }

    #[test]
    fn test_keys_ignored_when_idle() {
        let mut session = Session::new(&GameConfig::default());
        apply_input(&mut session, InputEvent::KeyDown(Key::ArrowLeft), 0.0);
        assert!(session.intent.is_idle());
    }

    #[test]
    fn test_key_down_up() {
        let mut session = running();
        apply_input(&mut session, InputEvent::KeyDown(Key::Char('d')), 0.0);
        assert!(session.intent.right);
        apply_input(&mut session, InputEvent::KeyUp(Key::ArrowRight), 0.0);
        assert!(!session.intent.right);
    }

    #[test]
    fn test_pointer_centers_paddle() {
        let mut session = running();
        let geo = *session.geometry();
        apply_input(&mut session, InputEvent::PointerMove { x: 200.0 }, 0.0);
        assert_eq!(session.player.x, 200.0 - geo.player_width / 2.0);
        apply_input(&mut session, InputEvent::PointerDown { x: -50.0 }, 0.0);
        assert_eq!(session.player.x, 0.0);
        apply_input(&mut session, InputEvent::PointerMove { x: 10_000.0 }, 0.0);
        assert_eq!(session.player.x, geo.max_player_x());
    }

    #[test]
    fn test_start_pressed() {
        let mut session = Session::new(&GameConfig::default());
        assert!(apply_input(&mut session, InputEvent::StartPressed, 0.0));
        assert_eq!(session.phase, SessionPhase::Running);
        assert!(!apply_input(&mut session, InputEvent::StartPressed, 10.0));
    }
}
