//! Pointer events delivered to the interaction engine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are world coordinates; the board has no camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Vertical wheel travel. Only the sign matters: one event is one tick.
    Wheel {
        position: Point,
        delta_y: f64,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Wheel { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_position() {
        let event = PointerEvent::Wheel {
            position: Point::new(3.0, 4.0),
            delta_y: -120.0,
        };
        assert_eq!(event.position(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_event_serde() {
        let event = PointerEvent::Down {
            position: Point::new(1.0, 2.0),
            button: MouseButton::Right,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PointerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
