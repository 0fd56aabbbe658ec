//! Pointer events delivered by the host.

use kurbo::{Point, Vec2};

/// A pointer event in surface-local screen coordinates.
///
/// The host adapter translates its native mouse events into this form and
/// feeds them to [`Space::dispatch`](crate::space::Space::dispatch). Move
/// events carry the per-tick movement delta so panning stays independent of
/// the zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
    },
    Up {
        position: Point,
    },
    Move {
        position: Point,
        delta: Vec2,
    },
    /// Wheel/scroll gesture with a signed magnitude.
    Wheel {
        delta: f64,
    },
}

impl PointerEvent {
    /// The pointer position, if the event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Up { position }
            | PointerEvent::Move { position, .. } => Some(*position),
            PointerEvent::Wheel { .. } => None,
        }
    }
}
