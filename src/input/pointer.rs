//! Raw pointer and key primitives delivered by the host's touch stack.

use crate::time::Millis;

/// A point on the preview surface in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    pub fn delta_from(self, origin: Position) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn distance_to(self, other: Position) -> f32 {
        let (dx, dy) = self.delta_from(other);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Fling velocity reported by the platform gesture recognizer at release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One sample of the pointer stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Position,
    pub pointer_count: u8,
    pub timestamp: Millis,
    /// Only meaningful for `Up`; zero otherwise
    pub velocity: Velocity,
}

impl PointerEvent {
    pub fn down(position: Position, pointer_count: u8, timestamp: Millis) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
            pointer_count,
            timestamp,
            velocity: Velocity::default(),
        }
    }

    pub fn moved(position: Position, pointer_count: u8, timestamp: Millis) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            pointer_count,
            timestamp,
            velocity: Velocity::default(),
        }
    }

    pub fn up(position: Position, timestamp: Millis, velocity: Velocity) -> Self {
        Self {
            phase: PointerPhase::Up,
            position,
            pointer_count: 1,
            timestamp,
            velocity,
        }
    }

    pub fn cancel(timestamp: Millis) -> Self {
        Self {
            phase: PointerPhase::Cancel,
            position: Position::default(),
            pointer_count: 0,
            timestamp,
            velocity: Velocity::default(),
        }
    }
}

/// Hardware keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareKey {
    VolumeUp,
    VolumeDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_measured_from_origin() {
        let start = Position::new(10.0, 20.0);
        let end = Position::new(160.0, 30.0);
        assert_eq!(end.delta_from(start), (150.0, 10.0));
        assert_eq!(Position::new(3.0, 4.0).distance_to(Position::default()), 5.0);
    }
}
