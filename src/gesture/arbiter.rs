//! Session state machine deciding what each touch session was.
//!
//! Consumes the pointer stream plus pinch factors and yields one `GestureOutcome` per
//! call. The controller forwards confirmed outcomes to the focus, zoom and swipe
//! components; the arbiter itself never touches them.

use crate::config::ControllerConfig;
use crate::gesture::session::{Classification, SwipeDirection, TouchSession};
use crate::input::{PointerEvent, PointerPhase, Position, Velocity};
use crate::time::Millis;
use log::debug;

/// Thresholds the arbiter classifies against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub swipe_distance: f32,
    pub swipe_velocity: f32,
    pub double_tap_window: Millis,
    pub double_tap_slop: f32,
}

impl GestureThresholds {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            swipe_distance: config.swipe_distance,
            swipe_velocity: config.swipe_velocity,
            double_tap_window: config.double_tap_window,
            double_tap_slop: config.double_tap_slop,
        }
    }

    /// Direction of a qualifying fling, or `None` when the release is not a swipe.
    ///
    /// The dominant axis is the one with the larger displacement; ties go horizontal.
    pub fn swipe_direction(
        &self,
        dx: f32,
        dy: f32,
        velocity: Velocity,
    ) -> Option<SwipeDirection> {
        if !(dx.is_finite() && dy.is_finite() && velocity.x.is_finite() && velocity.y.is_finite())
        {
            return None;
        }
        let horizontal = dx.abs() >= dy.abs();
        let (delta, speed) = if horizontal {
            (dx, velocity.x.abs())
        } else {
            (dy, velocity.y.abs())
        };
        if delta.abs() <= self.swipe_distance || speed <= self.swipe_velocity {
            return None;
        }
        Some(match (horizontal, delta > 0.0) {
            (true, true) => SwipeDirection::Right,
            (true, false) => SwipeDirection::Left,
            (false, true) => SwipeDirection::Down,
            (false, false) => SwipeDirection::Up,
        })
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

/// What the controller should do after an arbiter call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to forward
    Pending,
    /// Session is locked to zoom; apply this pinch factor
    ZoomDelta(f32),
    /// A zoom session was released
    ZoomEnded,
    Tap(Position),
    DoubleTap(Position),
    Swipe(SwipeDirection),
    /// Session discarded without side effects
    Cancelled,
}

impl GestureOutcome {
    /// Final classification for outcomes that end a session.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            GestureOutcome::ZoomEnded => Some(Classification::Zoom),
            GestureOutcome::Tap(_) => Some(Classification::Tap),
            GestureOutcome::DoubleTap(_) => Some(Classification::DoubleTap),
            GestureOutcome::Swipe(direction) => Some(Classification::Swipe(*direction)),
            GestureOutcome::Cancelled => Some(Classification::Unclassified),
            GestureOutcome::Pending | GestureOutcome::ZoomDelta(_) => None,
        }
    }
}

pub struct GestureArbiter {
    thresholds: GestureThresholds,
    session: Option<TouchSession>,
    last_tap: Option<(Position, Millis)>,
}

impl GestureArbiter {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            session: None,
            last_tap: None,
        }
    }

    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// True while the active session is locked to zoom.
    pub fn is_zooming(&self) -> bool {
        self.session.as_ref().is_some_and(TouchSession::is_zooming)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        match event.phase {
            PointerPhase::Down => {
                self.on_pointer_down(event.position, event.timestamp, event.pointer_count)
            }
            PointerPhase::Move => {
                if let Some(session) = self.session.as_mut() {
                    session.observe_pointers(event.pointer_count);
                }
                GestureOutcome::Pending
            }
            PointerPhase::Up => self.on_release(event.position, event.timestamp, event.velocity),
            PointerPhase::Cancel => self.on_cancel(),
        }
    }

    pub fn on_pointer_down(
        &mut self,
        position: Position,
        at: Millis,
        pointer_count: u8,
    ) -> GestureOutcome {
        // A first contact always opens a fresh session, even if the last Up was lost
        if let Some(session) = self.session.as_mut() {
            if pointer_count >= 2 {
                session.observe_pointers(pointer_count);
                return GestureOutcome::Pending;
            }
            debug!("first contact replaces an unfinished session");
        }
        self.session = Some(TouchSession::new(position, at, pointer_count));
        GestureOutcome::Pending
    }

    pub fn on_scale(&mut self, factor: f32) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            debug!("pinch factor {factor} outside a session ignored");
            return GestureOutcome::Pending;
        };
        if !session.lock_zoom() {
            debug!("pinch after {:?} ignored", session.classification());
            return GestureOutcome::Pending;
        }
        if !factor.is_finite() || factor <= 0.0 {
            return GestureOutcome::Pending;
        }
        GestureOutcome::ZoomDelta(factor)
    }

    pub fn on_release(
        &mut self,
        position: Position,
        at: Millis,
        velocity: Velocity,
    ) -> GestureOutcome {
        let Some(mut session) = self.session.take() else {
            debug!("release without a session ignored");
            return GestureOutcome::Pending;
        };

        if let Some(settled) = session.settle() {
            self.last_tap = None;
            return match settled {
                Classification::Swipe(direction) => GestureOutcome::Swipe(direction),
                _ => GestureOutcome::ZoomEnded,
            };
        }

        let (dx, dy) = position.delta_from(session.start);
        if let Some(direction) = self.thresholds.swipe_direction(dx, dy, velocity) {
            session.mark_swipe(direction);
            self.last_tap = None;
            debug!("swipe {direction:?} (dx={dx}, dy={dy})");
            return GestureOutcome::Swipe(direction);
        }

        if self.is_double_tap(position, at) {
            session.classify(Classification::DoubleTap);
            self.last_tap = None;
            debug!("double tap at {position:?}");
            return GestureOutcome::DoubleTap(position);
        }

        session.classify(Classification::Tap);
        self.last_tap = Some((position, at));
        GestureOutcome::Tap(position)
    }

    pub fn on_cancel(&mut self) -> GestureOutcome {
        if self.session.take().is_some() {
            GestureOutcome::Cancelled
        } else {
            GestureOutcome::Pending
        }
    }

    /// Drop the active session and the double-tap history.
    pub fn reset(&mut self) {
        self.session = None;
        self.last_tap = None;
    }

    fn is_double_tap(&self, position: Position, at: Millis) -> bool {
        self.last_tap.is_some_and(|(previous, previous_at)| {
            at.saturating_sub(previous_at) <= self.thresholds.double_tap_window
                && position.distance_to(previous) <= self.thresholds.double_tap_slop
        })
    }
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}
