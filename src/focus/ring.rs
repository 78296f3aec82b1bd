//! Transient focus-ring visibility.
//!
//! The ring is shown at the tap position, held, then faded. The host animates the fade
//! when system animations are on; the hide itself always arrives from this timer after
//! hold + fade, so a newer tap cancels the previous ring's hide.

use crate::input::Position;
use crate::protocol::ControllerEvent;
use crate::time::{Millis, TimerSlot};

pub struct FocusRing {
    hold: Millis,
    fade: Millis,
    hide: TimerSlot,
    visible_at: Option<Position>,
}

impl FocusRing {
    pub fn new(hold: Millis, fade: Millis) -> Self {
        Self {
            hold,
            fade,
            hide: TimerSlot::new(),
            visible_at: None,
        }
    }

    pub fn visible_at(&self) -> Option<Position> {
        self.visible_at
    }

    pub fn show(&mut self, position: Position, animated: bool, now: Millis) -> ControllerEvent {
        self.visible_at = Some(position);
        self.hide.schedule(now, self.hold.saturating_add(self.fade));
        ControllerEvent::FocusRingShown {
            position,
            animated,
            hold: self.hold,
            fade: self.fade,
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.hide.deadline()
    }

    pub fn advance(&mut self, now: Millis) -> Option<ControllerEvent> {
        self.hide.take_due(now)?;
        self.visible_at = None;
        Some(ControllerEvent::FocusRingHidden)
    }

    /// Hide immediately, e.g. when the host goes to the background.
    pub fn dismiss(&mut self) -> Option<ControllerEvent> {
        self.hide.cancel();
        self.visible_at
            .take()
            .map(|_| ControllerEvent::FocusRingHidden)
    }
}
