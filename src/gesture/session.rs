//! Per-touch session value.
//!
//! All cross-callback flags (`consumed_swipe`, `consumed_zoom`) live here rather than on
//! the arbiter, so a new session can never observe state left over from the last one.

use crate::input::Position;
use crate::time::Millis;

/// Lifecycle of a session between first contact and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Down,
    OnePointer,
    TwoPointer,
    Classified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What a session turned out to be. Written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Unclassified,
    Tap,
    DoubleTap,
    Swipe(SwipeDirection),
    Zoom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchSession {
    pub start: Position,
    pub started_at: Millis,
    phase: SessionPhase,
    pointer_history: Vec<u8>,
    classification: Classification,
    consumed_swipe: bool,
    consumed_zoom: bool,
}

impl TouchSession {
    pub fn new(start: Position, started_at: Millis, pointer_count: u8) -> Self {
        let mut session = Self {
            start,
            started_at,
            phase: SessionPhase::Down,
            pointer_history: Vec::with_capacity(4),
            classification: Classification::Unclassified,
            consumed_swipe: false,
            consumed_zoom: false,
        };
        session.observe_pointers(pointer_count);
        session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Distinct pointer counts seen, in order of appearance.
    pub fn pointer_history(&self) -> &[u8] {
        &self.pointer_history
    }

    pub fn is_zooming(&self) -> bool {
        self.consumed_zoom
    }

    pub fn observe_pointers(&mut self, count: u8) {
        if self.pointer_history.last() != Some(&count) {
            self.pointer_history.push(count);
        }
        if self.phase == SessionPhase::Classified {
            return;
        }
        if count >= 2 {
            self.phase = SessionPhase::TwoPointer;
        } else if self.phase == SessionPhase::Down {
            self.phase = SessionPhase::OnePointer;
        }
    }

    /// Set the classification unless one is already recorded.
    pub fn classify(&mut self, classification: Classification) -> bool {
        if self.classification != Classification::Unclassified {
            return false;
        }
        self.classification = classification;
        self.phase = SessionPhase::Classified;
        true
    }

    /// Lock the session to zoom. Stays locked even if fingers are lifted afterwards.
    pub fn lock_zoom(&mut self) -> bool {
        if self.classification == Classification::Zoom {
            return true;
        }
        if self.classify(Classification::Zoom) {
            self.consumed_zoom = true;
            true
        } else {
            false
        }
    }

    pub fn mark_swipe(&mut self, direction: SwipeDirection) -> bool {
        if self.classify(Classification::Swipe(direction)) {
            self.consumed_swipe = true;
            true
        } else {
            false
        }
    }

    /// Resolve a release that was already decided mid-session.
    ///
    /// A consumed swipe is checked before a consumed zoom; the zoom flag is cleared on
    /// consumption.
    pub fn settle(&mut self) -> Option<Classification> {
        if self.consumed_swipe {
            self.consumed_swipe = false;
            return Some(self.classification);
        }
        if self.consumed_zoom {
            self.consumed_zoom = false;
            return Some(Classification::Zoom);
        }
        None
    }
}
