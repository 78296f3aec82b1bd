//! Focus-and-meter requests and the auto-recenter timer.

use crate::input::Position;
use crate::protocol::ControllerEvent;
use crate::time::{Millis, TimerSlot};
use log::debug;

/// Preview surface size in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreviewGeometry {
    pub width: f32,
    pub height: f32,
}

impl PreviewGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A point in preview-normalized coordinates, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

impl FocusPoint {
    pub const CENTER: FocusPoint = FocusPoint { x: 0.5, y: 0.5 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: normalize_axis(x),
            y: normalize_axis(y),
        }
    }

    /// Map a view position onto the preview. A degenerate preview maps to the center.
    pub fn from_position(position: Position, preview: PreviewGeometry) -> Self {
        let axis = |value: f32, extent: f32| {
            if extent > 0.0 && extent.is_finite() {
                value / extent
            } else {
                0.5
            }
        };
        Self::new(
            axis(position.x, preview.width),
            axis(position.y, preview.height),
        )
    }
}

fn normalize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Who asked for a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOrigin {
    Tap,
    Recenter,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Pending,
    Active,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusRequest {
    pub id: u64,
    pub point: FocusPoint,
    pub requested_at: Millis,
    /// `None` means the request stays until superseded
    pub auto_cancel: Option<Millis>,
    pub origin: FocusOrigin,
    pub state: FocusState,
}

impl FocusRequest {
    pub fn is_outstanding(&self) -> bool {
        matches!(self.state, FocusState::Pending | FocusState::Active)
    }
}

pub struct FocusController {
    current: Option<FocusRequest>,
    next_id: u64,
    recenter_interval: Millis,
    recenter: TimerSlot,
    expiry: TimerSlot,
}

impl FocusController {
    pub fn new(recenter_interval: Millis) -> Self {
        Self {
            current: None,
            next_id: 1,
            recenter_interval,
            recenter: TimerSlot::new(),
            expiry: TimerSlot::new(),
        }
    }

    pub fn current(&self) -> Option<&FocusRequest> {
        self.current.as_ref()
    }

    /// Supersede any outstanding request and issue a new one.
    ///
    /// `auto_cancel == 0` issues a request that never auto-cancels. A running
    /// auto-recenter countdown restarts from `now`.
    pub fn request_focus(
        &mut self,
        point: FocusPoint,
        auto_cancel: Millis,
        origin: FocusOrigin,
        now: Millis,
    ) -> ControllerEvent {
        if let Some(previous) = self.current.as_mut() {
            if previous.is_outstanding() {
                previous.state = FocusState::Cancelled;
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        let mut request = FocusRequest {
            id,
            point,
            requested_at: now,
            auto_cancel: (auto_cancel > 0).then_some(auto_cancel),
            origin,
            state: FocusState::Pending,
        };

        match request.auto_cancel {
            Some(duration) => self.expiry.schedule(now, duration),
            None => self.expiry.cancel(),
        }
        if self.recenter.is_pending() {
            self.start_auto_recenter(now);
        }

        // Issued to the capture pipeline through the returned event
        request.state = FocusState::Active;
        debug!("focus request #{id} at {point:?} ({origin:?})");
        self.current = Some(request);

        ControllerEvent::FocusRequested {
            point,
            auto_cancel,
            origin,
        }
    }

    /// Start (or restart) the auto-recenter countdown.
    pub fn start_auto_recenter(&mut self, now: Millis) {
        self.recenter.schedule(now, self.recenter_interval);
    }

    pub fn cancel_auto_recenter(&mut self) {
        self.recenter.cancel();
    }

    pub fn is_recentering(&self) -> bool {
        self.recenter.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.recenter.deadline(), self.expiry.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire due timers. Each slot fires at most once per call; the recenter timer
    /// reschedules itself relative to `now`.
    pub fn advance(&mut self, now: Millis, out: &mut Vec<ControllerEvent>) {
        if self.expiry.take_due(now).is_some() {
            if let Some(request) = self.current.as_mut() {
                if request.is_outstanding() {
                    request.state = FocusState::Expired;
                }
            }
        }

        if self.recenter.take_due(now).is_some() {
            out.push(self.request_focus(FocusPoint::CENTER, 0, FocusOrigin::Recenter, now));
            self.start_auto_recenter(now);
        }
    }

    /// Cancel every timer; the current request is left to the capture pipeline.
    pub fn shutdown(&mut self) {
        self.recenter.cancel();
        self.expiry.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(focus: &mut FocusController, now: Millis) -> Vec<ControllerEvent> {
        let mut out = Vec::new();
        focus.advance(now, &mut out);
        out
    }

    #[test]
    fn new_request_cancels_outstanding_one() {
        let mut focus = FocusController::new(2000);
        focus.request_focus(FocusPoint::new(0.2, 0.2), 0, FocusOrigin::Tap, 0);
        let first_id = focus.current().unwrap().id;
        focus.request_focus(FocusPoint::new(0.8, 0.8), 0, FocusOrigin::Tap, 10);

        let current = focus.current().unwrap();
        assert_ne!(current.id, first_id);
        assert_eq!(current.state, FocusState::Active);
        assert_eq!(current.point, FocusPoint::new(0.8, 0.8));
    }

    #[test]
    fn zero_auto_cancel_never_expires() {
        let mut focus = FocusController::new(2000);
        focus.request_focus(FocusPoint::CENTER, 0, FocusOrigin::Tap, 0);
        assert!(drain(&mut focus, 1_000_000).is_empty());
        assert_eq!(focus.current().unwrap().state, FocusState::Active);
        assert_eq!(focus.current().unwrap().auto_cancel, None);
    }

    #[test]
    fn auto_cancel_marks_request_expired() {
        let mut focus = FocusController::new(2000);
        focus.request_focus(FocusPoint::CENTER, 3000, FocusOrigin::Tap, 0);
        drain(&mut focus, 2999);
        assert_eq!(focus.current().unwrap().state, FocusState::Active);
        drain(&mut focus, 3000);
        assert_eq!(focus.current().unwrap().state, FocusState::Expired);
    }

    #[test]
    fn recenter_fires_at_center_and_reschedules() {
        let mut focus = FocusController::new(2000);
        focus.start_auto_recenter(0);

        assert!(drain(&mut focus, 1999).is_empty());
        let fired = drain(&mut focus, 2000);
        assert_eq!(
            fired,
            vec![ControllerEvent::FocusRequested {
                point: FocusPoint::CENTER,
                auto_cancel: 0,
                origin: FocusOrigin::Recenter,
            }]
        );
        assert_eq!(focus.next_deadline(), Some(4000));
    }

    #[test]
    fn manual_request_restarts_recenter_countdown() {
        let mut focus = FocusController::new(2000);
        focus.start_auto_recenter(0);
        focus.request_focus(FocusPoint::new(0.1, 0.9), 0, FocusOrigin::Tap, 1500);

        assert_eq!(focus.next_deadline(), Some(3500));
        assert!(drain(&mut focus, 2000).is_empty());
        assert_eq!(drain(&mut focus, 3500).len(), 1);
    }

    #[test]
    fn cancelled_recenter_never_fires() {
        let mut focus = FocusController::new(2000);
        focus.start_auto_recenter(0);
        focus.cancel_auto_recenter();
        assert!(drain(&mut focus, 10_000).is_empty());
        assert!(!focus.is_recentering());
    }

    #[test]
    fn positions_normalize_against_preview() {
        let preview = PreviewGeometry::new(1000.0, 2000.0);
        assert_eq!(
            FocusPoint::from_position(Position::new(250.0, 1500.0), preview),
            FocusPoint::new(0.25, 0.75)
        );
        assert_eq!(
            FocusPoint::from_position(Position::new(-5.0, 9000.0), preview),
            FocusPoint::new(0.0, 1.0)
        );
        assert_eq!(
            FocusPoint::from_position(Position::new(10.0, 10.0), PreviewGeometry::default()),
            FocusPoint::CENTER
        );
    }
}
