//! Per-element rotation tracks with continuity fix-up.

use crate::time::Millis;

/// UI ornaments that rotate with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    LevelFrame,
    FlipCamera,
    CancelButton,
    ThirdOption,
    ExposurePlus,
    ExposureMinus,
    ZoomIn,
    ZoomOut,
    SettingsFrame,
}

impl ElementId {
    pub const ALL: [ElementId; 9] = [
        ElementId::LevelFrame,
        ElementId::FlipCamera,
        ElementId::CancelButton,
        ElementId::ThirdOption,
        ElementId::ExposurePlus,
        ElementId::ExposureMinus,
        ElementId::ZoomIn,
        ElementId::ZoomOut,
        ElementId::SettingsFrame,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The level frame keeps following the device even with auto-rotate off.
    pub fn respects_auto_rotate(self) -> bool {
        self != ElementId::LevelFrame
    }
}

/// A linear rotation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: f32,
    pub to: f32,
    pub started_at: Millis,
    pub duration: Millis,
}

impl Transition {
    pub fn value_at(&self, now: Millis) -> f32 {
        let elapsed = now.saturating_sub(self.started_at);
        if self.duration == 0 || elapsed >= self.duration {
            return self.to;
        }
        let progress = elapsed as f32 / self.duration as f32;
        self.from + (self.to - self.from) * progress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationTrack {
    at_rest: f32,
    transition: Option<Transition>,
}

impl RotationTrack {
    /// Rotation displayed at `now`.
    pub fn current(&self, now: Millis) -> f32 {
        self.transition
            .map_or(self.at_rest, |transition| transition.value_at(now))
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Start a transition towards `target`, replacing any in-flight one.
    ///
    /// Returns the transition actually started, or `None` when the element already rests
    /// at `target`.
    pub fn rotate_to(&mut self, target: f32, now: Millis, duration: Millis) -> Option<Transition> {
        let mut from = self.current(now);
        self.cancel(now);
        if from == target {
            return None;
        }

        // Take the short way round across the 0/360 seam
        if from == 0.0 && target == 270.0 {
            from = 360.0;
        }
        if from == 270.0 && target == 0.0 {
            from = -90.0;
        }

        let transition = Transition {
            from,
            to: target,
            started_at: now,
            duration,
        };
        self.transition = Some(transition);
        self.at_rest = target;
        Some(transition)
    }

    /// Freeze the element at its current rotation.
    pub fn cancel(&mut self, now: Millis) {
        if let Some(transition) = self.transition.take() {
            self.at_rest = transition.value_at(now);
        }
    }
}

/// One track per `ElementId`.
#[derive(Debug, Clone, Default)]
pub struct RotationTracks {
    tracks: [RotationTrack; ElementId::ALL.len()],
}

impl RotationTracks {
    pub fn get(&self, element: ElementId) -> &RotationTrack {
        &self.tracks[element.index()]
    }

    pub fn get_mut(&mut self, element: ElementId) -> &mut RotationTrack {
        &mut self.tracks[element.index()]
    }

    pub fn cancel_all(&mut self, now: Millis) {
        for track in &mut self.tracks {
            track.cancel(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_to_270_starts_from_360() {
        let mut track = RotationTrack::default();
        let t = track.rotate_to(270.0, 0, 400).unwrap();
        assert_eq!((t.from, t.to), (360.0, 270.0));
        assert_eq!(track.current(200), 315.0);
        assert_eq!(track.current(400), 270.0);
    }

    #[test]
    fn rest_at_270_to_zero_starts_from_minus_90() {
        let mut track = RotationTrack::default();
        track.rotate_to(270.0, 0, 400);
        let t = track.rotate_to(0.0, 1000, 400).unwrap();
        assert_eq!((t.from, t.to), (-90.0, 0.0));
    }

    #[test]
    fn in_flight_transition_is_cancelled_at_current_value() {
        let mut track = RotationTrack::default();
        track.rotate_to(90.0, 0, 400);
        let t = track.rotate_to(180.0, 200, 400).unwrap();

        assert_eq!(t.from, 45.0);
        assert_eq!(track.current(600), 180.0);
    }

    #[test]
    fn resting_at_target_starts_nothing() {
        let mut track = RotationTrack::default();
        assert_eq!(track.rotate_to(0.0, 0, 400), None);
        track.rotate_to(90.0, 0, 400);
        assert_eq!(track.rotate_to(90.0, 500, 400), None);
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let transition = Transition {
            from: 0.0,
            to: 90.0,
            started_at: 10,
            duration: 0,
        };
        assert_eq!(transition.value_at(10), 90.0);
        assert_eq!(transition.value_at(9), 90.0);
    }

    #[test]
    fn tracks_are_independent() {
        let mut tracks = RotationTracks::default();
        tracks.get_mut(ElementId::ZoomIn).rotate_to(90.0, 0, 400);
        assert_eq!(tracks.get(ElementId::ZoomIn).current(400), 90.0);
        assert_eq!(tracks.get(ElementId::ZoomOut).current(400), 0.0);
    }
}
