//! Device angle to capture rotation and decorative rotation.

use crate::modes::ModeFlags;
use crate::orientation::transition::{ElementId, RotationTracks};
use crate::protocol::ControllerEvent;
use crate::time::Millis;
use log::warn;

/// Rotation applied to capture targets (image, video and analysis streams).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationBucket {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationBucket {
    /// Quantize a device angle. Lower bounds are inclusive.
    pub fn from_angle(angle: f32) -> Self {
        let angle = angle.rem_euclid(360.0);
        if (45.0..135.0).contains(&angle) {
            RotationBucket::Deg270
        } else if (135.0..225.0).contains(&angle) {
            RotationBucket::Deg180
        } else if (225.0..315.0).contains(&angle) {
            RotationBucket::Deg90
        } else {
            RotationBucket::Deg0
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            RotationBucket::Deg0 => 0,
            RotationBucket::Deg90 => 90,
            RotationBucket::Deg180 => 180,
            RotationBucket::Deg270 => 270,
        }
    }
}

/// Last observed orientation inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationState {
    pub last_raw: Option<f32>,
    pub bucket: Option<RotationBucket>,
    /// Target last applied to elements that respect auto-rotate
    pub decorative: f32,
    pub auto_rotate: bool,
}

pub struct OrientationNormalizer {
    state: OrientationState,
    tracks: RotationTracks,
    transition: Millis,
}

impl OrientationNormalizer {
    pub fn new(transition: Millis) -> Self {
        Self {
            state: OrientationState::default(),
            tracks: RotationTracks::default(),
            transition,
        }
    }

    pub fn state(&self) -> OrientationState {
        self.state
    }

    pub fn tracks(&self) -> &RotationTracks {
        &self.tracks
    }

    /// Handle one raw angle sample.
    ///
    /// The bucket is always recomputed; while recording, both the capture and the
    /// decorative tracks are frozen.
    pub fn on_sample(
        &mut self,
        angle: f32,
        flags: &ModeFlags,
        now: Millis,
        out: &mut Vec<ControllerEvent>,
    ) {
        if !angle.is_finite() {
            warn!("dropping non-finite orientation sample");
            return;
        }
        let angle = angle.rem_euclid(360.0);
        let bucket = RotationBucket::from_angle(angle);
        self.state.last_raw = Some(angle);
        self.state.bucket = Some(bucket);
        self.state.auto_rotate = flags.auto_rotate;

        if flags.recording {
            return;
        }

        out.push(ControllerEvent::CaptureRotationChanged { bucket });

        // Ornaments follow the quantized bucket so jitter inside a bucket is silent
        let decorative = f32::from(bucket.degrees());
        let locked = if flags.auto_rotate { decorative } else { 0.0 };
        self.state.decorative = locked;

        for element in ElementId::ALL {
            let target = if element.respects_auto_rotate() {
                locked
            } else {
                decorative
            };
            let track = self.tracks.get_mut(element);
            if let Some(transition) = track.rotate_to(target, now, self.transition) {
                out.push(ControllerEvent::DecorativeRotationChanged {
                    element,
                    from: transition.from,
                    angle: transition.to,
                    duration: transition.duration,
                });
            }
        }
    }

    /// Re-apply the last sample, e.g. once a recording ends.
    pub fn resync(&mut self, flags: &ModeFlags, now: Millis, out: &mut Vec<ControllerEvent>) {
        if let Some(angle) = self.state.last_raw {
            self.on_sample(angle, flags, now, out);
        }
    }

    pub fn cancel_transitions(&mut self, now: Millis) {
        self.tracks.cancel_all(now);
    }
}
