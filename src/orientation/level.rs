//! Level indicator driven by device roll and pitch.

use crate::modes::ModeFlags;
use crate::protocol::ControllerEvent;

/// Pitch beyond this is drawn at the edge of the indicator.
const MAX_PITCH: f32 = 45.0;
/// Pitch that maps to one full `PITCH_SPAN` of offset.
const PITCH_SCALE: f32 = 60.0;
/// Offset, in density-independent units, of the pitch line at `PITCH_SCALE` degrees.
const PITCH_SPAN: f32 = 32.0;

#[derive(Debug, Default)]
pub struct LevelIndicator {
    last_tilt: Option<f32>,
}

impl LevelIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one roll/pitch sample. Hidden in video mode and during a countdown.
    pub fn on_tilt(
        &mut self,
        x_angle: f32,
        z_angle: f32,
        flags: &ModeFlags,
        out: &mut Vec<ControllerEvent>,
    ) {
        if flags.video_mode || flags.countdown_running {
            return;
        }
        if !(x_angle.is_finite() && z_angle.is_finite()) {
            return;
        }

        let tilt_changed = self.last_tilt != Some(x_angle);
        self.last_tilt = Some(x_angle);

        let pitch = z_angle.clamp(-MAX_PITCH, MAX_PITCH);
        out.push(ControllerEvent::LevelIndicatorChanged {
            tilt: x_angle,
            label_degrees: x_angle.abs() as u32,
            level: x_angle == 0.0,
            pitch_offset: pitch / PITCH_SCALE * PITCH_SPAN,
            pitch_level: z_angle.trunc() == 0.0,
        });

        if tilt_changed && x_angle == 0.0 {
            out.push(ControllerEvent::HapticPulse);
        }
    }

    pub fn reset(&mut self) {
        self.last_tilt = None;
    }
}
