//! Typed messages crossing the controller boundary.
//!
//! Everything the host delivers goes through a single `ControllerInput` enum handled by
//! `Controller::handle`; everything the controller asks of its collaborators comes back
//! as `ControllerEvent`s.

use crate::focus::{FocusOrigin, FocusPoint};
use crate::input::{HardwareKey, KeyPhase, PointerEvent, Position};
use crate::modes::CaptureMode;
use crate::orientation::{ElementId, RotationBucket};
use crate::thumbnail::{MediaItem, RequestId, Thumbnail, ThumbnailResponse};
use crate::time::Millis;

/// Inbound events, delivered serially on the controller's event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerInput {
    /// Host became visible/foreground
    Activate,
    /// Host was backgrounded/hidden
    Deactivate,
    Pointer(PointerEvent),
    /// Pinch scale factor from the platform scale detector
    Pinch { factor: f32 },
    /// Raw device angle in degrees, `[0, 360)`
    OrientationSample { angle: f32 },
    /// Device roll (`x_angle`) and pitch (`z_angle`) for the level indicator
    DeviceTilt { x_angle: f32, z_angle: f32 },
    Key { key: HardwareKey, phase: KeyPhase },
    PreviewResized { width: f32, height: f32 },
    /// Camera reported its zoom range, e.g. after switching lenses
    ZoomBoundsChanged { min: f32, max: f32 },
    /// Camera reported its current zoom ratio; `None` when unknown
    ZoomRatioReported { ratio: Option<f32> },
    /// Programmatic focus request in preview-normalized coordinates
    FocusAt { point: FocusPoint, auto_cancel: Millis },
    /// Direct selection in the mode carousel (tab tap)
    SelectMode(usize),
    /// Shared mode flags were changed by a collaborator
    ModesChanged,
    /// The "last captured item" changed; `None` clears the thumbnail
    ShowThumbnail(Option<MediaItem>),
    /// A decode posted back from the thumbnail worker
    ThumbnailDecoded(ThumbnailResponse),
}

/// Outbound notifications for collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    FocusRequested {
        point: FocusPoint,
        auto_cancel: Millis,
        origin: FocusOrigin,
    },
    FocusSoundRequested,
    /// Exposure and zoom bars should slide in after a tap-to-focus
    AdjustmentPanelsShown,
    FocusRingShown {
        position: Position,
        animated: bool,
        hold: Millis,
        fade: Millis,
    },
    FocusRingHidden,
    ZoomRatioChanged {
        ratio: f32,
    },
    ModeIndexChanged {
        new_index: usize,
        mode: CaptureMode,
    },
    PanelToggled {
        open: bool,
    },
    MoreOptionsExpanded,
    ActionIconActivated,
    CaptureRotationChanged {
        bucket: RotationBucket,
    },
    DecorativeRotationChanged {
        element: ElementId,
        /// Starting rotation after the continuity fix-up
        from: f32,
        angle: f32,
        duration: Millis,
    },
    LevelIndicatorChanged {
        tilt: f32,
        label_degrees: u32,
        level: bool,
        pitch_offset: f32,
        pitch_level: bool,
    },
    HapticPulse,
    CaptureRequested,
    RecordingStopRequested,
    ThumbnailCleared,
    ThumbnailDecodeRequested {
        request_id: RequestId,
        item: MediaItem,
        side: u32,
    },
    ThumbnailUpdated {
        item: MediaItem,
        thumbnail: Thumbnail,
    },
    /// Activation could not acquire the sensor or the capture pipeline; the host
    /// decides whether to retry
    ActivationFailed {
        reason: String,
    },
}
