//! Mode and state flags owned by external collaborators.
//!
//! The recorder, the settings panel and the capture-mode switcher flip these flags; the
//! controller only reads a snapshot at the start of each handler.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A capture mode reachable through the mode carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CaptureMode {
    Camera,
    Video,
    QrScan,
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CaptureMode::Camera => "camera",
            CaptureMode::Video => "video",
            CaptureMode::QrScan => "qr_scan",
        };
        f.write_str(label)
    }
}

/// Snapshot of every flag the controller consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    /// Continuous code scanning: periodic auto-recenter focus, scan-specific swipe handling
    pub continuous_focus: bool,
    /// A video recording is in progress
    pub recording: bool,
    /// The settings/options panel is open
    pub panel_open: bool,
    /// Restricted host variant that only records video
    pub video_only: bool,
    /// Scanner looks for every code format instead of the selected ones
    pub scan_all_codes: bool,
    /// System auto-rotate setting; when off, decorative rotation snaps back to 0°
    pub auto_rotate: bool,
    /// Video capture mode is selected
    pub video_mode: bool,
    /// A countdown-capture timer is running
    pub countdown_running: bool,
    /// The settings action icon accepts activation
    pub action_icon_enabled: bool,
    /// System animator scale is non-zero
    pub animations_enabled: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            continuous_focus: false,
            recording: false,
            panel_open: false,
            video_only: false,
            scan_all_codes: false,
            auto_rotate: true,
            video_mode: false,
            countdown_running: false,
            action_icon_enabled: true,
            animations_enabled: true,
        }
    }
}

/// Names a single boolean in `ModeFlags`, for replays and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeFlag {
    ContinuousFocus,
    Recording,
    PanelOpen,
    VideoOnly,
    ScanAllCodes,
    AutoRotate,
    VideoMode,
    CountdownRunning,
    ActionIconEnabled,
    AnimationsEnabled,
}

impl ModeFlag {
    pub fn parse(name: &str) -> Option<Self> {
        let flag = match name {
            "continuous_focus" => ModeFlag::ContinuousFocus,
            "recording" => ModeFlag::Recording,
            "panel_open" => ModeFlag::PanelOpen,
            "video_only" => ModeFlag::VideoOnly,
            "scan_all_codes" => ModeFlag::ScanAllCodes,
            "auto_rotate" => ModeFlag::AutoRotate,
            "video_mode" => ModeFlag::VideoMode,
            "countdown_running" => ModeFlag::CountdownRunning,
            "action_icon_enabled" => ModeFlag::ActionIconEnabled,
            "animations_enabled" => ModeFlag::AnimationsEnabled,
            _ => return None,
        };
        Some(flag)
    }

    pub fn set(self, flags: &mut ModeFlags, value: bool) {
        let slot = match self {
            ModeFlag::ContinuousFocus => &mut flags.continuous_focus,
            ModeFlag::Recording => &mut flags.recording,
            ModeFlag::PanelOpen => &mut flags.panel_open,
            ModeFlag::VideoOnly => &mut flags.video_only,
            ModeFlag::ScanAllCodes => &mut flags.scan_all_codes,
            ModeFlag::AutoRotate => &mut flags.auto_rotate,
            ModeFlag::VideoMode => &mut flags.video_mode,
            ModeFlag::CountdownRunning => &mut flags.countdown_running,
            ModeFlag::ActionIconEnabled => &mut flags.action_icon_enabled,
            ModeFlag::AnimationsEnabled => &mut flags.animations_enabled,
        };
        *slot = value;
    }
}

/// Cloneable handle to the shared flags.
#[derive(Debug, Clone, Default)]
pub struct ModeHandle {
    inner: Arc<RwLock<ModeFlags>>,
}

impl ModeHandle {
    pub fn new(flags: ModeFlags) -> Self {
        Self {
            inner: Arc::new(RwLock::new(flags)),
        }
    }

    pub fn snapshot(&self) -> ModeFlags {
        *self.inner.read()
    }

    /// Mutate the flags in place. Controllers notice the change on their next handler
    /// or on an explicit `ControllerInput::ModesChanged`.
    pub fn update(&self, f: impl FnOnce(&mut ModeFlags)) {
        let mut guard = self.inner.write();
        f(&mut guard);
    }
}
