//! Controller tuning knobs.
//!
//! Defaults mirror the behavior of the stock camera app. With the `config` feature a
//! partial TOML file can override any field:
//!
//! ```toml
//! swipe_distance = 120.0
//! recenter_interval = 1500
//! modes = ["camera", "video"]
//! ```

use crate::error::{Result, ViewfinderError};
use crate::modes::CaptureMode;
use crate::time::Millis;

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Thresholds, durations and mode list used by every controller component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize), serde(default))]
pub struct ControllerConfig {
    /// Minimum dominant-axis displacement for a release to count as a swipe
    pub swipe_distance: f32,
    /// Minimum dominant-axis fling velocity for a swipe
    pub swipe_velocity: f32,
    /// Maximum gap between two releases that form a double tap
    pub double_tap_window: Millis,
    /// Maximum distance between two releases that form a double tap
    pub double_tap_slop: f32,
    /// Auto-recenter interval in continuous-focus mode
    pub recenter_interval: Millis,
    /// Auto-cancel duration for tap-to-focus requests; 0 keeps them until superseded
    pub focus_auto_cancel: Millis,
    /// How long the focus ring stays fully visible before fading
    pub focus_ring_delay: Millis,
    /// Duration of the focus ring fade
    pub focus_ring_fade: Millis,
    /// Duration of every decorative rotation transition
    pub rotation_transition: Millis,
    /// Square edge, in pixels, that thumbnails are decoded into
    pub thumbnail_side: u32,
    /// Number of decoded thumbnails kept by the worker
    pub thumbnail_cache: usize,
    /// Ordered capture modes reachable by horizontal swipes
    pub modes: Vec<CaptureMode>,
    /// Index into `modes` selected at startup
    pub initial_mode: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            swipe_distance: 100.0,
            swipe_velocity: 100.0,
            double_tap_window: 300,
            double_tap_slop: 100.0,
            recenter_interval: 2000,
            focus_auto_cancel: 0,
            focus_ring_delay: 500,
            focus_ring_fade: 300,
            rotation_transition: 400,
            thumbnail_side: 96,
            thumbnail_cache: 16,
            modes: vec![CaptureMode::Camera, CaptureMode::Video, CaptureMode::QrScan],
            initial_mode: 0,
        }
    }
}

impl ControllerConfig {
    /// Total time the focus ring is visible: hold plus fade.
    pub fn focus_ring_total(&self) -> Millis {
        self.focus_ring_delay.saturating_add(self.focus_ring_fade)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.swipe_distance.is_finite() && self.swipe_distance > 0.0) {
            return Err(ViewfinderError::config("swipe_distance must be positive"));
        }
        if !(self.swipe_velocity.is_finite() && self.swipe_velocity > 0.0) {
            return Err(ViewfinderError::config("swipe_velocity must be positive"));
        }
        if !(self.double_tap_slop.is_finite() && self.double_tap_slop >= 0.0) {
            return Err(ViewfinderError::config(
                "double_tap_slop must be zero or positive",
            ));
        }
        if self.recenter_interval == 0 {
            return Err(ViewfinderError::config(
                "recenter_interval must be at least 1 ms",
            ));
        }
        if self.modes.is_empty() {
            return Err(ViewfinderError::config("modes must not be empty"));
        }
        if self.initial_mode >= self.modes.len() {
            return Err(ViewfinderError::config(format!(
                "initial_mode {} is out of range for {} modes",
                self.initial_mode,
                self.modes.len()
            )));
        }
        if self.thumbnail_cache == 0 {
            return Err(ViewfinderError::config("thumbnail_cache must be at least 1"));
        }
        Ok(())
    }

    /// Load a TOML file layered over the defaults.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ViewfinderError::FileError {
            message: format!("Failed to read {}", path.display()),
            source,
        })?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| ViewfinderError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::info!("Loaded controller config from {}", path.display());
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/viewfinder/config.toml` or the platform equivalent.
    #[cfg(feature = "config")]
    pub fn default_path() -> Result<PathBuf> {
        let relative = PathBuf::from("viewfinder").join("config.toml");
        dirs::config_dir()
            .map(|dir| dir.join(&relative))
            .ok_or(ViewfinderError::NoConfigDir { path: relative })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.focus_ring_total(), 800);
    }

    #[test]
    fn rejects_out_of_range_initial_mode() {
        let config = ControllerConfig {
            initial_mode: 3,
            ..ControllerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("initial_mode 3"));
    }

    #[test]
    fn rejects_zero_swipe_threshold() {
        let config = ControllerConfig {
            swipe_distance: 0.0,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_recenter_interval() {
        let config = ControllerConfig {
            recenter_interval: 0,
            ..ControllerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("recenter_interval"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn zero_recenter_interval_in_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");
        std::fs::write(file.path(), "recenter_interval = 0\n").expect("write config");

        assert!(ControllerConfig::load(file.path()).is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_file_overrides_defaults() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");
        std::fs::write(
            file.path(),
            "recenter_interval = 1500\nmodes = [\"camera\", \"video\"]\n",
        )
        .expect("write config");

        let config = ControllerConfig::load(file.path()).expect("load config");
        assert_eq!(config.recenter_interval, 1500);
        assert_eq!(config.modes, vec![CaptureMode::Camera, CaptureMode::Video]);
        assert_eq!(config.swipe_distance, 100.0);
    }
}
