//! Pinch-to-zoom ratio tracking.
//!
//! The camera owns the authoritative zoom ratio; this module keeps the last known value
//! and its bounds so pinch deltas can be applied multiplicatively without a round trip.

use crate::protocol::ControllerEvent;
use log::warn;

/// Inclusive zoom range. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f32,
    max: f32,
}

impl ZoomBounds {
    /// Build bounds, swapping inverted values. Non-finite or non-positive input falls back
    /// to `1.0`.
    pub fn new(min: f32, max: f32) -> Self {
        let sanitize = |value: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                1.0
            }
        };
        let (a, b) = (sanitize(min), sanitize(max));
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, ratio: f32) -> f32 {
        ratio.clamp(self.min, self.max)
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self::new(1.0, 10.0)
    }
}

/// Camera-level zoom state; lives for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomState {
    /// `None` until the camera reports a ratio
    pub ratio: Option<f32>,
    pub bounds: ZoomBounds,
}

#[derive(Debug, Default)]
pub struct ZoomController {
    state: ZoomState,
}

impl ZoomController {
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            state: ZoomState {
                ratio: None,
                bounds,
            },
        }
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Nothing to prepare; the arbiter already locked the session to zoom.
    pub fn on_zoom_begin(&self) {}

    /// Multiply the current ratio by `scale_factor` and clamp. An unknown ratio counts
    /// as `1.0`.
    pub fn on_zoom_delta(&mut self, scale_factor: f32) -> Option<ControllerEvent> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            warn!("ignoring invalid pinch factor {scale_factor}");
            return None;
        }
        let base = self.state.ratio.unwrap_or(1.0);
        let ratio = self.state.bounds.clamp(base * scale_factor);
        self.state.ratio = Some(ratio);
        Some(ControllerEvent::ZoomRatioChanged { ratio })
    }

    pub fn set_bounds(&mut self, bounds: ZoomBounds) {
        self.state.bounds = bounds;
        if let Some(ratio) = self.state.ratio {
            self.state.ratio = Some(bounds.clamp(ratio));
        }
    }

    /// Record the ratio reported by the camera.
    pub fn observe_ratio(&mut self, ratio: Option<f32>) {
        self.state.ratio = ratio.filter(|r| r.is_finite() && *r > 0.0);
    }
}
