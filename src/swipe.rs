//! Directional swipe routing.
//!
//! Confirmed swipes map to navigation actions, but only after a precondition gate.
//! A failed precondition is a silent no-op; so is any out-of-range carousel index.

use crate::gesture::SwipeDirection;
use crate::modes::{CaptureMode, ModeFlags};
use crate::protocol::ControllerEvent;
use log::{debug, info};

/// Inputs to the precondition gate, captured when the swipe is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwipeGate {
    pub zooming: bool,
    pub countdown_running: bool,
    pub recording: bool,
    pub panel_open: bool,
    pub video_only: bool,
}

impl SwipeGate {
    pub fn new(flags: &ModeFlags, zooming: bool) -> Self {
        Self {
            zooming,
            countdown_running: flags.countdown_running,
            recording: flags.recording,
            panel_open: flags.panel_open,
            video_only: flags.video_only,
        }
    }

    /// Whether a swipe in `direction` may act at all.
    pub fn allows(&self, direction: SwipeDirection) -> bool {
        if self.zooming || self.countdown_running {
            return false;
        }
        match direction {
            // Opening the panel is exempt from the panel-open check
            SwipeDirection::Up => !self.recording,
            SwipeDirection::Down => !self.panel_open,
            SwipeDirection::Left => !self.video_only && !self.panel_open,
            SwipeDirection::Right => !self.video_only && !self.recording && !self.panel_open,
        }
    }
}

/// Ordered capture modes with one selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeCarousel {
    modes: Vec<CaptureMode>,
    selected: usize,
}

impl ModeCarousel {
    pub fn new(modes: Vec<CaptureMode>, selected: usize) -> Self {
        let selected = selected.min(modes.len().saturating_sub(1));
        Self { modes, selected }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_mode(&self) -> Option<CaptureMode> {
        self.modes.get(self.selected).copied()
    }

    pub fn modes(&self) -> &[CaptureMode] {
        &self.modes
    }

    /// Select `index` if it exists.
    pub fn select(&mut self, index: usize) -> Option<ControllerEvent> {
        let mode = *self.modes.get(index)?;
        self.selected = index;
        info!("mode {index} ({mode}) selected");
        Some(ControllerEvent::ModeIndexChanged {
            new_index: index,
            mode,
        })
    }

    /// Move by one adjacent step; stepping off either end does nothing.
    pub fn step(&mut self, forward: bool) -> Option<ControllerEvent> {
        let index = if forward {
            self.selected.checked_add(1)?
        } else {
            self.selected.checked_sub(1)?
        };
        self.select(index)
    }
}

pub struct SwipeRouter {
    carousel: ModeCarousel,
}

impl SwipeRouter {
    pub fn new(carousel: ModeCarousel) -> Self {
        Self { carousel }
    }

    pub fn carousel(&self) -> &ModeCarousel {
        &self.carousel
    }

    pub fn select_mode(&mut self, index: usize) -> Option<ControllerEvent> {
        self.carousel.select(index)
    }

    /// Apply a confirmed swipe. Returns `None` when gated or when nothing applies.
    pub fn route(
        &mut self,
        direction: SwipeDirection,
        gate: SwipeGate,
        flags: &ModeFlags,
    ) -> Option<ControllerEvent> {
        if !gate.allows(direction) {
            debug!("swipe {direction:?} suppressed by {gate:?}");
            return None;
        }
        match direction {
            SwipeDirection::Up => Some(ControllerEvent::PanelToggled { open: true }),
            SwipeDirection::Down => {
                if flags.continuous_focus {
                    (!flags.scan_all_codes).then_some(ControllerEvent::MoreOptionsExpanded)
                } else {
                    flags
                        .action_icon_enabled
                        .then_some(ControllerEvent::ActionIconActivated)
                }
            }
            SwipeDirection::Left => self.carousel.step(true),
            SwipeDirection::Right => self.carousel.step(false),
        }
    }
}
