//! # viewfinder - Camera Viewfinder Interaction Controller
//!
//! Turns raw touch, sensor and key input from a camera preview into capture-pipeline
//! requests: tap-to-focus, pinch zoom, swipe navigation between capture modes,
//! orientation-driven UI rotation, and the last-captured thumbnail.
//!
//! ## Architecture
//!
//! - [`app`] - `Controller`, the single arbitration entry point, and its tokio runtime
//! - [`gesture`] - touch session classification
//! - [`focus`] / [`zoom`] / [`swipe`] - gesture consumers
//! - [`orientation`] - capture rotation buckets, decorative rotation tracks, level indicator
//! - [`thumbnail`] - background decoding with stale-result suppression
//! - [`protocol`] - typed inputs and outbound events
//! - [`host`] - sensor and capture-pipeline seams
//!
//! Time is logical: every handler takes `now` in milliseconds, so the controller can be
//! driven deterministically from tests or recorded traces.

pub mod error;
pub mod config;
pub mod time;

pub mod host;
pub mod input;
pub mod modes;
pub mod protocol;

pub mod focus;
pub mod gesture;
pub mod orientation;
pub mod swipe;
pub mod thumbnail;
pub mod zoom;

pub mod app;

pub use error::{Result, ViewfinderError};

pub use app::runtime::run_controller;
pub use app::Controller;
pub use config::ControllerConfig;
pub use modes::{CaptureMode, ModeFlag, ModeFlags, ModeHandle};
pub use protocol::{ControllerEvent, ControllerInput};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
