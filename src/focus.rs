//! Tap-to-focus, continuous auto-recenter, and the focus ring.

pub mod controller;
pub mod ring;

pub use controller::{
    FocusController, FocusOrigin, FocusPoint, FocusRequest, FocusState, PreviewGeometry,
};
pub use ring::FocusRing;
