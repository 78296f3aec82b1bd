//! Orientation handling: capture-target rotation, decorative UI rotation, and the
//! level indicator.

pub mod level;
pub mod normalizer;
pub mod transition;

pub use level::LevelIndicator;
pub use normalizer::{OrientationNormalizer, OrientationState, RotationBucket};
pub use transition::{ElementId, RotationTrack, RotationTracks, Transition};
