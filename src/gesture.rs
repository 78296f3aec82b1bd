//! Touch session arbitration: tap, double tap, pinch zoom and four-way swipe.

pub mod arbiter;
pub mod session;

pub use arbiter::{GestureArbiter, GestureOutcome, GestureThresholds};
pub use session::{Classification, SessionPhase, SwipeDirection, TouchSession};
