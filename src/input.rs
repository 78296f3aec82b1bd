//! Input primitives and trace parsing.
//!
//! The host feeds pointer, key and sensor samples through `ControllerInput`; this module
//! holds the primitive value types plus the line-oriented trace format used for replays.

pub mod pointer;
pub mod trace;

pub use pointer::{HardwareKey, KeyPhase, PointerEvent, PointerPhase, Position, Velocity};
pub use trace::{parse_trace, TimedInput, TraceStep};
