//! # Formcoach Gesture
//!
//! Gesture recognition for the formcoach system: the fist detector, the
//! swipe state machine, the command router, and the shared navigation
//! state they cooperate through.
//!
//! The pipeline per captured frame is:
//!
//! ```text
//! landmark detector -> is_fist -> GestureEngine -> CommandRouter -> SystemState
//! ```
//!
//! with a feedback loop: the engine reads the page the router wrote on the
//! previous frame, because the reversal and purity rules are
//! page-dependent.
//!
//! The engine consumes a noisy, continuous stream of hand-landmark
//! coordinates and emits discrete, debounced navigation commands: an
//! anchor is captured at the fist's rising edge, displacement from that
//! anchor is measured each frame, and a cooldown suppresses re-triggering
//! on the same physical motion.

#![forbid(unsafe_code)]

pub mod engine;
pub mod fist;
pub mod pipeline;
pub mod router;
pub mod state;

pub use engine::{EngineStats, GestureConfig, GestureConfigBuilder, GestureEngine};
pub use fist::{curled_finger_count, is_fist};
pub use pipeline::{FrameOutcome, FramePipeline};
pub use router::{CommandRouter, PageTransition};
pub use state::SystemState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
