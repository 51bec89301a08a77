//! # Formcoach Core
//!
//! Core types, traits, and errors for the formcoach gesture-coaching system.
//!
//! This crate provides the foundational building blocks used throughout the
//! formcoach workspace:
//!
//! - **Data Types**: [`Landmark`], [`HandLandmarks`], [`PoseLandmarks`],
//!   [`PageId`], [`Command`], and [`Mode`] for representing detector output
//!   and navigation state.
//!
//! - **Error Types**: a unified hierarchy via the [`error`] module, with
//!   specific error types per subsystem.
//!
//! - **Traits**: the boundary contracts [`PoseClassifier`], [`Coach`], and
//!   [`GestureObserver`] that keep the camera, the classifier model, and the
//!   language-model endpoint outside the core.
//!
//! ## Landmark indexing contract
//!
//! Hand landmarks follow the 21-point hand model: wrist = 0, fingertips =
//! {8, 12, 16, 20}, PIP joints = {6, 10, 14, 18}. A detector with a
//! different numbering must be remapped at the boundary, never inside the
//! gesture engine.
//!
//! ## Example
//!
//! ```rust
//! use formcoach_core::{Confidence, Landmark};
//!
//! let wrist = Landmark::new(0.5, 0.6, Confidence::new(0.95).unwrap());
//! assert!(wrist.is_finite());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ClassifierError, CoachError, CoreError, CoreResult, GestureError};
pub use traits::{Coach, GestureObserver, PoseClassifier, Resettable};
pub use types::{
    Axis, Command, Confidence, GestureEvent, HandLandmarks, Landmark, Mode, PageId, PoseLandmarks,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of points in the hand landmark model
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Number of points in the body landmark model
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Wrist index in the hand landmark model
pub const WRIST_INDEX: usize = 0;

/// Fingertip indices (index, middle, ring, pinky)
pub const FINGERTIP_INDICES: [usize; 4] = [8, 12, 16, 20];

/// Second-knuckle (PIP) joint indices, paired with [`FINGERTIP_INDICES`]
pub const PIP_INDICES: [usize; 4] = [6, 10, 14, 18];

/// Default visibility threshold below which a landmark is treated as unseen
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Prelude module for convenient imports.
///
/// ```rust
/// use formcoach_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ClassifierError, CoachError, CoreError, CoreResult, GestureError};
    pub use crate::traits::{Coach, GestureObserver, PoseClassifier, Resettable};
    pub use crate::types::{
        Axis, Command, Confidence, GestureEvent, HandLandmarks, Landmark, Mode, PageId,
        PoseLandmarks,
    };
}
