//! Error types for the formcoach system.
//!
//! This module provides the error hierarchy used across the workspace,
//! built on [`thiserror`] for automatic `Display` and `Error`
//! implementations.
//!
//! # Error Hierarchy
//!
//! - [`CoreError`]: Top-level error type that encompasses all subsystem errors
//! - [`GestureError`]: Errors at the gesture-input boundary
//! - [`ClassifierError`]: Errors from pose classification
//! - [`CoachError`]: Errors from the language-model coach client
//!
//! Gesture-path errors are absorbed frame-locally (a bad frame contributes
//! nothing); the hierarchy exists for the boundaries that load files or
//! talk to the network.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the formcoach system.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Gesture input boundary error
    #[error("Gesture error: {0}")]
    Gesture(#[from] GestureError),

    /// Pose classification error
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Coach client error
    #[error("Coach error: {0}")]
    Coach(#[from] CoachError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl CoreError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Gesture(e) => e.is_recoverable(),
            Self::Classifier(e) => e.is_recoverable(),
            Self::Coach(e) => e.is_recoverable(),
            Self::Configuration { .. } | Self::Validation { .. } => false,
        }
    }
}

/// Errors at the gesture-input boundary.
///
/// None of these is fatal: the per-frame path recovers by treating the
/// offending frame as "no hand / not activated".
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GestureError {
    /// Landmark sequence shorter than the indices the hand model requires
    #[error("Malformed landmarks: need at least {required} points, got {available}")]
    MalformedLandmarks {
        /// Minimum required points
        required: usize,
        /// Available points
        available: usize,
    },

    /// A landmark carried a NaN or infinite coordinate
    #[error("Non-finite coordinate at landmark index {index}")]
    NonFiniteCoordinate {
        /// Index of the offending landmark
        index: usize,
    },

    /// A page name at a string boundary was not a known page
    #[error("Inconsistent page state: unknown page '{name}'")]
    InconsistentPageState {
        /// The unrecognized page name
        name: String,
    },
}

impl GestureError {
    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        // Every gesture-boundary error degrades to "no command this frame".
        true
    }
}

/// Errors from pose classification.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClassifierError {
    /// Landmark set too short for feature extraction
    #[error("Missing landmarks: feature window needs points up to index {required}, got {available}")]
    MissingLandmarks {
        /// Highest landmark index the feature window reads
        required: usize,
        /// Available points
        available: usize,
    },

    /// Feature vector does not match the model's expected input width
    #[error("Feature shape mismatch: model expects {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected feature count
        expected: usize,
        /// Actual feature count
        actual: usize,
    },

    /// Model weights could not be loaded
    #[error("Failed to load model from '{path}': {reason}")]
    ModelLoadFailed {
        /// Path to the model file
        path: String,
        /// Reason for the failure
        reason: String,
    },

    /// Label map could not be loaded
    #[error("Failed to load label map from '{path}': {reason}")]
    LabelMapLoadFailed {
        /// Path to the label file
        path: String,
        /// Reason for the failure
        reason: String,
    },

    /// Model produced no class scores
    #[error("Classifier produced an empty score vector")]
    EmptyScores,
}

impl ClassifierError {
    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::MissingLandmarks { .. } | Self::EmptyScores => true,
            Self::ShapeMismatch { .. }
            | Self::ModelLoadFailed { .. }
            | Self::LabelMapLoadFailed { .. } => false,
        }
    }
}

/// Errors from the language-model coach client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoachError {
    /// Config file missing or unreadable; defaults were applied
    #[error("Failed to read coach config '{path}': {reason}")]
    ConfigUnreadable {
        /// Path to the config file
        path: String,
        /// Reason for the failure
        reason: String,
    },

    /// The HTTP request could not be completed
    #[error("Coach request failed: {reason}")]
    RequestFailed {
        /// Transport-level failure description
        reason: String,
    },

    /// The endpoint answered with a non-success status
    #[error("Coach endpoint returned status {status}")]
    BadStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response body did not carry the expected advice field
    #[error("Malformed coach response: {reason}")]
    MalformedResponse {
        /// Description of the problem
        reason: String,
    },
}

impl CoachError {
    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        // The coach degrades to a fallback advice line in every case.
        true
    }
}
