//! # Formcoach Pose
//!
//! Exercise-form scoring from body landmarks: a feature extractor over the
//! upper- and lower-body keypoint window, a linear softmax classifier
//! loaded from a JSON weight file, a label map, and the analyzer that ties
//! them together with a heuristic fallback for when no model file is
//! available.

#![forbid(unsafe_code)]

pub mod analyzer;
pub mod features;
pub mod labels;
pub mod linear;

pub use analyzer::{AnalysisSource, FormFeedback, PoseAnalyzer};
pub use features::{pose_features, FEATURE_COUNT, FEATURE_WINDOW};
pub use labels::LabelMap;
pub use linear::LinearClassifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
