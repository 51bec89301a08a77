//! Linear softmax classifier over pose features.
//!
//! Weights are exported offline from the trained model into a JSON file
//! holding a class-by-feature matrix and a per-class bias vector. Scoring
//! is a matrix-vector product followed by a softmax; the runtime carries
//! no training code.

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;

use formcoach_core::{ClassifierError, Confidence, PoseClassifier, PoseLandmarks};

use crate::features::{pose_features, FEATURE_COUNT};

/// On-disk weight file layout.
#[derive(Debug, Deserialize)]
struct WeightFile {
    /// Class-by-feature weight matrix
    weights: Vec<Vec<f32>>,
    /// Per-class bias
    bias: Vec<f32>,
}

/// A linear softmax classifier implementing [`PoseClassifier`].
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: Array2<f32>,
    bias: Array1<f32>,
}

impl LinearClassifier {
    /// Builds a classifier from an in-memory weight matrix and bias.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::ShapeMismatch`] if the matrix width is
    /// not the feature count or the bias length is not the class count.
    pub fn new(weights: Array2<f32>, bias: Array1<f32>) -> Result<Self, ClassifierError> {
        let (classes, width) = weights.dim();
        if width != FEATURE_COUNT {
            return Err(ClassifierError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: width,
            });
        }
        if bias.len() != classes {
            return Err(ClassifierError::ShapeMismatch {
                expected: classes,
                actual: bias.len(),
            });
        }
        if classes == 0 {
            return Err(ClassifierError::EmptyScores);
        }
        Ok(Self { weights, bias })
    }

    /// Loads classifier weights from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::ModelLoadFailed`] if the file cannot be
    /// read or parsed, and [`ClassifierError::ShapeMismatch`] if the
    /// parsed matrix has the wrong dimensions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let fail = |reason: String| ClassifierError::ModelLoadFailed {
            path: path.display().to_string(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let file: WeightFile = serde_json::from_str(&raw).map_err(|e| fail(e.to_string()))?;

        let classes = file.weights.len();
        let width = file.weights.first().map_or(0, Vec::len);
        if file.weights.iter().any(|row| row.len() != width) {
            return Err(fail("ragged weight matrix".to_string()));
        }

        let flat: Vec<f32> = file.weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((classes, width), flat)
            .map_err(|e| fail(e.to_string()))?;
        Self::new(weights, Array1::from_vec(file.bias))
    }

    /// Returns the number of output classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.weights.dim().0
    }

    /// Softmax over the raw class scores.
    fn softmax(scores: &Array1<f32>) -> Array1<f32> {
        // Shift by the max for numerical stability.
        let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp = scores.mapv(|s| (s - max).exp());
        let sum = exp.sum();
        exp / sum
    }
}

impl PoseClassifier for LinearClassifier {
    fn is_ready(&self) -> bool {
        true
    }

    fn classify(&self, pose: &PoseLandmarks) -> Result<(usize, Confidence), ClassifierError> {
        let features = pose_features(pose)?;
        let scores = self.weights.dot(&features) + &self.bias;
        let probabilities = Self::softmax(&scores);

        let (best, probability) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(ClassifierError::EmptyScores)?;

        Ok((best, Confidence::saturating(probability)))
    }
}
