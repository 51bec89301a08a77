//! Form analysis on top of the classifier.
//!
//! [`PoseAnalyzer`] is the component the application talks to. At startup
//! it tries to load the exported model weights and label map; when either
//! file is absent it degrades to a landmark heuristic instead of refusing
//! to run, so the rest of the system behaves identically with or without
//! a trained model on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use formcoach_core::{ClassifierError, Confidence, PoseClassifier, PoseLandmarks};

use crate::labels::LabelMap;
use crate::linear::LinearClassifier;

/// Nose landmark of the 33-point body model, used by the heuristic.
const NOSE_INDEX: usize = 0;

/// Nose height above which the heuristic reads the posture as upright.
/// Y grows downward, so smaller means higher in frame.
const UPRIGHT_NOSE_Y: f64 = 0.45;

/// Classifier confidence below which the analyzer reports the form as
/// uncertain rather than naming an exercise.
const MIN_CONFIDENCE: f32 = 0.5;

/// Where a feedback item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    /// Scored by the trained model
    Model,
    /// Produced by the landmark heuristic fallback
    Heuristic,
}

/// One frame's form assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFeedback {
    /// Recognized exercise name, or a posture description in heuristic mode
    pub exercise: String,
    /// Score confidence
    pub confidence: Confidence,
    /// Whether the model or the fallback produced this
    pub source: AnalysisSource,
    /// Short status line suitable for the overlay and the coach prompt
    pub summary: String,
}

/// Scores body landmarks into form feedback.
pub struct PoseAnalyzer {
    classifier: Option<Box<dyn PoseClassifier>>,
    labels: LabelMap,
}

impl std::fmt::Debug for PoseAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseAnalyzer")
            .field("has_model", &self.classifier.is_some())
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl PoseAnalyzer {
    /// Loads the model and label files, degrading to the heuristic when
    /// either is missing or unreadable.
    #[must_use]
    pub fn bootstrap(model_path: impl AsRef<Path>, labels_path: impl AsRef<Path>) -> Self {
        let labels = match LabelMap::load(labels_path.as_ref()) {
            Ok(labels) => labels,
            Err(error) => {
                warn!(%error, "label map unavailable, using index placeholders");
                LabelMap::default()
            }
        };

        match LinearClassifier::load(model_path.as_ref()) {
            Ok(model) => {
                info!(classes = model.class_count(), "pose model loaded");
                Self::with_classifier(model, labels)
            }
            Err(error) => {
                warn!(%error, "pose model unavailable, falling back to heuristic");
                Self::heuristic_only(labels)
            }
        }
    }

    /// Builds an analyzer around an existing classifier.
    #[must_use]
    pub fn with_classifier(classifier: impl PoseClassifier + 'static, labels: LabelMap) -> Self {
        Self {
            classifier: Some(Box::new(classifier)),
            labels,
        }
    }

    /// Builds an analyzer that only runs the landmark heuristic.
    #[must_use]
    pub fn heuristic_only(labels: LabelMap) -> Self {
        Self {
            classifier: None,
            labels,
        }
    }

    /// Returns `true` if a trained model backs this analyzer.
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.classifier.as_ref().is_some_and(|c| c.is_ready())
    }

    /// Assesses one frame of body landmarks.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifierError`] when the landmarks cannot be scored;
    /// all such errors are recoverable per frame.
    pub fn analyze(&self, pose: &PoseLandmarks) -> Result<FormFeedback, ClassifierError> {
        if let Some(classifier) = self.classifier.as_ref().filter(|c| c.is_ready()) {
            let (class, confidence) = classifier.classify(pose)?;
            let exercise = self.labels.label_for(class);
            let summary = if confidence.exceeds(MIN_CONFIDENCE) {
                format!("{exercise} detected, form tracking active")
            } else {
                format!("possibly {exercise}, hold the position steady")
            };
            return Ok(FormFeedback {
                exercise,
                confidence,
                source: AnalysisSource::Model,
                summary,
            });
        }

        self.heuristic(pose)
    }

    /// Nose-height posture read, used when no model is available.
    fn heuristic(&self, pose: &PoseLandmarks) -> Result<FormFeedback, ClassifierError> {
        let nose = pose
            .get(NOSE_INDEX)
            .ok_or(ClassifierError::MissingLandmarks {
                required: NOSE_INDEX,
                available: pose.len(),
            })?;

        let (exercise, summary) = if nose.y < UPRIGHT_NOSE_Y {
            ("standing", "posture upright, form looks good")
        } else {
            ("crouched", "body position low, keep your back straight")
        };

        Ok(FormFeedback {
            exercise: exercise.to_string(),
            confidence: Confidence::saturating(0.5),
            source: AnalysisSource::Heuristic,
            summary: summary.to_string(),
        })
    }
}
