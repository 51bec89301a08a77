//! Boundary trait definitions for the formcoach system.
//!
//! These traits keep the external collaborators — the pose-classification
//! model and the language-model coach — outside the gesture core, and give
//! tests a seam to observe the engine without a logging framework.
//!
//! # Traits
//!
//! - [`PoseClassifier`]: score a body landmark set into an exercise class
//! - [`Coach`]: asynchronously turn a status string into advice text
//! - [`GestureObserver`]: receive gesture engine state transitions
//! - [`Resettable`]: reset a component to its initial state

use async_trait::async_trait;

use crate::error::ClassifierError;
use crate::types::{Confidence, GestureEvent, PoseLandmarks};

/// Pose classification boundary.
///
/// Implementations wrap whatever model backs exercise-form scoring; the
/// rest of the system only sees a class index and a confidence. Index to
/// label mapping is a separate concern (see the pose crate's label map).
pub trait PoseClassifier: Send + Sync {
    /// Returns `true` if a model is loaded and ready to score.
    fn is_ready(&self) -> bool;

    /// Scores a landmark set into `(class_index, confidence)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the landmark set cannot be featurized or the
    /// model rejects the feature shape.
    fn classify(&self, pose: &PoseLandmarks) -> Result<(usize, Confidence), ClassifierError>;
}

/// Language-model coaching boundary.
///
/// The contract toward the core is deliberately infallible: given a status
/// string, the implementation asynchronously returns advice text or a
/// fallback string. Callers fire-and-forget; the gesture path never awaits
/// this.
#[async_trait]
pub trait Coach: Send + Sync {
    /// Produces one short line of coaching advice for the given form
    /// feedback, optionally under a named persona.
    async fn advise(&self, feedback: &str, persona: Option<&str>) -> String;
}

/// Observer for gesture engine state transitions.
///
/// Injected as an optional callback so tests can assert on anchor capture,
/// reversal adjustments, and command emission without coupling the engine
/// to a logging framework.
pub trait GestureObserver: Send {
    /// Called once per state transition, in emission order.
    fn on_event(&mut self, event: &GestureEvent);
}

impl<F> GestureObserver for F
where
    F: FnMut(&GestureEvent) + Send,
{
    fn on_event(&mut self, event: &GestureEvent) {
        self(event);
    }
}

/// Trait for types that can be reset to a default state.
pub trait Resettable {
    /// Resets the instance to its initial state.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Command;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: &GestureEvent| seen.push(*event);
            observer.on_event(&GestureEvent::AnchorSet { x: 0.5, y: 0.5 });
            observer.on_event(&GestureEvent::CommandEmitted {
                command: Command::Close,
                cooldown_frames: 15,
            });
        }
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], GestureEvent::AnchorSet { .. }));
    }
}
