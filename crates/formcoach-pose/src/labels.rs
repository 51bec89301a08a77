//! Class-index to exercise-name mapping.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use formcoach_core::ClassifierError;

/// Maps classifier output indices to exercise names.
///
/// Loaded from a JSON object keyed by stringified class index, e.g.
/// `{"0": "squat", "1": "push-up"}`. Unknown indices resolve to a
/// placeholder name so a model with more classes than the map never fails
/// the frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelMap {
    labels: HashMap<usize, String>,
}

impl LabelMap {
    /// Builds a map from index/name pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, String)>) -> Self {
        Self {
            labels: pairs.into_iter().collect(),
        }
    }

    /// Loads a label map from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::LabelMapLoadFailed`] if the file cannot
    /// be read or is not a string-keyed JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let fail = |reason: String| ClassifierError::LabelMapLoadFailed {
            path: path.display().to_string(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let parsed: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| fail(e.to_string()))?;

        let mut labels = HashMap::with_capacity(parsed.len());
        for (key, name) in parsed {
            match key.parse::<usize>() {
                Ok(index) => {
                    labels.insert(index, name);
                }
                Err(_) => warn!(key, "skipping non-numeric label key"),
            }
        }
        Ok(Self { labels })
    }

    /// Returns the number of mapped classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no classes are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolves a class index to its exercise name.
    ///
    /// Unmapped indices get a stable placeholder of the form `pose 7`.
    #[must_use]
    pub fn label_for(&self, index: usize) -> String {
        self.labels
            .get(&index)
            .cloned()
            .unwrap_or_else(|| format!("pose {index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_label_lookup_and_fallback() {
        let map = LabelMap::from_pairs([(0, "squat".to_string()), (1, "push-up".to_string())]);
        assert_eq!(map.label_for(0), "squat");
        assert_eq!(map.label_for(1), "push-up");
        assert_eq!(map.label_for(7), "pose 7");
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"0": "squat", "2": "lunge", "x": "bogus"}}"#).unwrap();

        let map = LabelMap::load(file.path()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.label_for(2), "lunge");
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabelMap::load("/nonexistent/labels.json").unwrap_err();
        assert!(matches!(err, ClassifierError::LabelMapLoadFailed { .. }));
        assert!(!err.is_recoverable());
    }
}
