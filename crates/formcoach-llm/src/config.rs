//! Coach configuration.
//!
//! Loaded from a JSON file; every field has a hard default so a missing,
//! partial, or corrupt file still yields a working client against a local
//! model server.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default endpoint of a locally-running model server.
pub const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";

/// Model used when the config names none.
pub const DEFAULT_MODEL: &str = "llama3";

/// Request timeout in seconds. Coaching lines are ornamental; a slow
/// generation is dropped in favor of a fallback line.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a concise fitness coach watching a live training \
     session. Reply with one short, direct sentence of advice or \
     encouragement based on the observation you are given. No preamble.";

/// Configuration for the coaching client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Generation endpoint URL
    pub api_url: String,
    /// Model name passed to the server
    pub model: String,
    /// Base instruction prepended to every prompt
    pub system_prompt: String,
    /// Named persona flavors appended to the system prompt
    pub personas: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        let personas = HashMap::from([
            (
                "drill-sergeant".to_string(),
                "Speak like a strict drill sergeant. Short, loud, demanding.".to_string(),
            ),
            (
                "cheerleader".to_string(),
                "Be warm and enthusiastic. Celebrate every bit of progress.".to_string(),
            ),
        ]);

        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            personas,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CoachConfig {
    /// Loads configuration from a JSON file, falling back to defaults.
    ///
    /// Unknown fields are ignored and absent fields take their defaults,
    /// so a partial file is fine. An unreadable or unparsable file logs a
    /// warning and yields the full default configuration.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(error) => {
                    warn!(path = %path.display(), %error, "coach config unparsable, using defaults");
                    Self::default()
                }
            },
            Err(error) => {
                warn!(path = %path.display(), %error, "coach config unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Builds the full prompt for one piece of form feedback.
    ///
    /// An unknown persona name is ignored rather than erroring; the base
    /// system prompt alone still produces usable advice.
    #[must_use]
    pub fn prompt_for(&self, feedback: &str, persona: Option<&str>) -> String {
        let mut prompt = self.system_prompt.clone();
        if let Some(flavor) = persona.and_then(|name| self.personas.get(name)) {
            prompt.push('\n');
            prompt.push_str(flavor);
        }
        prompt.push_str("\n\nObservation: ");
        prompt.push_str(feedback);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CoachConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.personas.contains_key("cheerleader"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = CoachConfig::load("/nonexistent/coach.json");
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"model": "mistral"}}"#).unwrap();

        let config = CoachConfig::load(file.path());
        assert_eq!(config.model, "mistral");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let config = CoachConfig::load(file.path());
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_prompt_with_persona() {
        let config = CoachConfig::default();
        let prompt = config.prompt_for("knees caving inward", Some("drill-sergeant"));

        assert!(prompt.contains("drill sergeant"));
        assert!(prompt.ends_with("Observation: knees caving inward"));
    }

    #[test]
    fn test_prompt_with_unknown_persona() {
        let config = CoachConfig::default();
        let prompt = config.prompt_for("good depth", Some("pirate"));

        assert!(!prompt.contains("pirate"));
        assert!(prompt.contains("Observation: good depth"));
    }
}
