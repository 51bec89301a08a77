//! # Formcoach LLM
//!
//! The coaching voice of the system: a client for a locally-served
//! language model that turns per-frame form feedback into one short line
//! of encouragement or correction, under a configurable persona.
//!
//! The client is deliberately forgiving. Configuration falls back to
//! built-in defaults when the file is missing or broken, and a failed or
//! slow generation degrades to a canned line rather than an error, so the
//! training session never stalls on the model.

#![forbid(unsafe_code)]

pub mod config;
pub mod ollama;

pub use config::CoachConfig;
pub use ollama::OllamaCoach;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
