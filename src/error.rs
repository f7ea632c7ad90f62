//! Error types for the promptgen CLI.
//!
//! Uses thiserror for derive macros. Every variant is fatal and maps to its
//! own exit code so a scheduled job can tell failure classes apart.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptgen operations.
#[derive(Error, Debug)]
pub enum PromptgenError {
    /// Missing or invalid configuration, reported before any network call.
    #[error("{0}")]
    Config(String),

    /// Reading or writing a local file failed.
    #[error("{0}")]
    Io(String),

    /// The remote call returned a non-success status or did not complete.
    #[error("Model request failed: {0}")]
    Transport(String),

    /// The remote text could not be recovered as a JSON array.
    #[error("Model output was not valid JSON: {detail}\nRaw output:\n{raw}")]
    ModelOutput { detail: String, raw: String },

    /// Filtering dropped every element of the parsed array.
    #[error("No prompts parsed from model output.")]
    NoCandidates,

    /// The target document does not contain the marker pair.
    #[error("Markers not found in {0}; ensure they exist before running.")]
    MissingMarkers(String),
}

impl PromptgenError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptgenError::Config(_) | PromptgenError::Io(_) => exit_codes::CONFIG_ERROR,
            PromptgenError::Transport(_) => exit_codes::TRANSPORT_FAILURE,
            PromptgenError::ModelOutput { .. } => exit_codes::MODEL_OUTPUT_FAILURE,
            PromptgenError::NoCandidates => exit_codes::NO_CANDIDATES,
            PromptgenError::MissingMarkers(_) => exit_codes::MISSING_MARKERS,
        }
    }
}

/// Result type alias for promptgen operations.
pub type Result<T> = std::result::Result<T, PromptgenError>;
