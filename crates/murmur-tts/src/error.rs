//! Error types for TTS functionality

use std::fmt;
use thiserror::Error;

/// Pre-flight validation steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStep {
    Instance,
    OutputPath,
    Language,
    Connectivity,
}

impl fmt::Display for ValidationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationStep::Instance => "instance",
            ValidationStep::OutputPath => "output path",
            ValidationStep::Language => "language",
            ValidationStep::Connectivity => "connectivity",
        };
        f.write_str(name)
    }
}

/// TTS error taxonomy
#[derive(Error, Debug)]
pub enum TtsError {
    /// Engine failed to produce audio; the request is aborted and nothing
    /// is queued. The cache is left untouched.
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// Pre-flight validation failed; the engine must not be used.
    #[error("validation failed at {step} check: {reason}")]
    Validation {
        step: ValidationStep,
        reason: String,
    },

    /// Engine or process configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio output collaborator failed.
    #[error("audio output error: {0}")]
    Audio(String),

    /// The playback pipeline has been stopped.
    #[error("playback queue closed")]
    QueueClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for TTS operations
pub type TtsResult<T> = Result<T, TtsError>;
