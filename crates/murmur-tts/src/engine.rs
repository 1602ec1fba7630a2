//! Synthesis engine contract
//!
//! One engine instance is selected per process by the factory. All variants
//! are polymorphic over this single trait; none wraps another.

use crate::error::TtsResult;
use crate::types::{AudioKind, Synthesis, VisemeEvent};
use async_trait::async_trait;
use std::path::Path;

/// Core synthesis engine interface.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Engine identifier (also the factory selector string).
    fn name(&self) -> &str;

    /// File-type tag used for artifact naming and player dispatch.
    fn audio_kind(&self) -> AudioKind;

    /// Convert `text` to audio, writing to `dest` where possible.
    ///
    /// `dest` is a hint; the returned artifact path is authoritative.
    /// Failures surface as [`crate::TtsError::Synthesis`] and are never
    /// retried by the caller.
    async fn synthesize(&self, text: &str, dest: &Path) -> TtsResult<Synthesis>;

    /// Derive viseme events from a phoneme timing payload.
    ///
    /// Engines without timing support return `None`.
    fn visemes(&self, _phonemes: &str) -> Option<Vec<VisemeEvent>> {
        None
    }

    /// Check the configured language is acceptable to this engine.
    async fn validate_language(&self) -> TtsResult<()>;

    /// Check the engine is reachable (binary present, endpoint up).
    async fn validate_connection(&self) -> TtsResult<()>;
}
