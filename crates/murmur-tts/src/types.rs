//! Core types for text-to-speech functionality

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Audio artifact kinds the playback pipeline knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioKind {
    Wav,
    Mp3,
}

impl AudioKind {
    /// File extension used for artifact naming.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioKind::Wav => "wav",
            AudioKind::Mp3 => "mp3",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "wav" => Some(AudioKind::Wav),
            "mp3" => Some(AudioKind::Mp3),
            _ => None,
        }
    }
}

/// Content digest of an utterance, used as the sole cache key.
///
/// Identical utterance bytes always produce identical fingerprints.
/// Collisions are accepted as a known risk of content addressing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest the utterance's UTF-8 bytes.
    pub fn of(text: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language and voice selection owned by an engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Language code (e.g. "en-us")
    pub lang: String,
    /// Engine-specific voice identifier
    pub voice: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lang: "en-us".to_string(),
            voice: None,
        }
    }
}

/// A mouth-shape cue and the time it occupies after the previous one.
///
/// Durations are incremental; the playback pipeline accumulates them into
/// a schedule relative to playback start so waits never drift.
#[derive(Debug, Clone, PartialEq)]
pub struct VisemeEvent {
    pub code: String,
    pub duration: Duration,
}

/// Result of a successful synthesis.
///
/// The artifact path is authoritative and may differ from the destination
/// hint the engine was given (e.g. a remote engine re-encoding the file).
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub artifact: PathBuf,
    /// Phoneme timing payload, absent for engines without timing support
    pub phonemes: Option<String>,
}

/// One queued utterance, owned by the playback queue until dequeued.
#[derive(Debug, Clone)]
pub struct PlaybackJob {
    pub kind: AudioKind,
    pub artifact: PathBuf,
    pub visemes: Vec<VisemeEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Fingerprint::of("hello world");
        let b = Fingerprint::of("hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_distinct_fingerprint() {
        let a = Fingerprint::of("hello world");
        let b = Fingerprint::of("hello, world");
        assert_ne!(a, b);
    }

    #[test]
    fn audio_kind_extension_round_trip() {
        assert_eq!(AudioKind::from_extension("wav"), Some(AudioKind::Wav));
        assert_eq!(AudioKind::from_extension("mp3"), Some(AudioKind::Mp3));
        assert_eq!(AudioKind::from_extension("ogg"), None);
    }
}
