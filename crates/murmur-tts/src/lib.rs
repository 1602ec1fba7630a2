//! Text-to-speech core for Murmur
//!
//! This crate provides the content-addressed synthesis cache, the
//! single-consumer playback pipeline with viseme output, and the engine
//! contract that concrete synthesis backends implement.

pub mod cache;
pub mod enclosure;
pub mod engine;
pub mod error;
pub mod playback;
pub mod player;
pub mod speak;
pub mod types;
pub mod validate;

pub use cache::{CacheCurator, SizeCurator, SynthesisCache};
pub use enclosure::{Enclosure, LogEnclosure};
pub use engine::TtsEngine;
pub use error::{TtsError, TtsResult, ValidationStep};
pub use playback::{InterruptFlags, PlaybackPipeline};
pub use player::{AudioPlayer, PlaybackHandle, ProcessPlayer};
pub use speak::Speaker;
pub use types::{AudioKind, EngineConfig, Fingerprint, PlaybackJob, Synthesis, VisemeEvent};
pub use validate::validate;
