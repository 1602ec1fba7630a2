//! The single externally callable "speak" operation
//!
//! Ties cache lookup, engine invocation, cache population and playback
//! submission into one request per utterance. Reentrant: submission only
//! appends to the pipeline's queue, so callers may speak again while a
//! previous utterance is still draining.

use crate::cache::SynthesisCache;
use crate::engine::TtsEngine;
use crate::error::TtsResult;
use crate::playback::PlaybackPipeline;
use crate::types::{Fingerprint, PlaybackJob};
use std::sync::Arc;
use tracing::debug;

pub struct Speaker {
    engine: Arc<dyn TtsEngine>,
    cache: SynthesisCache,
    pipeline: PlaybackPipeline,
}

impl Speaker {
    /// Stale artifacts from a prior process or version are discarded up
    /// front, once, at construction.
    pub fn new(engine: Arc<dyn TtsEngine>, cache: SynthesisCache, pipeline: PlaybackPipeline) -> Self {
        cache.clear();
        Self {
            engine,
            cache,
            pipeline,
        }
    }

    /// Convert `text` to speech and queue it for playback.
    ///
    /// Synthesis runs at most once per distinct utterance: a cache hit
    /// skips the engine entirely. A synthesis failure aborts this request
    /// without queueing anything and leaves the cache as it was.
    pub async fn speak(&self, text: &str) -> TtsResult<()> {
        let kind = self.engine.audio_kind();
        let fp = Fingerprint::of(text);

        let (artifact, phonemes) = match self.cache.lookup(&fp, kind) {
            Some((artifact, phonemes)) => {
                debug!("TTS cache hit for {}", fp);
                (artifact, phonemes)
            }
            None => {
                self.cache.ensure_root();
                let dest = self.cache.artifact_path(&fp, kind);
                let synthesis = self.engine.synthesize(text, &dest).await?;
                if let Some(phonemes) = &synthesis.phonemes {
                    self.cache.store_phonemes(&fp, phonemes);
                }
                (synthesis.artifact, synthesis.phonemes)
            }
        };

        let visemes = phonemes
            .as_deref()
            .and_then(|p| self.engine.visemes(p))
            .unwrap_or_default();

        self.pipeline.submit(PlaybackJob {
            kind,
            artifact,
            visemes,
        }).await
    }

    /// Stop the playback pipeline. Queued jobs are discarded unplayed.
    pub fn stop(&self) {
        self.pipeline.stop();
    }

    /// Stop and wait for the consumer to exit, so no playback child
    /// outlives the caller.
    pub async fn shutdown(self) {
        self.pipeline.shutdown().await;
    }

    /// Let already-queued playback finish, then shut the pipeline down.
    pub async fn finish(self) {
        self.pipeline.finish().await;
    }
}
