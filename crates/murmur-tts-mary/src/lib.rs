//! MaryTTS engine implementation for Murmur
//!
//! Synthesizes over HTTP against a running MaryTTS server. The server does
//! not expose phoneme timing through the plain audio endpoint, so this
//! variant produces no visemes.

use async_trait::async_trait;
use murmur_tts::{AudioKind, EngineConfig, Synthesis, TtsEngine, TtsError, TtsResult};
use std::path::Path;
use tracing::debug;

pub struct MaryEngine {
    config: EngineConfig,
    url: String,
    client: reqwest::Client,
}

impl MaryEngine {
    pub fn new(config: EngineConfig, url: impl Into<String>) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        Self {
            config,
            url,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TtsEngine for MaryEngine {
    fn name(&self) -> &str {
        "marytts"
    }

    fn audio_kind(&self) -> AudioKind {
        AudioKind::Wav
    }

    async fn synthesize(&self, text: &str, dest: &Path) -> TtsResult<Synthesis> {
        let mut query: Vec<(&str, String)> = vec![
            ("INPUT_TEXT", text.to_string()),
            ("INPUT_TYPE", "TEXT".to_string()),
            ("OUTPUT_TYPE", "AUDIO".to_string()),
            ("AUDIO", "WAVE_FILE".to_string()),
            ("LOCALE", self.config.lang.clone()),
        ];
        if let Some(voice) = &self.config.voice {
            query.push(("VOICE", voice.clone()));
        }

        let response = self
            .client
            .get(format!("{}/process", self.url))
            .query(&query)
            .send()
            .await
            .map_err(|e| TtsError::Synthesis(format!("MaryTTS request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TtsError::Synthesis(format!(
                "MaryTTS returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TtsError::Synthesis(format!("MaryTTS response truncated: {}", e)))?;
        debug!("MaryTTS returned {} bytes of audio", bytes.len());

        tokio::fs::write(dest, &bytes).await.map_err(|e| {
            TtsError::Synthesis(format!("failed to write artifact {}: {}", dest.display(), e))
        })?;

        Ok(Synthesis {
            artifact: dest.to_path_buf(),
            phonemes: None,
        })
    }

    async fn validate_language(&self) -> TtsResult<()> {
        // The server decides which locales it carries; only reject
        // configurations that cannot name one.
        if self.config.lang.trim().is_empty() {
            Err(TtsError::Config("no locale configured for MaryTTS".to_string()))
        } else {
            Ok(())
        }
    }

    async fn validate_connection(&self) -> TtsResult<()> {
        let response = self
            .client
            .get(format!("{}/version", self.url))
            .send()
            .await
            .map_err(|e| TtsError::Config(format!("MaryTTS server unreachable at {}: {}", self.url, e)))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(TtsError::Config(format!(
                "MaryTTS version probe returned {}",
                response.status()
            )))
        }
    }
}
