//! Mimic TTS engine implementation for Murmur
//!
//! Runs the `mimic` binary with `-psdur` so every synthesis also yields a
//! phoneme timing payload, which makes this the variant that drives mouth
//! animation. Payload format: whitespace-separated `phoneme:seconds`
//! tokens, e.g. `pau:0.135 hh:0.069 ax:0.042`.

use async_trait::async_trait;
use murmur_tts::{AudioKind, EngineConfig, Synthesis, TtsEngine, TtsError, TtsResult, VisemeEvent};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

mod tests;

const DEFAULT_VOICE: &str = "ap";

pub struct MimicEngine {
    config: EngineConfig,
    binary: String,
}

impl MimicEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            binary: "mimic".to_string(),
        }
    }

    /// Override the binary name, e.g. for a non-PATH install.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    async fn check_available(binary: &str) -> bool {
        Command::new(binary)
            .arg("--version")
            .output()
            .await
            .is_ok()
    }
}

/// Map a mimic phoneme to the enclosure's mouth-shape code.
fn viseme_code(phoneme: &str) -> &'static str {
    match phoneme {
        // labiodental
        "f" | "v" => "5",
        // rounded vowels and glides
        "uh" | "w" | "uw" | "er" | "r" | "ow" => "2",
        "aw" => "1",
        "oy" | "ao" => "6",
        // tongue-forward consonants
        "th" | "dh" | "zh" | "ch" | "sh" | "z" | "s" | "jh" | "d" | "t" | "n" | "l" => "3",
        // bilabial closures, and silence reads as a closed mouth
        "p" | "b" | "m" | "pau" => "4",
        // open or neutral mouth for everything else
        _ => "0",
    }
}

#[async_trait]
impl TtsEngine for MimicEngine {
    fn name(&self) -> &str {
        "mimic"
    }

    fn audio_kind(&self) -> AudioKind {
        AudioKind::Wav
    }

    async fn synthesize(&self, text: &str, dest: &Path) -> TtsResult<Synthesis> {
        let voice = self.config.voice.as_deref().unwrap_or(DEFAULT_VOICE);
        let output = Command::new(&self.binary)
            .arg("-voice")
            .arg(voice)
            .arg("-psdur")
            .arg("-o")
            .arg(dest)
            .arg("-t")
            .arg(text)
            .output()
            .await
            .map_err(|e| TtsError::Synthesis(format!("failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TtsError::Synthesis(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let phonemes = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("mimic produced {} bytes of phoneme data", phonemes.len());
        Ok(Synthesis {
            artifact: dest.to_path_buf(),
            phonemes: (!phonemes.is_empty()).then_some(phonemes),
        })
    }

    fn visemes(&self, phonemes: &str) -> Option<Vec<VisemeEvent>> {
        let mut events = Vec::new();
        for token in phonemes.split_whitespace() {
            let Some((phoneme, raw)) = token.split_once(':') else {
                continue;
            };
            let Ok(seconds) = raw.parse::<f64>() else {
                continue;
            };
            // Rejects NaN, negatives and values beyond Duration's range;
            // a corrupt payload degrades to fewer events, never a panic.
            let Ok(duration) = Duration::try_from_secs_f64(seconds) else {
                continue;
            };
            events.push(VisemeEvent {
                code: viseme_code(phoneme).to_string(),
                duration,
            });
        }
        (!events.is_empty()).then_some(events)
    }

    async fn validate_language(&self) -> TtsResult<()> {
        // mimic ships English voices only
        if self.config.lang.to_ascii_lowercase().starts_with("en") {
            Ok(())
        } else {
            Err(TtsError::Config(format!(
                "mimic does not support language '{}'",
                self.config.lang
            )))
        }
    }

    async fn validate_connection(&self) -> TtsResult<()> {
        if Self::check_available(&self.binary).await {
            Ok(())
        } else {
            Err(TtsError::Config(format!(
                "{} binary not found; install mimic or point at it with with_binary()",
                self.binary
            )))
        }
    }
}
