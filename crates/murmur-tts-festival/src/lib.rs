//! Festival engine implementation for Murmur
//!
//! Talks to a long-running Festival speech server through
//! `festival_client --ttw`, which returns the synthesized waveform instead
//! of playing it on the server side. No phoneme timing is available over
//! this interface, so this variant produces no visemes.

use async_trait::async_trait;
use murmur_tts::{AudioKind, EngineConfig, Synthesis, TtsEngine, TtsError, TtsResult};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

const DEFAULT_PORT: u16 = 1314;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

pub struct FestivalEngine {
    config: EngineConfig,
    server: String,
    port: u16,
}

impl FestivalEngine {
    pub fn new(config: EngineConfig, server: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            config,
            server: server.into(),
            port: port.unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn endpoint(&self) -> (&str, u16) {
        (&self.server, self.port)
    }
}

#[async_trait]
impl TtsEngine for FestivalEngine {
    fn name(&self) -> &str {
        "festival"
    }

    fn audio_kind(&self) -> AudioKind {
        AudioKind::Wav
    }

    async fn synthesize(&self, text: &str, dest: &Path) -> TtsResult<Synthesis> {
        let mut child = Command::new("festival_client")
            .arg("--server")
            .arg(&self.server)
            .arg("--port")
            .arg(self.port.to_string())
            .arg("--ttw")
            .arg("--output")
            .arg(dest)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TtsError::Synthesis(format!("failed to run festival_client: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| TtsError::Synthesis(format!("failed to send text: {}", e)))?;
            // Close stdin so the client flushes the request.
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| TtsError::Synthesis(format!("festival_client failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("festival_client exited with {}", output.status);
            return Err(TtsError::Synthesis(format!(
                "festival_client exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        debug!("festival_client wrote {}", dest.display());
        Ok(Synthesis {
            artifact: dest.to_path_buf(),
            phonemes: None,
        })
    }

    async fn validate_language(&self) -> TtsResult<()> {
        // Stock festival servers carry English voices; other languages
        // require a voice to be named explicitly.
        let lang = self.config.lang.to_ascii_lowercase();
        if lang.starts_with("en") || self.config.voice.is_some() {
            Ok(())
        } else {
            Err(TtsError::Config(format!(
                "festival needs an explicit voice for language '{}'",
                self.config.lang
            )))
        }
    }

    async fn validate_connection(&self) -> TtsResult<()> {
        let address = (self.server.as_str(), self.port);
        match timeout(CONNECT_TIMEOUT, TcpStream::connect(address)).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(e)) => Err(TtsError::Config(format!(
                "festival server unreachable at {}:{}: {}",
                self.server, self.port, e
            ))),
            Err(_) => Err(TtsError::Config(format!(
                "timed out connecting to festival server at {}:{}",
                self.server, self.port
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_identity() {
        let engine = FestivalEngine::new(EngineConfig::default(), "localhost", None);
        assert_eq!(engine.name(), "festival");
        assert_eq!(engine.audio_kind(), AudioKind::Wav);
        assert_eq!(engine.endpoint(), ("localhost", 1314));
    }

    #[test]
    fn explicit_port_is_kept() {
        let engine = FestivalEngine::new(EngineConfig::default(), "tts-host", Some(1400));
        assert_eq!(engine.endpoint(), ("tts-host", 1400));
    }

    #[test]
    fn no_viseme_support() {
        let engine = FestivalEngine::new(EngineConfig::default(), "localhost", None);
        assert!(engine.visemes("hh:0.1").is_none());
    }

    #[tokio::test]
    async fn non_english_needs_a_voice() {
        let bare = FestivalEngine::new(
            EngineConfig {
                lang: "cy".to_string(),
                voice: None,
            },
            "localhost",
            None,
        );
        assert!(bare.validate_language().await.is_err());

        let voiced = FestivalEngine::new(
            EngineConfig {
                lang: "cy".to_string(),
                voice: Some("cb_cy_llg".to_string()),
            },
            "localhost",
            None,
        );
        assert!(voiced.validate_language().await.is_ok());
    }
}
