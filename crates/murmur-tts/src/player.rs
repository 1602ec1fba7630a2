//! Audio decode/playback collaborator
//!
//! Playback is started asynchronously and awaited through a handle, so the
//! consumer can walk visemes while audio plays and still guarantee that no
//! two streams ever overlap.

use crate::error::{TtsError, TtsResult};
use crate::types::AudioKind;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::warn;

/// Handle to an in-flight playback operation.
#[async_trait]
pub trait PlaybackHandle: Send {
    /// Wait until playback fully terminates.
    async fn wait(&mut self) -> TtsResult<()>;
}

#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Start playing the artifact; returns a handle to await completion.
    async fn play(&self, kind: AudioKind, artifact: &Path) -> TtsResult<Box<dyn PlaybackHandle>>;
}

/// Plays artifacts through external command-line players.
pub struct ProcessPlayer {
    wav_command: String,
    mp3_command: String,
}

impl ProcessPlayer {
    pub fn new(wav_command: impl Into<String>, mp3_command: impl Into<String>) -> Self {
        Self {
            wav_command: wav_command.into(),
            mp3_command: mp3_command.into(),
        }
    }
}

impl Default for ProcessPlayer {
    fn default() -> Self {
        Self::new("aplay", "mpg123")
    }
}

struct ChildHandle {
    child: Child,
}

#[async_trait]
impl PlaybackHandle for ChildHandle {
    async fn wait(&mut self) -> TtsResult<()> {
        let status = self.child.wait().await?;
        if !status.success() {
            // Player exit codes are advisory; the job itself already ran.
            warn!("Audio player exited with {}", status);
        }
        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for ProcessPlayer {
    async fn play(&self, kind: AudioKind, artifact: &Path) -> TtsResult<Box<dyn PlaybackHandle>> {
        let command = match kind {
            AudioKind::Wav => &self.wav_command,
            AudioKind::Mp3 => &self.mp3_command,
        };
        let child = Command::new(command)
            .arg(artifact)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TtsError::Audio(format!("failed to spawn {}: {}", command, e)))?;
        Ok(Box::new(ChildHandle { child }))
    }
}
