//! TOML configuration for the murmur binary
//!
//! ```toml
//! [tts]
//! module = "mimic"
//!
//! [tts.mimic]
//! lang = "en-us"
//! voice = "ap"
//!
//! [cache]
//! dir = "/var/cache/murmur/tts"
//! max_bytes = 52428800
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub tts: TtsSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Deserialize)]
pub struct TtsSettings {
    /// Engine selector: "mimic", "marytts" or "festival".
    pub module: String,
    #[serde(default)]
    pub mimic: EngineSettings,
    #[serde(default)]
    pub marytts: EngineSettings,
    #[serde(default)]
    pub festival: EngineSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct EngineSettings {
    pub lang: Option<String>,
    pub voice: Option<String>,
    /// Remote engines only
    pub url: Option<String>,
    /// Daemon engines only
    pub server: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct CacheSettings {
    pub dir: Option<PathBuf>,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: None,
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> u64 {
    50 * 1024 * 1024
}

impl CacheSettings {
    pub fn directory(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("murmur").join("tts"))
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
