//! Engine factory
//!
//! Resolves the configured module selector into a concrete engine instance
//! and runs the pre-flight validator against it. A failed validation means
//! no engine is handed back at all.

use crate::config::{EngineSettings, TtsSettings};
use anyhow::{bail, Context};
use murmur_tts::{validate, EngineConfig, Fingerprint, TtsEngine};
use murmur_tts_festival::FestivalEngine;
use murmur_tts_mary::MaryEngine;
use murmur_tts_mimic::MimicEngine;
use std::path::Path;
use std::sync::Arc;

fn engine_config(settings: &EngineSettings) -> EngineConfig {
    EngineConfig {
        lang: settings
            .lang
            .clone()
            .unwrap_or_else(|| "en-us".to_string()),
        voice: settings.voice.clone(),
    }
}

/// Build and validate the engine named by `settings.module`.
pub async fn create_engine(
    settings: &TtsSettings,
    cache_root: &Path,
) -> anyhow::Result<Arc<dyn TtsEngine>> {
    let engine: Arc<dyn TtsEngine> = match settings.module.as_str() {
        "mimic" => Arc::new(MimicEngine::new(engine_config(&settings.mimic))),
        "marytts" => {
            let url = settings
                .marytts
                .url
                .clone()
                .context("the marytts module requires [tts.marytts] url")?;
            Arc::new(MaryEngine::new(engine_config(&settings.marytts), url))
        }
        "festival" => {
            let server = settings
                .festival
                .server
                .clone()
                .unwrap_or_else(|| "localhost".to_string());
            Arc::new(FestivalEngine::new(
                engine_config(&settings.festival),
                server,
                settings.festival.port,
            ))
        }
        other => bail!("unknown tts module '{}'", other),
    };

    std::fs::create_dir_all(cache_root)
        .with_context(|| format!("failed to create cache directory {}", cache_root.display()))?;
    let probe = cache_root.join(format!(
        "{}.{}",
        Fingerprint::of(""),
        engine.audio_kind().extension()
    ));
    validate(engine.as_ref(), &probe)
        .await
        .with_context(|| format!("pre-flight validation of '{}' failed", settings.module))?;

    Ok(engine)
}
