mod config;
mod factory;

use clap::Parser;
use config::Config;
use murmur_tts::{
    InterruptFlags, LogEnclosure, PlaybackPipeline, ProcessPlayer, SizeCurator, Speaker,
    SynthesisCache,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

const QUEUE_DEPTH: usize = 16;

#[derive(Parser)]
#[command(name = "murmur", about = "Text-to-speech front end with viseme output")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "murmur.toml")]
    config: PathBuf,

    /// Words to speak; reads utterances from stdin lines when omitted
    text: Vec<String>,
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "murmur.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(guard);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging().map_err(|e| anyhow::anyhow!("failed to init logging: {}", e))?;
    let args = Args::parse();
    tracing::info!("Starting murmur");

    let config = Config::load(&args.config)?;
    let cache_root = config.cache.directory();
    let engine = factory::create_engine(&config.tts, &cache_root).await?;
    tracing::info!("TTS engine '{}' validated", engine.name());

    let cache = SynthesisCache::new(
        &cache_root,
        Box::new(SizeCurator::new(config.cache.max_bytes)),
    );
    let interrupts = InterruptFlags::new();
    let pipeline = PlaybackPipeline::spawn(
        Arc::new(ProcessPlayer::default()),
        Arc::new(LogEnclosure),
        interrupts.clone(),
        QUEUE_DEPTH,
    );
    let speaker = Speaker::new(engine, cache, pipeline);

    if !args.text.is_empty() {
        speaker.speak(&args.text.join(" ")).await?;
        speaker.finish().await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received, stopping playback");
                interrupts.request_stop();
                speaker.shutdown().await;
                tracing::info!("Shutdown complete");
                return Ok(());
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let utterance = line.trim();
                        if utterance.is_empty() {
                            continue;
                        }
                        if let Err(e) = speaker.speak(utterance).await {
                            tracing::error!("Failed to speak utterance: {}", e);
                        }
                    }
                    None => break,
                }
            }
        }
    }

    // EOF: let queued playback drain before exiting.
    speaker.finish().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
