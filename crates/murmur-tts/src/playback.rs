//! Playback pipeline
//!
//! A bounded FIFO job queue with one dedicated consumer task. The consumer
//! exclusively owns the audio output and the enclosure link: it plays
//! artifacts strictly in submission order and emits viseme cues on their
//! cumulative schedule while audio plays. Two externally settable interrupt
//! flags are polled during the viseme walk; either one aborts the remaining
//! walk of the current job without touching the audio or later jobs.

use crate::enclosure::Enclosure;
use crate::error::{TtsError, TtsResult};
use crate::player::AudioPlayer;
use crate::types::{PlaybackJob, VisemeEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, warn};

/// Dequeue timeout; bounds how long a stop request can go unnoticed while
/// the queue is idle.
const DEQUEUE_TIMEOUT: Duration = Duration::from_secs(2);

const PRE_BLINK_RATE: f32 = 0.5;
const POST_BLINK_RATE: f32 = 0.2;

/// Interrupt signals polled during the viseme walk.
///
/// "Stop requested" is level-triggered and stays set until cleared.
/// "Button pressed" is one-shot: observing it consumes it.
#[derive(Clone, Default)]
pub struct InterruptFlags {
    stop_speaking: Arc<AtomicBool>,
    button_pressed: Arc<AtomicBool>,
}

impl InterruptFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop_speaking.store(true, Ordering::SeqCst);
    }

    pub fn clear_stop(&self) {
        self.stop_speaking.store(false, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_speaking.load(Ordering::SeqCst)
    }

    pub fn press_button(&self) {
        self.button_pressed.store(true, Ordering::SeqCst);
    }

    pub fn take_button_press(&self) -> bool {
        self.button_pressed.swap(false, Ordering::SeqCst)
    }
}

/// Handle to the playback consumer task.
pub struct PlaybackPipeline {
    tx: mpsc::Sender<PlaybackJob>,
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl PlaybackPipeline {
    /// Spawn the consumer. It runs for the pipeline's lifetime and owns the
    /// player and enclosure exclusively.
    pub fn spawn(
        player: Arc<dyn AudioPlayer>,
        enclosure: Arc<dyn Enclosure>,
        interrupts: InterruptFlags,
        depth: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(depth);
        let running = Arc::new(AtomicBool::new(true));
        let mut worker = PlaybackWorker {
            rx,
            player,
            enclosure,
            interrupts,
        };
        let flag = running.clone();
        let handle = tokio::spawn(async move {
            worker.run(flag).await;
        });
        Self {
            tx,
            running,
            handle,
        }
    }

    /// Append a job to the queue. Fails only once the pipeline has stopped.
    pub async fn submit(&self, job: PlaybackJob) -> TtsResult<()> {
        self.tx.send(job).await.map_err(|_| TtsError::QueueClosed)
    }

    /// Flip the termination flag. Queued jobs are drained without playing
    /// and the consumer exits after its current dequeue attempt elapses.
    /// Stopping is irreversible; spawn a new pipeline to resume.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Stop and wait for the consumer to exit.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.handle.await;
    }

    /// Close the queue and let the consumer play out everything already
    /// submitted before exiting.
    pub async fn finish(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}

struct PlaybackWorker {
    rx: mpsc::Receiver<PlaybackJob>,
    player: Arc<dyn AudioPlayer>,
    enclosure: Arc<dyn Enclosure>,
    interrupts: InterruptFlags,
}

impl PlaybackWorker {
    async fn run(&mut self, running: Arc<AtomicBool>) {
        debug!("Playback consumer started");
        while running.load(Ordering::SeqCst) {
            match time::timeout(DEQUEUE_TIMEOUT, self.rx.recv()).await {
                Ok(Some(job)) => {
                    if !running.load(Ordering::SeqCst) {
                        continue;
                    }
                    // A single failed job never kills the consumer.
                    if let Err(e) = self.handle_job(job).await {
                        warn!("Playback job failed: {}", e);
                    }
                }
                Ok(None) => break,
                Err(_) => continue,
            }
        }
        while self.rx.try_recv().is_ok() {}
        debug!("Playback consumer stopped");
    }

    async fn handle_job(&mut self, job: PlaybackJob) -> TtsResult<()> {
        self.blink(PRE_BLINK_RATE);
        let mut handle = self.player.play(job.kind, &job.artifact).await?;
        let started = Instant::now();
        if !job.visemes.is_empty() {
            self.walk_visemes(started, &job.visemes).await;
        }
        handle.wait().await?;
        self.blink(POST_BLINK_RATE);
        Ok(())
    }

    /// Emit viseme codes on their cumulative schedule.
    ///
    /// Each wait targets elapsed-since-playback-start, not the previous
    /// event, so a long emit can never accumulate drift. An interrupt
    /// aborts the remaining walk only; the job is not marked failed.
    async fn walk_visemes(&self, started: Instant, visemes: &[VisemeEvent]) {
        let mut target = Duration::ZERO;
        for event in visemes {
            if self.interrupts.stop_requested() || self.interrupts.take_button_press() {
                debug!("Viseme walk interrupted");
                return;
            }
            target += event.duration;
            let elapsed = started.elapsed();
            if elapsed < target {
                time::sleep(target - elapsed).await;
            }
            self.enclosure.mouth_viseme(&event.code);
        }
    }

    /// Probability-gated ocular cue; cosmetic jitter only.
    fn blink(&self, rate: f32) {
        if fastrand::f32() < rate {
            self.enclosure.eyes_blink("b");
        }
    }
}
