//! Enclosure/display link
//!
//! One-way, fire-and-forget commands to the companion display. Only the
//! playback consumer may emit these; no acknowledgment is expected.

use tracing::trace;

pub trait Enclosure: Send + Sync {
    /// Show the mouth shape for a viseme code.
    fn mouth_viseme(&self, code: &str);

    /// Blink the eyes in the given style.
    fn eyes_blink(&self, style: &str);
}

/// Headless stand-in that traces commands instead of sending them.
pub struct LogEnclosure;

impl Enclosure for LogEnclosure {
    fn mouth_viseme(&self, code: &str) {
        trace!("enclosure: viseme {}", code);
    }

    fn eyes_blink(&self, style: &str) {
        trace!("enclosure: blink {}", style);
    }
}
