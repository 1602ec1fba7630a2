//! Content-addressed synthesis cache
//!
//! Artifacts live at `<root>/<fingerprint>.<ext>`, timing payloads at
//! `<root>/<fingerprint>.pho`. A fresh synthesis overwrites both, so at most
//! one of each exists per fingerprint. Caching is best-effort: a failed read
//! is a miss, a failed write is logged and swallowed, and playback never
//! depends on the cache succeeding.

use crate::types::{AudioKind, Fingerprint};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Cache curation collaborator, invoked before every store.
///
/// Contract: keeps the total size of the storage root under a configured
/// ceiling. Eviction order is the implementation's choice.
pub trait CacheCurator: Send + Sync {
    fn curate(&self, root: &Path);
}

/// Curator that deletes oldest-modified files first until the total size
/// fits under the ceiling.
pub struct SizeCurator {
    max_bytes: u64,
}

impl SizeCurator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl CacheCurator for SizeCurator {
    fn curate(&self, root: &Path) {
        let Ok(entries) = fs::read_dir(root) else {
            return;
        };
        let mut files: Vec<(PathBuf, u64, SystemTime)> = Vec::new();
        let mut total: u64 = 0;
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            total += meta.len();
            files.push((entry.path(), meta.len(), modified));
        }
        if total <= self.max_bytes {
            return;
        }
        files.sort_by_key(|(_, _, modified)| *modified);
        for (path, len, _) in files {
            if total <= self.max_bytes {
                break;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    total -= len;
                    debug!("Evicted cached file {}", path.display());
                }
                Err(e) => warn!("Failed to evict {}: {}", path.display(), e),
            }
        }
    }
}

/// Maps an utterance fingerprint to a synthesized artifact and its timing
/// payload on durable local storage.
pub struct SynthesisCache {
    root: PathBuf,
    curator: Box<dyn CacheCurator>,
}

impl SynthesisCache {
    pub fn new(root: impl Into<PathBuf>, curator: Box<dyn CacheCurator>) -> Self {
        Self {
            root: root.into(),
            curator,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the artifact for `fp` lives (or will live once synthesized).
    pub fn artifact_path(&self, fp: &Fingerprint, kind: AudioKind) -> PathBuf {
        self.root.join(format!("{}.{}", fp, kind.extension()))
    }

    fn phoneme_path(&self, fp: &Fingerprint) -> PathBuf {
        self.root.join(format!("{}.pho", fp))
    }

    /// Create the storage root if needed so engines can write into it.
    pub fn ensure_root(&self) {
        if let Err(e) = fs::create_dir_all(&self.root) {
            warn!("Failed to create cache directory {}: {}", self.root.display(), e);
        }
    }

    /// Look up a previously synthesized artifact.
    ///
    /// A hit requires the artifact file to exist; the timing payload is
    /// loaded best-effort and its absence is not an error.
    pub fn lookup(&self, fp: &Fingerprint, kind: AudioKind) -> Option<(PathBuf, Option<String>)> {
        let artifact = self.artifact_path(fp, kind);
        if !artifact.is_file() {
            return None;
        }
        Some((artifact, self.load_phonemes(fp)))
    }

    /// Load the timing payload for `fp`. An unreadable file is treated as
    /// a miss for timing only.
    pub fn load_phonemes(&self, fp: &Fingerprint) -> Option<String> {
        let path = self.phoneme_path(fp);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(payload) => Some(payload.trim().to_string()),
            Err(e) => {
                warn!("Failed to read phoneme cache {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Persist the timing payload for `fp`, curating the cache first.
    /// Write failure is logged and swallowed.
    pub fn store_phonemes(&self, fp: &Fingerprint, phonemes: &str) {
        self.curator.curate(&self.root);
        self.ensure_root();
        let path = self.phoneme_path(fp);
        if let Err(e) = fs::write(&path, phonemes) {
            warn!("Failed to write phoneme cache {}: {}", path.display(), e);
        }
    }

    /// Remove every cached artifact and payload. A missing root is an
    /// empty cache, not an error.
    pub fn clear(&self) {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("Failed to remove cached file {}: {}", path.display(), e);
                }
            }
        }
    }
}
