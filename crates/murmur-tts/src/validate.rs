//! Pre-flight engine validation
//!
//! An ordered sequence of independent checks run against any engine
//! variant: instance, output path, language, connectivity. The first
//! failure wins and names its step; no check mutates state, so a failed
//! validation leaves nothing to roll back.

use crate::engine::TtsEngine;
use crate::error::{TtsError, TtsResult, ValidationStep};
use std::path::Path;

/// Run the full check sequence against `engine`.
///
/// `output_path` is a representative artifact destination: it must carry
/// the engine's audio extension and its containing directory must exist.
pub async fn validate(engine: &dyn TtsEngine, output_path: &Path) -> TtsResult<()> {
    check_instance(engine)?;
    check_output_path(engine, output_path)?;
    engine
        .validate_language()
        .await
        .map_err(|e| step_failure(ValidationStep::Language, e))?;
    engine
        .validate_connection()
        .await
        .map_err(|e| step_failure(ValidationStep::Connectivity, e))?;
    Ok(())
}

fn step_failure(step: ValidationStep, source: TtsError) -> TtsError {
    TtsError::Validation {
        step,
        reason: source.to_string(),
    }
}

fn check_instance(engine: &dyn TtsEngine) -> TtsResult<()> {
    if engine.name().trim().is_empty() {
        return Err(TtsError::Validation {
            step: ValidationStep::Instance,
            reason: "engine has no name".to_string(),
        });
    }
    Ok(())
}

fn check_output_path(engine: &dyn TtsEngine, output_path: &Path) -> TtsResult<()> {
    let expected = engine.audio_kind().extension();
    let matches = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == expected)
        .unwrap_or(false);
    if !matches {
        return Err(TtsError::Validation {
            step: ValidationStep::OutputPath,
            reason: format!("{} must end in .{}", output_path.display(), expected),
        });
    }
    let dir_ok = output_path.parent().map(|d| d.is_dir()).unwrap_or(false);
    if !dir_ok {
        return Err(TtsError::Validation {
            step: ValidationStep::OutputPath,
            reason: format!("containing directory of {} does not exist", output_path.display()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioKind, Synthesis};
    use async_trait::async_trait;

    struct CheckedEngine {
        name: &'static str,
        lang_ok: bool,
        connection_ok: bool,
    }

    impl CheckedEngine {
        fn good() -> Self {
            Self {
                name: "checked",
                lang_ok: true,
                connection_ok: true,
            }
        }
    }

    #[async_trait]
    impl TtsEngine for CheckedEngine {
        fn name(&self) -> &str {
            self.name
        }

        fn audio_kind(&self) -> AudioKind {
            AudioKind::Wav
        }

        async fn synthesize(&self, _text: &str, dest: &Path) -> TtsResult<Synthesis> {
            Ok(Synthesis {
                artifact: dest.to_path_buf(),
                phonemes: None,
            })
        }

        async fn validate_language(&self) -> TtsResult<()> {
            if self.lang_ok {
                Ok(())
            } else {
                Err(TtsError::Config("unsupported language".to_string()))
            }
        }

        async fn validate_connection(&self) -> TtsResult<()> {
            if self.connection_ok {
                Ok(())
            } else {
                Err(TtsError::Config("engine unreachable".to_string()))
            }
        }
    }

    #[tokio::test]
    async fn accepts_a_well_formed_engine() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CheckedEngine::good();
        let out = dir.path().join("out.wav");
        assert!(validate(&engine, &out).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_mismatched_extension() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CheckedEngine::good();
        let out = dir.path().join("out.mp3");
        let err = validate(&engine, &out).await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Validation {
                step: ValidationStep::OutputPath,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CheckedEngine::good();
        let out = dir.path().join("nope").join("out.wav");
        let err = validate(&engine, &out).await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Validation {
                step: ValidationStep::OutputPath,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn names_the_failing_step() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.wav");

        let engine = CheckedEngine {
            lang_ok: false,
            ..CheckedEngine::good()
        };
        let err = validate(&engine, &out).await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Validation {
                step: ValidationStep::Language,
                ..
            }
        ));

        let engine = CheckedEngine {
            connection_ok: false,
            ..CheckedEngine::good()
        };
        let err = validate(&engine, &out).await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Validation {
                step: ValidationStep::Connectivity,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejects_unnamed_engine() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CheckedEngine {
            name: "",
            ..CheckedEngine::good()
        };
        let out = dir.path().join("out.wav");
        let err = validate(&engine, &out).await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::Validation {
                step: ValidationStep::Instance,
                ..
            }
        ));
    }
}
