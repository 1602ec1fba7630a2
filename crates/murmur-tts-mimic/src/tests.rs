//! Tests for the mimic engine

#[cfg(test)]
mod tests {
    use crate::MimicEngine;
    use murmur_tts::{AudioKind, EngineConfig, TtsEngine};
    use std::time::Duration;

    fn engine() -> MimicEngine {
        MimicEngine::new(EngineConfig::default())
    }

    #[test]
    fn engine_identity() {
        let engine = engine();
        assert_eq!(engine.name(), "mimic");
        assert_eq!(engine.audio_kind(), AudioKind::Wav);
    }

    #[test]
    fn parses_psdur_payload_into_visemes() {
        let events = engine().visemes("pau:0.135 hh:0.069 ow:0.2").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].code, "4");
        assert_eq!(events[1].code, "0");
        assert_eq!(events[2].code, "2");
        assert_eq!(events[0].duration, Duration::from_secs_f64(0.135));
    }

    #[test]
    fn malformed_tokens_are_skipped() {
        let events = engine().visemes("hh:0.1 garbage s:-1 t:abc l:0.2").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].code, "0");
        assert_eq!(events[1].code, "3");
    }

    #[test]
    fn out_of_range_durations_are_skipped() {
        // Finite and non-negative, but far beyond what a Duration can hold.
        let events = engine().visemes("hh:1e20 l:0.2").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, "3");
        assert!(engine().visemes("hh:1e20").is_none());
    }

    #[test]
    fn unparsable_payload_yields_none() {
        assert!(engine().visemes("no pairs here").is_none());
        assert!(engine().visemes("").is_none());
    }

    #[tokio::test]
    async fn accepts_english_rejects_others() {
        assert!(engine().validate_language().await.is_ok());

        let french = MimicEngine::new(EngineConfig {
            lang: "fr-fr".to_string(),
            voice: None,
        });
        assert!(french.validate_language().await.is_err());
    }

    #[tokio::test]
    async fn missing_binary_fails_connectivity() {
        let engine = engine().with_binary("definitely-not-a-real-binary");
        assert!(engine.validate_connection().await.is_err());
    }
}
