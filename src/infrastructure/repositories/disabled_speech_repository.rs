use super::synthesis_repository::{SynthesisRepository, Synthesizer};
use super::translation_repository::{EngineSession, SessionHandle, TranslationRepository};
use crate::domain::language::LanguageCode;
use async_trait::async_trait;
use std::sync::Arc;

const NOT_CONFIGURED: &str = "Speech service credentials are not configured";

/// Stand-in used when SPEECH_KEY or SPEECH_REGION is missing.
/// Every operation fails, so no session can start and nothing is spoken.
#[derive(Debug, Default)]
pub struct DisabledSpeechRepository;

impl SynthesisRepository for DisabledSpeechRepository {
    fn create_synthesizer(
        &self,
        _language: &LanguageCode,
        _voice: &str,
    ) -> Result<Arc<dyn Synthesizer>, String> {
        Err(NOT_CONFIGURED.to_string())
    }
}

#[async_trait]
impl TranslationRepository for DisabledSpeechRepository {
    async fn start_session(
        &self,
        _input: &LanguageCode,
        _output: &LanguageCode,
    ) -> Result<EngineSession, String> {
        Err(NOT_CONFIGURED.to_string())
    }

    async fn push_audio(&self, _handle: &SessionHandle, _audio: Vec<u8>) -> Result<(), String> {
        Err(NOT_CONFIGURED.to_string())
    }

    async fn stop_session(&self, _handle: &SessionHandle) -> Result<(), String> {
        Err(NOT_CONFIGURED.to_string())
    }

    fn release(&self, _handle: SessionHandle) {}
}
