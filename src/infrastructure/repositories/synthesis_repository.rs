use crate::domain::language::LanguageCode;
use async_trait::async_trait;
use std::sync::Arc;

/// Repository for text-to-speech synthesizers.
/// Abstracts the underlying TTS provider (Azure Speech, or a fake in tests).
///
/// Implementations are responsible for:
/// - Provider-specific voice configuration
/// - Delivering synthesized audio to the playback output
pub trait SynthesisRepository: Send + Sync {
    /// Construct a synthesizer bound to one voice. Clips it speaks are
    /// tagged with `language`, the playback language the voice was chosen for.
    ///
    /// # Errors
    /// Returns error if the provider configuration is invalid. No network
    /// call happens here; connection problems surface on the first `speak`.
    fn create_synthesizer(
        &self,
        language: &LanguageCode,
        voice: &str,
    ) -> Result<Arc<dyn Synthesizer>, String>;
}

/// A synthesizer configured for a single voice.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Voice identifier this synthesizer speaks with
    fn voice(&self) -> &str;

    /// Synthesize and play `text`, resolving once playback is done
    ///
    /// # Errors
    /// Returns error if synthesis fails or the synthesizer was closed
    async fn speak(&self, text: &str) -> Result<(), String>;

    /// Release the synthesizer. Later `speak` calls fail.
    fn close(&self) -> Result<(), String>;
}
