pub mod azure_synthesis_repository;
pub mod azure_translation_repository;
pub mod clip_repository;
pub mod disabled_speech_repository;
pub mod synthesis_repository;
pub mod translation_repository;

pub use azure_synthesis_repository::AzureSynthesisRepository;
pub use azure_translation_repository::AzureTranslationRepository;
pub use clip_repository::{AudioClip, ClipRepository};
pub use disabled_speech_repository::DisabledSpeechRepository;
pub use synthesis_repository::{SynthesisRepository, Synthesizer};
pub use translation_repository::{EngineEvent, EngineSession, SessionHandle, TranslationRepository};
