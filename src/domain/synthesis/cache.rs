use crate::domain::language::LanguageCode;
use crate::domain::voice::VoiceProfileResolver;
use crate::infrastructure::repositories::{SynthesisRepository, Synthesizer};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Shared handle to a cached synthesizer
pub type SynthesizerHandle = Arc<dyn Synthesizer>;

/// Throwaway utterance spoken once per new synthesizer to open the connection
pub const WARM_UP_UTTERANCE: &str = " ";

type Slot = Arc<OnceCell<SynthesizerHandle>>;

/// Keeps one warmed synthesizer per output language.
///
/// Each language has its own slot. Construction and warm-up run inside the
/// slot, so two callers asking for the same language never build two
/// synthesizers, while lookups for other languages are not held up.
pub struct SynthesizerCache {
    repository: Arc<dyn SynthesisRepository>,
    voices: VoiceProfileResolver,
    slots: Mutex<HashMap<LanguageCode, Slot>>,
}

impl SynthesizerCache {
    pub fn new(repository: Arc<dyn SynthesisRepository>) -> Self {
        Self {
            repository,
            voices: VoiceProfileResolver,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the synthesizer for `language`, creating and warming it up on first use.
    ///
    /// Returns `None` when the synthesizer cannot be constructed; callers treat
    /// that as "synthesis unavailable for this language". A failed warm-up is
    /// logged only: the handle is still cached and returned.
    pub async fn get_or_create(&self, language: &LanguageCode) -> Option<SynthesizerHandle> {
        let slot = self.slots.lock().entry(language.clone()).or_default().clone();

        slot.get_or_try_init(|| self.create(language))
            .await
            .ok()
            .cloned()
    }

    async fn create(&self, language: &LanguageCode) -> Result<SynthesizerHandle, ()> {
        let voice = self.voices.resolve(language);
        let handle = self
            .repository
            .create_synthesizer(language, &voice)
            .map_err(|e| {
                tracing::error!(
                    language = %language,
                    voice = %voice,
                    error = %e,
                    "Failed to initialize speech synthesis"
                );
            })?;

        match handle.speak(WARM_UP_UTTERANCE).await {
            Ok(()) => tracing::info!(language = %language, voice = %voice, "Synthesizer warmed up"),
            Err(e) => tracing::warn!(
                language = %language,
                voice = %voice,
                error = %e,
                "Warm-up synthesis failed"
            ),
        }

        Ok(handle)
    }

    /// Close and drop every cached synthesizer. Safe to call on an empty cache.
    ///
    /// A synthesizer still being created is waited for and closed as well.
    pub async fn release_all(&self) {
        let drained: Vec<_> = self.slots.lock().drain().collect();

        let mut released = 0;
        for (language, slot) in drained {
            let Ok(handle) = slot.get_or_try_init(|| async { Err(()) }).await else {
                continue;
            };
            if let Err(e) = handle.close() {
                tracing::error!(language = %language, error = %e, "Error closing synthesizer");
            }
            released += 1;
        }
        if released > 0 {
            tracing::info!(released = released, "Synthesizers released");
        }
    }

    pub fn contains(&self, language: &LanguageCode) -> bool {
        self.slots
            .lock()
            .get(language)
            .is_some_and(|slot| slot.initialized())
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Languages with a cached synthesizer, sorted
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut languages: Vec<_> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(language, _)| language.clone())
            .collect();
        languages.sort();
        languages
    }
}
