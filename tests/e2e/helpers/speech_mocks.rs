use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use speech_translator::domain::language::LanguageCode;
use speech_translator::infrastructure::repositories::{
    AudioClip, ClipRepository, EngineEvent, EngineSession, SessionHandle, SynthesisRepository,
    Synthesizer, TranslationRepository,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Recognition engine that only produces the events a test emits
#[derive(Default)]
pub struct MockTranslationEngine {
    events: Mutex<Option<mpsc::Sender<EngineEvent>>>,
    starts: Mutex<Vec<(String, String)>>,
    audio: Mutex<Vec<Vec<u8>>>,
    released: Mutex<Vec<Uuid>>,
}

#[allow(dead_code)]
impl MockTranslationEngine {
    pub async fn emit(&self, event: EngineEvent) {
        let sender = self.events.lock().clone();
        if let Some(sender) = sender {
            let _ = sender.send(event).await;
        }
    }

    pub fn starts(&self) -> Vec<(String, String)> {
        self.starts.lock().clone()
    }

    pub fn audio_chunks(&self) -> Vec<Vec<u8>> {
        self.audio.lock().clone()
    }

    pub fn released(&self) -> Vec<Uuid> {
        self.released.lock().clone()
    }
}

#[async_trait]
impl TranslationRepository for MockTranslationEngine {
    async fn start_session(
        &self,
        input: &LanguageCode,
        output: &LanguageCode,
    ) -> Result<EngineSession, String> {
        self.starts
            .lock()
            .push((input.to_string(), output.to_string()));
        let (tx, rx) = mpsc::channel(16);
        *self.events.lock() = Some(tx);
        Ok(EngineSession {
            handle: SessionHandle::new(),
            events: rx,
        })
    }

    async fn push_audio(&self, _handle: &SessionHandle, audio: Vec<u8>) -> Result<(), String> {
        self.audio.lock().push(audio);
        Ok(())
    }

    async fn stop_session(&self, _handle: &SessionHandle) -> Result<(), String> {
        // Dropping the sender ends the event stream like a closed session
        self.events.lock().take();
        Ok(())
    }

    fn release(&self, handle: SessionHandle) {
        self.released.lock().push(handle.id());
    }
}

/// Synthesis backend that stores a fixed clip for every spoken text
pub struct MockSynthesisRepository {
    clips: Arc<ClipRepository>,
    spoken: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockSynthesisRepository {
    pub fn new(clips: Arc<ClipRepository>) -> Self {
        Self {
            clips,
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Spoken texts as (voice, text), blank warm-ups excluded
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().clone()
    }
}

impl SynthesisRepository for MockSynthesisRepository {
    fn create_synthesizer(
        &self,
        language: &LanguageCode,
        voice: &str,
    ) -> Result<Arc<dyn Synthesizer>, String> {
        Ok(Arc::new(MockSynthesizer {
            language: language.to_string(),
            voice: voice.to_string(),
            clips: self.clips.clone(),
            spoken: self.spoken.clone(),
        }))
    }
}

struct MockSynthesizer {
    language: String,
    voice: String,
    clips: Arc<ClipRepository>,
    spoken: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    fn voice(&self) -> &str {
        &self.voice
    }

    async fn speak(&self, text: &str) -> Result<(), String> {
        if text.trim().is_empty() {
            return Ok(());
        }
        self.spoken
            .lock()
            .push((self.voice.clone(), text.to_string()));
        self.clips
            .store(AudioClip {
                id: Uuid::new_v4(),
                language: self.language.clone(),
                voice: self.voice.clone(),
                text: text.to_string(),
                content_type: "audio/mpeg".to_string(),
                audio: mock_audio_bytes(),
                created_at: Utc::now(),
            })
            .await;
        Ok(())
    }

    fn close(&self) -> Result<(), String> {
        Ok(())
    }
}

pub fn mock_audio_bytes() -> Vec<u8> {
    // Minimal MP3 frame header followed by padding
    vec![0xFF, 0xFB, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Minimal RIFF/WAVE header, enough for the fake engine to accept
pub fn wav_chunk() -> Vec<u8> {
    let mut chunk = b"RIFF".to_vec();
    chunk.extend_from_slice(&36u32.to_le_bytes());
    chunk.extend_from_slice(b"WAVEfmt ");
    chunk.extend_from_slice(&[0u8; 24]);
    chunk
}
