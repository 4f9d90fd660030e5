//! In-memory speech collaborators for unit tests

use crate::domain::language::LanguageCode;
use crate::domain::synthesis::WARM_UP_UTTERANCE;
use crate::infrastructure::repositories::{
    EngineEvent, EngineSession, SessionHandle, SynthesisRepository, Synthesizer,
    TranslationRepository,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Default)]
struct SynthesisLog {
    created: Mutex<Vec<String>>,
    spoken: Mutex<Vec<(String, String)>>,
    closed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[derive(Default, Clone)]
struct SynthesisFailures {
    construction: Vec<String>,
    warm_up: Vec<String>,
    texts: Vec<String>,
    close: Vec<String>,
}

#[derive(Default)]
pub struct FakeSynthesisRepository {
    log: Arc<SynthesisLog>,
    failures: SynthesisFailures,
    speak_delay: Duration,
}

impl FakeSynthesisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speak_delay_ms(mut self, millis: u64) -> Self {
        self.speak_delay = Duration::from_millis(millis);
        self
    }

    pub fn failing_construction(mut self, voice: &str) -> Self {
        self.failures.construction.push(voice.to_string());
        self
    }

    pub fn failing_warm_up(mut self, voice: &str) -> Self {
        self.failures.warm_up.push(voice.to_string());
        self
    }

    pub fn failing_text(mut self, text: &str) -> Self {
        self.failures.texts.push(text.to_string());
        self
    }

    pub fn failing_close(mut self, voice: &str) -> Self {
        self.failures.close.push(voice.to_string());
        self
    }

    pub fn created_voices(&self) -> Vec<String> {
        self.log.created.lock().clone()
    }

    /// Every speak attempt as (voice, text), warm-ups included
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.log.spoken.lock().clone()
    }

    /// Speak attempts without the warm-up placeholder
    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken()
            .into_iter()
            .filter(|(_, text)| text != WARM_UP_UTTERANCE)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn closed_voices(&self) -> Vec<String> {
        self.log.closed.lock().clone()
    }

    pub fn max_concurrent_speech(&self) -> usize {
        self.log.max_in_flight.load(Ordering::SeqCst)
    }
}

impl SynthesisRepository for FakeSynthesisRepository {
    fn create_synthesizer(
        &self,
        _language: &LanguageCode,
        voice: &str,
    ) -> Result<Arc<dyn Synthesizer>, String> {
        if self.failures.construction.iter().any(|v| v == voice) {
            return Err(format!("invalid voice {}", voice));
        }
        self.log.created.lock().push(voice.to_string());
        Ok(Arc::new(FakeSynthesizer {
            voice: voice.to_string(),
            log: self.log.clone(),
            failures: self.failures.clone(),
            speak_delay: self.speak_delay,
        }))
    }
}

struct FakeSynthesizer {
    voice: String,
    log: Arc<SynthesisLog>,
    failures: SynthesisFailures,
    speak_delay: Duration,
}

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    fn voice(&self) -> &str {
        &self.voice
    }

    async fn speak(&self, text: &str) -> Result<(), String> {
        self.log
            .spoken
            .lock()
            .push((self.voice.clone(), text.to_string()));

        let now = self.log.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.speak_delay.is_zero() {
            tokio::time::sleep(self.speak_delay).await;
        }
        self.log.in_flight.fetch_sub(1, Ordering::SeqCst);

        let warm_up_fails =
            text == WARM_UP_UTTERANCE && self.failures.warm_up.iter().any(|v| *v == self.voice);
        if warm_up_fails || self.failures.texts.iter().any(|t| t == text) {
            return Err(format!("synthesis failed for {:?}", text));
        }
        Ok(())
    }

    fn close(&self) -> Result<(), String> {
        if self.failures.close.iter().any(|v| *v == self.voice) {
            return Err(format!("close failed for {}", self.voice));
        }
        self.log.closed.lock().push(self.voice.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeTranslationRepository {
    fail_start: bool,
    fail_stop: bool,
    starts: Mutex<Vec<(String, String)>>,
    audio: Mutex<Vec<Vec<u8>>>,
    events: Mutex<Option<mpsc::Sender<EngineEvent>>>,
    stops: AtomicUsize,
    releases: Mutex<Vec<Uuid>>,
}

impl FakeTranslationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn failing_stop(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    /// Deliver an event on the most recently started session
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

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> Vec<Uuid> {
        self.releases.lock().clone()
    }
}

#[async_trait]
impl TranslationRepository for FakeTranslationRepository {
    async fn start_session(
        &self,
        input: &LanguageCode,
        output: &LanguageCode,
    ) -> Result<EngineSession, String> {
        if self.fail_start {
            return Err("engine unavailable".to_string());
        }
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
        self.stops.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop {
            return Err("stop failed".to_string());
        }
        Ok(())
    }

    fn release(&self, handle: SessionHandle) {
        self.releases.lock().push(handle.id());
    }
}

/// Poll `condition` until it holds, failing the test after five seconds
pub async fn eventually(condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("condition not met within 5s");
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
