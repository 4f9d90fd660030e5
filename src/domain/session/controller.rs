use super::error::SessionError;
use super::model::{SessionSettings, SessionState, SessionStatus, SettingsUpdate};
use super::transcript::{Transcript, TranscriptSnapshot};
use crate::domain::language::LanguageCode;
use crate::domain::playback::PlaybackQueue;
use crate::domain::synthesis::SynthesizerCache;
use crate::infrastructure::repositories::{EngineEvent, SessionHandle, TranslationRepository};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use uuid::Uuid;

/// The session currently owned by the controller
struct ActiveSession {
    id: Uuid,
    handle: SessionHandle,
    // Dropping it ends the session's event loop
    _stop: oneshot::Sender<()>,
}

/// Drives one recognition/translation session at a time.
///
/// Start, stop and engine-initiated teardown are serialized by the lifecycle
/// lock. Final translations are recorded in the transcript and handed to the
/// playback queue.
pub struct TranslationSessionController {
    engine: Arc<dyn TranslationRepository>,
    cache: Arc<SynthesizerCache>,
    queue: Arc<PlaybackQueue>,
    transcript: Transcript,
    settings: RwLock<SessionSettings>,
    enabled: bool,
    lifecycle: tokio::sync::Mutex<Option<ActiveSession>>,
    current_session: Mutex<Option<Uuid>>,
    state: watch::Sender<SessionState>,
}

impl TranslationSessionController {
    /// `enabled` is false when the speech service credentials are missing;
    /// such a controller refuses to start sessions.
    pub fn new(
        engine: Arc<dyn TranslationRepository>,
        cache: Arc<SynthesizerCache>,
        queue: Arc<PlaybackQueue>,
        settings: SessionSettings,
        enabled: bool,
    ) -> Self {
        queue.set_tts_enabled(settings.tts_enabled);
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            engine,
            cache,
            queue,
            transcript: Transcript::new(),
            settings: RwLock::new(settings),
            enabled,
            lifecycle: tokio::sync::Mutex::new(None),
            current_session: Mutex::new(None),
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings.read().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state(),
            session_id: *self.current_session.lock(),
            enabled: self.enabled,
            synthesis_ready: self.queue.is_ready(),
            settings: self.settings(),
        }
    }

    pub fn transcript(&self) -> TranscriptSnapshot {
        self.transcript.snapshot()
    }

    pub fn queue(&self) -> &Arc<PlaybackQueue> {
        &self.queue
    }

    /// Resolve once the session reaches `target`
    pub async fn wait_for_state(&self, target: SessionState) {
        let mut receiver = self.state.subscribe();
        let _ = receiver.wait_for(|state| *state == target).await;
    }

    /// Warm up the synthesizer for the configured output language and open the
    /// playback queue. Called once at startup.
    pub async fn prewarm(&self) {
        if !self.enabled {
            tracing::warn!("Speech credentials missing, skipping synthesizer warm-up");
            return;
        }
        let output = self.settings.read().output_language.clone();
        self.cache.get_or_create(&output).await;
        self.queue.mark_ready();
    }

    /// Start translating with the current settings.
    pub async fn start(self: &Arc<Self>) -> Result<Uuid, SessionError> {
        if !self.enabled {
            return Err(SessionError::Disabled);
        }

        let mut slot = self.lifecycle.lock().await;
        let state = self.state();
        if state != SessionState::Idle {
            return Err(SessionError::AlreadyRunning(state.to_string()));
        }

        let settings = self.settings();
        self.transcript.clear();
        self.set_state(SessionState::Starting);

        // Make sure the first translation does not pay the synthesizer setup cost
        if self.cache.get_or_create(&settings.output_language).await.is_none() {
            tracing::warn!(
                language = %settings.output_language,
                "Starting without a synthesizer for the output language"
            );
        }
        self.queue.mark_ready();

        let session = match self
            .engine
            .start_session(&settings.input_language, &settings.output_language)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Failed to start translation session");
                self.set_state(SessionState::Idle);
                return Err(SessionError::Dependency(e));
            }
        };

        let id = session.handle.id();
        let (stop_tx, stop_rx) = oneshot::channel();
        *slot = Some(ActiveSession {
            id,
            handle: session.handle,
            _stop: stop_tx,
        });
        *self.current_session.lock() = Some(id);
        self.set_state(SessionState::Active);

        tokio::spawn(Arc::clone(self).run_events(
            id,
            settings.output_language.clone(),
            session.events,
            stop_rx,
        ));

        tracing::info!(
            session_id = %id,
            input_language = %settings.input_language,
            output_language = %settings.output_language,
            tts_enabled = settings.tts_enabled,
            "Translation session started"
        );

        Ok(id)
    }

    /// Stop the running session. A no-op when nothing is running.
    pub async fn stop(&self) {
        let mut slot = self.lifecycle.lock().await;
        if slot.is_none() {
            tracing::debug!("Stop requested with no active session");
            return;
        }
        self.teardown_locked(&mut slot, "stop requested").await;
    }

    /// Forward one chunk of captured audio to the running session
    pub async fn push_audio(&self, audio: Vec<u8>) -> Result<(), SessionError> {
        if audio.is_empty() {
            return Err(SessionError::Invalid("Audio chunk cannot be empty".to_string()));
        }

        let slot = self.lifecycle.lock().await;
        let active = slot.as_ref().ok_or(SessionError::NotActive)?;
        self.engine
            .push_audio(&active.handle, audio)
            .await
            .map_err(SessionError::Dependency)
    }

    /// Change languages or the TTS toggle. Only allowed between sessions.
    pub async fn update_settings(
        self: &Arc<Self>,
        update: SettingsUpdate,
    ) -> Result<SessionSettings, SessionError> {
        let _slot = self.lifecycle.lock().await;
        let state = self.state();
        if state != SessionState::Idle {
            return Err(SessionError::AlreadyRunning(state.to_string()));
        }

        let input = parse_language("input_language", update.input_language.as_deref())?;
        let output = parse_language("output_language", update.output_language.as_deref())?;

        let (settings, output_changed) = {
            let mut settings = self.settings.write();
            if let Some(input) = input {
                settings.input_language = input;
            }
            let output_changed = match output {
                Some(output) if output != settings.output_language => {
                    settings.output_language = output;
                    true
                }
                _ => false,
            };
            if let Some(enabled) = update.tts_enabled {
                settings.tts_enabled = enabled;
            }
            (settings.clone(), output_changed)
        };
        self.queue.set_tts_enabled(settings.tts_enabled);

        if output_changed && self.enabled {
            let controller = Arc::clone(self);
            let language = settings.output_language.clone();
            tokio::spawn(async move {
                controller.cache.get_or_create(&language).await;
                controller.queue.mark_ready();
            });
        }

        tracing::info!(
            input_language = %settings.input_language,
            output_language = %settings.output_language,
            tts_enabled = settings.tts_enabled,
            "Session settings updated"
        );

        Ok(settings)
    }

    /// Stop any session, abandon queued speech and release every synthesizer
    pub async fn shutdown(&self) {
        self.stop().await;
        self.queue.clear();
        self.cache.release_all().await;
    }

    async fn run_events(
        self: Arc<Self>,
        id: Uuid,
        output: LanguageCode,
        mut events: mpsc::Receiver<EngineEvent>,
        mut stop: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                // Stop wins over events still buffered in the channel
                biased;
                _ = &mut stop => break,
                event = events.recv() => match event {
                    Some(EngineEvent::Cancelled(reason)) => {
                        tracing::error!(session_id = %id, reason = %reason, "Translation session cancelled");
                        self.teardown(id, "cancelled").await;
                        break;
                    }
                    Some(EngineEvent::SessionEnded) => {
                        tracing::info!(session_id = %id, "Session stopped by engine");
                        self.teardown(id, "session ended").await;
                        break;
                    }
                    Some(event) => self.handle_result(id, &event, &output),
                    None => {
                        self.teardown(id, "event stream closed").await;
                        break;
                    }
                },
            }
        }
    }

    fn handle_result(&self, id: Uuid, event: &EngineEvent, output: &LanguageCode) {
        // Held while the event is applied so a teardown cannot interleave
        let current = self.current_session.lock();
        if *current != Some(id) {
            tracing::debug!(session_id = %id, "Dropping event from a finished session");
            return;
        }

        match event {
            EngineEvent::Interim(text) => self.transcript.set_interim(text),
            EngineEvent::Final {
                text,
                matched: true,
            } => {
                if let Some(text) = self.transcript.push_translation(text) {
                    tracing::debug!(text_length = text.len(), "Translation finalized");
                    self.queue.enqueue(&text, output.clone());
                }
            }
            EngineEvent::Final { matched: false, .. } => self.transcript.push_no_match(),
            EngineEvent::Cancelled(_) | EngineEvent::SessionEnded => {}
        }
    }

    /// Tear down session `id` if it is still the current one
    async fn teardown(&self, id: Uuid, reason: &str) {
        let mut slot = self.lifecycle.lock().await;
        if slot.as_ref().map(|active| active.id) != Some(id) {
            return;
        }
        self.teardown_locked(&mut slot, reason).await;
    }

    async fn teardown_locked(&self, slot: &mut Option<ActiveSession>, reason: &str) {
        let Some(ActiveSession { id, handle, _stop: stop }) = slot.take() else {
            return;
        };
        // Events of this session are ignored from here on
        *self.current_session.lock() = None;
        drop(stop);
        self.set_state(SessionState::Stopping);

        if let Err(e) = self.engine.stop_session(&handle).await {
            tracing::error!(session_id = %id, error = %e, "Stop failed");
        }
        self.engine.release(handle);
        self.queue.clear();

        self.set_state(SessionState::Idle);
        tracing::info!(session_id = %id, reason = reason, "Translation session stopped");
    }

    fn set_state(&self, state: SessionState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::debug!(from = %previous, to = %state, "Session state changed");
        }
    }
}

fn parse_language(field: &str, raw: Option<&str>) -> Result<Option<LanguageCode>, SessionError> {
    match raw {
        None => Ok(None),
        Some(raw) => LanguageCode::parse(raw)
            .map(Some)
            .ok_or_else(|| SessionError::Invalid(format!("{} cannot be empty", field))),
    }
}
