use crate::domain::language::LanguageCode;
use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Events emitted by a running recognition/translation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Provisional text for the utterance currently being spoken
    Interim(String),
    /// Committed translation of one utterance. `matched` is false when no
    /// speech could be recognized.
    Final { text: String, matched: bool },
    /// The engine aborted the session
    Cancelled(String),
    /// The engine closed the session
    SessionEnded,
}

/// Identifies one session on the engine.
///
/// Not `Clone`: `release` consumes it, so a session's
/// resources can only be released once.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionHandle {
    id: Uuid,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A started session and the channel its events arrive on
pub struct EngineSession {
    pub handle: SessionHandle,
    pub events: mpsc::Receiver<EngineEvent>,
}

/// Repository for continuous speech translation.
/// Abstracts the cloud recognition + translation engine.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Open a session recognizing `input` and translating into `output`
    async fn start_session(
        &self,
        input: &LanguageCode,
        output: &LanguageCode,
    ) -> Result<EngineSession, String>;

    /// Feed one chunk of captured audio into the session
    async fn push_audio(&self, handle: &SessionHandle, audio: Vec<u8>) -> Result<(), String>;

    /// Ask the engine to finish the session gracefully
    async fn stop_session(&self, handle: &SessionHandle) -> Result<(), String>;

    /// Drop everything the engine holds for the session
    fn release(&self, handle: SessionHandle);
}
