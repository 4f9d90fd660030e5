use crate::domain::language::LanguageCode;
use crate::domain::synthesis::SynthesizerCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Translated text waiting to be spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackItem {
    text: String,
    language: LanguageCode,
}

impl PlaybackItem {
    /// Returns `None` for blank text
    pub fn new(text: &str, language: LanguageCode) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            language,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    pub pending: usize,
    pub speaking: bool,
    pub ready: bool,
    pub tts_enabled: bool,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<PlaybackItem>,
    speaking: bool,
}

/// FIFO of translated text, spoken one item at a time.
///
/// `speaking` is set while one item is being played and is always cleared by
/// the drain that set it, even when the drain future is dropped.
pub struct PlaybackQueue {
    state: Mutex<QueueState>,
    cache: Arc<SynthesizerCache>,
    tts_enabled: AtomicBool,
    ready: AtomicBool,
    idle: Notify,
}

impl PlaybackQueue {
    pub fn new(cache: Arc<SynthesizerCache>, tts_enabled: bool) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            cache,
            tts_enabled: AtomicBool::new(tts_enabled),
            ready: AtomicBool::new(false),
            idle: Notify::new(),
        }
    }

    /// Append text for playback and kick off a drain.
    ///
    /// Blank text, or any text while TTS is disabled, is ignored and `false`
    /// is returned.
    pub fn enqueue(self: &Arc<Self>, text: &str, language: LanguageCode) -> bool {
        if !self.tts_enabled() {
            return false;
        }
        let Some(item) = PlaybackItem::new(text, language) else {
            return false;
        };

        let pending = {
            let mut state = self.state.lock();
            state.pending.push_back(item);
            state.pending.len()
        };
        tracing::debug!(pending = pending, "Text queued for speech");

        self.spawn_drain();
        true
    }

    /// Speak queued items until the queue is empty.
    ///
    /// Returns immediately when another drain is speaking, the queue is empty,
    /// or synthesis is not ready yet. After each item, successful or not, the
    /// next one is taken right away.
    pub async fn drain(&self) {
        loop {
            let (item, _guard) = {
                let mut state = self.state.lock();
                if state.speaking || !self.is_ready() {
                    return;
                }
                let Some(item) = state.pending.pop_front() else {
                    drop(state);
                    self.idle.notify_waiters();
                    return;
                };
                state.speaking = true;
                (item, SpeakingGuard { queue: self })
            };

            self.play(item).await;
        }
    }

    async fn play(&self, item: PlaybackItem) {
        let Some(synthesizer) = self.cache.get_or_create(item.language()).await else {
            tracing::error!(
                language = %item.language(),
                "Speech synthesis unavailable, skipping item"
            );
            return;
        };

        match synthesizer.speak(item.text()).await {
            Ok(()) => tracing::debug!(
                language = %item.language(),
                voice = synthesizer.voice(),
                text_length = item.text().len(),
                "Playback finished"
            ),
            Err(e) => tracing::error!(
                language = %item.language(),
                voice = synthesizer.voice(),
                error = %e,
                "Error synthesizing speech"
            ),
        }
    }

    fn spawn_drain(self: &Arc<Self>) {
        let queue = Arc::clone(self);
        tokio::spawn(async move { queue.drain().await });
    }

    /// Drop every pending item. An utterance already playing finishes on its own.
    pub fn clear(&self) {
        let dropped = {
            let mut state = self.state.lock();
            let dropped = state.pending.len();
            state.pending.clear();
            dropped
        };
        if dropped > 0 {
            tracing::info!(dropped = dropped, "Playback queue cleared");
        }
        if !self.state.lock().speaking {
            self.idle.notify_waiters();
        }
    }

    /// Open the readiness gate and drain anything queued meanwhile
    pub fn mark_ready(self: &Arc<Self>) {
        if !self.ready.swap(true, Ordering::SeqCst) {
            tracing::info!("Speech synthesis ready");
        }
        self.spawn_drain();
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn set_tts_enabled(&self, enabled: bool) {
        self.tts_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn tts_enabled(&self) -> bool {
        self.tts_enabled.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> QueueStatus {
        let state = self.state.lock();
        QueueStatus {
            pending: state.pending.len(),
            speaking: state.speaking,
            ready: self.is_ready(),
            tts_enabled: self.tts_enabled(),
        }
    }

    fn is_idle(&self) -> bool {
        let state = self.state.lock();
        !state.speaking && state.pending.is_empty()
    }

    /// Wait until nothing is pending and nothing is playing.
    ///
    /// Never resolves while items are pending behind a closed readiness gate.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}

/// Clears the speaking flag when the item's playback ends or is abandoned
struct SpeakingGuard<'a> {
    queue: &'a PlaybackQueue,
}

impl Drop for SpeakingGuard<'_> {
    fn drop(&mut self) {
        let idle = {
            let mut state = self.queue.state.lock();
            state.speaking = false;
            state.pending.is_empty()
        };
        if idle {
            self.queue.idle.notify_waiters();
        }
    }
}
