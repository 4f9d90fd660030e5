use chrono::{DateTime, Utc};
use moka::future::Cache;
use parking_lot::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// Synthesized audio for one spoken playback item
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub id: Uuid,
    pub language: String,
    pub voice: String,
    pub text: String,
    pub content_type: String,
    pub audio: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Holds recently spoken clips so clients can fetch and play them.
/// Clips expire after a fixed time to live; nothing is persisted.
pub struct ClipRepository {
    cache: Cache<Uuid, AudioClip>,
    latest: Mutex<Option<Uuid>>,
}

impl ClipRepository {
    pub fn new(capacity: u64, time_to_live: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(time_to_live)
                .build(),
            latest: Mutex::new(None),
        }
    }

    pub async fn store(&self, clip: AudioClip) {
        let id = clip.id;
        tracing::debug!(
            clip_id = %id,
            language = %clip.language,
            audio_size = clip.audio.len(),
            "Audio clip stored"
        );
        self.cache.insert(id, clip).await;
        *self.latest.lock() = Some(id);
    }

    pub async fn find(&self, id: Uuid) -> Option<AudioClip> {
        self.cache.get(&id).await
    }

    /// Most recently stored clip, if it has not expired yet
    pub async fn latest(&self) -> Option<AudioClip> {
        let id = (*self.latest.lock())?;
        self.cache.get(&id).await
    }
}
