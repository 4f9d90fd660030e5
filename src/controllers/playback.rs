use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::playback::{PlaybackQueue, QueueStatus},
    error::{AppError, AppResult},
    infrastructure::repositories::{AudioClip, ClipRepository},
};

pub struct PlaybackController {
    queue: Arc<PlaybackQueue>,
    clips: Arc<ClipRepository>,
}

impl PlaybackController {
    pub fn new(queue: Arc<PlaybackQueue>, clips: Arc<ClipRepository>) -> Self {
        Self { queue, clips }
    }

    /// GET /api/playback - Queue status
    pub async fn get_status(State(controller): State<Arc<PlaybackController>>) -> Json<QueueStatus> {
        Json(controller.queue.status())
    }

    /// GET /api/playback/latest - Most recently spoken clip
    pub async fn get_latest(
        State(controller): State<Arc<PlaybackController>>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let clip = controller
            .clips
            .latest()
            .await
            .ok_or_else(|| AppError::NotFound("No audio has been spoken yet".to_string()))?;
        clip_response(clip)
    }

    /// GET /api/playback/clips/:clip_id - One spoken clip
    pub async fn get_clip(
        State(controller): State<Arc<PlaybackController>>,
        Path(clip_id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let clip = controller
            .clips
            .find(clip_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Clip {}", clip_id)))?;
        clip_response(clip)
    }
}

fn clip_response(clip: AudioClip) -> AppResult<(StatusCode, HeaderMap, Body)> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, header_value(&clip.content_type)?);
    headers.insert("X-Clip-Id", header_value(&clip.id.to_string())?);
    headers.insert("X-Language", header_value(&clip.language)?);
    headers.insert("X-Voice", header_value(&clip.voice)?);
    headers.insert(
        "X-Character-Count",
        header_value(&clip.text.chars().count().to_string())?,
    );

    Ok((StatusCode::OK, headers, Body::from(clip.audio)))
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("Invalid header value {:?}: {}", value, e)))
}
