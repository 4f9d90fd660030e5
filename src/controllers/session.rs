use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::session::{
        SessionSettings, SessionStatus, SettingsUpdate, TranscriptSnapshot,
        TranslationSessionController,
    },
    error::AppResult,
};

/// Response for POST /api/session/start
#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub session_id: Uuid,
}

pub struct SessionController {
    session: Arc<TranslationSessionController>,
}

impl SessionController {
    pub fn new(session: Arc<TranslationSessionController>) -> Self {
        Self { session }
    }

    /// GET /api/session - Current state and settings
    pub async fn get_status(
        State(controller): State<Arc<SessionController>>,
    ) -> Json<SessionStatus> {
        Json(controller.session.status())
    }

    /// PUT /api/session/settings - Change languages or the TTS toggle
    pub async fn update_settings(
        State(controller): State<Arc<SessionController>>,
        Json(request): Json<SettingsUpdate>,
    ) -> AppResult<Json<SessionSettings>> {
        let settings = controller.session.update_settings(request).await?;
        Ok(Json(settings))
    }

    /// POST /api/session/start - Start translating
    pub async fn start(
        State(controller): State<Arc<SessionController>>,
    ) -> AppResult<(StatusCode, Json<StartResponse>)> {
        let session_id = controller.session.start().await?;
        Ok((StatusCode::CREATED, Json(StartResponse { session_id })))
    }

    /// POST /api/session/stop - Stop translating, no-op when idle
    pub async fn stop(State(controller): State<Arc<SessionController>>) -> Json<SessionStatus> {
        controller.session.stop().await;
        Json(controller.session.status())
    }

    /// POST /api/session/audio - Push one WAV chunk of captured speech
    pub async fn push_audio(
        State(controller): State<Arc<SessionController>>,
        body: Bytes,
    ) -> AppResult<StatusCode> {
        controller.session.push_audio(body.to_vec()).await?;
        Ok(StatusCode::ACCEPTED)
    }

    /// GET /api/session/transcript - Committed lines plus the interim line
    pub async fn get_transcript(
        State(controller): State<Arc<SessionController>>,
    ) -> Json<TranscriptSnapshot> {
        Json(controller.session.transcript())
    }
}
