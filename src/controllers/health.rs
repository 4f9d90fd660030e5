use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::session::TranslationSessionController;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready once credentials are present and the default synthesizer is warm
pub async fn health_ready(
    State(session): State<Arc<TranslationSessionController>>,
) -> impl IntoResponse {
    let speech = if session.is_enabled() {
        "configured"
    } else {
        "missing_credentials"
    };
    let synthesis_ready = session.queue().is_ready();
    let synthesis = if synthesis_ready { "ready" } else { "initializing" };

    if session.is_enabled() && synthesis_ready {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "speech": speech,
                "synthesis": synthesis
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "speech": speech,
                "synthesis": synthesis
            })),
        )
    }
}
