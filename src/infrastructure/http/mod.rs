pub mod request_id;

pub use request_id::{request_id_middleware, RequestId};

use axum::{middleware, routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    health, languages, playback::PlaybackController, session::SessionController,
};
use crate::domain::session::TranslationSessionController;
use crate::infrastructure::config::Config;

/// Build the application router with all routes configured
pub fn build_router(
    session: Arc<TranslationSessionController>,
    session_controller: Arc<SessionController>,
    playback_controller: Arc<PlaybackController>,
) -> Router {
    let session_routes = Router::new()
        .route("/api/session", get(SessionController::get_status))
        .route(
            "/api/session/settings",
            axum::routing::put(SessionController::update_settings),
        )
        .route("/api/session/start", axum::routing::post(SessionController::start))
        .route("/api/session/stop", axum::routing::post(SessionController::stop))
        .route("/api/session/audio", axum::routing::post(SessionController::push_audio))
        .route("/api/session/transcript", get(SessionController::get_transcript))
        .with_state(session_controller);

    let playback_routes = Router::new()
        .route("/api/playback", get(PlaybackController::get_status))
        .route("/api/playback/latest", get(PlaybackController::get_latest))
        .route("/api/playback/clips/:clip_id", get(PlaybackController::get_clip))
        .with_state(playback_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(session)
        .route("/api/languages", get(languages::list_languages))
        .merge(session_routes)
        .merge(playback_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` until `shutdown` resolves
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Serve `app`, then release the session's speech resources.
///
/// The release runs whether the server stopped on `shutdown` or failed.
pub async fn serve_until_shutdown(
    config: Arc<Config>,
    app: Router,
    session: Arc<TranslationSessionController>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let served = start_http_server(config, app, shutdown)
        .await
        .map_err(|e| e.to_string());

    tracing::info!("Shutting down, releasing speech resources");
    session.shutdown().await;

    served
}
