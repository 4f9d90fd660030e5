use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_translator::controllers::{playback::PlaybackController, session::SessionController};
use speech_translator::domain::language::LanguageCode;
use speech_translator::domain::playback::PlaybackQueue;
use speech_translator::domain::session::{SessionSettings, TranslationSessionController};
use speech_translator::domain::synthesis::SynthesizerCache;
use speech_translator::infrastructure::config::{Config, LogFormat};
use speech_translator::infrastructure::http::{build_router, serve_until_shutdown};
use speech_translator::infrastructure::repositories::{
    AzureSynthesisRepository, AzureTranslationRepository, ClipRepository,
    DisabledSpeechRepository, SynthesisRepository, TranslationRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting speech translator on {}:{}",
        config.host,
        config.port
    );

    let clips = Arc::new(ClipRepository::new(
        config.clip_cache_capacity,
        config.clip_cache_ttl(),
    ));

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Speech service repositories
    let (synthesis_repo, translation_repo) = match &config.speech_credentials {
        Some(credentials) => {
            tracing::info!(region = %credentials.region, "Azure speech services configured");
            let http = reqwest::Client::new();
            let synthesis: Arc<dyn SynthesisRepository> = Arc::new(AzureSynthesisRepository::new(
                http.clone(),
                credentials.clone(),
                config.tts_output_format.clone(),
                clips.clone(),
            ));
            let translation: Arc<dyn TranslationRepository> =
                Arc::new(AzureTranslationRepository::new(http, credentials.clone()));
            (synthesis, translation)
        }
        None => {
            tracing::warn!(
                "SPEECH_KEY or SPEECH_REGION not set. Translation is disabled until both are provided"
            );
            let disabled = Arc::new(DisabledSpeechRepository);
            (
                disabled.clone() as Arc<dyn SynthesisRepository>,
                disabled as Arc<dyn TranslationRepository>,
            )
        }
    };

    // 2. Domain services
    let settings = SessionSettings {
        input_language: LanguageCode::parse(&config.default_input_language)
            .ok_or_else(|| anyhow::anyhow!("DEFAULT_INPUT_LANGUAGE cannot be empty"))?,
        output_language: LanguageCode::parse(&config.default_output_language)
            .ok_or_else(|| anyhow::anyhow!("DEFAULT_OUTPUT_LANGUAGE cannot be empty"))?,
        tts_enabled: config.tts_enabled,
    };
    let cache = Arc::new(SynthesizerCache::new(synthesis_repo));
    let queue = Arc::new(PlaybackQueue::new(cache.clone(), settings.tts_enabled));
    let session = Arc::new(TranslationSessionController::new(
        translation_repo,
        cache,
        queue.clone(),
        settings,
        config.speech_enabled(),
    ));

    // Warm up the default output voice in the background
    {
        let session = session.clone();
        tokio::spawn(async move { session.prewarm().await });
    }

    // 3. HTTP controllers
    let session_controller = Arc::new(SessionController::new(session.clone()));
    let playback_controller = Arc::new(PlaybackController::new(queue, clips));

    let app = build_router(session.clone(), session_controller, playback_controller);
    let config = Arc::new(config);

    serve_until_shutdown(config, app, session, shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speech_translator=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speech_translator=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
