use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // Azure Speech, both key and region are needed to translate
    pub speech_credentials: Option<SpeechCredentials>,
    // Session defaults
    pub default_input_language: String,
    pub default_output_language: String,
    pub tts_enabled: bool,
    // Synthesized audio
    pub tts_output_format: String,
    pub clip_cache_capacity: u64,
    pub clip_cache_ttl_secs: u64,
}

/// Credentials for the Azure speech and translator services
#[derive(Clone, Deserialize)]
pub struct SpeechCredentials {
    pub key: String,
    pub region: String,
    pub translator_key: String,
}

// Keys stay out of logs
impl std::fmt::Debug for SpeechCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechCredentials")
            .field("key", &"<redacted>")
            .field("region", &self.region)
            .field("translator_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            speech_credentials: speech_credentials(
                non_empty_var("SPEECH_KEY"),
                non_empty_var("SPEECH_REGION"),
                non_empty_var("TRANSLATOR_KEY"),
            ),
            default_input_language: env::var("DEFAULT_INPUT_LANGUAGE")
                .unwrap_or_else(|_| "es-ES".to_string()),
            default_output_language: env::var("DEFAULT_OUTPUT_LANGUAGE")
                .unwrap_or_else(|_| "hi".to_string()),
            tts_enabled: env::var("TTS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            tts_output_format: env::var("TTS_OUTPUT_FORMAT")
                .unwrap_or_else(|_| "audio-16khz-32kbitrate-mono-mp3".to_string()),
            clip_cache_capacity: env::var("CLIP_CACHE_CAPACITY")
                .unwrap_or_else(|_| "50".to_string())
                .parse()?,
            clip_cache_ttl_secs: env::var("CLIP_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech_credentials.is_some()
    }

    pub fn clip_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.clip_cache_ttl_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Translation is only possible with both a key and a region.
/// The translator key defaults to the speech key (multi-service resource).
fn speech_credentials(
    key: Option<String>,
    region: Option<String>,
    translator_key: Option<String>,
) -> Option<SpeechCredentials> {
    let key = key?;
    let region = region?;
    Some(SpeechCredentials {
        translator_key: translator_key.unwrap_or_else(|| key.clone()),
        key,
        region,
    })
}
