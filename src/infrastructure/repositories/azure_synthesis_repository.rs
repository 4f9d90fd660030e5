use super::clip_repository::{AudioClip, ClipRepository};
use super::synthesis_repository::{SynthesisRepository, Synthesizer};
use crate::domain::language::LanguageCode;
use crate::infrastructure::config::SpeechCredentials;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client as HttpClient, Url};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

const USER_AGENT: &str = "speech-translator";

/// Azure Speech implementation of the synthesis repository
pub struct AzureSynthesisRepository {
    http: HttpClient,
    credentials: SpeechCredentials,
    output_format: String,
    clips: Arc<ClipRepository>,
}

impl AzureSynthesisRepository {
    pub fn new(
        http: HttpClient,
        credentials: SpeechCredentials,
        output_format: String,
        clips: Arc<ClipRepository>,
    ) -> Self {
        Self {
            http,
            credentials,
            output_format,
            clips,
        }
    }

    fn endpoint(&self) -> Result<Url, String> {
        let raw = format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.credentials.region
        );
        Url::parse(&raw).map_err(|e| format!("Invalid synthesis endpoint {}: {}", raw, e))
    }

    fn build_synthesizer(
        &self,
        language: &LanguageCode,
        voice: &str,
    ) -> Result<AzureSynthesizer, String> {
        if voice.trim().is_empty() {
            return Err("Voice name cannot be empty".to_string());
        }
        if self.credentials.key.trim().is_empty() {
            return Err("Speech key is empty".to_string());
        }

        let endpoint = self.endpoint()?;

        tracing::info!(
            language = %language,
            voice = voice,
            endpoint = %endpoint,
            output_format = %self.output_format,
            "Azure synthesizer created"
        );

        Ok(AzureSynthesizer {
            http: self.http.clone(),
            endpoint,
            key: self.credentials.key.clone(),
            language: language.clone(),
            voice: voice.to_string(),
            output_format: self.output_format.clone(),
            clips: self.clips.clone(),
            closed: AtomicBool::new(false),
        })
    }
}

impl SynthesisRepository for AzureSynthesisRepository {
    fn create_synthesizer(
        &self,
        language: &LanguageCode,
        voice: &str,
    ) -> Result<Arc<dyn Synthesizer>, String> {
        Ok(Arc::new(self.build_synthesizer(language, voice)?))
    }
}

/// Synthesizer bound to one Azure neural voice
pub struct AzureSynthesizer {
    http: HttpClient,
    endpoint: Url,
    key: String,
    language: LanguageCode,
    voice: String,
    output_format: String,
    clips: Arc<ClipRepository>,
    closed: AtomicBool,
}

impl AzureSynthesizer {
    async fn call_azure(&self, text: &str) -> Result<Vec<u8>, String> {
        let ssml = build_ssml(&self.voice, text);

        tracing::debug!(
            voice = %self.voice,
            text_length = text.len(),
            text_preview = preview(text),
            "Calling Azure text-to-speech"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .body(ssml)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = %self.voice, "Azure text-to-speech request failed");
                format!("Azure TTS request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status.as_u16(),
                voice = %self.voice,
                body = %body,
                "Azure text-to-speech returned an error status"
            );
            return Err(format!("Azure TTS error status {}: {}", status, body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read synthesized audio: {}", e))?;

        Ok(audio.to_vec())
    }

    fn clip_for(&self, text: &str, audio: Vec<u8>) -> AudioClip {
        AudioClip {
            id: Uuid::new_v4(),
            language: self.language.to_string(),
            voice: self.voice.clone(),
            text: text.to_string(),
            content_type: content_type_for(&self.output_format).to_string(),
            audio,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl Synthesizer for AzureSynthesizer {
    fn voice(&self) -> &str {
        &self.voice
    }

    async fn speak(&self, text: &str) -> Result<(), String> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(format!("Synthesizer for {} is closed", self.voice));
        }

        let start_time = std::time::Instant::now();
        let audio = self.call_azure(text).await?;

        tracing::info!(
            provider = "azure",
            voice = %self.voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        // Warm-up placeholders produce no clip
        if !text.trim().is_empty() {
            self.clips.store(self.clip_for(text, audio)).await;
        }

        Ok(())
    }

    fn close(&self) -> Result<(), String> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(format!("Synthesizer for {} already closed", self.voice));
        }
        tracing::debug!(voice = %self.voice, "Azure synthesizer closed");
        Ok(())
    }
}

/// Locale part of a voice name: `hi-IN-SwaraNeural` -> `hi-IN`, `xx-Neural` -> `xx`
fn voice_locale(voice: &str) -> &str {
    voice.rsplit_once('-').map(|(locale, _)| locale).unwrap_or(voice)
}

fn content_type_for(output_format: &str) -> &'static str {
    if output_format.contains("mp3") {
        "audio/mpeg"
    } else if output_format.starts_with("riff") {
        "audio/wav"
    } else if output_format.starts_with("ogg") {
        "audio/ogg"
    } else if output_format.starts_with("webm") {
        "audio/webm"
    } else {
        "application/octet-stream"
    }
}

fn build_ssml(voice: &str, text: &str) -> String {
    format!(
        "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        escape_xml(voice_locale(voice)),
        escape_xml(voice),
        escape_xml(text)
    )
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
