use super::translation_repository::{EngineEvent, EngineSession, SessionHandle, TranslationRepository};
use crate::domain::language::LanguageCode;
use crate::infrastructure::config::SpeechCredentials;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

const TRANSLATOR_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com/translate";
const EVENT_BUFFER: usize = 64;
const AUDIO_BUFFER: usize = 16;

/// Outcome of recognizing one audio chunk
#[derive(Debug, Clone, PartialEq, Eq)]
enum Recognition {
    Recognized(String),
    NoMatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranslateRequestItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponseItem {
    translations: Vec<TranslationText>,
}

#[derive(Debug, Deserialize)]
struct TranslationText {
    text: String,
}

struct ActiveSession {
    audio_tx: Option<mpsc::Sender<Vec<u8>>>,
    worker: JoinHandle<()>,
}

/// Everything a session worker needs to call Azure
#[derive(Clone)]
struct SessionContext {
    http: HttpClient,
    credentials: SpeechCredentials,
    input: LanguageCode,
    output: LanguageCode,
}

/// Azure implementation of the translation repository.
///
/// Each pushed audio chunk (WAV, 16 kHz mono PCM) is recognized with the
/// short-audio speech endpoint and the text is translated with the Translator
/// service. Chunks of one session are processed strictly in order.
pub struct AzureTranslationRepository {
    http: HttpClient,
    credentials: SpeechCredentials,
    sessions: Mutex<HashMap<Uuid, ActiveSession>>,
}

impl AzureTranslationRepository {
    pub fn new(http: HttpClient, credentials: SpeechCredentials) -> Self {
        Self {
            http,
            credentials,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TranslationRepository for AzureTranslationRepository {
    async fn start_session(
        &self,
        input: &LanguageCode,
        output: &LanguageCode,
    ) -> Result<EngineSession, String> {
        let handle = SessionHandle::new();
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (audio_tx, audio_rx) = mpsc::channel(AUDIO_BUFFER);

        let context = SessionContext {
            http: self.http.clone(),
            credentials: self.credentials.clone(),
            input: input.clone(),
            output: output.clone(),
        };
        let session_id = handle.id();
        let worker = tokio::spawn(run_session(session_id, context, audio_rx, event_tx));

        self.sessions.lock().insert(
            session_id,
            ActiveSession {
                audio_tx: Some(audio_tx),
                worker,
            },
        );

        tracing::info!(
            session_id = %session_id,
            input_language = %input,
            output_language = %output,
            region = %self.credentials.region,
            "Azure translation session started"
        );

        Ok(EngineSession {
            handle,
            events: event_rx,
        })
    }

    async fn push_audio(&self, handle: &SessionHandle, audio: Vec<u8>) -> Result<(), String> {
        let audio_tx = self
            .sessions
            .lock()
            .get(&handle.id())
            .and_then(|session| session.audio_tx.clone())
            .ok_or_else(|| format!("Session {} is not accepting audio", handle.id()))?;

        audio_tx
            .send(audio)
            .await
            .map_err(|_| format!("Session {} has stopped", handle.id()))
    }

    async fn stop_session(&self, handle: &SessionHandle) -> Result<(), String> {
        let mut sessions = self.sessions.lock();
        let session = sessions
            .get_mut(&handle.id())
            .ok_or_else(|| format!("Unknown session {}", handle.id()))?;

        // Closing the audio channel lets the worker finish and report the end
        session.audio_tx.take();
        tracing::info!(session_id = %handle.id(), "Azure translation session stopping");
        Ok(())
    }

    fn release(&self, handle: SessionHandle) {
        if let Some(session) = self.sessions.lock().remove(&handle.id()) {
            session.worker.abort();
            tracing::debug!(session_id = %handle.id(), "Azure translation session released");
        }
    }
}

async fn run_session(
    session_id: Uuid,
    context: SessionContext,
    mut audio_rx: mpsc::Receiver<Vec<u8>>,
    events: mpsc::Sender<EngineEvent>,
) {
    while let Some(chunk) = audio_rx.recv().await {
        if let Err(reason) = process_chunk(&context, chunk, &events).await {
            tracing::error!(session_id = %session_id, reason = %reason, "Azure translation session cancelled");
            let _ = events.send(EngineEvent::Cancelled(reason)).await;
            return;
        }
        if events.is_closed() {
            return;
        }
    }

    let _ = events.send(EngineEvent::SessionEnded).await;
}

async fn process_chunk(
    context: &SessionContext,
    chunk: Vec<u8>,
    events: &mpsc::Sender<EngineEvent>,
) -> Result<(), String> {
    let event = match recognize(context, chunk).await? {
        Recognition::NoMatch => EngineEvent::Final {
            text: String::new(),
            matched: false,
        },
        Recognition::Recognized(text) => {
            let _ = events.send(EngineEvent::Interim(text.clone())).await;
            let translation = translate(context, &text).await?;
            EngineEvent::Final {
                text: translation,
                matched: true,
            }
        }
    };
    let _ = events.send(event).await;
    Ok(())
}

async fn recognize(context: &SessionContext, chunk: Vec<u8>) -> Result<Recognition, String> {
    let url = format!(
        "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
        context.credentials.region
    );

    let response = context
        .http
        .post(url)
        .query(&[("language", context.input.as_str()), ("format", "simple")])
        .header("Ocp-Apim-Subscription-Key", &context.credentials.key)
        .header(
            reqwest::header::CONTENT_TYPE,
            "audio/wav; codecs=audio/pcm; samplerate=16000",
        )
        .header(reqwest::header::ACCEPT, "application/json")
        .body(chunk)
        .send()
        .await
        .map_err(|e| format!("Speech recognition request error: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Speech recognition error status {}: {}", status, body));
    }

    let body: RecognitionResponse = response
        .json()
        .await
        .map_err(|e| format!("Invalid speech recognition response: {}", e))?;

    interpret_recognition(body)
}

fn interpret_recognition(body: RecognitionResponse) -> Result<Recognition, String> {
    match body.recognition_status.as_str() {
        "Success" => match body.display_text {
            Some(text) if !text.trim().is_empty() => Ok(Recognition::Recognized(text)),
            _ => Ok(Recognition::NoMatch),
        },
        "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" => Ok(Recognition::NoMatch),
        other => Err(format!("Speech recognition failed with status {}", other)),
    }
}

async fn translate(context: &SessionContext, text: &str) -> Result<String, String> {
    let response = context
        .http
        .post(TRANSLATOR_ENDPOINT)
        .query(&[("api-version", "3.0"), ("to", context.output.as_str())])
        .header(
            "Ocp-Apim-Subscription-Key",
            &context.credentials.translator_key,
        )
        .header("Ocp-Apim-Subscription-Region", &context.credentials.region)
        .json(&[TranslateRequestItem { text }])
        .send()
        .await
        .map_err(|e| format!("Translation request error: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Translation error status {}: {}", status, body));
    }

    let items: Vec<TranslateResponseItem> = response
        .json()
        .await
        .map_err(|e| format!("Invalid translation response: {}", e))?;

    first_translation(items)
        .ok_or_else(|| format!("Translation response had no text for {}", context.output))
}

fn first_translation(items: Vec<TranslateResponseItem>) -> Option<String> {
    items
        .into_iter()
        .next()?
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
}
