use crate::e2e::helpers;

use helpers::speech_mocks::mock_audio_bytes;
use helpers::{eventually, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use speech_translator::infrastructure::repositories::EngineEvent;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_an_idle_ready_queue(ctx: &TestContext) {
    let response = ctx.client.get("/api/playback").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["pending"], 0);
    assert_eq!(body["speaking"], false);
    assert_eq!(body["ready"], true);
    assert_eq!(body["tts_enabled"], true);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_before_anything_is_spoken(ctx: &TestContext) {
    let response = ctx.client.get("/api/playback/latest").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("No audio has been spoken yet");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_clips(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/playback/clips/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_final_translations_and_serve_the_clip(ctx: &TestContext) {
    ctx.client.post_empty("/api/session/start").await.unwrap();

    ctx.engine
        .emit(EngineEvent::Final {
            text: "namaste".to_string(),
            matched: true,
        })
        .await;

    let synthesis = ctx.synthesis.clone();
    eventually(move || !synthesis.spoken().is_empty()).await;
    assert_eq!(
        ctx.synthesis.spoken(),
        vec![("hi-IN-SwaraNeural".to_string(), "namaste".to_string())]
    );

    let latest = ctx.client.get("/api/playback/latest").await.unwrap();
    latest
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("x-voice", "hi-IN-SwaraNeural")
        .assert_header("x-language", "hi")
        .assert_header("x-character-count", "7");
    assert_eq!(latest.body_bytes, mock_audio_bytes());

    let clip_id = latest.header("x-clip-id").expect("Missing clip id").clone();
    let clip = ctx
        .client
        .get(&format!("/api/playback/clips/{}", clip_id))
        .await
        .unwrap();
    clip.assert_status(StatusCode::OK);
    assert_eq!(clip.body_bytes, mock_audio_bytes());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_translations_in_arrival_order(ctx: &TestContext) {
    ctx.client.post_empty("/api/session/start").await.unwrap();

    for text in ["one", "two", "three"] {
        ctx.engine
            .emit(EngineEvent::Final {
                text: text.to_string(),
                matched: true,
            })
            .await;
    }

    let synthesis = ctx.synthesis.clone();
    eventually(move || synthesis.spoken().len() == 3).await;
    let texts: Vec<String> = ctx
        .synthesis
        .spoken()
        .into_iter()
        .map(|(_, text)| text)
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_speak_when_tts_is_disabled(ctx: &TestContext) {
    ctx.client
        .put("/api/session/settings", &json!({ "tts_enabled": false }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    ctx.client.post_empty("/api/session/start").await.unwrap();

    ctx.engine
        .emit(EngineEvent::Final {
            text: "namaste".to_string(),
            matched: true,
        })
        .await;

    // The translation still lands in the transcript
    let session = ctx.session.clone();
    eventually(move || session.transcript().lines.len() == 1).await;

    assert!(ctx.synthesis.spoken().is_empty());
    let status = ctx.client.get("/api/playback").await.unwrap();
    assert_eq!(status.body.as_ref().unwrap()["tts_enabled"], false);
    ctx.client
        .get("/api/playback/latest")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}
