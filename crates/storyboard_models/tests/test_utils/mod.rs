//! Shared helpers for Gemini gateway tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use storyboard_models::{GeminiClient, StoryboardConfig};
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-key";

/// Starts a mock server and a client pointed at it.
pub async fn mock_gemini() -> anyhow::Result<(MockServer, GeminiClient)> {
    let server = MockServer::start().await;
    let config = StoryboardConfig::bundled()?;
    let client = GeminiClient::with_api_key(TEST_KEY, &config)?.with_base_url(server.uri());
    Ok((server, client))
}

/// `generateContent` path for a model.
pub fn generate_path(model: &str) -> String {
    format!("/models/{}:generateContent", model)
}

/// `streamGenerateContent` path for a model.
pub fn stream_path(model: &str) -> String {
    format!("/models/{}:streamGenerateContent", model)
}

/// A single-candidate response carrying `text`.
pub fn text_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// JSON response template.
pub fn json_response(body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

/// An SSE body streaming one text fragment per event.
pub fn sse_response(fragments: &[&str]) -> ResponseTemplate {
    let body: String = fragments
        .iter()
        .map(|fragment| format!("data: {}\r\n\r\n", text_body(fragment)))
        .collect();
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}
