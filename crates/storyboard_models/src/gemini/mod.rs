//! Google Gemini REST gateway.
//!
//! [`GeminiClient`] implements every studio capability against the
//! `generateContent` family of endpoints:
//! - Script analysis with a JSON response schema
//! - Image synthesis with a 16:9 `imageConfig`
//! - Chat replies over `streamGenerateContent?alt=sse`

mod client;
mod protocol;
mod sse;

pub use client::GeminiClient;
pub use protocol::{
    AnalysisPayload, Candidate, Content, GenerateContentRequest, GenerateContentRequestBuilder,
    GenerateContentResponse, GenerationConfig, ImageConfig, InlineData, Part, Schema, SchemaType,
};
pub use sse::SseDecoder;
