//! Wire types for the Gemini `generateContent` REST API.
//!
//! Only the subset the studio sends and reads is modelled. Unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storyboard_core::{Resolution, Role, Scene, Storyboard};
use storyboard_interface::ChatTurn;

// ─── Content ────────────────────────────────────────────────────────────────

/// A turn or system instruction: an optional role plus parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// User turn holding one text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, text)
    }

    /// Turn with the given author.
    pub fn with_role(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.wire_name().to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less content used for `systemInstruction`.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

impl From<&ChatTurn> for Content {
    fn from(turn: &ChatTurn) -> Self {
        Self::with_role(*turn.role(), turn.text().clone())
    }
}

/// A single content part. Exactly one field is normally set.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getter(skip)]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    mime_type: String,
    #[serde(default)]
    data: String,
}

// ─── Request ────────────────────────────────────────────────────────────────

/// Body of `generateContent` and `streamGenerateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into, strip_option))]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateContentRequestBuilder {
        GenerateContentRequestBuilder::default()
    }
}

/// Output controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

impl GenerationConfig {
    /// JSON response mode constrained by `schema`.
    pub fn json(schema: Schema) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            image_config: None,
        }
    }

    /// Image output with the given size tier.
    pub fn image(image_config: ImageConfig) -> Self {
        Self {
            image_config: Some(image_config),
            ..Self::default()
        }
    }
}

/// Aspect ratio and size of generated images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    aspect_ratio: String,
    image_size: Resolution,
}

impl ImageConfig {
    /// Storyboard panel aspect ratio.
    pub const PANEL_ASPECT_RATIO: &'static str = "16:9";

    /// 16:9 panel at the given size tier.
    pub fn panel(image_size: Resolution) -> Self {
        Self {
            aspect_ratio: Self::PANEL_ASPECT_RATIO.to_string(),
            image_size,
        }
    }
}

/// JSON schema subset understood by `responseSchema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<String>>,
}

/// Schema value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
}

impl Schema {
    fn leaf(schema_type: SchemaType, description: Option<&str>) -> Self {
        Self {
            schema_type,
            description: description.map(str::to_string),
            properties: None,
            items: None,
            required: None,
        }
    }

    fn object(properties: Vec<(&str, Schema)>) -> Self {
        let required = properties.iter().map(|(name, _)| name.to_string()).collect();
        Self {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.to_string(), schema))
                    .collect(),
            ),
            required: Some(required),
            ..Self::leaf(SchemaType::Object, None)
        }
    }

    fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array, None)
        }
    }

    /// `{scenes: [{sceneNumber, description, visualPrompt}]}`, every field required.
    pub fn storyboard() -> Self {
        let scene = Self::object(vec![
            ("sceneNumber", Self::leaf(SchemaType::Integer, None)),
            ("description", Self::leaf(SchemaType::String, None)),
            (
                "visualPrompt",
                Self::leaf(
                    SchemaType::String,
                    Some(
                        "A detailed, descriptive prompt suitable for an image generation AI, \
                         describing the visual elements, lighting, composition, and mood of the scene.",
                    ),
                ),
            ),
        ]);
        Self::object(vec![("scenes", Self::array(scene))])
    }
}

// ─── Response ───────────────────────────────────────────────────────────────

/// Body of a `generateContent` response or of one streamed SSE event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One alternative answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let parts = self.candidates.first()?.content.as_ref()?.parts();
        let texts: Vec<&str> = parts.iter().filter_map(|part| part.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// First inline payload with non-empty data across all candidates.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.inline_data.as_ref())
            .find(|inline| !inline.data.is_empty())
    }
}

// ─── Analysis payload ───────────────────────────────────────────────────────

/// JSON document the analysis model answers with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisPayload {
    scenes: Vec<ScenePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenePayload {
    scene_number: u32,
    description: String,
    visual_prompt: String,
}

impl From<AnalysisPayload> for Storyboard {
    fn from(payload: AnalysisPayload) -> Self {
        payload
            .scenes
            .into_iter()
            .map(|scene| Scene::new(scene.scene_number, scene.description, scene.visual_prompt))
            .collect()
    }
}
