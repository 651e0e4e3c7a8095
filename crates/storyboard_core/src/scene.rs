//! Storyboard panels.

use crate::ImageRef;
use serde::{Deserialize, Serialize};

/// One storyboard panel.
///
/// Scenes are created in bulk by script analysis with no image and
/// `generation_in_flight == false`. Only the scene generator moves a scene
/// through its generation cycle via [`Scene::begin_generation`] and
/// [`Scene::finish_generation`].
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImageRef, Scene};
///
/// let mut scene = Scene::new(1, "John waits.", "A lone man in a coffee shop, grey light.");
/// assert!(!scene.generation_in_flight());
///
/// scene.begin_generation();
/// assert!(scene.generation_in_flight());
///
/// scene.finish_generation(Some(ImageRef::new("image/png", "AAAA")));
/// assert!(!scene.generation_in_flight());
/// assert!(scene.has_image());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Scene {
    /// Position reported by analysis (not validated for uniqueness)
    #[getter(copy)]
    sequence_number: u32,
    /// Brief narrative description of the moment
    narrative_description: String,
    /// Prompt sent verbatim (after the style directive) to image synthesis
    visual_prompt: String,
    /// Generated image, absent until synthesis succeeds
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_image: Option<ImageRef>,
    /// Whether a synthesis call for this scene is outstanding
    #[builder(default)]
    #[serde(default)]
    #[getter(skip)]
    generation_in_flight: bool,
}

impl Scene {
    /// Creates an idle scene without an image.
    pub fn new(
        sequence_number: u32,
        narrative_description: impl Into<String>,
        visual_prompt: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            narrative_description: narrative_description.into(),
            visual_prompt: visual_prompt.into(),
            generated_image: None,
            generation_in_flight: false,
        }
    }

    /// Creates a new scene builder.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Whether a synthesis call for this scene is outstanding.
    pub fn generation_in_flight(&self) -> bool {
        self.generation_in_flight
    }

    /// Whether the scene already has an image.
    pub fn has_image(&self) -> bool {
        self.generated_image.is_some()
    }

    /// Marks a synthesis call as outstanding.
    pub fn begin_generation(&mut self) {
        self.generation_in_flight = true;
    }

    /// Settles the outstanding call.
    ///
    /// A successful image replaces any previous one; `None` leaves the current
    /// image untouched. The in-flight flag is always cleared.
    pub fn finish_generation(&mut self, image: Option<ImageRef>) {
        if let Some(image) = image {
            self.generated_image = Some(image);
        }
        self.generation_in_flight = false;
    }
}
