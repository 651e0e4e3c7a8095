//! Parameters that steer image synthesis.

use serde::{Deserialize, Serialize};

/// Output size tier for generated images.
///
/// # Examples
///
/// ```
/// use storyboard_core::Resolution;
/// use std::str::FromStr;
///
/// assert_eq!(Resolution::default(), Resolution::OneK);
/// assert_eq!(Resolution::FourK.to_string(), "4K");
/// assert_eq!(Resolution::from_str("2k").unwrap(), Resolution::TwoK);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Resolution {
    /// 1K output
    #[default]
    #[serde(rename = "1K")]
    #[strum(serialize = "1K")]
    OneK,
    /// 2K output
    #[serde(rename = "2K")]
    #[strum(serialize = "2K")]
    TwoK,
    /// 4K output
    #[serde(rename = "4K")]
    #[strum(serialize = "4K")]
    FourK,
}

/// Rendering style directive prefixed to every image prompt.
///
/// # Examples
///
/// ```
/// use storyboard_core::ArtStyle;
/// use std::str::FromStr;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(ArtStyle::ComicBook.to_string(), "Comic Book");
/// assert_eq!(ArtStyle::from_str("line art").unwrap(), ArtStyle::LineArt);
/// assert_eq!(ArtStyle::iter().count(), 9);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ArtStyle {
    /// Film still look
    #[default]
    Cinematic,
    /// Photographic realism
    Photorealistic,
    /// Western animation
    Animated,
    /// Japanese animation
    Anime,
    /// Inked comic panels
    #[serde(rename = "Comic Book")]
    #[strum(serialize = "Comic Book")]
    ComicBook,
    /// Watercolor painting
    Watercolor,
    /// High-contrast black and white
    Noir,
    /// Neon-lit science fiction
    Cyberpunk,
    /// Clean outline drawing
    #[serde(rename = "Line Art")]
    #[strum(serialize = "Line Art")]
    LineArt,
}

impl ArtStyle {
    /// Directive prepended to the scene prompt.
    pub fn directive(&self) -> String {
        format!("Render this scene in a {} art style.", self)
    }

    /// Final prompt sent for a scene rendered in this style.
    ///
    /// ```
    /// use storyboard_core::ArtStyle;
    ///
    /// assert_eq!(
    ///     ArtStyle::Noir.compose_prompt("A detective in the rain."),
    ///     "Render this scene in a Noir art style. A detective in the rain."
    /// );
    /// ```
    pub fn compose_prompt(&self, visual_prompt: &str) -> String {
        format!("{} {}", self.directive(), visual_prompt)
    }
}

/// Process-wide synthesis selection.
///
/// Applies to every synthesis call issued after it is set; scenes that already
/// have images are not touched when it changes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerationParameters {
    /// Output size tier
    resolution: Resolution,
    /// Art style directive
    style: ArtStyle,
}

impl GenerationParameters {
    /// Creates parameters from a resolution and style.
    pub fn new(resolution: Resolution, style: ArtStyle) -> Self {
        Self { resolution, style }
    }

    /// Creates a new parameters builder.
    pub fn builder() -> GenerationParametersBuilder {
        GenerationParametersBuilder::default()
    }
}
