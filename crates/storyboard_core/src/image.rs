//! Opaque handles to generated images.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use storyboard_error::{StoryboardResult, SynthesisError, SynthesisErrorKind};

/// An inline image returned by the provider: MIME type plus base64 payload.
///
/// The payload is kept encoded; it is only decoded when the host writes it out.
///
/// # Examples
///
/// ```
/// use storyboard_core::ImageRef;
///
/// let image = ImageRef::new("image/png", "iVBORw0KGgo=");
/// assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
/// assert_eq!(image.extension(), "png");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ImageRef {
    /// MIME type, e.g. "image/png"
    mime_type: String,
    /// Base64-encoded image bytes
    data: String,
}

impl ImageRef {
    /// Creates a new image reference.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Renders the image as a `data:` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decodes the base64 payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`SynthesisError`] if the payload is not valid base64.
    pub fn decode(&self) -> StoryboardResult<Vec<u8>> {
        STANDARD.decode(self.data.as_bytes()).map_err(|e| {
            SynthesisError::new(SynthesisErrorKind::InvalidPayload(e.to_string())).into()
        })
    }

    /// File extension matching the MIME subtype ("png", "jpeg", ...).
    pub fn extension(&self) -> &str {
        match self.mime_type.split_once('/') {
            Some((_, "jpeg")) => "jpg",
            Some((_, subtype)) if !subtype.is_empty() => subtype,
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trips_payload_bytes() {
        let image = ImageRef::new("image/png", STANDARD.encode([0x89, b'P', b'N', b'G']));
        assert_eq!(image.decode().unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn decode_rejects_garbage() {
        let image = ImageRef::new("image/png", "not base64!!");
        assert!(image.decode().is_err());
    }

    #[test]
    fn extension_handles_jpeg_and_unknown() {
        assert_eq!(ImageRef::new("image/jpeg", "").extension(), "jpg");
        assert_eq!(ImageRef::new("image/webp", "").extension(), "webp");
        assert_eq!(ImageRef::new("garbage", "").extension(), "bin");
    }
}
