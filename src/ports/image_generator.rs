//! Image generator port for text-to-image APIs.

use std::future::Future;
use std::pin::Pin;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ImageError;
use crate::params::GenerationParams;

/// Prefix of every image reference produced by the generator.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A request to generate images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The resolved engine identifier (e.g., `"stable-diffusion-xl-1024-v1-0"`).
    pub engine: String,
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Fixed generation parameters.
    pub params: GenerationParams,
}

/// A single generated image, held as a self-contained data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// `data:<mime>;base64,<payload>`.
    pub data_uri: String,
}

impl GeneratedImage {
    /// Wrap a base64 PNG payload into a displayable reference.
    #[must_use]
    pub fn from_base64(payload: &str) -> Self {
        Self { data_uri: format!("{PNG_DATA_URI_PREFIX}{payload}") }
    }

    /// The base64 payload after the comma.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.data_uri.split_once(',').map_or("", |(_, payload)| payload)
    }

    /// Approximate decoded size in bytes.
    #[must_use]
    pub fn approx_len(&self) -> usize {
        let payload = self.payload().trim_end_matches('=');
        payload.len() * 3 / 4
    }

    /// Decode the referenced bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is not a base64 data URI or the
    /// payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        let (header, payload) = self
            .data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(|| ImageError::InvalidImageData("not a data URI".into()))?;
        if !header.ends_with(";base64") {
            return Err(ImageError::InvalidImageData(format!(
                "unsupported data URI encoding '{header}'"
            )));
        }
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ImageError::InvalidImageData(format!("invalid base64: {e}")))
    }
}

/// Response containing generated images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// The generated images, in the order the API returned them.
    pub images: Vec<GeneratedImage>,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, ImageError>> + Send + 'a>>;

/// Generates images from text prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate images for the given request.
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_>;
}
