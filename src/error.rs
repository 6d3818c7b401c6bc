//! Unified error type for realpix.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a failure, as surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The request never produced a usable response (network, status, setup).
    Transport,
    /// A success response without the expected artifact list.
    Shape,
    /// Saving an image to disk failed.
    Download,
}

/// Errors that can occur while generating or saving images.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A failure served from a cassette.
    #[error("{message}")]
    Replayed {
        /// Kind recorded alongside the failure.
        kind: FailureKind,
        /// Recorded message.
        message: String,
    },

    /// The cassette could not serve an interaction.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// An image reference could not be decoded.
    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}

impl ImageError {
    /// Classify this error for user-facing reporting.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::MalformedResponse(_) => FailureKind::Shape,
            Self::Replayed { kind, .. } => *kind,
            Self::Io(_) | Self::ImageConversion(_) | Self::InvalidImageData(_) => {
                FailureKind::Download
            }
            Self::Api { .. }
            | Self::Network(_)
            | Self::Cassette(_)
            | Self::Config(_)
            | Self::MissingApiKey { .. } => FailureKind::Transport,
        }
    }
}
