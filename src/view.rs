//! Prompt-to-image view model.
//!
//! [`View::update`] is the only way state changes: it takes an [`Event`],
//! applies it, and returns the [`Effect`]s the caller must carry out. Effects
//! that complete asynchronously report back through another event
//! (`GenerationResolved`, `DownloadResolved`).
//!
//! Generation requests are serialised. A trigger while busy is rejected, and
//! every request carries a ticket so a resolution that is not for the
//! in-flight request is ignored.

use std::fmt;
use std::path::PathBuf;

use crate::error::{FailureKind, ImageError};
use crate::params::is_blank_prompt;
use crate::ports::{GeneratedImage, ImageResponse};

/// Identifies one generation request.
pub type Ticket = u64;

/// Tagged result of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The API returned an artifact list.
    Success(Vec<GeneratedImage>),
    /// Network error, non-success status, or no usable response.
    TransportFailure(String),
    /// A success response without the expected artifact list.
    ShapeFailure(String),
}

impl From<Result<ImageResponse, ImageError>> for GenerationOutcome {
    fn from(result: Result<ImageResponse, ImageError>) -> Self {
        match result {
            Ok(response) => Self::Success(response.images),
            Err(e) => match e.failure_kind() {
                FailureKind::Shape => Self::ShapeFailure(e.to_string()),
                FailureKind::Transport | FailureKind::Download => {
                    Self::TransportFailure(e.to_string())
                }
            },
        }
    }
}

/// Tagged result of one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was written to this path.
    Saved(PathBuf),
    /// Saving failed.
    DownloadFailure(String),
}

impl From<Result<PathBuf, ImageError>> for DownloadOutcome {
    fn from(result: Result<PathBuf, ImageError>) -> Self {
        match result {
            Ok(path) => Self::Saved(path),
            Err(e) => Self::DownloadFailure(e.to_string()),
        }
    }
}

/// Something that happened to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The prompt text changed.
    PromptEdited(String),
    /// The user asked for images.
    GenerateRequested,
    /// A generation request finished.
    GenerationResolved {
        /// Ticket of the request.
        ticket: Ticket,
        /// What came back.
        outcome: GenerationOutcome,
    },
    /// The user asked to save the tile at this index.
    DownloadRequested(usize),
    /// A download finished.
    DownloadResolved {
        /// Tile index.
        index: usize,
        /// What happened.
        outcome: DownloadOutcome,
    },
}

/// Work the caller must perform on behalf of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one generation request and report back with the same ticket.
    Generate {
        /// Ticket to resolve with.
        ticket: Ticket,
        /// Prompt at trigger time.
        prompt: String,
    },
    /// Save one image and report back.
    Download {
        /// Tile index, used for the file name.
        index: usize,
        /// Image to save.
        image: GeneratedImage,
    },
    /// Show a notification to the user.
    Notify(Notice),
}

/// User-facing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A generation request failed.
    GenerationFailed,
    /// A download failed.
    DownloadFailed,
    /// A download was written to disk.
    Saved(PathBuf),
}

impl Notice {
    /// Whether this notice reports a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::GenerationFailed | Self::DownloadFailed)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerationFailed => f.write_str("Failed to generate images. Please try again."),
            Self::DownloadFailed => f.write_str("Failed to download image. Please try again."),
            Self::Saved(path) => write!(f, "Saved: {}", path.display()),
        }
    }
}

/// State of the prompt-to-image view.
#[derive(Debug, Default)]
pub struct View {
    prompt: String,
    images: Vec<GeneratedImage>,
    in_flight: Option<Ticket>,
    last_ticket: Ticket,
}

impl View {
    /// Current prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether a generation request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Images from the most recent successful generation.
    #[must_use]
    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    /// Apply an event and return the effects to perform.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::PromptEdited(text) => {
                self.prompt = text;
                Vec::new()
            }
            Event::GenerateRequested => self.trigger(),
            Event::GenerationResolved { ticket, outcome } => self.resolve(ticket, outcome),
            Event::DownloadRequested(index) => {
                if let Some(image) = self.images.get(index) {
                    vec![Effect::Download { index, image: image.clone() }]
                } else {
                    tracing::warn!(index, available = self.images.len(), "no image to download");
                    vec![Effect::Notify(Notice::DownloadFailed)]
                }
            }
            Event::DownloadResolved { index, outcome } => match outcome {
                DownloadOutcome::Saved(path) => vec![Effect::Notify(Notice::Saved(path))],
                DownloadOutcome::DownloadFailure(message) => {
                    tracing::error!(index, %message, "error downloading image");
                    vec![Effect::Notify(Notice::DownloadFailed)]
                }
            },
        }
    }

    fn trigger(&mut self) -> Vec<Effect> {
        if is_blank_prompt(&self.prompt) {
            return Vec::new();
        }
        if let Some(ticket) = self.in_flight {
            tracing::debug!(ticket, "generation already in flight, ignoring trigger");
            return Vec::new();
        }
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.in_flight = Some(ticket);
        tracing::info!(ticket, prompt = %self.prompt, "generation requested");
        vec![Effect::Generate { ticket, prompt: self.prompt.clone() }]
    }

    fn resolve(&mut self, ticket: Ticket, outcome: GenerationOutcome) -> Vec<Effect> {
        if self.in_flight != Some(ticket) {
            tracing::warn!(ticket, in_flight = ?self.in_flight, "discarding stale generation result");
            return Vec::new();
        }
        self.in_flight = None;
        match outcome {
            GenerationOutcome::Success(images) => {
                tracing::info!(ticket, count = images.len(), "generation succeeded");
                self.images = images;
                Vec::new()
            }
            GenerationOutcome::TransportFailure(message) | GenerationOutcome::ShapeFailure(message) => {
                tracing::error!(ticket, %message, "error generating images");
                vec![Effect::Notify(Notice::GenerationFailed)]
            }
        }
    }
}
