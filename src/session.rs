//! Drives a [`View`] against the real world.
//!
//! Generation effects run on spawned tasks and report back over a channel;
//! downloads run inline. Notices are returned to the caller for display.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::output::save_download;
use crate::params::GenerationParams;
use crate::ports::{ImageGenerator, ImageRequest};
use crate::view::{DownloadOutcome, Effect, Event, GenerationOutcome, Notice, Ticket, View};

/// Owns the view and executes its effects.
pub struct Session {
    view: View,
    generator: Arc<dyn ImageGenerator>,
    engine: String,
    download_dir: PathBuf,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Session {
    /// Create a session sending requests for `engine` and saving into `download_dir`.
    pub fn new(generator: Arc<dyn ImageGenerator>, engine: String, download_dir: PathBuf) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { view: View::default(), generator, engine, download_dir, tx, rx }
    }

    /// The current view state.
    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Apply an event, run the effects it produces, and return any notices.
    ///
    /// Must be called from within a tokio runtime: generation effects are
    /// spawned and resolve later through [`next_event`](Self::next_event).
    pub fn dispatch(&mut self, event: Event) -> Vec<Notice> {
        let mut notices = Vec::new();
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.view.update(event) {
                match effect {
                    Effect::Generate { ticket, prompt } => self.spawn_generation(ticket, prompt),
                    Effect::Download { index, image } => {
                        let outcome = DownloadOutcome::from(save_download(&image, index, &self.download_dir));
                        queue.push_back(Event::DownloadResolved { index, outcome });
                    }
                    Effect::Notify(notice) => notices.push(notice),
                }
            }
        }
        notices
    }

    /// Wait for the next asynchronously produced event.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Wait until no generation request is in flight, applying resolutions.
    pub async fn settle(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while self.view.is_busy() {
            match self.rx.recv().await {
                Some(event) => notices.extend(self.dispatch(event)),
                None => break,
            }
        }
        notices
    }

    fn spawn_generation(&self, ticket: Ticket, prompt: String) {
        let request = ImageRequest {
            engine: self.engine.clone(),
            prompt,
            params: GenerationParams::default(),
        };
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = GenerationOutcome::from(generator.generate(&request).await);
            // Release the generator before resolving so a recorder can be unwrapped once settled.
            drop(generator);
            if tx.send(Event::GenerationResolved { ticket, outcome }).is_err() {
                tracing::debug!(ticket, "session closed before generation resolved");
            }
        });
    }
}
