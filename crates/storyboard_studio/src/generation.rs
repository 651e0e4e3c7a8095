//! Scene image generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use storyboard_core::{ArtStyle, GenerationParameters, ImageRef, Resolution, Scene, Storyboard};
use storyboard_interface::ImageSynthesis;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// How a single scene request settled.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SceneOutcome {
    /// An image was stored on the scene
    #[display("generated")]
    Generated,
    /// Synthesis failed; the scene kept whatever image it had
    #[display("failed: {}", _0)]
    Failed(String),
    /// A request for this scene was already outstanding; nothing was sent
    #[display("already in flight")]
    AlreadyInFlight,
    /// No scene at that index
    #[display("not found")]
    NotFound,
}

impl SceneOutcome {
    /// Whether an image was stored.
    pub fn is_generated(&self) -> bool {
        matches!(self, SceneOutcome::Generated)
    }
}

/// Tally of one `generate_all` batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct BatchReport {
    /// Scenes queued by the batch
    attempted: usize,
    /// Scenes that received an image
    succeeded: usize,
    /// Scenes whose synthesis failed
    failed: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: &SceneOutcome) {
        self.attempted += 1;
        match outcome {
            SceneOutcome::Generated => self.succeeded += 1,
            _ => self.failed += 1,
        }
    }
}

/// Clears the batch flag however the batch ends.
struct BatchGuard<'a>(&'a AtomicBool);

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Settles claimed scenes without an image if the owning call is dropped
/// before it reaches them.
struct InFlightGuard<'a> {
    storyboard: &'a watch::Sender<Storyboard>,
    claimed: Vec<usize>,
}

impl<'a> InFlightGuard<'a> {
    fn new(storyboard: &'a watch::Sender<Storyboard>, claimed: Vec<usize>) -> Self {
        Self {
            storyboard,
            claimed,
        }
    }

    fn release(&mut self, index: usize) {
        self.claimed.retain(|claimed| *claimed != index);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.claimed.is_empty() {
            return;
        }
        warn!(scenes = ?self.claimed, "Generation cancelled, releasing scenes");
        let claimed = std::mem::take(&mut self.claimed);
        self.storyboard.send_modify(|storyboard| {
            for index in claimed {
                if let Some(scene) = storyboard.get_mut(index) {
                    scene.finish_generation(None);
                }
            }
        });
    }
}

/// Renders storyboard panels through an image synthesis gateway.
///
/// The generator owns the storyboard for one analysis. Observers call
/// [`SceneGenerator::subscribe`] and receive a fresh snapshot after every
/// state change, so an in-flight flag is visible before its network call is
/// issued.
///
/// Two guards exist. A scene with a request outstanding is never sent again
/// by [`SceneGenerator::generate_one`], and only one
/// [`SceneGenerator::generate_all`] batch runs at a time. There is no lock
/// between the two: a batch re-queues every scene without an image,
/// including one a single request is still rendering.
pub struct SceneGenerator<G> {
    gateway: Arc<G>,
    storyboard: watch::Sender<Storyboard>,
    parameters: watch::Sender<GenerationParameters>,
    batch_running: AtomicBool,
}

impl<G: ImageSynthesis> SceneGenerator<G> {
    /// Creates a generator for a freshly analyzed storyboard.
    pub fn new(gateway: Arc<G>, storyboard: Storyboard, parameters: GenerationParameters) -> Self {
        Self {
            gateway,
            storyboard: watch::Sender::new(storyboard),
            parameters: watch::Sender::new(parameters),
            batch_running: AtomicBool::new(false),
        }
    }

    /// Current storyboard.
    pub fn snapshot(&self) -> Storyboard {
        self.storyboard.borrow().clone()
    }

    /// Scene at `index`, if any.
    pub fn scene(&self, index: usize) -> Option<Scene> {
        self.storyboard.borrow().get(index).cloned()
    }

    /// Receiver notified on every storyboard change.
    pub fn subscribe(&self) -> watch::Receiver<Storyboard> {
        self.storyboard.subscribe()
    }

    /// Parameters the next request will use.
    pub fn parameters(&self) -> GenerationParameters {
        *self.parameters.borrow()
    }

    /// Receiver notified when parameters change.
    pub fn subscribe_parameters(&self) -> watch::Receiver<GenerationParameters> {
        self.parameters.subscribe()
    }

    /// Replaces the parameters for subsequent requests.
    ///
    /// Existing images and requests already sent are unaffected.
    pub fn set_parameters(&self, parameters: GenerationParameters) {
        debug!(resolution = %parameters.resolution(), style = %parameters.style(), "Generation parameters changed");
        self.parameters.send_replace(parameters);
    }

    /// Changes only the resolution tier.
    pub fn set_resolution(&self, resolution: Resolution) {
        let style = *self.parameters().style();
        self.set_parameters(GenerationParameters::new(resolution, style));
    }

    /// Changes only the art style.
    pub fn set_style(&self, style: ArtStyle) {
        let resolution = *self.parameters().resolution();
        self.set_parameters(GenerationParameters::new(resolution, style));
    }

    /// Whether a `generate_all` batch is running.
    pub fn is_batch_running(&self) -> bool {
        self.batch_running.load(Ordering::Acquire)
    }

    /// Renders one scene with the current parameters.
    ///
    /// Failures are logged and reported in the outcome; the scene is always
    /// idle again when this returns or is dropped.
    #[instrument(skip(self))]
    pub async fn generate_one(&self, index: usize) -> SceneOutcome {
        let prompt = match self.claim(index) {
            Ok(prompt) => prompt,
            Err(outcome) => {
                debug!(%outcome, "Scene not generated");
                return outcome;
            }
        };

        let mut guard = InFlightGuard::new(&self.storyboard, vec![index]);
        let parameters = self.parameters();
        let outcome = self.render(index, &prompt, &parameters).await;
        guard.release(index);
        outcome
    }

    /// Renders every scene that lacks an image, one request at a time.
    ///
    /// All selected scenes are marked in flight before the first request.
    /// Parameters are captured once for the whole batch. Dropping the batch
    /// releases the scenes it had not finished. Returns `None` without doing
    /// anything if a batch is already running.
    #[instrument(skip(self))]
    pub async fn generate_all(&self) -> Option<BatchReport> {
        if self
            .batch_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Batch already running");
            return None;
        }
        let _guard = BatchGuard(&self.batch_running);

        let parameters = self.parameters();
        let mut queued = Vec::new();
        self.storyboard.send_modify(|storyboard| {
            for index in storyboard.pending_indices() {
                if let Some(scene) = storyboard.get_mut(index) {
                    scene.begin_generation();
                    queued.push((index, scene.visual_prompt().clone()));
                }
            }
        });
        info!(queued = queued.len(), "Starting batch generation");

        let mut guard = InFlightGuard::new(
            &self.storyboard,
            queued.iter().map(|(index, _)| *index).collect(),
        );
        let mut report = BatchReport::default();
        for (index, prompt) in queued {
            let outcome = self.render(index, &prompt, &parameters).await;
            guard.release(index);
            report.record(&outcome);
        }

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch generation complete"
        );
        Some(report)
    }

    /// Marks the scene in flight and returns its prompt.
    fn claim(&self, index: usize) -> Result<String, SceneOutcome> {
        let mut claimed = Err(SceneOutcome::NotFound);
        self.storyboard
            .send_if_modified(|storyboard| match storyboard.get_mut(index) {
                None => {
                    warn!(index, "Scene index out of range");
                    false
                }
                Some(scene) if scene.generation_in_flight() => {
                    claimed = Err(SceneOutcome::AlreadyInFlight);
                    false
                }
                Some(scene) => {
                    scene.begin_generation();
                    claimed = Ok(scene.visual_prompt().clone());
                    true
                }
            });
        claimed
    }

    async fn render(
        &self,
        index: usize,
        prompt: &str,
        parameters: &GenerationParameters,
    ) -> SceneOutcome {
        match self.gateway.synthesize_image(prompt, parameters).await {
            Ok(image) => {
                debug!(index, mime_type = %image.mime_type(), "Scene image stored");
                self.settle(index, Some(image));
                SceneOutcome::Generated
            }
            Err(e) => {
                warn!(index, error = %e, "Scene image generation failed");
                self.settle(index, None);
                SceneOutcome::Failed(e.to_string())
            }
        }
    }

    fn settle(&self, index: usize, image: Option<ImageRef>) {
        self.storyboard.send_modify(|storyboard| {
            if let Some(scene) = storyboard.get_mut(index) {
                scene.finish_generation(image);
            }
        });
    }
}

impl<G> std::fmt::Debug for SceneGenerator<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGenerator")
            .field("scenes", &self.storyboard.borrow().len())
            .field("parameters", &*self.parameters.borrow())
            .field("batch_running", &self.batch_running.load(Ordering::Relaxed))
            .finish()
    }
}
