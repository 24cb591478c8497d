use crate::compose::{ComposeOutcome, CompositionResult, compose, plan};
use crate::intake::{ImageSource, IntakeReport, accept_images};
use crate::options::LayoutSettings;
use crate::types::*;
use std::path::Path;
use tokio::sync::Mutex;

/// Whether a session has anything to compose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No images; compose is disabled
    Idle,
    /// At least one image; compose is enabled
    Ready,
}

/// Image list plus the compose trigger guarding it.
///
/// Composing leaves the list untouched so the same images can be exported
/// again with different settings.
#[derive(Debug, Default)]
pub struct ComposerSession {
    images: Vec<ImageSource>,
    compose_lock: Mutex<()>,
}

impl ComposerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.images.is_empty() {
            SessionState::Idle
        } else {
            SessionState::Ready
        }
    }

    pub fn can_compose(&self) -> bool {
        self.state() == SessionState::Ready
    }

    pub fn images(&self) -> &[ImageSource] {
        &self.images
    }

    /// Load `paths` and append the accepted images in the order given
    pub async fn add_images(&mut self, paths: &[impl AsRef<Path>]) -> IntakeReport {
        let report = accept_images(paths).await;
        self.images.extend(report.accepted.iter().cloned());
        report
    }

    pub fn push(&mut self, image: ImageSource) {
        self.images.push(image);
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing {} image(s)", self.images.len());
        self.images.clear();
    }

    pub fn plan(&self, settings: &LayoutSettings) -> CompositionResult {
        plan(&self.images, settings)
    }

    /// Compose the current images.
    ///
    /// Returns [`ComposeOutcome::Skipped`] while idle and
    /// [`ComposeError::Busy`] if another compose on this session is still running.
    pub async fn compose(
        &self,
        settings: &LayoutSettings,
        output_dir: impl AsRef<Path>,
    ) -> Result<ComposeOutcome> {
        if !self.can_compose() {
            return Ok(ComposeOutcome::Skipped);
        }
        let _guard = self.compose_lock.try_lock().map_err(|_| ComposeError::Busy)?;
        let settings = settings.clone();
        compose(&self.images, &settings, output_dir).await
    }
}
