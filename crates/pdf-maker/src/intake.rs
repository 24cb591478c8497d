//! Image intake
//!
//! Reads image files, probes their pixel dimensions and rejects anything
//! that cannot be placed on a page (unknown format, zero dimensions).

use crate::types::*;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// An accepted image: raw bytes plus intrinsic pixel size
#[derive(Debug, Clone)]
pub struct ImageSource {
    path: PathBuf,
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl ImageSource {
    /// Probe `bytes` and accept them as an image.
    ///
    /// Only the header is decoded; pixel data is decoded later by the encoder.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let reader = ImageReader::new(Cursor::new(&bytes)).with_guessed_format()?;
        let format = reader.format().ok_or_else(|| ComposeError::InvalidImage {
            path: path.clone(),
            reason: "unrecognized image format".to_string(),
        })?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ComposeError::InvalidImage {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if width == 0 || height == 0 {
            return Err(ComposeError::InvalidImage {
                path,
                reason: format!("zero-sized image ({}x{})", width, height),
            });
        }

        Ok(Self {
            path,
            bytes: bytes.into(),
            width,
            height,
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Format detected from the file contents
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// Outcome of accepting a batch of files
#[derive(Debug, Default)]
pub struct IntakeReport {
    /// Accepted images, in the order they were supplied
    pub accepted: Vec<ImageSource>,
    /// Files that were rejected, in the order they were supplied
    pub rejected: Vec<(PathBuf, ComposeError)>,
}

/// Load a single image file
pub async fn load_image(path: impl AsRef<Path>) -> Result<ImageSource> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let source = tokio::task::spawn_blocking(move || ImageSource::from_bytes(path, bytes)).await??;
    log::debug!(
        "Accepted {} ({}x{}, {:?})",
        source.path.display(),
        source.width,
        source.height,
        source.format
    );
    Ok(source)
}

/// Load a batch of image files concurrently.
///
/// All loads are started at once and joined before returning. Results are
/// ordered by their position in `paths`, not by completion order.
pub async fn accept_images(paths: &[impl AsRef<Path>]) -> IntakeReport {
    let mut set = JoinSet::new();
    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref().to_owned();
        set.spawn(async move {
            let result = load_image(&path).await;
            (index, path, result)
        });
    }

    let mut slots: Vec<Option<(PathBuf, Result<ImageSource>)>> =
        (0..paths.len()).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, path, result)) => slots[index] = Some((path, result)),
            Err(e) => log::error!("Image load task failed: {}", e),
        }
    }

    let mut report = IntakeReport::default();
    for (index, slot) in slots.into_iter().enumerate() {
        let (path, result) = slot.unwrap_or_else(|| {
            let path = paths[index].as_ref().to_owned();
            let e = ComposeError::InvalidImage {
                path: path.clone(),
                reason: "load task did not complete".to_string(),
            };
            (path, Err(e))
        });
        match result {
            Ok(source) => report.accepted.push(source),
            Err(e) => {
                log::warn!("Rejected {}: {}", path.display(), e);
                report.rejected.push((path, e));
            }
        }
    }

    log::info!(
        "Accepted {} image(s), rejected {}",
        report.accepted.len(),
        report.rejected.len()
    );
    report
}
