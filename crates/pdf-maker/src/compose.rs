//! Page composition
//!
//! Turns an ordered list of images into a document:
//! 1. Resolve one placement per image against the run's settings
//! 2. Feed image + placement pairs to a [`DocumentEncoder`], one page each
//! 3. Save the encoded bytes under the configured output name

use crate::encoder::{DocumentEncoder, PrintPdfEncoder};
use crate::geometry::{PagePlacement, resolve_placement};
use crate::intake::ImageSource;
use crate::io::save_pdf;
use crate::options::LayoutSettings;
use crate::types::*;
use std::path::{Path, PathBuf};

/// One output page: the image and where it is drawn
#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub image: ImageSource,
    pub placement: PagePlacement,
}

/// Ordered page list handed to the encoder, one entry per image in intake order
#[derive(Debug, Clone)]
pub struct CompositionResult {
    /// Page size shared by every page of the run
    pub page: PageDimensions,
    pub pages: Vec<ComposedPage>,
}

impl CompositionResult {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// What a compose call did
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeOutcome {
    /// Nothing to compose; no document was built and no file was written
    Skipped,
    Saved { path: PathBuf, pages: usize },
}

/// Resolve placements for every image without encoding anything.
pub fn plan(images: &[ImageSource], settings: &LayoutSettings) -> CompositionResult {
    let pages = images
        .iter()
        .map(|image| ComposedPage {
            image: image.clone(),
            placement: resolve_placement(image.width(), image.height(), settings),
        })
        .collect();

    CompositionResult {
        page: settings.page_dimensions(),
        pages,
    }
}

/// Encode a planned composition.
///
/// Returns `None` for an empty composition so no blank page is ever produced.
pub fn encode<E: DocumentEncoder>(composition: &CompositionResult, title: &str) -> Result<Option<E>> {
    if composition.is_empty() {
        return Ok(None);
    }

    let mut encoder = E::create(title, composition.page)?;
    for (index, page) in composition.pages.iter().enumerate() {
        // The first page exists as soon as the document does
        if index > 0 {
            encoder.add_page();
        }
        log::debug!(
            "Page {}: {} at ({:.2}, {:.2}) {:.2}x{:.2}",
            index + 1,
            page.image.path().display(),
            page.placement.rect.x,
            page.placement.rect.y,
            page.placement.rect.width,
            page.placement.rect.height
        );
        encoder.place_image(&page.image, page.image.format(), page.placement.rect)?;
    }
    Ok(Some(encoder))
}

/// Compose `images` into a PDF saved as `output_dir/<settings.output_name>`.
///
/// `settings` is cloned up front; the run never observes later edits.
pub async fn compose(
    images: &[ImageSource],
    settings: &LayoutSettings,
    output_dir: impl AsRef<Path>,
) -> Result<ComposeOutcome> {
    if images.is_empty() {
        log::info!("No images to compose, skipping");
        return Ok(ComposeOutcome::Skipped);
    }
    settings.validate()?;

    let images = images.to_vec();
    let settings = settings.clone();
    let path = output_dir.as_ref().join(&settings.output_name);

    log::info!(
        "Composing {} image(s) on {} {:?} pages",
        images.len(),
        settings.page_size.name(),
        settings.orientation
    );

    let title = document_title(&settings.output_name);
    let encoded = tokio::task::spawn_blocking(move || {
        let composition = plan(&images, &settings);
        let pages = composition.page_count();
        let bytes = match encode::<PrintPdfEncoder>(&composition, &title)? {
            Some(encoder) => encoder.finish()?,
            None => return Ok(None),
        };
        Ok::<_, ComposeError>(Some((bytes, pages)))
    })
    .await??;

    let Some((bytes, pages)) = encoded else {
        return Ok(ComposeOutcome::Skipped);
    };

    save_pdf(bytes, &path).await?;
    Ok(ComposeOutcome::Saved { path, pages })
}

fn document_title(output_name: &str) -> String {
    Path::new(output_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| output_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title_drops_extension() {
        assert_eq!(document_title("converted.pdf"), "converted");
        assert_eq!(document_title("holiday photos.pdf"), "holiday photos");
        assert_eq!(document_title("plain"), "plain");
    }

    #[test]
    fn test_plan_empty() {
        let composition = plan(&[], &LayoutSettings::default());
        assert!(composition.is_empty());
        assert_eq!(composition.page_count(), 0);
    }
}
