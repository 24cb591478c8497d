//! Document encoding
//!
//! The composer talks to the PDF library only through [`DocumentEncoder`].
//! [`PrintPdfEncoder`] is the production implementation.

use crate::intake::ImageSource;
use crate::types::{ComposeError, PageDimensions, Rect, Result};
use image::ImageFormat;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};

/// Builds a paged document one image at a time.
///
/// A freshly created encoder already holds its first page.
pub trait DocumentEncoder: Sized {
    /// Start a document whose pages all have size `page`
    fn create(title: &str, page: PageDimensions) -> Result<Self>;

    /// Start a new page; subsequent images land on it
    fn add_page(&mut self);

    /// Draw `image` on the current page at exactly `rect`
    fn place_image(&mut self, image: &ImageSource, format: ImageFormat, rect: Rect) -> Result<()>;

    fn page_count(&self) -> usize;

    /// Serialize the finished document
    fn finish(self) -> Result<Vec<u8>>;
}

/// [`DocumentEncoder`] backed by `printpdf`
pub struct PrintPdfEncoder {
    doc: PdfDocument,
    page: PageDimensions,
}

impl PrintPdfEncoder {
    fn blank_page(page: PageDimensions) -> PdfPage {
        PdfPage::new(
            Mm::from(Pt(page.width)),
            Mm::from(Pt(page.height)),
            Vec::new(),
        )
    }
}

impl DocumentEncoder for PrintPdfEncoder {
    fn create(title: &str, page: PageDimensions) -> Result<Self> {
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(ComposeError::Pdf(format!(
                "Invalid page size {}x{}",
                page.width, page.height
            )));
        }
        let mut doc = PdfDocument::new(title);
        doc.pages.push(Self::blank_page(page));
        Ok(Self { doc, page })
    }

    fn add_page(&mut self) {
        self.doc.pages.push(Self::blank_page(self.page));
    }

    fn place_image(&mut self, image: &ImageSource, format: ImageFormat, rect: Rect) -> Result<()> {
        let raw = decode_raw_image(image, format)?;
        let (px_width, px_height) = (raw.width as f32, raw.height as f32);
        let xobject_id = self.doc.add_image(&raw);

        // At 72 dpi one pixel is one point, so the scale maps pixels onto the rect.
        let transform = XObjectTransform {
            translate_x: Some(Pt(rect.x)),
            translate_y: Some(Pt(rect.pdf_y(self.page.height))),
            scale_x: Some(rect.width / px_width),
            scale_y: Some(rect.height / px_height),
            dpi: Some(72.0),
            ..Default::default()
        };

        let page = self
            .doc
            .pages
            .last_mut()
            .ok_or_else(|| ComposeError::Pdf("Document has no page".to_string()))?;
        page.ops.push(Op::UseXobject {
            id: xobject_id,
            transform,
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.doc.pages.len()
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF encoder reported {} warning(s)", warnings.len());
        }
        Ok(bytes)
    }
}

fn decode_raw_image(image: &ImageSource, format: ImageFormat) -> Result<RawImage> {
    let decoded = image::load_from_memory_with_format(image.bytes(), format)?;
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);

    let (pixels, data_format) = if decoded.color().has_alpha() {
        (decoded.to_rgba8().into_raw(), RawImageFormat::RGBA8)
    } else {
        (decoded.to_rgb8().into_raw(), RawImageFormat::RGB8)
    };

    Ok(RawImage {
        pixels: RawImageData::U8(pixels),
        width,
        height,
        data_format,
        tag: Vec::new(),
    })
}
