//! Image placement on a page
//!
//! Computes where an image is drawn on its page:
//! - Aspect-preserving fit, or a full-page stretch for `FitToImage`
//! - Centering on the page, shifted by the margin
//! - Clamping the drawn size to the area inside the margins

use crate::options::LayoutSettings;
use crate::types::{PageDimensions, Rect};

/// Final placement of one image on its page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Size of the page the image is drawn on, in points
    pub page: PageDimensions,
    /// Rectangle handed to the encoder (top-left origin, clamped to margins)
    pub rect: Rect,
    /// Width after scaling, before clamping
    pub scaled_width: f32,
    /// Height after scaling, before clamping
    pub scaled_height: f32,
}

/// Calculate the placement of an image on a page.
///
/// # Arguments
/// * `img_width` - Image width in pixels, must be > 0
/// * `img_height` - Image height in pixels, must be > 0
/// * `page` - Page dimensions with orientation applied
/// * `margin` - Uniform inset in points
/// * `stretch` - Fill the page exactly, ignoring the image's aspect ratio
pub fn place_image(
    img_width: u32,
    img_height: u32,
    page: PageDimensions,
    margin: f32,
    stretch: bool,
) -> PagePlacement {
    let (scaled_width, scaled_height) =
        calculate_scaled_size(img_width as f32, img_height as f32, page, stretch);

    // Centering uses the unclamped size; only the drawn size is clamped.
    let x = (page.width - scaled_width) / 2.0 + margin;
    let y = (page.height - scaled_height) / 2.0 + margin;
    let width = scaled_width.min(page.width - 2.0 * margin);
    let height = scaled_height.min(page.height - 2.0 * margin);

    PagePlacement {
        page,
        rect: Rect::new(x, y, width, height),
        scaled_width,
        scaled_height,
    }
}

/// Resolve a placement using the page size, orientation and margin of `settings`.
pub fn resolve_placement(
    img_width: u32,
    img_height: u32,
    settings: &LayoutSettings,
) -> PagePlacement {
    place_image(
        img_width,
        img_height,
        settings.page_dimensions(),
        settings.margin_pt(),
        settings.page_size.stretches(),
    )
}

/// Scaled image size before clamping.
fn calculate_scaled_size(
    img_width: f32,
    img_height: f32,
    page: PageDimensions,
    stretch: bool,
) -> (f32, f32) {
    if stretch {
        return (page.width, page.height);
    }
    let ratio = (page.width / img_width).min(page.height / img_height);
    (img_width * ratio, img_height * ratio)
}
