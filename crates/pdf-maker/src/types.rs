use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid image {}: {reason}", .path.display())]
    InvalidImage { path: PathBuf, reason: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("A composition is already in progress")]
    Busy,
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Inset used by [`MarginMode::Small`], in millimeters
pub const SMALL_MARGIN_MM: f32 = 10.0;

/// Output name used when none is given
pub const DEFAULT_OUTPUT_NAME: &str = "converted.pdf";

#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Page size selection for the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    /// Stretch every image over the whole (A4-sized) page, ignoring its aspect ratio
    FitToImage,
}

impl PageSize {
    /// Base dimensions in millimeters (always portrait)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 | PageSize::FitToImage => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    /// Page dimensions in points with orientation applied
    pub fn dimensions_pt(self, orientation: Orientation) -> PageDimensions {
        let (w, h) = self.dimensions_mm();
        let (w, h) = match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };
        PageDimensions {
            width: mm_to_pt(w),
            height: mm_to_pt(h),
        }
    }

    pub fn stretches(self) -> bool {
        matches!(self, PageSize::FitToImage)
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "US Letter",
            PageSize::FitToImage => "Fit to Page",
        }
    }
}

/// Margin applied around each placed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarginMode {
    #[default]
    None,
    Small,
}

impl MarginMode {
    /// Inset in points
    pub fn inset_pt(self) -> f32 {
        match self {
            MarginMode::None => 0.0,
            MarginMode::Small => mm_to_pt(SMALL_MARGIN_MM),
        }
    }
}

/// Page size in points, orientation already applied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

/// A rectangular area in points, measured from the page's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge measured from the page's bottom, as PDF content streams expect
    pub fn pdf_y(&self, page_height: f32) -> f32 {
        page_height - self.y - self.height
    }
}
