use std::path::PathBuf;

mod handlers;
mod worker;

// Re-export types from the library crate
pub use pdf_maker::{CompositionResult, LayoutSettings, SessionState};
pub use worker::{spawn_worker, worker_task};

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum PdfCommand {
    AddImages {
        paths: Vec<PathBuf>,
    },
    Clear,
    /// Resolve placements without encoding (cheap, safe to send on every settings change)
    Plan {
        settings: LayoutSettings,
    },
    Compose {
        settings: LayoutSettings,
        output_dir: PathBuf,
    },
}

/// Updates sent from the worker to a front end
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    ImagesAdded {
        added: usize,
        total: usize,
        state: SessionState,
    },
    ImageRejected {
        path: PathBuf,
        message: String,
    },
    Cleared {
        state: SessionState,
    },
    Planned {
        composition: CompositionResult,
    },
    Composed {
        path: PathBuf,
        pages: usize,
    },
    /// Compose was requested with no images
    Skipped,
    Error {
        message: String,
    },
}
