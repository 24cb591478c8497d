pub mod compose;
mod encoder;
mod geometry;
mod intake;
mod io;
mod options;
mod session;
mod types;

pub use compose::{ComposeOutcome, ComposedPage, CompositionResult, compose, encode, plan};
pub use encoder::{DocumentEncoder, PrintPdfEncoder};
pub use geometry::{PagePlacement, place_image, resolve_placement};
pub use intake::{ImageSource, IntakeReport, accept_images, load_image};
pub use io::save_pdf;
pub use options::*;
pub use session::{ComposerSession, SessionState};
pub use types::*;
