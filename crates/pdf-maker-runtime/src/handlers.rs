use crate::PdfUpdate;
use pdf_maker::{ComposeOutcome, ComposerSession, LayoutSettings};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_add_images(
    paths: Vec<PathBuf>,
    session: &mut ComposerSession,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let report = session.add_images(&paths).await;
    for (path, e) in report.rejected {
        let _ = update_tx.send(PdfUpdate::ImageRejected {
            path,
            message: e.to_string(),
        });
    }
    let _ = update_tx.send(PdfUpdate::ImagesAdded {
        added: report.accepted.len(),
        total: session.images().len(),
        state: session.state(),
    });
}

pub fn handle_clear(session: &mut ComposerSession, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    session.clear();
    let _ = update_tx.send(PdfUpdate::Cleared {
        state: session.state(),
    });
}

pub fn handle_plan(
    settings: LayoutSettings,
    session: &ComposerSession,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let composition = session.plan(&settings);
    let _ = update_tx.send(PdfUpdate::Planned { composition });
}

pub async fn handle_compose(
    settings: LayoutSettings,
    output_dir: PathBuf,
    session: &ComposerSession,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match session.compose(&settings, &output_dir).await {
        Ok(ComposeOutcome::Saved { path, pages }) => {
            let _ = update_tx.send(PdfUpdate::Composed { path, pages });
        }
        Ok(ComposeOutcome::Skipped) => {
            let _ = update_tx.send(PdfUpdate::Skipped);
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}
