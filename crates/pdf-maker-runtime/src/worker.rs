use crate::{PdfCommand, PdfUpdate, handlers};
use pdf_maker::ComposerSession;
use tokio::sync::mpsc;

/// Spawn [`worker_task`] on the current runtime and return its channel ends
pub fn spawn_worker() -> (
    mpsc::UnboundedSender<PdfCommand>,
    mpsc::UnboundedReceiver<PdfUpdate>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker_task(command_rx, update_tx));
    (command_tx, update_rx)
}

/// Async worker task that processes commands one at a time and sends updates.
///
/// A compose runs to completion before the next command is read, so runs
/// never interleave.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    let mut session = ComposerSession::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut session, &mut command_rx, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: PdfCommand,
    session: &mut ComposerSession,
    command_rx: &mut mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match cmd {
        PdfCommand::AddImages { paths } => {
            handlers::handle_add_images(paths, session, update_tx).await;
        }
        PdfCommand::Clear => {
            handlers::handle_clear(session, update_tx);
        }
        PdfCommand::Plan { mut settings } => {
            // Coalesce plans queued directly behind this one; stop at the first
            // other command so it still runs after the plan, in send order
            let mut pending = None;
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let PdfCommand::Plan {
                    settings: new_settings,
                } = next_cmd
                {
                    log::debug!("Discarding queued plan, using newer settings");
                    settings = new_settings;
                } else {
                    pending = Some(next_cmd);
                    break;
                }
            }

            handlers::handle_plan(settings, session, update_tx);

            if let Some(next_cmd) = pending {
                Box::pin(process_command(next_cmd, session, command_rx, update_tx)).await;
            }
        }
        PdfCommand::Compose {
            settings,
            output_dir,
        } => {
            handlers::handle_compose(settings, output_dir, session, update_tx).await;
        }
    }
}
