//! Document output

use crate::types::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Write `bytes` to `path` without ever leaving a half-written file there.
///
/// The data goes to a `.part` sibling first and is renamed over the target
/// once complete; the sibling is removed if anything fails.
pub async fn save_pdf(bytes: Vec<u8>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let partial = partial_path(&path);

    if let Err(e) = write_then_rename(&bytes, &partial, &path).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e);
    }

    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

async fn write_then_rename(bytes: &[u8], partial: &Path, path: &Path) -> Result<()> {
    tokio::fs::write(partial, bytes).await?;
    tokio::fs::rename(partial, path).await?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".part");
    path.with_file_name(name)
}
