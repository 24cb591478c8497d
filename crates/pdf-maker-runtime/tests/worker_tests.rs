use image::{ImageFormat, Rgb, RgbImage};
use pdf_maker::{LayoutSettings, PageSize};
use pdf_maker_runtime::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_pixel(width, height, Rgb([9, 9, 9]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[tokio::test]
async fn test_worker_add_and_compose() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_png(dir.path(), "a.png", 20, 10),
        write_png(dir.path(), "b.png", 10, 20),
    ];
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx.send(PdfCommand::AddImages { paths }).unwrap();
    match update_rx.recv().await.unwrap() {
        PdfUpdate::ImagesAdded {
            added,
            total,
            state,
        } => {
            assert_eq!(added, 2);
            assert_eq!(total, 2);
            assert_eq!(state, SessionState::Ready);
        }
        other => panic!("Expected ImagesAdded, got {:?}", other),
    }

    command_tx
        .send(PdfCommand::Compose {
            settings: LayoutSettings::default(),
            output_dir: dir.path().to_owned(),
        })
        .unwrap();
    match update_rx.recv().await.unwrap() {
        PdfUpdate::Composed { path, pages } => {
            assert_eq!(pages, 2);
            assert_eq!(path, dir.path().join("converted.pdf"));
            assert!(path.exists());
        }
        other => panic!("Expected Composed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_worker_reports_rejected_images() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.png");
    std::fs::write(&bad, b"garbage").unwrap();
    let good = write_png(dir.path(), "good.png", 3, 3);
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(PdfCommand::AddImages {
            paths: vec![bad.clone(), good],
        })
        .unwrap();

    match update_rx.recv().await.unwrap() {
        PdfUpdate::ImageRejected { path, .. } => assert_eq!(path, bad),
        other => panic!("Expected ImageRejected, got {:?}", other),
    }
    match update_rx.recv().await.unwrap() {
        PdfUpdate::ImagesAdded { added, total, .. } => {
            assert_eq!(added, 1);
            assert_eq!(total, 1);
        }
        other => panic!("Expected ImagesAdded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_worker_compose_when_idle_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(PdfCommand::Compose {
            settings: LayoutSettings::default(),
            output_dir: dir.path().to_owned(),
        })
        .unwrap();
    assert!(matches!(update_rx.recv().await.unwrap(), PdfUpdate::Skipped));
    assert!(!dir.path().join("converted.pdf").exists());
}

#[tokio::test]
async fn test_worker_plan_uses_latest_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 800, 600);
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(PdfCommand::AddImages { paths: vec![path] })
        .unwrap();
    assert!(matches!(
        update_rx.recv().await.unwrap(),
        PdfUpdate::ImagesAdded { .. }
    ));

    // Queue two plans back to back; at least the last one must be answered
    command_tx
        .send(PdfCommand::Plan {
            settings: LayoutSettings::default(),
        })
        .unwrap();
    command_tx
        .send(PdfCommand::Plan {
            settings: LayoutSettings {
                page_size: PageSize::FitToImage,
                ..Default::default()
            },
        })
        .unwrap();
    drop(command_tx);

    let mut last = None;
    while let Some(update) = update_rx.recv().await {
        if let PdfUpdate::Planned { composition } = update {
            last = Some(composition);
        }
    }
    let composition = last.expect("no plan was produced");
    assert_eq!(composition.page_count(), 1);
    let placement = composition.pages[0].placement;
    assert_eq!(placement.rect.width, composition.page.width);
    assert_eq!(placement.rect.height, composition.page.height);
}

#[tokio::test]
async fn test_worker_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 4, 4);
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(PdfCommand::AddImages { paths: vec![path] })
        .unwrap();
    update_rx.recv().await.unwrap();

    command_tx.send(PdfCommand::Clear).unwrap();
    match update_rx.recv().await.unwrap() {
        PdfUpdate::Cleared { state } => assert_eq!(state, SessionState::Idle),
        other => panic!("Expected Cleared, got {:?}", other),
    }
}

#[tokio::test]
async fn test_worker_plan_then_clear_keeps_send_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 8, 6);
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(PdfCommand::AddImages { paths: vec![path] })
        .unwrap();
    assert!(matches!(
        update_rx.recv().await.unwrap(),
        PdfUpdate::ImagesAdded { .. }
    ));

    command_tx
        .send(PdfCommand::Plan {
            settings: LayoutSettings::default(),
        })
        .unwrap();
    command_tx.send(PdfCommand::Clear).unwrap();

    match update_rx.recv().await.unwrap() {
        PdfUpdate::Planned { composition } => assert_eq!(composition.page_count(), 1),
        other => panic!("Expected Planned, got {:?}", other),
    }
    match update_rx.recv().await.unwrap() {
        PdfUpdate::Cleared { state } => assert_eq!(state, SessionState::Idle),
        other => panic!("Expected Cleared, got {:?}", other),
    }
}
