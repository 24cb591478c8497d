use image::{ImageFormat, Rgb, RgbImage};
use pdf_maker::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let img = RgbImage::from_pixel(width, height, Rgb([1, 2, 3]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[tokio::test]
async fn test_load_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_image(dir.path(), "one.jpg", 12, 34, ImageFormat::Jpeg);

    let source = load_image(&path).await.unwrap();
    assert_eq!(source.width(), 12);
    assert_eq!(source.height(), 34);
    assert_eq!(source.format(), ImageFormat::Jpeg);
    assert_eq!(source.path(), path.as_path());
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = load_image("/definitely/not/here.png").await;
    assert!(matches!(result, Err(ComposeError::Io(_))));
}

#[tokio::test]
async fn test_accept_preserves_intake_order() {
    let dir = tempfile::tempdir().unwrap();
    // Larger images first so they are the slowest to probe
    let paths = vec![
        write_image(dir.path(), "big.png", 1500, 1500, ImageFormat::Png),
        write_image(dir.path(), "medium.png", 300, 200, ImageFormat::Png),
        write_image(dir.path(), "tiny.png", 1, 1, ImageFormat::Png),
        write_image(dir.path(), "photo.jpg", 64, 32, ImageFormat::Jpeg),
    ];

    let report = accept_images(&paths).await;
    assert!(report.rejected.is_empty());
    let accepted: Vec<_> = report.accepted.iter().map(|s| s.path().to_owned()).collect();
    assert_eq!(accepted, paths);
}

#[tokio::test]
async fn test_accept_rejects_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = write_image(dir.path(), "a.png", 4, 4, ImageFormat::Png);
    let text = dir.path().join("readme.txt");
    std::fs::write(&text, "not an image").unwrap();
    let good_b = write_image(dir.path(), "b.png", 8, 8, ImageFormat::Png);
    let missing = dir.path().join("gone.png");

    let paths = vec![good_a.clone(), text.clone(), good_b.clone(), missing.clone()];
    let report = accept_images(&paths).await;

    let accepted: Vec<_> = report.accepted.iter().map(|s| s.path().to_owned()).collect();
    assert_eq!(accepted, vec![good_a, good_b]);

    let rejected: Vec<_> = report.rejected.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(rejected, vec![text, missing]);
    assert!(matches!(
        report.rejected[0].1,
        ComposeError::InvalidImage { .. }
    ));
    assert!(matches!(report.rejected[1].1, ComposeError::Io(_)));
}

#[tokio::test]
async fn test_accept_empty_batch() {
    let paths: Vec<PathBuf> = Vec::new();
    let report = accept_images(&paths).await;
    assert!(report.accepted.is_empty());
    assert!(report.rejected.is_empty());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_image(dir.path(), "a.png", 40, 20, ImageFormat::Png),
        write_image(dir.path(), "b.png", 20, 40, ImageFormat::Png),
    ];

    let mut session = ComposerSession::new();
    assert_eq!(session.state(), SessionState::Idle);

    let report = session.add_images(&paths).await;
    assert_eq!(report.accepted.len(), 2);
    assert_eq!(session.state(), SessionState::Ready);

    let outcome = session
        .compose(&LayoutSettings::default(), dir.path())
        .await
        .unwrap();
    assert!(matches!(outcome, ComposeOutcome::Saved { pages: 2, .. }));

    // The list survives for a re-export with other settings
    assert_eq!(session.images().len(), 2);
    let landscape = LayoutSettings {
        orientation: Orientation::Landscape,
        output_name: "landscape.pdf".to_string(),
        ..Default::default()
    };
    let outcome = session.compose(&landscape, dir.path()).await.unwrap();
    assert_eq!(
        outcome,
        ComposeOutcome::Saved {
            path: dir.path().join("landscape.pdf"),
            pages: 2
        }
    );

    session.clear();
    assert_eq!(session.state(), SessionState::Idle);
    let outcome = session
        .compose(&LayoutSettings::default(), dir.path())
        .await
        .unwrap();
    assert_eq!(outcome, ComposeOutcome::Skipped);
}
