use std::path::PathBuf;
use std::time::Duration;

use gallery_frame::fit::TargetRect;
use gallery_frame::upload::{load_picture, load_rgba, ImageSource, UploadPipeline};
use gallery_frame::ViewerError;
use image::{Rgba, RgbaImage};

const MAX_TEXTURE: u32 = 8192;

/// Writes a PNG of the given size into a per-test temp directory
fn write_png(test: &str, name: &str, width: u32, height: u32) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gallery_frame_{}_{}", std::process::id(), test));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]))
        .save(&path)
        .unwrap();
    path
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::new(width, height)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_load_picture_from_file() {
    let path = write_png("load_file", "wide.png", 192, 108);
    let picture = load_picture(&ImageSource::Path(path), TargetRect::PAINTING, MAX_TEXTURE).unwrap();

    assert_eq!(picture.name, "wide.png");
    assert_eq!(picture.mips.dimensions(), (192, 108));
    assert_eq!(picture.scale.scale_x, 1.0);
    assert!((picture.scale.scale_y - 0.84375).abs() < 1e-5);
}

#[test]
fn test_load_picture_from_bytes() {
    let source = ImageSource::Bytes {
        name: "tall.png".to_string(),
        bytes: png_bytes(108, 192),
    };
    let picture = load_picture(&source, TargetRect::PAINTING, MAX_TEXTURE).unwrap();
    assert!((picture.scale.scale_x - 0.375).abs() < 1e-5);
    assert_eq!(picture.scale.scale_y, 1.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let source = ImageSource::Path(PathBuf::from("/definitely/not/here.png"));
    let err = load_picture(&source, TargetRect::PAINTING, MAX_TEXTURE).unwrap_err();
    assert!(matches!(err, ViewerError::Io { .. }));
}

#[test]
fn test_empty_file_is_decode_failure() {
    let dir = std::env::temp_dir().join(format!("gallery_frame_{}_empty", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.png");
    std::fs::write(&path, b"").unwrap();

    let err = load_rgba(&path).unwrap_err();
    assert!(matches!(err, ViewerError::DecodeFailure { .. }));
}

#[test]
fn test_oversized_picture_is_clamped_in_loader() {
    let path = write_png("clamp", "big.png", 400, 100);
    let picture = load_picture(&ImageSource::Path(path), TargetRect::PAINTING, 64).unwrap();

    assert_eq!(picture.mips.dimensions(), (64, 16));
    assert_eq!(picture.mips.levels().len(), 7);
    // The fit still uses the decoded size
    assert_eq!(picture.source.width, 400.0);
    assert_eq!(picture.scale.scale_x, 1.0);
    assert!((picture.scale.scale_y - 0.375).abs() < 1e-5);
}

#[test]
fn test_pipeline_delivers_outcome() {
    let path = write_png("pipeline", "square.png", 64, 64);
    let pipeline = UploadPipeline::new(TargetRect::PAINTING, MAX_TEXTURE);

    let generation = pipeline.submit(ImageSource::Path(path)).unwrap();
    assert_eq!(generation, 1);
    assert_eq!(pipeline.latest_generation(), 1);

    let outcome = pipeline.wait().expect("worker should answer");
    assert_eq!(outcome.generation, 1);
    let picture = outcome.result.unwrap();
    assert!((picture.scale.scale_x - 2.0 / 3.0).abs() < 1e-5);
}

#[test]
fn test_pipeline_reports_failures() {
    let pipeline = UploadPipeline::new(TargetRect::PAINTING, MAX_TEXTURE);
    pipeline
        .submit(ImageSource::Bytes {
            name: "broken.jpg".to_string(),
            bytes: vec![0xFF, 0xD8, 0x00],
        })
        .unwrap();

    let outcome = pipeline.wait().unwrap();
    assert_eq!(outcome.name, "broken.jpg");
    assert!(matches!(
        outcome.result,
        Err(ViewerError::DecodeFailure { .. })
    ));
}

#[test]
fn test_empty_selection_submits_nothing() {
    let pipeline = UploadPipeline::new(TargetRect::PAINTING, MAX_TEXTURE);
    let selection = ImageSource::from_selection("   ");
    assert!(matches!(selection, Err(ViewerError::NoFileSelected)));
    assert_eq!(pipeline.latest_generation(), 0);

    std::thread::sleep(Duration::from_millis(20));
    assert!(matches!(pipeline.poll(), Ok(None)));
}

#[test]
fn test_latest_request_wins() {
    let first = write_png("latest", "first.png", 30, 10);
    let second = write_png("latest", "second.png", 10, 30);
    let pipeline = UploadPipeline::new(TargetRect::PAINTING, MAX_TEXTURE);

    pipeline.submit(ImageSource::Path(first)).unwrap();
    let last = pipeline.submit(ImageSource::Path(second)).unwrap();
    assert_eq!(last, 2);

    // The first request may already be running; whatever arrives, the
    // final outcome is the newest request.
    let mut outcomes = Vec::new();
    while let Some(outcome) = pipeline.wait() {
        let done = outcome.generation == last;
        outcomes.push(outcome);
        if done {
            break;
        }
    }

    let final_outcome = outcomes.last().unwrap();
    assert_eq!(final_outcome.generation, 2);
    assert_eq!(final_outcome.name, "second.png");
    assert!(outcomes.len() <= 2);
    assert!(outcomes.windows(2).all(|w| w[0].generation < w[1].generation));
}
