use gallery_frame::fit::{ScaleResult, SourceImage};
use gallery_frame::picture::{PictureState, PictureStatus};
use gallery_frame::texture::MipChain;
use gallery_frame::upload::{DecodedPicture, UploadOutcome};
use gallery_frame::ViewerError;
use image::RgbaImage;

fn success(generation: u64, name: &str, scale: ScaleResult) -> UploadOutcome {
    UploadOutcome {
        generation,
        name: name.to_string(),
        result: Ok(DecodedPicture {
            name: name.to_string(),
            mips: MipChain::new(RgbaImage::new(4, 2), 8192),
            source: SourceImage::from_pixels(4, 2),
            scale,
        }),
    }
}

fn failure(generation: u64, name: &str) -> UploadOutcome {
    UploadOutcome {
        generation,
        name: name.to_string(),
        result: Err(ViewerError::InvalidDimension {
            width: 0.0,
            height: 10.0,
        }),
    }
}

const WIDE: ScaleResult = ScaleResult {
    scale_x: 1.0,
    scale_y: 0.75,
};

const TALL: ScaleResult = ScaleResult {
    scale_x: 0.5,
    scale_y: 1.0,
};

#[test]
fn test_initial_state() {
    let state = PictureState::new();
    assert_eq!(state.scale(), ScaleResult::IDENTITY);
    assert_eq!(state.status(), &PictureStatus::Idle);
    assert!(!state.is_loading());
}

#[test]
fn test_success_updates_scale_and_status() {
    let mut state = PictureState::new();
    state.begin(1, "a.png");
    assert!(state.is_loading());

    let picture = state.apply(success(1, "a.png", WIDE));
    assert!(picture.is_some());
    assert_eq!(state.scale(), WIDE);
    assert_eq!(state.applied_generation(), 1);
    assert_eq!(
        state.status(),
        &PictureStatus::Loaded {
            name: "a.png".to_string(),
            width: 4,
            height: 2
        }
    );
    assert!(!state.is_loading());
}

#[test]
fn test_failure_keeps_previous_scale() {
    let mut state = PictureState::new();
    state.begin(1, "a.png");
    state.apply(success(1, "a.png", WIDE));

    state.begin(2, "broken.png");
    assert!(state.apply(failure(2, "broken.png")).is_none());

    assert_eq!(state.scale(), WIDE);
    assert_eq!(state.applied_generation(), 1);
    assert!(state.status().is_error());
}

#[test]
fn test_stale_outcome_is_ignored() {
    let mut state = PictureState::new();
    state.begin(1, "old.png");
    state.begin(2, "new.png");

    assert!(state.apply(success(1, "old.png", TALL)).is_none());
    assert_eq!(state.scale(), ScaleResult::IDENTITY);

    assert!(state.apply(success(2, "new.png", WIDE)).is_some());
    assert_eq!(state.scale(), WIDE);
}

#[test]
fn test_never_goes_back_to_older_generation() {
    let mut state = PictureState::new();
    state.begin(3, "c.png");
    state.apply(success(3, "c.png", WIDE));

    assert!(state.apply(success(2, "b.png", TALL)).is_none());
    assert!(state.apply(success(3, "c.png", TALL)).is_none());
    assert_eq!(state.scale(), WIDE);
}

#[test]
fn test_status_text() {
    let mut state = PictureState::new();
    state.begin(1, "cat.jpg");
    assert_eq!(state.status().describe(), "Loading cat.jpg...");

    state.apply(failure(1, "cat.jpg"));
    assert!(state.status().describe().contains("unusable size"));
}

#[test]
fn test_lost_loader_ends_loading() {
    let mut state = PictureState::new();
    state.begin(1, "a.png");
    state.apply(success(1, "a.png", WIDE));

    state.begin(2, "b.png");
    assert!(state.is_loading());

    state.fail(&ViewerError::WorkerUnavailable);
    assert!(!state.is_loading());
    assert!(state.status().is_error());
    assert_eq!(state.scale(), WIDE);

    // A late answer for the abandoned request is still accepted as newest
    assert!(state.apply(success(2, "b.png", TALL)).is_some());
    assert_eq!(state.scale(), TALL);
}

#[test]
fn test_failure_does_not_reopen_older_requests() {
    let mut state = PictureState::new();
    state.begin(1, "old.png");
    state.begin(2, "new.png");
    state.apply(failure(2, "new.png"));

    assert!(state.apply(success(1, "old.png", TALL)).is_none());
    assert_eq!(state.scale(), ScaleResult::IDENTITY);
}
