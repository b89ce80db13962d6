use crate::error::ViewerError;
use crate::fit::ScaleResult;
use crate::upload::{DecodedPicture, UploadOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum PictureStatus {
    Idle,
    Loading { name: String },
    Loaded { name: String, width: u32, height: u32 },
    Failed { message: String },
}

impl PictureStatus {
    pub fn describe(&self) -> String {
        match self {
            PictureStatus::Idle => "Drop an image or enter a path".to_string(),
            PictureStatus::Loading { name } => format!("Loading {}...", name),
            PictureStatus::Loaded { name, width, height } => {
                format!("{} ({}x{})", name, width, height)
            }
            PictureStatus::Failed { message } => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PictureStatus::Failed { .. })
    }
}

/// What the painting currently shows. Only a successful outcome at least as
/// new as every applied one changes the scale.
#[derive(Debug, Clone)]
pub struct PictureState {
    scale: ScaleResult,
    applied_generation: u64,
    pending_generation: u64,
    status: PictureStatus,
}

impl PictureState {
    pub fn new() -> Self {
        Self {
            scale: ScaleResult::IDENTITY,
            applied_generation: 0,
            pending_generation: 0,
            status: PictureStatus::Idle,
        }
    }

    pub fn scale(&self) -> ScaleResult {
        self.scale
    }

    pub fn status(&self) -> &PictureStatus {
        &self.status
    }

    pub fn applied_generation(&self) -> u64 {
        self.applied_generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending_generation > self.applied_generation
            && matches!(self.status, PictureStatus::Loading { .. })
    }

    pub fn begin(&mut self, generation: u64, name: impl Into<String>) {
        self.pending_generation = self.pending_generation.max(generation);
        self.status = PictureStatus::Loading { name: name.into() };
    }

    /// Returns the picture to upload to the GPU when the outcome is accepted
    pub fn apply(&mut self, outcome: UploadOutcome) -> Option<DecodedPicture> {
        if outcome.generation <= self.applied_generation
            || outcome.generation < self.pending_generation
        {
            log::debug!(
                "Ignoring stale upload #{} ({}), newest is #{}",
                outcome.generation,
                outcome.name,
                self.pending_generation
            );
            return None;
        }

        match outcome.result {
            Ok(picture) => {
                let (width, height) = (picture.source.width as u32, picture.source.height as u32);
                log::info!(
                    "Image uploaded successfully: {} {}x{} -> scale ({:.4}, {:.4})",
                    picture.name,
                    width,
                    height,
                    picture.scale.scale_x,
                    picture.scale.scale_y
                );
                self.scale = picture.scale;
                self.applied_generation = outcome.generation;
                self.status = PictureStatus::Loaded {
                    name: picture.name.clone(),
                    width,
                    height,
                };
                Some(picture)
            }
            Err(err) => {
                log::error!("Error loading {}: {}", outcome.name, err);
                self.fail(&err);
                None
            }
        }
    }

    /// Failure outside any single outcome, such as the loader going away.
    /// The pending generation is kept so late outcomes are still judged stale.
    pub fn fail(&mut self, err: &ViewerError) {
        self.status = PictureStatus::Failed {
            message: err.user_message(),
        };
    }
}

impl Default for PictureState {
    fn default() -> Self {
        Self::new()
    }
}
