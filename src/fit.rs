use crate::error::{Result, ViewerError};

/// Physical size of the display surface the picture is fitted into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRect {
    pub width: f32,
    pub height: f32,
}

impl TargetRect {
    /// Painting frame of the default gallery scene
    pub const PAINTING: TargetRect = TargetRect {
        width: 4.5,
        height: 3.0,
    };

    pub fn new(width: f32, height: f32) -> Result<Self> {
        check_dimension(width, height)?;
        Ok(Self { width, height })
    }
}

impl Default for TargetRect {
    fn default() -> Self {
        Self::PAINTING
    }
}

/// Pixel dimensions of a decoded picture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceImage {
    pub width: f32,
    pub height: f32,
}

impl SourceImage {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// Per-axis scale applied to the painting transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleResult {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ScaleResult {
    pub const IDENTITY: ScaleResult = ScaleResult {
        scale_x: 1.0,
        scale_y: 1.0,
    };
}

impl Default for ScaleResult {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn check_dimension(width: f32, height: f32) -> Result<()> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ViewerError::InvalidDimension { width, height })
    }
}

/// Letterbox/pillarbox fit: the axis that overflows relative to the target
/// stays at 1, the other shrinks so the picture keeps its aspect ratio.
pub fn fit(
    image_width: f32,
    image_height: f32,
    target_width: f32,
    target_height: f32,
) -> Result<ScaleResult> {
    check_dimension(image_width, image_height)?;
    check_dimension(target_width, target_height)?;

    // f64 so extreme but finite sizes neither overflow nor flush to zero
    let image_aspect = image_width as f64 / image_height as f64;
    let target_aspect = target_width as f64 / target_height as f64;

    let (scale_x, scale_y) = if image_aspect > target_aspect {
        (1.0, target_aspect / image_aspect)
    } else {
        (image_aspect / target_aspect, 1.0)
    };

    let scale = ScaleResult {
        scale_x: scale_x as f32,
        scale_y: scale_y as f32,
    };
    if !(scale.scale_x.is_normal() && scale.scale_y.is_normal()) {
        return Err(ViewerError::InvalidDimension {
            width: image_width,
            height: image_height,
        });
    }

    Ok(scale)
}

pub fn fit_image(image: SourceImage, target: TargetRect) -> Result<ScaleResult> {
    fit(image.width, image.height, target.width, target.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_aspect_is_identity() {
        assert_eq!(fit(4.5, 3.0, 4.5, 3.0).unwrap(), ScaleResult::IDENTITY);
    }

    #[test]
    fn test_target_rect_rejects_zero() {
        assert!(TargetRect::new(0.0, 3.0).is_err());
        assert!(TargetRect::new(4.5, f32::NAN).is_err());
        assert_eq!(TargetRect::new(4.5, 3.0).unwrap(), TargetRect::PAINTING);
    }

    #[test]
    fn test_infinite_image_rejected() {
        let err = fit(f32::INFINITY, 10.0, 4.5, 3.0).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidDimension { .. }));
    }
}
