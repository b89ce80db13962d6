use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};
use crate::fit::TargetRect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 2.0, 6.0],
            target: [0.0, 0.0, 0.0],
            damping: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLightConfig {
    pub position: [f32; 3],
    #[serde(default = "white")]
    pub color: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Highlight positions in front of the wall, in the order top, bottom,
/// left, right and the four diagonals.
pub const REFLECTION_LIGHT_POSITIONS: [[f32; 3]; 8] = [
    [0.0, 5.0, 6.0],
    [0.0, 1.0, 6.0],
    [-3.0, 3.0, 6.0],
    [3.0, 3.0, 6.0],
    [-2.0, 5.0, 6.0],
    [2.0, 5.0, 6.0],
    [-2.0, 1.0, 6.0],
    [2.0, 1.0, 6.0],
];

pub const REFLECTION_INTENSITY: f32 = 2.0;
pub const REFLECTION_DISTANCE: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub reflection_lights: Vec<PointLightConfig>,
    pub fill_light: Option<PointLightConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        let reflection_lights = REFLECTION_LIGHT_POSITIONS
            .iter()
            .map(|&position| PointLightConfig {
                position,
                color: white(),
                intensity: REFLECTION_INTENSITY,
                distance: REFLECTION_DISTANCE,
            })
            .collect();

        Self {
            ambient_color: white(),
            ambient_intensity: 4.5,
            reflection_lights,
            fill_light: Some(PointLightConfig {
                position: [-3.0, 3.0, 3.0],
                color: white(),
                intensity: 2.5,
                distance: 8.0,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub width: f32,
    pub height: f32,
    pub z: f32,
    /// Image drawn on the wall; a flat `color` is used when absent or unreadable
    pub texture: Option<PathBuf>,
    pub color: [f32; 3],
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 6.0,
            z: -1.0,
            texture: None,
            color: [0.86, 0.84, 0.80],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintingConfig {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    /// Center of the painting in the wall plane
    pub center: [f32; 2],
    /// Gap between the wall and the back face of the painting
    pub wall_offset: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl Default for PaintingConfig {
    fn default() -> Self {
        Self {
            width: 4.5,
            height: 3.0,
            thickness: 0.015,
            center: [1.2, 0.8],
            wall_offset: 0.2,
            roughness: 0.05,
            metalness: 0.3,
            clearcoat: 0.8,
            clearcoat_roughness: 0.3,
        }
    }
}

impl PaintingConfig {
    pub fn target_rect(&self) -> Result<TargetRect> {
        TargetRect::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub wall: WallConfig,
    pub painting: PaintingConfig,
}

impl GalleryConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self> {
        let config: GalleryConfig =
            serde_json::from_str(json).map_err(|source| ViewerError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        config.painting.target_rect()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading gallery config: {:?}", path);
        Self::from_json(path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_gallery() {
        let config = GalleryConfig::default();
        assert_eq!(config.camera.position, [0.0, 2.0, 6.0]);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.lighting.reflection_lights.len(), 8);
        assert_eq!(config.lighting.ambient_intensity, 4.5);
        assert_eq!(config.painting.target_rect().unwrap(), TargetRect::PAINTING);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "painting": { "width": 6.0 }, "camera": { "fov_degrees": 60 } }"#;
        let config = GalleryConfig::from_json(Path::new("test.json"), json).unwrap();
        assert_eq!(config.painting.width, 6.0);
        assert_eq!(config.painting.height, 3.0);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.lighting, LightingConfig::default());
    }

    #[test]
    fn test_light_color_defaults_to_white() {
        let json = r#"{ "lighting": { "reflection_lights": [
            { "position": [1, 2, 3], "intensity": 1.0, "distance": 4.0 }
        ] } }"#;
        let config = GalleryConfig::from_json(Path::new("test.json"), json).unwrap();
        assert_eq!(config.lighting.reflection_lights[0].color, [1.0, 1.0, 1.0]);
        assert!(config.lighting.fill_light.is_some());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = GalleryConfig::from_json(Path::new("bad.json"), "{ nope").unwrap_err();
        assert!(matches!(err, ViewerError::Config { .. }));
    }

    #[test]
    fn test_zero_painting_rejected() {
        let json = r#"{ "painting": { "height": 0.0 } }"#;
        let err = GalleryConfig::from_json(Path::new("test.json"), json).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidDimension { .. }));
    }
}
