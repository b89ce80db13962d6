use glam::{Mat4, Vec3};

use crate::config::{GalleryConfig, PointLightConfig};
use crate::error::Result;
use crate::fit::{ScaleResult, TargetRect};
use crate::mesh::{cuboid, plane, Mesh};

/// Uniform array size in the shader
pub const MAX_POINT_LIGHTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Range after which the light contributes nothing
    pub distance: f32,
}

impl From<&PointLightConfig> for PointLight {
    fn from(cfg: &PointLightConfig) -> Self {
        Self {
            position: Vec3::from_array(cfg.position),
            color: Vec3::from_array(cfg.color),
            intensity: cfg.intensity,
            distance: cfg.distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// Surface parameters of the painting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl Material {
    pub const UNLIT: Material = Material {
        base_color: Vec3::ONE,
        roughness: 1.0,
        metalness: 0.0,
        clearcoat: 0.0,
        clearcoat_roughness: 1.0,
    };
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub transform: Transform,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub struct Painting {
    pub object: SceneObject,
    pub frame: TargetRect,
}

impl Painting {
    pub fn apply_scale(&mut self, scale: ScaleResult) {
        self.object.transform.scale = Vec3::new(scale.scale_x, scale.scale_y, 1.0);
    }

    pub fn scale(&self) -> ScaleResult {
        ScaleResult {
            scale_x: self.object.transform.scale.x,
            scale_y: self.object.transform.scale.y,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryScene {
    pub wall: SceneObject,
    pub wall_color: Vec3,
    pub painting: Painting,
    pub ambient: AmbientLight,
    pub lights: Vec<PointLight>,
}

pub fn create_gallery_scene(config: &GalleryConfig) -> Result<GalleryScene> {
    let wall_cfg = &config.wall;
    let wall = SceneObject {
        mesh: plane(wall_cfg.width, wall_cfg.height),
        transform: Transform::at(Vec3::new(0.0, 0.0, wall_cfg.z)),
        material: Material::UNLIT,
    };

    let p = &config.painting;
    let frame = p.target_rect()?;
    let painting_z = wall_cfg.z + p.wall_offset + p.thickness / 2.0;
    let painting = Painting {
        object: SceneObject {
            mesh: cuboid(frame.width, frame.height, p.thickness),
            transform: Transform::at(Vec3::new(p.center[0], p.center[1], painting_z)),
            material: Material {
                base_color: Vec3::ONE,
                roughness: p.roughness,
                metalness: p.metalness,
                clearcoat: p.clearcoat,
                clearcoat_roughness: p.clearcoat_roughness,
            },
        },
        frame,
    };

    let lighting = &config.lighting;
    let mut lights: Vec<PointLight> = lighting
        .reflection_lights
        .iter()
        .chain(lighting.fill_light.iter())
        .map(PointLight::from)
        .collect();

    if lights.len() > MAX_POINT_LIGHTS {
        log::warn!(
            "{} point lights configured, only the first {} are used",
            lights.len(),
            MAX_POINT_LIGHTS
        );
        lights.truncate(MAX_POINT_LIGHTS);
    }

    log::info!(
        "Gallery scene: wall {}x{}, painting {}x{} at z={:.4}, {} point lights",
        wall_cfg.width,
        wall_cfg.height,
        frame.width,
        frame.height,
        painting_z,
        lights.len()
    );

    Ok(GalleryScene {
        wall,
        wall_color: Vec3::from_array(wall_cfg.color),
        painting,
        ambient: AmbientLight {
            color: Vec3::from_array(lighting.ambient_color),
            intensity: lighting.ambient_intensity,
        },
        lights,
    })
}
