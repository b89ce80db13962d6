use glam::Mat4;

use crate::scene::{AmbientLight, Material, PointLight, SceneObject, MAX_POINT_LIGHTS};

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

/// Point light as laid out in the shader's uniform array
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightData {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub distance: f32,
}

impl From<&PointLight> for PointLightData {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.to_array(),
            intensity: light.intensity,
            color: light.color.to_array(),
            distance: light.distance,
        }
    }
}

/// Per-frame scene data: camera plus every light
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub camera: CameraUniform,
    /// rgb = color * intensity
    pub ambient: [f32; 4],
    pub light_count: u32,
    pub _pad0: u32,
    pub _pad1: u32,
    pub _pad2: u32,
    pub lights: [PointLightData; MAX_POINT_LIGHTS],
}

impl SceneUniform {
    pub fn new(camera: CameraUniform, ambient: &AmbientLight, lights: &[PointLight]) -> Self {
        let mut data = [PointLightData::default(); MAX_POINT_LIGHTS];
        for (slot, light) in data.iter_mut().zip(lights) {
            *slot = light.into();
        }
        let ambient_rgb = ambient.color * ambient.intensity;

        Self {
            camera,
            ambient: [ambient_rgb.x, ambient_rgb.y, ambient_rgb.z, 1.0],
            light_count: lights.len().min(MAX_POINT_LIGHTS) as u32,
            _pad0: 0,
            _pad1: 0,
            _pad2: 0,
            lights: data,
        }
    }
}

/// Per-object transform and material
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    /// roughness, metalness, clearcoat, clearcoat roughness
    pub material: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let normal_matrix = model.inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            base_color: material.base_color.extend(1.0).to_array(),
            material: [
                material.roughness,
                material.metalness,
                material.clearcoat,
                material.clearcoat_roughness,
            ],
        }
    }

    pub fn from_object(object: &SceneObject) -> Self {
        Self::new(object.transform.matrix(), &object.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_wgsl_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(std::mem::size_of::<PointLightData>(), 32);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 112 + 32 * MAX_POINT_LIGHTS);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 160);
    }
}
