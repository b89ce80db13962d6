/// Vertex layout shared by every mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Appends one quad. Corners go counter-clockwise seen from the front:
    /// bottom-left, bottom-right, top-right, top-left.
    fn push_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let base = self.vertices.len() as u16;
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        self.vertices.extend(
            corners
                .iter()
                .zip(uvs)
                .map(|(&position, uv)| Vertex { position, normal, uv }),
        );
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Plane in the XY plane facing +Z, centered on the origin
pub fn plane(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = Mesh::default();
    mesh.push_quad(
        [
            [-hw, -hh, 0.0],
            [hw, -hh, 0.0],
            [hw, hh, 0.0],
            [-hw, hh, 0.0],
        ],
        [0.0, 0.0, 1.0],
    );
    mesh
}

/// Box centered on the origin; every face maps the full texture
pub fn cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = Mesh::default();

    // +Z front
    mesh.push_quad([[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]], [0.0, 0.0, 1.0]);
    // -Z back
    mesh.push_quad([[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]], [0.0, 0.0, -1.0]);
    // +X right
    mesh.push_quad([[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]], [1.0, 0.0, 0.0]);
    // -X left
    mesh.push_quad([[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]], [-1.0, 0.0, 0.0]);
    // +Y top
    mesh.push_quad([[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]], [0.0, 1.0, 0.0]);
    // -Y bottom
    mesh.push_quad([[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]], [0.0, -1.0, 0.0]);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn face_normal(mesh: &Mesh, tri: usize) -> Vec3 {
        let i = &mesh.indices[tri * 3..tri * 3 + 3];
        let a = Vec3::from_array(mesh.vertices[i[0] as usize].position);
        let b = Vec3::from_array(mesh.vertices[i[1] as usize].position);
        let c = Vec3::from_array(mesh.vertices[i[2] as usize].position);
        (b - a).cross(c - a).normalize()
    }

    #[test]
    fn test_plane_extent() {
        let mesh = plane(10.0, 6.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices[2].position, [5.0, 3.0, 0.0]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_cuboid_winding_matches_normals() {
        let mesh = cuboid(4.5, 3.0, 0.015);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        for tri in 0..mesh.triangle_count() {
            let stored = Vec3::from_array(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(face_normal(&mesh, tri).dot(stored) > 0.99, "triangle {}", tri);
        }
    }

    #[test]
    fn test_cuboid_bounds() {
        let mesh = cuboid(4.5, 3.0, 0.015);
        let max_x = mesh.vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let min_z = mesh.vertices.iter().map(|v| v.position[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 2.25);
        assert_eq!(min_z, -0.0075);
    }
}
