use crate::model::Level;
use bytemuck::NoUninit;
use glam::Vec2;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    /// Append a solid-color quad centered at `center`.
    pub fn push_quad(&mut self, center: Vec2, size: Vec2, color: [f32; 4]) {
        let half = size * 0.5;
        let base = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&[
            Vertex { pos: [center.x - half.x, center.y - half.y], color },
            Vertex { pos: [center.x + half.x, center.y - half.y], color },
            Vertex { pos: [center.x + half.x, center.y + half.y], color },
            Vertex { pos: [center.x - half.x, center.y + half.y], color },
        ]);
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Placeholder sprite: a solid-color quad centered at the origin, placed in
/// the world each frame via its transform uniform.
pub fn create_sprite_quad(size: Vec2, color: [f32; 4]) -> Mesh {
    let mut mesh = Mesh::empty();
    mesh.push_quad(Vec2::ZERO, size, color);
    mesh
}

/// Level geometry baked in world coordinates (drawn with an identity
/// transform).
pub fn create_level_mesh(level: &Level) -> Mesh {
    let mut mesh = Mesh::empty();
    for platform in &level.platforms {
        mesh.push_quad(platform.body.center(), platform.body.size(), platform.color);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_has_four_corners_two_triangles() {
        let mesh = create_sprite_quad(Vec2::new(32.0, 48.0), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_sprite_quad_is_origin_centered() {
        let mesh = create_sprite_quad(Vec2::new(32.0, 48.0), [0.0, 0.0, 1.0, 1.0]);
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.pos[0]).collect();
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.pos[1]).collect();

        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -16.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 16.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -24.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 24.0);
    }

    #[test]
    fn test_level_mesh_covers_all_platforms() {
        let level = Level::prototype();
        let mesh = create_level_mesh(&level);
        assert_eq!(mesh.vertices.len(), level.platforms.len() * 4);
        assert_eq!(mesh.indices.len(), level.platforms.len() * 6);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_quad_indices_offset_per_quad() {
        let mut mesh = Mesh::empty();
        mesh.push_quad(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        mesh.push_quad(Vec2::new(4.0, 0.0), Vec2::ONE, [1.0; 4]);

        // Second quad's indices start after the first quad's vertices
        assert!(mesh.indices[6..].iter().all(|&i| i >= 4));
    }
}
