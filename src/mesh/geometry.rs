//! Indexed triangle meshes and the transforms applied while assembling them.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::math::Aabb;

/// Vertex layout handed to the renderer
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Indexed triangle list.
///
/// Y is up and the ground plane sits at y = 0. An empty mesh is valid and is
/// what every merge starts from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another mesh, rebasing its indices onto this vertex buffer.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Merge a set of meshes into one
    pub fn merge<'a>(meshes: impl IntoIterator<Item = &'a MeshData>) -> MeshData {
        let mut out = MeshData::new();
        for mesh in meshes {
            out.append(mesh);
        }
        out
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (v.position() + offset).to_array();
        }
    }

    /// Builder form of [`MeshData::translate`]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.translate(offset);
        self
    }

    /// Rotate positions and normals about the world Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        let rotation = Quat::from_rotation_y(angle);
        for v in &mut self.vertices {
            v.position = (rotation * v.position()).to_array();
            v.normal = (rotation * v.normal()).to_array();
        }
    }

    /// Bounding box of all vertices, `None` when the mesh has none
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(Vertex::position))
    }

    /// Raw vertex bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
