//! Owned triangle mesh buffers.

use glsandbox_bounds::{compute_aabb, Aabb};
use glsandbox_math::{point_at, Mat4, Transform};
use glsandbox_raycast::{MeshError, MeshView};
use serde::{Deserialize, Serialize};

/// Indexed triangle mesh as uploaded to the GPU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing buffers without checking them. See [`view`](Self::view).
    pub fn from_buffers(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.num_triangles() == 0
    }

    /// Merge another mesh into this one.
    ///
    /// Fails without modifying `self` if the merged indices would not fit
    /// in `u32`.
    pub fn merge(&mut self, other: &TriangleMesh) -> Result<(), MeshError> {
        let total = self.num_vertices() + other.num_vertices();
        let overflow = MeshError::TooManyVertices(total);
        let offset = u32::try_from(self.num_vertices()).map_err(|_| overflow.clone())?;
        let indices = other
            .indices
            .iter()
            .map(|&i| i.checked_add(offset))
            .collect::<Option<Vec<u32>>>()
            .ok_or(overflow)?;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(indices);
        Ok(())
    }

    /// Bounds of all vertices; empty for a mesh without vertices.
    pub fn bounds(&self) -> Aabb {
        compute_aabb(&self.vertices)
    }

    /// Validate the buffers and borrow them as a [`MeshView`].
    pub fn view(&self) -> Result<MeshView<'_>, MeshError> {
        MeshView::new(&self.vertices, &self.indices)
    }

    /// Copy of this mesh with every vertex mapped through `m` (`w = 1`, no
    /// perspective divide). Indices are unchanged.
    pub fn transformed(&self, m: &Mat4) -> TriangleMesh {
        let t = Transform::from_matrix(*m);
        let vertices = (0..self.num_vertices())
            .flat_map(|i| {
                let p = t.apply_point(&point_at(&self.vertices, i));
                [p.x, p.y, p.z]
            })
            .collect();
        TriangleMesh {
            vertices,
            indices: self.indices.clone(),
        }
    }
}
