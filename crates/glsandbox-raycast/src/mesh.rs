//! Nearest-hit raycasts over indexed triangle meshes.

use glsandbox_bounds::{compute_aabb, Aabb};
use glsandbox_math::{point_at, Point3};

use crate::error::{MeshError, Result};
use crate::triangle::ray_triangle;
use crate::{Ray, RayHit};

/// Find the nearest triangle hit in front of `ray`.
///
/// `positions` is packed xyz, `indices` holds one vertex-index triplet per
/// triangle; the triangle count is `indices.len() / 3`. Triangles are tested
/// in index order and a hit only replaces the current best when its `t` is
/// strictly smaller, so on exact ties the lowest triangle index wins.
///
/// Returns `None` for an empty mesh or when nothing is hit.
///
/// # Panics
///
/// Panics if an index points past the end of `positions`. Use
/// [`MeshView::new`] to check untrusted buffers first.
pub fn raycast_mesh(ray: &Ray, positions: &[f32], indices: &[u32]) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;

    for (i, tri) in indices.chunks_exact(3).enumerate() {
        let v0 = point_at(positions, tri[0] as usize);
        let v1 = point_at(positions, tri[1] as usize);
        let v2 = point_at(positions, tri[2] as usize);

        if let Some(hit) = ray_triangle(ray, &v0, &v1, &v2) {
            if best.map_or(true, |b| hit.t < b.t) {
                best = Some(RayHit {
                    t: hit.t,
                    u: hit.u,
                    v: hit.v,
                    tri_index: i,
                });
            }
        }
    }

    best
}

/// Borrowed position/index buffers that have been checked to form a mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    positions: &'a [f32],
    indices: &'a [u32],
}

impl<'a> MeshView<'a> {
    /// Check that both buffers hold whole triplets and every index is in
    /// range.
    pub fn new(positions: &'a [f32], indices: &'a [u32]) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::PositionsNotTriplets(positions.len()));
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndicesNotTriplets(indices.len()));
        }

        let vertex_count = positions.len() / 3;
        for (triangle, tri) in indices.chunks_exact(3).enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self { positions, indices })
    }

    /// Packed xyz vertex positions.
    pub fn positions(&self) -> &'a [f32] {
        self.positions
    }

    /// Triangle vertex indices.
    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of triangle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= triangle_count()`.
    pub fn triangle(&self, i: usize) -> [Point3; 3] {
        let tri = &self.indices[3 * i..3 * i + 3];
        [
            point_at(self.positions, tri[0] as usize),
            point_at(self.positions, tri[1] as usize),
            point_at(self.positions, tri[2] as usize),
        ]
    }

    /// Bounds of all vertex positions (referenced or not).
    pub fn bounds(&self) -> Aabb {
        compute_aabb(self.positions)
    }

    /// Nearest hit in front of `ray`. See [`raycast_mesh`].
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        raycast_mesh(ray, self.positions, self.indices)
    }
}
