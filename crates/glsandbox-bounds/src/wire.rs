//! Line-list geometry for debug overlays.
//!
//! The viewer draws bounding boxes as 12-edge wireframes, marks pick hits
//! with a small three-axis cross and outlines the picked triangle. These helpers produce the vertex data only;
//! uploading and drawing it is the renderer's job.

use glsandbox_math::Point3;

use crate::Aabb;

/// Corner-index pairs of the 12 box edges, indexing [`Aabb::corners`].
///
/// Bottom rectangle, top rectangle, then the four verticals.
#[rustfmt::skip]
pub const fn wire_edges() -> [[usize; 2]; 12] {
    [
        [0, 1], [1, 3], [3, 2], [2, 0],
        [4, 5], [5, 7], [7, 6], [6, 4],
        [0, 4], [1, 5], [2, 6], [3, 7],
    ]
}

impl Aabb {
    /// The 12 edges of the box as point pairs, in [`wire_edges`] order.
    pub fn wire_segments(&self) -> [[Point3; 2]; 12] {
        let c = self.corners();
        wire_edges().map(|[a, b]| [c[a], c[b]])
    }

    /// Packed xyz line-list vertices: 24 points, 72 floats.
    pub fn wire_vertices(&self) -> Vec<f32> {
        flatten_segments(&self.wire_segments())
    }
}

/// Three axis-aligned segments of length `2 * half_size` crossing at `center`,
/// ordered X, Y, Z.
pub fn cross_segments(center: &Point3, half_size: f32) -> [[Point3; 2]; 3] {
    let p = center;
    let h = half_size;
    [
        [Point3::new(p.x - h, p.y, p.z), Point3::new(p.x + h, p.y, p.z)],
        [Point3::new(p.x, p.y - h, p.z), Point3::new(p.x, p.y + h, p.z)],
        [Point3::new(p.x, p.y, p.z - h), Point3::new(p.x, p.y, p.z + h)],
    ]
}

/// Packed xyz line-list vertices of [`cross_segments`]: 6 points, 18 floats.
pub fn cross_vertices(center: &Point3, half_size: f32) -> Vec<f32> {
    flatten_segments(&cross_segments(center, half_size))
}

/// The three edges of triangle `abc`: `ab`, `bc`, `ca`.
pub fn triangle_segments(a: &Point3, b: &Point3, c: &Point3) -> [[Point3; 2]; 3] {
    [[*a, *b], [*b, *c], [*c, *a]]
}

/// Packed xyz line-list vertices of [`triangle_segments`]: 6 points, 18 floats.
pub fn triangle_outline_vertices(a: &Point3, b: &Point3, c: &Point3) -> Vec<f32> {
    flatten_segments(&triangle_segments(a, b, c))
}

fn flatten_segments(segments: &[[Point3; 2]]) -> Vec<f32> {
    let mut data = Vec::with_capacity(segments.len() * 6);
    for [a, b] in segments {
        data.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
    }
    data
}
