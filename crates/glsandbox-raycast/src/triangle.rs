//! Ray-triangle intersection (Möller–Trumbore).

use glsandbox_math::Point3;

use crate::Ray;

/// Determinant magnitude below which a ray counts as parallel to a
/// triangle, and the minimum accepted `t`.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// Intersection of a ray with a single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Distance along the ray.
    pub t: f32,
    /// Barycentric weight of `v1`.
    pub u: f32,
    /// Barycentric weight of `v2`.
    pub v: f32,
}

/// Intersect `ray` with the triangle `(v0, v1, v2)`.
///
/// Both faces are hit; winding is ignored. Returns `None` when the ray is
/// parallel to the triangle's plane, passes outside the triangle, or meets
/// it at `t <= PARALLEL_EPSILON` (behind or at the origin).
pub fn ray_triangle(ray: &Ray, v0: &Point3, v1: &Point3, v2: &Point3) -> Option<TriangleHit> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = ray.direction.cross(&e2);
    let det = e1.dot(&p);

    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin - v0;
    let u = tvec.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(&e1);
    let v = ray.direction.dot(&qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(&qvec) * inv_det;
    (t > PARALLEL_EPSILON).then_some(TriangleHit { t, u, v })
}
