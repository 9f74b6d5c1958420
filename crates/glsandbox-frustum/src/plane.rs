//! Oriented planes and the positive-vertex box test.

use glsandbox_bounds::Aabb;
use glsandbox_math::{Point3, Vec3, Vec4};

/// A plane `dot(normal, x) + d = 0`.
///
/// Frustum planes face inward: points with positive signed distance are on
/// the visible side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal, unit length unless the plane is degenerate.
    pub normal: Vec3,
    /// Signed offset.
    pub d: f32,
}

impl Plane {
    /// Create a plane from a normal and offset, taken as is.
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Build a plane from `(A, B, C, D)` coefficients, scaling all four by
    /// `1 / |(A, B, C)|`.
    ///
    /// A zero-length normal leaves the coefficients untouched.
    pub fn from_coefficients(eq: &Vec4) -> Self {
        let mut normal = Vec3::new(eq.x, eq.y, eq.z);
        let mut d = eq.w;
        let len = normal.norm();
        if len > 0.0 {
            normal /= len;
            d /= len;
        }
        Self { normal, d }
    }

    /// Signed distance from `p` to the plane (scaled by `|normal|`).
    #[inline]
    pub fn signed_distance(&self, p: &Point3) -> f32 {
        self.normal.dot(&p.coords) + self.d
    }

    /// The box corner furthest along the normal.
    #[inline]
    pub fn positive_vertex(&self, aabb: &Aabb) -> Point3 {
        Point3::new(
            if self.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
            if self.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
            if self.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
        )
    }
}

/// True if `aabb` lies entirely on the negative side of `plane`.
///
/// Only the positive vertex is tested: if the corner furthest along the
/// normal is behind the plane, every other corner is too.
#[inline]
pub fn aabb_outside_plane(plane: &Plane, aabb: &Aabb) -> bool {
    plane.signed_distance(&plane.positive_vertex(aabb)) < 0.0
}
