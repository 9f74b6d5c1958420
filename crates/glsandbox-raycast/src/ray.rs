//! Ray representation and hit record.

use glsandbox_bounds::Aabb;
use glsandbox_math::{Point3, Vec3};

/// A ray in 3D space defined by origin and direction.
///
/// Intersection routines expect `direction` to be unit length; with a
/// non-unit direction reported `t` values still order hits along the ray
/// but are no longer Euclidean distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }

    /// Test ray-AABB intersection using the slab method.
    ///
    /// Returns `Some((t_min, t_max))` if the ray intersects the box,
    /// where `t_min` and `t_max` are the entry and exit parameters, with
    /// `t_min` clamped to zero when the origin is inside.
    /// Returns `None` if no intersection.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let inv = Vec3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        );
        let bounds = [aabb.min, aabb.max];
        let sign = [
            usize::from(inv.x < 0.0),
            usize::from(inv.y < 0.0),
            usize::from(inv.z < 0.0),
        ];

        let tx1 = (bounds[sign[0]].x - self.origin.x) * inv.x;
        let tx2 = (bounds[1 - sign[0]].x - self.origin.x) * inv.x;

        let mut t_min = tx1;
        let mut t_max = tx2;

        let ty1 = (bounds[sign[1]].y - self.origin.y) * inv.y;
        let ty2 = (bounds[1 - sign[1]].y - self.origin.y) * inv.y;

        t_min = t_min.max(ty1);
        t_max = t_max.min(ty2);

        let tz1 = (bounds[sign[2]].z - self.origin.z) * inv.z;
        let tz2 = (bounds[1 - sign[2]].z - self.origin.z) * inv.z;

        t_min = t_min.max(tz1);
        t_max = t_max.min(tz2);

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}

/// Nearest hit of a ray against a triangle mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray (`> 0`).
    pub t: f32,
    /// Barycentric weight of the triangle's second vertex.
    pub u: f32,
    /// Barycentric weight of the triangle's third vertex.
    pub v: f32,
    /// Index of the triangle that was hit, `0..triangle_count`.
    pub tri_index: usize,
}

impl RayHit {
    /// Barycentric weight of the first vertex, `1 - u - v`.
    #[inline]
    pub fn w(&self) -> f32 {
        1.0 - self.u - self.v
    }

    /// World-space hit position along `ray`.
    #[inline]
    pub fn point(&self, ray: &Ray) -> Point3 {
        ray.at(self.t)
    }
}
