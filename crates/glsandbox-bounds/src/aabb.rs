//! Axis-aligned bounding box computation and transformation.

use glsandbox_math::{Mat4, Point3, Vec3, Vec4};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    ///
    /// `min` is `+∞` and `max` is `-∞` on every axis, so the first
    /// [`include_point`](Self::include_point) collapses it onto that point.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Bound an arbitrary set of points. No points gives [`Aabb::empty`].
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// True if the box has not been fed any point (`min > max` on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest box containing both `self` and `other`.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.include_point(&other.min);
        out.include_point(&other.max);
        out
    }

    /// Test if a point lies inside or on the boundary.
    pub fn contains_point(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Expand the AABB by a margin in all directions.
    pub fn expand(&mut self, margin: f32) {
        self.min.x -= margin;
        self.min.y -= margin;
        self.min.z -= margin;
        self.max.x += margin;
        self.max.y += margin;
        self.max.z += margin;
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Edge lengths along each axis.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Surface area of the box. Zero for an empty box.
    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.extents();
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// The 8 corners. Corner `i` takes `max` on x if bit 0 of `i` is set,
    /// on y if bit 1 is set and on z if bit 2 is set.
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Refit this box under an affine transform. See [`transform_aabb`].
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        transform_aabb(self, m)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// Compute the AABB of a packed `[x0, y0, z0, x1, y1, z1, ...]` buffer.
///
/// The point count is `points.len() / 3`; a trailing partial triple is
/// ignored. With no points the result is [`Aabb::empty`], which callers must
/// check for with [`Aabb::is_empty`] before using it as geometry.
pub fn compute_aabb(points: &[f32]) -> Aabb {
    let mut aabb = Aabb::empty();
    for xyz in points.chunks_exact(3) {
        aabb.include_point(&Point3::new(xyz[0], xyz[1], xyz[2]));
    }
    aabb
}

/// Bound the 8 corners of `aabb` after transforming them by `m`.
///
/// Corners are treated as homogeneous points with `w = 1` and no
/// perspective divide is applied, so `m` is expected to be affine. Under a
/// rotation the result encloses the rotated box but is not the tightest fit.
/// An empty box stays empty.
pub fn transform_aabb(aabb: &Aabb, m: &Mat4) -> Aabb {
    let mut out = Aabb::empty();
    if aabb.is_empty() {
        return out;
    }
    for c in aabb.corners() {
        let w = m * Vec4::new(c.x, c.y, c.z, 1.0);
        out.include_point(&Point3::new(w.x, w.y, w.z));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glsandbox_math::Transform;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_compute_aabb_basic() {
        let v = [-1.0, 2.0, 3.0, 4.0, -2.0, 0.0];
        let b = compute_aabb(&v);
        assert_relative_eq!(b.min.x, -1.0);
        assert_relative_eq!(b.min.y, -2.0);
        assert_relative_eq!(b.min.z, 0.0);
        assert_relative_eq!(b.max.x, 4.0);
        assert_relative_eq!(b.max.y, 2.0);
        assert_relative_eq!(b.max.z, 3.0);
    }

    #[test]
    fn test_compute_aabb_contains_every_point() {
        let v = [
            0.5, -3.0, 7.25, //
            -8.0, 1.0, 0.0, //
            2.0, 2.0, -2.0, //
            0.0, 9.5, 1.0, //
            -0.25, -0.25, -6.0,
        ];
        let b = compute_aabb(&v);
        assert!(b.min.x <= b.max.x && b.min.y <= b.max.y && b.min.z <= b.max.z);
        for xyz in v.chunks_exact(3) {
            assert!(b.contains_point(&Point3::new(xyz[0], xyz[1], xyz[2])));
        }
    }

    #[test]
    fn test_compute_aabb_single_point_is_degenerate_box() {
        let b = compute_aabb(&[1.0, 2.0, 3.0]);
        assert_eq!(b.min, b.max);
        assert!(!b.is_empty());
    }

    #[test]
    fn test_compute_aabb_empty_sentinel() {
        let b = compute_aabb(&[]);
        assert!(b.min.x > b.max.x);
        assert!(b.is_empty());
        assert_eq!(b.min.x, f32::INFINITY);
        assert_eq!(b.max.z, f32::NEG_INFINITY);
    }

    #[test]
    fn test_compute_aabb_ignores_partial_triple() {
        let b = compute_aabb(&[1.0, 1.0, 1.0, 100.0, 100.0]);
        assert_eq!(b.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_transform_identity() {
        let b = Aabb::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(4.0, 5.0, 6.0));
        let t = transform_aabb(&b, &Mat4::identity());
        assert!((t.min - b.min).norm() < 1e-6);
        assert!((t.max - b.max).norm() < 1e-6);
    }

    #[test]
    fn test_transform_translation_shifts_exactly() {
        let b = Aabb::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(4.0, 5.0, 6.0));
        let m = Transform::translation(10.0, -20.0, 0.5).matrix;
        let t = transform_aabb(&b, &m);
        assert_eq!(t.min, Point3::new(9.0, -22.0, -2.5));
        assert_eq!(t.max, Point3::new(14.0, -15.0, 6.5));
    }

    #[test]
    fn test_transform_rotation_encloses_corners() {
        let b = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let rot = Transform::rotation_y(FRAC_PI_4);
        let t = b.transformed(&rot.matrix);
        // A unit-half cube rotated 45° about Y spans ±√2 on X and Z.
        let r = 2.0_f32.sqrt();
        assert_relative_eq!(t.max.x, r, epsilon = 1e-5);
        assert_relative_eq!(t.min.z, -r, epsilon = 1e-5);
        assert_relative_eq!(t.max.y, 1.0, epsilon = 1e-6);
        let mut grown = t;
        grown.expand(1e-5);
        for c in b.corners() {
            assert!(grown.contains_point(&rot.apply_point(&c)));
        }
    }

    #[test]
    fn test_transform_scale_negative_flips_axes() {
        let b = Aabb::new(Point3::new(1.0, 2.0, 3.0), Point3::new(2.0, 4.0, 6.0));
        let t = transform_aabb(&b, &Transform::scale(-1.0, 1.0, 2.0).matrix);
        assert_eq!(t.min, Point3::new(-2.0, 2.0, 6.0));
        assert_eq!(t.max, Point3::new(-1.0, 4.0, 12.0));
    }

    #[test]
    fn test_transform_empty_stays_empty() {
        let t = transform_aabb(&Aabb::empty(), &Transform::translation(1.0, 2.0, 3.0).matrix);
        assert!(t.is_empty());
    }

    #[test]
    fn test_corners_bit_order() {
        let b = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        let c = b.corners();
        assert_eq!(c[0], b.min);
        assert_eq!(c[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(c[2], Point3::new(0.0, 2.0, 0.0));
        assert_eq!(c[4], Point3::new(0.0, 0.0, 3.0));
        assert_eq!(c[7], b.max);
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
        let b = Aabb::new(Point3::new(5.0, 5.0, 5.0), Point3::new(15.0, 15.0, 15.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = Aabb::new(Point3::new(20.0, 20.0, 20.0), Point3::new(30.0, 30.0, 30.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
        let b = Aabb::new(Point3::new(10.0, 0.0, 0.0), Point3::new(20.0, 10.0, 10.0));
        assert!(a.overlaps(&b)); // touching counts
    }

    #[test]
    fn test_merge_and_metrics() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(2.0, -1.0, 0.0), Point3::new(3.0, 0.0, 2.0));
        let m = a.merge(&b);
        assert_eq!(m.min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(m.max, Point3::new(3.0, 1.0, 2.0));
        assert_eq!(m.center(), Point3::new(1.5, 0.0, 1.0));
        assert_eq!(m.extents(), Vec3::new(3.0, 2.0, 2.0));
        assert_relative_eq!(m.surface_area(), 2.0 * (6.0 + 4.0 + 6.0));
        assert_eq!(Aabb::empty().surface_area(), 0.0);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let a = Aabb::new(Point3::new(-1.0, 0.0, 1.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(a.merge(&Aabb::empty()), a);
        assert_eq!(Aabb::empty().merge(&a), a);
    }
}
