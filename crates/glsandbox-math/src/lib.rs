#![warn(missing_docs)]

//! Math types for the glsandbox spatial query core.
//!
//! Thin wrappers around nalgebra providing the single-precision types the
//! viewer works in: points, vectors, 4x4 matrices and an affine/projective
//! [`Transform`] with OpenGL conventions (right-handed view space, clip
//! depth in `[-1, 1]`).

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// A homogeneous 4-vector.
pub type Vec4 = Vector4<f32>;

/// A 4x4 column-major matrix.
pub type Mat4 = Matrix4<f32>;

/// A 4x4 transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Mat4,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
        }
    }

    /// Wrap an existing matrix.
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        let mut m = Mat4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut m = Mat4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Right-handed view matrix looking from `eye` at `target`.
    pub fn look_at(eye: &Point3, target: &Point3, up: &Vec3) -> Self {
        Self {
            matrix: Mat4::look_at_rh(eye, target, up),
        }
    }

    /// OpenGL perspective projection.
    ///
    /// `fov_y` is in radians. Depth maps to `[-1, 1]` in NDC.
    ///
    /// Never panics: a degenerate lens (`z_near == z_far`, zero aspect or
    /// field of view) yields non-finite entries, which later surface as a
    /// failed [`inverse`](Self::inverse).
    pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let depth = z_far - z_near;
        let mut m = Mat4::zeros();
        m[(0, 0)] = f / aspect;
        m[(1, 1)] = f;
        m[(2, 2)] = -(z_far + z_near) / depth;
        m[(2, 3)] = -2.0 * z_far * z_near / depth;
        m[(3, 2)] = -1.0;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// Applying the result to a point applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point with `w = 1`, without a perspective divide.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vec4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vec4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a point with `w = 1` and divide by the resulting `w`.
    ///
    /// Returns `None` when `w` is zero.
    pub fn project_point(&self, p: &Point3) -> Option<Point3> {
        let v = self.matrix * Vec4::new(p.x, p.y, p.z, 1.0);
        if v.w == 0.0 {
            return None;
        }
        Some(Point3::new(v.x / v.w, v.y / v.w, v.z / v.w))
    }

    /// Inverse of this transform, if it exists.
    ///
    /// Returns `None` for singular matrices and for inverses with NaN or
    /// infinite entries.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix
            .try_inverse()
            .filter(is_finite)
            .map(|matrix| Self { matrix })
    }

    /// True if every entry of the matrix is finite.
    pub fn is_finite(&self) -> bool {
        is_finite(&self.matrix)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

fn is_finite(m: &Mat4) -> bool {
    m.iter().all(|x| x.is_finite())
}

/// Read three consecutive floats at vertex `index` of a packed xyz buffer.
///
/// # Panics
///
/// Panics if `3 * index + 2` is out of bounds.
#[inline]
pub fn point_at(positions: &[f32], index: usize) -> Point3 {
    let i = 3 * index;
    Point3::new(positions[i], positions[i + 1], positions[i + 2])
}
