//! Six-plane view frustum.

use glsandbox_bounds::Aabb;
use glsandbox_math::{Mat4, Point3, Vec4};

use crate::plane::{aabb_outside_plane, Plane};

/// Names of the six frustum planes, in storage and evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    /// `x >= -w` in clip space.
    Left = 0,
    /// `x <= w`.
    Right = 1,
    /// `y >= -w`.
    Bottom = 2,
    /// `y <= w`.
    Top = 3,
    /// `z >= -w`.
    Near = 4,
    /// `z <= w`.
    Far = 5,
}

impl FrustumPlane {
    /// All planes in evaluation order.
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];

    /// Lowercase name, e.g. for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            FrustumPlane::Left => "left",
            FrustumPlane::Right => "right",
            FrustumPlane::Bottom => "bottom",
            FrustumPlane::Top => "top",
            FrustumPlane::Near => "near",
            FrustumPlane::Far => "far",
        }
    }
}

/// The six inward-facing clip planes of a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Planes indexed by `FrustumPlane as usize`.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes of `view_projection`. See [`extract_frustum`].
    pub fn from_view_projection(view_projection: &Mat4) -> Self {
        extract_frustum(view_projection)
    }

    /// Look up a plane by name.
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// The first plane, in [`FrustumPlane::ALL`] order, that `aabb` lies
    /// entirely behind. `None` means the box is inside or intersecting.
    pub fn culling_plane(&self, aabb: &Aabb) -> Option<FrustumPlane> {
        FrustumPlane::ALL
            .into_iter()
            .find(|&which| aabb_outside_plane(self.plane(which), aabb))
    }

    /// True if `aabb` is culled. See [`aabb_outside_frustum`].
    pub fn culls(&self, aabb: &Aabb) -> bool {
        aabb_outside_frustum(self, aabb)
    }

    /// True if `p` is on the inner side of (or on) every plane.
    pub fn contains_point(&self, p: &Point3) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }
}

/// Extract the six clip planes from a combined view-projection matrix.
///
/// With `r0..r3` the rows of the matrix, the planes are `r3 + r0` (left),
/// `r3 - r0` (right), `r3 + r1` (bottom), `r3 - r1` (top), `r3 + r2` (near)
/// and `r3 - r2` (far). Each is normalized so its normal has unit length; a
/// plane whose normal has zero length (malformed input) is stored as is.
pub fn extract_frustum(view_projection: &Mat4) -> Frustum {
    let row = |i: usize| -> Vec4 { view_projection.row(i).transpose() };
    let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

    let eq = [
        r3 + r0, // left
        r3 - r0, // right
        r3 + r1, // bottom
        r3 - r1, // top
        r3 + r2, // near
        r3 - r2, // far
    ];

    Frustum {
        planes: eq.map(|e| Plane::from_coefficients(&e)),
    }
}

/// True if `aabb` is outside any frustum plane, i.e. it can be culled.
///
/// Planes are tested left, right, bottom, top, near, far and the test stops
/// at the first plane that rejects the box.
pub fn aabb_outside_frustum(frustum: &Frustum, aabb: &Aabb) -> bool {
    frustum
        .planes
        .iter()
        .any(|plane| aabb_outside_plane(plane, aabb))
}
