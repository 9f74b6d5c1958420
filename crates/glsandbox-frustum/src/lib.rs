#![warn(missing_docs)]

//! View-frustum culling for the glsandbox viewer.
//!
//! The six clip planes are pulled straight out of a combined
//! view-projection matrix (Gribb–Hartmann) and boxes are rejected with the
//! positive-vertex test, one corner per plane.
//!
//! # Example
//!
//! ```
//! use glsandbox_bounds::Aabb;
//! use glsandbox_frustum::{aabb_outside_frustum, extract_frustum};
//! use glsandbox_math::{Point3, Transform, Vec3};
//!
//! let view = Transform::look_at(&Point3::new(0.0, 0.0, 5.0), &Point3::origin(), &Vec3::y());
//! let proj = Transform::perspective(60f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
//! let frustum = extract_frustum(&proj.then(&view).matrix);
//!
//! let cube = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5));
//! assert!(!aabb_outside_frustum(&frustum, &cube));
//! ```

mod cull;
mod frustum;
mod plane;

pub use cull::{par_visible_indices, visible_indices};
pub use frustum::{aabb_outside_frustum, extract_frustum, Frustum, FrustumPlane};
pub use plane::{aabb_outside_plane, Plane};
