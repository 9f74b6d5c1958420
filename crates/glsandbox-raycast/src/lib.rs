#![warn(missing_docs)]

//! Ray picking for the glsandbox viewer.
//!
//! # Architecture
//!
//! - [`Ray`] - origin plus unit direction
//! - [`RayHit`] - nearest mesh hit: distance, barycentrics, triangle index
//! - [`screen`] - pixel coordinates to world-space rays and back
//! - [`ray_triangle`] - Möller–Trumbore intersection
//! - [`raycast_mesh`] - brute-force nearest hit over an indexed mesh
//! - [`MeshView`] - validated borrowed mesh buffers
//! - [`bvh`] - bounding volume hierarchy returning the same hits as the
//!   linear scan
//!
//! # Example
//!
//! ```
//! use glsandbox_math::{Point3, Vec3};
//! use glsandbox_raycast::{raycast_mesh, Ray};
//!
//! let positions = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0];
//! let indices = [0, 1, 2];
//! let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::z());
//!
//! let hit = raycast_mesh(&ray, &positions, &indices).unwrap();
//! assert_eq!(hit.tri_index, 0);
//! assert!((hit.t - 5.0).abs() < 1e-5);
//! ```

mod error;
mod mesh;
mod ray;
mod triangle;

pub mod bvh;
pub mod screen;

pub use bvh::MeshBvh;
pub use error::{MeshError, Result};
pub use mesh::{raycast_mesh, MeshView};
pub use ray::{Ray, RayHit};
pub use screen::{project_to_screen, screen_ray_from_inv_vp};
pub use triangle::{ray_triangle, TriangleHit, PARALLEL_EPSILON};
