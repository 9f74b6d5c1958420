#![warn(missing_docs)]

//! Spatial query core for the glsandbox viewer.
//!
//! Re-exports the geometry crates and adds owned meshes and a simple scene
//! with frustum culling and mouse picking on top of them.
//!
//! # Example
//!
//! ```
//! use glsandbox_core::glsandbox_camera::OrbitCamera;
//! use glsandbox_core::glsandbox_math::Transform;
//! use glsandbox_core::{primitives, Scene};
//!
//! let mut scene = Scene::new();
//! scene
//!     .add("cube", primitives::unit_cube(), Transform::identity())
//!     .unwrap();
//!
//! let mut camera = OrbitCamera::new();
//! camera.set_viewport(800, 600);
//!
//! let pick = scene.pick_screen(&camera, 410.0, 290.0).unwrap();
//! assert_eq!(pick.object, 0);
//! ```

pub use glsandbox_bounds;
pub use glsandbox_camera;
pub use glsandbox_frustum;
pub use glsandbox_math;
pub use glsandbox_raycast;

mod error;
mod mesh;
pub mod primitives;
mod scene;

pub use error::{Result, SceneError};
pub use mesh::TriangleMesh;
pub use scene::{screen_ray, Scene, SceneObject, ScenePick};
