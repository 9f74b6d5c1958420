#![warn(missing_docs)]

//! Axis-aligned bounding boxes for the glsandbox viewer.
//!
//! - [`Aabb`] - min/max box, with [`compute_aabb`] over packed xyz buffers
//!   and [`transform_aabb`] for refitting under an affine transform
//! - [`wire`] - line-list geometry for drawing boxes, hit markers and
//!   picked triangles

mod aabb;
pub mod wire;

pub use aabb::{compute_aabb, transform_aabb, Aabb};
pub use wire::{
    cross_segments, cross_vertices, triangle_outline_vertices, triangle_segments, wire_edges,
};
