//! Error types for mesh validation.

use thiserror::Error;

/// Ways a pair of position/index buffers can fail to describe a mesh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Position buffer length is not a multiple of 3.
    #[error("position buffer has {0} floats, not a multiple of 3")]
    PositionsNotTriplets(usize),

    /// Index buffer length is not a multiple of 3.
    #[error("index buffer has {0} indices, not a multiple of 3")]
    IndicesNotTriplets(usize),

    /// A triangle references a vertex past the end of the position buffer.
    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Triangle number.
        triangle: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the position buffer.
        vertex_count: usize,
    },

    /// Vertex count or offset indices exceed what a `u32` index can address.
    #[error("mesh would need {0} vertices, more than u32 indices can address")]
    TooManyVertices(usize),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
