//! Error types for scene construction.

use glsandbox_raycast::MeshError;
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// An object's mesh buffers are malformed.
    #[error("invalid mesh for object `{name}`: {source}")]
    InvalidMesh {
        /// Object name.
        name: String,
        /// What is wrong with the buffers.
        #[source]
        source: MeshError,
    },

    /// An object's transform contains NaN or infinite entries.
    #[error("transform of object `{0}` is not finite")]
    NonFiniteTransform(String),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
