//! Error types for clipping.

use thiserror::Error;

/// Result type for clipping operations.
pub type ClipResult<T> = Result<T, ClipError>;

/// Errors that can occur while clipping a mesh.
#[derive(Debug, Error)]
pub enum ClipError {
    /// Input mesh has no vertices or no faces.
    #[error("input mesh is empty")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face {face} references a missing vertex")]
    InvalidIndex {
        /// Index of the offending face.
        face: usize,
    },

    /// Cut height is NaN or infinite.
    #[error("cut height must be finite, got {0}")]
    NonFiniteHeight(f64),
}
