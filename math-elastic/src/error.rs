//! Error types for elastic wave computations.
//!
//! Non-physical input (zero density, zero direction, a stiffness matrix that
//! is not positive-definite along a direction) is not an error: the solver
//! returns a null result for those elements. Errors are reserved for caller
//! mistakes such as malformed batch shapes, unknown names, and I/O.

use thiserror::Error;

/// Errors that can occur in elastic wave computations.
#[derive(Debug, Error)]
pub enum ElasticError {
    /// The trailing axis of a direction batch is not of length 3.
    #[error("direction batch must end with an axis of length 3, got shape {shape:?}")]
    DirectionShape {
        /// Shape of the offending array
        shape: Vec<usize>,
    },

    /// A wave field does not belong to the given direction batch.
    #[error("wave field holds {field} elements but the direction batch holds {directions}")]
    BatchMismatch {
        /// Number of directions in the batch
        directions: usize,
        /// Number of elements in the wave field
        field: usize,
    },

    /// No material of that name in the catalog.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// The name does not match any symmetry class.
    #[error("unknown symmetry class: {0}")]
    UnknownSymmetry(String),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// File access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for elastic wave operations.
pub type Result<T> = std::result::Result<T, ElasticError>;

impl ElasticError {
    /// Returns `true` if the error comes from a malformed batch.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            ElasticError::DirectionShape { .. } | ElasticError::BatchMismatch { .. }
        )
    }

    /// Returns `true` if a material or symmetry name lookup failed.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            ElasticError::UnknownMaterial(_) | ElasticError::UnknownSymmetry(_)
        )
    }

    /// Returns `true` if the error comes from loading or saving a file.
    pub fn is_io_error(&self) -> bool {
        matches!(self, ElasticError::Io(_) | ElasticError::Json(_))
    }
}
