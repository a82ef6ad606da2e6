//! Error types for mesh subdivision operations.

use mesh_types::TopologyError;
use thiserror::Error;

/// Errors that can occur during subdivision operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubdivideError {
    /// Mesh would exceed maximum size.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },

    /// The subdivided tables failed the integrity check.
    #[error("subdivided mesh is inconsistent: {0}")]
    Topology(#[from] TopologyError),
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
