//! Error types for mesh import and welding.

use mesh_types::TopologyError;
use thiserror::Error;

/// Result type for import operations.
pub type WeldResult<T> = Result<T, WeldError>;

/// Errors that can occur while importing a triangle soup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WeldError {
    /// A triangle references a position that does not exist.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The invalid index.
        index: u32,
        /// Total number of positions in the import.
        vertex_count: usize,
    },

    /// A submesh index list is not a whole number of triangles.
    #[error("submesh {submesh} has {len} indices, not a multiple of 3")]
    TruncatedTriangleList {
        /// The offending submesh.
        submesh: usize,
        /// Its index count.
        len: usize,
    },

    /// Vertex normals were given, but not one per position.
    #[error("expected {expected} vertex normals, got {actual}")]
    NormalCountMismatch {
        /// Number of positions.
        expected: usize,
        /// Number of normals supplied.
        actual: usize,
    },

    /// UVs were given, but not one per position.
    #[error("expected {expected} uvs, got {actual}")]
    UvCountMismatch {
        /// Number of positions.
        expected: usize,
        /// Number of UVs supplied.
        actual: usize,
    },

    /// The welded tables failed the integrity check.
    #[error("welded mesh is inconsistent: {0}")]
    Topology(#[from] TopologyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WeldError::InvalidIndex {
            index: 9,
            vertex_count: 3,
        };
        assert_eq!(
            format!("{err}"),
            "invalid vertex index 9 (mesh has 3 vertices)"
        );

        let err = WeldError::TruncatedTriangleList { submesh: 1, len: 7 };
        let display = format!("{err}");
        assert!(display.contains("submesh 1"));
        assert!(display.contains('7'));

        let err = WeldError::UvCountMismatch {
            expected: 4,
            actual: 2,
        };
        assert!(format!("{err}").contains("4 uvs"));
    }

    #[test]
    fn topology_errors_convert() {
        let err: WeldError = TopologyError::EdgeNotLinked { face: 0, edge: 2 }.into();
        assert!(matches!(err, WeldError::Topology(_)));
        assert!(format!("{err}").contains("edge 2"));
    }
}
