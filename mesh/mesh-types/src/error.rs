//! Error types for topology integrity.

use mesh_attributes::AttributeError;
use thiserror::Error;

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised when element tables or attributes are inconsistent.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopologyError {
    /// An element references an index past the end of another table.
    #[error("{element} {index}: {field} = {target} is out of range (len {len})")]
    IndexOutOfRange {
        /// Kind of the referencing element ("edge", "face", ...).
        element: &'static str,
        /// Index of the referencing element.
        index: usize,
        /// The offending field.
        field: &'static str,
        /// The out-of-range value.
        target: u32,
        /// Length of the referenced table.
        len: usize,
    },

    /// A face lists an edge whose face slots do not mention the face.
    #[error("face {face} lists edge {edge}, but the edge does not border it")]
    EdgeNotLinked {
        /// The face.
        face: usize,
        /// The edge.
        edge: u32,
    },

    /// A face lists an edge that does not join two of its vertices.
    #[error("face {face} lists edge {edge}, which does not join two of its vertices")]
    EdgeOffFace {
        /// The face.
        face: usize,
        /// The edge.
        edge: u32,
    },

    /// An attribute is misaligned with the element tables.
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TopologyError::IndexOutOfRange {
            element: "face",
            index: 2,
            field: "vert_b",
            target: 9,
            len: 4,
        };
        let display = format!("{err}");
        assert!(display.contains("face 2"));
        assert!(display.contains("vert_b"));
        assert!(display.contains("len 4"));

        let err = TopologyError::EdgeNotLinked { face: 1, edge: 3 };
        assert!(format!("{err}").contains("edge 3"));

        let err = TopologyError::EdgeOffFace { face: 0, edge: 5 };
        assert!(format!("{err}").contains("does not join"));
    }

    #[test]
    fn attribute_errors_convert() {
        let err: TopologyError = AttributeError::NotFound {
            name: "uv".to_string(),
        }
        .into();
        assert!(matches!(err, TopologyError::Attribute(_)));
    }
}
