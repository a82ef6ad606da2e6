//! Subdivision parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for mesh subdivision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubdivideParams {
    /// Number of times every triangle is split into four.
    pub levels: u32,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            levels: 1,
            max_faces: 10_000_000, // 10M faces max
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of levels.
    #[must_use]
    pub const fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Calculate expected face count after subdivision.
    ///
    /// Each level multiplies face count by 4. Saturates instead of
    /// overflowing.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.levels {
            faces = faces.saturating_mul(4);
            i += 1;
        }
        faces
    }

    /// Calculate expected edge count after subdivision.
    ///
    /// Each level turns `E` edges and `F` faces into `2E + 3F` edges.
    #[must_use]
    pub const fn expected_edges(&self, current_edges: usize, current_faces: usize) -> usize {
        let mut edges = current_edges;
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.levels {
            edges = edges.saturating_mul(2).saturating_add(faces.saturating_mul(3));
            faces = faces.saturating_mul(4);
            i += 1;
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.levels, 1);
        assert_eq!(params.max_faces, 10_000_000);
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new()
            .with_levels(2)
            .with_max_faces(1_000_000);

        assert_eq!(params.levels, 2);
        assert_eq!(params.max_faces, 1_000_000);
    }

    #[test]
    fn test_expected_faces() {
        let params = SubdivideParams::new().with_levels(1);
        assert_eq!(params.expected_faces(100), 400);

        let params = SubdivideParams::new().with_levels(2);
        assert_eq!(params.expected_faces(100), 1600);

        let params = SubdivideParams::new().with_levels(3);
        assert_eq!(params.expected_faces(12), 768); // 12 * 4^3

        let params = SubdivideParams::new().with_levels(0);
        assert_eq!(params.expected_faces(12), 12);

        let params = SubdivideParams::new().with_levels(64);
        assert_eq!(params.expected_faces(1), usize::MAX);
    }

    #[test]
    fn test_expected_edges() {
        // Single triangle: 3 edges -> 9 -> 30
        let params = SubdivideParams::new().with_levels(1);
        assert_eq!(params.expected_edges(3, 1), 9);
        let params = SubdivideParams::new().with_levels(2);
        assert_eq!(params.expected_edges(3, 1), 30);
    }
}
