//! Result types for subdivision operations.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::GeometryMesh;

/// Result of mesh subdivision.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: GeometryMesh,

    /// Number of faces in original mesh.
    pub original_faces: usize,

    /// Number of faces in subdivided mesh.
    pub final_faces: usize,

    /// Number of edges in original mesh.
    pub original_edges: usize,

    /// Number of edges in subdivided mesh.
    pub final_edges: usize,

    /// Number of vertices in original mesh.
    pub original_vertices: usize,

    /// Number of vertices in subdivided mesh.
    pub final_vertices: usize,

    /// Number of levels performed.
    pub levels: u32,
}

impl SubdivisionResult {
    /// Get the face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.levels > 0 && self.final_faces > self.original_faces
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision: {} → {} faces ({:.1}x), {} → {} edges, {} levels",
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_edges,
            self.final_edges,
            self.levels
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(original_faces: usize, final_faces: usize, levels: u32) -> SubdivisionResult {
        SubdivisionResult {
            mesh: GeometryMesh::empty(),
            original_faces,
            final_faces,
            original_edges: 150,
            final_edges: 600,
            original_vertices: 50,
            final_vertices: 200,
            levels,
        }
    }

    #[test]
    fn test_face_ratio() {
        let result = result(100, 400, 1);
        assert!((result.face_ratio() - 4.0).abs() < 0.001);
        assert!((result.vertex_ratio() - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_was_subdivided() {
        assert!(!result(100, 100, 0).was_subdivided());
        assert!(result(100, 400, 1).was_subdivided());
        assert!(!result(0, 0, 3).was_subdivided());
    }

    #[test]
    fn test_display() {
        let display = format!("{}", result(100, 400, 1));
        assert!(display.contains("100"));
        assert!(display.contains("400"));
        assert!(display.contains("4.0x"));
        assert!(display.contains("1 levels"));
    }
}
