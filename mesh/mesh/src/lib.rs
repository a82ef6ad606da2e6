//! Mesh topology and attribute engine.
//!
//! This umbrella crate re-exports the mesh-* crates behind one API for
//! building and editing attributed triangle meshes: import a triangle soup,
//! weld it into connected topology, read and write typed attributes in any
//! domain, merge meshes and refine them by midpoint subdivision.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! // A quad authored as two independent triangles
//! let import = MeshImport::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ])
//! .with_submesh(vec![0, 1, 2, 3, 4, 5]);
//!
//! // Weld the shared diagonal
//! let mesh = import_mesh(&import, &WeldParams::default())?;
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.edge_count(), 5);
//!
//! // Refine
//! let fine = subdivide(&mesh, 1)?;
//! assert_eq!(fine.face_count(), 8);
//!
//! // Read face normals at the corners
//! let normals = fine.attribute_values::<Vector3<f64>>("normal", AttributeDomain::FaceCorner)?;
//! assert_eq!(normals.len(), 24);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`attributes`] - Domains, value kinds, typed containers, type and
//!   domain conversion
//! - [`types`] - Element tables, adjacency, integrity checks, `GeometryMesh`
//!   and merge
//! - [`weld`] - Triangle soup import and duplicate welding
//! - [`subdivide`] - Midpoint 1-to-4 subdivision
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for every element, attribute and
//!   mesh type

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Attribute domains, kinds, containers and conversion.
pub use mesh_attributes as attributes;

/// Element tables, `GeometryMesh` and merge.
pub use mesh_types as types;

/// Triangle soup import and welding.
pub use mesh_weld as weld;

/// Midpoint subdivision.
pub use mesh_subdivide as subdivide;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh processing.
///
/// This module re-exports the most commonly used types and functions.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Attribute, AttributeDomain, AttributeType, Clamped01, Edge, Face, FaceCorner,
        GeometryMesh, Point3, Topology, Vector2, Vector3, Vertex, builtin,
    };

    // Import and weld
    pub use mesh_weld::{MeshImport, WeldParams, import_mesh, weld_mesh};

    // Subdivision
    pub use mesh_subdivide::{SubdivideParams, subdivide, subdivide_mesh};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let mesh = GeometryMesh::empty();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.has_attribute(builtin::POSITION));
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::Topology::new();
        let _ = attributes::AttributeStore::new();
        let _ = weld::WeldParams::default();
        let _ = subdivide::SubdivideParams::default();
    }
}
