//! Core mesh types.
//!
//! This crate provides the element tables and the mesh container that the
//! welding and subdivision crates build on:
//!
//! - [`Vertex`], [`Edge`], [`Face`], [`FaceCorner`] - element records
//!   cross-referencing each other by `u32` index
//! - [`Topology`] - the four tables, adjacency derivation and integrity checks
//! - [`GeometryMesh`] - topology plus an attribute store and submesh count,
//!   with the attribute access API and [`merge`](GeometryMesh::merge)
//! - [`Triangle`] - geometric helpers (face normals, area)
//!
//! # Indices
//!
//! Element indices are `u32` and coordinates are `f64`.
//!
//! # Winding
//!
//! Face winding is **counter-clockwise (CCW) when viewed from the front**.
//! A face's edges run `vert_a`-`vert_b`, `vert_b`-`vert_c`, `vert_c`-`vert_a`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{
//!     Attribute, AttributeDomain, AttributeStore, Edge, Face, FaceCorner, GeometryMesh,
//!     Topology, Vector3, Vertex,
//! };
//!
//! let topology = Topology::from_tables(
//!     vec![Vertex::default(); 3],
//!     vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0), Edge::new(2, 0, 0)],
//!     vec![Face::new([0, 1, 2], [0, 1, 2], [0, 1, 2])],
//!     vec![
//!         FaceCorner { face: 0, vert: 0 },
//!         FaceCorner { face: 0, vert: 1 },
//!         FaceCorner { face: 0, vert: 2 },
//!     ],
//! );
//! let mut attributes = AttributeStore::new();
//! attributes.insert(Attribute::from_values(
//!     "position",
//!     AttributeDomain::Vertex,
//!     vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)],
//! ));
//!
//! let mesh = GeometryMesh::from_parts(topology, attributes, 1)?;
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.topology().faces()[0].adjacent_faces.is_empty());
//! # Ok::<(), mesh_types::TopologyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions)]

mod elements;
mod error;
mod mesh;
mod topology;
mod triangle;

pub use elements::{Edge, Face, FaceCorner, Vertex};
pub use error::{TopologyError, TopologyResult};
pub use mesh::{BUILTIN_ATTRIBUTES, GeometryMesh};
pub use topology::Topology;
pub use triangle::{Triangle, angle_degrees};

// Re-export the attribute layer and nalgebra types for convenience
pub use mesh_attributes::{
    Attribute, AttributeData, AttributeDomain, AttributeElement, AttributeError,
    AttributeResult, AttributeStore, AttributeType, AttributeValue, Blend, Clamped01,
    ElementTopology, builtin,
};
pub use nalgebra::{Point3, Vector2, Vector3};
