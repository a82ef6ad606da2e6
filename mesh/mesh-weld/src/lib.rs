//! Triangle soup import and duplicate welding.
//!
//! Authoring tools hand over triangle soups in which every triangle owns
//! its vertices. This crate turns such a soup into a connected
//! [`GeometryMesh`](mesh_types::GeometryMesh):
//!
//! - One face, three edges and three face corners per triangle, with
//!   material index, face normal and smooth-shading flag per face
//! - Coincident edges (bitwise equal endpoint positions, either direction)
//!   are welded when the normals of their faces are within an angle
//!   threshold; their vertices merge transitively to the lowest index
//! - Survivors are renumbered densely, adjacency is derived and the result
//!   is integrity-checked
//!
//! [`weld_mesh`] applies the same pass to a mesh that is already
//! connected. Edges that border two faces are left alone and every
//! attribute is carried through.
//!
//! # Example
//!
//! ```
//! use mesh_weld::{MeshImport, WeldParams, import_mesh};
//! use nalgebra::Point3;
//!
//! let import = MeshImport::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ])
//! .with_submesh(vec![0, 1, 2]);
//!
//! let mesh = import_mesh(&import, &WeldParams::default())?;
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.topology().edges().iter().all(|e| e.is_boundary()));
//! # Ok::<(), mesh_weld::WeldError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod build;
mod duplicates;
mod error;
mod import;
mod params;
mod union_find;
mod weld;

pub use error::{WeldError, WeldResult};
pub use import::MeshImport;
pub use params::WeldParams;
pub use weld::{WeldSummary, import_mesh, import_mesh_with_summary, weld_mesh};
