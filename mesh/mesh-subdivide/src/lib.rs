//! Midpoint subdivision of attributed triangle meshes.
//!
//! Each level splits every triangle into four through its edge midpoints:
//!
//! - `V + E` vertices: the originals, then one midpoint per edge
//! - `2E + 3F` edges: two halves per original edge, then three spokes per face
//! - `4F` faces and `12F` face corners
//!
//! Positions do not move; midpoints sit halfway along their edge. Every
//! attribute of the input is carried over in its own domain and kind, and
//! adjacency of the result is rebuilt.
//!
//! A face's edges are matched to its sides by their endpoints, so the order
//! in which a face lists them does not matter.
//!
//! # Example
//!
//! ```
//! use mesh_subdivide::{SubdivideParams, subdivide_mesh};
//! use mesh_weld::{MeshImport, WeldParams, import_mesh};
//! use nalgebra::Point3;
//!
//! // Two triangles sharing an edge
//! let import = MeshImport::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ])
//! .with_submesh(vec![0, 1, 2, 3, 4, 5]);
//! let mesh = import_mesh(&import, &WeldParams::default())?;
//!
//! let result = subdivide_mesh(&mesh, &SubdivideParams::new().with_levels(2))?;
//!
//! // 2 * 4^2 = 32 faces after 2 levels
//! assert_eq!(result.final_faces, 32);
//! assert!(result.mesh.validate().is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod params;
mod result;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::SubdivideParams;
pub use result::SubdivisionResult;
pub use subdivide::{subdivide, subdivide_mesh};
