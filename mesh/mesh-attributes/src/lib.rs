//! Typed, domain-aligned mesh attributes.
//!
//! An attribute is a named vector of values aligned to one element domain of
//! a triangle mesh: vertices, edges, faces or face corners. This crate
//! provides:
//!
//! - [`AttributeType`] / [`AttributeValue`] / [`AttributeData`]: the closed
//!   set of value kinds and their containers
//! - The coercion table between every ordered pair of kinds
//!   ([`AttributeValue::convert`])
//! - Per-kind averaging ([`Blend`]) and conversion between domains over any
//!   [`ElementTopology`]
//! - [`AttributeStore`]: per-domain maps with store/request/remove
//!
//! # Example
//!
//! ```
//! use mesh_attributes::{Attribute, AttributeDomain, AttributeStore, AttributeType};
//!
//! let mut store = AttributeStore::new();
//! store.insert(Attribute::from_values("id", AttributeDomain::Face, vec![3_i32]));
//!
//! let as_float = store.request_of_type("id", AttributeType::Float)?;
//! assert_eq!(as_float.values::<f64>(), Some(&[3.0][..]));
//! # Ok::<(), mesh_attributes::AttributeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions)]

mod attribute;
mod convert;
mod data;
mod domain;
mod domain_convert;
mod error;
mod store;
mod topology;
mod value;

pub use attribute::Attribute;
pub use data::AttributeData;
pub use domain::AttributeDomain;
pub use domain_convert::{convert_domain, source_groups};
pub use error::{AttributeError, AttributeResult};
pub use store::AttributeStore;
pub use topology::ElementTopology;
pub use value::{AttributeElement, AttributeType, AttributeValue, Blend, Clamped01};

/// Names of the attributes every imported mesh carries.
pub mod builtin {
    /// Vertex positions (`Vector3`, Vertex).
    pub const POSITION: &str = "position";
    /// Face normals (`Vector3`, Face).
    pub const NORMAL: &str = "normal";
    /// Submesh index per face (`Int`, Face).
    pub const MATERIAL_INDEX: &str = "material_index";
    /// Smooth-shading flag per face (`Bool`, Face).
    pub const SHADE_SMOOTH: &str = "shade_smooth";
    /// Texture coordinates (`Vector2`, `FaceCorner`).
    pub const UV: &str = "uv";
    /// Edge crease weight (`ClampedFloat`, Edge).
    pub const CREASE: &str = "crease";
}
