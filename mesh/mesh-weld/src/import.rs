//! The raw triangle-soup input.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{WeldError, WeldResult};

/// A triangle soup as handed over by an authoring tool.
///
/// Each submesh is a flat list of position indices, three per triangle.
/// Normals and UVs, when present, are per position; normals only feed the
/// smooth-shading flag.
///
/// # Example
///
/// ```
/// use mesh_weld::MeshImport;
/// use nalgebra::Point3;
///
/// let import = MeshImport::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ])
/// .with_submesh(vec![0, 1, 2]);
///
/// assert_eq!(import.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshImport {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Triangle index lists, one per submesh (material slot).
    pub submeshes: Vec<Vec<u32>>,
    /// Authored vertex normals.
    pub normals: Option<Vec<Vector3<f64>>>,
    /// Authored vertex UVs.
    pub uvs: Option<Vec<Vector2<f64>>>,
}

impl MeshImport {
    /// An import with positions only and no submeshes yet.
    #[must_use]
    pub const fn new(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            submeshes: Vec::new(),
            normals: None,
            uvs: None,
        }
    }

    /// Append a submesh.
    #[must_use]
    pub fn with_submesh(mut self, indices: Vec<u32>) -> Self {
        self.submeshes.push(indices);
        self
    }

    /// Attach authored vertex normals.
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<Vector3<f64>>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attach vertex UVs.
    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<Vector2<f64>>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Number of whole triangles over all submeshes.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|indices| indices.len() / 3).sum()
    }

    /// Check indices and per-position buffer lengths.
    ///
    /// # Errors
    ///
    /// Returns [`WeldError::TruncatedTriangleList`] for a submesh whose
    /// length is not a multiple of 3, [`WeldError::InvalidIndex`] for an
    /// index past the position buffer, and a count mismatch error when
    /// normals or UVs are not one per position.
    pub fn validate(&self) -> WeldResult<()> {
        let vertex_count = self.positions.len();

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(WeldError::NormalCountMismatch {
                    expected: vertex_count,
                    actual: normals.len(),
                });
            }
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != vertex_count {
                return Err(WeldError::UvCountMismatch {
                    expected: vertex_count,
                    actual: uvs.len(),
                });
            }
        }

        for (submesh, indices) in self.submeshes.iter().enumerate() {
            if indices.len() % 3 != 0 {
                return Err(WeldError::TruncatedTriangleList {
                    submesh,
                    len: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(WeldError::InvalidIndex {
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}
