//! Triangle mesh with topology and attributes.

use std::borrow::Cow;

use mesh_attributes::{
    Attribute, AttributeData, AttributeDomain, AttributeElement, AttributeResult, AttributeStore,
    AttributeType, AttributeValue, ElementTopology, builtin,
};
use nalgebra::Vector3;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Topology, TopologyResult, Triangle};

/// Built-in attributes: name, domain and kind.
pub const BUILTIN_ATTRIBUTES: [(&str, AttributeDomain, AttributeType); 6] = [
    (builtin::POSITION, AttributeDomain::Vertex, AttributeType::Vector3),
    (builtin::NORMAL, AttributeDomain::Face, AttributeType::Vector3),
    (builtin::MATERIAL_INDEX, AttributeDomain::Face, AttributeType::Int),
    (builtin::SHADE_SMOOTH, AttributeDomain::Face, AttributeType::Bool),
    (builtin::UV, AttributeDomain::FaceCorner, AttributeType::Vector2),
    (builtin::CREASE, AttributeDomain::Edge, AttributeType::ClampedFloat),
];

/// A triangle mesh: element tables, attributes and a submesh count.
///
/// Every attribute carries exactly one value per element of its domain,
/// and the built-in attributes ([`BUILTIN_ATTRIBUTES`]) are always
/// present. Structural operations ([`merged`](Self::merged), subdivision,
/// welding) produce new meshes; in-place mutation is limited to storing and
/// removing attributes, plus [`merge`](Self::merge).
///
/// # Example
///
/// ```
/// use mesh_types::{GeometryMesh, AttributeDomain};
///
/// let mesh = GeometryMesh::empty();
/// assert!(mesh.is_empty());
/// assert_eq!(mesh.element_count(AttributeDomain::Vertex), 0);
/// assert!(mesh.has_attribute("position"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometryMesh {
    topology: Topology,
    attributes: AttributeStore,
    submesh_count: u32,
}

impl Default for GeometryMesh {
    fn default() -> Self {
        Self::empty()
    }
}

impl GeometryMesh {
    /// The empty mesh: no elements, every built-in attribute at length 0.
    #[must_use]
    pub fn empty() -> Self {
        let mut mesh = Self {
            topology: Topology::new(),
            attributes: AttributeStore::new(),
            submesh_count: 0,
        };
        mesh.insert_missing_builtins();
        mesh
    }

    /// Assemble a mesh from element tables and attributes.
    ///
    /// Derives adjacency, adds any missing built-in attribute filled with
    /// default values, then checks integrity.
    ///
    /// # Errors
    ///
    /// Returns a [`TopologyError`](crate::TopologyError) if an index is out
    /// of range, a face's edge does not border it, or an attribute's length
    /// does not match its domain.
    pub fn from_parts(
        mut topology: Topology,
        attributes: AttributeStore,
        submesh_count: u32,
    ) -> TopologyResult<Self> {
        topology.fill_adjacency();
        let mut mesh = Self {
            topology,
            attributes,
            submesh_count,
        };
        mesh.insert_missing_builtins();
        mesh.validate()?;
        Ok(mesh)
    }

    fn insert_missing_builtins(&mut self) {
        for (name, domain, ty) in BUILTIN_ATTRIBUTES {
            if !self.attributes.has_in(name, domain) {
                let len = self.topology.element_count(domain);
                self.attributes
                    .insert(Attribute::filled(name, domain, ty, len));
            }
        }
    }

    /// Check the element tables and every attribute length.
    ///
    /// # Errors
    ///
    /// See [`Topology::validate`] and [`AttributeStore::validate`].
    pub fn validate(&self) -> TopologyResult<()> {
        self.topology.validate()?;
        self.attributes.validate(&self.topology)?;
        Ok(())
    }

    /// The element tables.
    #[inline]
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The attribute store.
    #[inline]
    #[must_use]
    pub const fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    /// Number of submeshes (material slots).
    #[inline]
    #[must_use]
    pub const fn submesh_count(&self) -> u32 {
        self.submesh_count
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.topology.vertex_count()
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.topology.face_count()
    }

    /// Number of face corners.
    #[inline]
    #[must_use]
    pub fn face_corner_count(&self) -> usize {
        self.topology.face_corner_count()
    }

    /// Number of elements in a domain.
    #[inline]
    #[must_use]
    pub fn element_count(&self, domain: AttributeDomain) -> usize {
        self.topology.element_count(domain)
    }

    /// Whether this is the empty sentinel (no faces).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topology.is_empty()
    }

    /// Vertex positions.
    ///
    /// Empty if the position attribute was replaced by one of another kind.
    #[must_use]
    pub fn positions(&self) -> &[Vector3<f64>] {
        self.attributes
            .get_in(builtin::POSITION, AttributeDomain::Vertex)
            .and_then(Attribute::values::<Vector3<f64>>)
            .unwrap_or_default()
    }

    /// The triangle of face `face`, if the face and its vertices exist.
    #[must_use]
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        let positions = self.positions();
        let [a, b, c] = self.topology.faces().get(face)?.vertices();
        Some(Triangle::from_vectors(
            *positions.get(a as usize)?,
            *positions.get(b as usize)?,
            *positions.get(c as usize)?,
        ))
    }

    // -------------------------------------------------------------------------
    // Attribute access
    // -------------------------------------------------------------------------

    /// Whether an attribute called `name` exists in any domain.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    /// Whether `name` exists with kind `ty` in any domain.
    #[must_use]
    pub fn has_attribute_of_type(&self, name: &str, ty: AttributeType) -> bool {
        self.attributes.has_of_type(name, ty)
    }

    /// Whether `name` exists in `domain`.
    #[must_use]
    pub fn has_attribute_in(&self, name: &str, domain: AttributeDomain) -> bool {
        self.attributes.has_in(name, domain)
    }

    /// Whether `name` exists in `domain` with kind `ty`.
    #[must_use]
    pub fn has_attribute_exact(&self, name: &str, ty: AttributeType, domain: AttributeDomain) -> bool {
        self.attributes.has_exact(name, ty, domain)
    }

    /// The first attribute called `name`, in domain lookup order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no domain holds `name`.
    pub fn attribute(&self, name: &str) -> AttributeResult<&Attribute> {
        self.attributes.request(name)
    }

    /// The attribute called `name`, converted to kind `ty` if needed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no domain holds `name`.
    pub fn attribute_of_type(&self, name: &str, ty: AttributeType) -> AttributeResult<Cow<'_, Attribute>> {
        self.attributes.request_of_type(name, ty)
    }

    /// The attribute called `name`, converted to `domain` if needed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no domain holds `name`.
    pub fn attribute_in(&self, name: &str, domain: AttributeDomain) -> AttributeResult<Cow<'_, Attribute>> {
        self.attributes.request_in(name, domain, &self.topology)
    }

    /// The attribute called `name` with kind `ty` in `domain`, converting
    /// either as needed. The stored attribute is never modified.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no domain holds `name`.
    pub fn attribute_exact(
        &self,
        name: &str,
        ty: AttributeType,
        domain: AttributeDomain,
    ) -> AttributeResult<Cow<'_, Attribute>> {
        self.attributes.request_exact(name, ty, domain, &self.topology)
    }

    /// Typed values of `name` in `domain`, converting as needed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no domain holds `name`.
    pub fn attribute_values<T: AttributeElement>(
        &self,
        name: &str,
        domain: AttributeDomain,
    ) -> AttributeResult<Vec<T>> {
        self.attributes.values(name, domain, &self.topology)
    }

    /// Typed values of `name` in `domain`, or `default` repeated over the
    /// domain when `domain` holds no attribute called `name`.
    ///
    /// # Errors
    ///
    /// Only fails if a stored attribute is misaligned.
    pub fn attribute_or_default<T: AttributeElement>(
        &self,
        name: &str,
        domain: AttributeDomain,
        default: T,
    ) -> AttributeResult<Vec<T>> {
        self.attributes
            .values_or_default(name, domain, default, &self.topology)
    }

    /// Every attribute stored in `domain`.
    pub fn attributes_in(&self, domain: AttributeDomain) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter_domain(domain)
    }

    /// Store an attribute in its own domain, replacing any of the same name
    /// there. Returns whether one was replaced.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the attribute is not one value per
    /// element of its domain.
    pub fn store_attribute(&mut self, attribute: Attribute) -> AttributeResult<bool> {
        self.attributes.store(attribute, &self.topology)
    }

    /// Store an attribute in `domain`, converting it first if needed.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the attribute is misaligned with its own
    /// domain.
    pub fn store_attribute_in(
        &mut self,
        attribute: Attribute,
        domain: AttributeDomain,
    ) -> AttributeResult<bool> {
        self.attributes.store_in(attribute, domain, &self.topology)
    }

    /// Remove the first attribute called `name`, in domain lookup order.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        self.attributes.remove(name)
    }

    /// Remove the attribute called `name` from `domain`.
    pub fn remove_attribute_in(&mut self, name: &str, domain: AttributeDomain) -> bool {
        self.attributes.remove_in(name, domain)
    }

    // -------------------------------------------------------------------------
    // Merge
    // -------------------------------------------------------------------------

    /// Append `other` to this mesh.
    ///
    /// Element tables are concatenated with `other`'s indices offset by this
    /// mesh's counts. Attributes are matched by (name, domain): values of
    /// `other` follow this mesh's values; an attribute present on one side
    /// only is padded with the kind's default over the other side's range.
    /// `other`'s material indices are offset by this mesh's submesh count,
    /// and the submesh counts add up.
    ///
    /// # Errors
    ///
    /// Returns a [`TopologyError`](crate::TopologyError) if the result fails
    /// integrity validation.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::GeometryMesh;
    ///
    /// let mut a = GeometryMesh::empty();
    /// a.merge(&GeometryMesh::empty())?;
    /// assert!(a.is_empty());
    /// # Ok::<(), mesh_types::TopologyError>(())
    /// ```
    pub fn merge(&mut self, other: &Self) -> TopologyResult<()> {
        let before: Vec<usize> = AttributeDomain::ALL
            .iter()
            .map(|&d| self.element_count(d))
            .collect();
        let material_offset = i32::try_from(self.submesh_count).unwrap_or(i32::MAX);

        self.topology.append(&other.topology);
        self.topology.fill_adjacency();

        for (domain, lhs_len) in AttributeDomain::ALL.into_iter().zip(before) {
            let total = self.topology.element_count(domain);

            for lhs in self.attributes.iter_domain_mut(domain) {
                match other.attributes.get_in(lhs.name(), domain) {
                    Some(rhs) => {
                        let rhs_data = offset_material(rhs, material_offset);
                        lhs.data_mut().extend_from(&rhs_data);
                    }
                    None => lhs.data_mut().resize(total),
                }
            }

            for rhs in other.attributes.iter_domain(domain) {
                if self.attributes.has_in(rhs.name(), domain) {
                    continue;
                }
                let mut data = AttributeData::filled(rhs.attribute_type(), lhs_len);
                data.extend_from(&offset_material(rhs, material_offset));
                self.attributes
                    .insert(Attribute::new(rhs.name(), domain, data));
            }
        }

        self.submesh_count = self.submesh_count.saturating_add(other.submesh_count);

        debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            faces = self.face_count(),
            submeshes = self.submesh_count,
            "merged meshes"
        );
        self.validate()
    }

    /// A new mesh holding `self` followed by `other`.
    ///
    /// # Errors
    ///
    /// As [`merge`](Self::merge).
    pub fn merged(&self, other: &Self) -> TopologyResult<Self> {
        let mut out = self.clone();
        out.merge(other)?;
        Ok(out)
    }
}

/// `attribute`'s values, with material indices shifted by `offset`.
fn offset_material(attribute: &Attribute, offset: i32) -> AttributeData {
    if attribute.name() != builtin::MATERIAL_INDEX
        || attribute.domain() != AttributeDomain::Face
        || offset == 0
    {
        return attribute.data().clone();
    }
    let mut data = attribute.data().clone();
    data.map_values(|value| match value.convert(AttributeType::Int) {
        AttributeValue::Int(i) => AttributeValue::Int(i.saturating_add(offset)),
        other => other,
    });
    data
}
