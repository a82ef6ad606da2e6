//! Per-domain attribute maps.

use std::borrow::Cow;

use hashbrown::HashMap;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Attribute, AttributeDomain, AttributeElement, AttributeError, AttributeResult, AttributeType,
    ElementTopology,
};

/// Named attributes, keyed by name within each element domain.
///
/// The same name may exist in several domains at once. Lookups that do not
/// name a domain search Vertex, Edge, Face, then `FaceCorner`, and take the
/// first hit.
///
/// # Example
///
/// ```
/// use mesh_attributes::{Attribute, AttributeDomain, AttributeStore};
///
/// let mut store = AttributeStore::new();
/// store.insert(Attribute::from_values("weight", AttributeDomain::Face, vec![1.0_f64]));
///
/// assert!(store.has("weight"));
/// assert!(store.has_in("weight", AttributeDomain::Face));
/// assert!(!store.has_in("weight", AttributeDomain::Vertex));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeStore {
    vertex: HashMap<String, Attribute>,
    edge: HashMap<String, Attribute>,
    face: HashMap<String, Attribute>,
    face_corner: HashMap<String, Attribute>,
}

impl AttributeStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn map(&self, domain: AttributeDomain) -> &HashMap<String, Attribute> {
        match domain {
            AttributeDomain::Vertex => &self.vertex,
            AttributeDomain::Edge => &self.edge,
            AttributeDomain::Face => &self.face,
            AttributeDomain::FaceCorner => &self.face_corner,
        }
    }

    const fn map_mut(&mut self, domain: AttributeDomain) -> &mut HashMap<String, Attribute> {
        match domain {
            AttributeDomain::Vertex => &mut self.vertex,
            AttributeDomain::Edge => &mut self.edge,
            AttributeDomain::Face => &mut self.face,
            AttributeDomain::FaceCorner => &mut self.face_corner,
        }
    }

    /// Total number of stored attributes across all domains.
    #[must_use]
    pub fn len(&self) -> usize {
        AttributeDomain::ALL
            .iter()
            .map(|&d| self.map(d).len())
            .sum()
    }

    /// Whether no attribute is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `name` exists in any domain.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether `name` exists in any domain with kind `ty`.
    #[must_use]
    pub fn has_of_type(&self, name: &str, ty: AttributeType) -> bool {
        self.get_of_type(name, ty).is_some()
    }

    /// Whether `name` exists in `domain`.
    #[must_use]
    pub fn has_in(&self, name: &str, domain: AttributeDomain) -> bool {
        self.map(domain).contains_key(name)
    }

    /// Whether `name` exists in `domain` with kind `ty`.
    #[must_use]
    pub fn has_exact(&self, name: &str, ty: AttributeType, domain: AttributeDomain) -> bool {
        self.get_in(name, domain)
            .is_some_and(|a| a.attribute_type() == ty)
    }

    /// The first attribute called `name`, in domain lookup order.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        AttributeDomain::ALL
            .iter()
            .find_map(|&d| self.map(d).get(name))
    }

    /// The first attribute called `name` whose kind is `ty`.
    #[must_use]
    pub fn get_of_type(&self, name: &str, ty: AttributeType) -> Option<&Attribute> {
        AttributeDomain::ALL
            .iter()
            .filter_map(|&d| self.map(d).get(name))
            .find(|a| a.attribute_type() == ty)
    }

    /// The attribute called `name` in `domain`.
    #[must_use]
    pub fn get_in(&self, name: &str, domain: AttributeDomain) -> Option<&Attribute> {
        self.map(domain).get(name)
    }

    /// Mutable access to the attribute called `name` in `domain`.
    ///
    /// Changing the length through this handle breaks the store's alignment
    /// with the mesh; callers keep lengths intact.
    pub fn get_mut_in(&mut self, name: &str, domain: AttributeDomain) -> Option<&mut Attribute> {
        self.map_mut(domain).get_mut(name)
    }

    /// Insert without checking the length against any topology.
    ///
    /// Replaces an attribute of the same name in the same domain and returns
    /// whether one was replaced.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        self.map_mut(attribute.domain())
            .insert(attribute.name().to_string(), attribute)
            .is_some()
    }

    /// Store an attribute in its own domain.
    ///
    /// Returns whether an attribute of the same name in that domain was
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::LengthMismatch`] if the attribute does not
    /// carry one value per element of its domain.
    pub fn store<T>(&mut self, attribute: Attribute, topology: &T) -> AttributeResult<bool>
    where
        T: ElementTopology + ?Sized,
    {
        let expected = topology.element_count(attribute.domain());
        if attribute.len() != expected {
            return Err(AttributeError::LengthMismatch {
                name: attribute.name().to_string(),
                domain: attribute.domain(),
                expected,
                actual: attribute.len(),
            });
        }
        Ok(self.insert(attribute))
    }

    /// Store an attribute in `domain`, converting it there first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::LengthMismatch`] if the attribute does not
    /// carry one value per element of its own domain.
    pub fn store_in<T>(
        &mut self,
        attribute: Attribute,
        domain: AttributeDomain,
        topology: &T,
    ) -> AttributeResult<bool>
    where
        T: ElementTopology + ?Sized,
    {
        if attribute.domain() == domain {
            return self.store(attribute, topology);
        }
        debug!(
            name = attribute.name(),
            from = %attribute.domain(),
            to = %domain,
            "converting attribute domain on store"
        );
        let converted = attribute.to_domain(domain, topology)?;
        self.store(converted, topology)
    }

    /// The first attribute called `name`, in domain lookup order.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::NotFound`] if no domain holds `name`.
    pub fn request(&self, name: &str) -> AttributeResult<&Attribute> {
        self.get(name).ok_or_else(|| not_found(name))
    }

    /// The attribute called `name` with kind `ty`.
    ///
    /// An attribute that already has kind `ty` is borrowed. Otherwise the
    /// first attribute called `name` is converted to `ty`, staying in its
    /// own domain.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::NotFound`] if no domain holds `name`.
    pub fn request_of_type(
        &self,
        name: &str,
        ty: AttributeType,
    ) -> AttributeResult<Cow<'_, Attribute>> {
        if let Some(exact) = self.get_of_type(name, ty) {
            return Ok(Cow::Borrowed(exact));
        }
        let attribute = self.request(name)?;
        Ok(Cow::Owned(attribute.converted_to(ty)))
    }

    /// The attribute called `name`, aligned to `domain`.
    ///
    /// An attribute already in `domain` is borrowed. Otherwise the first
    /// attribute called `name` is converted to `domain`, keeping its kind.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::NotFound`] if no domain holds `name`, or
    /// [`AttributeError::LengthMismatch`] if the source is misaligned.
    pub fn request_in<T>(
        &self,
        name: &str,
        domain: AttributeDomain,
        topology: &T,
    ) -> AttributeResult<Cow<'_, Attribute>>
    where
        T: ElementTopology + ?Sized,
    {
        if let Some(attribute) = self.get_in(name, domain) {
            return Ok(Cow::Borrowed(attribute));
        }
        let source = self.request(name)?;
        Ok(Cow::Owned(source.to_domain(domain, topology)?))
    }

    /// The attribute called `name` with kind `ty`, aligned to `domain`.
    ///
    /// Converts type, domain or both as needed. An attribute stored in
    /// `domain` is preferred over one stored elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::NotFound`] if no domain holds `name`, or
    /// [`AttributeError::LengthMismatch`] if the source is misaligned.
    pub fn request_exact<T>(
        &self,
        name: &str,
        ty: AttributeType,
        domain: AttributeDomain,
        topology: &T,
    ) -> AttributeResult<Cow<'_, Attribute>>
    where
        T: ElementTopology + ?Sized,
    {
        let aligned = self.request_in(name, domain, topology)?;
        if aligned.attribute_type() == ty {
            return Ok(aligned);
        }
        Ok(Cow::Owned(aligned.converted_to(ty)))
    }

    /// The values of `name` as `E`, aligned to `domain`.
    ///
    /// # Errors
    ///
    /// As [`request_exact`](Self::request_exact).
    pub fn values<E, T>(&self, name: &str, domain: AttributeDomain, topology: &T) -> AttributeResult<Vec<E>>
    where
        E: AttributeElement,
        T: ElementTopology + ?Sized,
    {
        let attribute = self.request_exact(name, E::TYPE, domain, topology)?;
        attribute.try_values::<E>().map(<[E]>::to_vec)
    }

    /// The values of `name` as `E` aligned to `domain`, or `default`
    /// repeated over the domain if `domain` holds no attribute called
    /// `name`. An attribute of that name in another domain is not
    /// converted.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::LengthMismatch`] if a stored source is
    /// misaligned. A missing attribute is not an error.
    pub fn values_or_default<E, T>(
        &self,
        name: &str,
        domain: AttributeDomain,
        default: E,
        topology: &T,
    ) -> AttributeResult<Vec<E>>
    where
        E: AttributeElement,
        T: ElementTopology + ?Sized,
    {
        if !self.has_in(name, domain) {
            return Ok(vec![default; topology.element_count(domain)]);
        }
        self.values(name, domain, topology)
    }

    /// Remove the first attribute called `name`, in domain lookup order.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        AttributeDomain::ALL
            .iter()
            .any(|&d| self.map_mut(d).remove(name).is_some())
    }

    /// Remove the attribute called `name` from `domain`.
    ///
    /// Returns whether anything was removed.
    pub fn remove_in(&mut self, name: &str, domain: AttributeDomain) -> bool {
        self.map_mut(domain).remove(name).is_some()
    }

    /// Every attribute stored in `domain`, in arbitrary order.
    pub fn iter_domain(&self, domain: AttributeDomain) -> impl Iterator<Item = &Attribute> {
        self.map(domain).values()
    }

    /// Mutable access to every attribute stored in `domain`.
    pub fn iter_domain_mut(&mut self, domain: AttributeDomain) -> impl Iterator<Item = &mut Attribute> {
        self.map_mut(domain).values_mut()
    }

    /// Every stored attribute, domain by domain.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        AttributeDomain::ALL
            .into_iter()
            .flat_map(move |d| self.iter_domain(d))
    }

    /// Check that every attribute has one value per element of its domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`AttributeError::LengthMismatch`] found.
    pub fn validate<T>(&self, topology: &T) -> AttributeResult<()>
    where
        T: ElementTopology + ?Sized,
    {
        for attribute in self.iter() {
            let expected = topology.element_count(attribute.domain());
            if attribute.len() != expected {
                return Err(AttributeError::LengthMismatch {
                    name: attribute.name().to_string(),
                    domain: attribute.domain(),
                    expected,
                    actual: attribute.len(),
                });
            }
        }
        Ok(())
    }
}

fn not_found(name: &str) -> AttributeError {
    AttributeError::NotFound {
        name: name.to_string(),
    }
}
