//! Named, domain-aligned attributes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domain_convert::convert_domain;
use crate::{
    AttributeData, AttributeDomain, AttributeElement, AttributeError, AttributeResult,
    AttributeType, AttributeValue, ElementTopology,
};

/// A named vector of values aligned to one element domain.
///
/// # Example
///
/// ```
/// use mesh_attributes::{Attribute, AttributeDomain, AttributeType};
///
/// let attr = Attribute::from_values("weight", AttributeDomain::Vertex, vec![0.5_f64, 1.0]);
/// assert_eq!(attr.len(), 2);
/// assert_eq!(attr.attribute_type(), AttributeType::Float);
///
/// let ints = attr.converted_to(AttributeType::Int);
/// assert_eq!(ints.values::<i32>(), Some(&[0, 1][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    name: String,
    domain: AttributeDomain,
    data: AttributeData,
}

impl Attribute {
    /// Create an attribute from an existing container.
    #[must_use]
    pub fn new(name: impl Into<String>, domain: AttributeDomain, data: AttributeData) -> Self {
        Self {
            name: name.into(),
            domain,
            data,
        }
    }

    /// Create an attribute from typed values.
    #[must_use]
    pub fn from_values<T: AttributeElement>(
        name: impl Into<String>,
        domain: AttributeDomain,
        values: Vec<T>,
    ) -> Self {
        Self::new(name, domain, T::into_data(values))
    }

    /// `len` default values of the given kind.
    #[must_use]
    pub fn filled(
        name: impl Into<String>,
        domain: AttributeDomain,
        ty: AttributeType,
        len: usize,
    ) -> Self {
        Self::new(name, domain, AttributeData::filled(ty, len))
    }

    /// The attribute name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain the values are aligned to.
    #[must_use]
    #[inline]
    pub const fn domain(&self) -> AttributeDomain {
        self.domain
    }

    /// The kind of the stored values.
    #[must_use]
    #[inline]
    pub const fn attribute_type(&self) -> AttributeType {
        self.data.attribute_type()
    }

    /// Number of values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no values.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The value container.
    #[must_use]
    #[inline]
    pub const fn data(&self) -> &AttributeData {
        &self.data
    }

    /// Mutable access to the value container.
    #[inline]
    pub fn data_mut(&mut self) -> &mut AttributeData {
        &mut self.data
    }

    /// Consume the attribute, returning its container.
    #[must_use]
    pub fn into_data(self) -> AttributeData {
        self.data
    }

    /// Borrow the values as `T`, if `T` backs the stored kind.
    #[must_use]
    pub fn values<T: AttributeElement>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    /// Borrow the values as `T`, failing with a type mismatch otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::TypeMismatch`] if the stored kind is not
    /// `T`'s kind.
    pub fn try_values<T: AttributeElement>(&self) -> AttributeResult<&[T]> {
        T::slice(&self.data).ok_or_else(|| self.type_mismatch(T::TYPE))
    }

    /// Mutable typed access to the values.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::TypeMismatch`] if the stored kind is not
    /// `T`'s kind.
    pub fn values_mut<T: AttributeElement>(&mut self) -> AttributeResult<&mut Vec<T>> {
        let mismatch = self.type_mismatch(T::TYPE);
        T::vec_mut(&mut self.data).ok_or(mismatch)
    }

    /// The value at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<AttributeValue> {
        self.data.get(index)
    }

    /// Apply `f` to every value in place, keeping name, domain and kind.
    pub fn map_values<F>(&mut self, f: F)
    where
        F: FnMut(AttributeValue) -> AttributeValue,
    {
        self.data.map_values(f);
    }

    /// Apply a typed closure to every value in place.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::TypeMismatch`] if the stored kind is not
    /// `T`'s kind.
    pub fn map_typed<T, F>(&mut self, mut f: F) -> AttributeResult<()>
    where
        T: AttributeElement,
        F: FnMut(T) -> T,
    {
        for slot in self.values_mut::<T>()? {
            *slot = f(*slot);
        }
        Ok(())
    }

    /// A copy with every value converted to `ty`.
    #[must_use]
    pub fn converted_to(&self, ty: AttributeType) -> Self {
        Self::new(self.name.clone(), self.domain, self.data.clone().convert(ty))
    }

    /// A copy re-aligned to another domain.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::LengthMismatch`] if this attribute's length
    /// does not match its own domain in `topology`.
    pub fn to_domain<T>(&self, to: AttributeDomain, topology: &T) -> AttributeResult<Self>
    where
        T: ElementTopology + ?Sized,
    {
        let data = convert_domain(&self.name, &self.data, self.domain, to, topology)?;
        Ok(Self::new(self.name.clone(), to, data))
    }

    /// A copy with a different name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.domain, self.data.clone())
    }

    fn type_mismatch(&self, expected: AttributeType) -> AttributeError {
        AttributeError::TypeMismatch {
            name: self.name.clone(),
            expected,
            actual: self.attribute_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_convert::tests::TwoTriangles;
    use nalgebra::Vector3;

    #[test]
    fn typed_access_checks_kind() {
        let attr = Attribute::from_values("flag", AttributeDomain::Face, vec![true, false]);
        assert_eq!(attr.values::<bool>(), Some(&[true, false][..]));
        assert!(attr.values::<i32>().is_none());
        let err = attr.try_values::<f64>().unwrap_err();
        assert!(matches!(
            err,
            AttributeError::TypeMismatch {
                expected: AttributeType::Float,
                actual: AttributeType::Bool,
                ..
            }
        ));
    }

    #[test]
    fn map_typed_scales_values() {
        let mut attr = Attribute::from_values(
            "position",
            AttributeDomain::Vertex,
            vec![Vector3::new(1.0, 2.0, 3.0)],
        );
        attr.map_typed::<Vector3<f64>, _>(|p| p * 2.0).unwrap();
        assert_eq!(attr.values::<Vector3<f64>>().unwrap()[0], Vector3::new(2.0, 4.0, 6.0));
        assert!(attr.map_typed::<f64, _>(|x| x).is_err());
    }

    #[test]
    fn map_values_keeps_kind() {
        let mut attr = Attribute::from_values("id", AttributeDomain::Edge, vec![1_i32, 2]);
        attr.map_values(|v| match v {
            AttributeValue::Int(i) => AttributeValue::Float(f64::from(i) + 0.5),
            other => other,
        });
        assert_eq!(attr.values::<i32>(), Some(&[1, 2][..]));
    }

    #[test]
    fn to_domain_relabels() {
        let topo = TwoTriangles::new();
        let attr = Attribute::from_values("mat", AttributeDomain::Face, vec![3_i32, 5]);
        let corners = attr.to_domain(AttributeDomain::FaceCorner, &topo).unwrap();
        assert_eq!(corners.domain(), AttributeDomain::FaceCorner);
        assert_eq!(corners.name(), "mat");
        assert_eq!(corners.values::<i32>(), Some(&[3, 3, 3, 5, 5, 5][..]));
    }

    #[test]
    fn filled_and_renamed() {
        let attr = Attribute::filled("a", AttributeDomain::Vertex, AttributeType::Vector2, 4);
        let b = attr.renamed("b");
        assert_eq!(b.name(), "b");
        assert_eq!(b.len(), 4);
        assert_eq!(b.data(), attr.data());
    }
}
