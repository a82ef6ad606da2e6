//! Typed value containers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::{Vector2, Vector3};

use crate::{AttributeElement, AttributeType, AttributeValue, Blend, Clamped01};

/// A homogeneous vector of attribute values.
///
/// The variant is the attribute's kind; a container never mixes kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeData {
    /// Boolean values.
    Bool(Vec<bool>),
    /// Integer values.
    Int(Vec<i32>),
    /// Float values.
    Float(Vec<f64>),
    /// Clamped float values.
    ClampedFloat(Vec<Clamped01>),
    /// Two-component vectors.
    Vector2(Vec<Vector2<f64>>),
    /// Three-component vectors.
    Vector3(Vec<Vector3<f64>>),
}

/// Run `$body` with `$v` bound to the inner `Vec` of whichever variant `$data` is.
macro_rules! dispatch {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            AttributeData::Bool($v) => $body,
            AttributeData::Int($v) => $body,
            AttributeData::Float($v) => $body,
            AttributeData::ClampedFloat($v) => $body,
            AttributeData::Vector2($v) => $body,
            AttributeData::Vector3($v) => $body,
        }
    };
}

/// Like [`dispatch!`], but rewraps the result in the same variant.
macro_rules! dispatch_map {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            AttributeData::Bool($v) => AttributeData::Bool($body),
            AttributeData::Int($v) => AttributeData::Int($body),
            AttributeData::Float($v) => AttributeData::Float($body),
            AttributeData::ClampedFloat($v) => AttributeData::ClampedFloat($body),
            AttributeData::Vector2($v) => AttributeData::Vector2($body),
            AttributeData::Vector3($v) => AttributeData::Vector3($body),
        }
    };
}

impl AttributeData {
    /// An empty container of the given kind.
    #[must_use]
    pub fn empty(ty: AttributeType) -> Self {
        Self::filled(ty, 0)
    }

    /// `len` copies of the kind's default value.
    #[must_use]
    pub fn filled(ty: AttributeType, len: usize) -> Self {
        match ty {
            AttributeType::Bool => Self::Bool(vec![false; len]),
            AttributeType::Int => Self::Int(vec![0; len]),
            AttributeType::Float => Self::Float(vec![0.0; len]),
            AttributeType::ClampedFloat => Self::ClampedFloat(vec![Clamped01::ZERO; len]),
            AttributeType::Vector2 => Self::Vector2(vec![Vector2::zeros(); len]),
            AttributeType::Vector3 => Self::Vector3(vec![Vector3::zeros(); len]),
        }
    }

    /// `len` copies of `value`.
    #[must_use]
    pub fn repeat(value: AttributeValue, len: usize) -> Self {
        match value {
            AttributeValue::Bool(v) => Self::Bool(vec![v; len]),
            AttributeValue::Int(v) => Self::Int(vec![v; len]),
            AttributeValue::Float(v) => Self::Float(vec![v; len]),
            AttributeValue::ClampedFloat(v) => Self::ClampedFloat(vec![v; len]),
            AttributeValue::Vector2(v) => Self::Vector2(vec![v; len]),
            AttributeValue::Vector3(v) => Self::Vector3(vec![v; len]),
        }
    }

    /// The kind of the stored values.
    #[must_use]
    pub const fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Bool(_) => AttributeType::Bool,
            Self::Int(_) => AttributeType::Int,
            Self::Float(_) => AttributeType::Float,
            Self::ClampedFloat(_) => AttributeType::ClampedFloat,
            Self::Vector2(_) => AttributeType::Vector2,
            Self::Vector3(_) => AttributeType::Vector3,
        }
    }

    /// Number of stored values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    /// Whether the container holds no values.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<AttributeValue> {
        dispatch!(self, v => v.get(index).map(|x| x.into_value()))
    }

    /// Borrow the values as `T`, if `T` backs this container's kind.
    #[must_use]
    pub fn as_slice<T: AttributeElement>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    /// Append one value, converting it to this container's kind.
    pub fn push(&mut self, value: AttributeValue) {
        let value = value.convert(self.attribute_type());
        dispatch!(self, v => {
            if let Some(x) = AttributeElement::from_value(value) {
                v.push(x);
            }
        });
    }

    /// Append every value of `other`, converting to this container's kind.
    pub fn extend_from(&mut self, other: &Self) {
        let other = other.clone().convert(self.attribute_type());
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.extend(b),
            (Self::Int(a), Self::Int(b)) => a.extend(b),
            (Self::Float(a), Self::Float(b)) => a.extend(b),
            (Self::ClampedFloat(a), Self::ClampedFloat(b)) => a.extend(b),
            (Self::Vector2(a), Self::Vector2(b)) => a.extend(b),
            (Self::Vector3(a), Self::Vector3(b)) => a.extend(b),
            // `convert` always yields the requested kind.
            _ => {}
        }
    }

    /// Grow or shrink to `len`, filling new slots with the default value.
    pub fn resize(&mut self, len: usize) {
        dispatch!(self, v => v.resize(len, Default::default()));
    }

    /// Pick values by index, in order. Out-of-range indices yield defaults.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        dispatch_map!(self, v => indices
            .iter()
            .map(|&i| v.get(i).copied().unwrap_or_default())
            .collect())
    }

    /// Average each group of source indices into one output value.
    ///
    /// Output value `i` blends the values at `groups[i]`. An empty group, or
    /// indices out of range, contribute nothing; an empty group yields the
    /// kind's default.
    #[must_use]
    pub fn blend_groups(&self, groups: &[Vec<usize>]) -> Self {
        dispatch_map!(self, v => groups
            .iter()
            .map(|group| Blend::blend(group.iter().filter_map(|&i| v.get(i).copied())))
            .collect())
    }

    /// Append the blend of the values at `indices`.
    pub fn push_blend(&mut self, indices: &[usize]) {
        dispatch!(self, v => {
            let value = Blend::blend(indices.iter().filter_map(|&i| v.get(i).copied()));
            v.push(value);
        });
    }

    /// Convert every value to another kind.
    #[must_use]
    pub fn convert(self, to: AttributeType) -> Self {
        if self.attribute_type() == to {
            return self;
        }
        let len = self.len();
        let mut out = Self::filled(to, 0);
        dispatch!(&mut out, o => o.reserve(len));
        dispatch!(self, v => {
            for x in v {
                out.push(x.into_value().convert(to));
            }
        });
        out
    }

    /// Apply `f` to every value in place, keeping the kind.
    ///
    /// Clamped floats are re-clamped after the closure runs.
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(AttributeValue) -> AttributeValue,
    {
        let ty = self.attribute_type();
        dispatch!(self, v => {
            for x in v.iter_mut() {
                if let Some(mapped) = AttributeElement::from_value(f(x.into_value()).convert(ty)) {
                    *x = mapped;
                }
            }
        });
    }

    /// Iterate the values as dynamically typed [`AttributeValue`]s.
    pub fn iter(&self) -> impl Iterator<Item = AttributeValue> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

impl<T: AttributeElement> From<Vec<T>> for AttributeData {
    fn from(values: Vec<T>) -> Self {
        T::into_data(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn filled_has_defaults() {
        for ty in AttributeType::ALL {
            let data = AttributeData::filled(ty, 3);
            assert_eq!(data.len(), 3);
            assert_eq!(data.attribute_type(), ty);
            assert_eq!(data.get(2), Some(AttributeValue::default_for(ty)));
            assert_eq!(data.get(3), None);
        }
    }

    #[test]
    fn extend_converts_kind() {
        let mut a = AttributeData::from(vec![1.5_f64]);
        a.extend_from(&AttributeData::from(vec![2_i32, 3]));
        assert_eq!(a, AttributeData::Float(vec![1.5, 2.0, 3.0]));
    }

    #[test]
    fn resize_pads_with_default() {
        let mut a = AttributeData::from(vec![true]);
        a.resize(3);
        assert_eq!(a, AttributeData::Bool(vec![true, false, false]));
        a.resize(1);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn blend_groups_averages() {
        let data = AttributeData::from(vec![0.0_f64, 2.0, 4.0]);
        let out = data.blend_groups(&[vec![0, 1], vec![], vec![0, 1, 2], vec![2, 99]]);
        let AttributeData::Float(v) = out else {
            panic!("kind changed");
        };
        assert_relative_eq!(v[0], 1.0);
        assert_relative_eq!(v[1], 0.0);
        assert_relative_eq!(v[2], 2.0);
        assert_relative_eq!(v[3], 4.0);
    }

    #[test]
    fn push_blend_appends() {
        let mut data = AttributeData::from(vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0)]);
        data.push_blend(&[0, 1]);
        assert_eq!(data.get(2), Some(AttributeValue::Vector3(Vector3::new(1.0, 1.0, 1.0))));
    }

    #[test]
    fn select_reorders() {
        let data = AttributeData::from(vec![10_i32, 20, 30]);
        assert_eq!(data.select(&[2, 0, 0]), AttributeData::Int(vec![30, 10, 10]));
    }

    #[test]
    fn convert_whole_container() {
        let data = AttributeData::from(vec![0.0_f64, 0.25, 3.0]);
        let out = data.convert(AttributeType::Bool);
        assert_eq!(out, AttributeData::Bool(vec![false, true, true]));
    }

    #[test]
    fn map_values_keeps_clamp() {
        let mut data = AttributeData::from(vec![Clamped01::new(0.5)]);
        data.map_values(|v| match v {
            AttributeValue::ClampedFloat(c) => AttributeValue::Float(c.get() * 4.0),
            other => other,
        });
        assert_eq!(data, AttributeData::ClampedFloat(vec![Clamped01::ONE]));
    }

    #[test]
    fn typed_slice_access() {
        let data = AttributeData::from(vec![1_i32, 2]);
        assert_eq!(data.as_slice::<i32>(), Some(&[1, 2][..]));
        assert!(data.as_slice::<f64>().is_none());
    }
}
