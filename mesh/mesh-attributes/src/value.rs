//! Attribute value kinds.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AttributeData, AttributeError};

/// The kind of value an attribute stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeType {
    /// `bool` values.
    Bool,
    /// `i32` values.
    Int,
    /// `f64` values.
    Float,
    /// `f64` values restricted to `[0, 1]` (see [`Clamped01`]).
    ClampedFloat,
    /// Two-component vectors.
    Vector2,
    /// Three-component vectors.
    Vector3,
}

impl AttributeType {
    /// Every attribute kind.
    pub const ALL: [Self; 6] = [
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::ClampedFloat,
        Self::Vector2,
        Self::Vector3,
    ];

    /// Lower-case name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::ClampedFloat => "clamped_float",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeType {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AttributeError::UnknownType(s.to_string()))
    }
}

/// A float restricted to the `[0, 1]` range.
///
/// Construction clamps; `NaN` becomes `0.0`. Used for crease weights.
///
/// # Example
///
/// ```
/// use mesh_attributes::Clamped01;
///
/// assert_eq!(Clamped01::new(1.5).get(), 1.0);
/// assert_eq!(Clamped01::new(-0.25).get(), 0.0);
/// assert_eq!(Clamped01::new(0.25).get(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Clamped01(f64);

impl Clamped01 {
    /// `0.0`.
    pub const ZERO: Self = Self(0.0);

    /// `1.0`.
    pub const ONE: Self = Self(1.0);

    /// Clamp `value` into `[0, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The wrapped value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Clamped01 {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Clamped01> for f64 {
    fn from(value: Clamped01) -> Self {
        value.0
    }
}

/// A single attribute value of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i32),
    /// A float.
    Float(f64),
    /// A float in `[0, 1]`.
    ClampedFloat(Clamped01),
    /// A two-component vector.
    Vector2(Vector2<f64>),
    /// A three-component vector.
    Vector3(Vector3<f64>),
}

impl AttributeValue {
    /// The default ("zero") value of a kind.
    #[must_use]
    pub fn default_for(ty: AttributeType) -> Self {
        match ty {
            AttributeType::Bool => Self::Bool(false),
            AttributeType::Int => Self::Int(0),
            AttributeType::Float => Self::Float(0.0),
            AttributeType::ClampedFloat => Self::ClampedFloat(Clamped01::ZERO),
            AttributeType::Vector2 => Self::Vector2(Vector2::zeros()),
            AttributeType::Vector3 => Self::Vector3(Vector3::zeros()),
        }
    }

    /// The kind of this value.
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
}

/// Averaging operator for one value kind.
///
/// Used by domain conversion and by subdivision. An empty input yields the
/// kind's default value.
pub trait Blend: Sized {
    /// Average a set of values.
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self;
}

impl Blend for bool {
    /// Majority vote; a tie resolves to `true`.
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self {
        let (trues, count) = values
            .into_iter()
            .fold((0usize, 0usize), |(t, n), v| (t + usize::from(v), n + 1));
        count > 0 && trues * 2 >= count
    }
}

impl Blend for i32 {
    /// Mean, truncated toward zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((0i64, 0i64), |(s, n), v| (s + i64::from(v), n + 1));
        if count == 0 { 0 } else { (sum / count) as i32 }
    }
}

impl Blend for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

impl Blend for Clamped01 {
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self {
        Self::new(f64::blend(values.into_iter().map(Self::get)))
    }
}

impl Blend for Vector2<f64> {
    #[allow(clippy::cast_precision_loss)]
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((Self::zeros(), 0usize), |(s, n), v| (s + v, n + 1));
        if count == 0 { sum } else { sum / count as f64 }
    }
}

impl Blend for Vector3<f64> {
    #[allow(clippy::cast_precision_loss)]
    fn blend<I: IntoIterator<Item = Self>>(values: I) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((Self::zeros(), 0usize), |(s, n), v| (s + v, n + 1));
        if count == 0 { sum } else { sum / count as f64 }
    }
}

/// A Rust type that backs one attribute kind.
///
/// This ties the closed [`AttributeType`] set to concrete element types so
/// callers can read and write attributes without matching on
/// [`AttributeData`] themselves.
pub trait AttributeElement: Copy + Default + PartialEq + fmt::Debug + Blend + 'static {
    /// The kind this type backs.
    const TYPE: AttributeType;

    /// Borrow the values if `data` stores this kind.
    fn slice(data: &AttributeData) -> Option<&[Self]>;

    /// Mutably borrow the values if `data` stores this kind.
    fn vec_mut(data: &mut AttributeData) -> Option<&mut Vec<Self>>;

    /// Wrap a vector of values.
    fn into_data(values: Vec<Self>) -> AttributeData;

    /// Extract the value if it is of this kind.
    fn from_value(value: AttributeValue) -> Option<Self>;

    /// Wrap the value.
    fn into_value(self) -> AttributeValue;
}

macro_rules! impl_attribute_element {
    ($ty:ty, $variant:ident) => {
        impl AttributeElement for $ty {
            const TYPE: AttributeType = AttributeType::$variant;

            fn slice(data: &AttributeData) -> Option<&[Self]> {
                match data {
                    AttributeData::$variant(values) => Some(values),
                    _ => None,
                }
            }

            fn vec_mut(data: &mut AttributeData) -> Option<&mut Vec<Self>> {
                match data {
                    AttributeData::$variant(values) => Some(values),
                    _ => None,
                }
            }

            fn into_data(values: Vec<Self>) -> AttributeData {
                AttributeData::$variant(values)
            }

            fn from_value(value: AttributeValue) -> Option<Self> {
                match value {
                    AttributeValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_value(self) -> AttributeValue {
                AttributeValue::$variant(self)
            }
        }
    };
}

impl_attribute_element!(bool, Bool);
impl_attribute_element!(i32, Int);
impl_attribute_element!(f64, Float);
impl_attribute_element!(Clamped01, ClampedFloat);
impl_attribute_element!(Vector2<f64>, Vector2);
impl_attribute_element!(Vector3<f64>, Vector3);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamped_float_clamps() {
        assert_relative_eq!(Clamped01::new(2.0).get(), 1.0);
        assert_relative_eq!(Clamped01::new(-1.0).get(), 0.0);
        assert_relative_eq!(Clamped01::new(f64::NAN).get(), 0.0);
        assert_relative_eq!(Clamped01::from(0.5).get(), 0.5);
    }

    #[test]
    fn type_names_round_trip() {
        for ty in AttributeType::ALL {
            assert_eq!(ty.to_string().parse::<AttributeType>().unwrap(), ty);
        }
        assert!("quaternion".parse::<AttributeType>().is_err());
    }

    #[test]
    fn default_values_have_matching_kind() {
        for ty in AttributeType::ALL {
            assert_eq!(AttributeValue::default_for(ty).attribute_type(), ty);
        }
    }

    #[test]
    fn bool_blend_is_majority_with_ties_true() {
        assert!(bool::blend([true, true, false]));
        assert!(!bool::blend([true, false, false]));
        assert!(bool::blend([true, false]));
        assert!(!bool::blend(std::iter::empty()));
    }

    #[test]
    fn int_blend_truncates_toward_zero() {
        assert_eq!(i32::blend([1, 2]), 1);
        assert_eq!(i32::blend([-1, -2]), -1);
        assert_eq!(i32::blend([3, 3, 4]), 3);
        assert_eq!(i32::blend(std::iter::empty()), 0);
    }

    #[test]
    fn float_and_vector_blend_are_means() {
        assert_relative_eq!(f64::blend([1.0, 2.0, 6.0]), 3.0);
        let v = Vector3::blend([Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 4.0, 6.0)]);
        assert_relative_eq!(v, Vector3::new(1.0, 2.0, 3.0));
        let v = Vector2::blend([Vector2::new(1.0, 1.0), Vector2::new(0.0, 0.0)]);
        assert_relative_eq!(v, Vector2::new(0.5, 0.5));
        assert_relative_eq!(Vector3::blend(std::iter::empty()), Vector3::zeros());
    }

    #[test]
    fn clamped_blend_stays_in_range() {
        let c = Clamped01::blend([Clamped01::ONE, Clamped01::ZERO]);
        assert_relative_eq!(c.get(), 0.5);
    }

    #[test]
    fn element_round_trips_through_value() {
        assert_eq!(i32::from_value(7.into_value()), Some(7));
        assert_eq!(bool::from_value(AttributeValue::Int(1)), None);
        assert_eq!(<f64 as AttributeElement>::TYPE, AttributeType::Float);
    }
}
