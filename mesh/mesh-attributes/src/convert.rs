//! The value coercion table.
//!
//! Every ordered pair of [`AttributeType`]s has exactly one conversion
//! function. Converting a kind to itself is the identity.

use nalgebra::{Vector2, Vector3};

use crate::{AttributeType, AttributeValue, Clamped01};

const ONE_TOLERANCE: f64 = 1e-6;

impl AttributeValue {
    /// Convert this value to another kind.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_attributes::{AttributeType, AttributeValue};
    ///
    /// let v = AttributeValue::Float(2.75).convert(AttributeType::Int);
    /// assert_eq!(v, AttributeValue::Int(2));
    ///
    /// let v = AttributeValue::Bool(true).convert(AttributeType::Float);
    /// assert_eq!(v, AttributeValue::Float(1.0));
    /// ```
    #[must_use]
    pub fn convert(self, to: AttributeType) -> Self {
        use AttributeType as T;
        use AttributeValue as V;

        match (self, to) {
            (V::Bool(v), T::Bool) => V::Bool(v),
            (V::Bool(v), T::Int) => V::Int(bool_to_int(v)),
            (V::Bool(v), T::Float) => V::Float(bool_to_float(v)),
            (V::Bool(v), T::ClampedFloat) => V::ClampedFloat(bool_to_clamped(v)),
            (V::Bool(v), T::Vector2) => V::Vector2(bool_to_vec2(v)),
            (V::Bool(v), T::Vector3) => V::Vector3(bool_to_vec3(v)),

            (V::Int(v), T::Bool) => V::Bool(int_to_bool(v)),
            (V::Int(v), T::Int) => V::Int(v),
            (V::Int(v), T::Float) => V::Float(int_to_float(v)),
            (V::Int(v), T::ClampedFloat) => V::ClampedFloat(int_to_clamped(v)),
            (V::Int(v), T::Vector2) => V::Vector2(int_to_vec2(v)),
            (V::Int(v), T::Vector3) => V::Vector3(int_to_vec3(v)),

            (V::Float(v), T::Bool) => V::Bool(float_to_bool(v)),
            (V::Float(v), T::Int) => V::Int(float_to_int(v)),
            (V::Float(v), T::Float) => V::Float(v),
            (V::Float(v), T::ClampedFloat) => V::ClampedFloat(Clamped01::new(v)),
            (V::Float(v), T::Vector2) => V::Vector2(Vector2::repeat(v)),
            (V::Float(v), T::Vector3) => V::Vector3(Vector3::repeat(v)),

            (V::ClampedFloat(v), T::Bool) => V::Bool(float_to_bool(v.get())),
            (V::ClampedFloat(v), T::Int) => V::Int(clamped_to_int(v)),
            (V::ClampedFloat(v), T::Float) => V::Float(v.get()),
            (V::ClampedFloat(v), T::ClampedFloat) => V::ClampedFloat(v),
            (V::ClampedFloat(v), T::Vector2) => V::Vector2(Vector2::repeat(v.get())),
            (V::ClampedFloat(v), T::Vector3) => V::Vector3(Vector3::repeat(v.get())),

            (V::Vector2(v), T::Bool) => V::Bool(v.iter().all(|c| *c != 0.0)),
            (V::Vector2(v), T::Int) => V::Int(float_to_int(v.x)),
            (V::Vector2(v), T::Float) => V::Float(v.x),
            (V::Vector2(v), T::ClampedFloat) => V::ClampedFloat(Clamped01::new(v.x)),
            (V::Vector2(v), T::Vector2) => V::Vector2(v),
            (V::Vector2(v), T::Vector3) => V::Vector3(vec2_to_vec3(v)),

            (V::Vector3(v), T::Bool) => V::Bool(v.iter().all(|c| *c != 0.0)),
            (V::Vector3(v), T::Int) => V::Int(float_to_int(v.x)),
            (V::Vector3(v), T::Float) => V::Float(v.x),
            (V::Vector3(v), T::ClampedFloat) => V::ClampedFloat(Clamped01::new(v.x)),
            (V::Vector3(v), T::Vector2) => V::Vector2(vec3_to_vec2(v)),
            (V::Vector3(v), T::Vector3) => V::Vector3(v),
        }
    }
}

#[inline]
fn bool_to_int(v: bool) -> i32 {
    i32::from(v)
}

#[inline]
const fn bool_to_float(v: bool) -> f64 {
    if v { 1.0 } else { 0.0 }
}

#[inline]
const fn bool_to_clamped(v: bool) -> Clamped01 {
    if v { Clamped01::ONE } else { Clamped01::ZERO }
}

#[inline]
fn bool_to_vec2(v: bool) -> Vector2<f64> {
    Vector2::repeat(bool_to_float(v))
}

#[inline]
fn bool_to_vec3(v: bool) -> Vector3<f64> {
    Vector3::repeat(bool_to_float(v))
}

#[inline]
const fn int_to_bool(v: i32) -> bool {
    v != 0
}

#[inline]
fn int_to_float(v: i32) -> f64 {
    f64::from(v)
}

#[inline]
fn int_to_clamped(v: i32) -> Clamped01 {
    Clamped01::new(f64::from(v))
}

#[inline]
fn int_to_vec2(v: i32) -> Vector2<f64> {
    Vector2::repeat(f64::from(v))
}

#[inline]
fn int_to_vec3(v: i32) -> Vector3<f64> {
    Vector3::repeat(f64::from(v))
}

#[inline]
fn float_to_bool(v: f64) -> bool {
    v != 0.0
}

/// Truncate toward zero; out-of-range values saturate and `NaN` maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn float_to_int(v: f64) -> i32 {
    v as i32
}

/// A clamped float only counts as 1 when it is (nearly) exactly 1.
#[inline]
fn clamped_to_int(v: Clamped01) -> i32 {
    i32::from((v.get() - 1.0).abs() < ONE_TOLERANCE)
}

#[inline]
fn vec2_to_vec3(v: Vector2<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.y, 0.0)
}

/// Explicit projection onto the XY plane.
#[inline]
fn vec3_to_vec2(v: Vector3<f64>) -> Vector2<f64> {
    v.xy()
}
