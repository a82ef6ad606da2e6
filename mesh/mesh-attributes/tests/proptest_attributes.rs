//! Property-based tests for value coercion and averaging.
//!
//! Run with: cargo test -p mesh-attributes -- proptest

use mesh_attributes::{AttributeData, AttributeType, AttributeValue, Blend, Clamped01};
use nalgebra::{Vector2, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_type() -> impl Strategy<Value = AttributeType> {
    prop::sample::select(AttributeType::ALL.to_vec())
}

fn arb_value() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        any::<bool>().prop_map(AttributeValue::Bool),
        (-1000..1000i32).prop_map(AttributeValue::Int),
        (-1000.0..1000.0f64).prop_map(AttributeValue::Float),
        (-2.0..2.0f64).prop_map(|v| AttributeValue::ClampedFloat(Clamped01::new(v))),
        prop::array::uniform2(-1000.0..1000.0f64)
            .prop_map(|[x, y]| AttributeValue::Vector2(Vector2::new(x, y))),
        prop::array::uniform3(-1000.0..1000.0f64)
            .prop_map(|[x, y, z]| AttributeValue::Vector3(Vector3::new(x, y, z))),
    ]
}

// =============================================================================
// Coercion
// =============================================================================

proptest! {
    #[test]
    fn proptest_conversion_yields_target_kind(value in arb_value(), ty in arb_type()) {
        prop_assert_eq!(value.convert(ty).attribute_type(), ty);
    }

    #[test]
    fn proptest_conversion_to_own_kind_is_identity(value in arb_value()) {
        prop_assert_eq!(value.convert(value.attribute_type()), value);
    }

    #[test]
    fn proptest_clamped_results_stay_in_range(value in arb_value()) {
        let AttributeValue::ClampedFloat(c) = value.convert(AttributeType::ClampedFloat) else {
            return Err(TestCaseError::fail("wrong kind"));
        };
        prop_assert!((0.0..=1.0).contains(&c.get()));
    }

    #[test]
    fn proptest_vec3_through_vec2_drops_z(x in -100.0..100.0f64, y in -100.0..100.0f64, z in -100.0..100.0f64) {
        let v = AttributeValue::Vector3(Vector3::new(x, y, z))
            .convert(AttributeType::Vector2)
            .convert(AttributeType::Vector3);
        prop_assert_eq!(v, AttributeValue::Vector3(Vector3::new(x, y, 0.0)));
    }
}

// =============================================================================
// Averaging
// =============================================================================

proptest! {
    #[test]
    fn proptest_blend_of_constant_is_constant(v in -1000.0..1000.0f64, n in 1usize..20) {
        let blended = f64::blend(std::iter::repeat_n(v, n));
        prop_assert!((blended - v).abs() <= 1e-9 * v.abs().max(1.0));
    }

    #[test]
    fn proptest_int_blend_within_bounds(values in prop::collection::vec(-1000..1000i32, 1..20)) {
        let blended = i32::blend(values.iter().copied());
        let lo = values.iter().copied().min().unwrap_or(0);
        let hi = values.iter().copied().max().unwrap_or(0);
        prop_assert!(blended >= lo && blended <= hi);
    }

    #[test]
    fn proptest_clamped_blend_in_range(values in prop::collection::vec(-1.0..2.0f64, 0..20)) {
        let blended = Clamped01::blend(values.into_iter().map(Clamped01::new));
        prop_assert!((0.0..=1.0).contains(&blended.get()));
    }

    #[test]
    fn proptest_container_convert_preserves_length(len in 0usize..50, from in arb_type(), to in arb_type()) {
        let data = AttributeData::filled(from, len).convert(to);
        prop_assert_eq!(data.len(), len);
        prop_assert_eq!(data.attribute_type(), to);
    }
}
