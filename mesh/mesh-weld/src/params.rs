//! Import parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`import_mesh`](crate::import_mesh).
///
/// Positions are compared exactly; the only tolerance is on the angle
/// between the normals of the two faces an edge seam would join.
///
/// # Example
///
/// ```
/// use mesh_weld::WeldParams;
///
/// let params = WeldParams::smooth(30.0).with_smooth_normal_threshold_sq(1e-3);
/// assert!((params.normal_angle_threshold_deg - 30.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeldParams {
    /// Largest angle, in degrees, between two face normals for the faces'
    /// coincident edges to be welded into one.
    ///
    /// Default: `179.99`
    pub normal_angle_threshold_deg: f64,

    /// A face is flagged smooth-shaded when its geometric normal and the
    /// mean of its authored vertex normals differ by more than this
    /// squared length.
    ///
    /// Default: `1e-4`
    pub smooth_normal_threshold_sq: f64,
}

impl Default for WeldParams {
    fn default() -> Self {
        Self {
            normal_angle_threshold_deg: 179.99,
            smooth_normal_threshold_sq: 1e-4,
        }
    }
}

impl WeldParams {
    /// Weld every coincident edge regardless of the face angle.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            normal_angle_threshold_deg: 180.0,
            ..Default::default()
        }
    }

    /// Weld only across faces whose normals are at most `angle_deg` apart,
    /// keeping sharper creases split.
    #[must_use]
    pub fn smooth(angle_deg: f64) -> Self {
        Self {
            normal_angle_threshold_deg: angle_deg,
            ..Default::default()
        }
    }

    /// Set the face-normal angle threshold, in degrees.
    #[must_use]
    pub const fn with_normal_angle_threshold(mut self, angle_deg: f64) -> Self {
        self.normal_angle_threshold_deg = angle_deg;
        self
    }

    /// Set the squared-length threshold of the smooth-shading test.
    #[must_use]
    pub const fn with_smooth_normal_threshold_sq(mut self, threshold_sq: f64) -> Self {
        self.smooth_normal_threshold_sq = threshold_sq;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert!((WeldParams::default().normal_angle_threshold_deg - 179.99).abs() < 1e-12);
        assert!((WeldParams::permissive().normal_angle_threshold_deg - 180.0).abs() < 1e-12);
        let smooth = WeldParams::smooth(45.0);
        assert!((smooth.normal_angle_threshold_deg - 45.0).abs() < 1e-12);
        assert!((smooth.smooth_normal_threshold_sq - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn builders_chain() {
        let params = WeldParams::default()
            .with_normal_angle_threshold(10.0)
            .with_smooth_normal_threshold_sq(0.5);
        assert!((params.normal_angle_threshold_deg - 10.0).abs() < 1e-12);
        assert!((params.smooth_normal_threshold_sq - 0.5).abs() < 1e-12);
    }
}
