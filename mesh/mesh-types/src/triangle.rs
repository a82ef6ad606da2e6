//! Triangle geometry helpers.

use nalgebra::{Point3, Vector3};

/// Below this squared length a cross product is treated as zero.
const DEGENERATE_EPSILON_SQ: f64 = 1e-30;

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!((tri.normal().z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from position vectors.
    #[inline]
    #[must_use]
    pub fn from_vectors(v0: Vector3<f64>, v1: Vector3<f64>, v2: Vector3<f64>) -> Self {
        Self::new(Point3::from(v0), Point3::from(v1), Point3::from(v2))
    }

    /// The (unnormalized) face normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// The unit face normal, or the zero vector for a degenerate triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Point3, Triangle, Vector3};
    ///
    /// let degen = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// );
    /// assert_eq!(degen.normal(), Vector3::zeros());
    /// ```
    #[must_use]
    pub fn normal(&self) -> Vector3<f64> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > DEGENERATE_EPSILON_SQ {
            n / len_sq.sqrt()
        } else {
            Vector3::zeros()
        }
    }

    /// The area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Whether the triangle has (numerically) zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal_unnormalized().norm_squared() <= DEGENERATE_EPSILON_SQ
    }
}

/// Unsigned angle between two vectors, in degrees.
///
/// Returns 0 when either vector is (numerically) zero, so degenerate face
/// normals never block a weld.
///
/// # Example
///
/// ```
/// use mesh_types::{angle_degrees, Vector3};
///
/// let a = Vector3::new(1.0, 0.0, 0.0);
/// let b = Vector3::new(0.0, 1.0, 0.0);
/// assert!((angle_degrees(&a, &b) - 90.0).abs() < 1e-9);
/// assert_eq!(angle_degrees(&a, &Vector3::zeros()), 0.0);
/// ```
#[must_use]
pub fn angle_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn triangle_normal() {
        let tri = Triangle::from_vectors(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert_relative_eq!(tri.normal(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn degenerate_triangle_normal_is_zero() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        let tri = Triangle::from_vectors(p, p, p);
        assert!(tri.is_degenerate());
        assert_eq!(tri.normal(), Vector3::zeros());
        assert!(tri.normal().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn triangle_area() {
        let tri = Triangle::from_vectors(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(0.0, 4.0, 0.0),
        );
        assert_relative_eq!(tri.area(), 6.0);
    }

    #[test]
    fn angle_between_opposite_normals() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(angle_degrees(&up, &-up), 180.0);
        assert_relative_eq!(angle_degrees(&up, &up), 0.0);
        assert_relative_eq!(angle_degrees(&up, &(up * 5.0)), 0.0);
    }
}
