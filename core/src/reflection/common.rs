//! Common reflection functions.

use crate::geometry::Vector3f;
use crate::math::{clamp, square, Float};

/// Schlick's approximation of the Fresnel grazing-angle falloff, `(1 - u)⁵`
/// with `u` clamped to [0, 1].
///
/// * `u` - Cosine of the angle between the direction and the half-vector.
pub fn schlick_fresnel(u: Float) -> Float {
    let m = clamp(1.0 - u, 0.0, 1.0);
    let m2 = square(m);
    square(m2) * m
}

/// Reflects a direction about a normal. Both vectors point away from the
/// surface.
///
/// * `v` - The direction to reflect.
/// * `n` - The unit normal.
pub fn reflect(v: &Vector3f, n: &Vector3f) -> Vector3f {
    *n * (2.0 * v.dot(n)) - *v
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
