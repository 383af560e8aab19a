//! Microfacet Distribution Functions

mod beckmann;
mod berry;
mod blinn;
mod ggx;

// Re-export.
pub use beckmann::*;
pub use berry::*;
pub use blinn::*;
pub use ggx::*;

use crate::geometry::{Point2f, Vector3f};
use crate::math::{max, min, square, Float};

/// Microfacet distribution function interface. All vectors are in local
/// shading space with the y-axis along the shading normal.
pub trait MicrofacetDistribution {
    /// Maps a uniform random pair in [0, 1)² to a microfacet normal
    /// distributed proportionally to the distribution function.
    ///
    /// * `s`       - The uniform random sample.
    /// * `alpha_x` - Roughness in the tangent direction.
    /// * `alpha_y` - Roughness in the bitangent direction.
    fn sample(&self, s: &Point2f, alpha_x: Float, alpha_y: Float) -> Vector3f;

    /// Evaluates the normal distribution function for a half-vector with
    /// `cos_theta(h) >= 0`.
    ///
    /// * `h`       - The half-vector.
    /// * `alpha_x` - Roughness in the tangent direction.
    /// * `alpha_y` - Roughness in the bitangent direction.
    fn d(&self, h: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float;

    /// Evaluates the masking-shadowing attenuation for a direction pair.
    ///
    /// * `incoming` - Incoming direction.
    /// * `outgoing` - Outgoing direction.
    /// * `h`        - The half-vector.
    /// * `alpha_x`  - Roughness in the tangent direction.
    /// * `alpha_y`  - Roughness in the bitangent direction.
    fn g(
        &self,
        incoming: &Vector3f,
        outgoing: &Vector3f,
        h: &Vector3f,
        _alpha_x: Float,
        _alpha_y: Float,
    ) -> Float {
        torrance_sparrow_g(incoming, outgoing, h)
    }

    /// Probability density of a half-vector under the same importance
    /// sampling scheme as `sample`. Requires `cos_theta(h) >= 0`.
    ///
    /// * `h`       - The half-vector.
    /// * `alpha_x` - Roughness in the tangent direction.
    /// * `alpha_y` - Roughness in the bitangent direction.
    fn pdf(&self, h: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float;
}

/// Cosine of the angle between a local-space vector and the shading normal.
#[inline]
pub(crate) fn cos_theta(v: &Vector3f) -> Float {
    v.y
}

/// Squared sine of the angle between a local-space vector and the normal.
#[inline]
pub(crate) fn sin_theta_2(v: &Vector3f) -> Float {
    1.0 - square(cos_theta(v))
}

/// Sine of the angle between a local-space vector and the shading normal.
#[inline]
pub(crate) fn sin_theta(v: &Vector3f) -> Float {
    max(0.0, sin_theta_2(v)).sqrt()
}

/// Builds a unit vector from spherical sine/cosine terms, y up.
#[inline]
pub(crate) fn unit_vector(
    cos_theta: Float,
    sin_theta: Float,
    cos_phi: Float,
    sin_phi: Float,
) -> Vector3f {
    Vector3f::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi)
}

/// Torrance-Sparrow height-correlated masking-shadowing function.
///
/// * `incoming` - Incoming direction in local shading space.
/// * `outgoing` - Outgoing direction in local shading space.
/// * `h`        - The half-vector.
pub(crate) fn torrance_sparrow_g(incoming: &Vector3f, outgoing: &Vector3f, h: &Vector3f) -> Float {
    if cos_theta(incoming) >= 0.0 {
        min(torrance_sparrow_g1(incoming, h), torrance_sparrow_g1(outgoing, h))
    } else {
        max(
            torrance_sparrow_g1(incoming, h) + torrance_sparrow_g1(outgoing, h) - 1.0,
            0.0,
        )
    }
}

fn torrance_sparrow_g1(v: &Vector3f, h: &Vector3f) -> Float {
    if v.y <= 0.0 {
        return 0.0;
    }
    if v.dot(h) <= 0.0 {
        return 0.0;
    }
    let cos_vh = v.dot(h).abs();
    if cos_vh == 0.0 {
        return 0.0;
    }
    min(1.0, 2.0 * h.y.abs() * v.y.abs() / cos_vh)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
