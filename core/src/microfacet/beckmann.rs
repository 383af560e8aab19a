//! Isotropic Beckmann Microfacet Distribution Function.

use super::{cos_theta, unit_vector, MicrofacetDistribution};
use crate::geometry::{Point2f, Vector3f};
use crate::math::{square, Float, PI, TWO_PI};

/// The isotropic Beckmann distribution with Smith uncorrelated
/// masking-shadowing. `alpha_y` is ignored.
pub struct BeckmannMdf;

impl MicrofacetDistribution for BeckmannMdf {
    fn sample(&self, s: &Point2f, alpha_x: Float, _alpha_y: Float) -> Vector3f {
        debug_assert!((0.0..1.0).contains(&s.x) && (0.0..1.0).contains(&s.y));

        // Same sampling procedure as for the Ward distribution.
        let alpha_x_2 = square(alpha_x);
        let tan_theta_2 = alpha_x_2 * -(1.0 - s.x).ln();
        let cos_theta = 1.0 / (1.0 + tan_theta_2).sqrt();
        let sin_theta = cos_theta * tan_theta_2.sqrt();
        let phi = TWO_PI * s.y;
        unit_vector(cos_theta, sin_theta, phi.cos(), phi.sin())
    }

    fn d(&self, h: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
        debug_assert!(cos_theta(h) >= 0.0);

        if cos_theta(h) == 0.0 {
            return 0.0;
        }

        let cos_theta_2 = square(cos_theta(h));
        let cos_theta_4 = square(cos_theta_2);
        let tan_theta_2 = (1.0 - cos_theta_2) / cos_theta_2;
        let alpha_x_2 = square(alpha_x);
        (-tan_theta_2 / alpha_x_2).exp() / (alpha_x_2 * PI * cos_theta_4)
    }

    fn g(
        &self,
        incoming: &Vector3f,
        outgoing: &Vector3f,
        h: &Vector3f,
        alpha_x: Float,
        alpha_y: Float,
    ) -> Float {
        beckmann_smith_g1(outgoing, h, alpha_x, alpha_y)
            * beckmann_smith_g1(incoming, h, alpha_x, alpha_y)
    }

    fn pdf(&self, h: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
        debug_assert!(cos_theta(h) >= 0.0);

        if cos_theta(h) == 0.0 {
            return 0.0;
        }

        let cos_theta_2 = square(cos_theta(h));
        let cos_theta_3 = cos_theta(h) * cos_theta_2;
        let tan_theta_2 = (1.0 - cos_theta_2) / cos_theta_2;
        let alpha_x_2 = square(alpha_x);
        (-tan_theta_2 / alpha_x_2).exp() / (alpha_x_2 * PI * cos_theta_3)
    }
}

/// Smith mono-directional shadowing term for the Beckmann distribution,
/// using the rational approximation to the error-function form.
///
/// * `v`       - The direction in local shading space.
/// * `m`       - The microfacet normal.
/// * `alpha_x` - Roughness in the tangent direction.
pub(crate) fn beckmann_smith_g1(v: &Vector3f, m: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
    if v.dot(m) * v.y <= 0.0 {
        return 0.0;
    }

    let cos_theta_2 = square(v.y);
    let tan_theta = ((1.0 - cos_theta_2) / cos_theta_2).sqrt();

    if tan_theta == 0.0 {
        return 1.0;
    }

    let a = 1.0 / alpha_x * tan_theta;

    if a < 1.6 {
        let a2 = square(a);
        (3.535 * a + 2.181 * a2) / (1.0 + 2.276 * a + 2.577 * a2)
    } else {
        1.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
