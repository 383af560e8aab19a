//! Berry Microfacet Distribution Function, used in clearcoat layers.

use super::{cos_theta, ggx_smith_g1, unit_vector, MicrofacetDistribution};
use crate::geometry::{Point2f, Vector3f};
use crate::math::{square, Float, INV_PI, PI, TWO_PI};

/// The Berry distribution, a GGX-like lobe with a longer tail. Isotropic;
/// `alpha_y` is ignored. The `alpha_x == 1` singularity of the log-ratio
/// normalization takes its limit value.
pub struct BerryMdf;

impl MicrofacetDistribution for BerryMdf {
    fn sample(&self, s: &Point2f, alpha_x: Float, _alpha_y: Float) -> Vector3f {
        debug_assert!((0.0..1.0).contains(&s.x) && (0.0..1.0).contains(&s.y));

        let alpha_x_2 = square(alpha_x);
        let cos_theta = if alpha_x_2 == 1.0 {
            (1.0 - s.x).sqrt()
        } else {
            let a = 1.0 - alpha_x_2.powf(1.0 - s.x);
            (a / (1.0 - alpha_x_2)).sqrt()
        };
        let sin_theta = (1.0 - square(cos_theta)).sqrt();
        let phi = TWO_PI * s.y;
        unit_vector(cos_theta, sin_theta, phi.cos(), phi.sin())
    }

    fn d(&self, h: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
        debug_assert!(cos_theta(h) >= 0.0);

        let alpha_x_2 = square(alpha_x);
        if alpha_x_2 == 1.0 {
            return INV_PI;
        }

        let cos_theta_2 = square(cos_theta(h));
        let a = (alpha_x_2 - 1.0) / (PI * alpha_x_2.ln());
        let b = 1.0 / (1.0 + (alpha_x_2 - 1.0) * cos_theta_2);
        a * b
    }

    fn g(
        &self,
        incoming: &Vector3f,
        outgoing: &Vector3f,
        h: &Vector3f,
        alpha_x: Float,
        alpha_y: Float,
    ) -> Float {
        ggx_smith_g1(outgoing, h, alpha_x, alpha_y) * ggx_smith_g1(incoming, h, alpha_x, alpha_y)
    }

    fn pdf(&self, h: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
        debug_assert!(cos_theta(h) >= 0.0);

        if cos_theta(h) == 0.0 {
            return 0.0;
        }

        let alpha_x_2 = square(alpha_x);
        if alpha_x_2 == 1.0 {
            return INV_PI;
        }

        let a = (alpha_x_2 - 1.0) / (PI * alpha_x_2.ln());
        let b = 1.0 / (1.0 + (alpha_x_2 - 1.0) * cos_theta(h));
        a * b
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
