//! Blinn-Phong Microfacet Distribution Function.

use super::{cos_theta, unit_vector, MicrofacetDistribution};
use crate::geometry::{Point2f, Vector3f};
use crate::math::{Float, INV_TWO_PI, TWO_PI};

/// The Blinn-Phong distribution. `alpha_x` is the Phong exponent; the
/// distribution is isotropic and ignores `alpha_y`.
pub struct BlinnMdf;

impl MicrofacetDistribution for BlinnMdf {
    fn sample(&self, s: &Point2f, alpha_x: Float, _alpha_y: Float) -> Vector3f {
        debug_assert!((0.0..1.0).contains(&s.x) && (0.0..1.0).contains(&s.y));

        let cos_theta = (1.0 - s.x).powf(1.0 / (alpha_x + 2.0));
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let phi = TWO_PI * s.y;
        unit_vector(cos_theta, sin_theta, phi.cos(), phi.sin())
    }

    fn d(&self, h: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
        debug_assert!(cos_theta(h) >= 0.0);
        (alpha_x + 2.0) * INV_TWO_PI * cos_theta(h).powf(alpha_x)
    }

    fn pdf(&self, h: &Vector3f, alpha_x: Float, _alpha_y: Float) -> Float {
        debug_assert!(cos_theta(h) >= 0.0);
        (alpha_x + 2.0) * INV_TWO_PI * cos_theta(h).powf(alpha_x + 1.0)
    }
}
