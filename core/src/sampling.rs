//! Sampling Functions

use crate::geometry::{Point2f, Vector3f};
use crate::math::TWO_PI;

/// Cosine-weighted sampling of the upper (y > 0) hemisphere.
///
/// * `u` - The random sample in [0, 1)².
pub fn sample_hemisphere_cosine(u: &Point2f) -> Vector3f {
    let cos_theta = (1.0 - u.x).sqrt();
    let sin_theta = u.x.sqrt();
    let phi = TWO_PI * u.y;
    Vector3f::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Float;
    use crate::rng::RNG;
    use float_cmp::approx_eq;

    #[test]
    fn samples_are_unit_and_above_horizon() {
        let mut rng = RNG::new(1);
        for _ in 0..1000 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let w = sample_hemisphere_cosine(&u);
            assert!(approx_eq!(Float, w.length(), 1.0, epsilon = 1e-4));
            assert!(w.y >= 0.0);
        }
    }

    #[test]
    fn mean_cosine_matches_cosine_weighting() {
        // E[cos θ] = 2/3 under a cos-weighted hemisphere distribution.
        let mut rng = RNG::new(2);
        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            sum += sample_hemisphere_cosine(&u).y;
        }
        let mean = sum / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 5e-3, "mean cos θ {}", mean);
    }
}
