//! Rays

use super::{Point3f, Vector3f};
use crate::math::Float;

/// A ray with a parametric interval `[t_min, t_max]`.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Minimum ray parameter.
    pub t_min: Float,

    /// Maximum ray parameter.
    pub t_max: Float,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_min` - Minimum ray parameter.
    /// * `t_max` - Maximum ray parameter.
    pub fn new(o: Point3f, d: Vector3f, t_min: Float, t_max: Float) -> Self {
        Self { o, d, t_min, t_max }
    }

    /// Returns the point at the given ray parameter.
    ///
    /// * `t` - The ray parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

/// Precomputed per-ray data used by slab tests.
#[derive(Copy, Clone, Debug)]
pub struct RayInfo {
    /// Reciprocal of each direction component.
    pub inv_dir: Vector3f,

    /// Sign of each direction component.
    pub dir_is_neg: [bool; 3],
}

impl From<&Ray> for RayInfo {
    /// Precomputes reciprocal-direction data for a ray.
    ///
    /// * `ray` - The ray.
    fn from(ray: &Ray) -> Self {
        let inv_dir = Vector3f::new(1.0 / ray.d.x, 1.0 / ray.d.y, 1.0 / ray.d.z);
        Self {
            inv_dir,
            dir_is_neg: [inv_dir.x < 0.0, inv_dir.y < 0.0, inv_dir.z < 0.0],
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn at_is_linear(
            ox in -100.0..100.0_f32, oy in -100.0..100.0_f32, oz in -100.0..100.0_f32,
            t in 0.0..100.0_f32,
        ) {
            let r = Ray::new(
                Point3f::new(ox, oy, oz),
                Vector3f::new(1.0, 2.0, 3.0),
                0.0,
                Float::INFINITY,
            );
            let p = r.at(t);
            prop_assert_eq!(p, r.o + r.d * t);
        }
    }

    #[test]
    fn info_signs() {
        let r = Ray::new(
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(1.0, -2.0, 0.5),
            0.0,
            Float::INFINITY,
        );
        let info = RayInfo::from(&r);
        assert_eq!(info.dir_is_neg, [false, true, false]);
        assert_eq!(info.inv_dir, Vector3f::new(1.0, -0.5, 2.0));
    }
}
