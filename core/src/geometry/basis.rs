//! Orthonormal shading bases.

use super::Vector3f;
use crate::math::abs;

/// Builds an orthonormal coordinate system around a unit vector.
///
/// * `v1` - The given unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

/// An orthonormal basis whose local y-axis is the shading normal.
#[derive(Copy, Clone, Debug)]
pub struct ShadingBasis {
    /// Shading normal, the local y-axis.
    pub n: Vector3f,

    /// Tangent, the local x-axis.
    pub u: Vector3f,

    /// Bitangent, the local z-axis.
    pub v: Vector3f,
}

impl ShadingBasis {
    /// Creates a basis around the given unit normal.
    ///
    /// * `n` - The shading normal.
    pub fn from_normal(n: Vector3f) -> Self {
        debug_assert!(!n.has_nans());
        let (u, v) = coordinate_system(&n);
        Self { n, u, v }
    }

    /// Transforms a world-space vector into the local frame.
    ///
    /// * `w` - The world-space vector.
    pub fn to_local(&self, w: &Vector3f) -> Vector3f {
        Vector3f::new(w.dot(&self.u), w.dot(&self.n), w.dot(&self.v))
    }

    /// Transforms a local-frame vector back into world space.
    ///
    /// * `l` - The local-frame vector.
    pub fn to_world(&self, l: &Vector3f) -> Vector3f {
        self.u * l.x + self.n * l.y + self.v * l.z
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Float;
    use float_cmp::approx_eq;

    #[test]
    fn basis_is_orthonormal() {
        let basis = ShadingBasis::from_normal(Vector3f::new(1.0, 2.0, -0.5).normalize());
        assert!(approx_eq!(Float, basis.u.length(), 1.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, basis.v.length(), 1.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, basis.u.dot(&basis.n), 0.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, basis.v.dot(&basis.n), 0.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, basis.u.dot(&basis.v), 0.0, epsilon = 1e-5));
    }

    #[test]
    fn round_trip() {
        let basis = ShadingBasis::from_normal(Vector3f::new(0.3, 0.9, 0.1).normalize());
        let w = Vector3f::new(0.2, -0.7, 1.3);
        let back = basis.to_world(&basis.to_local(&w));
        assert!(approx_eq!(Float, back.x, w.x, epsilon = 1e-5));
        assert!(approx_eq!(Float, back.y, w.y, epsilon = 1e-5));
        assert!(approx_eq!(Float, back.z, w.z, epsilon = 1e-5));
    }

    #[test]
    fn normal_maps_to_local_y() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let basis = ShadingBasis::from_normal(n);
        let l = basis.to_local(&n);
        assert!(approx_eq!(Float, l.y, 1.0, epsilon = 1e-6));
    }
}
