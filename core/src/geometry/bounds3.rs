//! 3-D Axis Aligned Bounding Boxes.

use super::{Point3, Point3f, Ray, RayInfo};
use crate::math::{max, min, Float};
use num_traits::Num;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3<T> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

impl<T: Num + PartialOrd + Copy> Bounds3<T> {
    /// Creates a new 3-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Self {
            p_min: Point3::new(min(p1.x, p2.x), min(p1.y, p2.y), min(p1.z, p2.z)),
            p_max: Point3::new(max(p1.x, p2.x), max(p1.y, p2.y), max(p1.z, p2.z)),
        }
    }

    /// Extends the bounding box to contain the given point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3<T>) -> Self {
        Self {
            p_min: Point3::new(
                min(self.p_min.x, p.x),
                min(self.p_min.y, p.y),
                min(self.p_min.z, p.z),
            ),
            p_max: Point3::new(
                max(self.p_max.x, p.x),
                max(self.p_max.y, p.y),
                max(self.p_max.z, p.z),
            ),
        }
    }

    /// Extends the bounding box to contain another bounding box.
    ///
    /// * `other` - The other bounding box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: Point3::new(
                min(self.p_min.x, other.p_min.x),
                min(self.p_min.y, other.p_min.y),
                min(self.p_min.z, other.p_min.z),
            ),
            p_max: Point3::new(
                max(self.p_max.x, other.p_max.x),
                max(self.p_max.y, other.p_max.y),
                max(self.p_max.z, other.p_max.z),
            ),
        }
    }
}

impl Bounds3f {
    /// An empty bounding box. It can be grown iteratively and never registers
    /// a ray intersection.
    pub const EMPTY: Self = Self {
        p_min: Point3 {
            x: Float::INFINITY,
            y: Float::INFINITY,
            z: Float::INFINITY,
        },
        p_max: Point3 {
            x: -Float::INFINITY,
            y: -Float::INFINITY,
            z: -Float::INFINITY,
        },
    };

    /// Intersects a ray against the slabs of the bounding box and returns the
    /// parametric interval clipped to the ray's `[t_min, t_max]`, or `None`
    /// when the ray misses.
    ///
    /// * `ray`      - The ray.
    /// * `ray_info` - Precomputed reciprocal-direction data for `ray`.
    pub fn intersect_ray(&self, ray: &Ray, ray_info: &RayInfo) -> Option<(Float, Float)> {
        let mut t0 = ray.t_min;
        let mut t1 = ray.t_max;

        for axis in 0..3 {
            let (near, far) = if ray_info.dir_is_neg[axis] {
                (self.p_max[axis], self.p_min[axis])
            } else {
                (self.p_min[axis], self.p_max[axis])
            };

            t0 = max(t0, (near - ray.o[axis]) * ray_info.inv_dir[axis]);
            t1 = min(t1, (far - ray.o[axis]) * ray_info.inv_dir[axis]);
        }

        // Inclusive comparison so flat boxes still register hits.
        if t0 <= t1 {
            Some((t0, t1))
        } else {
            None
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
