//! Axis-aligned box geometry for bricks and the paddle
//!
//! A box is stored as a center plus half extents on each axis.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Full size on each axis
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            center: self.center,
            half_extents: self.half_extents + Vec3::splat(margin),
        }
    }

    /// Strict containment: points on the surface are outside
    pub fn contains_point(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x > min.x
            && point.x < max.x
            && point.y > min.y
            && point.y < max.y
            && point.z > min.z
            && point.z < max.z
    }

    /// Whether a sphere of `radius` at `center` overlaps the box, using the
    /// expanded-box test (corners are treated as square, not rounded)
    #[inline]
    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.expanded(radius).contains_point(center)
    }
}
