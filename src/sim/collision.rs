//! Bounding-box collision between the avatar and obstacles
//!
//! Everything is axis-aligned in world space. Boxes that merely touch on a
//! face do not collide.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box given by centre and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box standing on `base` (its bottom face centred on the point)
    pub fn resting_on(base: Vec3, half_extents: Vec3) -> Self {
        Self::new(base + Vec3::Y * half_extents.y, half_extents)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Strict overlap on all three axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        gap.cmplt(reach).all()
    }

    /// Per-axis penetration depth, or `None` when the boxes are apart
    pub fn penetration(&self, other: &Aabb) -> Option<Vec3> {
        if !self.overlaps(other) {
            return None;
        }
        let depth = self.max().min(other.max()) - self.min().max(other.min());
        Some(depth)
    }
}
