//! Axis-aligned bounding-volume intersection between the player and traffic
//!
//! Volumes are never stored: each check derives a world-space AABB from the
//! entity's current transform and a fixed local extent, so a tilted or
//! rotated car still gets a conservative box around it.

use glam::{Mat4, Vec3};

/// Player car local half extents (body + wheels + spoiler)
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(1.55, 1.0, 2.5);
/// Traffic car local half extents (3.5 x 2 x 6 box)
pub const TRAFFIC_HALF_EXTENTS: Vec3 = Vec3::new(1.75, 1.0, 3.0);

/// World-space axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Derive the world AABB of a local box under an arbitrary transform by
    /// running all eight corners through it.
    pub fn from_transform(transform: &Mat4, half_extents: Vec3) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { -half_extents.x } else { half_extents.x },
                if i & 2 == 0 { -half_extents.y } else { half_extents.y },
                if i & 4 == 0 { -half_extents.z } else { half_extents.z },
            );
            let world = transform.transform_point3(corner);
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }

    /// AABB for an unrotated entity at `center`.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Overlap test on all three axes. Touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
