/*!
Collidable volumes and the axis-aligned overlap test used by the character controller.

Every static piece of geometry (wall segment or door panel) is stored as an oriented box:
half extents in local space plus a yaw-only pose. Collision never happens against the box
itself. Each frame the box is reduced to its world-space AABB (via parry's cuboid bounds)
and tested for overlap against the character's AABB.

Notes
- Touching counts as overlapping (closed intervals on every axis).
- Door boxes are described in their *closed* pose. [`CollidableVolume::aabb_lifted`] adds
  the door's vertical offset for the panel as drawn.
*/

use nalgebra as na;
use rapier3d::parry::{
    bounding_volume::{Aabb, BoundingVolume},
    shape::Cuboid,
};

use crate::door::DoorId;

pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;

/// What a volume is, and therefore when it blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeKind {
    /// Always solid.
    Wall,
    /// Solid while the referenced door is not fully open.
    Door(DoorId),
}

/// An oriented box placed in the world.
#[derive(Clone, Copy, Debug)]
pub struct CollidableVolume {
    pub kind: VolumeKind,
    /// Box centre in world space (closed pose for doors).
    pub center: Vec3,
    /// Local half extents before rotation.
    pub half_extents: Vec3,
    /// Rotation about +Y in radians.
    pub yaw: f32,
}

impl CollidableVolume {
    pub fn wall(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            kind: VolumeKind::Wall,
            center,
            half_extents,
            yaw: 0.0,
        }
    }

    pub fn door(door: DoorId, center: Vec3, half_extents: Vec3, yaw: f32) -> Self {
        Self {
            kind: VolumeKind::Door(door),
            center,
            half_extents,
            yaw,
        }
    }

    /// The door this volume belongs to, if any.
    #[inline]
    pub fn door_id(&self) -> Option<DoorId> {
        match self.kind {
            VolumeKind::Wall => None,
            VolumeKind::Door(id) => Some(id),
        }
    }

    /// World-space AABB with the box raised by `lift` along +Y.
    pub fn aabb_lifted(&self, lift: f32) -> Aabb {
        let iso = na::Isometry3::from_parts(
            na::Translation3::new(self.center.x, self.center.y + lift, self.center.z),
            na::UnitQuaternion::from_axis_angle(&Vec3::y_axis(), self.yaw),
        );
        Cuboid::new(self.half_extents).aabb(&iso)
    }

    /// World-space AABB in the box's resting pose.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.aabb_lifted(0.0)
    }
}

/// Axis-aligned box enclosing a character standing at `feet` with the given height.
///
/// The footprint is square (`half_width` on X and Z); the box spans `[feet.y, feet.y + height]`.
#[inline]
pub fn character_aabb(feet: Vec3, half_width: f32, height: f32) -> Aabb {
    Aabb::new(
        Point3::new(feet.x - half_width, feet.y, feet.z - half_width),
        Point3::new(feet.x + half_width, feet.y + height, feet.z + half_width),
    )
}

/// True if `subject` overlaps any of `solids`.
pub fn overlaps_any<'a>(subject: &Aabb, mut solids: impl Iterator<Item = &'a Aabb>) -> bool {
    solids.any(|solid| subject.intersects(solid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1.0e-4
    }

    #[test]
    fn wall_aabb_matches_extents() {
        let wall = CollidableVolume::wall(Vec3::new(10.0, 2.5, 0.0), Vec3::new(0.2, 2.5, 50.0));
        let aabb = wall.aabb();
        assert!(approx(aabb.mins.x, 9.8) && approx(aabb.maxs.x, 10.2));
        assert!(approx(aabb.mins.y, 0.0) && approx(aabb.maxs.y, 5.0));
        assert!(approx(aabb.mins.z, -50.0) && approx(aabb.maxs.z, 50.0));
    }

    #[test]
    fn quarter_turn_swaps_horizontal_extents() {
        let door = CollidableVolume::door(
            DoorId(0),
            Vec3::new(0.0, 2.5, 0.0),
            Vec3::new(0.25, 2.5, 5.0),
            FRAC_PI_2,
        );
        let aabb = door.aabb();
        assert!(approx(aabb.maxs.x - aabb.mins.x, 10.0));
        assert!(approx(aabb.maxs.z - aabb.mins.z, 0.5));
    }

    #[test]
    fn lift_moves_only_y() {
        let door = CollidableVolume::door(
            DoorId(0),
            Vec3::new(3.0, 2.5, 0.0),
            Vec3::new(0.25, 2.5, 5.0),
            0.0,
        );
        let resting = door.aabb();
        let lifted = door.aabb_lifted(5.0);
        assert!(approx(lifted.mins.y - resting.mins.y, 5.0));
        assert!(approx(lifted.mins.x, resting.mins.x));
        assert!(approx(lifted.maxs.z, resting.maxs.z));
    }

    #[test]
    fn touching_boxes_overlap() {
        let a = character_aabb(Vec3::new(0.0, 0.0, 0.0), 0.5, 1.8);
        let b = character_aabb(Vec3::new(1.0, 0.0, 0.0), 0.5, 1.8);
        assert!(overlaps_any(&a, [b].iter()));

        let c = character_aabb(Vec3::new(1.01, 0.0, 0.0), 0.5, 1.8);
        assert!(!overlaps_any(&a, [c].iter()));
    }

    #[test]
    fn character_box_spans_feet_to_head() {
        let aabb = character_aabb(Vec3::new(1.0, 2.0, 3.0), 0.4, 1.2);
        assert!(approx(aabb.mins.y, 2.0));
        assert!(approx(aabb.maxs.y, 3.2));
        assert!(approx(aabb.mins.z, 2.6));
    }
}
