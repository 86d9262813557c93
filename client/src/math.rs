//! Conversions between the simulation's nalgebra vectors and Bevy's glam types.

use bevy::prelude::*;
use maze_shared::volume::Vec3 as SimVec3;
use nalgebra as na;

#[inline]
pub fn to_bevy(v: &SimVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// sRGB bytes to a Bevy color.
#[inline]
pub fn rgb(bytes: [u8; 3]) -> Color {
    Color::srgb_u8(bytes[0], bytes[1], bytes[2])
}

#[inline]
pub fn to_sim(v: Vec3) -> SimVec3 {
    na::Vector3::new(v.x, v.y, v.z)
}
