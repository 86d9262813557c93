/*!
Static world registry: walls, doors and buttons.

The maze is a fixed layout of axis-aligned wall segments, six sliding doors and six
buttons. Construction is a one-shot step; afterwards the *set* of volumes never changes.
Only door offsets and button/door flags move during a session. A door that is not fully
open collides with its closed-pose box; the offset only moves the panel that is drawn.

Layout conventions
- World units; +Y up; the ground plane is y = 0.
- Walls are 5 units tall (centred at y = 2.5) and 0.4 units thick on their short axis.
- A door panel is 0.5 x 5 x 10, standing on the ground when closed, rotated about +Y by
  the door's yaw. The panel sits 0.4 units in front of the door frame origin.
- Buttons are 1.5 units above the ground, a little in front of the wall they're on.
*/

use std::f32::consts::FRAC_PI_2;

use rapier3d::parry::bounding_volume::{Aabb, BoundingVolume};
use thiserror::Error;

use crate::{
    button::{Button, ButtonColor, ButtonId},
    door::{Door, DoorId},
    volume::{CollidableVolume, Vec3, VolumeKind},
};

pub const WALL_HEIGHT: f32 = 5.0;
pub const WALL_THICKNESS: f32 = 0.4;
pub const DOOR_HALF_EXTENTS: [f32; 3] = [0.25, 2.5, 5.0];
/// Panel offset from the frame origin along the frame's local +X.
pub const DOOR_PANEL_INSET: f32 = 0.4;
pub const BUTTON_HEIGHT: f32 = 1.5;

/// Wall segments as `(x1, z1, x2, z2)`.
const WALL_SEGMENTS: [(f32, f32, f32, f32); 42] = [
    // Room 1, start
    (-50.0, -50.0, -50.0, 50.0),
    (50.0, -50.0, 50.0, -5.0),
    (50.0, 5.0, 50.0, 50.0),
    (-50.0, -50.0, 50.0, -50.0),
    (-50.0, 50.0, 50.0, 50.0),
    // Corridor 1
    (50.0, -5.0, 150.0, -5.0),
    (50.0, 5.0, 150.0, 5.0),
    // Room 2, junction. North/south walls leave a 10-unit gap for corridors 3 and 4.
    (150.0, -50.0, 150.0, -5.0),
    (150.0, 5.0, 150.0, 50.0),
    (250.0, -50.0, 250.0, -5.0),
    (250.0, 5.0, 250.0, 50.0),
    (150.0, -50.0, 195.0, -50.0),
    (205.0, -50.0, 250.0, -50.0),
    (150.0, 50.0, 195.0, 50.0),
    (205.0, 50.0, 250.0, 50.0),
    // Corridor 2
    (250.0, -5.0, 350.0, -5.0),
    (250.0, 5.0, 350.0, 5.0),
    // Corridor 3, north
    (195.0, 50.0, 195.0, 150.0),
    (205.0, 50.0, 205.0, 150.0),
    // Corridor 4, south
    (195.0, -50.0, 195.0, -150.0),
    (205.0, -50.0, 205.0, -150.0),
    // Room 3
    (350.0, -50.0, 350.0, -5.0),
    (350.0, 5.0, 350.0, 50.0),
    (450.0, -50.0, 450.0, 50.0),
    (350.0, -50.0, 450.0, -50.0),
    (350.0, 50.0, 450.0, 50.0),
    // Room 4, north
    (150.0, 150.0, 150.0, 250.0),
    (250.0, 150.0, 250.0, 250.0),
    (150.0, 150.0, 195.0, 150.0),
    (205.0, 150.0, 250.0, 150.0),
    (150.0, 250.0, 250.0, 250.0),
    // Room 5, south
    (150.0, -250.0, 150.0, -150.0),
    (250.0, -250.0, 250.0, -150.0),
    (150.0, -250.0, 250.0, -250.0),
    (150.0, -150.0, 195.0, -150.0),
    (205.0, -150.0, 250.0, -150.0),
    // Corridor 5
    (450.0, -5.0, 550.0, -5.0),
    (450.0, 5.0, 550.0, 5.0),
    // Final room, hot tub
    (550.0, -50.0, 550.0, 50.0),
    (650.0, -50.0, 650.0, 50.0),
    (550.0, -50.0, 650.0, -50.0),
    (550.0, 50.0, 650.0, 50.0),
];

/// Door frame origins as `(x, z, yaw)`.
const DOOR_FRAMES: [(f32, f32, f32); 6] = [
    (50.0, 0.0, 0.0),
    (200.0, -50.0, FRAC_PI_2),
    (200.0, 50.0, FRAC_PI_2),
    (250.0, 0.0, 0.0),
    (450.0, 0.0, 0.0),
    (550.0, 0.0, 0.0),
];

/// Buttons as `(x, z, door index)`; colors follow [`ButtonColor::ALL`].
const BUTTON_PLACEMENTS: [(f32, f32, u8); 6] = [
    (0.0, -49.0, 0),
    (0.0, 49.0, 1),
    (200.0, 100.0, 2),
    (300.0, 49.5, 3),
    (400.0, -49.5, 4),
    (500.0, 49.5, 5),
];

/// Decorative furniture kinds for the final room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FurnitureKind {
    HotTub,
    Sofa,
}

/// A decorative (non-collidable) prop.
#[derive(Clone, Copy, Debug)]
pub struct Furniture {
    pub kind: FurnitureKind,
    /// Base centre on the ground.
    pub position: Vec3,
    pub yaw: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldBuildError {
    #[error("{owner} references unknown {door}")]
    UnknownDoor { owner: String, door: DoorId },
    #[error("door at index {index} carries id {door}")]
    DoorIdMismatch { index: usize, door: DoorId },
}

/// Immutable collision registry plus the mutable door and button records it references.
#[derive(Clone, Debug)]
pub struct StaticWorld {
    volumes: Vec<CollidableVolume>,
    pub doors: Vec<Door>,
    pub buttons: Vec<Button>,
}

impl StaticWorld {
    /// Assemble a world, checking that every door reference resolves.
    pub fn from_parts(
        volumes: Vec<CollidableVolume>,
        doors: Vec<Door>,
        buttons: Vec<Button>,
    ) -> Result<Self, WorldBuildError> {
        for (index, door) in doors.iter().enumerate() {
            if door.id.index() != index {
                return Err(WorldBuildError::DoorIdMismatch {
                    index,
                    door: door.id,
                });
            }
        }

        for (i, volume) in volumes.iter().enumerate() {
            if let Some(door) = volume.door_id() {
                if door.index() >= doors.len() {
                    return Err(WorldBuildError::UnknownDoor {
                        owner: format!("volume {i}"),
                        door,
                    });
                }
            }
        }

        for button in &buttons {
            if let Some(door) = button.door {
                if door.index() >= doors.len() {
                    return Err(WorldBuildError::UnknownDoor {
                        owner: format!("button {}", button.id.0),
                        door,
                    });
                }
            }
        }

        Ok(Self {
            volumes,
            doors,
            buttons,
        })
    }

    #[inline]
    pub fn volumes(&self) -> &[CollidableVolume] {
        &self.volumes
    }

    #[inline]
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.index())
    }

    /// World-space AABB of a volume as drawn, accounting for door travel.
    pub fn volume_aabb(&self, volume: &CollidableVolume) -> Aabb {
        let lift = volume
            .door_id()
            .and_then(|id| self.door(id))
            .map_or(0.0, |door| door.current_offset);
        volume.aabb_lifted(lift)
    }

    /// Whether a volume currently blocks movement.
    pub fn is_solid(&self, volume: &CollidableVolume) -> bool {
        match volume.kind {
            VolumeKind::Wall => true,
            VolumeKind::Door(id) => self.door(id).is_none_or(Door::is_solid),
        }
    }

    /// AABBs of every volume that currently blocks movement.
    ///
    /// A solid door blocks its whole doorway from the ground up, however far the panel has
    /// risen, so the closed-pose box is used.
    pub fn solid_aabbs(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.volumes
            .iter()
            .filter(|v| self.is_solid(v))
            .map(CollidableVolume::aabb)
    }

    /// Move every door toward its target.
    ///
    /// A door heading closed holds its offset while `occupant` stands in its doorway, so it
    /// never turns solid around the character.
    pub fn advance_doors(&mut self, delta: f32, occupant: Option<&Aabb>) {
        for door in &mut self.doors {
            let blocked = !door.is_open_target
                && occupant.is_some_and(|occupant| {
                    self.volumes
                        .iter()
                        .filter(|v| v.door_id() == Some(door.id))
                        .any(|v| v.aabb().intersects(occupant))
                });
            if !blocked {
                door.advance(delta);
            }
        }
    }

    /// Volume belonging to a door.
    pub fn door_volume(&self, id: DoorId) -> Option<&CollidableVolume> {
        self.volumes.iter().find(|v| v.door_id() == Some(id))
    }
}

/// Wall segment between two ground points, 5 units tall and 0.4 thick.
///
/// The thin axis is whichever of X/Z the segment doesn't span.
pub fn wall_segment(x1: f32, z1: f32, x2: f32, z2: f32) -> CollidableVolume {
    let half_x = ((x2 - x1).abs() * 0.5).max(WALL_THICKNESS * 0.5);
    let half_z = ((z2 - z1).abs() * 0.5).max(WALL_THICKNESS * 0.5);
    CollidableVolume::wall(
        Vec3::new((x1 + x2) * 0.5, WALL_HEIGHT * 0.5, (z1 + z2) * 0.5),
        Vec3::new(half_x, WALL_HEIGHT * 0.5, half_z),
    )
}

/// Closed door panel for a frame at `(x, z)` rotated by `yaw`.
pub fn door_panel(id: DoorId, x: f32, z: f32, yaw: f32) -> CollidableVolume {
    let [hx, hy, hz] = DOOR_HALF_EXTENTS;
    // Local +X rotated about +Y.
    let inset = Vec3::new(yaw.cos(), 0.0, -yaw.sin()) * DOOR_PANEL_INSET;
    CollidableVolume::door(
        id,
        Vec3::new(x + inset.x, hy, z + inset.z),
        Vec3::new(hx, hy, hz),
        yaw,
    )
}

/// Build the maze.
pub fn build_world() -> Result<StaticWorld, WorldBuildError> {
    let mut volumes: Vec<CollidableVolume> = WALL_SEGMENTS
        .iter()
        .map(|&(x1, z1, x2, z2)| wall_segment(x1, z1, x2, z2))
        .collect();

    let mut doors = Vec::with_capacity(DOOR_FRAMES.len());
    for (i, &(x, z, yaw)) in DOOR_FRAMES.iter().enumerate() {
        let id = DoorId(i as u8);
        volumes.push(door_panel(id, x, z, yaw));
        doors.push(Door::new(id));
    }

    let buttons = BUTTON_PLACEMENTS
        .iter()
        .zip(ButtonColor::ALL)
        .enumerate()
        .map(|(i, (&(x, z, door), color))| {
            Button::new(
                ButtonId(i as u8),
                Vec3::new(x, BUTTON_HEIGHT, z),
                color,
                Some(DoorId(door)),
            )
        })
        .collect();

    let world = StaticWorld::from_parts(volumes, doors, buttons)?;
    log::info!(
        "built maze: {} volumes, {} doors, {} buttons",
        world.volumes.len(),
        world.doors.len(),
        world.buttons.len()
    );
    Ok(world)
}

/// Props in the final room.
pub fn furniture() -> Vec<Furniture> {
    use std::f32::consts::PI;

    let mut props = vec![Furniture {
        kind: FurnitureKind::HotTub,
        position: Vec3::new(600.0, 0.0, 0.0),
        yaw: 0.0,
    }];
    props.extend(
        [(585.0, -30.0, 0.0), (615.0, -30.0, 0.0), (585.0, 30.0, PI), (615.0, 30.0, PI)]
            .into_iter()
            .map(|(x, z, yaw)| Furniture {
                kind: FurnitureKind::Sofa,
                position: Vec3::new(x, 0.0, z),
                yaw,
            }),
    );
    props
}
