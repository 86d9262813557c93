//! Static scenery: ground, walls, lights and furniture.

use bevy::prelude::*;
use maze_shared::{FurnitureKind, VolumeKind, furniture};

use crate::{
    math::{to_bevy, yaw_rotation},
    simulation::SimulationState,
};

const FLOOR_SIZE: f32 = 800.0;
/// The floor is centred under the middle of the maze.
const FLOOR_CENTER: Vec3 = Vec3::new(300.0, 0.0, 0.0);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb_u8(0xad, 0xd8, 0xe6)));
    app.add_systems(
        Startup,
        (spawn_ground, spawn_lights, spawn_walls, spawn_furniture),
    );
}

fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Ground"),
        Transform::from_translation(FLOOR_CENTER),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0xa6, 0x7d, 0x53),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(35.0, 100.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("Fill light"),
        DirectionalLight {
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 10.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_walls(
    mut commands: Commands,
    sim: Option<Res<SimulationState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(sim) = sim else {
        return;
    };

    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xc8, 0xc0, 0xb0),
        perceptual_roughness: 0.9,
        metallic: 0.1,
        ..default()
    });

    let walls = sim
        .0
        .world
        .volumes()
        .iter()
        .filter(|v| v.kind == VolumeKind::Wall);
    for wall in walls {
        let size = to_bevy(&wall.half_extents) * 2.0;
        commands.spawn((
            Name::new("Wall"),
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(to_bevy(&wall.center))
                .with_rotation(yaw_rotation(wall.yaw)),
        ));
    }
}

fn spawn_furniture(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let frame = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x8b, 0x45, 0x13),
        perceptual_roughness: 0.9,
        metallic: 0.1,
        ..default()
    });
    let cushion = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xa0, 0x52, 0x2d),
        perceptual_roughness: 0.8,
        metallic: 0.1,
        ..default()
    });
    let tub = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0x00, 0xbf, 0xff, 0xcc),
        perceptual_roughness: 0.2,
        metallic: 0.8,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let base = meshes.add(Cuboid::new(8.0, 1.0, 3.0));
    let back = meshes.add(Cuboid::new(8.0, 3.0, 1.0));
    let arm = meshes.add(Cuboid::new(1.0, 2.0, 3.0));

    for prop in furniture() {
        let transform = Transform::from_translation(to_bevy(&prop.position))
            .with_rotation(yaw_rotation(prop.yaw));
        match prop.kind {
            FurnitureKind::HotTub => {
                commands.spawn((
                    Name::new("Hot tub"),
                    Mesh3d(meshes.add(Cylinder::new(10.0, 3.0))),
                    MeshMaterial3d(tub.clone()),
                    transform.with_translation(transform.translation + Vec3::Y * 1.5),
                ));
            }
            FurnitureKind::Sofa => {
                commands
                    .spawn((Name::new("Sofa"), transform, Visibility::default()))
                    .with_children(|sofa| {
                        sofa.spawn((
                            Mesh3d(base.clone()),
                            MeshMaterial3d(frame.clone()),
                            Transform::from_xyz(0.0, 1.5, 0.0),
                        ));
                        sofa.spawn((
                            Mesh3d(back.clone()),
                            MeshMaterial3d(cushion.clone()),
                            Transform::from_xyz(0.0, 3.0, -1.5),
                        ));
                        for x in [-3.5, 3.5] {
                            sofa.spawn((
                                Mesh3d(arm.clone()),
                                MeshMaterial3d(frame.clone()),
                                Transform::from_xyz(x, 2.5, 0.0),
                            ));
                        }
                    });
            }
        }
    }
}
