//! Door panels and buttons, synced from the simulation each frame.

use bevy::prelude::*;
use maze_shared::{ButtonId, DoorId};

use crate::{
    math::{rgb, to_bevy, yaw_rotation},
    simulation::{SimulationSet, SimulationState},
};

/// Rendered panel of a door.
#[derive(Component, Debug)]
struct DoorPanel {
    door: DoorId,
}

#[derive(Component, Debug)]
struct ButtonVisual {
    button: ButtonId,
    material: Handle<StandardMaterial>,
    highlighted: bool,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_doors_and_buttons);
    app.add_systems(
        Update,
        (sync_door_panels, sync_button_colors).in_set(SimulationSet::Sync),
    );
}

fn spawn_doors_and_buttons(
    mut commands: Commands,
    sim: Option<Res<SimulationState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(sim) = sim else {
        return;
    };
    let world = &sim.0.world;

    let panel_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x3a, 0x2a, 0x1a),
        perceptual_roughness: 0.7,
        metallic: 0.3,
        ..default()
    });
    let handle_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xc0, 0xc0, 0xc0),
        perceptual_roughness: 0.2,
        metallic: 0.8,
        ..default()
    });
    let handle_mesh = meshes.add(Cylinder::new(0.2, 0.8));

    for door in &world.doors {
        let Some(volume) = world.door_volume(door.id) else {
            warn!("{} has no panel volume", door.id);
            continue;
        };
        let size = to_bevy(&volume.half_extents) * 2.0;
        let center = to_bevy(&volume.center);
        commands
            .spawn((
                Name::new(door.id.to_string()),
                DoorPanel { door: door.id },
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(panel_material.clone()),
                Transform::from_translation(center).with_rotation(yaw_rotation(volume.yaw)),
            ))
            .with_children(|panel| {
                panel.spawn((
                    Mesh3d(handle_mesh.clone()),
                    MeshMaterial3d(handle_material.clone()),
                    Transform::from_xyz(0.4, 0.0, 3.0)
                        .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                ));
            });
    }

    let button_mesh = meshes.add(Cuboid::new(0.8, 0.8, 0.2));
    for button in &world.buttons {
        let color = rgb(button.display_rgb());
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 0.5,
            ..default()
        });
        commands.spawn((
            Name::new(format!("Button {}", button.id.0 + 1)),
            ButtonVisual {
                button: button.id,
                material: material.clone(),
                highlighted: button.highlighted,
            },
            Mesh3d(button_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(to_bevy(&button.position)),
        ));
    }
}

fn sync_door_panels(sim: Res<SimulationState>, mut panels: Query<(&DoorPanel, &mut Transform)>) {
    let world = &sim.0.world;
    for (panel, mut transform) in &mut panels {
        if let Some(volume) = world.door_volume(panel.door) {
            transform.translation.y = world.volume_aabb(volume).center().y;
        }
    }
}

fn sync_button_colors(
    sim: Res<SimulationState>,
    mut visuals: Query<&mut ButtonVisual>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for mut visual in &mut visuals {
        let Some(button) = sim.0.world.buttons.get(visual.button.0 as usize) else {
            continue;
        };
        if button.highlighted == visual.highlighted {
            continue;
        }
        visual.highlighted = button.highlighted;
        if let Some(material) = materials.get_mut(&visual.material) {
            let color = rgb(button.display_rgb());
            material.base_color = color;
            material.emissive = color.to_linear() * 0.5;
        }
    }
}
