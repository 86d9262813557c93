use bevy::prelude::*;
use maze_shared::hot_tub::{BUBBLE_SPAWN_HEIGHT, TUB_CENTER_X, TUB_CENTER_Z};

use crate::{
    math::to_bevy,
    simulation::{SimulationSet, SimulationState},
};

#[derive(Component, Debug)]
struct BubbleVisual(usize);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_water_and_bubbles);
    app.add_systems(Update, sync_bubbles.in_set(SimulationSet::Sync));
}

fn spawn_water_and_bubbles(
    mut commands: Commands,
    sim: Option<Res<SimulationState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(sim) = sim else {
        return;
    };

    commands.spawn((
        Name::new("Hot tub water"),
        Mesh3d(meshes.add(Cylinder::new(9.5, 0.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.0, 1.0, 1.0, 0.6),
            perceptual_roughness: 0.1,
            metallic: 0.3,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(TUB_CENTER_X, BUBBLE_SPAWN_HEIGHT, TUB_CENTER_Z),
    ));

    let mesh = meshes.add(Sphere::new(0.2));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.7),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    for (i, bubble) in sim.0.hot_tub.bubbles.iter().enumerate() {
        commands.spawn((
            BubbleVisual(i),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(to_bevy(&bubble.position)),
        ));
    }
}

fn sync_bubbles(sim: Res<SimulationState>, mut bubbles: Query<(&BubbleVisual, &mut Transform)>) {
    for (visual, mut transform) in &mut bubbles {
        if let Some(bubble) = sim.0.hot_tub.bubbles.get(visual.0) {
            transform.translation = to_bevy(&bubble.position);
        }
    }
}
