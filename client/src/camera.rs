use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    input::PlayerAction,
    math::to_bevy,
    simulation::{LastTick, SimulationSet},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, grab_pointer.before(SimulationSet::Tick));
    app.add_systems(Update, follow_player.in_set(SimulationSet::Sync));
}

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
            ..default()
        },
        Transform::from_xyz(0.0, 5.0, 0.0).looking_at(Vec3::new(0.0, 1.44, 0.0), Vec3::Z),
        DistanceFog {
            color: Color::srgba(0.68, 0.85, 0.9, 1.0),
            falloff: FogFalloff::Linear {
                start: 300.0,
                end: 900.0,
            },
            ..default()
        },
    ));
}

/// Left click captures the pointer for mouse look; Escape releases it.
fn grab_pointer(
    actions: Res<ActionState<PlayerAction>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if actions.just_pressed(&PlayerAction::ReleasePointer) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if actions.just_pressed(&PlayerAction::LockPointer)
        && cursor.grab_mode == CursorGrabMode::None
    {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

fn follow_player(last: Res<LastTick>, mut camera: Single<&mut Transform, With<Camera3d>>) {
    let Some(pose) = last.0.camera else {
        return;
    };
    **camera = Transform::from_translation(to_bevy(&pose.position))
        .looking_at(to_bevy(&pose.look_at), to_bevy(&pose.up));
}
