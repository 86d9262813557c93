use bevy::prelude::*;

use crate::{
    math::{to_bevy, to_sim, yaw_rotation},
    simulation::{SimulationSet, SimulationState},
};

pub const CHARACTER_ASSET: &str = "character.glb";
const SPAWN_POINT: Vec3 = Vec3::ZERO;

/// Root entity of the walking character. The glTF scene hangs below it.
#[derive(Component, Debug)]
pub struct Player;

/// Light that trails the character.
#[derive(Component, Debug)]
struct PlayerSpotLight;

const SPOT_LIGHT_OFFSET: Vec3 = Vec3::new(10.0, -1.0, 10.0);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(
        Update,
        (sync_player_transform, follow_spot_light)
            .chain()
            .in_set(SimulationSet::Sync),
    );
}

fn spawn_player(
    mut commands: Commands,
    sim: Option<ResMut<SimulationState>>,
    asset_server: Res<AssetServer>,
) {
    let Some(mut sim) = sim else {
        return;
    };
    sim.0.spawn_character(to_sim(SPAWN_POINT));

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Transform::from_translation(SPAWN_POINT),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn(SceneRoot(
                asset_server.load(GltfAssetLabel::Scene(0).from_asset(CHARACTER_ASSET)),
            ));
        });

    commands.spawn((
        Name::new("Player spot light"),
        PlayerSpotLight,
        SpotLight {
            intensity: 900_000.0,
            range: 1000.0,
            outer_angle: std::f32::consts::FRAC_PI_3,
            inner_angle: std::f32::consts::FRAC_PI_3 * 0.2,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SPAWN_POINT + SPOT_LIGHT_OFFSET)
            .looking_at(SPAWN_POINT, Vec3::Y),
    ));
}

fn sync_player_transform(
    sim: Res<SimulationState>,
    mut player: Single<&mut Transform, With<Player>>,
) {
    let Some(character) = sim.0.character.as_ref() else {
        return;
    };
    player.translation = to_bevy(&character.position);
    player.rotation = yaw_rotation(character.yaw);
}

fn follow_spot_light(
    player: Single<&Transform, With<Player>>,
    mut light: Single<&mut Transform, (With<PlayerSpotLight>, Without<Player>)>,
) {
    let target = player.translation;
    **light = Transform::from_translation(target + SPOT_LIGHT_OFFSET).looking_at(target, Vec3::Y);
}
