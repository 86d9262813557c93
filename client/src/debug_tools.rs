//! Debug overlays for native dev builds: perf counters plus a readout of simulation state.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::simulation::{LastTick, SimulationSet, SimulationState};

#[derive(Component)]
struct SimulationReadout;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, (spawn_perf_ui, spawn_readout));
    app.add_systems(Update, update_readout.in_set(SimulationSet::Sync));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn spawn_readout(mut commands: Commands) {
    commands.spawn((
        SimulationReadout,
        Text::default(),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

fn update_readout(
    sim: Res<SimulationState>,
    last: Res<LastTick>,
    mut readout: Single<&mut Text, With<SimulationReadout>>,
) {
    let mut lines = Vec::new();
    if let Some(c) = sim.0.character.as_ref() {
        lines.push(format!(
            "pos ({:.1}, {:.1}, {:.1}) vy {:.2} grounded {} crouch {}",
            c.position.x, c.position.y, c.position.z, c.vertical_velocity, c.grounded, c.crouching
        ));
    }
    let clip = last.0.clip.map_or("none", |clip| clip.name());
    lines.push(format!("clip {clip} zoom {:.2}", sim.0.camera.zoom));
    for door in &sim.0.world.doors {
        lines.push(format!("{} {:?} {:.2}", door.id, door.phase(), door.current_offset));
    }
    **readout = Text::new(lines.join("\n"));
}
