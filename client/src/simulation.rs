//! Owns the maze simulation and ticks it once per frame.
//!
//! Everything the renderer shows is read back from [`SimulationState`] and [`LastTick`] by
//! systems in [`SimulationSet::Sync`], which run after the tick.

use bevy::{
    input::mouse::AccumulatedMouseScroll,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use leafwing_input_manager::prelude::ActionState;
use maze_shared::{
    DEFAULT_SEED, MAX_FRAME_DT_S, Simulation, SimulationSettings, TickReport, build_world,
};

use crate::input::{PlayerAction, frame_input};

#[derive(Resource)]
pub struct SimulationState(pub Simulation);

/// Report from the most recent tick.
#[derive(Resource, Default)]
pub struct LastTick(pub TickReport);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Tick,
    Sync,
}

pub(super) fn plugin(app: &mut App) {
    match build_world() {
        Ok(world) => {
            let simulation = Simulation::new(world, SimulationSettings::default(), DEFAULT_SEED);
            app.insert_resource(SimulationState(simulation));
        }
        Err(err) => {
            error!("failed to build maze: {err}");
            app.add_systems(Startup, exit_with_error);
        }
    }

    app.init_resource::<LastTick>();
    app.configure_sets(
        Update,
        (SimulationSet::Tick, SimulationSet::Sync)
            .chain()
            .run_if(resource_exists::<SimulationState>),
    );
    app.add_systems(Update, tick.in_set(SimulationSet::Tick));
}

fn exit_with_error(mut exit: MessageWriter<AppExit>) {
    exit.write(AppExit::error());
}

fn tick(
    mut sim: ResMut<SimulationState>,
    mut last: ResMut<LastTick>,
    actions: Res<ActionState<PlayerAction>>,
    scroll: Res<AccumulatedMouseScroll>,
    cursor: Single<&CursorOptions, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    let pointer_locked = cursor.grab_mode != CursorGrabMode::None;
    let frame = frame_input(&actions, scroll.unit, pointer_locked);
    let dt = time.delta_secs().min(MAX_FRAME_DT_S);
    last.0 = sim.0.tick(&frame, dt);
}
