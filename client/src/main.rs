// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod animation;
mod camera;
mod doors;
mod hot_tub;
mod input;
mod math;
mod player;
mod simulation;
mod world;

use bevy::{log::LogPlugin, prelude::*};

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Window {
                        title: "Maze Walker".to_string(),
                        fit_canvas_to_parent: true,
                        ..default()
                    }
                    .into(),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,maze_shared=debug,maze_walker=debug".to_string(),
                    ..default()
                }),
        );

        app.add_plugins((
            input::plugin,
            simulation::plugin,
            world::plugin,
            doors::plugin,
            hot_tub::plugin,
            player::plugin,
            animation::plugin,
            camera::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
