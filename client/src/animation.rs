//! Character clip playback.
//!
//! Clips come from the character's glTF, matched by name. The graph is built once the glTF
//! and the scene's `AnimationPlayer` both exist; until then (or for clips the file lacks)
//! the selector simply has fewer clips to choose from.

use bevy::{gltf::Gltf, platform::collections::HashMap, prelude::*};
use maze_shared::{AnimationClip as Clip, ClipPlayer, LocomotionState, select_animation};

use crate::{
    player::{CHARACTER_ASSET, Player},
    simulation::{SimulationSet, SimulationState},
};

#[derive(Resource)]
struct CharacterGltf(Handle<Gltf>);

/// Graph nodes of the clips found in the glTF, on the entity holding the `AnimationPlayer`.
#[derive(Component, Debug)]
struct CharacterClips(HashMap<Clip, AnimationNodeIndex>);

/// [`ClipPlayer`] over a Bevy `AnimationPlayer`.
struct EngineClips<'a> {
    player: &'a mut AnimationPlayer,
    nodes: &'a CharacterClips,
}

impl ClipPlayer for EngineClips<'_> {
    fn has_clip(&self, clip: Clip) -> bool {
        self.nodes.0.contains_key(&clip)
    }

    fn play(&mut self, clip: Clip) {
        if let Some(&node) = self.nodes.0.get(&clip) {
            self.player.play(node).repeat();
        }
    }

    fn stop(&mut self, clip: Clip) {
        if let Some(&node) = self.nodes.0.get(&clip) {
            self.player.stop(node);
        }
    }

    fn is_playing(&self, clip: Clip) -> bool {
        self.nodes
            .0
            .get(&clip)
            .is_some_and(|&node| self.player.is_playing_animation(node))
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, load_character_gltf);
    app.add_systems(
        Update,
        (
            build_animation_graph
                .before(SimulationSet::Tick)
                .run_if(resource_exists::<SimulationState>),
            drive_animation.in_set(SimulationSet::Sync),
        ),
    );
}

fn load_character_gltf(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(CharacterGltf(asset_server.load(CHARACTER_ASSET)));
}

/// Exporters often prefix clip names with the armature, e.g. `Armature|Walk`.
fn clip_from_name(name: &str) -> Option<Clip> {
    Clip::from_name(name.rsplit('|').next().unwrap_or(name))
}

fn build_animation_graph(
    mut commands: Commands,
    mut sim: ResMut<SimulationState>,
    character: Res<CharacterGltf>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    player_root: Single<Entity, With<Player>>,
    children: Query<&Children>,
    players: Query<Entity, (With<AnimationPlayer>, Without<CharacterClips>)>,
) {
    let Some(gltf) = gltfs.get(&character.0) else {
        return;
    };
    let Some(player_entity) = children
        .iter_descendants(*player_root)
        .find(|&entity| players.contains(entity))
    else {
        return;
    };

    let mut graph = AnimationGraph::new();
    let mut nodes = HashMap::default();
    for (name, handle) in &gltf.named_animations {
        let Some(clip) = clip_from_name(name) else {
            debug!("ignoring animation {name}");
            continue;
        };
        nodes.insert(clip, graph.add_clip(handle.clone(), 1.0, graph.root));
    }

    let available: Vec<Clip> = nodes.keys().copied().collect();
    if available.len() < Clip::ALL.len() {
        warn!(
            "{CHARACTER_ASSET} provides {} of {} clips",
            available.len(),
            Clip::ALL.len()
        );
    }
    sim.0.set_clips_available(&available);

    commands.entity(player_entity).insert((
        AnimationGraphHandle(graphs.add(graph)),
        CharacterClips(nodes),
    ));
}

fn drive_animation(
    sim: Res<SimulationState>,
    mut players: Query<(&mut AnimationPlayer, &CharacterClips)>,
) {
    let Some(character) = sim.0.character.as_ref() else {
        return;
    };
    let state = LocomotionState::of(character);
    for (mut player, nodes) in &mut players {
        let mut clips = EngineClips {
            player: &mut *player,
            nodes,
        };
        select_animation(state, &mut clips);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_names_accept_armature_prefix() {
        assert_eq!(clip_from_name("Walk"), Some(Clip::Walk));
        assert_eq!(clip_from_name("Armature|Jump"), Some(Clip::Jump));
        assert_eq!(clip_from_name("mixamo.com"), None);
    }
}
