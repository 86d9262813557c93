/*!
Per-frame orchestration.

[`Simulation::tick`] is the only entry point that mutates state. One tick runs, in order:

1. camera look and zoom from the frame's pointer input
2. button cooldowns
3. door travel
4. character step (gravity, movement, collision rollback)
5. button interaction, from the post-step position
6. animation selection
7. camera pose
8. hot tub bubbles

Until a character is spawned, steps 4 to 7 are skipped. Doors, cooldowns and bubbles
still advance so the scene keeps animating while assets load.
*/

use crate::{
    animation::{AnimationClip, ClipPlayer, ClipSet, LocomotionState, select_animation},
    button::{ButtonPress, check_interactions, tick_cooldowns},
    camera::{CameraPose, CameraRig, CameraSettings},
    controller::{CharacterState, ControllerSettings, StepOutcome, step_character},
    door::{DoorId, DoorPhase},
    hot_tub::HotTub,
    input::{Control, FrameInput},
    volume::Vec3,
    world::StaticWorld,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationSettings {
    pub controller: ControllerSettings,
    pub camera: CameraSettings,
}

/// A door moved from one phase to another during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoorPhaseChange {
    pub door: DoorId,
    pub from: DoorPhase,
    pub to: DoorPhase,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// `None` while no character is spawned.
    pub step: Option<StepOutcome>,
    pub presses: Vec<ButtonPress>,
    pub door_changes: Vec<DoorPhaseChange>,
    /// Clip playing after selection.
    pub clip: Option<AnimationClip>,
    pub camera: Option<CameraPose>,
}

pub struct Simulation {
    pub world: StaticWorld,
    pub settings: SimulationSettings,
    pub camera: CameraRig,
    pub character: Option<CharacterState>,
    pub hot_tub: HotTub,
    clips: ClipSet,
    door_phases: Vec<DoorPhase>,
    reported_unspawned: bool,
}

impl Simulation {
    pub fn new(world: StaticWorld, settings: SimulationSettings, seed: u64) -> Self {
        let door_phases = world.doors.iter().map(|d| d.phase()).collect();
        Self {
            camera: CameraRig::new(settings.camera),
            world,
            settings,
            character: None,
            hot_tub: HotTub::new(seed),
            clips: ClipSet::default(),
            door_phases,
            reported_unspawned: false,
        }
    }

    /// Place the character (feet position). Replaces any existing character.
    pub fn spawn_character(&mut self, position: Vec3) {
        log::info!("character spawned at {position:?}");
        self.character = Some(CharacterState::spawn(position, &self.settings.controller));
    }

    /// Register clips that finished loading. Clips not listed keep their current availability.
    pub fn set_clips_available(&mut self, clips: &[AnimationClip]) {
        for &clip in clips {
            if !self.clips.has_clip(clip) {
                log::debug!("animation clip {} available", clip.name());
            }
            self.clips.insert(clip);
        }
    }

    #[inline]
    pub fn clips(&self) -> &ClipSet {
        &self.clips
    }

    pub fn tick(&mut self, frame: &FrameInput, delta: f32) -> TickReport {
        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            log::warn!("ignoring invalid frame delta {delta}");
            0.0
        };
        let mut report = TickReport::default();

        self.camera.apply_look(&frame.look, frame.pointer_locked);
        self.camera.apply_zoom(frame.look.zoom_delta);

        tick_cooldowns(&mut self.world.buttons, delta);
        self.world.advance_doors(
            delta,
            self.character.as_ref().map(CharacterState::collision_box),
        );

        match self.character.as_mut() {
            Some(character) => {
                let outcome = step_character(
                    character,
                    &frame.controls,
                    self.camera.yaw,
                    &self.world,
                    &self.settings.controller,
                    delta,
                );
                report.step = Some(outcome);

                report.presses = check_interactions(
                    &character.position,
                    frame.controls.has(Control::Interact),
                    &mut self.world.buttons,
                    &mut self.world.doors,
                );

                report.clip = select_animation(LocomotionState::of(character), &mut self.clips);
                report.camera = Some(self.camera.pose(&character.position, character.height));
            }
            None if !self.reported_unspawned => {
                log::debug!("no character spawned yet, skipping movement");
                self.reported_unspawned = true;
            }
            None => {}
        }

        self.hot_tub.update(delta);
        report.door_changes = self.collect_door_changes();
        report
    }

    fn collect_door_changes(&mut self) -> Vec<DoorPhaseChange> {
        let mut changes = Vec::new();
        for (door, last) in self.world.doors.iter().zip(self.door_phases.iter_mut()) {
            let phase = door.phase();
            if phase != *last {
                log::debug!("{} {:?} -> {:?}", door.id, last, phase);
                changes.push(DoorPhaseChange {
                    door: door.id,
                    from: *last,
                    to: phase,
                });
                *last = phase;
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::build_world;

    fn simulation() -> Simulation {
        let world = build_world().expect("maze builds");
        Simulation::new(world, SimulationSettings::default(), 1)
    }

    #[test]
    fn unspawned_character_is_a_no_op() {
        let mut sim = simulation();
        let report = sim.tick(&FrameInput::with_controls(&[Control::Forward]), 0.1);
        assert!(report.step.is_none());
        assert!(report.clip.is_none());
        assert!(report.camera.is_none());
        assert!(sim.character.is_none());
    }

    #[test]
    fn idle_character_plays_idle_once_clips_load() {
        let mut sim = simulation();
        sim.spawn_character(Vec3::zeros());

        let report = sim.tick(&FrameInput::default(), 1.0 / 60.0);
        assert_eq!(report.clip, None);

        sim.set_clips_available(&AnimationClip::ALL);
        let report = sim.tick(&FrameInput::default(), 1.0 / 60.0);
        assert_eq!(report.clip, Some(AnimationClip::Idle));
        assert_eq!(sim.clips().playing().count(), 1);
    }

    #[test]
    fn press_reports_door_phase_change_on_same_tick() {
        let mut sim = simulation();
        sim.spawn_character(Vec3::new(0.0, 0.0, -48.0));

        let report = sim.tick(&FrameInput::with_controls(&[Control::Interact]), 1.0 / 60.0);
        assert_eq!(report.presses.len(), 1);
        assert_eq!(
            report.door_changes,
            vec![DoorPhaseChange {
                door: DoorId(0),
                from: DoorPhase::Closed,
                to: DoorPhase::Opening,
            }]
        );
    }

    #[test]
    fn camera_pose_follows_character() {
        let mut sim = simulation();
        sim.spawn_character(Vec3::new(10.0, 0.0, 10.0));
        let report = sim.tick(&FrameInput::default(), 1.0 / 60.0);
        let pose = report.camera.expect("pose once spawned");
        assert!((pose.look_at - Vec3::new(10.0, 1.44, 10.0)).norm() < 1.0e-4);
    }

    #[test]
    fn invalid_delta_is_treated_as_zero() {
        let mut sim = simulation();
        sim.spawn_character(Vec3::zeros());
        sim.tick(&FrameInput::with_controls(&[Control::Forward]), f32::NAN);
        sim.tick(&FrameInput::with_controls(&[Control::Forward]), -1.0);
        let character = sim.character.as_ref().expect("spawned");
        assert_eq!(character.position, Vec3::zeros());
    }

    #[test]
    fn character_faces_camera_yaw() {
        let mut sim = simulation();
        sim.spawn_character(Vec3::zeros());
        let mut frame = FrameInput::default();
        frame.pointer_locked = true;
        frame.look.yaw_delta = -100.0;
        sim.tick(&frame, 1.0 / 60.0);
        let character = sim.character.as_ref().expect("spawned");
        assert!((character.yaw - 0.5).abs() < 1.0e-6);
    }
}
