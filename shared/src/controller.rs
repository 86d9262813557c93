/*!
Character controller: keyboard locomotion, gravity/jump, crouch, and collision rollback.

One call to [`step_character`] is one frame. The stages run in a fixed order:

1. snapshot the position;
2. planar movement: every held direction key adds its own camera-relative vector
   (vectors are summed unnormalized, so diagonals are faster);
3. jump launch when grounded;
4. crouch flag and height;
5. gravity and vertical integration;
6. ground clamp at y = 0;
7. rebuild the collision box;
8. if the box overlaps any solid volume, restore the snapshot.

Collision response is deliberately coarse: an overlap cancels the *whole* frame's
displacement (horizontal and vertical) instead of sliding along the contact. Vertical
velocity and the grounded flag are not rolled back, only the position.
*/

use nalgebra as na;
use rapier3d::parry::bounding_volume::Aabb;

use crate::{
    constants::{
        CHARACTER_HALF_WIDTH, CROUCH_HEIGHT, GRAVITY, GROUND_Y, JUMP_LAUNCH_SPEED, MOVE_SPEED,
        STAND_HEIGHT,
    },
    input::{Control, ControlFlags},
    volume::{Vec3, character_aabb, overlaps_any},
    world::StaticWorld,
};

/// Tunable movement parameters. Defaults come from [`crate::constants`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSettings {
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_launch_speed: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    pub half_width: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_launch_speed: JUMP_LAUNCH_SPEED,
            stand_height: STAND_HEIGHT,
            crouch_height: CROUCH_HEIGHT,
            half_width: CHARACTER_HALF_WIDTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CharacterState {
    /// Feet position in world space.
    pub position: Vec3,
    /// Facing yaw; follows the camera.
    pub yaw: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub crouching: bool,
    /// A direction key moved the character this frame (cleared by a collision).
    pub walking: bool,
    /// Current collision height (crouch or stand).
    pub height: f32,
    collision_box: Aabb,
}

impl CharacterState {
    pub fn spawn(position: Vec3, settings: &ControllerSettings) -> Self {
        let height = settings.stand_height;
        Self {
            position,
            yaw: 0.0,
            vertical_velocity: 0.0,
            grounded: position.y <= GROUND_Y,
            crouching: false,
            walking: false,
            height,
            collision_box: character_aabb(position, settings.half_width, height),
        }
    }

    /// Collision box as of the end of the last step.
    #[inline]
    pub fn collision_box(&self) -> &Aabb {
        &self.collision_box
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        !self.grounded
    }
}

/// What happened during one controller step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The frame's movement was cancelled by an overlap.
    pub collided: bool,
    pub walking: bool,
    /// Left the ground this frame.
    pub jumped: bool,
    /// Touched the ground this frame after being airborne.
    pub landed: bool,
}

/// Camera-relative planar displacement for the held direction keys.
///
/// Each key contributes a unit vector in the character's local frame, rotated by `yaw` about
/// +Y: forward `(0, 0, 1)`, back `(0, 0, -1)`, left `(1, 0, 0)`, right `(-1, 0, 0)`.
pub fn planar_displacement(controls: &ControlFlags, yaw: f32, distance: f32) -> Vec3 {
    let rotation = na::UnitQuaternion::from_axis_angle(&Vec3::y_axis(), yaw);
    let mut sum = Vec3::zeros();
    for control in Control::DIRECTIONS {
        if !controls.has(control) {
            continue;
        }
        let local = match control {
            Control::Forward => Vec3::new(0.0, 0.0, 1.0),
            Control::Back => Vec3::new(0.0, 0.0, -1.0),
            Control::Left => Vec3::new(1.0, 0.0, 0.0),
            Control::Right => Vec3::new(-1.0, 0.0, 0.0),
            _ => continue,
        };
        sum += rotation * local * distance;
    }
    sum
}

/// Advance the character by one frame against the world's solid volumes.
pub fn step_character(
    state: &mut CharacterState,
    controls: &ControlFlags,
    camera_yaw: f32,
    world: &StaticWorld,
    settings: &ControllerSettings,
    delta: f32,
) -> StepOutcome {
    let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
    let was_grounded = state.grounded;
    let mut outcome = StepOutcome::default();

    // 1) Snapshot.
    let previous = state.position;

    // 2) Planar movement.
    state.yaw = camera_yaw;
    state.walking = controls.any_direction();
    state.position += planar_displacement(controls, camera_yaw, settings.move_speed * delta);

    // 3) Jump.
    if controls.has(Control::Jump) && state.grounded {
        state.vertical_velocity = settings.jump_launch_speed;
        state.grounded = false;
        outcome.jumped = true;
    }

    // 4) Crouch.
    state.crouching = controls.has(Control::Crouch);
    state.height = if state.crouching {
        settings.crouch_height
    } else {
        settings.stand_height
    };

    // 5) Gravity.
    state.vertical_velocity -= settings.gravity * delta;
    state.position.y += state.vertical_velocity * delta;

    // 6) Ground clamp.
    if state.position.y <= GROUND_Y {
        state.position.y = GROUND_Y;
        state.vertical_velocity = 0.0;
        state.grounded = true;
    }
    outcome.landed = state.grounded && !was_grounded;

    // 7) Collision box.
    state.collision_box = character_aabb(state.position, settings.half_width, state.height);

    // 8) Rollback on overlap.
    let solids: Vec<Aabb> = world.solid_aabbs().collect();
    if overlaps_any(&state.collision_box, solids.iter()) {
        state.position = previous;
        state.walking = false;
        state.collision_box = character_aabb(state.position, settings.half_width, state.height);
        outcome.collided = true;
    }

    outcome.walking = state.walking;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        door::{Door, DoorId},
        volume::CollidableVolume,
        world::wall_segment,
    };
    use rapier3d::parry::bounding_volume::BoundingVolume;
    use std::f32::consts::{FRAC_PI_2, SQRT_2};

    fn empty_world() -> StaticWorld {
        StaticWorld::from_parts(Vec::new(), Vec::new(), Vec::new()).unwrap()
    }

    fn run(
        state: &mut CharacterState,
        controls: &[Control],
        yaw: f32,
        world: &StaticWorld,
        frames: usize,
        dt: f32,
    ) -> Vec<StepOutcome> {
        let settings = ControllerSettings::default();
        let flags = ControlFlags::held(controls);
        (0..frames)
            .map(|_| step_character(state, &flags, yaw, world, &settings, dt))
            .collect()
    }

    #[test]
    fn forward_for_one_second_moves_move_speed() {
        let settings = ControllerSettings::default();
        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);
        run(&mut state, &[Control::Forward], 0.0, &empty_world(), 60, 1.0 / 60.0);

        assert!((state.position.z - MOVE_SPEED).abs() < 1.0e-3, "{:?}", state.position);
        assert!(state.position.x.abs() < 1.0e-4);
        assert_eq!(state.position.y, 0.0);
    }

    #[test]
    fn forward_follows_camera_yaw() {
        let flags = ControlFlags::held(&[Control::Forward]);
        let d = planar_displacement(&flags, FRAC_PI_2, 1.0);
        assert!((d.x - 1.0).abs() < 1.0e-5 && d.z.abs() < 1.0e-5);
    }

    #[test]
    fn diagonal_keys_sum_unnormalized() {
        let flags = ControlFlags::held(&[Control::Forward, Control::Left]);
        let d = planar_displacement(&flags, 0.0, 1.0);
        assert!((d.norm() - SQRT_2).abs() < 1.0e-5);

        let opposite = ControlFlags::held(&[Control::Forward, Control::Back]);
        assert!(planar_displacement(&opposite, 0.3, 1.0).norm() < 1.0e-5);
    }

    #[test]
    fn jump_rises_then_lands() {
        let settings = ControllerSettings::default();
        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);
        let world = empty_world();

        let first = run(&mut state, &[Control::Jump], 0.0, &world, 1, 1.0 / 60.0);
        assert!(first[0].jumped);
        assert!(state.is_airborne());
        assert!(state.position.y > 0.0);

        let outcomes = run(&mut state, &[], 0.0, &world, 120, 1.0 / 60.0);
        assert!(outcomes.iter().any(|o| o.landed));
        assert!(state.grounded);
        assert_eq!(state.position.y, 0.0);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn cannot_jump_while_airborne() {
        let settings = ControllerSettings::default();
        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);
        let world = empty_world();
        run(&mut state, &[Control::Jump], 0.0, &world, 1, 1.0 / 60.0);
        let v = state.vertical_velocity;
        let outcome = run(&mut state, &[Control::Jump], 0.0, &world, 1, 1.0 / 60.0);
        assert!(!outcome[0].jumped);
        assert!(state.vertical_velocity < v);
    }

    #[test]
    fn crouch_changes_height() {
        let settings = ControllerSettings::default();
        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);
        let world = empty_world();
        run(&mut state, &[Control::Crouch], 0.0, &world, 1, 1.0 / 60.0);
        assert!(state.crouching);
        assert_eq!(state.height, CROUCH_HEIGHT);
        run(&mut state, &[], 0.0, &world, 1, 1.0 / 60.0);
        assert_eq!(state.height, STAND_HEIGHT);
    }

    #[test]
    fn wall_collision_rolls_back_whole_frame() {
        let settings = ControllerSettings::default();
        let world = StaticWorld::from_parts(
            vec![wall_segment(-10.0, 1.0, 10.0, 1.0)],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);

        // Walk toward the wall until the first blocked frame.
        let flags = ControlFlags::held(&[Control::Forward, Control::Left]);
        let mut blocked = None;
        for _ in 0..60 {
            let before = state.position;
            let outcome = step_character(&mut state, &flags, 0.0, &world, &settings, 1.0 / 60.0);
            if outcome.collided {
                blocked = Some(before);
                assert!(!outcome.walking);
                break;
            }
        }
        let before = blocked.expect("should hit the wall");
        assert_eq!(state.position, before, "x movement is cancelled too");
        let wall = world.volumes()[0].aabb();
        assert!(!state.collision_box().intersects(&wall));
    }

    #[test]
    fn crouching_fits_under_low_clearance() {
        let settings = ControllerSettings::default();
        // Barrier whose underside is at 1.5: between crouch (1.2) and stand (1.8) heights.
        let barrier = CollidableVolume::wall(Vec3::new(0.0, 2.5, 2.0), Vec3::new(5.0, 1.0, 0.5));
        let world = StaticWorld::from_parts(vec![barrier], Vec::new(), Vec::new()).unwrap();

        let mut standing = CharacterState::spawn(Vec3::zeros(), &settings);
        let outcomes = run(&mut standing, &[Control::Forward], 0.0, &world, 60, 1.0 / 60.0);
        assert!(outcomes.iter().any(|o| o.collided));
        assert!(standing.position.z < 2.0);

        let mut crouched = CharacterState::spawn(Vec3::zeros(), &settings);
        let outcomes = run(
            &mut crouched,
            &[Control::Forward, Control::Crouch],
            0.0,
            &world,
            60,
            1.0 / 60.0,
        );
        assert!(outcomes.iter().all(|o| !o.collided));
        assert!(crouched.position.z > 5.0);
        assert!(!crouched.collision_box().intersects(&barrier.aabb()));
    }

    #[test]
    fn closed_door_blocks_and_open_door_does_not() {
        let settings = ControllerSettings::default();
        let panel = CollidableVolume::door(
            DoorId(0),
            Vec3::new(0.0, 2.5, 3.0),
            Vec3::new(5.0, 2.5, 0.25),
            0.0,
        );
        let mut world =
            StaticWorld::from_parts(vec![panel], vec![Door::new(DoorId(0))], Vec::new()).unwrap();

        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);
        run(&mut state, &[Control::Forward], 0.0, &world, 60, 1.0 / 60.0);
        assert!(state.position.z < 3.0);

        world.doors[0].toggle();
        world.doors[0].advance(100.0);
        run(&mut state, &[Control::Forward], 0.0, &world, 60, 1.0 / 60.0);
        assert!(state.position.z > 3.0);
    }

    #[test]
    fn raised_panel_still_blocks_until_fully_open() {
        let settings = ControllerSettings::default();
        let panel = CollidableVolume::door(
            DoorId(0),
            Vec3::new(0.0, 2.5, 3.0),
            Vec3::new(5.0, 2.5, 0.25),
            0.0,
        );
        let mut world =
            StaticWorld::from_parts(vec![panel], vec![Door::new(DoorId(0))], Vec::new()).unwrap();
        world.doors[0].toggle();
        let rate = world.doors[0].rate;
        world.doors[0].advance(2.5 / rate);
        assert!((world.doors[0].current_offset - 2.5).abs() < 1.0e-5);

        // The panel's underside is above head height, but the doorway is still shut.
        let mut state = CharacterState::spawn(Vec3::zeros(), &settings);
        let outcomes = run(&mut state, &[Control::Forward], 0.0, &world, 60, 1.0 / 60.0);
        assert!(outcomes.iter().any(|o| o.collided));
        assert!(state.position.z < 3.0 - 0.25, "z = {}", state.position.z);
    }

    #[test]
    fn zero_delta_keeps_position() {
        let settings = ControllerSettings::default();
        let mut state = CharacterState::spawn(Vec3::new(1.0, 0.0, 2.0), &settings);
        let flags = ControlFlags::held(&[Control::Forward]);
        let outcome = step_character(&mut state, &flags, 0.0, &empty_world(), &settings, 0.0);
        assert_eq!(state.position, Vec3::new(1.0, 0.0, 2.0));
        assert!(outcome.walking);
    }
}
