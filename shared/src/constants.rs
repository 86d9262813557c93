use std::f32::consts::PI;

/// Planar walking speed in world units per second, per held direction key.
///
/// Direction keys are additive, so a diagonal (e.g. forward + left) moves at
/// `MOVE_SPEED * sqrt(2)`.
pub const MOVE_SPEED: f32 = 10.0;

/// Downward acceleration in world units per second squared (positive value).
pub const GRAVITY: f32 = 20.9;

/// Vertical launch speed applied when jumping from the ground.
pub const JUMP_LAUNCH_SPEED: f32 = 9.6;

/// Collision height while standing.
pub const STAND_HEIGHT: f32 = 1.8;

/// Collision height while crouching.
pub const CROUCH_HEIGHT: f32 = 1.2;

/// Half of the character's collision footprint on X and Z.
pub const CHARACTER_HALF_WIDTH: f32 = 0.4;

/// Height of the ground plane. The character can never sink below it.
pub const GROUND_Y: f32 = 0.0;

/// Vertical travel of a door panel between closed (0) and open.
pub const DOOR_MAX_OFFSET: f32 = 5.0;

/// Door panel travel speed (world units per second).
pub const DOOR_RATE: f32 = 3.0;

/// A button reacts when the character is strictly closer than this.
pub const INTERACTION_DISTANCE: f32 = 3.5;

/// Time a button stays pressed (and highlighted) after a trigger, in seconds.
pub const BUTTON_COOLDOWN_S: f32 = 0.5;

/// Fixed local camera offset before rotation and zoom.
pub const CAMERA_BASE_OFFSET: [f32; 3] = [0.0, 10.0, 0.0];

/// Pitch limit in radians (about 81.8 degrees).
pub const MAX_PITCH: f32 = PI / 2.2;

pub const MIN_ZOOM: f32 = 0.45;
pub const MAX_ZOOM: f32 = 4.0;
pub const DEFAULT_ZOOM: f32 = 0.5;

/// Radians of yaw/pitch per unit of pointer motion.
pub const LOOK_SENSITIVITY: f32 = 0.005;

/// Zoom change per unit of wheel delta.
pub const ZOOM_SENSITIVITY: f32 = 0.001;

/// The camera looks at this fraction of the character height above its feet.
pub const LOOK_AT_HEIGHT_FRACTION: f32 = 0.8;

/// Largest frame delta (seconds) the client feeds into a single tick.
///
/// Keeps a stalled tab (or a debugger pause) from teleporting the character through walls.
pub const MAX_FRAME_DT_S: f32 = 0.10;

/// Seed used for decorative randomness when the caller doesn't provide one.
pub const DEFAULT_SEED: u64 = 42;
