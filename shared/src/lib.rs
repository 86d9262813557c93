pub mod animation;
pub mod button;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod door;
pub mod hot_tub;
pub mod input;
pub mod simulation;
pub mod volume;
pub mod world;

pub use animation::{AnimationClip, ClipPlayer, ClipSet, LocomotionState, select_animation};
pub use button::{Button, ButtonColor, ButtonId, ButtonPress, HIGHLIGHT_RGB};
pub use camera::{CameraPose, CameraRig, CameraSettings};
pub use constants::{DEFAULT_SEED, MAX_FRAME_DT_S};
pub use controller::{CharacterState, ControllerSettings, StepOutcome};
pub use door::{Door, DoorId, DoorPhase};
pub use hot_tub::{Bubble, HotTub};
pub use input::{Control, ControlFlags, FrameInput, LookInput};
pub use simulation::{DoorPhaseChange, Simulation, SimulationSettings, TickReport};
pub use volume::{CollidableVolume, Vec3, VolumeKind};
pub use world::{Furniture, FurnitureKind, StaticWorld, WorldBuildError, build_world, furniture};
