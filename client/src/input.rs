use bevy::{input::mouse::MouseScrollUnit, prelude::*};
use leafwing_input_manager::prelude::*;
use maze_shared::{Control, ControlFlags, FrameInput, LookInput};

/// Pixels per wheel notch when the platform reports lines; the zoom tuning expects pixels.
const WHEEL_PIXELS_PER_LINE: f32 = 100.0;

/// Wheel motion in pixels, whichever unit the platform reported it in.
fn wheel_pixels(delta: f32, unit: MouseScrollUnit) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta * WHEEL_PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => delta,
    }
}

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Crouch,
    Interact,
    LockPointer,
    ReleasePointer,
    #[actionlike(DualAxis)]
    Look,
    #[actionlike(Axis)]
    Zoom,
}

impl PlayerAction {
    const CONTROLS: [(PlayerAction, Control); 7] = [
        (PlayerAction::Forward, Control::Forward),
        (PlayerAction::Back, Control::Back),
        (PlayerAction::Left, Control::Left),
        (PlayerAction::Right, Control::Right),
        (PlayerAction::Jump, Control::Jump),
        (PlayerAction::Crouch, Control::Crouch),
        (PlayerAction::Interact, Control::Interact),
    ];
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<PlayerAction>::default());

    app.register_type::<PlayerAction>();

    let input_map = InputMap::<PlayerAction>::default()
        .with(PlayerAction::Forward, KeyCode::KeyW)
        .with(PlayerAction::Back, KeyCode::KeyS)
        .with(PlayerAction::Left, KeyCode::KeyA)
        .with(PlayerAction::Right, KeyCode::KeyD)
        .with(PlayerAction::Jump, KeyCode::Space)
        .with(PlayerAction::Crouch, KeyCode::KeyZ)
        .with(PlayerAction::Interact, KeyCode::KeyE)
        .with(PlayerAction::LockPointer, MouseButton::Left)
        .with(PlayerAction::ReleasePointer, KeyCode::Escape)
        .with_dual_axis(PlayerAction::Look, MouseMove::default())
        .with_axis(PlayerAction::Zoom, MouseScrollAxis::Y);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<PlayerAction>::default());
}

/// Snapshot the action state into the simulation's input record.
pub fn frame_input(
    actions: &ActionState<PlayerAction>,
    scroll_unit: MouseScrollUnit,
    pointer_locked: bool,
) -> FrameInput {
    let mut controls = ControlFlags::default();
    for (action, control) in PlayerAction::CONTROLS {
        controls.set(control, actions.pressed(&action));
    }

    let look = actions.axis_pair(&PlayerAction::Look);
    FrameInput {
        controls,
        look: LookInput {
            yaw_delta: look.x,
            pitch_delta: look.y,
            // Wheel up zooms in.
            zoom_delta: -wheel_pixels(actions.value(&PlayerAction::Zoom), scroll_unit),
        },
        pointer_locked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_lines_scale_to_pixels() {
        assert_eq!(wheel_pixels(1.0, MouseScrollUnit::Line), 100.0);
        assert_eq!(wheel_pixels(-3.0, MouseScrollUnit::Line), -300.0);
    }

    #[test]
    fn wheel_pixels_pass_through() {
        assert_eq!(wheel_pixels(53.0, MouseScrollUnit::Pixel), 53.0);
    }
}
