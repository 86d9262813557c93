//! Proximity buttons.
//!
//! A button fires when the character is within [`INTERACTION_DISTANCE`] and the interact key
//! is held. Firing toggles the bound door's target and starts a cooldown; while the cooldown
//! runs the button reports `is_pressed` (so re-triggers are ignored) and `highlighted`.
//!
//! The cooldown is a countdown advanced by [`tick_cooldowns`] at the start of every
//! simulation tick, so all state changes stay on the tick.

use crate::{
    constants::{BUTTON_COOLDOWN_S, INTERACTION_DISTANCE},
    door::{Door, DoorId},
    volume::Vec3,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonId(pub u8);

/// Button palette, in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Turquoise,
}

impl ButtonColor {
    pub const ALL: [ButtonColor; 6] = [
        ButtonColor::Red,
        ButtonColor::Green,
        ButtonColor::Blue,
        ButtonColor::Yellow,
        ButtonColor::Purple,
        ButtonColor::Turquoise,
    ];

    /// sRGB bytes for rendering.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ButtonColor::Red => [0xff, 0x00, 0x00],
            ButtonColor::Green => [0x00, 0xff, 0x00],
            ButtonColor::Blue => [0x00, 0x00, 0xff],
            ButtonColor::Yellow => [0xff, 0xff, 0x00],
            ButtonColor::Purple => [0xff, 0x00, 0xff],
            ButtonColor::Turquoise => [0x00, 0xff, 0xff],
        }
    }
}

/// Color shown while a button is cooling down.
pub const HIGHLIGHT_RGB: [u8; 3] = [0x00, 0xff, 0x00];

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub position: Vec3,
    pub color: ButtonColor,
    pub door: Option<DoorId>,
    pub is_pressed: bool,
    pub highlighted: bool,
    /// Seconds until `is_pressed` clears. Zero when idle.
    pub cooldown_remaining: f32,
}

impl Button {
    pub fn new(id: ButtonId, position: Vec3, color: ButtonColor, door: Option<DoorId>) -> Self {
        Self {
            id,
            position,
            color,
            door,
            is_pressed: false,
            highlighted: false,
            cooldown_remaining: 0.0,
        }
    }

    #[inline]
    pub fn in_range(&self, position: &Vec3) -> bool {
        (self.position - position).norm() < INTERACTION_DISTANCE
    }

    fn press(&mut self) {
        self.is_pressed = true;
        self.highlighted = true;
        self.cooldown_remaining = BUTTON_COOLDOWN_S;
    }

    fn release(&mut self) {
        self.is_pressed = false;
        self.highlighted = false;
        self.cooldown_remaining = 0.0;
    }

    /// Rendered color: highlight while pressed, palette color otherwise.
    pub fn display_rgb(&self) -> [u8; 3] {
        if self.highlighted {
            HIGHLIGHT_RGB
        } else {
            self.color.rgb()
        }
    }
}

/// A button that fired this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonPress {
    pub button: ButtonId,
    /// Door that was toggled, if the button is bound to one.
    pub door: Option<DoorId>,
    /// The door's target after toggling.
    pub door_open_target: Option<bool>,
}

/// Count down active cooldowns and release buttons whose cooldown elapsed.
pub fn tick_cooldowns(buttons: &mut [Button], delta: f32) {
    let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
    for button in buttons.iter_mut().filter(|b| b.is_pressed) {
        button.cooldown_remaining -= delta;
        if button.cooldown_remaining <= 0.0 {
            button.release();
            log::debug!("button {:?} released", button.id);
        }
    }
}

/// Fire every idle button in range of `character_position` while interact is held.
///
/// Each in-range button is handled independently. A button bound to a door index that doesn't
/// exist still enters cooldown but toggles nothing.
pub fn check_interactions(
    character_position: &Vec3,
    interact_held: bool,
    buttons: &mut [Button],
    doors: &mut [Door],
) -> Vec<ButtonPress> {
    if !interact_held {
        return Vec::new();
    }

    let mut presses = Vec::new();
    for button in buttons.iter_mut() {
        if button.is_pressed || !button.in_range(character_position) {
            continue;
        }

        button.press();
        let door_open_target = button
            .door
            .and_then(|id| doors.get_mut(id.index()))
            .map(Door::toggle);

        log::debug!(
            "button {:?} pressed, door {:?} target open = {:?}",
            button.id,
            button.door,
            door_open_target
        );

        presses.push(ButtonPress {
            button: button.id,
            door: button.door,
            door_open_target,
        });
    }
    presses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<Button>, Vec<Door>) {
        let buttons = vec![
            Button::new(
                ButtonId(0),
                Vec3::new(0.0, 1.5, -49.0),
                ButtonColor::Red,
                Some(DoorId(0)),
            ),
            Button::new(
                ButtonId(1),
                Vec3::new(0.0, 1.5, 49.0),
                ButtonColor::Green,
                Some(DoorId(1)),
            ),
        ];
        let doors = vec![Door::new(DoorId(0)), Door::new(DoorId(1))];
        (buttons, doors)
    }

    #[test]
    fn out_of_range_does_nothing() {
        let (mut buttons, mut doors) = setup();
        let presses = check_interactions(&Vec3::zeros(), true, &mut buttons, &mut doors);
        assert!(presses.is_empty());
        assert!(!doors[0].is_open_target);
    }

    #[test]
    fn requires_interact_key() {
        let (mut buttons, mut doors) = setup();
        let near = Vec3::new(0.0, 0.0, -48.0);
        assert!(check_interactions(&near, false, &mut buttons, &mut doors).is_empty());
        assert!(!buttons[0].is_pressed);
    }

    #[test]
    fn press_toggles_bound_door_and_highlights() {
        let (mut buttons, mut doors) = setup();
        let near = Vec3::new(0.0, 0.0, -48.0);
        let presses = check_interactions(&near, true, &mut buttons, &mut doors);

        assert_eq!(presses.len(), 1);
        assert_eq!(presses[0].door, Some(DoorId(0)));
        assert_eq!(presses[0].door_open_target, Some(true));
        assert!(doors[0].is_open_target);
        assert!(!doors[1].is_open_target);
        assert!(buttons[0].highlighted);
        assert_eq!(buttons[0].display_rgb(), HIGHLIGHT_RGB);
    }

    #[test]
    fn cooldown_blocks_retrigger_until_released() {
        let (mut buttons, mut doors) = setup();
        let near = Vec3::new(0.0, 0.0, -48.0);

        check_interactions(&near, true, &mut buttons, &mut doors);
        tick_cooldowns(&mut buttons, 0.2);
        check_interactions(&near, true, &mut buttons, &mut doors);
        tick_cooldowns(&mut buttons, 0.2);
        check_interactions(&near, true, &mut buttons, &mut doors);
        assert!(doors[0].is_open_target, "only the first press counts");

        tick_cooldowns(&mut buttons, 0.2);
        assert!(!buttons[0].is_pressed);
        assert!(!buttons[0].highlighted);
        assert_eq!(buttons[0].display_rgb(), ButtonColor::Red.rgb());

        check_interactions(&near, true, &mut buttons, &mut doors);
        assert!(!doors[0].is_open_target, "second press after release toggles back");
    }

    #[test]
    fn all_buttons_in_range_fire_independently() {
        let mut buttons = vec![
            Button::new(ButtonId(0), Vec3::new(1.0, 0.0, 0.0), ButtonColor::Red, Some(DoorId(0))),
            Button::new(ButtonId(1), Vec3::new(-1.0, 0.0, 0.0), ButtonColor::Blue, Some(DoorId(1))),
            Button::new(ButtonId(2), Vec3::new(0.0, 0.0, 1.0), ButtonColor::Yellow, None),
        ];
        let mut doors = vec![Door::new(DoorId(0)), Door::new(DoorId(1))];

        let presses = check_interactions(&Vec3::zeros(), true, &mut buttons, &mut doors);
        assert_eq!(presses.len(), 3);
        assert!(doors.iter().all(|d| d.is_open_target));
        assert_eq!(presses[2].door_open_target, None);
        assert!(buttons[2].is_pressed);
    }

    #[test]
    fn distance_threshold_is_strict() {
        let mut buttons = vec![Button::new(
            ButtonId(0),
            Vec3::new(INTERACTION_DISTANCE, 0.0, 0.0),
            ButtonColor::Red,
            Some(DoorId(0)),
        )];
        let mut doors = vec![Door::new(DoorId(0))];
        assert!(check_interactions(&Vec3::zeros(), true, &mut buttons, &mut doors).is_empty());
    }
}
