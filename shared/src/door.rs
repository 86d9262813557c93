//! Door state machine.
//!
//! A door has a boolean *target* (open or closed) and a continuous vertical offset that
//! travels toward the bound implied by the target at a fixed rate. Buttons only ever flip
//! the target; [`Door::advance`] is the only thing that moves the panel.

use crate::constants::{DOOR_MAX_OFFSET, DOOR_RATE};

/// Dense index of a door inside a [`crate::StaticWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoorId(pub u8);

impl DoorId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DoorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "door{}", self.0 + 1)
    }
}

/// Where a door is in its open/close cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub id: DoorId,
    /// Open/closed intent the panel is moving toward.
    pub is_open_target: bool,
    /// Vertical travel in `[0, max_offset]`; 0 is closed.
    pub current_offset: f32,
    pub max_offset: f32,
    /// Travel speed in units per second.
    pub rate: f32,
}

impl Door {
    /// A closed door with the default travel and rate.
    pub fn new(id: DoorId) -> Self {
        Self::with_travel(id, DOOR_MAX_OFFSET, DOOR_RATE)
    }

    pub fn with_travel(id: DoorId, max_offset: f32, rate: f32) -> Self {
        Self {
            id,
            is_open_target: false,
            current_offset: 0.0,
            max_offset: max_offset.max(0.0),
            rate: rate.max(0.0),
        }
    }

    /// Bound the panel is heading to.
    #[inline]
    pub fn target_offset(&self) -> f32 {
        if self.is_open_target {
            self.max_offset
        } else {
            0.0
        }
    }

    /// Flip the open/closed target. Returns the new target.
    pub fn toggle(&mut self) -> bool {
        self.is_open_target = !self.is_open_target;
        self.is_open_target
    }

    /// Move the panel toward its target by `rate * delta`, clamped to the target bound.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }

        let step = self.rate * delta;
        let target = self.target_offset();
        self.current_offset = if self.current_offset < target {
            (self.current_offset + step).min(target)
        } else {
            (self.current_offset - step).max(target)
        };
    }

    #[inline]
    pub fn is_fully_open(&self) -> bool {
        self.current_offset >= self.max_offset
    }

    /// A door blocks movement until it is fully open.
    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.is_fully_open()
    }

    pub fn phase(&self) -> DoorPhase {
        let at_target = self.current_offset == self.target_offset();
        match (self.is_open_target, at_target) {
            (true, true) => DoorPhase::Open,
            (true, false) => DoorPhase::Opening,
            (false, true) => DoorPhase::Closed,
            (false, false) => DoorPhase::Closing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_at_rest() {
        let mut door = Door::new(DoorId(0));
        assert_eq!(door.phase(), DoorPhase::Closed);
        door.advance(10.0);
        assert_eq!(door.current_offset, 0.0);
        assert!(door.is_solid());
    }

    #[test]
    fn opens_at_rate_and_clamps_without_overshoot() {
        let mut door = Door::new(DoorId(0));
        door.toggle();

        door.advance(1.0);
        assert!((door.current_offset - DOOR_RATE).abs() < 1.0e-6);
        assert_eq!(door.phase(), DoorPhase::Opening);

        door.advance(100.0);
        assert_eq!(door.current_offset, DOOR_MAX_OFFSET);
        assert_eq!(door.phase(), DoorPhase::Open);
        assert!(!door.is_solid());
    }

    #[test]
    fn offset_stays_in_bounds_for_any_sequence() {
        let mut door = Door::new(DoorId(3));
        let deltas = [0.0, 0.016, 0.5, 3.0, 0.001, 12.0, 0.25, 1.0e-7, 7.5];
        for (i, &delta) in deltas.iter().cycle().take(200).enumerate() {
            if i % 3 == 0 {
                door.toggle();
            }
            door.advance(delta);
            assert!(door.current_offset >= 0.0);
            assert!(door.current_offset <= door.max_offset);
        }
    }

    #[test]
    fn toggle_twice_returns_to_original_rest() {
        let mut door = Door::new(DoorId(1));
        door.toggle();
        door.advance(0.4);
        door.toggle();
        for _ in 0..100 {
            door.advance(0.1);
        }
        assert_eq!(door.current_offset, 0.0);
        assert_eq!(door.phase(), DoorPhase::Closed);
    }

    #[test]
    fn partially_open_door_is_still_solid() {
        let mut door = Door::new(DoorId(0));
        door.toggle();
        door.advance(1.0);
        assert!(door.is_solid());
    }

    #[test]
    fn ignores_negative_and_nan_delta() {
        let mut door = Door::new(DoorId(0));
        door.toggle();
        door.advance(-1.0);
        door.advance(f32::NAN);
        assert_eq!(door.current_offset, 0.0);
    }

    #[test]
    fn display_uses_one_based_names() {
        assert_eq!(DoorId(0).to_string(), "door1");
        assert_eq!(DoorId(5).to_string(), "door6");
    }
}
