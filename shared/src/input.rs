//! Normalized per-frame input consumed by the simulation.
//!
//! The client maps devices (keyboard, pointer, wheel) onto these types; nothing in here
//! knows about key codes or windows.
//!
//! # Controls
//! Held keys are stored as bits in a [`ControlFlags`] mask. The bit index of each
//! [`Control`] is its `#[repr(u8)]` discriminant.

use num_traits::{One, PrimInt};

/// Trait implemented by flag enums that map onto a single bit.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must stay below the bit width of `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// Plain bitmask container over a primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    /// Add or remove `flag` depending on `on`.
    pub fn set<U: FlagBitmask<Storage = T>>(&mut self, flag: U, on: bool) {
        if on {
            self.add(flag);
        } else {
            self.remove(flag);
        }
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    pub fn has_any<U: FlagBitmask<Storage = T> + Copy>(&self, flags: &[U]) -> bool {
        let combined = flags.iter().fold(T::zero(), |acc, f| acc | f.mask());
        (self.bits & combined) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// A held control. Discriminants are bit indices in [`ControlFlags`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Forward = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Jump = 4,
    Crouch = 5,
    Interact = 6,
}

impl Control {
    /// The four planar movement controls.
    pub const DIRECTIONS: [Control; 4] = [
        Control::Forward,
        Control::Back,
        Control::Left,
        Control::Right,
    ];
}

impl FlagBitmask for Control {
    type Storage = u8;

    fn bit_index(&self) -> u8 {
        *self as u8
    }
}

/// Set of controls held during a frame.
pub type ControlFlags = BitmaskFlags<u8>;

impl ControlFlags {
    /// Build a mask from a list of held controls.
    pub fn held(controls: &[Control]) -> Self {
        let mut flags = Self::default();
        for &control in controls {
            flags.add(control);
        }
        flags
    }

    /// True when any planar movement key is held.
    pub fn any_direction(&self) -> bool {
        self.has_any(&Control::DIRECTIONS)
    }
}

/// Pointer and wheel deltas accumulated since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookInput {
    /// Horizontal pointer motion (positive = right).
    pub yaw_delta: f32,
    /// Vertical pointer motion (positive = down).
    pub pitch_delta: f32,
    /// Wheel motion (positive = zoom out).
    pub zoom_delta: f32,
}

/// Everything the simulation reads from input devices for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub controls: ControlFlags,
    pub look: LookInput,
    /// Pointer-look only applies while the pointer is captured.
    pub pointer_locked: bool,
}

impl FrameInput {
    pub fn with_controls(controls: &[Control]) -> Self {
        Self {
            controls: ControlFlags::held(controls),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_map_to_distinct_bits() {
        let all = [
            Control::Forward,
            Control::Back,
            Control::Left,
            Control::Right,
            Control::Jump,
            Control::Crouch,
            Control::Interact,
        ];
        let flags = ControlFlags::held(&all);
        assert_eq!(flags.bits, 0b0111_1111);
        for control in all {
            assert!(flags.has(control));
        }
    }

    #[test]
    fn set_and_remove_toggle_single_bits() {
        let mut flags = ControlFlags::default();
        flags.set(Control::Jump, true);
        flags.set(Control::Crouch, true);
        flags.set(Control::Jump, false);

        assert!(!flags.has(Control::Jump));
        assert!(flags.has(Control::Crouch));
        assert!(!flags.is_empty());
    }

    #[test]
    fn any_direction_ignores_non_movement_controls() {
        let flags = ControlFlags::held(&[Control::Jump, Control::Interact, Control::Crouch]);
        assert!(!flags.any_direction());

        let flags = ControlFlags::held(&[Control::Right]);
        assert!(flags.any_direction());
    }
}
