//! Locomotion clip selection.
//!
//! Selection is level-triggered: every frame the chosen clip gets `play` and every other
//! known clip gets `stop`, whether or not anything changed. [`ClipPlayer`] implementations
//! must therefore treat repeated `play`/`stop` as no-ops.
//!
//! Clips load asynchronously, so any of them can be missing. Missing clips are skipped.

use crate::controller::CharacterState;

/// The four locomotion clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationClip {
    Idle,
    Walk,
    Jump,
    Crouch,
}

impl AnimationClip {
    pub const ALL: [AnimationClip; 4] = [
        AnimationClip::Idle,
        AnimationClip::Walk,
        AnimationClip::Jump,
        AnimationClip::Crouch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationClip::Idle => "Idle",
            AnimationClip::Walk => "Walk",
            AnimationClip::Jump => "Jump",
            AnimationClip::Crouch => "Crouch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|clip| clip.name() == name)
    }
}

/// Controller state as seen by the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocomotionState {
    Airborne,
    Walking,
    Idle,
}

impl LocomotionState {
    pub fn of(character: &CharacterState) -> Self {
        if !character.grounded {
            LocomotionState::Airborne
        } else if character.walking {
            LocomotionState::Walking
        } else {
            LocomotionState::Idle
        }
    }

    /// Clips that can represent this state, best first.
    fn candidates(self) -> &'static [AnimationClip] {
        match self {
            LocomotionState::Airborne => &[AnimationClip::Jump],
            LocomotionState::Walking => &[AnimationClip::Walk],
            LocomotionState::Idle => &[AnimationClip::Idle, AnimationClip::Crouch],
        }
    }
}

/// Something that can play named clips: an engine animation player, or [`ClipSet`].
pub trait ClipPlayer {
    fn has_clip(&self, clip: AnimationClip) -> bool;
    /// Start (or keep) playing. Must be idempotent.
    fn play(&mut self, clip: AnimationClip);
    /// Stop (or keep stopped). Must be idempotent.
    fn stop(&mut self, clip: AnimationClip);
    fn is_playing(&self, clip: AnimationClip) -> bool;
}

/// Pick the clip for `state` among the available ones.
pub fn choose_clip(state: LocomotionState, player: &impl ClipPlayer) -> Option<AnimationClip> {
    state
        .candidates()
        .iter()
        .copied()
        .find(|&clip| player.has_clip(clip))
}

/// Play the clip for `state` and stop every other available clip.
///
/// Returns the clip that is playing afterwards, or `None` if no candidate was available.
pub fn select_animation(
    state: LocomotionState,
    player: &mut impl ClipPlayer,
) -> Option<AnimationClip> {
    let chosen = choose_clip(state, player);
    for clip in AnimationClip::ALL {
        if !player.has_clip(clip) {
            continue;
        }
        if Some(clip) == chosen {
            player.play(clip);
        } else {
            player.stop(clip);
        }
    }
    chosen
}

/// In-memory clip table: which clips exist and which are playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipSet {
    available: [bool; 4],
    playing: [bool; 4],
}

impl ClipSet {
    /// All four clips present, none playing.
    pub fn all() -> Self {
        Self {
            available: [true; 4],
            playing: [false; 4],
        }
    }

    pub fn with_clips(clips: &[AnimationClip]) -> Self {
        let mut set = Self::default();
        for &clip in clips {
            set.insert(clip);
        }
        set
    }

    /// Register a clip that finished loading.
    pub fn insert(&mut self, clip: AnimationClip) {
        self.available[Self::slot(clip)] = true;
    }

    pub fn playing(&self) -> impl Iterator<Item = AnimationClip> + '_ {
        AnimationClip::ALL
            .into_iter()
            .filter(|&clip| self.playing[Self::slot(clip)])
    }

    fn slot(clip: AnimationClip) -> usize {
        match clip {
            AnimationClip::Idle => 0,
            AnimationClip::Walk => 1,
            AnimationClip::Jump => 2,
            AnimationClip::Crouch => 3,
        }
    }
}

impl ClipPlayer for ClipSet {
    fn has_clip(&self, clip: AnimationClip) -> bool {
        self.available[Self::slot(clip)]
    }

    fn play(&mut self, clip: AnimationClip) {
        if self.has_clip(clip) {
            self.playing[Self::slot(clip)] = true;
        }
    }

    fn stop(&mut self, clip: AnimationClip) {
        self.playing[Self::slot(clip)] = false;
    }

    fn is_playing(&self, clip: AnimationClip) -> bool {
        self.playing[Self::slot(clip)]
    }
}
