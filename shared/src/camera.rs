//! Orbit follow camera.
//!
//! The rig only reads the character; the character's facing follows `CameraRig::yaw`
//! through the controller.

use nalgebra as na;

use crate::{
    constants::{
        CAMERA_BASE_OFFSET, DEFAULT_ZOOM, LOOK_AT_HEIGHT_FRACTION, LOOK_SENSITIVITY, MAX_PITCH,
        MAX_ZOOM, MIN_ZOOM, ZOOM_SENSITIVITY,
    },
    input::LookInput,
    volume::Vec3,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub base_offset: Vec3,
    pub max_pitch: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub default_zoom: f32,
    pub look_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub look_at_height_fraction: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            base_offset: Vec3::from(CAMERA_BASE_OFFSET),
            max_pitch: MAX_PITCH,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
            look_sensitivity: LOOK_SENSITIVITY,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            look_at_height_fraction: LOOK_AT_HEIGHT_FRACTION,
        }
    }
}

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Screen-up direction: the rig's forward axis, so it never lines up with the view
    /// direction even when the camera is straight overhead.
    pub up: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    /// Unbounded; wraps naturally through the rotation.
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub settings: CameraSettings,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraRig {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            zoom: settings.default_zoom,
            settings,
        }
    }

    /// Apply pointer motion. Ignored unless the pointer is locked.
    pub fn apply_look(&mut self, look: &LookInput, pointer_locked: bool) {
        if !pointer_locked || !look.yaw_delta.is_finite() || !look.pitch_delta.is_finite() {
            return;
        }
        let s = self.settings.look_sensitivity;
        self.yaw -= look.yaw_delta * s;
        self.pitch = (self.pitch + look.pitch_delta * s)
            .clamp(-self.settings.max_pitch, self.settings.max_pitch);
    }

    /// Apply wheel motion. Works with or without pointer lock.
    pub fn apply_zoom(&mut self, zoom_delta: f32) {
        if !zoom_delta.is_finite() {
            return;
        }
        self.zoom = (self.zoom + zoom_delta * self.settings.zoom_sensitivity)
            .clamp(self.settings.min_zoom, self.settings.max_zoom);
    }

    /// Yaw applied first, then pitch in the yawed frame.
    pub fn rotation(&self) -> na::UnitQuaternion<f32> {
        na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), self.yaw)
            * na::UnitQuaternion::from_axis_angle(&na::Vector3::x_axis(), self.pitch)
    }

    pub fn offset(&self) -> Vec3 {
        self.rotation() * self.settings.base_offset * self.zoom
    }

    pub fn pose(&self, character_position: &Vec3, character_height: f32) -> CameraPose {
        CameraPose {
            position: character_position + self.offset(),
            look_at: character_position
                + Vec3::new(0.0, character_height * self.settings.look_at_height_fraction, 0.0),
            up: self.rotation() * Vec3::z(),
        }
    }
}
