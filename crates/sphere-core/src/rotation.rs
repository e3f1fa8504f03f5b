//! Orientation, angular velocity and the interaction mode of the sphere.
//!
//! This is the only mutable state shared between input handling and the
//! frame loop. Both run on the same thread, so it is owned directly by the
//! sphere and borrowed mutably by whichever callback is running.

use crate::config::ViewportConfig;
use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationMode {
    #[default]
    Idle,
    Dragging,
    Decaying,
    AutoRotating,
}

#[derive(Clone, Debug)]
pub struct RotationState {
    orientation: Quat,
    angular_velocity: Vec3,
    mode: RotationMode,
    drag_anchor: Option<Vec2>,
    auto_rotate: bool,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            mode: RotationMode::Idle,
            drag_anchor: None,
            auto_rotate: false,
        }
    }
}

impl RotationState {
    pub fn new(auto_rotate: bool) -> Self {
        let mut state = Self {
            auto_rotate,
            ..Self::default()
        };
        state.mode = state.rest_mode();
        state
    }

    #[inline]
    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    #[inline]
    pub fn drag_anchor(&self) -> Option<Vec2> {
        self.drag_anchor
    }

    #[inline]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Overwrite the residual spin. The value is taken as-is; it is clamped
    /// on the next integration step.
    pub fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.angular_velocity = velocity;
    }

    /// Mode the sphere settles into when nothing is moving it.
    #[inline]
    fn rest_mode(&self) -> RotationMode {
        if self.auto_rotate {
            RotationMode::AutoRotating
        } else {
            RotationMode::Idle
        }
    }

    fn set_mode(&mut self, mode: RotationMode) {
        if self.mode != mode {
            log::debug!("[rotation] {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
        // Dragging and decaying finish on their own and then land in the rest mode.
        if matches!(self.mode, RotationMode::Idle | RotationMode::AutoRotating) {
            self.set_mode(self.rest_mode());
        }
    }

    pub(crate) fn begin_drag(&mut self, anchor: Vec2) {
        self.angular_velocity = Vec3::ZERO;
        self.drag_anchor = Some(anchor);
        self.set_mode(RotationMode::Dragging);
    }

    pub(crate) fn move_anchor(&mut self, anchor: Vec2) {
        if self.mode == RotationMode::Dragging {
            self.drag_anchor = Some(anchor);
        }
    }

    /// Leave `Dragging`, keeping the last recorded velocity as momentum if it
    /// is large enough.
    pub(crate) fn end_drag(&mut self, config: &ViewportConfig) {
        self.drag_anchor = None;
        self.clamp_velocity(config.max_angular_speed);
        if self.angular_velocity.length() > config.velocity_epsilon {
            self.set_mode(RotationMode::Decaying);
        } else {
            self.angular_velocity = Vec3::ZERO;
            self.set_mode(self.rest_mode());
        }
    }

    /// Abandon an active drag without a release: no momentum, straight back
    /// to the rest mode. Other modes are left alone.
    pub(crate) fn cancel_drag(&mut self) {
        if self.mode != RotationMode::Dragging {
            return;
        }
        self.drag_anchor = None;
        self.angular_velocity = Vec3::ZERO;
        self.set_mode(self.rest_mode());
    }

    /// Pre-multiply an incremental rotation onto the orientation.
    pub fn rotate_by(&mut self, delta: Quat) {
        let next = (delta * self.orientation).normalize();
        if next.is_finite() {
            self.orientation = next;
        }
    }

    /// Clamp spin to `[0, max]`; non-finite spin is dropped entirely.
    pub fn clamp_velocity(&mut self, max_angular_speed: f32) {
        if !self.angular_velocity.is_finite() {
            log::warn!("[rotation] dropping non-finite angular velocity");
            self.angular_velocity = Vec3::ZERO;
            return;
        }
        self.angular_velocity = self.angular_velocity.clamp_length_max(max_angular_speed);
    }

    /// Advance one frame of `dt_sec` seconds according to the current mode.
    pub fn integrate(&mut self, dt_sec: f32, config: &ViewportConfig) {
        self.clamp_velocity(config.max_angular_speed);
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };

        match self.mode {
            RotationMode::Idle | RotationMode::Dragging => {}
            RotationMode::Decaying => {
                self.angular_velocity *= config.momentum_decay.powf(dt);
                self.rotate_by(Quat::from_scaled_axis(self.angular_velocity * dt));
                if self.angular_velocity.length() < config.velocity_epsilon {
                    self.angular_velocity = Vec3::ZERO;
                    self.set_mode(self.rest_mode());
                }
            }
            RotationMode::AutoRotating => {
                let axis = config.auto_rotate_axis.normalize_or_zero();
                self.rotate_by(Quat::from_axis_angle(axis, config.auto_rotate_speed * dt));
            }
        }
    }
}
