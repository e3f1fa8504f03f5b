//! Drag handling: turns normalized pointer positions into rotation.
//!
//! Pointer positions arrive already mapped into container pixels by the host.
//! Each sample also carries a host timestamp in milliseconds so the release
//! velocity is measured from real intervals rather than assumed frame times.

use crate::config::ViewportConfig;
use crate::constants::MIN_SAMPLE_DT_SEC;
use crate::rotation::{RotationMode, RotationState};
use glam::{Quat, Vec2, Vec3};

/// A pointer event queued for the next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    DragStart { position: Vec2, time_ms: f64 },
    DragMove { position: Vec2, time_ms: f64 },
    DragEnd,
}

/// How a drag gesture ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// The pointer barely moved; the host may treat it as activating the
    /// image under `position`.
    Click { position: Vec2 },
    /// A real drag; `momentum` tells whether the sphere keeps spinning.
    Drag { momentum: bool },
    /// No drag was active.
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct InputController {
    origin: Option<Vec2>,
    last_time_ms: Option<f64>,
    travel: f32,
}

#[inline]
fn valid_sample(position: Vec2, time_ms: f64) -> bool {
    position.is_finite() && time_ms.is_finite()
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag at `position`. Only one drag is tracked at a time; a
    /// second start while dragging is ignored.
    pub fn drag_start(&mut self, state: &mut RotationState, position: Vec2, time_ms: f64) {
        if !valid_sample(position, time_ms) {
            log::warn!("[input] ignoring drag start with bad sample {position:?} @ {time_ms}");
            return;
        }
        if state.mode() == RotationMode::Dragging {
            log::debug!("[input] drag already active; ignoring extra pointer");
            return;
        }
        self.origin = Some(position);
        self.last_time_ms = Some(time_ms);
        self.travel = 0.0;
        state.begin_drag(position);
    }

    /// Rotate by the pointer movement since the last sample and record the
    /// instantaneous angular velocity for release.
    pub fn drag_move(
        &mut self,
        state: &mut RotationState,
        config: &ViewportConfig,
        position: Vec2,
        time_ms: f64,
    ) {
        let Some(anchor) = state.drag_anchor() else {
            return;
        };
        if !valid_sample(position, time_ms) {
            log::warn!("[input] ignoring drag move with bad sample {position:?} @ {time_ms}");
            return;
        }

        let delta = position - anchor;
        let s = config.drag_sensitivity;
        // Horizontal drag spins about the vertical axis, vertical drag about
        // the horizontal one; screen y grows downwards.
        let step = Vec3::new(delta.y * s, delta.x * s, 0.0);
        state.rotate_by(Quat::from_rotation_y(step.y) * Quat::from_rotation_x(step.x));

        let dt_sec = self
            .last_time_ms
            .map(|t| ((time_ms - t) / 1000.0) as f32)
            .unwrap_or(0.0);
        let velocity = if dt_sec.is_finite() && dt_sec >= MIN_SAMPLE_DT_SEC {
            step / dt_sec
        } else {
            Vec3::ZERO
        };
        state.set_angular_velocity(velocity);
        state.clamp_velocity(config.max_angular_speed);

        self.travel += delta.length();
        self.last_time_ms = Some(time_ms);
        state.move_anchor(position);
    }

    pub fn drag_end(&mut self, state: &mut RotationState, config: &ViewportConfig) -> Release {
        if state.mode() != RotationMode::Dragging {
            return Release::Ignored;
        }
        let origin = self.origin.take();
        let travel = std::mem::take(&mut self.travel);
        self.last_time_ms = None;

        if let Some(position) = origin.filter(|_| travel <= config.click_slop) {
            // A click should not fling the sphere.
            state.set_angular_velocity(Vec3::ZERO);
            state.end_drag(config);
            return Release::Click { position };
        }
        state.end_drag(config);
        Release::Drag {
            momentum: state.mode() == RotationMode::Decaying,
        }
    }

    /// Drop any drag in progress, e.g. when the frame loop stops before the
    /// pointer is released.
    pub fn cancel(&mut self, state: &mut RotationState) {
        self.origin = None;
        self.last_time_ms = None;
        self.travel = 0.0;
        state.cancel_drag();
    }

    /// Feed one queued event through the matching handler.
    pub fn apply(
        &mut self,
        state: &mut RotationState,
        config: &ViewportConfig,
        event: InputEvent,
    ) -> Option<Release> {
        match event {
            InputEvent::DragStart { position, time_ms } => {
                self.drag_start(state, position, time_ms);
                None
            }
            InputEvent::DragMove { position, time_ms } => {
                self.drag_move(state, config, position, time_ms);
                None
            }
            InputEvent::DragEnd => Some(self.drag_end(state, config)),
        }
    }
}
