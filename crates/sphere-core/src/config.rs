use crate::constants::*;
use crate::error::SphereError;
use glam::{Vec2, Vec3};

/// Per-instance viewport and physics tuning.
///
/// A config is fixed for the lifetime of a [`crate::Sphere`]; changing it
/// means building a new value (see [`ViewportConfig::with_container`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Container size in pixels (width, height).
    pub container: Vec2,
    pub radius: f32,
    /// Distance from the viewer to the sphere centre, in the same pixel units
    /// as `radius`. Must exceed the radius so the near pole stays in front.
    pub perspective_distance: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub min_opacity: f32,
    /// Footprint radius of an image at scale 1.0.
    pub base_image_radius: f32,
    pub collision_padding: f32,
    pub collision_passes: u32,
    pub max_collision_displacement: f32,
    /// Fraction of angular velocity left after one second of free spin.
    pub momentum_decay: f32,
    pub velocity_epsilon: f32,
    pub max_angular_speed: f32,
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    pub auto_rotate_speed: f32,
    pub auto_rotate_axis: Vec3,
    /// Whether auto-rotation starts enabled.
    pub auto_rotate: bool,
    pub click_slop: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            container: Vec2::from(DEFAULT_CONTAINER_SIZE),
            radius: DEFAULT_RADIUS,
            perspective_distance: DEFAULT_PERSPECTIVE_DISTANCE,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            min_opacity: DEFAULT_MIN_OPACITY,
            base_image_radius: DEFAULT_BASE_IMAGE_RADIUS,
            collision_padding: DEFAULT_COLLISION_PADDING,
            collision_passes: DEFAULT_COLLISION_PASSES,
            max_collision_displacement: DEFAULT_MAX_COLLISION_DISPLACEMENT,
            momentum_decay: DEFAULT_MOMENTUM_DECAY,
            velocity_epsilon: DEFAULT_VELOCITY_EPSILON,
            max_angular_speed: DEFAULT_MAX_ANGULAR_SPEED,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            auto_rotate_speed: DEFAULT_AUTO_ROTATE_SPEED,
            auto_rotate_axis: DEFAULT_AUTO_ROTATE_AXIS,
            auto_rotate: false,
            click_slop: DEFAULT_CLICK_SLOP,
        }
    }
}

impl ViewportConfig {
    /// Centre of the container in pixels.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.container * 0.5
    }

    /// Copy of this config for a resized container.
    pub fn with_container(&self, width: f32, height: f32) -> Self {
        Self {
            container: Vec2::new(width, height),
            ..self.clone()
        }
    }

    /// Reject values the engine cannot work with. Called by `Sphere::new`.
    pub fn validate(&self) -> Result<(), SphereError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SphereError::InvalidRadius(self.radius));
        }
        let invalid = |msg: String| Err(SphereError::InvalidConfig(msg));

        if !self.container.is_finite() || self.container.min_element() < 0.0 {
            return invalid(format!("container size {:?}", self.container));
        }
        if !(self.perspective_distance.is_finite() && self.perspective_distance > self.radius) {
            return invalid(format!(
                "perspective distance {} must exceed radius {}",
                self.perspective_distance, self.radius
            ));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite())
        {
            return invalid(format!(
                "scale range [{}, {}]",
                self.min_scale, self.max_scale
            ));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return invalid(format!("min opacity {}", self.min_opacity));
        }
        if !(self.momentum_decay > 0.0 && self.momentum_decay < 1.0) {
            return invalid(format!(
                "momentum decay {} must be in (0, 1)",
                self.momentum_decay
            ));
        }
        if self.collision_passes > MAX_COLLISION_PASSES {
            return invalid(format!(
                "collision passes {} exceeds {MAX_COLLISION_PASSES}",
                self.collision_passes
            ));
        }
        let non_negative = [
            ("base image radius", self.base_image_radius),
            ("collision padding", self.collision_padding),
            ("max collision displacement", self.max_collision_displacement),
            ("velocity epsilon", self.velocity_epsilon),
            ("max angular speed", self.max_angular_speed),
            ("drag sensitivity", self.drag_sensitivity),
            ("auto-rotate speed", self.auto_rotate_speed),
            ("click slop", self.click_slop),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} {value}"));
            }
        }
        if !self.auto_rotate_axis.is_finite() || self.auto_rotate_axis.length_squared() == 0.0 {
            return invalid(format!("auto-rotate axis {:?}", self.auto_rotate_axis));
        }
        Ok(())
    }
}
