use glam::{Vec2, Vec3};
use std::sync::Arc;

/// An image as supplied by the host: a stable id plus an opaque handle the
/// engine passes through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSource {
    pub id: String,
    pub source_ref: String,
}

impl ImageSource {
    pub fn new(id: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_ref: source_ref.into(),
        }
    }
}

/// One image placed on the sphere.
///
/// `spherical_position` and `rest_position` are fixed when the sphere is
/// built. Everything below them is rewritten by projection and collision
/// every frame.
#[derive(Clone, Debug)]
pub struct ImageNode {
    pub id: Arc<str>,
    pub source_ref: Arc<str>,
    /// Unit direction from the sphere centre.
    pub spherical_position: Vec3,
    /// `spherical_position * radius`.
    pub rest_position: Vec3,

    pub screen_position: Vec2,
    pub scale: f32,
    pub opacity: f32,
    /// Rotated z; larger is nearer the viewer.
    pub depth: f32,
    pub z_index: usize,
}

impl ImageNode {
    pub fn new(source: &ImageSource, direction: Vec3, radius: f32) -> Self {
        Self {
            id: Arc::from(source.id.as_str()),
            source_ref: Arc::from(source.source_ref.as_str()),
            spherical_position: direction,
            rest_position: direction * radius,
            screen_position: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
            depth: 0.0,
            z_index: 0,
        }
    }
}

/// Per-frame output handed to the presentation layer. Emitted back to front,
/// so `z_index` also equals the position in the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderNode {
    pub id: Arc<str>,
    pub screen_position: Vec2,
    pub scale: f32,
    pub opacity: f32,
    pub z_index: usize,
}
