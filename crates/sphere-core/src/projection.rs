//! Perspective projection of rotated rest positions into container pixels.
//!
//! Everything here is a pure function of the orientation, the fixed node
//! positions and the config, so a frame can be replayed exactly.

use crate::config::ViewportConfig;
use crate::node::ImageNode;
use glam::{Quat, Vec2, Vec3};
use std::cmp::Ordering;

/// Screen-space attributes of one projected point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen_position: Vec2,
    pub scale: f32,
    pub opacity: f32,
    pub depth: f32,
}

/// `d / (d − z)` clamped into the configured scale range.
#[inline]
pub fn perspective_scale(z: f32, config: &ViewportConfig) -> f32 {
    let d = config.perspective_distance;
    let raw = d / (d - z);
    if raw.is_finite() && raw > 0.0 {
        raw.clamp(config.min_scale, config.max_scale)
    } else {
        // Only reachable at or behind the eye plane; treat as nearest.
        config.max_scale
    }
}

/// Opacity rises linearly from `min_opacity` at the far pole to 1 at the
/// near pole.
#[inline]
pub fn depth_opacity(z: f32, config: &ViewportConfig) -> f32 {
    let t = ((z / config.radius + 1.0) * 0.5).clamp(0.0, 1.0);
    let t = if t.is_finite() { t } else { 0.0 };
    (config.min_opacity + (1.0 - config.min_opacity) * t).clamp(config.min_opacity, 1.0)
}

/// Project a single rest position under `orientation`.
pub fn project_point(orientation: Quat, rest_position: Vec3, config: &ViewportConfig) -> Projected {
    let p = orientation * rest_position;
    let scale = perspective_scale(p.z, config);
    Projected {
        screen_position: config.center() + Vec2::new(p.x, -p.y) * scale,
        scale,
        opacity: depth_opacity(p.z, config),
        depth: p.z,
    }
}

/// Overwrite the derived fields of every node and rebuild `order` as the
/// back-to-front draw order (depth ascending, ties by id).
pub fn project_nodes(
    orientation: Quat,
    nodes: &mut [ImageNode],
    order: &mut Vec<usize>,
    config: &ViewportConfig,
) {
    for node in nodes.iter_mut() {
        let p = project_point(orientation, node.rest_position, config);
        node.screen_position = p.screen_position;
        node.scale = p.scale;
        node.opacity = p.opacity;
        node.depth = p.depth;
    }

    order.clear();
    order.extend(0..nodes.len());
    order.sort_by(|&a, &b| {
        nodes[a]
            .depth
            .partial_cmp(&nodes[b].depth)
            .unwrap_or(Ordering::Equal)
            .then_with(|| nodes[a].id.cmp(&nodes[b].id))
    });
    for (rank, &i) in order.iter().enumerate() {
        nodes[i].z_index = rank;
    }
}
