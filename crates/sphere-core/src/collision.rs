//! Screen-space overlap relaxation.
//!
//! After projection every node is a circle of radius
//! `base_image_radius * scale`. Pairs that overlap by more than the padding
//! tolerance are pushed apart along their centre line. The solver runs a
//! fixed number of passes and may leave some overlap in dense layouts.
//! Offsets live only for the current frame; the next projection starts from
//! the untouched rest layout again.

use crate::config::ViewportConfig;
use crate::constants::GOLDEN_ANGLE;
use crate::node::ImageNode;
use glam::Vec2;
use smallvec::SmallVec;

const COINCIDENT_EPS: f32 = 1.0e-4;

#[derive(Clone, Copy, Debug)]
struct Contact {
    a: usize,
    b: usize,
    /// Unit vector from `a` towards `b`.
    normal: Vec2,
    /// Overlap beyond the padding tolerance, in pixels.
    depth: f32,
}

/// Summary of one `resolve` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Passes that found at least one contact.
    pub passes: u32,
    /// Contacts seen in the first pass.
    pub initial_contacts: usize,
}

#[derive(Debug, Default)]
pub struct CollisionResolver {
    offsets: Vec<Vec2>,
    contacts: SmallVec<[Contact; 16]>,
}

#[inline]
fn footprint(node: &ImageNode, config: &ViewportConfig) -> f32 {
    config.base_image_radius * node.scale
}

/// Separation direction for two nodes projected onto the same pixel.
#[inline]
fn fallback_normal(a: usize, b: usize) -> Vec2 {
    let theta = (a + b) as f32 * GOLDEN_ANGLE;
    Vec2::new(theta.cos(), theta.sin())
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nudge overlapping nodes apart in place. Nodes that touch nothing keep
    /// their projected `screen_position` bit for bit.
    pub fn resolve(&mut self, nodes: &mut [ImageNode], config: &ViewportConfig) -> CollisionStats {
        let mut stats = CollisionStats::default();
        let n = nodes.len();
        if n < 2 || config.collision_passes == 0 || config.base_image_radius <= 0.0 {
            return stats;
        }

        self.offsets.clear();
        self.offsets.resize(n, Vec2::ZERO);

        for pass in 0..config.collision_passes {
            self.find_contacts(nodes, config);
            if pass == 0 {
                stats.initial_contacts = self.contacts.len();
            }
            if self.contacts.is_empty() {
                break;
            }
            stats.passes += 1;

            for c in &self.contacts {
                let push = c.normal * (c.depth * 0.5);
                self.offsets[c.a] -= push;
                self.offsets[c.b] += push;
            }
            for offset in &mut self.offsets {
                *offset = offset.clamp_length_max(config.max_collision_displacement);
            }
        }

        for (node, offset) in nodes.iter_mut().zip(&self.offsets) {
            if *offset != Vec2::ZERO {
                node.screen_position += *offset;
            }
        }
        if stats.passes > 0 {
            log::trace!(
                "[collision] {} contacts, {} passes",
                stats.initial_contacts,
                stats.passes
            );
        }
        stats
    }

    fn find_contacts(&mut self, nodes: &[ImageNode], config: &ViewportConfig) {
        self.contacts.clear();
        for a in 0..nodes.len() {
            let pa = nodes[a].screen_position + self.offsets[a];
            let ra = footprint(&nodes[a], config);
            for b in (a + 1)..nodes.len() {
                let pb = nodes[b].screen_position + self.offsets[b];
                let delta = pb - pa;
                let dist = delta.length();
                let depth = ra + footprint(&nodes[b], config) - dist - config.collision_padding;
                if depth.is_nan() || depth <= 0.0 {
                    continue;
                }
                let normal = if dist > COINCIDENT_EPS {
                    delta / dist
                } else {
                    fallback_normal(a, b)
                };
                self.contacts.push(Contact {
                    a,
                    b,
                    normal,
                    depth,
                });
            }
        }
    }
}
