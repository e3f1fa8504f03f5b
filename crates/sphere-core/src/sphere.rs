//! The sphere handle: owns the node arena, rotation state and per-frame
//! buffers, and runs one animation step per `tick`.

use crate::collision::CollisionResolver;
use crate::config::ViewportConfig;
use crate::error::SphereError;
use crate::frame::FrameClock;
use crate::input::{InputController, InputEvent, Release};
use crate::layout::fibonacci_directions;
use crate::node::{ImageNode, ImageSource, RenderNode};
use crate::projection::project_nodes;
use crate::rotation::{RotationMode, RotationState};
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use instant::Instant;
use std::collections::VecDeque;
use std::sync::Arc;

pub struct Sphere {
    config: ViewportConfig,
    nodes: Vec<ImageNode>,
    index: FnvHashMap<Arc<str>, usize>,
    rotation: RotationState,
    input: InputController,
    clock: FrameClock,
    resolver: CollisionResolver,
    pending: VecDeque<InputEvent>,
    last_release: Option<Release>,
    // reused every frame
    order: Vec<usize>,
    frame: Vec<RenderNode>,
}

/// Build the full node set before anything is swapped in, so a failed
/// rebuild leaves the previous set intact.
fn build_nodes(
    images: &[ImageSource],
    directions: Vec<Vec3>,
    radius: f32,
) -> Result<(Vec<ImageNode>, FnvHashMap<Arc<str>, usize>), SphereError> {
    let mut index = FnvHashMap::default();
    index.reserve(images.len());
    let mut nodes = Vec::with_capacity(images.len());
    for (i, (image, direction)) in images.iter().zip(directions).enumerate() {
        let node = ImageNode::new(image, direction, radius);
        if index.insert(node.id.clone(), i).is_some() {
            return Err(SphereError::DuplicateId(image.id.clone()));
        }
        nodes.push(node);
    }
    Ok((nodes, index))
}

impl Sphere {
    pub fn new(images: Vec<ImageSource>, config: ViewportConfig) -> Result<Self, SphereError> {
        config.validate()?;
        let (nodes, index) =
            build_nodes(&images, fibonacci_directions(images.len()), config.radius)?;
        log::info!(
            "[sphere] created: images={} radius={:.1} container={:.0}x{:.0} auto_rotate={}",
            nodes.len(),
            config.radius,
            config.container.x,
            config.container.y,
            config.auto_rotate
        );

        let mut sphere = Self {
            rotation: RotationState::new(config.auto_rotate),
            config,
            nodes,
            index,
            input: InputController::new(),
            clock: FrameClock::new(),
            resolver: CollisionResolver::new(),
            pending: VecDeque::new(),
            last_release: None,
            order: Vec::new(),
            frame: Vec::new(),
        };
        sphere.render();
        Ok(sphere)
    }

    #[inline]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[inline]
    pub fn nodes(&self) -> &[ImageNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&ImageNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    #[inline]
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Overwrite the residual spin; it is clamped on the next tick.
    pub fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.rotation.set_angular_velocity(velocity);
    }

    #[inline]
    pub fn mode(&self) -> RotationMode {
        self.rotation.mode()
    }

    /// The most recent frame, back to front.
    #[inline]
    pub fn frame(&self) -> &[RenderNode] {
        &self.frame
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    // ---------------- Input (dropped while stopped) ----------------

    pub fn drag_start(&mut self, position: Vec2, time_ms: f64) {
        if !self.clock.is_running() {
            return;
        }
        self.input.drag_start(&mut self.rotation, position, time_ms);
    }

    pub fn drag_move(&mut self, position: Vec2, time_ms: f64) {
        if !self.clock.is_running() {
            return;
        }
        self.input
            .drag_move(&mut self.rotation, &self.config, position, time_ms);
    }

    pub fn drag_end(&mut self) -> Release {
        if !self.clock.is_running() {
            return Release::Ignored;
        }
        let release = self.input.drag_end(&mut self.rotation, &self.config);
        log::debug!("[input] release {:?}", release);
        release
    }

    /// Queue an event for the next tick. Queued events are applied in
    /// arrival order before physics runs.
    pub fn push_event(&mut self, event: InputEvent) {
        if !self.clock.is_running() {
            return;
        }
        self.pending.push_back(event);
    }

    /// Release produced by the last queued `DragEnd`, if not yet taken.
    pub fn take_release(&mut self) -> Option<Release> {
        self.last_release.take()
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.rotation.set_auto_rotate(enabled);
    }

    // ---------------- Frame loop ----------------

    /// Advance by a host-measured elapsed time and return the new frame.
    /// While stopped, the previous frame is returned and nothing changes.
    pub fn tick(&mut self, elapsed_ms: f64) -> &[RenderNode] {
        if let Some(dt) = self.clock.step_elapsed(elapsed_ms) {
            self.advance(dt);
        }
        &self.frame
    }

    /// Advance using the clock's own previous timestamp.
    pub fn tick_at(&mut self, now: Instant) -> &[RenderNode] {
        if let Some(dt) = self.clock.step_at(now) {
            self.advance(dt);
        }
        &self.frame
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    /// Stop the loop. A drag still in progress is cancelled, since its
    /// release would be dropped while stopped.
    pub fn stop(&mut self) {
        self.clock.stop();
        self.pending.clear();
        self.input.cancel(&mut self.rotation);
    }

    /// Stop the loop and release the instance.
    pub fn destroy(mut self) {
        self.stop();
        log::info!("[sphere] destroyed ({} images)", self.nodes.len());
    }

    fn advance(&mut self, dt_sec: f32) {
        while let Some(event) = self.pending.pop_front() {
            if let Some(release) = self.input.apply(&mut self.rotation, &self.config, event) {
                self.last_release = Some(release);
            }
        }
        self.rotation.integrate(dt_sec, &self.config);
        self.render();
    }

    /// Project, resolve collisions and rebuild the output frame. Does not
    /// touch rotation state.
    fn render(&mut self) {
        project_nodes(
            self.rotation.orientation(),
            &mut self.nodes,
            &mut self.order,
            &self.config,
        );
        self.resolver.resolve(&mut self.nodes, &self.config);

        self.frame.clear();
        self.frame.extend(self.order.iter().map(|&i| {
            let n = &self.nodes[i];
            RenderNode {
                id: n.id.clone(),
                screen_position: n.screen_position,
                scale: n.scale,
                opacity: n.opacity,
                z_index: n.z_index,
            }
        }));
        log::trace!(
            "[frame] mode={:?} nodes={}",
            self.rotation.mode(),
            self.frame.len()
        );
    }

    // ---------------- Reconfiguration ----------------

    /// Adopt a new container size. Only screen-space values are recomputed.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SphereError> {
        let config = self.config.with_container(width, height);
        config.validate()?;
        self.config = config;
        self.render();
        Ok(())
    }

    /// Replace the image set. The layout is rerun only when the count
    /// changes; either way the new nodes replace the old ones in one step.
    pub fn set_images(&mut self, images: Vec<ImageSource>) -> Result<(), SphereError> {
        let directions = if images.len() == self.nodes.len() {
            self.nodes.iter().map(|n| n.spherical_position).collect()
        } else {
            fibonacci_directions(images.len())
        };
        let (nodes, index) = build_nodes(&images, directions, self.config.radius)?;
        log::info!(
            "[sphere] image set replaced: {} -> {}",
            self.nodes.len(),
            nodes.len()
        );
        self.nodes = nodes;
        self.index = index;
        self.render();
        Ok(())
    }

    // ---------------- Picking ----------------

    /// Front-most node whose footprint contains `point`.
    pub fn node_at(&self, point: Vec2) -> Option<&ImageNode> {
        if !point.is_finite() {
            return None;
        }
        self.order.iter().rev().map(|&i| &self.nodes[i]).find(|n| {
            let r = self.config.base_image_radius * n.scale;
            n.screen_position.distance_squared(point) <= r * r
        })
    }
}
