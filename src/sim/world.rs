//! Physics world seam
//!
//! The maze core never integrates motion or resolves contacts itself. It
//! talks to a host engine through `PhysicsWorld`, which exposes just the
//! primitives the maze needs. `HeadlessWorld` is a small in-memory host used
//! by the CLI and tests: kinematic integration plus overlap-start reporting,
//! no contact response.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_rect_overlap, circles_overlap};

/// Opaque identifier of a body owned by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// What a body represents in the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    Wall,
    Goal,
    Ball,
}

/// Primitives a host physics engine provides to the maze
pub trait PhysicsWorld {
    fn create_static_rect(&mut self, center: Vec2, size: Vec2, tag: BodyTag) -> BodyHandle;
    fn create_dynamic_circle(&mut self, center: Vec2, radius: f32, tag: BodyTag) -> BodyHandle;
    fn set_body_static(&mut self, handle: BodyHandle, is_static: bool);
    fn set_position(&mut self, handle: BodyHandle, pos: Vec2);
    fn velocity(&self, handle: BodyHandle) -> Vec2;
    fn set_velocity(&mut self, handle: BodyHandle, vel: Vec2);
    /// Ambient acceleration applied to every dynamic body
    fn set_gravity(&mut self, gravity: Vec2);
    fn remove_bodies(&mut self, handles: &[BodyHandle]);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

/// A body in the headless world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub handle: BodyHandle,
    pub tag: BodyTag,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    pub is_static: bool,
}

/// In-memory `PhysicsWorld` without contact resolution
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    /// Sorted by handle for deterministic iteration
    bodies: Vec<Body>,
    gravity: Vec2,
    /// Pairs overlapping after the last step, `(lower, higher)` handle
    touching: Vec<(BodyHandle, BodyHandle)>,
    next_id: u32,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&handle, |b| b.handle)
            .ok()
            .map(|i| &self.bodies[i])
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        match self.bodies.binary_search_by_key(&handle, |b| b.handle) {
            Ok(i) => Some(&mut self.bodies[i]),
            Err(_) => {
                log::warn!("Ignoring call on unknown body {:?}", handle);
                None
            }
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn count_tagged(&self, tag: BodyTag) -> usize {
        self.bodies.iter().filter(|b| b.tag == tag).count()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn insert(&mut self, tag: BodyTag, shape: Shape, pos: Vec2, is_static: bool) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        // Handles grow monotonically, so pushing keeps the order
        self.bodies.push(Body {
            handle,
            tag,
            shape,
            pos,
            vel: Vec2::ZERO,
            is_static,
        });
        handle
    }

    /// Advance dynamic bodies by `dt` and return pairs that started
    /// overlapping during this step
    pub fn step(&mut self, dt: f32) -> Vec<(BodyHandle, BodyHandle)> {
        let gravity = self.gravity;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.vel += gravity * dt;
            body.pos += body.vel * dt;
        }

        let now = self.overlapping_pairs();
        let started = now
            .iter()
            .filter(|pair| !self.touching.contains(pair))
            .copied()
            .collect();
        self.touching = now;
        started
    }

    /// All pairs involving at least one circle that currently overlap
    pub fn overlapping_pairs(&self) -> Vec<(BodyHandle, BodyHandle)> {
        let mut pairs = Vec::new();
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                if overlaps(a, b) {
                    pairs.push((a.handle, b.handle));
                }
            }
        }
        pairs
    }
}

fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circles_overlap(a.pos, ra, b.pos, rb)
        }
        (Shape::Circle { radius }, Shape::Rect { size }) => {
            circle_rect_overlap(a.pos, radius, b.pos, size)
        }
        (Shape::Rect { size }, Shape::Circle { radius }) => {
            circle_rect_overlap(b.pos, radius, a.pos, size)
        }
        (Shape::Rect { .. }, Shape::Rect { .. }) => false,
    }
}

impl PhysicsWorld for HeadlessWorld {
    fn create_static_rect(&mut self, center: Vec2, size: Vec2, tag: BodyTag) -> BodyHandle {
        self.insert(tag, Shape::Rect { size }, center, true)
    }

    fn create_dynamic_circle(&mut self, center: Vec2, radius: f32, tag: BodyTag) -> BodyHandle {
        self.insert(tag, Shape::Circle { radius }, center, false)
    }

    fn set_body_static(&mut self, handle: BodyHandle, is_static: bool) {
        if let Some(body) = self.body_mut(handle) {
            body.is_static = is_static;
            if is_static {
                body.vel = Vec2::ZERO;
            }
        }
    }

    /// Teleports also reset the body's overlap history, so an overlap at the
    /// new position is reported as a fresh start
    fn set_position(&mut self, handle: BodyHandle, pos: Vec2) {
        if let Some(body) = self.body_mut(handle) {
            body.pos = pos;
            self.touching.retain(|(a, b)| *a != handle && *b != handle);
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Vec2 {
        self.body(handle).map(|b| b.vel).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, handle: BodyHandle, vel: Vec2) {
        if let Some(body) = self.body_mut(handle) {
            body.vel = vel;
        }
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn remove_bodies(&mut self, handles: &[BodyHandle]) {
        self.bodies.retain(|b| !handles.contains(&b.handle));
        self.touching
            .retain(|(a, b)| !handles.contains(a) && !handles.contains(b));
    }
}
