//! Overlap tests between the ball and other bodies
//!
//! Everything in the maze is either an axis-aligned rectangle (walls, goal)
//! or a circle (ball). Only overlap detection is needed here: resolving
//! contacts belongs to whichever physics engine hosts the maze.

use glam::Vec2;

/// Whether a circle overlaps an axis-aligned rectangle given by center and size
pub fn circle_rect_overlap(
    circle_pos: Vec2,
    radius: f32,
    rect_center: Vec2,
    rect_size: Vec2,
) -> bool {
    let half = rect_size / 2.0;
    let closest = circle_pos.clamp(rect_center - half, rect_center + half);
    circle_pos.distance(closest) < radius
}

/// Whether two circles overlap
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}
