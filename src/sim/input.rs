//! Directional velocity nudges
//!
//! Each key press adds a fixed bump to one velocity axis of the ball. Screen
//! coordinates: +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One directional nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

impl Nudge {
    /// Map a keyboard key name (`ArrowUp`, `w`, ...) to a nudge
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Nudge::Up),
            "ArrowDown" | "s" | "S" => Some(Nudge::Down),
            "ArrowLeft" | "a" | "A" => Some(Nudge::Left),
            "ArrowRight" | "d" | "D" => Some(Nudge::Right),
            _ => None,
        }
    }

    /// Unit vector for this nudge
    pub fn direction(self) -> Vec2 {
        match self {
            Nudge::Up => Vec2::NEG_Y,
            Nudge::Down => Vec2::Y,
            Nudge::Left => Vec2::NEG_X,
            Nudge::Right => Vec2::X,
        }
    }
}

/// New velocity after a nudge, with optional speed cap
pub fn apply_nudge(vel: Vec2, nudge: Nudge, bump: f32, cap: Option<f32>) -> Vec2 {
    let vel = vel + nudge.direction() * bump;
    match cap {
        Some(max) => vel.clamp_length_max(max),
        None => vel,
    }
}
