//! Deterministic maze core
//!
//! Everything that decides what the maze looks like lives here. This module
//! must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (row-major cells, ascending body handles)
//! - No rendering or platform dependencies; physics goes through `PhysicsWorld`

pub mod carve;
pub mod collision;
pub mod grid;
pub mod input;
pub mod layout;
pub mod random;
pub mod state;
pub mod world;

pub use carve::{Maze, generate};
pub use collision::{circle_rect_overlap, circles_overlap};
pub use grid::{Cell, Direction, WallGrid};
pub use input::{Nudge, apply_nudge};
pub use layout::{MazeLayout, WallKind, WallSpec, export_layout};
pub use random::{FixedSequence, RandomSource};
pub use state::{GameEvent, GamePhase, MazeSession};
pub use world::{Body, BodyHandle, BodyTag, HeadlessWorld, PhysicsWorld, Shape};
