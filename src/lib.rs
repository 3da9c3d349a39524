//! Maze Ball - roll a ball through a procedurally generated maze
//!
//! Core modules:
//! - `sim`: Deterministic maze carving, wall geometry, and session state
//! - `settings`: Maze configuration and presets
//! - `error`: Error taxonomy

pub mod error;
pub mod settings;
pub mod sim;

pub use error::MazeError;
pub use settings::{MazeConfig, MazePreset};

/// Default tuning constants
pub mod consts {
    /// Fixed timestep for headless stepping (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 700.0;
    pub const PLAYFIELD_HEIGHT: f32 = 700.0;
    /// Cells per side of the classic maze
    pub const GRID_CELLS: usize = 16;
    /// Largest maze accepted (2048 × 2048 cells)
    pub const MAX_GRID_CELLS: usize = 1 << 22;

    pub const WALL_THICKNESS: f32 = 5.0;
    /// Velocity added per directional key press
    pub const VELOCITY_BUMP: f32 = 2.0;
    /// Ambient downward gravity once the goal is reached
    pub const POST_WIN_GRAVITY: f32 = 0.5;
}
