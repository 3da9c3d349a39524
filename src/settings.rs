//! Maze configuration
//!
//! One parameterized config covers every maze variant; presets fill it with
//! tuned values. Configs round-trip through JSON so they can live on disk.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, Result};
use crate::sim::grid::checked_cell_count;

/// Named maze variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MazePreset {
    /// 16×16 square, gentle post-win drift
    #[default]
    Classic,
    /// Small 6×6 warm-up, no post-win effect
    Compact,
    /// Landscape 10×14 with a speed cap
    Wide,
    /// 24×24 with thin walls and slow, capped nudges
    Dense,
    /// 12×12 whose walls fall apart once the goal is reached
    Collapse,
}

impl MazePreset {
    pub const ALL: [MazePreset; 5] = [
        MazePreset::Classic,
        MazePreset::Compact,
        MazePreset::Wide,
        MazePreset::Dense,
        MazePreset::Collapse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MazePreset::Classic => "Classic",
            MazePreset::Compact => "Compact",
            MazePreset::Wide => "Wide",
            MazePreset::Dense => "Dense",
            MazePreset::Collapse => "Collapse",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(MazePreset::Classic),
            "compact" | "small" => Some(MazePreset::Compact),
            "wide" => Some(MazePreset::Wide),
            "dense" => Some(MazePreset::Dense),
            "collapse" => Some(MazePreset::Collapse),
            _ => None,
        }
    }
}

/// Everything needed to build and play one maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    /// Cell width in world units
    pub unit_width: f32,
    /// Cell height in world units
    pub unit_height: f32,
    pub wall_thickness: f32,
    /// Ball radius; a quarter of the smaller cell side when unset
    #[serde(default)]
    pub ball_radius: Option<f32>,

    // === Input ===
    /// Velocity added per directional key press
    #[serde(default = "default_velocity_bump")]
    pub velocity_bump: f32,
    /// Maximum ball speed after a nudge
    #[serde(default)]
    pub velocity_cap: Option<f32>,

    // === Post-win ===
    /// Free the inner walls and the goal once the ball reaches the goal
    #[serde(default)]
    pub post_win_relaxation: bool,
    /// Downward ambient gravity switched on after a win
    #[serde(default)]
    pub post_win_gravity: Option<f32>,
}

fn default_velocity_bump() -> f32 {
    VELOCITY_BUMP
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::from_preset(MazePreset::Classic)
    }
}

impl MazeConfig {
    /// Config whose cells evenly divide a `width × height` playfield
    pub fn fit(rows: usize, columns: usize, width: f32, height: f32) -> Self {
        let columns_f = columns.max(1) as f32;
        let rows_f = rows.max(1) as f32;
        Self {
            rows,
            columns,
            unit_width: width / columns_f,
            unit_height: height / rows_f,
            wall_thickness: WALL_THICKNESS,
            ball_radius: None,
            velocity_bump: VELOCITY_BUMP,
            velocity_cap: None,
            post_win_relaxation: false,
            post_win_gravity: None,
        }
    }

    pub fn from_preset(preset: MazePreset) -> Self {
        match preset {
            MazePreset::Classic => Self {
                post_win_gravity: Some(POST_WIN_GRAVITY),
                ..Self::fit(GRID_CELLS, GRID_CELLS, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
            },
            MazePreset::Compact => Self {
                velocity_bump: 5.0,
                ..Self::fit(6, 6, 600.0, 600.0)
            },
            MazePreset::Wide => Self {
                velocity_bump: 3.0,
                velocity_cap: Some(8.0),
                post_win_gravity: Some(POST_WIN_GRAVITY),
                ..Self::fit(10, 14, 840.0, 600.0)
            },
            MazePreset::Dense => Self {
                wall_thickness: 3.0,
                velocity_bump: 1.5,
                velocity_cap: Some(5.0),
                ..Self::fit(24, 24, 720.0, 720.0)
            },
            MazePreset::Collapse => Self {
                velocity_cap: Some(6.0),
                post_win_relaxation: true,
                post_win_gravity: Some(POST_WIN_GRAVITY),
                ..Self::fit(12, 12, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
            },
        }
    }

    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.unit_width, self.unit_height)
    }

    /// Full playfield size
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.unit_width,
            self.rows as f32 * self.unit_height,
        )
    }

    /// Effective ball radius
    pub fn ball_radius(&self) -> f32 {
        self.ball_radius
            .unwrap_or_else(|| self.unit_width.min(self.unit_height) / 4.0)
    }

    /// Reject configs that cannot produce a playable maze
    pub fn validate(&self) -> Result<()> {
        checked_cell_count(self.rows, self.columns)?;
        if !(positive(self.unit_width) && positive(self.unit_height)) {
            return Err(MazeError::InvalidConfig(format!(
                "cell size must be positive (got {}x{})",
                self.unit_width, self.unit_height
            )));
        }
        if !positive(self.wall_thickness) {
            return Err(MazeError::InvalidConfig(format!(
                "wall thickness must be positive (got {})",
                self.wall_thickness
            )));
        }
        let radius = self.ball_radius();
        if !positive(radius) || radius * 2.0 >= self.unit_width.min(self.unit_height) {
            return Err(MazeError::InvalidConfig(format!(
                "ball radius {} does not fit a {}x{} cell",
                radius, self.unit_width, self.unit_height
            )));
        }
        if !self.velocity_bump.is_finite() || self.velocity_bump < 0.0 {
            return Err(MazeError::InvalidConfig(format!(
                "velocity bump must be non-negative (got {})",
                self.velocity_bump
            )));
        }
        if let Some(cap) = self.velocity_cap {
            if !positive(cap) {
                return Err(MazeError::InvalidConfig(format!(
                    "velocity cap must be positive (got {cap})"
                )));
            }
        }
        if let Some(gravity) = self.post_win_gravity {
            if !gravity.is_finite() {
                return Err(MazeError::InvalidConfig(
                    "post-win gravity must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {}x{} maze config from {}",
            config.rows,
            config.columns,
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Maze config saved to {}", path.as_ref().display());
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
