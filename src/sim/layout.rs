//! Maze to wall geometry
//!
//! Turns a carved `WallGrid` into axis-aligned rectangles for the physics
//! world. Only closed walls produce geometry; a missing rectangle is the only
//! sign of a passage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, WallGrid};

/// Which wall a rectangle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Outer frame, always present
    Boundary,
    /// Closed entry of the horizontal table (below `row`)
    Horizontal { row: usize, column: usize },
    /// Closed entry of the vertical table (right of `column`)
    Vertical { row: usize, column: usize },
}

/// A static rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub center: Vec2,
    pub size: Vec2,
    pub kind: WallKind,
}

impl WallSpec {
    pub fn is_inner(&self) -> bool {
        self.kind != WallKind::Boundary
    }
}

/// Geometry for one maze instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub walls: Vec<WallSpec>,
    /// Center of cell (0, 0)
    pub start: Vec2,
    /// Center of the bottom-right cell
    pub goal: Vec2,
    /// Size of one cell
    pub unit: Vec2,
    /// Full playfield size (`columns × unit.x`, `rows × unit.y`)
    pub bounds: Vec2,
}

impl MazeLayout {
    /// Goal marker size, half a cell each way
    pub fn goal_size(&self) -> Vec2 {
        self.unit / 2.0
    }

    /// Center of an arbitrary cell
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            cell.column as f32 * self.unit.x + self.unit.x / 2.0,
            cell.row as f32 * self.unit.y + self.unit.y / 2.0,
        )
    }

    pub fn inner_walls(&self) -> impl Iterator<Item = &WallSpec> {
        self.walls.iter().filter(|w| w.is_inner())
    }
}

/// Build the wall rectangles for a carved maze
///
/// Emits the four boundary walls first, then closed horizontal walls and
/// closed vertical walls, each row-major.
pub fn export_layout(grid: &WallGrid, unit: Vec2, wall_thickness: f32) -> MazeLayout {
    let bounds = Vec2::new(
        grid.columns() as f32 * unit.x,
        grid.rows() as f32 * unit.y,
    );
    let mut walls = Vec::with_capacity(4 + grid.cell_count() * 2);

    walls.extend(boundary_walls(bounds, wall_thickness));

    for row in 0..grid.rows().saturating_sub(1) {
        for (column, &open) in grid.horizontal_row(row).iter().enumerate() {
            if open {
                continue;
            }
            walls.push(WallSpec {
                center: Vec2::new(
                    column as f32 * unit.x + unit.x / 2.0,
                    row as f32 * unit.y + unit.y,
                ),
                size: Vec2::new(unit.x, wall_thickness),
                kind: WallKind::Horizontal { row, column },
            });
        }
    }

    for row in 0..grid.rows() {
        for (column, &open) in grid.vertical_row(row).iter().enumerate() {
            if open {
                continue;
            }
            walls.push(WallSpec {
                center: Vec2::new(
                    column as f32 * unit.x + unit.x,
                    row as f32 * unit.y + unit.y / 2.0,
                ),
                size: Vec2::new(wall_thickness, unit.y),
                kind: WallKind::Vertical { row, column },
            });
        }
    }

    MazeLayout {
        walls,
        start: unit / 2.0,
        goal: bounds - unit / 2.0,
        unit,
        bounds,
    }
}

/// Top, bottom, left and right edges of the playfield
fn boundary_walls(bounds: Vec2, thickness: f32) -> [WallSpec; 4] {
    let (w, h) = (bounds.x, bounds.y);
    let wall = |center: Vec2, size: Vec2| WallSpec {
        center,
        size,
        kind: WallKind::Boundary,
    };
    [
        wall(Vec2::new(w / 2.0, 0.0), Vec2::new(w, thickness)),
        wall(Vec2::new(w / 2.0, h), Vec2::new(w, thickness)),
        wall(Vec2::new(0.0, h / 2.0), Vec2::new(thickness, h)),
        wall(Vec2::new(w, h / 2.0), Vec2::new(thickness, h)),
    ]
}
