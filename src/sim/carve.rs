//! Randomized depth-first maze carving (recursive backtracker)
//!
//! Uses an explicit frame stack instead of call recursion, so grid size is not
//! limited by thread stack depth. Random draws happen in exactly the order a
//! recursive implementation would make them: start row, start column, then a
//! four-element Fisher-Yates shuffle each time a cell is first entered.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, WallGrid};
use super::random::RandomSource;
use crate::error::Result;

/// A generated maze instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    /// Seed the carve RNG was created from
    pub seed: u64,
    /// Cell the carve started from
    pub origin: Cell,
    pub walls: WallGrid,
}

impl Maze {
    /// Generate a maze reproducibly from a seed
    pub fn generate(rows: usize, columns: usize, seed: u64) -> Result<Self> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (walls, origin) = carve(rows, columns, &mut rng)?;
        Ok(Self {
            seed,
            origin,
            walls,
        })
    }

    /// Top-left cell, where the ball starts
    pub fn start_cell(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Bottom-right cell, where the goal sits
    pub fn goal_cell(&self) -> Cell {
        Cell::new(self.walls.rows() - 1, self.walls.columns() - 1)
    }

    /// Cells from start to goal
    pub fn solution(&self) -> Vec<Cell> {
        self.walls
            .path(self.start_cell(), self.goal_cell())
            .unwrap_or_default()
    }
}

/// Carve a perfect maze and return its wall tables
pub fn generate<R: RandomSource + ?Sized>(
    rows: usize,
    columns: usize,
    rng: &mut R,
) -> Result<WallGrid> {
    carve(rows, columns, rng).map(|(walls, _)| walls)
}

/// One pending cell on the carve stack
struct Frame {
    cell: Cell,
    candidates: [Direction; 4],
    next: usize,
}

fn carve<R: RandomSource + ?Sized>(
    rows: usize,
    columns: usize,
    rng: &mut R,
) -> Result<(WallGrid, Cell)> {
    let mut walls = WallGrid::new(rows, columns)?;
    let mut visited = vec![false; rows * columns];

    let origin = Cell::new(rng.below(rows), rng.below(columns));
    visited[walls.index(origin)] = true;
    let mut stack = vec![Frame {
        cell: origin,
        candidates: shuffled_directions(rng),
        next: 0,
    }];
    let mut max_depth = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.candidates.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = walls.neighbor(cell, dir) else {
            continue;
        };
        let slot = walls.index(next);
        if visited[slot] {
            continue;
        }
        walls.open(cell, dir);
        visited[slot] = true;
        stack.push(Frame {
            cell: next,
            candidates: shuffled_directions(rng),
            next: 0,
        });
        max_depth = max_depth.max(stack.len());
    }

    log::debug!(
        "Carved {}x{} maze from ({}, {}): {} passages, max depth {}",
        rows,
        columns,
        origin.row,
        origin.column,
        walls.open_passages(),
        max_depth
    );
    Ok((walls, origin))
}

/// Fisher-Yates from the back over up/right/down/left
fn shuffled_directions<R: RandomSource + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut dirs = Direction::ALL;
    for remaining in (1..=dirs.len()).rev() {
        let pick = rng.below(remaining);
        dirs.swap(remaining - 1, pick);
    }
    dirs
}
