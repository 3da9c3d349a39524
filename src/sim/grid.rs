//! Maze grid and wall state
//!
//! A maze of `rows × columns` cells keeps two wall tables:
//! - vertical walls, `rows × (columns - 1)`: entry `(r, c)` separates cell
//!   `(r, c)` from `(r, c + 1)`
//! - horizontal walls, `(rows - 1) × columns`: entry `(r, c)` separates cell
//!   `(r, c)` from `(r + 1, c)`
//!
//! `true` means the wall has been carved open.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_GRID_CELLS;
use crate::error::{MazeError, Result};

/// Cell count of a `rows × columns` grid, rejecting empty grids and grids
/// above `MAX_GRID_CELLS`
pub fn checked_cell_count(rows: usize, columns: usize) -> Result<usize> {
    rows.checked_mul(columns)
        .filter(|&cells| cells > 0 && cells <= MAX_GRID_CELLS)
        .ok_or(MazeError::InvalidDimensions { rows, columns })
}

/// A cell position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Direction from a cell to one of its four neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate order before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// Open/closed state of every internal wall of a maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallGrid {
    rows: usize,
    columns: usize,
    vertical: Vec<bool>,
    horizontal: Vec<bool>,
}

impl WallGrid {
    /// All walls closed
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        checked_cell_count(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            vertical: vec![false; rows * (columns - 1)],
            horizontal: vec![false; (rows - 1) * columns],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Wall between `(row, column)` and `(row, column + 1)`
    pub fn vertical_open(&self, row: usize, column: usize) -> bool {
        self.vertical[row * (self.columns - 1) + column]
    }

    /// Wall between `(row, column)` and `(row + 1, column)`
    pub fn horizontal_open(&self, row: usize, column: usize) -> bool {
        self.horizontal[row * self.columns + column]
    }

    /// One row of the vertical wall table (`columns - 1` entries)
    pub fn vertical_row(&self, row: usize) -> &[bool] {
        let width = self.columns - 1;
        &self.vertical[row * width..(row + 1) * width]
    }

    /// One row of the horizontal wall table (`columns` entries)
    pub fn horizontal_row(&self, row: usize) -> &[bool] {
        &self.horizontal[row * self.columns..(row + 1) * self.columns]
    }

    /// Neighbor of `cell` in `dir`, if it lies inside the grid
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let Cell { row, column } = cell;
        match dir {
            Direction::Up if row > 0 => Some(Cell::new(row - 1, column)),
            Direction::Right if column + 1 < self.columns => Some(Cell::new(row, column + 1)),
            Direction::Down if row + 1 < self.rows => Some(Cell::new(row + 1, column)),
            Direction::Left if column > 0 => Some(Cell::new(row, column - 1)),
            _ => None,
        }
    }

    /// Index into the vertical or horizontal table for the wall on `dir`
    fn wall_slot(&self, cell: Cell, dir: Direction) -> Option<(bool, usize)> {
        self.neighbor(cell, dir)?;
        let Cell { row, column } = cell;
        let slot = match dir {
            Direction::Left => (true, row * (self.columns - 1) + column - 1),
            Direction::Right => (true, row * (self.columns - 1) + column),
            Direction::Up => (false, (row - 1) * self.columns + column),
            Direction::Down => (false, row * self.columns + column),
        };
        Some(slot)
    }

    /// Whether the wall on `dir` side of `cell` is carved. Boundary walls are
    /// never open.
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        match self.wall_slot(cell, dir) {
            Some((true, i)) => self.vertical[i],
            Some((false, i)) => self.horizontal[i],
            None => false,
        }
    }

    /// Carve the wall on `dir` side of `cell`. Returns false for boundary
    /// walls, which cannot be opened.
    pub fn open(&mut self, cell: Cell, dir: Direction) -> bool {
        match self.wall_slot(cell, dir) {
            Some((true, i)) => {
                self.vertical[i] = true;
                true
            }
            Some((false, i)) => {
                self.horizontal[i] = true;
                true
            }
            None => false,
        }
    }

    /// Cells reachable from `cell` through one open wall
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&dir| self.is_open(cell, dir))
            .filter_map(move |dir| self.neighbor(cell, dir))
    }

    /// Number of carved walls across both tables
    pub fn open_passages(&self) -> usize {
        self.vertical.iter().filter(|&&open| open).count()
            + self.horizontal.iter().filter(|&&open| open).count()
    }

    /// Every cell reachable from `(0, 0)` through open walls
    pub fn is_connected(&self) -> bool {
        self.reachable_from(Cell::new(0, 0)) == self.cell_count()
    }

    /// Connected with exactly `cells - 1` passages, so a spanning tree
    pub fn is_perfect(&self) -> bool {
        self.open_passages() == self.cell_count() - 1 && self.is_connected()
    }

    fn reachable_from(&self, start: Cell) -> usize {
        let mut seen = vec![false; self.cell_count()];
        let mut queue = VecDeque::from([start]);
        seen[self.index(start)] = true;
        let mut count = 1;
        while let Some(cell) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                let i = self.index(next);
                if !seen[i] {
                    seen[i] = true;
                    count += 1;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Shortest path of cells from `from` to `to` (inclusive), following open
    /// walls. In a perfect maze this is the unique simple path.
    pub fn path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        let mut parent: Vec<Option<Cell>> = vec![None; self.cell_count()];
        let mut seen = vec![false; self.cell_count()];
        let mut queue = VecDeque::from([from]);
        seen[self.index(from)] = true;

        while let Some(cell) = queue.pop_front() {
            if cell == to {
                let mut path = vec![to];
                let mut cursor = to;
                while let Some(prev) = parent[self.index(cursor)] {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.open_neighbors(cell) {
                let i = self.index(next);
                if !seen[i] {
                    seen[i] = true;
                    parent[i] = Some(cell);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    #[inline]
    pub(crate) fn index(&self, cell: Cell) -> usize {
        cell.row * self.columns + cell.column
    }

    /// Text rendering, `+--+` corners and `|` walls
    pub fn to_ascii(&self) -> String {
        self.to_ascii_with_path(&[])
    }

    /// Text rendering with the given cells marked `()`
    pub fn to_ascii_with_path(&self, marked: &[Cell]) -> String {
        let mut on_path = vec![false; self.cell_count()];
        for &cell in marked.iter().filter(|&&c| self.contains(c)) {
            on_path[self.index(cell)] = true;
        }

        let mut out = String::new();
        for row in 0..self.rows {
            // Wall line above this row
            for column in 0..self.columns {
                let open = row > 0 && self.horizontal_open(row - 1, column);
                out.push('+');
                out.push_str(if open { "  " } else { "--" });
            }
            out.push_str("+\n|");
            for column in 0..self.columns {
                let cell = Cell::new(row, column);
                out.push_str(if on_path[self.index(cell)] { "()" } else { "  " });
                let open = column + 1 < self.columns && self.vertical_open(row, column);
                out.push(if open { ' ' } else { '|' });
            }
            out.push('\n');
        }
        for _ in 0..self.columns {
            out.push_str("+--");
        }
        out.push_str("+\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_dimensions() {
        assert!(matches!(
            WallGrid::new(0, 4),
            Err(MazeError::InvalidDimensions { rows: 0, columns: 4 })
        ));
        assert!(WallGrid::new(3, 0).is_err());
    }

    #[test]
    fn test_new_rejects_oversized_dimensions() {
        // Overflows usize
        assert!(matches!(
            WallGrid::new(1 << 33, 1 << 33),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(WallGrid::new(usize::MAX, 2).is_err());
        assert!(WallGrid::new(MAX_GRID_CELLS + 1, 1).is_err());
        assert_eq!(checked_cell_count(MAX_GRID_CELLS, 1).unwrap(), MAX_GRID_CELLS);
    }

    #[test]
    fn test_table_shapes() {
        let grid = WallGrid::new(3, 5).unwrap();
        assert_eq!(grid.vertical_row(2).len(), 4);
        assert_eq!(grid.horizontal_row(1).len(), 5);
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn test_single_column_has_no_vertical_walls() {
        let grid = WallGrid::new(4, 1).unwrap();
        assert!(grid.vertical_row(3).is_empty());
        assert_eq!(grid.horizontal_row(2).len(), 1);
    }

    #[test]
    fn test_open_maps_direction_to_table_entry() {
        let mut grid = WallGrid::new(3, 3).unwrap();
        let center = Cell::new(1, 1);

        assert!(grid.open(center, Direction::Left));
        assert!(grid.vertical_open(1, 0));
        assert!(grid.open(center, Direction::Right));
        assert!(grid.vertical_open(1, 1));
        assert!(grid.open(center, Direction::Up));
        assert!(grid.horizontal_open(0, 1));
        assert!(grid.open(center, Direction::Down));
        assert!(grid.horizontal_open(1, 1));
        assert_eq!(grid.open_passages(), 4);

        // Seen from the other side
        assert!(grid.is_open(Cell::new(0, 1), Direction::Down));
        assert!(grid.is_open(Cell::new(1, 2), Direction::Left));
    }

    #[test]
    fn test_boundary_walls_stay_closed() {
        let mut grid = WallGrid::new(2, 2).unwrap();
        assert!(!grid.open(Cell::new(0, 0), Direction::Up));
        assert!(!grid.open(Cell::new(1, 1), Direction::Right));
        assert_eq!(grid.open_passages(), 0);
        assert!(!grid.is_open(Cell::new(0, 0), Direction::Left));
    }

    #[test]
    fn test_perfect_and_path() {
        // Serpentine through a 2x2 grid: (0,0) -> (0,1) -> (1,1) -> (1,0)
        let mut grid = WallGrid::new(2, 2).unwrap();
        grid.open(Cell::new(0, 0), Direction::Right);
        grid.open(Cell::new(0, 1), Direction::Down);
        grid.open(Cell::new(1, 1), Direction::Left);
        assert!(grid.is_perfect());

        let path = grid.path(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_cycle_is_not_perfect() {
        let mut grid = WallGrid::new(2, 2).unwrap();
        grid.open(Cell::new(0, 0), Direction::Right);
        grid.open(Cell::new(0, 1), Direction::Down);
        grid.open(Cell::new(1, 1), Direction::Left);
        grid.open(Cell::new(1, 0), Direction::Up);
        assert!(grid.is_connected());
        assert!(!grid.is_perfect());
    }

    #[test]
    fn test_disconnected_has_no_path() {
        let grid = WallGrid::new(2, 2).unwrap();
        assert!(!grid.is_connected());
        assert!(grid.path(Cell::new(0, 0), Cell::new(1, 1)).is_none());
    }

    #[test]
    fn test_ascii_rendering() {
        let mut grid = WallGrid::new(2, 2).unwrap();
        grid.open(Cell::new(0, 0), Direction::Right);
        grid.open(Cell::new(0, 1), Direction::Down);
        grid.open(Cell::new(1, 1), Direction::Left);
        let expected = "\
+--+--+
|     |
+--+  +
|     |
+--+--+
";
        assert_eq!(grid.to_ascii(), expected);
    }
}
