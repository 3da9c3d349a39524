//! Error types for maze construction and configuration

use std::fmt;

use crate::consts::MAX_GRID_CELLS;

/// Errors surfaced by maze generation, configuration and sessions
#[derive(Debug)]
pub enum MazeError {
    /// Grid must have at least one cell and at most `MAX_GRID_CELLS`
    InvalidDimensions { rows: usize, columns: usize },
    /// A configuration value is out of range
    InvalidConfig(String),
    /// Configuration JSON could not be parsed or written
    ConfigParse(serde_json::Error),
    /// Reading or writing a configuration file failed
    Io(std::io::Error),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { rows, columns } => write!(
                f,
                "maze must have between 1 and {MAX_GRID_CELLS} cells (got {rows}x{columns})"
            ),
            MazeError::InvalidConfig(reason) => write!(f, "invalid maze config: {reason}"),
            MazeError::ConfigParse(err) => write!(f, "malformed maze config: {err}"),
            MazeError::Io(err) => write!(f, "config file error: {err}"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MazeError::ConfigParse(err) => Some(err),
            MazeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MazeError {
    fn from(err: serde_json::Error) -> Self {
        MazeError::ConfigParse(err)
    }
}

impl From<std::io::Error> for MazeError {
    fn from(err: std::io::Error) -> Self {
        MazeError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
