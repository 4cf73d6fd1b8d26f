use thiserror::Error;

use crate::{CellCount, Coord, Coord3};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {coords:?} are outside a board of size {size}")]
    OutOfBounds { coords: Coord3, size: Coord },
    #[error("Invalid mine count {mines}, a board of {cells} cells needs at least one safe cell")]
    InvalidMineCount { mines: CellCount, cells: CellCount },
    #[error("Board size must be at least 1")]
    InvalidSize,
}

impl GameError {
    /// Errors raised while building or re-seeding a board, as opposed to bad coordinates.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidMineCount { .. } | Self::InvalidSize)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown marker color {0:?}")]
pub struct UnknownMarkerColor(pub String);

pub type Result<T> = core::result::Result<T, GameError>;
