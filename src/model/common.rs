//! Board errors: layout problems and rejected moves.

use core::fmt;

use super::bitboard::BitBoardError;
use super::cell::CellStatus;
use super::config::CELL_COUNT;

/// Errors from building a fleet or a ship layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoardError(BitBoardError),
    /// Fleet has no ships.
    EmptyFleet,
    /// Ship length is zero or longer than the grid side.
    InvalidShipLength(usize),
    /// Fleet occupies more cells than the grid holds.
    FleetTooLarge { cells: usize },
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement runs off the grid.
    ShipOutOfBounds,
    /// Random placement gave up.
    UnableToPlaceShip,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            BoardError::InvalidShipLength(len) => write!(f, "Invalid ship length {}", len),
            BoardError::FleetTooLarge { cells } => write!(
                f,
                "Fleet needs {} cells but the board only has {}",
                cells, CELL_COUNT
            ),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// A move the board refused to apply. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidMoveError {
    /// Index past the last cell.
    OutOfRange { index: usize },
    /// Cell was already targeted.
    AlreadyResolved { index: usize, status: CellStatus },
}

impl InvalidMoveError {
    pub fn index(&self) -> usize {
        match *self {
            InvalidMoveError::OutOfRange { index } => index,
            InvalidMoveError::AlreadyResolved { index, .. } => index,
        }
    }
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveError::OutOfRange { index } => {
                write!(f, "move {} is outside 0..{}", index, CELL_COUNT)
            }
            InvalidMoveError::AlreadyResolved { index, status } => {
                write!(f, "cell {} was already resolved (status {})", index, status)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidMoveError {}
