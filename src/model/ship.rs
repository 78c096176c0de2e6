//! Ship placements and per-ship hit tracking.

use super::common::BoardError;
use super::config::{BB, BOARD_SIZE};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends towards higher column numbers.
    Horizontal,
    /// Extends towards later row letters.
    Vertical,
}

/// Where a ship sits: its anchor cell (lowest index), direction and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub length: usize,
}

impl Placement {
    pub const fn new(row: usize, col: usize, orientation: Orientation, length: usize) -> Self {
        Self {
            row,
            col,
            orientation,
            length,
        }
    }

    /// `(row, col)` of every segment, anchor first. Segments may lie off the
    /// grid; [`Ship::new`] rejects those placements.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => (self.row, self.col + i),
            Orientation::Vertical => (self.row + i, self.col),
        })
    }

    fn in_bounds(&self) -> bool {
        let n = BOARD_SIZE as usize;
        match self.orientation {
            Orientation::Horizontal => {
                self.row < n && self.col < n && self.length <= n - self.col
            }
            Orientation::Vertical => self.col < n && self.row < n && self.length <= n - self.row,
        }
    }
}

/// A ship on the board with its hit segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    placement: Placement,
    mask: BB,
    hits: BB,
}

impl Ship {
    /// Build a ship from a placement that lies entirely on the grid.
    pub fn new(placement: Placement) -> Result<Self, BoardError> {
        if placement.length == 0 || placement.length > BOARD_SIZE as usize {
            return Err(BoardError::InvalidShipLength(placement.length));
        }
        if !placement.in_bounds() {
            return Err(BoardError::ShipOutOfBounds);
        }
        let mask = BB::from_cells(placement.cells())?;
        Ok(Ship {
            placement,
            mask,
            hits: BB::new(),
        })
    }

    /// Record a shot at `index`. Returns `true` if it struck this ship.
    pub fn register_hit(&mut self, index: usize) -> bool {
        self.mask.contains(index) && self.hits.insert(index)
    }

    /// All segments hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.count_ones() == self.placement.length
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Occupancy mask of the ship.
    pub fn mask(&self) -> BB {
        self.mask
    }
}
