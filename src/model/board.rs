//! Board state: the public status grid and the hidden ship layout.
//!
//! The two halves are stored separately. Bots only ever receive
//! [`Board::serialize`], which reads the status grid alone, so placement
//! information cannot reach them before the cells are hit.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use rand::Rng;

use super::cell::CellStatus;
use super::common::{BoardError, InvalidMoveError};
use super::config::{BB, BOARD_SIZE, CELL_COUNT, MAX_LAYOUT_ATTEMPTS, MAX_SHIP_ATTEMPTS};
use super::fleet::Fleet;
use super::ship::{Orientation, Placement, Ship};

/// One game's board: statuses, layout and the number of moves applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [CellStatus; CELL_COUNT],
    ships: Vec<Ship>,
    ship_map: BB,
    turns: u32,
}

impl Board {
    /// Board with every cell unknown and no ships placed.
    pub fn new() -> Self {
        Board {
            cells: [CellStatus::Unknown; CELL_COUNT],
            ships: Vec::new(),
            ship_map: BB::new(),
            turns: 0,
        }
    }

    /// Board with ships at exactly the given placements.
    pub fn with_layout(placements: &[Placement]) -> Result<Self, BoardError> {
        if placements.is_empty() {
            return Err(BoardError::EmptyFleet);
        }
        let mut board = Board::new();
        for &placement in placements {
            board.place(placement)?;
        }
        Ok(board)
    }

    /// Board with `fleet` placed at random, non-overlapping positions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, fleet: &Fleet) -> Result<Self, BoardError> {
        'layout: for _ in 0..MAX_LAYOUT_ATTEMPTS {
            let mut board = Board::new();
            for &length in fleet.lengths() {
                match board.random_placement(rng, length) {
                    Ok(placement) => board.place(placement)?,
                    Err(BoardError::UnableToPlaceShip) => continue 'layout,
                    Err(e) => return Err(e),
                }
            }
            return Ok(board);
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Add a ship to the hidden layout.
    pub fn place(&mut self, placement: Placement) -> Result<(), BoardError> {
        let ship = Ship::new(placement)?;
        if !(self.ship_map & ship.mask()).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map |= ship.mask();
        self.ships.push(ship);
        Ok(())
    }

    /// Pick a random anchor and orientation for a ship of `length`,
    /// retrying while the ship would leave the grid or overlap the
    /// current layout.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Placement, BoardError> {
        let n = BOARD_SIZE as usize;
        for _ in 0..MAX_SHIP_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let row = rng.random_range(0..n);
            let col = rng.random_range(0..n);
            let placement = Placement::new(row, col, orientation, length);
            match Ship::new(placement) {
                Ok(ship) if (self.ship_map & ship.mask()).is_empty() => return Ok(placement),
                Ok(_) | Err(BoardError::ShipOutOfBounds) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// The public view sent to bots: every status code, row-major,
    /// comma-separated.
    pub fn serialize(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.code().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Fire at `index`. Only unknown cells may be targeted; a rejected
    /// move leaves the board unchanged.
    ///
    /// Returns the new status of the targeted cell: `Miss`, `Hit`, or
    /// `Sunk` when the shot completed a ship (every cell of that ship is
    /// then `Sunk`).
    pub fn apply(&mut self, index: usize) -> Result<CellStatus, InvalidMoveError> {
        let status = *self
            .cells
            .get(index)
            .ok_or(InvalidMoveError::OutOfRange { index })?;
        if status.is_resolved() {
            return Err(InvalidMoveError::AlreadyResolved { index, status });
        }
        self.turns += 1;

        let Some(ship) = self.ships.iter_mut().find(|s| s.mask().contains(index)) else {
            self.cells[index] = CellStatus::Miss;
            return Ok(CellStatus::Miss);
        };
        ship.register_hit(index);
        if ship.is_sunk() {
            let mask = ship.mask();
            for i in mask.indices() {
                self.cells[i] = CellStatus::Sunk;
            }
            Ok(CellStatus::Sunk)
        } else {
            self.cells[index] = CellStatus::Hit;
            Ok(CellStatus::Hit)
        }
    }

    /// `true` once every ship-occupied cell is `Sunk`.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    pub fn cells(&self) -> &[CellStatus; CELL_COUNT] {
        &self.cells
    }

    /// Status at `index`, or `None` off the board.
    pub fn status(&self, index: usize) -> Option<CellStatus> {
        self.cells.get(index).copied()
    }

    /// Moves applied so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Occupancy of the whole fleet.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    /// Placements of the hidden layout, in placement order.
    pub fn layout(&self) -> Vec<Placement> {
        self.ships.iter().map(Ship::placement).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
