//! Cell statuses as seen by bots, and grid coordinates.

use alloc::string::{String, ToString};
use core::fmt;

use super::config::{BOARD_SIZE, CELL_COUNT};

/// Public status of a single grid cell.
///
/// The integer codes are part of the bot contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    /// Not yet targeted (`0`).
    #[default]
    Unknown,
    /// Targeted, no ship (`-1`).
    Miss,
    /// Targeted, ship segment whose ship is still afloat (`1`).
    Hit,
    /// Segment of a ship whose every cell has been hit (`2`).
    Sunk,
}

impl CellStatus {
    /// Wire code of the status.
    pub const fn code(self) -> i8 {
        match self {
            CellStatus::Unknown => 0,
            CellStatus::Miss => -1,
            CellStatus::Hit => 1,
            CellStatus::Sunk => 2,
        }
    }

    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(CellStatus::Unknown),
            -1 => Some(CellStatus::Miss),
            1 => Some(CellStatus::Hit),
            2 => Some(CellStatus::Sunk),
            _ => None,
        }
    }

    /// Whether the cell has already been targeted.
    pub const fn is_resolved(self) -> bool {
        !matches!(self, CellStatus::Unknown)
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A grid position. Rows are lettered `A`..`J`, columns numbered `1`..`10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Coordinate of a row-major index, or `None` past the last cell.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let n = BOARD_SIZE as usize;
        Some(Coord {
            row: (index / n) as u8,
            col: (index % n) as u8,
        })
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

/// Errors from parsing a serialized board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// The board did not have exactly `CELL_COUNT` tokens.
    WrongLength { found: usize },
    /// A token was not one of the status codes.
    BadToken { index: usize, token: String },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::WrongLength { found } => {
                write!(f, "expected {} cells, found {}", CELL_COUNT, found)
            }
            ParseBoardError::BadToken { index, token } => {
                write!(f, "cell {} has invalid status {:?}", index, token)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBoardError {}

/// Parse a comma-separated board view back into cell statuses.
pub fn parse_board(view: &str) -> Result<[CellStatus; CELL_COUNT], ParseBoardError> {
    let found = view.split(',').count();
    if found != CELL_COUNT {
        return Err(ParseBoardError::WrongLength { found });
    }
    let mut cells = [CellStatus::Unknown; CELL_COUNT];
    for (index, token) in view.split(',').enumerate() {
        let token = token.trim();
        cells[index] = token
            .parse::<i8>()
            .ok()
            .and_then(CellStatus::from_code)
            .ok_or_else(|| ParseBoardError::BadToken {
                index,
                token: token.to_string(),
            })?;
    }
    Ok(cells)
}
