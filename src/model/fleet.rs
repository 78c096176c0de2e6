//! Fleet composition: the ship lengths placed at game start.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use super::common::BoardError;
use super::config::{BOARD_SIZE, CELL_COUNT, STANDARD_FLEET};

/// Validated list of ship lengths, placed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Fleet {
    lengths: Vec<usize>,
}

impl Fleet {
    /// Fleet with the given ship lengths. Every length must fit on a grid
    /// side and the fleet must fit on the grid.
    pub fn new(lengths: Vec<usize>) -> Result<Self, BoardError> {
        if lengths.is_empty() {
            return Err(BoardError::EmptyFleet);
        }
        if let Some(&len) = lengths
            .iter()
            .find(|&&len| len == 0 || len > BOARD_SIZE as usize)
        {
            return Err(BoardError::InvalidShipLength(len));
        }
        let cells: usize = lengths.iter().sum();
        if cells > CELL_COUNT {
            return Err(BoardError::FleetTooLarge { cells });
        }
        Ok(Self { lengths })
    }

    /// Five ships of lengths 5, 4, 3, 3 and 2.
    pub fn standard() -> Self {
        Self {
            lengths: STANDARD_FLEET.to_vec(),
        }
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Cells occupied by the whole fleet.
    pub fn total_cells(&self) -> usize {
        self.lengths.iter().sum()
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<usize>> for Fleet {
    type Error = BoardError;

    fn try_from(lengths: Vec<usize>) -> Result<Self, Self::Error> {
        Fleet::new(lengths)
    }
}

impl From<Fleet> for Vec<usize> {
    fn from(fleet: Fleet) -> Self {
        fleet.lengths
    }
}

impl fmt::Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, len) in self.lengths.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", len)?;
        }
        Ok(())
    }
}

/// Errors from parsing a fleet such as `5,4,3,3,2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFleetError {
    /// A token was not a ship length.
    BadLength(String),
    /// The lengths parsed but do not form a valid fleet.
    Invalid(BoardError),
}

impl fmt::Display for ParseFleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFleetError::BadLength(token) => write!(f, "invalid ship length {:?}", token),
            ParseFleetError::Invalid(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseFleetError {}

impl FromStr for Fleet {
    type Err = ParseFleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lengths = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<usize>()
                    .map_err(|_| ParseFleetError::BadLength(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Fleet::new(lengths).map_err(ParseFleetError::Invalid)
    }
}
