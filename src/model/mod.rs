//! Board model (no_std compatible)
//!
//! Pure game state with no I/O: cell statuses, ships, fleets, the board
//! itself and the probability targeting used by the sample bot. Only
//! `alloc` is required, so this layer builds without the `std` feature.

pub mod ai;
pub mod bitboard;
pub mod board;
pub mod cell;
pub mod common;
pub mod config;
pub mod fleet;
pub mod ship;

pub use ai::{calc_pdf, choose_target, sample_pdf};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::Board;
pub use cell::{parse_board, CellStatus, Coord, ParseBoardError};
pub use common::{BoardError, InvalidMoveError};
pub use config::*;
pub use fleet::{Fleet, ParseFleetError};
pub use ship::{Orientation, Placement, Ship};
