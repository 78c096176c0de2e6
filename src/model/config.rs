use super::bitboard::BitBoard;

/// Side length of the square grid.
pub const BOARD_SIZE: u8 = 10;

/// Number of cells on the grid, and of tokens in a serialized board.
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Ship lengths of the standard fleet: carrier, battleship, cruiser,
/// submarine and destroyer.
pub const STANDARD_FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Occupancy mask sized for the grid.
pub type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Attempts to place a single ship before the layout is restarted.
pub const MAX_SHIP_ATTEMPTS: usize = 1_000;

/// Full layout restarts before random placement gives up.
pub const MAX_LAYOUT_ATTEMPTS: usize = 100;
