//! Text rendering of boards and game summaries.

use std::fmt::Write;

use crate::engine::{GameResult, GameStatus};
use crate::model::{Board, CellStatus, Coord, BOARD_SIZE};

/// Render the board as a lettered grid.
///
/// `.` unknown, `o` miss, `X` hit, `#` sunk. With `reveal`, unhit ship
/// segments show as `S`.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let n = BOARD_SIZE as usize;
    let ships = board.ship_map();
    let mut out = String::from("  ");
    for c in 1..=n {
        let _ = write!(out, " {:>2}", c);
    }
    out.push('\n');
    for r in 0..n {
        out.push((b'A' + r as u8) as char);
        out.push(' ');
        for c in 0..n {
            let idx = r * n + c;
            let ch = match board.cells()[idx] {
                CellStatus::Unknown if reveal && ships.contains(idx) => 'S',
                CellStatus::Unknown => '.',
                CellStatus::Miss => 'o',
                CellStatus::Hit => 'X',
                CellStatus::Sunk => '#',
            };
            let _ = write!(out, "  {}", ch);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of a finished game.
pub fn summarize(result: &GameResult) -> String {
    match &result.status {
        GameStatus::Won { score } => {
            format!("{} sank every ship in {} turns", result.bot, score)
        }
        GameStatus::Aborted { reason, turn } => {
            format!("{} aborted at turn {}: {}", result.bot, turn, reason)
        }
        GameStatus::Running => format!("{} is still playing", result.bot),
    }
}

/// Move list as `turn: coord status` lines.
pub fn render_moves(result: &GameResult) -> String {
    let mut out = String::new();
    for record in &result.moves {
        let coord = Coord::from_index(record.index as usize)
            .map(|c| c.to_string())
            .unwrap_or_else(|| record.index.to_string());
        let _ = writeln!(out, "{:>3}: {:<3} {:?}", record.turn, coord, record.status);
    }
    out
}
