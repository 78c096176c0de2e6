//! Saving finished games and replaying them.

use std::path::Path;

use anyhow::{anyhow, ensure, Context};

use crate::engine::{GameResult, GameStatus};
use crate::model::Board;

/// Write `result` to `path` in bincode form.
pub fn save_result(result: &GameResult, path: &Path) -> anyhow::Result<()> {
    let bytes = bincode::serialize(result)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

pub fn load_result(path: &Path) -> anyhow::Result<GameResult> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let result = bincode::deserialize(&bytes)
        .with_context(|| format!("{} is not a game archive", path.display()))?;
    Ok(result)
}

/// Re-apply the recorded moves to the recorded layout.
///
/// Every move must reproduce its recorded status and the final board must
/// agree with the recorded outcome. Returns the final board.
pub fn replay(result: &GameResult) -> anyhow::Result<Board> {
    let mut board =
        Board::with_layout(&result.layout).map_err(|e| anyhow!("recorded layout: {}", e))?;
    for record in &result.moves {
        let status = board
            .apply(record.index as usize)
            .map_err(|e| anyhow!("turn {}: {}", record.turn, e))?;
        ensure!(
            status == record.status,
            "turn {}: move {} gives {:?}, archive says {:?}",
            record.turn,
            record.index,
            status,
            record.status
        );
        ensure!(
            record.turn == board.turns(),
            "move for turn {} recorded out of order",
            record.turn
        );
    }
    ensure!(
        board.turns() == result.turns,
        "archive claims {} turns but holds {} moves",
        result.turns,
        board.turns()
    );
    match &result.status {
        GameStatus::Won { score } => {
            ensure!(board.all_sunk(), "archive claims a win but ships remain");
            ensure!(*score == result.turns, "score {} does not match turns", score);
        }
        GameStatus::Aborted { turn, .. } => {
            ensure!(!board.all_sunk(), "archive claims an abort after the fleet sank");
            ensure!(*turn == result.turns + 1, "abort recorded at turn {}", turn);
        }
        GameStatus::Running => anyhow::bail!("archived game never finished"),
    }
    Ok(board)
}
