//! Game sessions: set up a board and a bot, hand out a [`GameHandle`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::abort::AbortHandle;
use crate::bot::process::DEFAULT_MOVE_TIMEOUT;
use crate::bot::{Bot, ProcessBot};
use crate::engine::{GameResult, GameStatus, TurnEngine, TurnOutcome};
use crate::model::{Board, Fleet};

/// Per-game settings for a process bot.
#[derive(Debug, Clone)]
pub struct GameOptions {
    /// Time limit for each move.
    pub timeout: Duration,
    /// Fixes the ship layout when set.
    pub seed: Option<u64>,
    /// Arguments passed before the board.
    pub bot_args: Vec<OsString>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_MOVE_TIMEOUT,
            seed: None,
            bot_args: Vec::new(),
        }
    }
}

/// Seeded RNG when `seed` is given, entropy-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// Start a game of `fleet` against the bot program at `bot_path`.
///
/// Fails if the layout cannot be placed or the bot path does not name a
/// file. See [`resolve_bot`] for how bare names are found.
pub fn start_game(
    bot_path: impl AsRef<Path>,
    fleet: &Fleet,
    options: &GameOptions,
) -> anyhow::Result<GameHandle> {
    let path = resolve_bot(bot_path.as_ref())?;
    let mut rng = seeded_rng(options.seed);
    let board =
        Board::random(&mut rng, fleet).map_err(|e| anyhow!("placing fleet {}: {}", fleet, e))?;
    let bot = ProcessBot::new(path)
        .with_args(options.bot_args.iter().cloned())
        .with_timeout(options.timeout);
    log::info!("{} bot started game", bot.name());
    Ok(GameHandle::new(Box::new(bot), board))
}

/// Path to run for `path`.
///
/// A bare name (`mybot`) means the file of that name in the current
/// directory when one exists, and is otherwise left for a `PATH` lookup at
/// spawn time. Any other path must name an accessible file.
pub fn resolve_bot(path: &Path) -> anyhow::Result<PathBuf> {
    if path.components().count() == 1 && !path.has_root() {
        let local = Path::new(".").join(path);
        if local.is_file() {
            return Ok(local);
        }
        return Ok(path.to_path_buf());
    }
    let meta = std::fs::metadata(path)
        .with_context(|| format!("bot {} is not accessible", path.display()))?;
    if !meta.is_file() {
        bail!("bot {} is not a file", path.display());
    }
    Ok(path.to_path_buf())
}

/// One match in progress. Owns its engine exclusively.
pub struct GameHandle {
    engine: TurnEngine,
    abort: AbortHandle,
}

impl GameHandle {
    pub fn new(bot: Box<dyn Bot>, board: Board) -> Self {
        Self::with_abort(bot, board, AbortHandle::new())
    }

    /// Game that stops when `abort` fires.
    pub fn with_abort(bot: Box<dyn Bot>, board: Board, abort: AbortHandle) -> Self {
        let engine = TurnEngine::new(bot, board).with_abort(abort.signal());
        Self { engine, abort }
    }

    /// Re-attach the game to a shared abort handle.
    pub fn attach(self, abort: AbortHandle) -> Self {
        Self {
            engine: self.engine.with_abort(abort.signal()),
            abort,
        }
    }

    /// Handle that cancels this game, killing any bot mid-move.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub async fn step(&mut self) -> anyhow::Result<TurnOutcome> {
        self.engine.step().await
    }

    /// Play to the end and return the result.
    pub async fn run(&mut self) -> anyhow::Result<GameResult> {
        self.engine.run().await?;
        self.engine
            .result()
            .ok_or_else(|| anyhow!("game ended without a result"))
    }

    pub fn status(&self) -> &GameStatus {
        self.engine.status()
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// The result once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.engine.result()
    }
}
