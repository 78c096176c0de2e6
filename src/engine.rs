//! Turn engine: drives one bot through one game.
//!
//! Each turn serializes the board, asks the bot for a move, applies it and
//! checks whether the fleet is sunk. The engine is `Running` until the bot
//! wins or faults; both end states are final.

use std::fmt;

use crate::abort::AbortSignal;
use crate::bot::{Bot, BotFault, InvokeError};
use crate::model::{Board, CellStatus, Coord, Placement};

/// Why a game ended without a win.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AbortReason {
    /// The bot broke the move contract.
    Fault(BotFault),
    /// The game was stopped from outside.
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Fault(fault) => write!(f, "{}", fault),
            AbortReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameStatus {
    Running,
    /// Every ship sunk; `score` is the number of turns taken.
    Won { score: u32 },
    /// Stopped at `turn`, the turn whose move was never applied.
    Aborted { reason: AbortReason, turn: u32 },
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }
}

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoveRecord {
    /// 1-based turn number.
    pub turn: u32,
    pub index: u8,
    /// Status of the targeted cell right after the move.
    pub status: CellStatus,
}

/// What a call to [`TurnEngine::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A move was applied and the game goes on.
    Played(MoveRecord),
    /// The game is over, possibly as a result of this step.
    Terminal(GameStatus),
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameResult {
    pub bot: String,
    /// The ship layout, revealed.
    pub layout: Vec<Placement>,
    pub moves: Vec<MoveRecord>,
    /// Moves applied.
    pub turns: u32,
    pub status: GameStatus,
}

impl GameResult {
    /// Turns needed to sink the fleet, if the game was won.
    pub fn score(&self) -> Option<u32> {
        match self.status {
            GameStatus::Won { score } => Some(score),
            _ => None,
        }
    }

    /// The bot fault that ended the game, if any.
    pub fn fault(&self) -> Option<&BotFault> {
        match &self.status {
            GameStatus::Aborted {
                reason: AbortReason::Fault(fault),
                ..
            } => Some(fault),
            _ => None,
        }
    }
}

/// Core game loop holding the bot, the board and the move history.
pub struct TurnEngine {
    bot: Box<dyn Bot>,
    board: Board,
    moves: Vec<MoveRecord>,
    status: GameStatus,
    abort: AbortSignal,
}

impl TurnEngine {
    /// Engine in `Running` state on a freshly placed board.
    pub fn new(bot: Box<dyn Bot>, board: Board) -> Self {
        Self {
            bot,
            board,
            moves: Vec::new(),
            status: GameStatus::Running,
            abort: AbortSignal::never(),
        }
    }

    /// Stop the game when `signal` fires.
    pub fn with_abort(mut self, signal: AbortSignal) -> Self {
        self.abort = signal;
        self
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn bot_name(&self) -> &str {
        self.bot.name()
    }

    /// Play one turn.
    ///
    /// Bot faults and cancellation end the game and are reported through
    /// the returned outcome. An `Err` is a host failure (the bot could not
    /// be started at all); the engine stays `Running` and the caller
    /// decides whether to retry or give up.
    pub async fn step(&mut self) -> anyhow::Result<TurnOutcome> {
        if self.status.is_terminal() {
            return Ok(TurnOutcome::Terminal(self.status.clone()));
        }
        let turn = self.board.turns() + 1;
        if self.abort.is_aborted() {
            return Ok(self.finish_aborted(AbortReason::Cancelled, turn));
        }

        let view = self.board.serialize();
        let bot = &mut self.bot;
        let abort = &mut self.abort;
        let reply = tokio::select! {
            biased;
            _ = abort.aborted() => None,
            reply = bot.select_move(&view) => Some(reply),
        };

        let index = match reply {
            None => return Ok(self.finish_aborted(AbortReason::Cancelled, turn)),
            Some(Ok(index)) => index,
            Some(Err(InvokeError::Fault(fault))) => {
                return Ok(self.finish_aborted(AbortReason::Fault(fault), turn))
            }
            Some(Err(InvokeError::Host(e))) => {
                return Err(e.context(format!("turn {} of {}", turn, self.bot.name())))
            }
        };

        let status = match self.board.apply(index as usize) {
            Ok(status) => status,
            Err(invalid) => {
                return Ok(self.finish_aborted(
                    AbortReason::Fault(BotFault::InvalidMove(invalid)),
                    turn,
                ))
            }
        };
        let record = MoveRecord {
            turn,
            index,
            status,
        };
        self.moves.push(record);
        log::debug!(
            "{}: turn {} fired at {} -> {:?}",
            self.bot.name(),
            turn,
            Coord::from_index(index as usize)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            status
        );

        if self.board.all_sunk() {
            self.status = GameStatus::Won { score: turn };
            log::info!("{}: sank every ship in {} turns", self.bot.name(), turn);
            return Ok(TurnOutcome::Terminal(self.status.clone()));
        }
        Ok(TurnOutcome::Played(record))
    }

    /// Step until the game is over.
    pub async fn run(&mut self) -> anyhow::Result<GameStatus> {
        loop {
            if let TurnOutcome::Terminal(status) = self.step().await? {
                return Ok(status);
            }
        }
    }

    /// The finished game, or `None` while it is still running.
    pub fn result(&self) -> Option<GameResult> {
        if !self.status.is_terminal() {
            return None;
        }
        Some(GameResult {
            bot: self.bot.name().to_string(),
            layout: self.board.layout(),
            moves: self.moves.clone(),
            turns: self.board.turns(),
            status: self.status.clone(),
        })
    }

    fn finish_aborted(&mut self, reason: AbortReason, turn: u32) -> TurnOutcome {
        log::warn!("{}: aborted at turn {}: {}", self.bot.name(), turn, reason);
        self.status = GameStatus::Aborted { reason, turn };
        TurnOutcome::Terminal(self.status.clone())
    }
}
