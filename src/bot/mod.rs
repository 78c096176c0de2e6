//! Bots: the players that choose moves.
//!
//! A [`Bot`] receives the serialized board and answers with a move index.
//! [`ProcessBot`] runs an external program per move; the in-memory bots
//! run in-process and go through the same output validation.

use std::fmt;
use std::num::IntErrorKind;
use std::time::Duration;

use crate::model::{InvalidMoveError, CELL_COUNT};

pub mod in_memory;
pub mod process;

pub use in_memory::{AiBot, FnBot};
pub use process::ProcessBot;

/// Longest excerpt of bot output kept in a fault.
const MAX_EXCERPT: usize = 200;

#[async_trait::async_trait]
pub trait Bot: Send {
    /// Label used in logs and game results.
    fn name(&self) -> &str;

    /// Choose the next move for the given board view.
    async fn select_move(&mut self, board: &str) -> Result<u8, InvokeError>;
}

/// Which bot contract was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FaultKind {
    InvalidMove,
    Timeout,
    NonZeroExit,
    MalformedOutput,
    Range,
}

/// A bot misbehaved. Faults end the game and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BotFault {
    /// The move targeted a resolved cell or lay off the board.
    InvalidMove(InvalidMoveError),
    /// The bot did not exit within the move time limit.
    Timeout { limit: Duration },
    /// The bot exited unsuccessfully. `code` is `None` when it was killed
    /// by a signal.
    NonZeroExit { code: Option<i32>, stderr: String },
    /// Output was empty or not an integer.
    MalformedOutput { output: String },
    /// Output was an integer outside the board.
    Range { value: String },
}

impl BotFault {
    pub fn kind(&self) -> FaultKind {
        match self {
            BotFault::InvalidMove(_) => FaultKind::InvalidMove,
            BotFault::Timeout { .. } => FaultKind::Timeout,
            BotFault::NonZeroExit { .. } => FaultKind::NonZeroExit,
            BotFault::MalformedOutput { .. } => FaultKind::MalformedOutput,
            BotFault::Range { .. } => FaultKind::Range,
        }
    }
}

impl fmt::Display for BotFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotFault::InvalidMove(e) => write!(f, "invalid move: {}", e),
            BotFault::Timeout { limit } => write!(f, "no move within {:?}", limit),
            BotFault::NonZeroExit { code: Some(code), stderr } if stderr.is_empty() => {
                write!(f, "exited with status {}", code)
            }
            BotFault::NonZeroExit { code: Some(code), stderr } => {
                write!(f, "exited with status {}: {}", code, stderr)
            }
            BotFault::NonZeroExit { code: None, .. } => write!(f, "terminated by signal"),
            BotFault::MalformedOutput { output } if output.is_empty() => {
                write!(f, "no output")
            }
            BotFault::MalformedOutput { output } => {
                write!(f, "output {:?} is not an integer", output)
            }
            BotFault::Range { value } => {
                write!(f, "move {} is outside 0..{}", value, CELL_COUNT)
            }
        }
    }
}

impl std::error::Error for BotFault {}

/// Failure to obtain a move.
///
/// `Fault` is the bot's doing and ends the game. `Host` means the arena
/// itself could not run the bot (missing executable, broken pipe) and is
/// reported to the caller instead of being recorded as a game outcome.
#[derive(Debug)]
pub enum InvokeError {
    Fault(BotFault),
    Host(anyhow::Error),
}

impl From<BotFault> for InvokeError {
    fn from(fault: BotFault) -> Self {
        InvokeError::Fault(fault)
    }
}

impl From<std::io::Error> for InvokeError {
    fn from(err: std::io::Error) -> Self {
        InvokeError::Host(err.into())
    }
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::Fault(fault) => write!(f, "bot fault: {}", fault),
            InvokeError::Host(err) => write!(f, "host error: {:#}", err),
        }
    }
}

impl std::error::Error for InvokeError {}

/// Parse a bot's complete standard output into a move index.
pub fn parse_move(output: &str) -> Result<u8, BotFault> {
    let text = output.trim();
    if text.is_empty() {
        return Err(BotFault::MalformedOutput {
            output: String::new(),
        });
    }
    match text.parse::<i64>() {
        Ok(value) if (0..CELL_COUNT as i64).contains(&value) => Ok(value as u8),
        Ok(_) => Err(BotFault::Range {
            value: excerpt(text),
        }),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(BotFault::Range {
                value: excerpt(text),
            })
        }
        Err(_) => Err(BotFault::MalformedOutput {
            output: excerpt(text),
        }),
    }
}

/// First `MAX_EXCERPT` characters of `text`.
pub(crate) fn excerpt(text: &str) -> String {
    text.chars().take(MAX_EXCERPT).collect()
}
