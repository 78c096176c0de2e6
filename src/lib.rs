#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod model;

#[cfg(feature = "std")]
pub mod abort;
#[cfg(feature = "std")]
pub mod archive;
#[cfg(feature = "std")]
pub mod bot;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
pub mod engine;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod tournament;
#[cfg(feature = "std")]
pub mod ui;

pub use model::*;

#[cfg(feature = "std")]
pub use abort::{AbortHandle, AbortSignal};
#[cfg(feature = "std")]
pub use archive::{load_result, replay, save_result};
#[cfg(feature = "std")]
pub use bot::{AiBot, Bot, BotFault, FaultKind, FnBot, InvokeError, ProcessBot};
#[cfg(feature = "std")]
pub use config::ArenaConfig;
#[cfg(feature = "std")]
pub use engine::{AbortReason, GameResult, GameStatus, MoveRecord, TurnEngine, TurnOutcome};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use session::{start_game, GameHandle, GameOptions};
#[cfg(feature = "std")]
pub use tournament::{run_tournament, TournamentConfig, TournamentReport, Verdict};
