//! Tournaments: many independent games against one bot.
//!
//! A bot is accepted when it wins every game; its rating is the average
//! score. The first game it faults in rejects it, and the games still
//! running are cancelled.

use std::path::Path;
use std::sync::Arc;

use anyhow::ensure;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::abort::AbortHandle;
use crate::engine::{AbortReason, GameResult, GameStatus};
use crate::model::Fleet;
use crate::session::{start_game, GameOptions};

/// How many games to play and how.
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub games: usize,
    /// Games running at the same time.
    pub concurrency: usize,
    pub fleet: Fleet,
    /// Per-game options. A fixed seed is offset by the game number so each
    /// game gets its own layout.
    pub options: GameOptions,
}

/// Outcome of a tournament.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Verdict {
    /// Every game won.
    Accepted { average: f64 },
    /// The bot faulted in game `game` (0-based) at `turn`.
    Rejected {
        game: usize,
        reason: AbortReason,
        turn: u32,
    },
    /// Stopped from outside before the bot faulted.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TournamentReport {
    pub bot: String,
    /// Results in game order.
    pub results: Vec<GameResult>,
    pub verdict: Verdict,
}

/// Play `config.games` games against the bot at `bot_path`.
///
/// `abort` cancels every running game. Host errors (the bot cannot be
/// started) fail the whole tournament.
pub async fn run_tournament(
    bot_path: &Path,
    config: &TournamentConfig,
    abort: &AbortHandle,
) -> anyhow::Result<TournamentReport> {
    ensure!(config.games > 0, "a tournament needs at least one game");
    let bot = bot_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| bot_path.display().to_string());
    log::info!("{} bot started tournament of {} games", bot, config.games);

    // Internal stop flag: fires on external abort and on the first fault.
    let stop = AbortHandle::new();
    let forward = {
        let mut external = abort.signal();
        let stop = stop.clone();
        tokio::spawn(async move {
            external.aborted().await;
            stop.abort();
        })
    };

    let outcome = play_games(bot_path, &bot, config, &stop).await;
    forward.abort();
    let results = outcome?;

    let verdict = judge(&results);
    if let Verdict::Accepted { average } = verdict {
        log::info!("{} bot accepted with average score {:.2}", bot, average);
    }
    Ok(TournamentReport {
        bot,
        results,
        verdict,
    })
}

async fn play_games(
    bot_path: &Path,
    bot: &str,
    config: &TournamentConfig,
    stop: &AbortHandle,
) -> anyhow::Result<Vec<GameResult>> {
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for game in 0..config.games {
        let options = GameOptions {
            seed: config.options.seed.map(|s| s.wrapping_add(game as u64)),
            ..config.options.clone()
        };
        let mut handle = start_game(bot_path, &config.fleet, &options)?.attach(stop.clone());
        let permit = semaphore.clone().acquire_owned().await?;
        let stop = stop.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let result = handle.run().await;
            if matches!(&result, Ok(r) if r.fault().is_some()) {
                stop.abort();
            }
            (game, result)
        });
    }

    let mut results: Vec<Option<GameResult>> = vec![None; config.games];
    let mut completed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (game, result) = joined?;
        let result = result?;
        completed += 1;
        log::info!(
            "{} bot completed game {}/{} of tournament",
            bot,
            completed,
            config.games
        );
        results[game] = Some(result);
    }
    Ok(results.into_iter().flatten().collect())
}

/// The lowest-numbered faulted game rejects the bot; any cancellation
/// without a fault cancels the tournament.
fn judge(results: &[GameResult]) -> Verdict {
    for (game, result) in results.iter().enumerate() {
        if let GameStatus::Aborted {
            reason: reason @ AbortReason::Fault(_),
            turn,
        } = &result.status
        {
            return Verdict::Rejected {
                game,
                reason: reason.clone(),
                turn: *turn,
            };
        }
    }
    let scores: Vec<u32> = results.iter().filter_map(GameResult::score).collect();
    if scores.is_empty() || scores.len() < results.len() {
        return Verdict::Cancelled;
    }
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    Verdict::Accepted {
        average: total as f64 / scores.len() as f64,
    }
}
