use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use battleship_arena::{
    init_logging, load_result, replay, run_tournament, save_result, start_game,
    ui::{render_board, render_moves, summarize},
    AbortHandle, AiBot, ArenaConfig, Fleet, GameOptions, TournamentConfig, Verdict,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Runs Battleships bots against hidden fleets", long_about = None)]
struct Cli {
    /// JSON configuration file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Options shared by the commands that run a bot.
#[derive(clap::Args)]
struct BotArgs {
    /// Bot executable. Receives the board as its last argument. A bare
    /// name runs the file of that name in the current directory if there
    /// is one, and is searched on PATH otherwise.
    bot: PathBuf,
    /// Argument passed to the bot before the board (repeatable).
    #[arg(long = "bot-arg", allow_hyphen_values = true)]
    bot_args: Vec<String>,
    /// Per-move time limit in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Ship lengths, e.g. 5,4,3,3,2.
    #[arg(long)]
    fleet: Option<Fleet>,
    #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game against a bot.
    Play {
        #[command(flatten)]
        args: BotArgs,
        /// Save the finished game to this file.
        #[arg(long)]
        archive: Option<PathBuf>,
        /// Print the final board with the fleet revealed.
        #[arg(long)]
        show_board: bool,
    },
    /// Play a series of games and rate the bot by its average score.
    Tournament {
        #[command(flatten)]
        args: BotArgs,
        #[arg(long)]
        games: Option<usize>,
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Check and display an archived game.
    Replay {
        archive: PathBuf,
        /// List every move.
        #[arg(long)]
        moves: bool,
    },
    /// Built-in probability bot following the bot contract: prints a move
    /// for the given board.
    SampleBot {
        /// Serialized board; may start with `-1`.
        #[arg(allow_hyphen_values = true)]
        board: String,
        #[arg(long)]
        seed: Option<u64>,
        /// Fleet the bot assumes it is hunting.
        #[arg(long)]
        fleet: Option<Fleet>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    match cli.command {
        Commands::Play {
            args,
            archive,
            show_board,
        } => {
            init_logging(LevelFilter::Info);
            let (fleet, options) = game_setup(&args, &config);
            let mut handle = start_game(&args.bot, &fleet, &options)?;
            cancel_on_ctrl_c(handle.abort_handle());

            let result = handle.run().await?;
            if let Some(path) = &archive {
                save_result(&result, path)?;
            }
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => {
                    println!("{}", summarize(&result));
                    if show_board {
                        print!("{}", render_board(handle.board(), true));
                    }
                }
            }
            Ok(if result.score().is_some() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Commands::Tournament {
            args,
            games,
            concurrency,
        } => {
            init_logging(LevelFilter::Info);
            let (fleet, options) = game_setup(&args, &config);
            let tournament = TournamentConfig {
                games: games.unwrap_or(config.games_per_tournament),
                concurrency: concurrency.unwrap_or(config.concurrency),
                fleet,
                options,
            };
            let abort = AbortHandle::new();
            cancel_on_ctrl_c(abort.clone());

            let report = run_tournament(&args.bot, &tournament, &abort).await?;
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => match &report.verdict {
                    Verdict::Accepted { average } => println!(
                        "{} accepted: average {:.2} turns over {} games",
                        report.bot,
                        average,
                        report.results.len()
                    ),
                    Verdict::Rejected { game, reason, turn } => println!(
                        "{} rejected in game {} at turn {}: {}",
                        report.bot,
                        game + 1,
                        turn,
                        reason
                    ),
                    Verdict::Cancelled => println!("{} tournament cancelled", report.bot),
                },
            }
            Ok(match report.verdict {
                Verdict::Accepted { .. } => ExitCode::SUCCESS,
                _ => ExitCode::from(2),
            })
        }
        Commands::Replay { archive, moves } => {
            init_logging(LevelFilter::Warn);
            let result = load_result(&archive)?;
            let board = replay(&result)?;
            println!("{}", summarize(&result));
            if moves {
                print!("{}", render_moves(&result));
            }
            print!("{}", render_board(&board, true));
            Ok(ExitCode::SUCCESS)
        }
        Commands::SampleBot { board, seed, fleet } => {
            init_logging(LevelFilter::Warn);
            let fleet = fleet.unwrap_or_else(|| config.fleet.clone());
            let rng = battleship_arena::session::seeded_rng(seed);
            let mut ai = AiBot::new(fleet, rng);
            println!("{}", ai.pick(&board)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Fleet and game options from flags, falling back to the configuration.
fn game_setup(args: &BotArgs, config: &ArenaConfig) -> (Fleet, GameOptions) {
    let fleet = args.fleet.clone().unwrap_or_else(|| config.fleet.clone());
    let timeout = args
        .timeout_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.bot_timeout());
    let options = GameOptions {
        timeout,
        seed: args.seed.or(config.seed),
        bot_args: args.bot_args.iter().map(Into::into).collect(),
    };
    if let Some(s) = options.seed {
        log::info!("Using fixed seed: {} (layouts will be reproducible)", s);
    }
    log::debug!("bot {} with fleet {}", args.bot.display(), fleet);
    (fleet, options)
}

/// Abort on Ctrl-C, killing any bot that is mid-move.
fn cancel_on_ctrl_c(abort: AbortHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupted, stopping");
            abort.abort();
        }
    });
}
