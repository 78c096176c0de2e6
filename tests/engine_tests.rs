use std::time::Duration;

use anyhow::anyhow;
use battleship_arena::{
    AbortHandle, AbortReason, AiBot, Board, Bot, BotFault, CellStatus, FaultKind, Fleet, FnBot,
    GameHandle, GameStatus, InvalidMoveError, InvokeError, Orientation, Placement, TurnEngine,
    TurnOutcome, CELL_COUNT,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Two single-cell ships at indices 42 and 7.
fn two_singletons() -> Board {
    Board::with_layout(&[
        Placement::new(4, 2, Orientation::Horizontal, 1),
        Placement::new(0, 7, Orientation::Vertical, 1),
    ])
    .unwrap()
}

fn counting_bot() -> Box<dyn Bot> {
    let mut next = 0;
    Box::new(FnBot::new("counter", move |_| {
        let out = next.to_string();
        next += 1;
        out
    }))
}

/// First unknown cell of the board it is shown.
fn first_unknown_bot() -> Box<dyn Bot> {
    Box::new(FnBot::new("first-unknown", |view: &str| {
        view.split(',')
            .position(|t| t == "0")
            .map(|i| i.to_string())
            .unwrap_or_default()
    }))
}

struct Stalling;

#[async_trait::async_trait]
impl Bot for Stalling {
    fn name(&self) -> &str {
        "stalling"
    }

    async fn select_move(&mut self, _board: &str) -> Result<u8, InvokeError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(0)
    }
}

struct Unreachable;

#[async_trait::async_trait]
impl Bot for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn select_move(&mut self, _board: &str) -> Result<u8, InvokeError> {
        Err(InvokeError::Host(anyhow!("no such program")))
    }
}

#[tokio::test]
async fn sequential_bot_wins_on_last_ship_cell() {
    let mut engine = TurnEngine::new(counting_bot(), two_singletons());
    let status = engine.run().await.unwrap();
    assert_eq!(status, GameStatus::Won { score: 43 });

    let result = engine.result().unwrap();
    assert_eq!(result.score(), Some(43));
    assert_eq!(result.turns, 43);
    assert_eq!(result.moves.len(), 43);
    assert_eq!(result.moves[7].status, CellStatus::Sunk);
    assert_eq!(result.moves[42].status, CellStatus::Sunk);
    assert_eq!(result.moves[0].status, CellStatus::Miss);
    assert!(engine.board().all_sunk());
}

#[tokio::test]
async fn repeated_move_aborts_on_second_turn() {
    let bot = Box::new(FnBot::new("stuck", |_| "5".to_string()));
    let mut game = GameHandle::new(bot, two_singletons());

    match game.step().await.unwrap() {
        TurnOutcome::Played(record) => {
            assert_eq!(record.turn, 1);
            assert_eq!(record.index, 5);
            assert_eq!(record.status, CellStatus::Miss);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    let before = game.board().clone();

    let outcome = game.step().await.unwrap();
    let expected = GameStatus::Aborted {
        reason: AbortReason::Fault(BotFault::InvalidMove(InvalidMoveError::AlreadyResolved {
            index: 5,
            status: CellStatus::Miss,
        })),
        turn: 2,
    };
    assert_eq!(outcome, TurnOutcome::Terminal(expected.clone()));
    assert_eq!(game.status(), &expected);
    assert_eq!(game.board(), &before);

    let result = game.result().unwrap();
    assert_eq!(result.turns, 1);
    assert_eq!(result.fault().map(BotFault::kind), Some(FaultKind::InvalidMove));
}

#[tokio::test]
async fn terminal_game_does_not_call_bot_again() {
    let mut calls = 0;
    let bot = Box::new(FnBot::new("noisy", move |_| {
        calls += 1;
        assert!(calls <= 1, "bot invoked after the game ended");
        "garbage".to_string()
    }));
    let mut engine = TurnEngine::new(bot, two_singletons());
    let first = engine.step().await.unwrap();
    assert!(matches!(
        first,
        TurnOutcome::Terminal(GameStatus::Aborted { turn: 1, .. })
    ));
    let again = engine.step().await.unwrap();
    assert_eq!(again, first);
    assert_eq!(engine.board().turns(), 0);
}

#[tokio::test]
async fn output_faults_abort_at_current_turn() {
    let cases = [
        ("100", FaultKind::Range),
        ("-1", FaultKind::Range),
        ("", FaultKind::MalformedOutput),
        ("12abc", FaultKind::MalformedOutput),
    ];
    for (output, kind) in cases {
        let bot = Box::new(FnBot::new("bad", move |_| output.to_string()));
        let mut engine = TurnEngine::new(bot, two_singletons());
        let status = engine.run().await.unwrap();
        match status {
            GameStatus::Aborted {
                reason: AbortReason::Fault(fault),
                turn,
            } => {
                assert_eq!(fault.kind(), kind, "output {:?}", output);
                assert_eq!(turn, 1);
            }
            other => panic!("output {:?} gave {:?}", output, other),
        }
        assert_eq!(engine.board().turns(), 0);
        assert!(engine.moves().is_empty());
    }
}

#[tokio::test]
async fn first_unknown_bot_moves_strictly_forward() {
    let mut rng = SmallRng::seed_from_u64(11);
    let board = Board::random(&mut rng, &Fleet::standard()).unwrap();
    let mut engine = TurnEngine::new(first_unknown_bot(), board);
    let status = engine.run().await.unwrap();
    let GameStatus::Won { score } = status else {
        panic!("expected a win, got {:?}", status);
    };
    assert!(score as usize <= CELL_COUNT);
    assert!(score >= 17);

    let indices: Vec<u8> = engine.moves().iter().map(|m| m.index).collect();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
    for (i, record) in engine.moves().iter().enumerate() {
        assert_eq!(record.turn as usize, i + 1);
    }
}

#[tokio::test]
async fn sample_ai_sinks_standard_fleet() {
    let fleet = Fleet::standard();
    let mut rng = SmallRng::seed_from_u64(2024);
    let board = Board::random(&mut rng, &fleet).unwrap();
    let bot = Box::new(AiBot::from_seed(fleet, 5));
    let mut game = GameHandle::new(bot, board);
    let result = game.run().await.unwrap();
    let score = result.score().expect("sample ai should win");
    assert!((17..=100).contains(&score));
    assert_eq!(result.bot, "sample-ai");
    assert_eq!(result.layout.len(), 5);
}

#[tokio::test]
async fn abort_before_step_cancels_without_calling_bot() {
    let bot = Box::new(FnBot::new("never", |_| panic!("bot must not run")));
    let mut game = GameHandle::new(bot, two_singletons());
    game.abort_handle().abort();
    let outcome = game.step().await.unwrap();
    assert_eq!(
        outcome,
        TurnOutcome::Terminal(GameStatus::Aborted {
            reason: AbortReason::Cancelled,
            turn: 1
        })
    );
    assert!(game.result().unwrap().fault().is_none());
}

#[tokio::test]
async fn abort_interrupts_pending_move() {
    let abort = AbortHandle::new();
    let mut game = GameHandle::with_abort(Box::new(Stalling), two_singletons(), abort.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        abort.abort();
    });
    let status = tokio::time::timeout(Duration::from_secs(5), game.run())
        .await
        .expect("abort should end the game")
        .unwrap()
        .status;
    assert_eq!(
        status,
        GameStatus::Aborted {
            reason: AbortReason::Cancelled,
            turn: 1
        }
    );
}

#[tokio::test]
async fn host_error_leaves_game_running() {
    let mut game = GameHandle::new(Box::new(Unreachable), two_singletons());
    let err = game.step().await.unwrap_err();
    assert!(format!("{:#}", err).contains("no such program"));
    assert_eq!(game.status(), &GameStatus::Running);
    assert!(game.result().is_none());
}
