use battleship_arena::{
    load_result, replay, save_result, AiBot, Board, CellStatus, Fleet, FnBot, GameHandle,
    GameResult, GameStatus, Orientation, Placement,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tempfile::TempDir;

async fn finished_game(seed: u64) -> GameResult {
    let fleet = Fleet::standard();
    let board = Board::random(&mut SmallRng::seed_from_u64(seed), &fleet).unwrap();
    let mut game = GameHandle::new(Box::new(AiBot::from_seed(fleet, seed)), board);
    game.run().await.unwrap()
}

#[tokio::test]
async fn archive_roundtrip_and_replay() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game.bin");
    let result = finished_game(17).await;
    save_result(&result, &path).unwrap();

    let loaded = load_result(&path).unwrap();
    assert_eq!(loaded, result);
    let board = replay(&loaded).unwrap();
    assert!(board.all_sunk());
    assert_eq!(Some(board.turns()), result.score());
}

#[tokio::test]
async fn aborted_game_replays() {
    let board = Board::random(&mut SmallRng::seed_from_u64(3), &Fleet::standard()).unwrap();
    let mut shots = vec!["0", "1", "1"].into_iter();
    let bot = FnBot::new("repeat", move |_| shots.next().unwrap_or("x").to_string());
    let mut game = GameHandle::new(Box::new(bot), board);
    let result = game.run().await.unwrap();
    assert!(matches!(result.status, GameStatus::Aborted { turn: 3, .. }));
    let replayed = replay(&result).unwrap();
    assert_eq!(replayed.turns(), 2);
}

#[tokio::test]
async fn tampered_archive_fails_replay() {
    let result = finished_game(4).await;

    let mut wrong_status = result.clone();
    let first = &mut wrong_status.moves[0];
    first.status = match first.status {
        CellStatus::Miss => CellStatus::Hit,
        _ => CellStatus::Miss,
    };
    assert!(replay(&wrong_status).is_err());

    let mut missing_move = result.clone();
    missing_move.moves.pop();
    assert!(replay(&missing_move).is_err());

    let mut wrong_score = result.clone();
    wrong_score.status = GameStatus::Won { score: 3 };
    assert!(replay(&wrong_score).is_err());

    let mut unfinished = result;
    unfinished.status = GameStatus::Running;
    assert!(replay(&unfinished).is_err());
}

#[test]
fn garbage_file_is_not_an_archive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.bin");
    std::fs::write(&path, b"not bincode").unwrap();
    let err = load_result(&path).unwrap_err();
    assert!(err.to_string().contains("not a game archive"));
    assert!(load_result(&dir.path().join("absent.bin")).is_err());
}

#[tokio::test]
async fn archive_with_far_off_layout_fails_replay() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edited.bin");
    let mut result = finished_game(8).await;
    result.layout[0] = Placement::new(0, usize::MAX, Orientation::Horizontal, 2);
    save_result(&result, &path).unwrap();

    let loaded = load_result(&path).unwrap();
    let err = replay(&loaded).unwrap_err();
    assert!(err.to_string().contains("recorded layout"), "{}", err);
}
