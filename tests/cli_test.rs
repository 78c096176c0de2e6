use std::process::Command;

use battleship_arena::{GameResult, GameStatus, CELL_COUNT};
use tempfile::TempDir;

const EXE: &str = env!("CARGO_BIN_EXE_battleship-arena");

fn arena() -> Command {
    let mut cmd = Command::new(EXE);
    cmd.env_remove("ARENA_LOG");
    cmd
}

#[test]
fn sample_bot_prints_one_move() {
    let mut cells = vec!["0"; CELL_COUNT];
    cells[0] = "-1";
    cells[1] = "1";
    let out = arena()
        .args(["sample-bot", "--seed", "3", &cells.join(",")])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = String::from_utf8(out.stdout).unwrap();
    let index: usize = text.trim().parse().unwrap();
    assert!(index < CELL_COUNT);
    assert!(index != 0 && index != 1);
}

#[test]
fn sample_bot_rejects_bad_board() {
    let out = arena().args(["sample-bot", "0,0,0"]).output().unwrap();
    assert!(!out.status.success());
}

#[test]
fn play_against_builtin_bot() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("game.bin");
    let out = arena()
        .args(["play", EXE, "--bot-arg", "sample-bot", "--seed", "7", "--format", "json"])
        .arg("--archive")
        .arg(&archive)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let result: GameResult = serde_json::from_slice(&out.stdout).unwrap();
    assert!(matches!(result.status, GameStatus::Won { .. }));
    assert_eq!(result.turns as usize, result.moves.len());

    let replayed = arena()
        .arg("replay")
        .arg(&archive)
        .output()
        .unwrap();
    assert!(replayed.status.success());
    let text = String::from_utf8_lossy(&replayed.stdout);
    assert!(text.contains("sank every ship"));
}

#[cfg(unix)]
#[test]
fn faulting_bot_exits_with_status_two() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("bad.sh");
    std::fs::write(&script, "echo 250\n").unwrap();
    let out = arena()
        .args(["play", "/bin/sh", "--bot-arg"])
        .arg(&script)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("aborted at turn 1"), "{}", text);
}

#[test]
fn config_file_sets_fleet() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("arena.json");
    std::fs::write(&config, r#"{"fleet": [2], "seed": 1, "bot_timeout_ms": 5000}"#).unwrap();
    let out = arena()
        .arg("--config")
        .arg(&config)
        .args(["play", EXE, "--bot-arg", "sample-bot", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let result: GameResult = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result.layout.len(), 1);
    assert_eq!(result.layout[0].length, 2);

    std::fs::write(&config, r#"{"bogus": true}"#).unwrap();
    let out = arena()
        .arg("--config")
        .arg(&config)
        .args(["play", EXE])
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[cfg(unix)]
#[test]
fn bare_bot_name_runs_file_in_current_directory() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let script = dir.path().join("sweeper");
    std::fs::write(
        &script,
        "#!/bin/sh\ni=0\nfor t in $(echo \"$1\" | tr ',' ' '); do\n  if [ \"$t\" = 0 ]; then echo $i; exit 0; fi\n  i=$((i+1))\ndone\nexit 1\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let out = arena()
        .current_dir(dir.path())
        .args(["play", "sweeper", "--fleet", "2", "--seed", "4", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let result: GameResult = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result.bot, "sweeper");
    assert!(matches!(result.status, GameStatus::Won { .. }));
}
