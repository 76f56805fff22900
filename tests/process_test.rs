//! Engine subprocess lifecycle against a tiny shell GTP engine.

#![cfg(unix)]

use std::fs;
use tempfile::TempDir;

use strictly_go::{
    Color, Engine, EngineCommand, EngineProcess, GameSettings, GtpErrorKind, Orchestrator,
};

/// Writes a shell engine that passes every turn and exits with `exit_code` on `quit`.
fn passing_engine(dir: &TempDir, name: &str, exit_code: i32) -> EngineCommand {
    shell_engine(dir, name, &format!("printf '= \\n\\n'; exit {}", exit_code))
}

/// Writes a shell engine that passes every turn and runs `on_quit` on `quit`.
fn shell_engine(dir: &TempDir, name: &str, on_quit: &str) -> EngineCommand {
    let script = format!(
        r#"while IFS= read -r line; do
  case "$line" in
    name) printf '= {name}\n\n' ;;
    version) printf '= 0.1\n\n' ;;
    genmove*) printf '= PASS\n\n' ;;
    showboard) printf '= \n . .\n . .\n\n' ;;
    final_score) printf '= 0\n\n' ;;
    quit) {on_quit} ;;
    *) printf '= \n\n' ;;
  esac
done
"#
    );
    let path = dir.path().join(format!("{}.sh", name));
    fs::write(&path, script).expect("Failed to write engine script");
    EngineCommand::new("sh", vec![path.display().to_string()])
}

#[tokio::test]
async fn test_engine_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut engine = EngineProcess::new("black", passing_engine(&dir, "shgtp", 0));

    engine.start().await.expect("start failed");
    assert_eq!(engine.name().await.unwrap(), "shgtp");
    assert_eq!(engine.version().await.unwrap(), "0.1");
    engine.boardsize(9).await.unwrap();
    engine.komi("5.5").await.unwrap();
    engine.clear_board().await.unwrap();
    assert_eq!(engine.genmove(Color::Black).await.unwrap(), "PASS");
    assert_eq!(engine.show_board().await.unwrap(), "\n . .\n . .");
    engine.play(Color::White, "D4").await.unwrap();
    assert_eq!(engine.final_score().await.unwrap(), "0");
    engine.close().await.expect("close failed");
}

#[tokio::test]
async fn test_full_game_between_subprocesses() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let black = EngineProcess::new("black", passing_engine(&dir, "b", 0));
    let white = EngineProcess::new("white", passing_engine(&dir, "w", 0));

    let report = Orchestrator::new(
        Box::new(black),
        Box::new(white),
        GameSettings::new(9, "5.5".to_string()),
    )
    .run()
    .await
    .expect("game failed");

    assert_eq!(report.half_turns(), 2);
    assert_eq!(report.black_score(), "0");
    assert_eq!(report.white_score(), "0");
}

#[tokio::test]
async fn test_unsuccessful_exit_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut engine = EngineProcess::new("white", passing_engine(&dir, "bad", 3));

    engine.start().await.unwrap();
    let err = engine.close().await.expect_err("close should fail");
    assert!(matches!(err.kind(), GtpErrorKind::ExitStatus { .. }));
    assert_eq!(err.engine, "white");
}

#[tokio::test]
async fn test_missing_binary_is_spawn_error() {
    let command = EngineCommand::new("/definitely/not/a/gtp/engine", vec![]);
    let mut engine = EngineProcess::new("black", command);

    let err = engine.start().await.expect_err("start should fail");
    assert!(matches!(err.kind(), GtpErrorKind::Spawn(_)));
}

#[tokio::test]
async fn test_send_before_start_fails() {
    let command = EngineCommand::new("sh", vec![]);
    let mut engine = EngineProcess::new("black", command);

    let err = engine.name().await.expect_err("send should fail");
    assert!(matches!(err.kind(), GtpErrorKind::ProtocolIo(_)));
}

#[tokio::test]
async fn test_commands_after_close_fail() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut engine = EngineProcess::new("black", passing_engine(&dir, "once", 0));

    engine.start().await.unwrap();
    engine.close().await.unwrap();

    let err = engine.name().await.expect_err("send should fail");
    assert!(matches!(err.kind(), GtpErrorKind::ProtocolIo(_)));
    let err = engine.start().await.expect_err("restart should fail");
    assert!(matches!(err.kind(), GtpErrorKind::Spawn(_)));
}

#[tokio::test]
async fn test_rejected_quit_still_closes_engine() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut engine = EngineProcess::new("black", shell_engine(&dir, "busy", "printf '? busy\\n\\n'"));

    engine.start().await.unwrap();
    let err = engine.close().await.expect_err("close should fail");
    assert_eq!(err.command, "quit");
    assert!(matches!(err.kind(), GtpErrorKind::ProtocolFormat { .. }));

    let err = engine.name().await.expect_err("send should fail");
    assert!(matches!(err.kind(), GtpErrorKind::ProtocolIo(_)));
    let err = engine.close().await.expect_err("second close should fail");
    assert!(matches!(err.kind(), GtpErrorKind::ProtocolIo(_)));
}
