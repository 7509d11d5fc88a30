//! Tests for configuration loading, text play and auto-play.

use pigpen::{AppConfig, AutoPlayer, GameEvent, StopReason, run_text};
use pigpen_advisor::{LookaheadAdvisor, SharedAdvisor};
use pigpen_board::{
    Advice, AdviceQuery, Advisor, AdvisorError, BoardConfig, Coord, Game, Grid, ObstacleRange,
    Outcome, Phase,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{Cursor, Write};
use std::sync::Arc;
use tokio::sync::mpsc;

struct SilentAdvisor;

#[async_trait::async_trait]
impl Advisor for SilentAdvisor {
    async fn suggest(&self, _query: &AdviceQuery) -> Result<Advice, AdvisorError> {
        Err(AdvisorError::new("offline"))
    }

    fn name(&self) -> &str {
        "silent"
    }
}

fn lookahead() -> SharedAdvisor {
    Arc::new(LookaheadAdvisor::new(Arc::new(Grid::default())))
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "[board]\nopening_blocks = 1\n\n[board.obstacles]\nmin = 2\nmax = 2\n\n[server]\nport = 9000"
    )
    .expect("write");

    let config = AppConfig::from_file(file.path()).expect("load");
    assert_eq!(config.board().opening_blocks(), &1);
    assert_eq!(config.server().port(), &9000);

    let game = config.new_game(Some(3)).expect("game");
    assert_eq!(game.blocked_count(), 2);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = AppConfig::load(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_unreadable_config_reports_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}

#[test]
fn test_advisor_url_selects_remote_advisor() {
    let remote = AppConfig::default()
        .with_advisor_url("http://localhost:5000")
        .build_advisor()
        .expect("advisor");
    assert_eq!(remote.name(), "http");

    let local = AppConfig::default().build_advisor().expect("advisor");
    assert_eq!(local.name(), "lookahead");
}

#[tokio::test]
async fn test_auto_play_reaches_an_end() {
    let game = Game::seeded(BoardConfig::default(), 12).expect("game");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut player = AutoPlayer::new(game, lookahead(), 200, tx);

    let summary = player.run().await.expect("run");

    let outcome = summary.outcome().expect("game decided");
    assert_eq!(player.game().phase(), Phase::Terminal(outcome));
    assert_eq!(summary.blocks_placed, summary.rounds);
    assert_eq!(summary.blocks_placed, player.game().blocks_placed());

    drop(player);
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert!(matches!(events.first(), Some(GameEvent::StateChanged(_))));
    assert_eq!(events.last(), Some(&GameEvent::GameOver { outcome }));
    let placed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BlockPlaced { .. }))
        .count();
    assert_eq!(placed as u32, summary.blocks_placed);
}

#[tokio::test]
async fn test_auto_play_respects_round_limit() {
    let config = BoardConfig::default().with_obstacles(ObstacleRange::none());
    let game = Game::seeded(config, 1).expect("game");
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut player = AutoPlayer::new(game, lookahead(), 2, tx);

    let summary = player.run().await.expect("run");

    assert_eq!(summary.stopped, StopReason::RoundLimit);
    assert_eq!(summary.rounds, 2);
    assert!(!player.game().is_over());
}

#[tokio::test]
async fn test_auto_play_stops_when_advice_fails() {
    let game = Game::seeded(BoardConfig::default(), 1).expect("game");
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut player = AutoPlayer::new(game, Arc::new(SilentAdvisor), 10, tx);

    let summary = player.run().await.expect("run");

    assert!(matches!(summary.stopped, StopReason::AdviceFailed(ref m) if m.contains("offline")));
    assert_eq!(summary.blocks_placed, 0);
    assert_eq!(player.game().blocks_placed(), 0);
}

#[tokio::test]
async fn test_text_play_script() {
    let config = BoardConfig::default()
        .with_obstacles(ObstacleRange::none())
        .with_opening_blocks(1);
    let mut game = Game::seeded(config, 5).expect("game");
    let script = "nonsense\n2 5\n0 0\nhint\nreset\nquit\n0 1\n";
    let mut out = Vec::new();

    run_text(&mut game, lookahead().as_ref(), Cursor::new(script), &mut out)
        .await
        .expect("session");

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("Unrecognised command 'nonsense'"));
    assert!(text.contains("occupied by the pig"));
    assert!(text.contains("Blocked (0, 0)."));
    assert!(text.contains("The pig runs (2, 5) ->"));
    assert!(text.contains("lookahead blocked"));
    assert!(text.contains("New board."));
    // Input after quit is ignored.
    assert_eq!(game.phase(), Phase::OpeningBlock(0));
    assert_eq!(game.blocks_placed(), 0);
}

#[tokio::test]
async fn test_text_play_reports_sealed_start() {
    let start = Coord::new(2, 5);
    let config = BoardConfig::default().with_obstacles(ObstacleRange::none());
    let mut game =
        Game::with_obstacles(config, start.neighbors(), StdRng::seed_from_u64(0)).expect("game");
    let mut out = Vec::new();

    run_text(&mut game, lookahead().as_ref(), Cursor::new("quit\n"), &mut out)
        .await
        .expect("session");

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("You win!"), "{text}");
    assert_eq!(game.phase(), Phase::Terminal(Outcome::TokenTrapped));
}
