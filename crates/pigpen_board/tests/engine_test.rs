//! Tests for the trap-the-pig turn engine.

use pigpen_board::{
    BoardConfig, BoardShape, Coord, Game, GameError, GameResult, IllegalMove, ObstacleRange,
    Outcome, Phase, TokenStep,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const START: Coord = Coord { col: 2, row: 5 };

fn open_config() -> BoardConfig {
    BoardConfig::default().with_obstacles(ObstacleRange::none())
}

fn small_config() -> BoardConfig {
    BoardConfig::new(BoardShape::rectangle(3, 3), Coord::new(1, 1))
        .with_obstacles(ObstacleRange::none())
        .with_opening_blocks(1)
}

/// A game whose pig is one placement away from being trapped.
fn nearly_trapped() -> Game {
    let ring: Vec<_> = START.neighbors().into_iter().skip(1).collect();
    Game::with_obstacles(
        open_config().with_opening_blocks(6),
        ring,
        StdRng::seed_from_u64(0),
    )
    .expect("valid layout")
}

#[test]
fn test_reset_properties_hold_for_many_seeds() {
    for seed in 0..64 {
        let game = Game::seeded(BoardConfig::default(), seed).expect("default config");
        let count = game.blocked_count();
        assert!((5..=15).contains(&count), "seed {seed}: {count} obstacles");
        assert!(!game.board().is_blocked(START));
        assert_eq!(game.token(), START);
        assert_eq!(game.phase(), Phase::OpeningBlock(0));
        assert_eq!(game.result(), GameResult::InProgress);
        assert_eq!(game.blocks_placed(), 0);
    }
}

#[test]
fn test_reset_after_play_starts_over() {
    let mut game = Game::seeded(small_config(), 5).expect("game");
    game.place_block(Coord::new(0, 0)).expect("legal");
    game.token_turn().expect("pig turn");
    assert!(game.is_over());

    game.reset();
    assert_eq!(game.phase(), Phase::OpeningBlock(0));
    assert_eq!(game.token(), Coord::new(1, 1));
    assert_eq!(game.blocked_count(), 0);
    assert_eq!(game.result(), GameResult::InProgress);
}

#[test]
fn test_small_board_pig_escapes_in_one_step() {
    let mut game = Game::seeded(small_config(), 1).expect("game");
    game.place_block(Coord::new(0, 0)).expect("legal");
    assert_eq!(game.phase(), Phase::TokenMove);

    let turn = game.token_turn().expect("pig turn");
    assert!(matches!(turn.step, TokenStep::Pursuit(_)));
    assert!(game.board().grid().is_border(turn.to()));
    assert_eq!(turn.result, GameResult::TokenEscaped);
    assert_eq!(game.phase(), Phase::Terminal(Outcome::TokenEscaped));
}

#[test]
fn test_six_blocks_around_pig_trap_it() {
    let mut game = Game::seeded(open_config().with_opening_blocks(6), 3).expect("game");
    let ring = START.neighbors();
    for (i, cell) in ring.iter().enumerate() {
        let result = game.place_block(*cell).expect("legal");
        if i < 5 {
            assert_eq!(result, GameResult::InProgress);
        } else {
            assert_eq!(result, GameResult::TokenTrapped);
        }
    }
    assert_eq!(game.phase(), Phase::Terminal(Outcome::TokenTrapped));
    assert!(game.phase().is_terminal());
}

#[test]
fn test_block_on_pig_rejected_without_change() {
    let mut game = Game::seeded(BoardConfig::default(), 9).expect("game");
    let before = game.board().blocked().clone();

    let result = game.place_block(START);

    assert_eq!(
        result,
        Err(GameError::IllegalMove(IllegalMove::OccupiedByToken(START)))
    );
    assert_eq!(game.board().blocked(), &before);
    assert_eq!(game.phase(), Phase::OpeningBlock(0));
}

#[test]
fn test_illegal_placement_keeps_turn() {
    let mut game = Game::seeded(open_config(), 9).expect("game");
    game.place_block(Coord::new(1, 1)).expect("legal");
    assert!(game.place_block(Coord::new(1, 1)).is_err());
    assert!(game.place_block(Coord::new(-1, 3)).is_err());
    assert_eq!(game.phase(), Phase::OpeningBlock(1));
    assert_eq!(game.blocks_placed(), 1);
}

#[test]
fn test_main_phase_alternates() {
    let mut game = Game::seeded(open_config().with_opening_blocks(1), 4).expect("game");
    game.place_block(Coord::new(0, 0)).expect("legal");
    assert_eq!(game.phase(), Phase::TokenMove);
    assert!(!game.is_blocking_turn());

    game.token_turn().expect("pig turn");
    assert_eq!(game.phase(), Phase::MainBlock);
    assert!(game.is_blocking_turn());
    assert_eq!(game.opening_remaining(), 0);

    game.place_block(Coord::new(4, 10)).expect("legal");
    assert_eq!(game.phase(), Phase::TokenMove);
}

#[test]
fn test_termination_check_is_idempotent() {
    let mut game = Game::seeded(BoardConfig::default(), 11).expect("game");
    let first = game.check_termination();
    let second = game.check_termination();
    assert_eq!(first, second);
    assert_eq!(game.phase(), Phase::OpeningBlock(0));

    let mut game = nearly_trapped();
    game.place_block(START.neighbors()[0]).expect("legal");
    assert_eq!(game.check_termination(), GameResult::TokenTrapped);
    assert_eq!(game.check_termination(), GameResult::TokenTrapped);
}

#[test]
fn test_terminal_game_rejects_everything_but_reset() {
    let mut game = nearly_trapped();
    game.place_block(START.neighbors()[0]).expect("legal");
    assert!(game.is_over());
    let blocked = game.blocked_count();

    assert!(matches!(
        game.place_block(Coord::new(0, 0)),
        Err(GameError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        game.token_turn(),
        Err(GameError::InvalidStateTransition { .. })
    ));
    assert!(matches!(
        game.begin_advice(),
        Err(GameError::InvalidStateTransition { .. })
    ));
    assert_eq!(game.blocked_count(), blocked);

    game.reset();
    assert_eq!(game.phase(), Phase::OpeningBlock(0));
}

#[test]
fn test_sealed_layout_detected_on_first_check() {
    // Pocket of two cells: the pig can shuffle inside but never leave.
    let pocket = [START, Coord::new(2, 4)];
    let walls: Vec<_> = pocket
        .iter()
        .flat_map(|c| c.neighbors())
        .filter(|n| !pocket.contains(n))
        .collect();
    let mut game = Game::with_obstacles(
        open_config().with_opening_blocks(1),
        walls,
        StdRng::seed_from_u64(2),
    )
    .expect("valid layout");

    assert_eq!(game.check_termination(), GameResult::TokenTrapped);
    assert_eq!(game.phase(), Phase::Terminal(Outcome::TokenTrapped));
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = Game::seeded(BoardConfig::default(), seed).expect("game");
        let obstacles = game.board().blocked().clone();
        let mut moves = Vec::new();
        for cell in [Coord::new(1, 1), Coord::new(3, 9), Coord::new(1, 9)] {
            let _ = game.place_block(cell);
        }
        while game.phase() == Phase::TokenMove {
            moves.push(game.token_turn().expect("pig turn").to());
            if game.is_blocking_turn() {
                let free = game
                    .board()
                    .grid()
                    .cells()
                    .iter()
                    .copied()
                    .find(|c| game.board().is_open(*c) && *c != game.token());
                match free {
                    Some(c) => {
                        let _ = game.place_block(c);
                    }
                    None => break,
                }
            }
        }
        (obstacles, moves)
    };
    assert_eq!(play(21), play(21));
}

#[test]
fn test_hexagon_board_plays() {
    let center = Coord::new(4, 4);
    let config = BoardConfig::new(BoardShape::Hexagon { center, radius: 4 }, center);
    let mut game = Game::seeded(config, 8).expect("hexagon game");
    assert_eq!(game.token(), center);
    assert!((5..=15).contains(&game.blocked_count()));

    let target = game
        .board()
        .grid()
        .cells()
        .iter()
        .copied()
        .find(|c| game.board().is_open(*c) && *c != center)
        .expect("free cell");
    game.place_block(target).expect("legal");
    assert_eq!(game.phase(), Phase::OpeningBlock(1));
}

#[test]
fn test_far_out_placements_rejected_on_both_shapes() {
    let center = Coord::new(4, 4);
    let hexagon = BoardConfig::new(BoardShape::Hexagon { center, radius: 4 }, center)
        .with_obstacles(ObstacleRange::none());
    for config in [open_config(), hexagon] {
        let mut game = Game::seeded(config, 2).expect("game");
        for c in [
            Coord::new(i32::MIN, 2),
            Coord::new(i32::MAX, 2),
            Coord::new(0, i32::MIN),
            Coord::new(0, i32::MAX),
        ] {
            assert_eq!(
                game.place_block(c),
                Err(GameError::IllegalMove(IllegalMove::OutOfBounds(c)))
            );
        }
        assert_eq!(game.phase(), Phase::OpeningBlock(0));
        assert_eq!(game.blocked_count(), 0);
    }
}

#[test]
fn test_board_at_coordinate_limits_rejected() {
    let config = BoardConfig::new(
        BoardShape::Rectangle {
            min_col: i32::MAX - 4,
            max_col: i32::MAX,
            min_row: 0,
            max_row: 4,
        },
        Coord::new(i32::MAX - 2, 2),
    )
    .with_obstacles(ObstacleRange::none());
    assert!(matches!(
        Game::seeded(config, 1),
        Err(GameError::InvalidConfig(m)) if m.contains("coordinate limits")
    ));
}
