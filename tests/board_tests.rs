//! Board tests - placement rules and screen mapping

use tui_pipes::core::{Board, GameConfig, GenerationPolicy, PlaceError, ScreenGeometry, Tile};
use tui_pipes::types::{Connections, GamePhase, GridPos, DEFAULT_COLUMNS, DEFAULT_LINES};

fn sequence(shapes: &[Connections]) -> GameConfig {
    GameConfig {
        policy: GenerationPolicy::Sequence {
            shapes: shapes.to_vec(),
        },
        initial_delay_ms: 100,
        fill_ms: 100,
        ..GameConfig::default()
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.columns(), DEFAULT_COLUMNS);
    assert_eq!(board.lines(), DEFAULT_LINES);
    assert_eq!(board.phase(), GamePhase::NotStarted);

    for line in 0..DEFAULT_LINES as i16 {
        for column in 0..DEFAULT_COLUMNS as i16 {
            assert!(
                board.get_tile(column, line).is_none(),
                "slot ({}, {}) should be empty",
                column,
                line
            );
        }
    }
}

#[test]
fn test_get_tile_out_of_bounds() {
    let board = Board::default();
    assert!(board.get_tile(-1, 0).is_none());
    assert!(board.get_tile(0, -1).is_none());
    assert!(board.get_tile(DEFAULT_COLUMNS as i16, 0).is_none());
    assert!(board.get_tile(0, DEFAULT_LINES as i16).is_none());
}

#[test]
fn test_pixel_mapping_corners() {
    let mut board = Board::default();
    // First pixel of the first slot.
    assert_eq!(board.place(227, 35), Ok(GridPos::new(0, 0)));
    // Last pixel of the last slot.
    assert_eq!(board.place(227 + 8 * 48 - 1, 35 + 8 * 48 - 1), Ok(GridPos::new(7, 7)));
    // One past the board on either axis.
    assert_eq!(board.place(227 + 8 * 48, 35), Err(PlaceError::OutOfBounds));
    assert_eq!(board.place(227, 35 + 8 * 48), Err(PlaceError::OutOfBounds));
    assert_eq!(board.place(226, 35), Err(PlaceError::OutOfBounds));
    assert_eq!(board.placements(), 2);
}

#[test]
fn test_slot_screen_position_round_trips_through_place() {
    let mut board = Board::default();
    let pos = GridPos::new(3, 6);
    let (x, y) = board.slot_screen_position(pos);
    assert_eq!((x, y), (227 + 3 * 48, 35 + 6 * 48));
    assert_eq!(board.place(x, y), Ok(pos));
}

#[test]
fn test_terminal_geometry() {
    let mut board = Board::new(GameConfig {
        screen: ScreenGeometry::TERMINAL,
        ..GameConfig::default()
    })
    .unwrap();
    // Slots are 5x3 cells starting at (2, 2).
    assert_eq!(board.place(2 + 5 + 4, 2 + 3 * 2), Ok(GridPos::new(1, 2)));
    assert_eq!(board.place(1, 2), Err(PlaceError::OutOfBounds));
}

#[test]
fn test_replacing_advances_the_pool_each_time() {
    let mut board = Board::new(sequence(&[
        Connections::HORIZONTAL,
        Connections::VERTICAL,
        Connections::CROSS,
    ]))
    .unwrap();
    let pos = GridPos::new(5, 5);
    let expected = [
        Connections::HORIZONTAL,
        Connections::VERTICAL,
        Connections::CROSS,
        Connections::HORIZONTAL,
    ];
    for shape in expected {
        board.place_at(pos).unwrap();
        assert_eq!(board.get_tile(5, 5).map(Tile::connections), Some(shape));
    }
    assert_eq!(board.placements(), 4);
}

#[test]
fn test_game_over_is_reported_before_blocked_slots() {
    let mut board = Board::new(sequence(&[Connections::HORIZONTAL])).unwrap();
    board.place_at(GridPos::new(0, 3)).unwrap();
    board.tick(101);
    board.tick(100);
    assert!(board.game_over());

    assert!(board.get_tile(0, 3).unwrap().is_blocked());
    assert_eq!(board.place_at(GridPos::new(0, 3)), Err(PlaceError::NotPlayable));
    assert_eq!(board.place_at(GridPos::new(4, 4)), Err(PlaceError::NotPlayable));
    assert_eq!(board.place_at(GridPos::new(40, 4)), Err(PlaceError::OutOfBounds));
}

#[test]
fn test_place_error_codes() {
    assert_eq!(PlaceError::OutOfBounds.code(), "out_of_bounds");
    assert_eq!(PlaceError::Blocked.code(), "blocked");
    assert_eq!(PlaceError::NotPlayable.code(), "not_playable");
}

#[test]
fn test_restart_with_same_seed_replays_the_pool() {
    let mut board = Board::default();
    let first: Vec<_> = board.pool().iter().map(Tile::connections).collect();
    board.place_at(GridPos::new(0, 0)).unwrap();
    board.restart(board.config().seed);
    let again: Vec<_> = board.pool().iter().map(Tile::connections).collect();
    assert_eq!(first, again);
    assert_eq!(board.placements(), 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = Board::new(GameConfig {
        columns: 0,
        ..GameConfig::default()
    });
    assert!(result.is_err());
}
