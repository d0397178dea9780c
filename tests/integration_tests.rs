//! Integration tests - whole games driven through the facade crate

use serde_json::Value;

use tui_pipes::core::{Board, GameConfig, GameSnapshot, GenerationPolicy};
use tui_pipes::types::{Connections, GameOverReason, GamePhase, GridPos, TICK_MS};

fn run_until_over(board: &mut Board, max_ticks: u32) -> u32 {
    for n in 0..max_ticks {
        if board.game_over() {
            return n;
        }
        board.tick(TICK_MS);
    }
    max_ticks
}

#[test]
fn test_scripted_snake_runs_off_the_board() {
    // Right along line 3, up at column 3, then back left along line 2 until
    // the flow leaves the board.
    let json = r#"{
        "initial_delay_ms": 200,
        "fill_ms": 160,
        "policy": { "kind": "sequence", "shapes": [
            ["left", "right"], ["left", "right"], ["left", "right"], ["left", "top"],
            ["down", "left"], ["left", "right"], ["left", "right"], ["left", "right"]
        ] }
    }"#;
    let mut board = Board::new(GameConfig::from_json_str(json).unwrap()).unwrap();

    let path = [
        GridPos::new(0, 3),
        GridPos::new(1, 3),
        GridPos::new(2, 3),
        GridPos::new(3, 3),
        GridPos::new(3, 2),
        GridPos::new(2, 2),
        GridPos::new(1, 2),
        GridPos::new(0, 2),
    ];
    for pos in path {
        board.place_at(pos).unwrap();
    }

    run_until_over(&mut board, 10_000);

    assert_eq!(board.phase(), GamePhase::GameOver);
    assert_eq!(board.flow().game_over_reason(), Some(GameOverReason::OffBoard));
    assert_eq!(board.flow().filled(), path.len() as u32);
    assert_eq!(board.flow().head(), Some(GridPos::new(0, 2)));
    for pos in path {
        assert!(board.get_tile(pos.column, pos.line).unwrap().is_blocked());
    }
}

#[test]
fn test_player_can_lay_pipe_ahead_of_the_flow() {
    let mut board = Board::new(GameConfig {
        policy: GenerationPolicy::Sequence {
            shapes: vec![Connections::HORIZONTAL],
        },
        initial_delay_ms: 100,
        fill_ms: 100,
        ..GameConfig::default()
    })
    .unwrap();

    board.place_at(GridPos::new(0, 3)).unwrap();
    board.tick(101);
    // Each pipe goes down just before the flow needs it.
    for column in 1..8 {
        board.place_at(GridPos::new(column, 3)).unwrap();
        board.tick(100);
        assert_eq!(board.flow().head(), Some(GridPos::new(column, 3)));
    }
    board.tick(100);
    assert_eq!(board.flow().game_over_reason(), Some(GameOverReason::OffBoard));
    assert_eq!(board.flow().filled(), 8);
}

#[test]
fn test_default_game_times_out_on_an_empty_board() {
    let mut board = Board::default();
    let ticks = run_until_over(&mut board, 1_000);
    assert_eq!(board.flow().game_over_reason(), Some(GameOverReason::EmptyStart));
    // 8000 ms at 16 ms per tick: the start is checked once the delay is exceeded.
    assert_eq!(ticks, 8000 / TICK_MS + 1);
}

#[test]
fn test_snapshot_serializes_for_external_renderers() {
    let mut board = Board::new(GameConfig {
        policy: GenerationPolicy::Sequence {
            shapes: vec![Connections::TOP_RIGHT],
        },
        initial_delay_ms: 50,
        ..GameConfig::default()
    })
    .unwrap();
    board.place_at(GridPos::new(2, 1)).unwrap();

    let mut snap = GameSnapshot::default();
    board.snapshot_into(&mut snap);
    let value: Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();

    assert_eq!(value["columns"], 8);
    assert_eq!(value["phase"], "not_started");
    assert_eq!(value["start_entry"], "left");
    assert_eq!(value["start"]["line"], 3);
    assert_eq!(value["placements"], 1);
    assert!(value["game_over_reason"].is_null());
    assert_eq!(value["pool"].as_array().unwrap().len(), 5);

    let tile = &value["grid"][8 + 2];
    assert_eq!(tile["connections"], serde_json::json!(["top", "right"]));
    assert_eq!(tile["blocked"], false);
    assert_eq!(tile["progress_permille"], 0);
}
