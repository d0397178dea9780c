//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the pipe game: tiles, the pool of
//! upcoming tiles, the board grid and the flow state machine. It has **no
//! dependencies** on rendering, input or the frame loop, making it:
//!
//! - **Deterministic**: same seed and policy produce the same tiles
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: terminal, GUI or headless frontends drive it the same way
//!
//! # Module Structure
//!
//! - [`tile`]: a pipe piece and the flow travelling through it
//! - [`pool`]: fixed-size queue of upcoming tiles
//! - [`rng`]: seeded shape generation policies
//! - [`grid`]: bounds-checked slot storage
//! - [`flow`]: the `NotStarted -> Flowing -> GameOver` state machine
//! - [`board`]: placement rules and the per-tick driver
//! - [`config`]: every tunable constant, loadable from JSON
//! - [`snapshot`]: read-only views for renderers
//!
//! # Game Rules
//!
//! - The player places the pool's next tile into any slot; unblocked tiles may
//!   be replaced, tiles the flow has entered may not.
//! - After the start delay the flow enters the start slot through the start
//!   edge, fills each tile and moves on through the tile's exit edge.
//! - When a tile offers several ways on, the flow prefers top, right, down,
//!   left, picking the first whose neighbour connects back.
//! - The game ends when the flow meets the board edge, an empty slot, or a
//!   tile that does not connect back.
//!
//! # Example
//!
//! ```
//! use tui_pipes_core::{Board, GameConfig, GenerationPolicy};
//! use tui_pipes_core::types::{Connections, GamePhase, GridPos};
//!
//! let mut board = Board::new(GameConfig {
//!     policy: GenerationPolicy::Sequence { shapes: vec![Connections::HORIZONTAL] },
//!     initial_delay_ms: 100,
//!     fill_ms: 100,
//!     ..GameConfig::default()
//! })
//! .unwrap();
//!
//! board.place_at(GridPos::new(0, 3)).unwrap();
//! board.tick(101);
//! assert_eq!(board.phase(), GamePhase::Flowing);
//!
//! // The flow fills the tile, then finds the empty slot next to it.
//! board.tick(100);
//! board.tick(16);
//! assert_eq!(board.phase(), GamePhase::GameOver);
//! ```
//!
//! # Timing
//!
//! Call [`Board::tick`](board::Board::tick) every frame with the elapsed game
//! time in milliseconds. All timing is derived from these deltas, so tests can
//! drive the game without a clock.

pub mod board;
pub mod config;
pub mod flow;
pub mod grid;
pub mod pool;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tui_pipes_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, PlaceError};
pub use config::{ConfigError, GameConfig, ScreenGeometry, StartConfig};
pub use flow::{calculate_next_flow_direction, FlowEngine, FlowStep};
pub use grid::Grid;
pub use pool::Pool;
pub use rng::{GenerationPolicy, ShapeGenerator, SimpleRng};
pub use snapshot::{GameSnapshot, TileView};
pub use tile::Tile;
