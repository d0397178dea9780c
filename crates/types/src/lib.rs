//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the game.
//! They are plain data with no behaviour beyond simple geometry, which keeps
//! them usable from the core logic, the terminal view and any external
//! renderer that consumes snapshots.
//!
//! # Board geometry
//!
//! The board is addressed by [`GridPos`] `(column, line)`:
//!
//! - **column** grows to the right (x axis)
//! - **line** grows downwards (y axis)
//!
//! Flow always leaves a tile through one [`Edge`] and enters the neighbour in
//! that direction through the [`Edge::opposite`] edge.
//!
//! # Default constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_COLUMNS` | 8 | Board width in slots |
//! | `DEFAULT_LINES` | 8 | Board height in slots |
//! | `DEFAULT_POOL_SIZE` | 5 | Upcoming tiles kept in the pool |
//! | `DEFAULT_INITIAL_DELAY_MS` | 8000 | Time before the flow starts |
//! | `DEFAULT_FILL_MS` | 2000 | Time for the flow to cross one tile |
//! | `TICK_MS` | 16 | Frame loop interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_pipes_types::{Connections, Edge, GridPos};
//!
//! let elbow = Connections::TOP_RIGHT;
//! assert!(elbow.has(Edge::Top));
//! assert!(!elbow.has(Edge::Left));
//!
//! assert_eq!(Edge::Right.opposite(), Edge::Left);
//! assert_eq!(GridPos::new(2, 3).step(Edge::Top), GridPos::new(2, 2));
//! ```

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Board width in slots (8 columns)
pub const DEFAULT_COLUMNS: u16 = 8;

/// Board height in slots (8 lines)
pub const DEFAULT_LINES: u16 = 8;

/// Number of upcoming tiles in the pool
pub const DEFAULT_POOL_SIZE: usize = 5;

/// Column of the slot where the flow starts
pub const DEFAULT_START_COLUMN: i16 = 0;

/// Line of the slot where the flow starts
pub const DEFAULT_START_LINE: i16 = 3;

/// Delay before the flow enters the start slot
pub const DEFAULT_INITIAL_DELAY_MS: u32 = 8000;

/// Time it takes the flow to cross one tile
pub const DEFAULT_FILL_MS: u32 = 2000;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Largest supported board side, in slots
pub const MAX_BOARD_SIDE: u16 = 64;

/// Largest supported pool
pub const MAX_POOL_SIZE: usize = 16;

/// One side of a slot.
///
/// The declaration order is the priority order used when the flow has to
/// pick a turn: top, right, down, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Down,
    Left,
}

impl Edge {
    /// All edges in turn priority order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Down, Edge::Left];

    /// The edge a neighbour is entered through when leaving by `self`.
    ///
    /// ```
    /// use tui_pipes_types::Edge;
    ///
    /// for edge in Edge::ALL {
    ///     assert_eq!(edge.opposite().opposite(), edge);
    /// }
    /// ```
    pub const fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Down,
            Edge::Right => Edge::Left,
            Edge::Down => Edge::Top,
            Edge::Left => Edge::Right,
        }
    }

    /// Grid offset `(d_column, d_line)` of the neighbour across this edge.
    pub const fn offset(self) -> (i16, i16) {
        match self {
            Edge::Top => (0, -1),
            Edge::Right => (1, 0),
            Edge::Down => (0, 1),
            Edge::Left => (-1, 0),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Edge::Top => 0b0001,
            Edge::Right => 0b0010,
            Edge::Down => 0b0100,
            Edge::Left => 0b1000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Down => "down",
            Edge::Left => "left",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of edges a pipe connects, stored as a 4-bit mask.
///
/// Serialized as a list of edge names, e.g. `["left", "right"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Edge>", into = "Vec<Edge>")]
pub struct Connections(u8);

impl Connections {
    pub const NONE: Connections = Connections(0);
    /// `─`
    pub const HORIZONTAL: Connections = Connections(0b1010);
    /// `│`
    pub const VERTICAL: Connections = Connections(0b0101);
    /// `└`
    pub const TOP_RIGHT: Connections = Connections(0b0011);
    /// `┌`
    pub const RIGHT_DOWN: Connections = Connections(0b0110);
    /// `┐`
    pub const DOWN_LEFT: Connections = Connections(0b1100);
    /// `┘`
    pub const LEFT_TOP: Connections = Connections(0b1001);
    /// `┬`
    pub const TEE_NO_TOP: Connections = Connections(0b1110);
    /// `┤`
    pub const TEE_NO_RIGHT: Connections = Connections(0b1101);
    /// `┴`
    pub const TEE_NO_DOWN: Connections = Connections(0b1011);
    /// `├`
    pub const TEE_NO_LEFT: Connections = Connections(0b0111);
    /// `┼`
    pub const CROSS: Connections = Connections(0b1111);

    /// The six standard two-edge pipes.
    pub const CLASSIC: [Connections; 6] = [
        Connections::HORIZONTAL,
        Connections::VERTICAL,
        Connections::TOP_RIGHT,
        Connections::RIGHT_DOWN,
        Connections::DOWN_LEFT,
        Connections::LEFT_TOP,
    ];

    /// Pipes with more than two edges.
    pub const JUNCTIONS: [Connections; 5] = [
        Connections::TEE_NO_TOP,
        Connections::TEE_NO_RIGHT,
        Connections::TEE_NO_DOWN,
        Connections::TEE_NO_LEFT,
        Connections::CROSS,
    ];

    pub fn from_edges(edges: &[Edge]) -> Self {
        edges.iter().fold(Self::NONE, |acc, &e| acc.with(e))
    }

    pub const fn with(self, edge: Edge) -> Self {
        Connections(self.0 | edge.bit())
    }

    pub const fn has(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// A placeable pipe connects at least two edges.
    pub const fn is_pipe(self) -> bool {
        self.count() >= 2
    }

    /// Connected edges in priority order.
    pub fn edges(self) -> ArrayVec<Edge, 4> {
        Edge::ALL.into_iter().filter(|&e| self.has(e)).collect()
    }

    /// Box-drawing glyph for this shape.
    pub fn glyph(self) -> char {
        match self.0 {
            0b1010 => '─',
            0b0101 => '│',
            0b0011 => '└',
            0b0110 => '┌',
            0b1100 => '┐',
            0b1001 => '┘',
            0b1110 => '┬',
            0b1101 => '┤',
            0b1011 => '┴',
            0b0111 => '├',
            0b1111 => '┼',
            0b0001 => '╵',
            0b0010 => '╶',
            0b0100 => '╷',
            0b1000 => '╴',
            _ => ' ',
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<Vec<Edge>> for Connections {
    fn from(edges: Vec<Edge>) -> Self {
        Connections::from_edges(&edges)
    }
}

impl From<Connections> for Vec<Edge> {
    fn from(value: Connections) -> Self {
        value.edges().to_vec()
    }
}

/// Slot coordinate on the board.
///
/// Signed so that neighbours of border slots can be expressed and rejected by
/// bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub column: i16,
    pub line: i16,
}

impl GridPos {
    pub const fn new(column: i16, line: i16) -> Self {
        Self { column, line }
    }

    /// The neighbouring position across `edge`.
    pub const fn step(self, edge: Edge) -> GridPos {
        let (dc, dl) = edge.offset();
        GridPos {
            column: self.column.saturating_add(dc),
            line: self.line.saturating_add(dl),
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.line)
    }
}

/// Phase of the flow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for the start delay to elapse.
    #[default]
    NotStarted,
    /// Flow is travelling through placed tiles.
    Flowing,
    /// Terminal: nothing changes any more.
    GameOver,
}

/// Why the flow stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// No tile in the start slot when the delay elapsed.
    EmptyStart,
    /// The start tile has no connection on the start entry edge.
    StartRejected,
    /// The current tile offers no edge to leave through.
    NoExit,
    /// The flow left the board.
    OffBoard,
    /// The flow reached an empty slot.
    EmptySlot,
    /// The next tile does not connect back towards the flow.
    Disconnected,
}

impl GameOverReason {
    pub fn message(self) -> &'static str {
        match self {
            GameOverReason::EmptyStart => "no pipe at the start slot",
            GameOverReason::StartRejected => "start pipe does not accept the flow",
            GameOverReason::NoExit => "pipe has no way out",
            GameOverReason::OffBoard => "flow left the board",
            GameOverReason::EmptySlot => "flow reached an empty slot",
            GameOverReason::Disconnected => "next pipe is not connected",
        }
    }
}

/// Player intents produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Place the next pool tile at the cursor.
    Place,
    Restart,
}
