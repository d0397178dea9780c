//! Read-only view of a game for renderers.
//!
//! A [`GameSnapshot`] copies everything a renderer needs out of the board, so
//! drawing never borrows live game state. Snapshots serialize to JSON for
//! renderers living outside the process.

use serde::Serialize;

use crate::tile::Tile;
use crate::types::{Connections, Edge, GameOverReason, GamePhase, GridPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileView {
    pub connections: Connections,
    pub blocked: bool,
    pub entry: Option<Edge>,
    pub exit: Option<Edge>,
    /// Progress of the current traversal, `0..=1000`.
    pub progress_permille: u16,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            connections: tile.connections(),
            blocked: tile.is_blocked(),
            entry: tile.entry_direction(),
            exit: tile.exit_direction(),
            progress_permille: tile.progress_permille(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub columns: u16,
    pub lines: u16,
    /// Slots in line-major order (`line * columns + column`).
    pub grid: Vec<Option<TileView>>,
    /// Upcoming tiles, next first.
    pub pool: Vec<TileView>,
    pub phase: GamePhase,
    pub head: Option<GridPos>,
    pub start: GridPos,
    pub start_entry: Edge,
    pub start_countdown_ms: u32,
    pub game_over_reason: Option<GameOverReason>,
    pub filled: u32,
    pub placements: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// View of the tile at `(column, line)`, if any.
    pub fn tile(&self, column: i16, line: i16) -> Option<TileView> {
        if column < 0 || line < 0 || column as u16 >= self.columns || line as u16 >= self.lines {
            return None;
        }
        let i = line as usize * usize::from(self.columns) + column as usize;
        self.grid.get(i).copied().flatten()
    }

    pub fn playable(&self) -> bool {
        self.phase != GamePhase::GameOver
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            columns: 0,
            lines: 0,
            grid: Vec::new(),
            pool: Vec::new(),
            phase: GamePhase::NotStarted,
            head: None,
            start: GridPos::new(0, 0),
            start_entry: Edge::Left,
            start_countdown_ms: 0,
            game_over_reason: None,
            filled: 0,
            placements: 0,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_view_copies_tile_state() {
        let mut tile = Tile::new(Connections::TOP_RIGHT, 200);
        tile.start_flow(Edge::Top);
        tile.set_exit_direction(Edge::Right);
        tile.update(50);

        let view = TileView::from(&tile);
        assert_eq!(view.connections, Connections::TOP_RIGHT);
        assert!(view.blocked);
        assert_eq!(view.entry, Some(Edge::Top));
        assert_eq!(view.exit, Some(Edge::Right));
        assert_eq!(view.progress_permille, 250);
    }

    #[test]
    fn json_uses_edge_names() {
        let snap = GameSnapshot {
            columns: 1,
            lines: 1,
            grid: vec![Some(TileView::from(&Tile::new(Connections::HORIZONTAL, 10)))],
            ..GameSnapshot::default()
        };
        let json = snap.to_json().unwrap();
        assert!(json.contains(r#""connections":["right","left"]"#), "{json}");
        assert!(json.contains(r#""phase":"not_started""#), "{json}");
    }
}
