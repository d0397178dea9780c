//! Board module - placement and the per-tick driver
//!
//! The board owns the grid, the pool and the flow engine. Players put the
//! pool's next tile into a slot with [`Board::place`] (screen coordinates) or
//! [`Board::place_at`] (grid coordinates); the frame loop calls
//! [`Board::tick`] with the elapsed game time.

use tracing::debug;

use crate::config::{ConfigError, GameConfig};
use crate::flow::FlowEngine;
use crate::grid::Grid;
use crate::pool::Pool;
use crate::snapshot::{GameSnapshot, TileView};
use crate::tile::Tile;
use crate::types::{GamePhase, GridPos};

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// The point or position is not on the board.
    OutOfBounds,
    /// The slot holds a tile the flow has already entered.
    Blocked,
    /// The game is over.
    NotPlayable,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds => "out_of_bounds",
            PlaceError::Blocked => "blocked",
            PlaceError::NotPlayable => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds => "position is outside the board",
            PlaceError::Blocked => "slot holds a pipe the flow has entered",
            PlaceError::NotPlayable => "game is over",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    config: GameConfig,
    grid: Grid,
    pool: Pool,
    flow: FlowEngine,
    /// Successful placements since the game started.
    placements: u32,
}

impl Board {
    /// Create a board for a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let pool = Pool::new(
            config.pool_capacity,
            config.policy.clone(),
            config.seed,
            config.fill_ms,
        );
        Self {
            grid: Grid::new(config.columns, config.lines),
            pool,
            flow: FlowEngine::new(&config),
            placements: 0,
            config,
        }
    }

    /// Throw the current game away and start over with `seed`.
    pub fn restart(&mut self, seed: u32) {
        let mut config = self.config.clone();
        config.seed = seed;
        *self = Self::build(config);
        debug!(seed, "board restarted");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn flow(&self) -> &FlowEngine {
        &self.flow
    }

    pub fn phase(&self) -> GamePhase {
        self.flow.phase()
    }

    pub fn game_over(&self) -> bool {
        self.flow.is_game_over()
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn columns(&self) -> u16 {
        self.grid.columns()
    }

    pub fn lines(&self) -> u16 {
        self.grid.lines()
    }

    /// Tile at `(column, line)`; `None` for empty or off-board slots.
    pub fn get_tile(&self, column: i16, line: i16) -> Option<&Tile> {
        self.grid.get(GridPos::new(column, line))
    }

    /// Place the next pool tile at screen point `(x, y)`.
    pub fn place(&mut self, x: i32, y: i32) -> Result<GridPos, PlaceError> {
        let pos = self
            .config
            .screen
            .to_grid(x, y, self.grid.columns(), self.grid.lines())
            .ok_or(PlaceError::OutOfBounds)?;
        self.place_at(pos)
    }

    /// Place the next pool tile at `pos`, replacing any unblocked tile there.
    pub fn place_at(&mut self, pos: GridPos) -> Result<GridPos, PlaceError> {
        if !self.grid.contains(pos) {
            return Err(PlaceError::OutOfBounds);
        }
        if self.flow.is_game_over() {
            return Err(PlaceError::NotPlayable);
        }
        if self.grid.get(pos).is_some_and(Tile::is_blocked) {
            return Err(PlaceError::Blocked);
        }

        let tile = self.pool.take_next();
        let shape = tile.connections();
        let replaced = self
            .grid
            .put(pos, tile)
            .map_err(|_| PlaceError::OutOfBounds)?;
        self.placements = self.placements.wrapping_add(1);
        debug!(
            %pos,
            glyph = %shape.glyph(),
            replaced = replaced.is_some(),
            "tile placed"
        );
        Ok(pos)
    }

    /// Top-left screen point of the slot at `pos`.
    pub fn slot_screen_position(&self, pos: GridPos) -> (i32, i32) {
        self.config.screen.slot_origin(pos)
    }

    /// Advance the game by `elapsed_ms`. Does nothing once the game is over.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.flow.is_game_over() {
            return;
        }
        self.grid.update_tiles(elapsed_ms);
        self.flow.tick(&mut self.grid, elapsed_ms);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.grid.columns();
        out.lines = self.grid.lines();

        out.grid.clear();
        out.grid
            .extend(self.grid.slots().iter().map(|slot| slot.as_ref().map(TileView::from)));
        out.pool.clear();
        out.pool.extend(self.pool.iter().map(TileView::from));

        out.phase = self.flow.phase();
        out.head = self.flow.head();
        out.start = self.flow.start();
        out.start_entry = self.flow.start_entry();
        out.start_countdown_ms = self.flow.start_countdown_ms();
        out.game_over_reason = self.flow.game_over_reason();
        out.filled = self.flow.filled();
        out.placements = self.placements;
        out.seed = self.config.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::build(GameConfig::default())
    }
}
