//! Flow engine - the state machine moving the flow through placed tiles
//!
//! ```text
//!   NotStarted --(delay elapsed, start tile accepts)--> Flowing
//!       |                                                  |
//!       +--(start empty / rejects)--> GameOver <--(no way on)--+
//! ```
//!
//! Every tick while flowing the engine picks the head tile's exit edge, and
//! once the tile is full it moves the head across that edge into
//! the neighbour, entering through the opposite edge. Anything that stops the
//! flow (board edge, empty slot, unconnected neighbour, no exit) ends the game
//! for good.

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::grid::Grid;
use crate::tile::Tile;
use crate::types::{Connections, Edge, GameOverReason, GamePhase, GridPos};

/// Where the flow goes when it leaves a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowStep {
    /// Neighbour slot across the exit edge.
    pub pos: GridPos,
    /// Edge of the neighbour the flow enters through.
    pub entry: Edge,
}

impl FlowStep {
    pub fn from_exit(from: GridPos, exit: Edge) -> Self {
        Self {
            pos: from.step(exit),
            entry: exit.opposite(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlowEngine {
    phase: GamePhase,
    head: Option<GridPos>,
    start: GridPos,
    start_entry: Edge,
    initial_delay_ms: u32,
    /// Game time since creation.
    elapsed_ms: u64,
    reason: Option<GameOverReason>,
    /// Completed tile traversals.
    filled: u32,
}

impl FlowEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            head: None,
            start: config.start.pos(),
            start_entry: config.start.entry,
            initial_delay_ms: config.initial_delay_ms,
            elapsed_ms: 0,
            reason: None,
            filled: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Slot the flow is currently in.
    pub fn head(&self) -> Option<GridPos> {
        self.head
    }

    pub fn start(&self) -> GridPos {
        self.start
    }

    pub fn start_entry(&self) -> Edge {
        self.start_entry
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.reason
    }

    pub fn filled(&self) -> u32 {
        self.filled
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Time left before the flow starts; zero once it has.
    pub fn start_countdown_ms(&self) -> u32 {
        if self.phase != GamePhase::NotStarted {
            return 0;
        }
        let left = u64::from(self.initial_delay_ms).saturating_sub(self.elapsed_ms);
        u32::try_from(left).unwrap_or(u32::MAX)
    }

    /// Run one step of the state machine after `elapsed_ms` of game time.
    ///
    /// Tiles are expected to have been updated for this tick already.
    pub fn tick(&mut self, grid: &mut Grid, elapsed_ms: u32) {
        if self.is_game_over() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));

        if self.phase == GamePhase::NotStarted {
            self.try_start(grid);
        }
        if self.phase == GamePhase::Flowing {
            self.advance(grid);
        }
    }

    fn try_start(&mut self, grid: &mut Grid) {
        if self.elapsed_ms <= u64::from(self.initial_delay_ms) {
            return;
        }
        let Some(tile) = grid.get_mut(self.start) else {
            self.game_over(GameOverReason::EmptyStart);
            return;
        };

        self.phase = GamePhase::Flowing;
        self.head = Some(self.start);
        if tile.start_flow(self.start_entry) {
            info!(start = %self.start, entry = %self.start_entry, "flow started");
        } else {
            self.game_over(GameOverReason::StartRejected);
        }
    }

    fn advance(&mut self, grid: &mut Grid) {
        let Some(head) = self.head else {
            return;
        };
        let Some(tile) = grid.get(head) else {
            // Flowing tiles are blocked and cannot be removed.
            self.game_over(GameOverReason::EmptySlot);
            return;
        };

        // The turn is re-chosen every tick until the tile is full, so pipes
        // laid next to a filling junction still count.
        let finished = tile.is_flow_finished();
        let resolved = match tile.exit_direction() {
            Some(exit) if finished => Some(exit),
            _ => resolve_exit(grid, head, tile),
        };
        let Some(exit) = resolved else {
            self.game_over(GameOverReason::NoExit);
            return;
        };
        if let Some(tile) = grid.get_mut(head) {
            tile.set_exit_direction(exit);
        }
        if !finished {
            return;
        }

        self.filled = self.filled.saturating_add(1);
        let step = FlowStep::from_exit(head, exit);
        if !grid.contains(step.pos) {
            self.game_over(GameOverReason::OffBoard);
            return;
        }
        let Some(next) = grid.get_mut(step.pos) else {
            self.game_over(GameOverReason::EmptySlot);
            return;
        };
        if !next.start_flow(step.entry) {
            self.game_over(GameOverReason::Disconnected);
            return;
        }

        debug!(from = %head, to = %step.pos, entry = %step.entry, "flow advanced");
        self.head = Some(step.pos);
    }

    fn game_over(&mut self, reason: GameOverReason) {
        info!(
            ?reason,
            head = ?self.head,
            filled = self.filled,
            "game over: {}",
            reason.message()
        );
        self.phase = GamePhase::GameOver;
        self.reason = Some(reason);
    }
}

/// Exit for the tile at `pos`, entered through its recorded entry edge.
///
/// A tile with a single way on takes it directly; anything else goes through
/// [`calculate_next_flow_direction`].
fn resolve_exit(grid: &Grid, pos: GridPos, tile: &Tile) -> Option<Edge> {
    let entry = tile.entry_direction()?;
    let mut ways_on = tile.connections().edges();
    ways_on.retain(|e| *e != entry);
    if let [only] = ways_on.as_slice() {
        return Some(*only);
    }
    let exit = choose_exit(tile.connections(), entry, |edge| {
        neighbour_accepts(grid, pos, edge)
    });
    trace!(%pos, %entry, ?exit, "turn resolved");
    exit
}

/// Pick the edge the flow should leave the tile at `pos` through, having
/// entered it through `entry`.
///
/// Candidates are tried in the order top, right, down, left. The first edge
/// the tile connects, that is not `entry`, and whose neighbour connects back
/// wins. When no neighbour connects back, the first connected edge other than
/// `entry` is returned anyway, even though the flow will spill out of it.
/// `None` means the tile offers no way on, or there is no tile at `pos`.
pub fn calculate_next_flow_direction(grid: &Grid, pos: GridPos, entry: Edge) -> Option<Edge> {
    let tile = grid.get(pos)?;
    choose_exit(tile.connections(), entry, |edge| {
        neighbour_accepts(grid, pos, edge)
    })
}

fn choose_exit(
    connections: Connections,
    entry: Edge,
    accepts: impl Fn(Edge) -> bool,
) -> Option<Edge> {
    let open = |edge: &Edge| connections.has(*edge) && *edge != entry;
    Edge::ALL
        .into_iter()
        .filter(open)
        .find(|&edge| accepts(edge))
        .or_else(|| Edge::ALL.into_iter().find(open))
}

/// Whether the neighbour across `edge` exists and connects back.
fn neighbour_accepts(grid: &Grid, pos: GridPos, edge: Edge) -> bool {
    let step = FlowStep::from_exit(pos, edge);
    grid.get(step.pos)
        .is_some_and(|next| next.has_connection(step.entry))
}
