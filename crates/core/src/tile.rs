//! Tile module - a single pipe piece and the flow travelling through it
//!
//! A tile's shape is fixed at creation. Flow enters through one edge, fills
//! the tile over `fill_ms` milliseconds of game time and leaves through the
//! exit edge chosen by the flow engine. The first time flow enters a tile it
//! becomes blocked and can no longer be replaced.

use crate::types::{Connections, Edge};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    connections: Connections,
    blocked: bool,
    entry: Option<Edge>,
    exit: Option<Edge>,
    /// Game time spent filling the current traversal, capped at `fill_ms`.
    flow_ms: u32,
    fill_ms: u32,
}

impl Tile {
    /// Create an unblocked tile. `fill_ms` of zero is treated as one.
    pub fn new(connections: Connections, fill_ms: u32) -> Self {
        Self {
            connections,
            blocked: false,
            entry: None,
            exit: None,
            flow_ms: 0,
            fill_ms: fill_ms.max(1),
        }
    }

    pub fn connections(&self) -> Connections {
        self.connections
    }

    pub fn has_connection(&self, edge: Edge) -> bool {
        self.connections.has(edge)
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Begin a traversal entering through `entry`.
    ///
    /// Does nothing and returns `false` when the tile has no connection on
    /// `entry`. Otherwise blocks the tile, resets progress and forgets any
    /// previous exit.
    pub fn start_flow(&mut self, entry: Edge) -> bool {
        if !self.has_connection(entry) {
            return false;
        }
        self.blocked = true;
        self.entry = Some(entry);
        self.exit = None;
        self.flow_ms = 0;
        true
    }

    /// Whether a traversal has been started and not yet completed.
    pub fn is_flowing(&self) -> bool {
        self.entry.is_some() && self.flow_ms < self.fill_ms
    }

    pub fn is_flow_finished(&self) -> bool {
        self.entry.is_some() && self.flow_ms >= self.fill_ms
    }

    pub fn entry_direction(&self) -> Option<Edge> {
        self.entry
    }

    pub fn exit_direction(&self) -> Option<Edge> {
        self.exit
    }

    pub fn set_exit_direction(&mut self, edge: Edge) {
        self.exit = Some(edge);
    }

    /// Advance the active traversal by `elapsed_ms` of game time.
    pub fn update(&mut self, elapsed_ms: u32) {
        if !self.is_flowing() {
            return;
        }
        self.flow_ms = self.flow_ms.saturating_add(elapsed_ms).min(self.fill_ms);
    }

    /// Traversal progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        self.flow_ms as f32 / self.fill_ms as f32
    }

    /// Traversal progress in per-mille, `0..=1000`.
    pub fn progress_permille(&self) -> u16 {
        ((u64::from(self.flow_ms) * 1000) / u64::from(self.fill_ms)) as u16
    }

    pub fn fill_ms(&self) -> u32 {
        self.fill_ms
    }
}
