//! Pool module - the queue of upcoming tiles
//!
//! The pool always holds exactly `capacity` tiles. Index 0 is the tile the
//! player places next; taking it shifts the queue and generates one new tile
//! at the back.

use std::collections::VecDeque;

use crate::rng::{GenerationPolicy, ShapeGenerator};
use crate::tile::Tile;

#[derive(Debug, Clone)]
pub struct Pool {
    tiles: VecDeque<Tile>,
    generator: ShapeGenerator,
    fill_ms: u32,
}

impl Pool {
    /// Create a full pool. A `capacity` of zero is raised to one.
    pub fn new(capacity: usize, policy: GenerationPolicy, seed: u32, fill_ms: u32) -> Self {
        let capacity = capacity.max(1);
        let mut pool = Self {
            tiles: VecDeque::with_capacity(capacity),
            generator: ShapeGenerator::new(policy, seed),
            fill_ms,
        };
        for _ in 0..capacity {
            let tile = pool.generate();
            pool.tiles.push_back(tile);
        }
        pool
    }

    fn generate(&mut self) -> Tile {
        Tile::new(self.generator.next_shape(), self.fill_ms)
    }

    /// The tile the next placement will use.
    pub fn peek_next(&self) -> &Tile {
        &self.tiles[0]
    }

    /// Remove the front tile and hand it to the caller, refilling the back.
    pub fn take_next(&mut self) -> Tile {
        let fresh = self.generate();
        self.tiles.rotate_left(1);
        let last = self.tiles.len() - 1;
        std::mem::replace(&mut self.tiles[last], fresh)
    }

    /// Discard the front tile and refill the back.
    pub fn rotate(&mut self) {
        let _ = self.take_next();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Upcoming tiles, next first.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }
}
