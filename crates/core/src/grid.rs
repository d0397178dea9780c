//! Grid module - the board's slots
//!
//! Slots are stored in a flat vector in line-major order
//! (`line * columns + column`). Every lookup is bounds-checked and returns
//! `None` for positions off the board, which the flow engine relies on to
//! detect the board edge.

use crate::tile::Tile;
use crate::types::GridPos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: u16,
    lines: u16,
    slots: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(columns: u16, lines: u16) -> Self {
        let len = usize::from(columns) * usize::from(lines);
        Self {
            columns,
            lines,
            slots: vec![None; len],
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn lines(&self) -> u16 {
        self.lines
    }

    #[inline(always)]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if pos.column < 0
            || pos.line < 0
            || pos.column as u16 >= self.columns
            || pos.line as u16 >= self.lines
        {
            return None;
        }
        Some(pos.line as usize * usize::from(self.columns) + pos.column as usize)
    }

    /// Whether `pos` is on the board.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.index(pos).is_some()
    }

    /// Tile at `pos`; `None` when empty or off the board.
    pub fn get(&self, pos: GridPos) -> Option<&Tile> {
        self.index(pos).and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Tile> {
        self.index(pos).and_then(|i| self.slots[i].as_mut())
    }

    /// Put `tile` at `pos`, returning the tile it replaced.
    ///
    /// Off-board positions hand the tile back unchanged as `Err`.
    pub fn put(&mut self, pos: GridPos, tile: Tile) -> Result<Option<Tile>, Tile> {
        match self.index(pos) {
            Some(i) => Ok(self.slots[i].replace(tile)),
            None => Err(tile),
        }
    }

    /// Advance every placed tile by `elapsed_ms`.
    pub fn update_tiles(&mut self, elapsed_ms: u32) {
        for tile in self.slots.iter_mut().flatten() {
            tile.update(elapsed_ms);
        }
    }

    /// Placed tiles with their positions, line by line.
    pub fn tiles(&self) -> impl Iterator<Item = (GridPos, &Tile)> + '_ {
        let columns = usize::from(self.columns);
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref().map(|tile| {
                let pos = GridPos::new((i % columns) as i16, (i / columns) as i16);
                (pos, tile)
            })
        })
    }

    /// Raw slots in line-major order.
    pub fn slots(&self) -> &[Option<Tile>] {
        &self.slots
    }
}
