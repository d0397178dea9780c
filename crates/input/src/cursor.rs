//! Keyboard placement cursor.

use crate::types::{GameAction, GridPos};

/// Slot selected for keyboard placement, clamped to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: GridPos,
    columns: u16,
    lines: u16,
}

impl Cursor {
    pub fn new(columns: u16, lines: u16, pos: GridPos) -> Self {
        let mut cursor = Self {
            pos,
            columns: columns.max(1),
            lines: lines.max(1),
        };
        cursor.set(pos);
        cursor
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }

    /// Move to `pos`, clamped to the board.
    pub fn set(&mut self, pos: GridPos) {
        let max_column = (self.columns - 1) as i16;
        let max_line = (self.lines - 1) as i16;
        self.pos = GridPos::new(pos.column.clamp(0, max_column), pos.line.clamp(0, max_line));
    }

    /// Apply a cursor action. Returns `true` when the action was a cursor move.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let (dc, dl) = match action {
            GameAction::CursorLeft => (-1, 0),
            GameAction::CursorRight => (1, 0),
            GameAction::CursorUp => (0, -1),
            GameAction::CursorDown => (0, 1),
            GameAction::Place | GameAction::Restart => return false,
        };
        self.set(GridPos::new(self.pos.column + dc, self.pos.line + dl));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_within_bounds() {
        let mut cursor = Cursor::new(3, 2, GridPos::new(0, 0));
        assert!(cursor.apply(GameAction::CursorRight));
        assert!(cursor.apply(GameAction::CursorDown));
        assert_eq!(cursor.pos(), GridPos::new(1, 1));
    }

    #[test]
    fn clamps_at_edges() {
        let mut cursor = Cursor::new(3, 2, GridPos::new(0, 0));
        cursor.apply(GameAction::CursorLeft);
        cursor.apply(GameAction::CursorUp);
        assert_eq!(cursor.pos(), GridPos::new(0, 0));

        for _ in 0..10 {
            cursor.apply(GameAction::CursorRight);
            cursor.apply(GameAction::CursorDown);
        }
        assert_eq!(cursor.pos(), GridPos::new(2, 1));
    }

    #[test]
    fn clamps_initial_position() {
        let cursor = Cursor::new(4, 4, GridPos::new(9, -3));
        assert_eq!(cursor.pos(), GridPos::new(3, 0));
    }

    #[test]
    fn ignores_non_cursor_actions() {
        let mut cursor = Cursor::new(4, 4, GridPos::new(1, 1));
        assert!(!cursor.apply(GameAction::Place));
        assert!(!cursor.apply(GameAction::Restart));
        assert_eq!(cursor.pos(), GridPos::new(1, 1));
    }
}
