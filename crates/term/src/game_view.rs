//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Slots are laid out with the same [`ScreenGeometry`] the board uses to map
//! clicks, so a mouse click on a drawn slot places into that slot.

use crate::core::{GameSnapshot, ScreenGeometry, TileView};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Edge, GamePhase, GridPos};

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(24, 26, 34);
const CURSOR_BG: Rgb = Rgb::new(60, 64, 96);
const PIPE: Rgb = Rgb::new(170, 170, 180);
const WATER: Rgb = Rgb::new(80, 170, 255);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the pipe game.
pub struct GameView {
    geometry: ScreenGeometry,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(ScreenGeometry::TERMINAL)
    }
}

impl GameView {
    pub fn new(geometry: ScreenGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<GridPos>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(PIPE, BACKGROUND).into_cell(' '));

        let Some((x0, y0)) = self.board_origin() else {
            return;
        };
        let sw = self.geometry.slot_width;
        let sh = self.geometry.slot_height;
        let board_w = snap.columns.saturating_mul(sw);
        let board_h = snap.lines.saturating_mul(sh);

        fb.fill_rect(x0, y0, board_w, board_h, ' ', CellStyle::new(PIPE, BOARD_BG));
        self.draw_border(
            fb,
            x0.saturating_sub(1),
            y0.saturating_sub(1),
            board_w.saturating_add(2),
            board_h.saturating_add(2),
            CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND),
        );

        for line in 0..snap.lines as i16 {
            for column in 0..snap.columns as i16 {
                let pos = GridPos::new(column, line);
                match snap.tile(column, line) {
                    Some(tile) => self.draw_tile(fb, pos, tile, snap.head == Some(pos)),
                    None => self.draw_empty_slot(fb, pos),
                }
            }
        }

        if let Some(pos) = cursor {
            if let Some((x, y)) = self.slot_cell(pos) {
                fb.tint_rect(x, y, sw, sh, CURSOR_BG);
            }
        }

        self.draw_start_marker(fb, snap);
        let panel_x = x0.saturating_add(board_w).saturating_add(3);
        self.draw_side_panel(fb, snap, viewport, panel_x, y0.saturating_sub(1));

        let help_y = y0.saturating_add(board_h).saturating_add(1);
        if help_y < viewport.height {
            fb.put_str(
                x0.saturating_sub(1),
                help_y,
                "arrows move  space/click place  r restart  q quit",
                CellStyle::new(Rgb::new(130, 130, 140), BACKGROUND),
            );
        }

        if snap.phase == GamePhase::GameOver {
            let mid = y0.saturating_add(board_h / 2);
            self.draw_centered(fb, x0, board_w, mid.saturating_sub(1), "GAME OVER");
            if let Some(reason) = snap.game_over_reason {
                self.draw_centered(fb, x0, board_w, mid, reason.message());
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<GridPos>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn board_origin(&self) -> Option<(u16, u16)> {
        let x = u16::try_from(self.geometry.x_offset).ok()?;
        let y = u16::try_from(self.geometry.y_offset).ok()?;
        Some((x, y))
    }

    /// Top-left terminal cell of the slot at `pos`.
    fn slot_cell(&self, pos: GridPos) -> Option<(u16, u16)> {
        let (x, y) = self.geometry.slot_origin(pos);
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        // Whole slot must be addressable so arm offsets cannot overflow.
        x.checked_add(self.geometry.slot_width)?;
        y.checked_add(self.geometry.slot_height)?;
        Some((x, y))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '╔', style);
        fb.put_char(right, y, '╗', style);
        fb.put_char(x, bottom, '╚', style);
        fb.put_char(right, bottom, '╝', style);
        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '═', style);
            fb.put_char(x.saturating_add(dx), bottom, '═', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '║', style);
            fb.put_char(right, y.saturating_add(dy), '║', style);
        }
    }

    fn draw_empty_slot(&self, fb: &mut FrameBuffer, pos: GridPos) {
        let Some((x, y)) = self.slot_cell(pos) else {
            return;
        };
        let style = CellStyle::new(Rgb::new(70, 72, 84), BOARD_BG).dim();
        fb.put_char(
            x + self.geometry.slot_width / 2,
            y + self.geometry.slot_height / 2,
            '·',
            style,
        );
    }

    /// Draw a pipe as four arms around a centre glyph. Arms the flow has
    /// already passed are drawn as water.
    fn draw_tile(&self, fb: &mut FrameBuffer, pos: GridPos, tile: TileView, is_head: bool) {
        let Some((x, y)) = self.slot_cell(pos) else {
            return;
        };
        let sw = self.geometry.slot_width;
        let sh = self.geometry.slot_height;
        let cx = x + sw / 2;
        let cy = y + sh / 2;

        let dry = CellStyle::new(PIPE, BOARD_BG);
        let wet = CellStyle::new(WATER, BOARD_BG).bold();
        let arm_style = |edge: Edge| {
            let filled = match (tile.entry, tile.exit) {
                (Some(entry), _) if entry == edge => tile.progress_permille > 0,
                (_, Some(exit)) if exit == edge => tile.progress_permille >= 1000,
                _ => false,
            };
            if filled {
                wet
            } else {
                dry
            }
        };

        for edge in tile.connections.edges() {
            let style = arm_style(edge);
            match edge {
                Edge::Top => fb.fill_rect(cx, y, 1, cy - y, '│', style),
                Edge::Down => fb.fill_rect(cx, cy + 1, 1, y + sh - cy - 1, '│', style),
                Edge::Left => fb.fill_rect(x, cy, cx - x, 1, '─', style),
                Edge::Right => fb.fill_rect(cx + 1, cy, x + sw - cx - 1, 1, '─', style),
            }
        }

        let mut centre = if tile.blocked && tile.progress_permille >= 500 {
            wet
        } else {
            dry
        };
        if tile.blocked && !is_head {
            centre = centre.bold();
        }
        fb.put_char(cx, cy, tile.connections.glyph(), centre);
    }

    /// Arrow just outside the board pointing at where the flow enters.
    fn draw_start_marker(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let Some((x, y)) = self.slot_cell(snap.start) else {
            return;
        };
        let sw = self.geometry.slot_width;
        let sh = self.geometry.slot_height;
        let outside = snap.start.step(snap.start_entry);
        let on_board = outside.column >= 0
            && outside.line >= 0
            && (outside.column as u16) < snap.columns
            && (outside.line as u16) < snap.lines;
        if on_board {
            return;
        }

        let style = CellStyle::new(WATER, BACKGROUND).bold();
        match snap.start_entry {
            Edge::Left if x > 0 => fb.put_char(x - 1, y + sh / 2, '▶', style),
            Edge::Right => fb.put_char(x + sw, y + sh / 2, '◀', style),
            Edge::Top if y > 0 => fb.put_char(x + sw / 2, y - 1, '▼', style),
            Edge::Down => fb.put_char(x + sw / 2, y + sh, '▲', style),
            _ => {}
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        top: u16,
    ) {
        if top >= viewport.height || panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BACKGROUND).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);

        let mut y = top;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for (i, tile) in snap.pool.iter().enumerate() {
            if y >= viewport.height {
                return;
            }
            if i == 0 {
                fb.put_char(panel_x, y, '▸', CellStyle::new(WATER, BACKGROUND).bold());
                fb.put_char(panel_x + 2, y, tile.connections.glyph(), label);
            } else {
                fb.put_char(panel_x + 2, y, tile.connections.glyph(), value.dim());
            }
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "FLOW", label);
        y = y.saturating_add(1);
        match snap.phase {
            GamePhase::NotStarted => {
                let x = fb.put_str(panel_x, y, "starts in ", value);
                let secs = snap.start_countdown_ms.div_ceil(1000);
                let x = fb.put_u32(x, y, secs, value);
                fb.put_char(x, y, 's', value);
            }
            GamePhase::Flowing => {
                fb.put_str(panel_x, y, "flowing", CellStyle::new(WATER, BACKGROUND));
            }
            GamePhase::GameOver => {
                fb.put_str(panel_x, y, "stopped", value);
            }
        }

        y = y.saturating_add(2);
        fb.put_str(panel_x, y, "FILLED", label);
        fb.put_u32(panel_x + 8, y, snap.filled, value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "PLACED", label);
        fb.put_u32(panel_x + 8, y, snap.placements, value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "SEED", label);
        fb.put_u32(panel_x + 8, y, snap.seed, value.dim());
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, x0: u16, width: u16, y: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = x0.saturating_add(width.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BACKGROUND).bold();
        fb.put_str(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tile;
    use crate::types::Connections;

    fn snapshot(columns: u16, lines: u16) -> GameSnapshot {
        GameSnapshot {
            columns,
            lines,
            grid: vec![None; usize::from(columns) * usize::from(lines)],
            start: GridPos::new(0, 0),
            start_entry: Edge::Left,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn draws_horizontal_pipe_arms() {
        let mut snap = snapshot(2, 1);
        snap.grid[1] = Some(TileView::from(&Tile::new(Connections::HORIZONTAL, 100)));
        let view = GameView::default();
        let fb = view.render(&snap, None, Viewport::new(20, 8));

        // Slot (1, 0) starts at x = 2 + 5, y = 2; centre row is y = 3.
        for x in 7..12 {
            assert_eq!(fb.get(x, 3).unwrap().ch, '─', "x = {x}");
        }
        assert_eq!(fb.get(9, 2).unwrap().ch, ' ');
    }

    #[test]
    fn cursor_tints_its_slot() {
        let snap = snapshot(2, 2);
        let view = GameView::default();
        let fb = view.render(&snap, Some(GridPos::new(1, 1)), Viewport::new(20, 10));
        assert_eq!(fb.get(7, 5).unwrap().style.bg, CURSOR_BG);
        assert_eq!(fb.get(2, 2).unwrap().style.bg, BOARD_BG);
    }

    #[test]
    fn wet_entry_arm_after_flow_starts() {
        let mut tile = Tile::new(Connections::HORIZONTAL, 100);
        tile.start_flow(Edge::Left);
        tile.set_exit_direction(Edge::Right);
        tile.update(10);

        let mut snap = snapshot(1, 1);
        snap.grid[0] = Some(TileView::from(&tile));
        let fb = GameView::default().render(&snap, None, Viewport::new(20, 8));
        assert_eq!(fb.get(2, 3).unwrap().style.fg, WATER);
        assert_eq!(fb.get(6, 3).unwrap().style.fg, PIPE);
    }

    #[test]
    fn far_away_geometry_renders_without_overflow() {
        let mut snap = snapshot(8, 8);
        snap.grid[9] = Some(TileView::from(&Tile::new(Connections::CROSS, 100)));
        snap.phase = GamePhase::GameOver;
        let view = GameView::new(ScreenGeometry {
            x_offset: 65_530,
            y_offset: 65_530,
            slot_width: 5,
            slot_height: 3,
        });
        let fb = view.render(&snap, Some(GridPos::new(1, 1)), Viewport::new(40, 20));
        assert!(fb.cells().iter().all(|c| c.ch == ' '));
    }
}
