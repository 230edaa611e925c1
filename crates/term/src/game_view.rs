//! GameView: maps a `core::GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn as a grid of `cell_w x cell_h` character cells separated
//! by one-character grid lines, with the falling piece's 4x4 window outlined.
//! When the viewport is too small for that, the view falls back to a compact
//! layout with a plain border and no separators.

use crate::core::{GameSession, Grid, Tetromino};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, PIECE_WINDOW};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board lands in the framebuffer for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the board frame
    pub origin: (i32, i32),
    /// Distance between neighbouring cells, in characters
    pub pitch: (i32, i32),
    /// Size of the board frame including its border
    pub size: (i32, i32),
    pub grid_lines: bool,
}

impl BoardLayout {
    /// Top-left character of the interior of grid cell (x, y)
    pub fn cell_origin(&self, x: i32, y: i32) -> (i32, i32) {
        (
            self.origin.0 + 1 + x * self.pitch.0,
            self.origin.1 + 1 + y * self.pitch.1,
        )
    }
}

const LINE: Rgb = Rgb::new(90, 90, 100);
const SETTLED: Rgb = Rgb::new(170, 170, 180);
const WINDOW: Rgb = Rgb::new(220, 60, 60);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    grid_lines: bool,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 plus separators keeps cells roughly square in most fonts.
        Self {
            cell_w: 3,
            cell_h: 1,
            grid_lines: true,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_grid_lines(mut self, grid_lines: bool) -> Self {
        self.grid_lines = grid_lines;
        self
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Pick the lined layout when it fits the viewport, the compact one otherwise.
    pub fn layout(&self, grid: &Grid, viewport: Viewport) -> BoardLayout {
        let (cw, ch) = (self.cell_w as i32, self.cell_h as i32);
        let (gw, gh) = (grid.width() as i32, grid.height() as i32);

        let lined = (gw * (cw + 1) + 1, gh * (ch + 1) + 1);
        let fits = lined.0 <= viewport.width as i32 && lined.1 <= viewport.height as i32;
        let grid_lines = self.grid_lines && fits;

        let (pitch, size) = if grid_lines {
            ((cw + 1, ch + 1), lined)
        } else {
            ((cw, ch), (gw * cw + 2, gh * ch + 2))
        };

        let x = (viewport.width as i32 - size.0).max(0) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => (viewport.height as i32 - size.1).max(0) / 2,
            AnchorY::Top => 0,
        };

        BoardLayout {
            origin: (x, y),
            pitch,
            size,
            grid_lines,
        }
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, session: &GameSession, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let grid = session.grid();
        let layout = self.layout(grid, viewport);
        let line = CellStyle::fg(LINE);

        if layout.grid_lines {
            self.draw_grid_lines(fb, grid, &layout, line);
        } else {
            let (x, y) = layout.origin;
            fb.stroke_rect(x, y, layout.size.0, layout.size.1, line);
            for gy in 0..grid.height() as i32 {
                for gx in 0..grid.width() as i32 {
                    self.fill_cell(fb, &layout, gx, gy, '·', line);
                }
            }
        }

        // Settled cells.
        let settled = CellStyle::fg(SETTLED);
        for gy in 0..grid.height() as i32 {
            for gx in 0..grid.width() as i32 {
                if grid.is_occupied(gx, gy) {
                    self.fill_cell(fb, &layout, gx, gy, '█', settled);
                }
            }
        }

        // Falling piece.
        let piece = session.piece();
        if layout.grid_lines {
            self.draw_window(fb, &layout, &piece);
        }
        let style = CellStyle {
            bold: true,
            ..CellStyle::fg(piece_color(piece.kind))
        };
        for (x, y) in piece.cells() {
            if grid.contains(x, y) {
                self.fill_cell(fb, &layout, x, y, '█', style);
            }
        }

        self.draw_side_panel(fb, session, &layout, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut fb);
        fb
    }

    fn draw_grid_lines(&self, fb: &mut FrameBuffer, grid: &Grid, layout: &BoardLayout, style: CellStyle) {
        let (ox, oy) = layout.origin;
        let (px, py) = layout.pitch;
        let (gw, gh) = (grid.width() as i32, grid.height() as i32);

        for i in 0..=gw {
            fb.vline(ox + i * px, oy, layout.size.1, '│', style);
        }
        for j in 0..=gh {
            fb.hline(ox, oy + j * py, layout.size.0, '─', style);
        }
        for j in 0..=gh {
            for i in 0..=gw {
                let ch = junction(j > 0, j < gh, i > 0, i < gw);
                fb.put_char(ox + i * px, oy + j * py, ch, style);
            }
        }
    }

    /// Outline of the piece's 4x4 window, drawn over the grid lines.
    fn draw_window(&self, fb: &mut FrameBuffer, layout: &BoardLayout, piece: &Tetromino) {
        let (px, py) = layout.pitch;
        let x = layout.origin.0 + piece.x * px;
        let y = layout.origin.1 + piece.y * py;
        fb.stroke_rect(
            x,
            y,
            PIECE_WINDOW * px + 1,
            PIECE_WINDOW * py + 1,
            CellStyle::fg(WINDOW),
        );
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &BoardLayout, x: i32, y: i32, ch: char, style: CellStyle) {
        let (cx, cy) = layout.cell_origin(x, y);
        fb.fill_rect(cx, cy, self.cell_w as i32, self.cell_h as i32, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, session: &GameSession, layout: &BoardLayout, viewport: Viewport) {
        let panel_x = layout.origin.0 + layout.size.0 + 2;
        if panel_x + 12 > viewport.width as i32 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let piece = session.piece();

        let mut y = layout.origin.1;
        fb.put_str(panel_x, y, "PIECE", label);
        y += 1;
        fb.put_str(panel_x, y, piece_letter(piece.kind), CellStyle::fg(piece_color(piece.kind)));
        fb.put_str(panel_x + 2, y, piece.rotation.as_str(), value);
        y += 2;

        fb.put_str(panel_x, y, "POS", label);
        y += 1;
        fb.put_str(panel_x, y, &format!("{}, {}", piece.x, piece.y), value);
        y += 2;

        fb.put_str(panel_x, y, "LOCKED", label);
        y += 1;
        fb.put_str(panel_x, y, &session.pieces_locked().to_string(), value);
        y += 2;

        let help = [
            "←→  move",
            "↓   drop",
            "↑   rotate",
            "spc lock",
            "u   up",
            "q   quit",
        ];
        for text in help {
            if y >= viewport.height as i32 {
                break;
            }
            fb.put_str(panel_x, y, text, value);
            y += 1;
        }
    }
}

/// Box-drawing character where grid lines meet
fn junction(up: bool, down: bool, left: bool, right: bool) -> char {
    match (up, down, left, right) {
        (false, true, false, true) => '┌',
        (false, true, true, false) => '┐',
        (true, false, false, true) => '└',
        (true, false, true, false) => '┘',
        (false, true, true, true) => '┬',
        (true, false, true, true) => '┴',
        (true, true, false, true) => '├',
        (true, true, true, false) => '┤',
        _ => '┼',
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junctions_cover_edges_and_corners() {
        assert_eq!(junction(false, true, false, true), '┌');
        assert_eq!(junction(true, false, true, false), '┘');
        assert_eq!(junction(false, true, true, true), '┬');
        assert_eq!(junction(true, true, true, true), '┼');
    }

    #[test]
    fn cell_origin_skips_border() {
        let layout = BoardLayout {
            origin: (2, 1),
            pitch: (4, 2),
            size: (41, 41),
            grid_lines: true,
        };
        assert_eq!(layout.cell_origin(0, 0), (3, 2));
        assert_eq!(layout.cell_origin(2, 3), (11, 8));
    }
}
