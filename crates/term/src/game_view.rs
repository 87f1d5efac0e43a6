//! GameView: maps an engine snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActivePiece, EngineSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{HighScoreEntry, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Width reserved to the right of the board for the side panel
const PANEL_W: u16 = 22;

/// Lays out the board, side panel and overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Board frame origin and size in terminal cells
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// `high_scores` is listed under the GAME OVER overlay.
    pub fn render_into(
        &self,
        snap: &EngineSnapshot,
        high_scores: &[HighScoreEntry],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + PANEL_W) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, border);

        // Locked cells (and the active piece, composited by the engine).
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, x as u16, y as u16, (*color).into()),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        if snap.playable() {
            if let Some(ghost) = snap.ghost {
                self.draw_ghost(fb, frame, &ghost, snap);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            self.draw_overlay_text(fb, frame, 0, "PAUSED");
            self.draw_overlay_text(fb, frame, 2, "SPACE TO RESUME");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, -2, "GAME OVER");
            self.draw_overlay_text(fb, frame, -1, "ENTER: NEW GAME");
            self.draw_high_scores(fb, frame, high_scores);
        } else if !snap.running {
            self.draw_overlay_text(fb, frame, 0, "PRESS ENTER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &EngineSnapshot,
        high_scores: &[HighScoreEntry],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, high_scores, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, fg: Rgb) {
        let style = CellStyle::new(fg, PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Ghost cells go only where the board is empty so the piece stays visible.
    fn draw_ghost(&self, fb: &mut FrameBuffer, frame: Frame, ghost: &ActivePiece, snap: &EngineSnapshot) {
        let style = CellStyle::new(Rgb::from(ghost.color), PLAY_BG).dim();
        for (x, y) in ghost.cells() {
            let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            let empty = snap
                .board
                .get(row)
                .and_then(|r| r.get(col))
                .is_some_and(|cell| cell.is_none());
            if empty {
                self.fill_cell_rect(fb, frame, col as u16, row as u16, '░', style);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &EngineSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.stats.score),
            ("LEVEL", snap.stats.level),
            ("LINES", snap.stats.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let style = CellStyle::new(next.color.into(), SCREEN_BG).bold();
            for (dx, dy) in next.orientation.occupied() {
                let px = panel_x + (dx as u16) * self.cell_w;
                let py = y + (dy as u16) * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        }
        y = y.saturating_add(4 * self.cell_h + 1);

        let help = value.dim();
        for line in ["←→ move  ↑ rotate", "↓ soft  SPC drop", "P pause  Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_high_scores(&self, fb: &mut FrameBuffer, frame: Frame, entries: &[HighScoreEntry]) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let x = frame.x.saturating_add(3);
        let label = CellStyle::new(Rgb::new(240, 220, 80), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);

        let mut y = mid_y.saturating_add(1);
        fb.put_str(x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);
        if entries.is_empty() {
            fb.put_str(x, y, "none yet", value.dim());
            return;
        }
        let bottom = frame.y.saturating_add(frame.h).saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            if y >= bottom {
                break;
            }
            let rank = i as u16 + 1;
            let w = fb.put_u32(x, y, rank as u32, value);
            fb.put_char(x + w, y, '.', value);
            fb.put_u32(x + 4, y, entry.score, value.bold());
            fb.put_char(x + 12, y, 'L', value.dim());
            fb.put_u32(x + 13, y, entry.level, value.dim());
            y = y.saturating_add(1);
        }
    }

    /// Centered text line `offset` rows from the middle of the board frame
    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, offset: i16, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add_signed(offset);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
