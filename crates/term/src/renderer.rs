//! Terminal output: raw mode, alternate screen and frame flushing.
//!
//! The first frame after `enter`, `invalidate` or a size change is painted
//! whole. After that only the runs of cells that differ from the previous
//! frame are written.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns the terminal session and the last frame shown on it
pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
    entered: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(32 * 1024),
            entered: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor, focus reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.entered = true;
        self.shown = None;

        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.bytes.queue(event::EnableFocusChange)?;
        self.flush().context("failed to set up terminal")
    }

    /// Undo `enter`. Does nothing if the session was never entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        self.bytes.clear();
        self.bytes.queue(event::DisableFocusChange)?;
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush().context("failed to restore terminal")?;
        terminal::disable_raw_mode().context("failed to disable raw mode")
    }

    /// Repaint everything on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previous frame's buffer in its place.
    ///
    /// Keep one framebuffer and pass it every frame: the swap lets the next
    /// frame diff against this one without cloning. Returns how many cells
    /// were written.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        let shown = self.shown.take();

        self.bytes.clear();
        let written = match shown.as_ref().filter(|prev| prev.same_size(fb)) {
            Some(prev) => encode_diff_into(prev, fb, &mut self.bytes)?,
            None => encode_full_into(fb, &mut self.bytes)?,
        };
        self.flush().context("failed to write frame")?;

        let mut spare = shown.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()
    }
}

/// A horizontal span of cells that differ between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Spans of `next` that differ from `prev`, top to bottom, left to right.
///
/// Frames of different sizes yield one full-width run per row of `next`.
pub fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    let comparable = prev.same_size(next);
    (0..next.height()).flat_map(move |y| {
        let new_row = next.row(y).unwrap_or(&[]);
        let old_row = if comparable { prev.row(y) } else { None };
        row_runs(old_row, new_row).map(move |(x, len)| Run { x, y, len })
    })
}

fn row_runs<'a>(old: Option<&'a [Cell]>, new: &'a [Cell]) -> impl Iterator<Item = (u16, u16)> + 'a {
    let differs = move |i: usize| old.map_or(true, |old| old[i] != new[i]);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && !differs(x) {
            x += 1;
        }
        if x == new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && differs(x) {
            x += 1;
        }
        Some((start as u16, (x - start) as u16))
    })
}

/// Writes cells as escape sequences, switching style only when it changes
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    cells: usize,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            cells: 0,
        }
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn cell(&mut self, cell: Cell) -> io::Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            self.out.queue(SetForegroundColor(truecolor(style.fg)))?;
            self.out.queue(SetBackgroundColor(truecolor(style.bg)))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        self.cells += 1;
        Ok(())
    }

    fn finish(self) -> io::Result<usize> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(self.cells)
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode a whole-screen repaint of `fb` into `out`; returns cells written.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.move_to(0, y)?;
        for &cell in fb.row(y).unwrap_or(&[]) {
            painter.cell(cell)?;
        }
    }
    Ok(painter.finish()?)
}

/// Encode only what changed from `prev` to `next`; returns cells written.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    let mut painter = Painter::new(out);
    for run in changed_runs(prev, next) {
        painter.move_to(run.x, run.y)?;
        for dx in 0..run.len {
            painter.cell(next.get(run.x + dx, run.y).unwrap_or_default())?;
        }
    }
    Ok(painter.finish()?)
}
