//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Output is built as runs of changed cells. With no usable previous frame
//! (first draw, resize, invalidate) every row is one run after a screen
//! clear; otherwise only cells that differ are rewritten. The board's grid
//! lines never change between frames, so a typical frame is a handful of
//! short runs around the falling piece and the side panel.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Horizontal span of cells to rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Changed runs of `next`, row by row. Every cell is dirty without `prev`.
struct ChangedRuns<'a> {
    prev: Option<&'a FrameBuffer>,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl ChangedRuns<'_> {
    fn dirty(&self, x: u16, y: u16) -> bool {
        self.prev
            .map_or(true, |prev| prev.get(x, y) != self.next.get(x, y))
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let (w, h) = (self.next.width(), self.next.height());
        while self.y < h {
            while self.x < w && !self.dirty(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.dirty(self.x, self.y) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

/// Changed runs between two frames; a size mismatch makes every cell dirty.
pub fn changed_runs<'a>(
    prev: Option<&'a FrameBuffer>,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = Run> + 'a {
    ChangedRuns {
        prev: prev.filter(|p| p.width() == next.width() && p.height() == next.height()),
        next,
        x: 0,
        y: 0,
    }
}

/// Emits only the style attributes that differ from the last cell written.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl Pen<'_> {
    fn cell(&mut self, ch: char, style: CellStyle) -> io::Result<()> {
        let last = self.style.replace(style);
        if last.map(|s| s.fg) != Some(style.fg) {
            queue!(self.out, SetForegroundColor(color(style.fg)))?;
        }
        if last.map(|s| s.bg) != Some(style.bg) {
            queue!(self.out, SetBackgroundColor(color(style.bg)))?;
        }
        let was_bold = last.is_some_and(|s| s.bold);
        if style.bold && !was_bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        } else if !style.bold && was_bold {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        queue!(self.out, Print(ch))
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode the cells of `next` that differ from `prev` into `out`.
///
/// Without a previous frame of the same size the screen is cleared and
/// redrawn. Returns the number of cells written.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    let full = !prev.is_some_and(|p| p.width() == next.width() && p.height() == next.height());
    if full {
        queue!(out, terminal::Clear(ClearType::All))?;
    }

    let mut pen = Pen { out, style: None };
    let mut written = 0;
    for run in changed_runs(prev, next) {
        queue!(pen.out, cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = next.get(x, run.y).unwrap_or_default();
            pen.cell(cell.ch, cell.style)?;
        }
        written += run.len as usize;
    }

    if pen.style.is_some() {
        queue!(pen.out, SetAttribute(Attribute::Reset))?;
    }
    Ok(written)
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    enhanced_keys: bool,
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
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            enhanced_keys: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    ///
    /// Asks for key release events where the terminal supports the keyboard
    /// enhancement protocol; see [`TerminalRenderer::reports_key_release`].
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        queue!(self.buf, terminal::EnterAlternateScreen)?;
        if self.enhanced_keys {
            queue!(
                self.buf,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        queue!(self.buf, cursor::Hide, terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Whether key release events will arrive after [`TerminalRenderer::enter`].
    pub fn reports_key_release(&self) -> bool {
        self.enhanced_keys
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            queue!(self.buf, PopKeyboardEnhancementFlags)?;
        }
        queue!(
            self.buf,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw everything on the next frame (after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then keep it as the frame to diff against.
    ///
    /// The buffer handed back in `fb` is the previous frame, ready to be
    /// cleared and reused by the caller.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush()?;

        let mut spare = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.last = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let mut stdout = self.stdout.lock();
        stdout.write_all(&self.buf)?;
        stdout.flush()?;
        Ok(())
    }
}
