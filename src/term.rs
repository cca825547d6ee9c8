/// Terminal backend for the abstract render capabilities.
///
/// The 128×64 monochrome playfield maps onto 128 terminal columns and 32
/// rows using half-block glyphs (two vertical pixels per cell).  Text
/// overlays land on the cell row covering their pixel row.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use star_courier::compute::{HEIGHT, WIDTH};
use star_courier::display::{Canvas, SegmentDisplay};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PIXELS: Color = Color::White;
const C_TEXT: Color = Color::Cyan;
const C_SEGMENT: Color = Color::Yellow;

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TermCanvas<W: Write> {
    out: W,
    /// Backing framebuffer, row-major, `WIDTH * HEIGHT` pixels.
    buf: Vec<bool>,
    /// Text overlays queued for the next present, `(line, x, y)` in pixels.
    texts: Vec<(String, i32, i32)>,
}

impl<W: Write> TermCanvas<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: vec![false; (WIDTH * HEIGHT) as usize],
            texts: Vec::new(),
        }
    }

    fn cell(&self, x: i32, y: i32) -> bool {
        self.buf[(y * WIDTH + x) as usize]
    }
}

impl<W: Write> Canvas for TermCanvas<W> {
    fn clear(&mut self) {
        self.buf.fill(false);
        self.texts.clear();
    }

    fn pixel(&mut self, x: i32, y: i32) {
        // Out-of-range draws are clipped, never an error.
        if (0..WIDTH).contains(&x) && (0..HEIGHT).contains(&y) {
            self.buf[(y * WIDTH + x) as usize] = true;
        }
    }

    fn text(&mut self, s: &str, x: i32, y: i32) {
        self.texts.push((s.to_string(), x, y));
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(style::SetForegroundColor(C_PIXELS))?;
        for row in 0..HEIGHT / 2 {
            let mut line = String::with_capacity(WIDTH as usize);
            for col in 0..WIDTH {
                let top = self.cell(col, row * 2);
                let bottom = self.cell(col, row * 2 + 1);
                line.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            self.out.queue(Print(line))?;
        }

        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        for (s, x, y) in &self.texts {
            let col = (*x).clamp(0, WIDTH - 1) as u16;
            let row = (*y / 2).clamp(0, HEIGHT / 2 - 1) as u16;
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(Print(s))?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, (HEIGHT / 2) as u16))?;
        self.out.flush()
    }
}

// ── Segment display ───────────────────────────────────────────────────────────

/// The 4-digit status readout sits in the top-right corner, where the real
/// hardware's segment display would be.  Best-effort: a failed draw here
/// never takes the game down.
impl<W: Write> SegmentDisplay for TermCanvas<W> {
    fn show(&mut self, text: &str) {
        let col = (WIDTH as u16).saturating_sub(text.chars().count() as u16);
        let _ = self
            .out
            .queue(cursor::MoveTo(col, 0))
            .and_then(|o| o.queue(style::SetForegroundColor(C_SEGMENT)))
            .and_then(|o| o.queue(Print(text)))
            .and_then(|o| o.queue(style::ResetColor));
        let _ = self.out.flush();
    }
}
