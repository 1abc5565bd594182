//! Rendering layer: all terminal output lives here.
//!
//! The play field is measured in world units; every draw call maps world
//! coordinates onto terminal cells through a `Viewport`.  No game logic is
//! performed; this module only translates `RenderFrame`s into terminal
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::animation::FrameImage;
use crate::config::NumeralConfig;
use crate::entities::{PlayField, Rect, TextureTag};
use crate::error::GameResult;
use crate::numerals;
use crate::simulation::{RenderFrame, Renderer};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PIPE: Color = Color::Green;
const C_PIPE_FLIPPED: Color = Color::DarkGreen;
const C_BIRD: Color = Color::Yellow;
const C_BIRD_FADED: Color = Color::DarkGrey;
const C_SCORE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "SPACE / ↑ / click : Flap   ESC : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world units onto terminal cells.  The last terminal row is reserved
/// for the controls hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field: PlayField,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field: PlayField) -> Self {
        Self { cols, rows, field }
    }

    pub fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    pub fn col(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64).div_euclid(self.field.width.max(1) as i64) as i32
    }

    pub fn row(&self, y: i32) -> i32 {
        (y as i64 * self.play_rows() as i64).div_euclid(self.field.height.max(1) as i64) as i32
    }

    /// Cell span `[c0, c1) x [r0, r1)` covered by `rect`, clipped to the
    /// screen.  A visible rect always covers at least one cell.
    pub fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let visible = rect.right() > 0
            && rect.left < self.field.width as i32
            && rect.bottom() > 0
            && rect.top < self.field.height as i32;
        if !visible {
            return None;
        }
        let c0 = self.col(rect.left).clamp(0, self.cols as i32);
        let c1 = self.col(rect.right()).clamp(0, self.cols as i32).max(c0 + 1);
        let r0 = self.row(rect.top).clamp(0, self.play_rows() as i32);
        let r1 = self.row(rect.bottom()).clamp(0, self.play_rows() as i32).max(r0 + 1);
        let c1 = c1.min(self.cols as i32);
        let r1 = r1.min(self.play_rows() as i32);
        (c1 > c0 && r1 > r0).then_some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }
}

// ── Actor glyph ───────────────────────────────────────────────────────────────

/// Three-cell bird: wing (from the frame id), body, beak (from the rotation).
pub fn actor_glyph(image: &FrameImage) -> String {
    let id = image.frame.as_str();
    let wing = if id.ends_with("_0") {
        '^'
    } else if id.ends_with("_1") {
        '-'
    } else if id.ends_with("_2") {
        'v'
    } else {
        'x'
    };
    let beak = if image.rotation >= 15.0 {
        '↗'
    } else if image.rotation <= -30.0 {
        '↘'
    } else {
        '>'
    };

    let glyph = [wing, 'O', beak];
    if image.flip {
        glyph
            .iter()
            .rev()
            .map(|c| match c {
                '>' => '<',
                '↗' => '↖',
                '↘' => '↙',
                other => *other,
            })
            .collect()
    } else {
        glyph.iter().collect()
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    numerals: NumeralConfig,
    /// Fixed terminal size; queried from the terminal when `None`.
    size: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, numerals: NumeralConfig) -> Self {
        Self {
            out,
            numerals,
            size: None,
        }
    }

    pub fn with_size(out: W, numerals: NumeralConfig, cols: u16, rows: u16) -> Self {
        Self {
            out,
            numerals,
            size: Some((cols, rows)),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn viewport(&self, field: PlayField) -> GameResult<Viewport> {
        let (cols, rows) = match self.size {
            Some(size) => size,
            None => terminal::size()?,
        };
        Ok(Viewport::new(cols, rows, field))
    }

    /// Everything except overlays, not yet flushed.
    fn draw_scene(&mut self, frame: &RenderFrame) -> GameResult<Viewport> {
        let view = self.viewport(frame.field)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        for (rect, tag) in &frame.obstacles {
            self.draw_obstacle(&view, rect, *tag)?;
        }
        self.draw_actor(&view, frame)?;
        self.draw_score(&view, frame.score)?;
        self.draw_hint(&view)?;
        Ok(view)
    }

    fn draw_obstacle(&mut self, view: &Viewport, rect: &Rect, tag: TextureTag) -> GameResult<()> {
        let Some((c0, c1, r0, r1)) = view.cells(rect) else {
            return Ok(());
        };
        let color = match tag {
            TextureTag::Upright => C_PIPE,
            TextureTag::Flipped => C_PIPE_FLIPPED,
        };
        let band = "█".repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(color))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&band))?;
        }
        Ok(())
    }

    fn draw_actor(&mut self, view: &Viewport, frame: &RenderFrame) -> GameResult<()> {
        let (cx, cy) = frame.actor_center;
        let col = view.col(cx) - 1;
        let row = view.row(cy);
        if col < 0 || row < 0 || col + 3 > view.cols as i32 || row >= view.play_rows() as i32 {
            return Ok(());
        }
        let color = match frame.actor.opacity {
            Some(alpha) if alpha < 128 => C_BIRD_FADED,
            _ => C_BIRD,
        };
        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(actor_glyph(&frame.actor)))?;
        Ok(())
    }

    fn draw_score(&mut self, view: &Viewport, score: u32) -> GameResult<()> {
        let placed = numerals::layout(
            score,
            view.field.width,
            self.numerals.glyph_width,
            self.numerals.top,
        );
        self.out.queue(style::SetForegroundColor(C_SCORE))?;
        self.out.queue(style::SetAttribute(Attribute::Bold))?;
        for digit in placed {
            let (col, row) = (view.col(digit.x), view.row(digit.y));
            if (0..view.cols as i32).contains(&col) && (0..view.play_rows() as i32).contains(&row) {
                self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                self.out.queue(Print(digit.digit))?;
            }
        }
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn draw_hint(&mut self, view: &Viewport) -> GameResult<()> {
        self.out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(HINT))?;
        Ok(())
    }

    fn draw_panel(&mut self, view: &Viewport, lines: &[(String, Color)]) -> GameResult<()> {
        let cx = view.cols / 2;
        let start_row = (view.play_rows() / 2).saturating_sub(lines.len() as u16 / 2);

        for (i, (msg, color)) in lines.iter().enumerate() {
            let row = start_row + i as u16;
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(msg))?;
        }
        Ok(())
    }

    fn finish(&mut self, view: &Viewport) -> GameResult<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn title(&mut self, frame: &RenderFrame) -> GameResult<()> {
        let view = self.draw_scene(frame)?;
        let lines = [
            ("╔══════════════════════╗".to_string(), Color::Cyan),
            ("║      F L A P P Y     ║".to_string(), Color::Cyan),
            ("╚══════════════════════╝".to_string(), Color::Cyan),
            ("SPACE or click to start".to_string(), Color::White),
        ];
        self.draw_panel(&view, &lines)?;
        self.finish(&view)
    }

    fn frame(&mut self, frame: &RenderFrame) -> GameResult<()> {
        let view = self.draw_scene(frame)?;
        self.finish(&view)
    }

    fn game_over(&mut self, frame: &RenderFrame) -> GameResult<()> {
        let view = self.draw_scene(frame)?;
        let lines = [
            ("╔════════════════════╗".to_string(), Color::Red),
            ("║    GAME  OVER      ║".to_string(), Color::Red),
            ("╚════════════════════╝".to_string(), Color::Red),
            (format!("Final Score: {:>6}", frame.score), Color::Yellow),
            ("Any key - Continue  ESC - Quit".to_string(), Color::White),
        ];
        self.draw_panel(&view, &lines)?;
        self.finish(&view)
    }
}
