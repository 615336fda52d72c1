//! crossterm backend: the 750×250 playfield scaled onto the terminal grid.
//!
//! Layout, top to bottom: play area (all rows but the last two), the ground
//! line, the controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use super::Surface;
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::entities::Rect;
use crate::sprites::Sprite;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SPRITE: Color = Color::White;
const C_PLACEHOLDER: Color = Color::DarkGrey;
const C_GROUND: Color = Color::DarkYellow;
const C_TEXT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const GROUND_GLYPH: &str = "▁";
const HINT: &str = "SPACE : Jump / Restart   Q : Quit";

/// Rows below the play area: ground + hint.
const CHROME_ROWS: u16 = 2;

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self { out, cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(CHROME_ROWS).max(1)
    }

    /// Playfield x → terminal column (may be off-screen).
    fn col(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64 / BOARD_WIDTH as i64) as i32
    }

    /// Playfield y → terminal row (may be off-screen).
    fn row(&self, y: i32) -> i32 {
        (y as i64 * self.play_rows() as i64 / BOARD_HEIGHT as i64) as i32
    }

    fn on_screen(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.play_rows() as i32
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn begin_frame(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        let ground_row = self.play_rows();
        if ground_row < self.rows {
            self.out.queue(cursor::MoveTo(0, ground_row))?;
            self.out.queue(style::SetForegroundColor(C_GROUND))?;
            self.out.queue(Print(GROUND_GLYPH.repeat(self.cols as usize)))?;
        }

        let hint_row = ground_row + 1;
        if hint_row < self.rows {
            self.out.queue(cursor::MoveTo(1, hint_row))?;
            self.out.queue(style::SetForegroundColor(C_HINT))?;
            self.out.queue(Print(HINT))?;
        }
        Ok(())
    }

    fn draw_sprite(&mut self, rect: &Rect, sprite: &Sprite) -> std::io::Result<()> {
        // Every entity covers at least one cell, however small the terminal.
        let c0 = self.col(rect.x);
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r0 = self.row(rect.y);
        let r1 = self.row(rect.bottom()).max(r0 + 1);

        let glyph_rows: Vec<Vec<char>> = sprite.rows.iter().map(|r| r.chars().collect()).collect();
        let glyph_cols = sprite.columns();
        if glyph_rows.is_empty() || glyph_cols == 0 {
            return Ok(());
        }

        let color = if sprite.placeholder { C_PLACEHOLDER } else { C_SPRITE };
        self.out.queue(style::SetForegroundColor(color))?;

        // Nearest-neighbour sample the art into the target cells.
        let cell_h = (r1 - r0) as usize;
        let cell_w = (c1 - c0) as usize;
        for row in r0..r1 {
            let glyph_row = &glyph_rows[(row - r0) as usize * glyph_rows.len() / cell_h];
            for col in c0..c1 {
                if !self.on_screen(col, row) {
                    continue;
                }
                let glyph_col = (col - c0) as usize * glyph_cols / cell_w;
                match glyph_row.get(glyph_col) {
                    Some(&ch) if ch != ' ' => {
                        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                        self.out.queue(Print(ch))?;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> std::io::Result<()> {
        let col = self.col(x).clamp(0, self.cols.saturating_sub(1) as i32);
        // Baseline sits on the row above the scaled y.
        let row = (self.row(y) - 1).clamp(0, self.play_rows() as i32 - 1);
        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
