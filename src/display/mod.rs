//! Rendering layer.
//!
//! `render` reads the game state and paints it through a `Surface`; it never
//! mutates anything. `TerminalSurface` is the crossterm implementation used
//! by the binary.

mod terminal;

use std::io;

use crate::config::{TEXT_X, TEXT_Y};
use crate::entities::{GameState, GameStatus, Rect};
use crate::sprites::{Sprite, SpriteSheet};

pub use terminal::TerminalSurface;

/// Drawing primitives the game needs from a backend. Coordinates are
/// playfield pixels; the backend does any scaling.
pub trait Surface {
    /// Called before anything is drawn for a frame.
    fn begin_frame(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Stretch `sprite` over `rect`.
    fn draw_sprite(&mut self, rect: &Rect, sprite: &Sprite) -> io::Result<()>;

    /// `y` is the text baseline.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> io::Result<()>;

    /// Called once everything for the frame has been drawn.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Score while running, `Game Over: {score}` afterwards.
pub fn status_text(state: &GameState) -> String {
    match state.status {
        GameStatus::Running => state.score.to_string(),
        GameStatus::GameOver => format!("Game Over: {}", state.score),
    }
}

/// Render one complete frame: player, obstacles, then the text overlay.
pub fn render<S: Surface>(
    surface: &mut S,
    state: &GameState,
    sprites: &SpriteSheet,
) -> io::Result<()> {
    surface.begin_frame()?;

    surface.draw_sprite(&state.player.rect, sprites.get(state.player.sprite))?;
    for obstacle in &state.obstacles {
        surface.draw_sprite(&obstacle.rect, sprites.get(obstacle.sprite))?;
    }

    surface.draw_text(TEXT_X, TEXT_Y, &status_text(state))?;
    surface.present()
}
