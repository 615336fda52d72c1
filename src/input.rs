//! Key mapping. The game itself only knows one action key; quitting is a
//! front-end concern handled here so the terminal can be restored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Space: jump while running, restart after game over.
    JumpOrRestart,
    Quit,
    Ignore,
}

pub fn map_key(key: &KeyEvent) -> Command {
    // Held keys must not auto-jump; release events carry no action.
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }
    match key.code {
        KeyCode::Char(' ') => Command::JumpOrRestart,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => Command::Ignore,
    }
}
