//! Key handling for the tree view.
//!
//! Converts crossterm key events into [`InputAction`]s. The only
//! multi-key sequence is `gg` (jump to top), tracked in [`InputState`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do in response to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
    /// Expand the selected directory.
    Expand,
    /// Collapse the selected directory or move to its parent.
    Collapse,
    /// Toggle a directory or open a file.
    Activate,
    Refresh,
    Quit,
}

/// Pending key sequence state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Maps a key event to an action and the next input state.
pub fn handle_key(key: KeyEvent, state: &InputState) -> (InputAction, InputState) {
    if state.pending_g {
        let new_state = InputState { pending_g: false };
        return match key.code {
            KeyCode::Char('g') => (InputAction::CursorTop, new_state),
            _ => (InputAction::None, new_state),
        };
    }

    let new_state = InputState { pending_g: false };

    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Down | KeyCode::Char('j') => InputAction::CursorDown,
        KeyCode::Up | KeyCode::Char('k') => InputAction::CursorUp,
        KeyCode::Right | KeyCode::Char('l') => InputAction::Expand,
        KeyCode::Left | KeyCode::Char('h') => InputAction::Collapse,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Home => InputAction::CursorTop,
        KeyCode::End | KeyCode::Char('G') => InputAction::CursorBottom,
        KeyCode::Char('g') => {
            return (InputAction::None, InputState { pending_g: true });
        }
        KeyCode::Char('r') => InputAction::Refresh,
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        _ => InputAction::None,
    };

    (action, new_state)
}
