//! Key translation
//!
//! crossterm key events become [`KeyAction`]s. Most keys edit the caption
//! and then carry a Tk-style key name (`space`, `comma`, `Return`, `Tab`,
//! ...) that the [`Keymap`](crate::core::dispatcher::Keymap) resolves into
//! a completion event, the same way the bindings in `user_config` are named.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Text edit applied to the view before the key is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Save,
    NextPair,
    PrevPair,
    /// Pick suggestion by list index
    Choose(usize),
    /// Optional edit, then the named key goes through the keymap
    Key { edit: Option<Edit>, name: String },
}

/// Translate a key event; `None` for releases and keys with no meaning here
pub fn translate(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let (edit, name) = match key.code {
        KeyCode::Char(c) if ctrl => {
            return match c.to_ascii_lowercase() {
                'q' => Some(KeyAction::Quit),
                's' => Some(KeyAction::Save),
                'n' => Some(KeyAction::NextPair),
                'p' => Some(KeyAction::PrevPair),
                _ => None,
            };
        }
        KeyCode::Char(c) if alt => {
            // Alt-1 .. Alt-9 pick the first nine, Alt-0 the tenth
            return c
                .to_digit(10)
                .map(|d| if d == 0 { 9 } else { d as usize - 1 })
                .map(KeyAction::Choose);
        }
        KeyCode::Char(' ') => (Some(Edit::Insert(' ')), "space".to_string()),
        KeyCode::Char(',') => (Some(Edit::Insert(',')), "comma".to_string()),
        KeyCode::Char(c) => (Some(Edit::Insert(c)), c.to_string()),
        KeyCode::Enter => (Some(Edit::Insert('\n')), "Return".to_string()),
        KeyCode::Tab => (None, "Tab".to_string()),
        KeyCode::Backspace => (Some(Edit::Backspace), "BackSpace".to_string()),
        KeyCode::Left => (Some(Edit::Left), "Left".to_string()),
        KeyCode::Right => (Some(Edit::Right), "Right".to_string()),
        KeyCode::Up => (Some(Edit::Up), "Up".to_string()),
        KeyCode::Down => (Some(Edit::Down), "Down".to_string()),
        KeyCode::Home => (Some(Edit::Home), "Home".to_string()),
        KeyCode::End => (Some(Edit::End), "End".to_string()),
        KeyCode::Esc => return Some(KeyAction::Quit),
        _ => return None,
    };
    Some(KeyAction::Key { edit, name })
}
