use crossterm::event::{self, KeyCode, KeyModifiers};

use super::app::App;
use super::keymap::Action;

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
///
/// Returns whether the buffer text changed.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
            false
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
            false
        }
        KeyCode::Home => {
            *cursor = 0;
            false
        }
        KeyCode::End => {
            *cursor = buffer.len();
            false
        }
        KeyCode::Backspace | KeyCode::Char('h')
            if key.code == KeyCode::Backspace || key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            if *cursor == 0 {
                return false;
            }
            let mut del_start = *cursor - 1;
            while del_start > 0 && !buffer.is_char_boundary(del_start) {
                del_start -= 1;
            }
            buffer.drain(del_start..*cursor);
            *cursor = del_start;
            true
        }
        KeyCode::Delete => {
            if *cursor >= buffer.len() {
                return false;
            }
            let mut del_end = *cursor + 1;
            while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                del_end += 1;
            }
            buffer.drain(*cursor..del_end);
            true
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Continue,
    Quit,
}

/// Apply an action to the application state.
///
/// Returns `ApplyResult::Quit` if the application should exit.
pub fn apply_action(app: &mut App, action: Action) -> ApplyResult {
    match action {
        Action::Copy => app.copy_selection(),
        Action::Paste => app.paste_from_clipboard(),
        Action::Sort(column) => app.sort(column),
        Action::Help => app.open_help_modal(),
        Action::Quit => return ApplyResult::Quit,
    }
    ApplyResult::Continue
}

/// Feed a key to the in-cell editor. Every change is pushed to the grid.
pub fn handle_edit_text(app: &mut App, key: event::KeyEvent) {
    if handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key) {
        app.edit_text_changed();
    }
}
