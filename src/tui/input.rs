use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use gridedit_core::{Key, KeyInput, Modifiers};
use ratatui::prelude::*;
use std::io;

use super::actions::{ApplyResult, apply_action, handle_edit_text};
use super::app::App;
use super::keymap::Action;
use super::ui;

/// Translate a crossterm key event into the grid's key vocabulary.
pub(crate) fn to_key_input(key: KeyEvent) -> KeyInput {
    let code = match key.code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    };
    let modifiers = Modifiers {
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        meta: key
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    KeyInput::new(code, modifiers)
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    if app.keymap.translate(key, false) == Some(Action::Help) {
        app.close_help_modal();
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_help_modal(),
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.close_help_modal();
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_help_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_help_by(-1),
        KeyCode::PageDown => app.scroll_help_by(12),
        KeyCode::PageUp => app.scroll_help_by(-12),
        KeyCode::Home => app.help_scroll = 0,
        _ => {}
    }
}

/// Dispatch one key press.
///
/// The help overlay takes everything while open. Otherwise app commands
/// from the keymap come first, then the grid router, and finally whatever
/// is left is typed into the cell being edited.
pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> ApplyResult {
    if app.help_modal {
        handle_help_key(app, key);
        return ApplyResult::Continue;
    }

    let editing = app.session.is_editing();
    if let Some(action) = app.keymap.translate(key, editing) {
        app.status_message.clear();
        let result = apply_action(app, action);
        app.sync_focus();
        return result;
    }

    if app.session.handle_key(to_key_input(key)).is_handled() {
        app.status_message.clear();
    } else if app.session.is_editing() {
        handle_edit_text(app, key);
    }
    app.sync_focus();
    ApplyResult::Continue
}

pub(crate) fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.help_modal {
        return;
    }

    let [_value_area, grid_area, _status_area] = ui::split_main_chunks(terminal_area);
    let Some(target) = ui::grid_cell_at(app, grid_area, mouse.column, mouse.row) else {
        return;
    };

    // The cell being edited owns its own clicks.
    if app.session.current_editing_cell() == Some(target) {
        return;
    }
    if let Some(editing) = app.session.current_editing_cell() {
        app.session.on_cell_blur(editing);
    }

    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    let state = app.session.selection_state();
    if !shift && state.is_single_cell() && state.selected == target {
        app.session.on_cell_activate(target);
    } else {
        app.session.click_cell(target, shift);
    }
    app.status_message.clear();
    app.sync_focus();
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(app, key) == ApplyResult::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let terminal_area = Rect::new(0, 0, size.width, size.height);
                handle_mouse_event(app, terminal_area, mouse);
            }
            Event::Paste(text) => {
                if !app.help_modal {
                    app.paste_text(&text);
                    app.sync_focus();
                }
            }
            _ => {}
        }
    }
}
