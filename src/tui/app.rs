//! Application state and logic.
//!
//! [`App`] wraps a [`Session`] from `gridedit-core` with everything the
//! terminal needs on top: the in-cell edit buffer, the clipboard, the
//! viewport and the help overlay.

use gridedit_core::{CellRef, Column, FocusManager, GridModel, Routed, Session, SortOrder};

use super::clipboard::{ClipboardProvider, MemoryClipboard, SystemClipboard};
use super::keymap::Keymap;

/// Focus requests from the session, picked up after each event.
///
/// In a terminal, "focusing" a cell means loading its text into the edit
/// buffer, which the app does in [`App::sync_focus`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalFocus {
    pending: Option<CellRef>,
}

impl TerminalFocus {
    pub fn take(&mut self) -> Option<CellRef> {
        self.pending.take()
    }
}

impl FocusManager for TerminalFocus {
    fn request_focus(&mut self, cell: CellRef) {
        self.pending = Some(cell);
    }
}

/// Main application state container.
pub struct App {
    /// Grid, selection and edit state
    pub session: Session<TerminalFocus>,
    /// Active keymap
    pub keymap: Keymap,
    /// Clipboard backend
    pub clipboard: Box<dyn ClipboardProvider>,
    /// Edit buffer for the cell being edited
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    /// Status message to display
    pub status_message: String,
    /// Help modal state
    pub help_modal: bool,
    /// Help modal scroll offset (lines)
    pub help_scroll: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible rows
    pub visible_rows: usize,
}

impl App {
    pub fn new(grid: GridModel, keymap: Keymap) -> Self {
        let clipboard: Box<dyn ClipboardProvider> = if SystemClipboard::available() {
            Box::new(SystemClipboard)
        } else {
            tracing::warn!("no system clipboard, copy and paste stay inside gridedit");
            Box::new(MemoryClipboard::default())
        };
        Self::with_clipboard(grid, keymap, clipboard)
    }

    pub fn with_clipboard(
        grid: GridModel,
        keymap: Keymap,
        clipboard: Box<dyn ClipboardProvider>,
    ) -> Self {
        App {
            session: Session::new(grid, TerminalFocus::default()),
            keymap,
            clipboard,
            edit_buffer: String::new(),
            edit_cursor: 0,
            status_message: String::new(),
            help_modal: false,
            help_scroll: 0,
            viewport_row: 0,
            visible_rows: 20,
        }
    }

    pub fn grid(&self) -> &GridModel {
        self.session.grid()
    }

    /// Bring the edit buffer in line with the session after a transition.
    pub fn sync_focus(&mut self) {
        if let Some(cell) = self.session.focus_mut().take() {
            self.edit_buffer = self.grid().cell_text(cell).unwrap_or_default();
            self.edit_cursor = self.edit_buffer.len();
        }
        if !self.session.is_editing() {
            self.edit_buffer.clear();
            self.edit_cursor = 0;
        }
        self.update_viewport();
    }

    /// Push the edit buffer into the cell being edited.
    pub fn edit_text_changed(&mut self) {
        if let Some(cell) = self.session.current_editing_cell() {
            self.session.on_cell_value_change(cell, &self.edit_buffer);
        }
    }

    /// Copy the selection as TSV. While editing, copy the edit buffer instead.
    pub fn copy_selection(&mut self) {
        let (text, what) = match self.session.copy() {
            Some(text) => {
                let range = self.session.current_selection();
                let count = range.height() * range.width();
                (text, format_cell_count(count))
            }
            None => (self.edit_buffer.clone(), "cell text".to_string()),
        };
        if self.clipboard.set_text(text) {
            self.status_message = format!("Copied {}", what);
        } else {
            self.status_message = "Error: clipboard unavailable".to_string();
        }
    }

    pub fn paste_from_clipboard(&mut self) {
        match self.clipboard.get_text() {
            Some(text) => self.paste_text(&text),
            None => self.status_message = "Error: clipboard is empty or unavailable".to_string(),
        }
    }

    /// Paste text at the selection. While editing, the first line is typed
    /// into the edit buffer instead, with tabs turned into spaces so the cell
    /// never holds a TSV field separator.
    pub fn paste_text(&mut self, text: &str) {
        if self.session.paste(text) == Routed::Handled {
            let anchor = self.session.current_selection().normalized().start;
            self.status_message = format!("Pasted at {}", anchor);
            return;
        }
        let line = text
            .lines()
            .next()
            .unwrap_or_default()
            .replace('\t', " ");
        self.edit_buffer.insert_str(self.edit_cursor, &line);
        self.edit_cursor += line.len();
        self.edit_text_changed();
    }

    pub fn sort(&mut self, column: Column) {
        let order = self.session.sort_by(column);
        let arrow = match order {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        self.status_message = format!("Sorted by {} ({})", column.header(), arrow);
        self.viewport_row = 0;
    }

    /// Keep the most recently moved-to cell on screen.
    pub fn update_viewport(&mut self) {
        let row = self.session.selection_state().last.row;
        if row < self.viewport_row {
            self.viewport_row = row;
        } else if row >= self.viewport_row + self.visible_rows {
            self.viewport_row = row + 1 - self.visible_rows.max(1);
        }
    }

    /// Label for the value bar, e.g. `B2` or `A1:C3`.
    pub fn selection_label(&self) -> String {
        let range = self.session.current_selection().normalized();
        if range.is_single_cell() {
            range.start.to_string()
        } else {
            format!("{}:{}", range.start, range.end)
        }
    }

    pub fn open_help_modal(&mut self) {
        self.help_modal = true;
        self.help_scroll = 0;
    }

    pub fn close_help_modal(&mut self) {
        self.help_modal = false;
    }

    pub fn scroll_help_by(&mut self, delta: isize) {
        self.help_scroll = self.help_scroll.saturating_add_signed(delta);
    }
}

fn format_cell_count(count: usize) -> String {
    if count == 1 {
        "1 cell".to_string()
    } else {
        format!("{count} cells")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridedit_core::{Key, KeyInput, Modifiers};

    fn test_app() -> App {
        App::with_clipboard(
            GridModel::with_default_rows(),
            Keymap::default(),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn press(app: &mut App, key: Key, modifiers: Modifiers) {
        app.session.handle_key(KeyInput::new(key, modifiers));
        app.sync_focus();
    }

    #[test]
    fn enter_loads_cell_text_into_edit_buffer() {
        let mut app = test_app();
        press(&mut app, Key::ArrowRight, Modifiers::NONE);
        press(&mut app, Key::Enter, Modifiers::NONE);

        assert_eq!(app.session.current_editing_cell(), Some(CellRef::new(0, 1)));
        assert_eq!(app.edit_buffer, "行1");
        assert_eq!(app.edit_cursor, "行1".len());
    }

    #[test]
    fn commit_clears_edit_buffer() {
        let mut app = test_app();
        press(&mut app, Key::Enter, Modifiers::NONE);
        app.edit_buffer.push_str("2024-01-01");
        app.edit_text_changed();
        press(&mut app, Key::Enter, Modifiers::NONE);

        assert!(app.edit_buffer.is_empty());
        assert_eq!(
            app.grid().cell_text(CellRef::new(0, 0)).as_deref(),
            Some("2024-01-01")
        );
        assert_eq!(app.session.selected_cell(), CellRef::new(1, 0));
    }

    #[test]
    fn copy_then_paste_through_clipboard() {
        let mut app = test_app();
        press(&mut app, Key::ArrowRight, Modifiers::shift());
        press(&mut app, Key::ArrowRight, Modifiers::shift());
        app.copy_selection();
        assert_eq!(app.status_message, "Copied 3 cells");

        press(&mut app, Key::ArrowDown, Modifiers::NONE);
        app.paste_from_clipboard();

        assert_eq!(app.grid().rows()[1].title, "行1");
        assert_eq!(app.grid().rows()[1].count, 20);
    }

    #[test]
    fn paste_while_editing_types_into_buffer() {
        let mut app = test_app();
        press(&mut app, Key::ArrowRight, Modifiers::NONE);
        press(&mut app, Key::Enter, Modifiers::NONE);
        app.paste_text("x\ty\nz");

        assert_eq!(app.edit_buffer, "行1x y");
        assert_eq!(app.edit_cursor, "行1x y".len());
        assert_eq!(app.grid().rows()[0].title, "行1x y");
        assert_eq!(app.grid().rows()[1].title, "行2");
    }

    #[test]
    fn cell_edited_by_paste_copies_back_intact() {
        let mut app = test_app();
        press(&mut app, Key::ArrowRight, Modifiers::NONE);
        press(&mut app, Key::Enter, Modifiers::NONE);
        app.paste_text("a\tb\tc");
        press(&mut app, Key::Enter, Modifiers::NONE);

        press(&mut app, Key::ArrowUp, Modifiers::NONE);
        press(&mut app, Key::ArrowRight, Modifiers::shift());
        app.copy_selection();
        assert_eq!(app.clipboard.get_text().as_deref(), Some("行1a b c\t20"));

        press(&mut app, Key::ArrowDown, Modifiers::NONE);
        press(&mut app, Key::ArrowDown, Modifiers::NONE);
        app.paste_from_clipboard();

        let rows = app.grid().rows();
        assert_eq!(rows[2].title, "行1a b c");
        assert_eq!(rows[2].count, 20);
        assert_eq!(rows[2].date, "");
    }

    #[test]
    fn viewport_follows_last_moved_cell() {
        let mut app = App::with_clipboard(
            GridModel::blank(50),
            Keymap::default(),
            Box::new(MemoryClipboard::default()),
        );
        app.visible_rows = 10;
        for _ in 0..12 {
            press(&mut app, Key::ArrowDown, Modifiers::shift());
        }
        assert_eq!(app.viewport_row, 3);

        press(&mut app, Key::ArrowUp, Modifiers::meta());
        assert_eq!(app.viewport_row, 0);
    }

    #[test]
    fn sort_resets_viewport_and_reports_order() {
        let mut app = test_app();
        app.viewport_row = 2;
        app.sort(Column::Count);
        app.sort(Column::Count);

        assert_eq!(app.viewport_row, 0);
        assert_eq!(app.status_message, "Sorted by Count (descending)");
        assert_eq!(app.grid().rows()[0].count, 60);
    }

    #[test]
    fn selection_label_uses_normalized_range() {
        let mut app = test_app();
        press(&mut app, Key::ArrowDown, Modifiers::NONE);
        press(&mut app, Key::ArrowRight, Modifiers::NONE);
        press(&mut app, Key::ArrowUp, Modifiers::shift());
        press(&mut app, Key::ArrowLeft, Modifiers::shift());

        assert_eq!(app.selection_label(), "A1:B2");
    }
}
