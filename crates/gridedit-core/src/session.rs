//! The grid component: one grid, one selection, at most one edit.
//!
//! [`Session`] is what a front end talks to. It owns the [`GridModel`], the
//! [`SelectionState`] and the [`EditingState`], runs every transition to
//! completion, and asks its [`FocusManager`] to focus the cell whenever edit
//! mode starts.

use crate::clipboard;
use crate::editing::EditingState;
use crate::grid::{COLUMN_COUNT, CellRef, Column, GridModel, SortOrder};
use crate::router::{self, KeyCommand, KeyInput, Routed};
use crate::selection::{Bounds, Direction, MoveModifiers, SelectionRange, SelectionState};

/// Focus capability supplied by the presentation layer.
///
/// Requests are fire-and-forget; the session never waits for them.
pub trait FocusManager {
    fn request_focus(&mut self, cell: CellRef);
}

/// Focus manager that drops every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFocus;

impl FocusManager for NoFocus {
    fn request_focus(&mut self, _cell: CellRef) {}
}

/// Records focus requests in order.
#[derive(Clone, Debug, Default)]
pub struct FocusLog {
    pub requests: Vec<CellRef>,
}

impl FocusManager for FocusLog {
    fn request_focus(&mut self, cell: CellRef) {
        self.requests.push(cell);
    }
}

pub struct Session<F: FocusManager> {
    grid: GridModel,
    selection: SelectionState,
    editing: EditingState,
    sort: Option<(Column, SortOrder)>,
    focus: F,
}

impl<F: FocusManager> Session<F> {
    pub fn new(grid: GridModel, focus: F) -> Self {
        Self {
            grid,
            selection: SelectionState::new(),
            editing: EditingState::new(),
            sort: None,
            focus,
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Swap in a new grid, clamping selection and edit state to its bounds.
    pub fn replace_grid(&mut self, grid: GridModel) {
        self.grid = grid;
        let bounds = self.bounds();
        if let Some(cell) = self.editing.cell()
            && !self.grid.contains(cell)
        {
            self.editing.end();
        }
        let state = self.selection;
        let fits = [
            state.selected,
            state.last,
            state.range.start,
            state.range.end,
        ]
        .iter()
        .all(|&cell| self.grid.contains(cell));
        if !fits {
            self.selection = SelectionState::at(bounds.clamp(state.selected));
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.grid.row_count(), COLUMN_COUNT)
    }

    pub fn focus(&self) -> &F {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut F {
        &mut self.focus
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection
    }

    pub fn current_selection(&self) -> SelectionRange {
        self.selection.range
    }

    pub fn selected_cell(&self) -> CellRef {
        self.selection.selected
    }

    pub fn current_editing_cell(&self) -> Option<CellRef> {
        self.editing.cell()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_editing()
    }

    /// Column and direction of the last sort, if any.
    pub fn sort_state(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    /// Pointer selection. Any click closes the active edit.
    pub fn click_cell(&mut self, target: CellRef, shift: bool) {
        self.close_edit();
        self.selection = self.selection.click(target, shift, self.bounds());
    }

    /// Arrow movement.
    ///
    /// Shift movement always closes an active edit first. Plain movement
    /// closes it only if the selected cell actually changes.
    pub fn move_arrow(&mut self, direction: Direction, modifiers: MoveModifiers) {
        if modifiers.shift {
            self.close_edit();
        }
        let before = self.selection.selected;
        self.selection = self
            .selection
            .move_arrow(direction, modifiers, self.bounds());
        if !modifiers.shift && self.selection.selected != before {
            self.close_edit();
        }
    }

    /// Route a key press. Returns whether the grid claimed it.
    pub fn handle_key(&mut self, input: KeyInput) -> Routed {
        let Some(command) = router::classify(input, self.is_editing()) else {
            return Routed::Ignored;
        };
        match command {
            KeyCommand::BeginEdit => self.begin_edit(self.selection.selected),
            KeyCommand::CommitAndAdvance => self.commit_and_advance(),
            KeyCommand::Move {
                direction,
                modifiers,
                close_edit,
            } => {
                if close_edit {
                    self.close_edit();
                }
                self.move_arrow(direction, modifiers);
            }
        }
        Routed::Handled
    }

    /// Enter edit mode on `cell`, collapsing the selection onto it.
    pub fn begin_edit(&mut self, cell: CellRef) {
        if !self.grid.contains(cell) {
            return;
        }
        self.selection = SelectionState::at(cell);
        self.editing.begin(cell);
        tracing::debug!(%cell, "begin edit");
        self.focus.request_focus(cell);
    }

    /// Leave edit mode and move the selection one row down.
    pub fn commit_and_advance(&mut self) {
        let Some(cell) = self.editing.end() else {
            return;
        };
        self.selection = SelectionState::at(cell).advance_row(self.bounds());
        tracing::debug!(%cell, next = %self.selection.selected, "commit edit");
    }

    /// Leave edit mode without moving.
    pub fn cancel_edit(&mut self) {
        self.close_edit();
    }

    /// The presentation layer changed a cell's text.
    ///
    /// Returns whether the grid changed.
    pub fn on_cell_value_change(&mut self, cell: CellRef, raw: &str) -> bool {
        let next = self.grid.with_cell_text(cell, raw);
        let changed = next != self.grid;
        if changed {
            self.grid = next;
        }
        changed
    }

    /// Direct activation of a cell's input control.
    pub fn on_cell_activate(&mut self, cell: CellRef) {
        self.click_cell(cell, false);
        self.begin_edit(self.selection.selected);
    }

    /// The cell's input control lost focus.
    pub fn on_cell_blur(&mut self, cell: CellRef) {
        if self.editing.is_editing_cell(cell) {
            self.close_edit();
        }
    }

    /// TSV text of the current selection, or `None` while editing.
    pub fn copy(&self) -> Option<String> {
        if !router::claims_clipboard(self.is_editing()) {
            return None;
        }
        Some(clipboard::serialize(self.selection.range, &self.grid))
    }

    /// Paste TSV text at the top-left cell of the current selection.
    pub fn paste(&mut self, text: &str) -> Routed {
        if !router::claims_clipboard(self.is_editing()) {
            return Routed::Ignored;
        }
        let parsed = clipboard::parse(text);
        let anchor = self.selection.range.normalized().start;
        tracing::debug!(
            rows = parsed.len(),
            cols = parsed.iter().map(Vec::len).max().unwrap_or(0),
            %anchor,
            "paste"
        );
        self.grid = clipboard::apply_paste(&parsed, anchor, &self.grid);
        Routed::Handled
    }

    /// Sort rows on `column`. Sorting the same column again reverses the order.
    ///
    /// Positions change under a sort, so the selection resets to the first
    /// cell and any edit is closed.
    pub fn sort_by(&mut self, column: Column) -> SortOrder {
        let order = match self.sort {
            Some((prev, order)) if prev == column => order.reversed(),
            _ => SortOrder::Ascending,
        };
        self.close_edit();
        self.grid = self.grid.sorted_by(column, order);
        self.selection = SelectionState::new();
        self.sort = Some((column, order));
        tracing::debug!(?column, ?order, "sorted rows");
        order
    }

    fn close_edit(&mut self) {
        if let Some(cell) = self.editing.end() {
            tracing::debug!(%cell, "end edit");
        }
    }
}
