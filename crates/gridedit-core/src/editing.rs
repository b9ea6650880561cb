//! Single-cell edit mode.

use crate::grid::CellRef;

/// The cell currently shown with an input control, if any.
///
/// Only one edit can be active at a time, so starting or ending an edit
/// simply overwrites the slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditingState {
    editing: Option<CellRef>,
}

impl EditingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self) -> Option<CellRef> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_editing_cell(&self, cell: CellRef) -> bool {
        self.editing == Some(cell)
    }

    /// Enter edit mode on `cell`. The caller issues the focus request.
    pub fn begin(&mut self, cell: CellRef) {
        self.editing = Some(cell);
    }

    /// Leave edit mode. Returns the cell that was being edited.
    pub fn end(&mut self) -> Option<CellRef> {
        self.editing.take()
    }
}
