//! Cell and range selection.
//!
//! Selection is a plain value, [`SelectionState`], advanced by pure
//! transition functions. Nothing here knows about editing or rendering; the
//! session decides when a transition also has to close an edit.
//!
//! Shift-extension tracks two things besides the rectangle: the `selected`
//! cell, which stays put for the whole sequence, and the `last` cell, which
//! follows every shift move. Whether a shift move grows or shrinks the
//! rectangle on an axis depends on where `last` sits on that axis relative to
//! the rectangle's boundaries:
//!
//! - `last` on the boundary the move leaves from: the rectangle shrinks from
//!   that side toward the new position.
//! - otherwise the rectangle grows to include the new position.
//!
//! Shift-click is the exception to normalization: it moves `end` to the
//! clicked cell as-is, so `start` may end up below or right of `end` until the
//! next arrow transition.

use crate::grid::CellRef;

/// Arrow direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Row,
    Col,
}

impl Direction {
    fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Row,
            Direction::Left | Direction::Right => Axis::Col,
        }
    }

    /// True when the direction moves toward higher indices.
    fn forward(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }
}

/// Modifier state relevant to arrow movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveModifiers {
    pub shift: bool,
    /// Ctrl or Meta held: move to the axis extreme.
    pub jump: bool,
}

impl MoveModifiers {
    pub const NONE: MoveModifiers = MoveModifiers {
        shift: false,
        jump: false,
    };
    pub const SHIFT: MoveModifiers = MoveModifiers {
        shift: true,
        jump: false,
    };
    pub const JUMP: MoveModifiers = MoveModifiers {
        shift: false,
        jump: true,
    };
    pub const SHIFT_JUMP: MoveModifiers = MoveModifiers {
        shift: true,
        jump: true,
    };
}

/// Grid extent used to clamp coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub rows: usize,
    pub cols: usize,
}

impl Bounds {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    fn last(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows.saturating_sub(1),
            Axis::Col => self.cols.saturating_sub(1),
        }
    }

    pub fn clamp(&self, cell: CellRef) -> CellRef {
        CellRef::new(
            cell.row.min(self.last(Axis::Row)),
            cell.col.min(self.last(Axis::Col)),
        )
    }

    /// One step from `from` along `dir`, or the extreme when `jump` is set.
    fn step(&self, from: usize, dir: Direction, jump: bool) -> usize {
        let last = self.last(dir.axis());
        match (dir.forward(), jump) {
            (true, true) => last,
            (false, true) => 0,
            (true, false) => from.saturating_add(1).min(last),
            (false, false) => from.saturating_sub(1).min(last),
        }
    }
}

fn get(cell: CellRef, axis: Axis) -> usize {
    match axis {
        Axis::Row => cell.row,
        Axis::Col => cell.col,
    }
}

fn with(cell: CellRef, axis: Axis, value: usize) -> CellRef {
    match axis {
        Axis::Row => CellRef::new(value, cell.col),
        Axis::Col => CellRef::new(cell.row, value),
    }
}

/// Inclusive rectangle of selected cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl SelectionRange {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    pub fn single(cell: CellRef) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// The same rectangle with `start` at the top-left corner.
    pub fn normalized(&self) -> Self {
        Self {
            start: CellRef::new(
                self.start.row.min(self.end.row),
                self.start.col.min(self.end.col),
            ),
            end: CellRef::new(
                self.start.row.max(self.end.row),
                self.start.col.max(self.end.col),
            ),
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.start.row <= self.end.row && self.start.col <= self.end.col
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        let n = self.normalized();
        (n.start.row..=n.end.row).contains(&cell.row)
            && (n.start.col..=n.end.col).contains(&cell.col)
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        self.start.row.abs_diff(self.end.row) + 1
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.start.col.abs_diff(self.end.col) + 1
    }

    fn span(&self, axis: Axis) -> (usize, usize) {
        let n = self.normalized();
        (get(n.start, axis), get(n.end, axis))
    }

    fn with_span(&self, axis: Axis, lo: usize, hi: usize) -> Self {
        let n = self.normalized();
        Self {
            start: with(n.start, axis, lo),
            end: with(n.end, axis, hi),
        }
    }
}

/// Selected cell, last-moved cell and the selection rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Plain-click target and the cell Enter edits.
    pub selected: CellRef,
    /// Most recent cell visited by shift-extension.
    pub last: CellRef,
    pub range: SelectionRange,
}

impl SelectionState {
    /// Single-cell selection at (0, 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-cell selection at `cell`.
    pub fn at(cell: CellRef) -> Self {
        Self {
            selected: cell,
            last: cell,
            range: SelectionRange::single(cell),
        }
    }

    pub fn is_single_cell(&self) -> bool {
        self.range.is_single_cell()
    }

    /// Pointer selection.
    ///
    /// A plain click collapses to `target`. A shift click keeps the range
    /// start and moves its end to `target` without reordering the corners.
    #[must_use]
    pub fn click(self, target: CellRef, shift: bool, bounds: Bounds) -> Self {
        let target = bounds.clamp(target);
        if !shift {
            return Self::at(target);
        }
        Self {
            selected: self.selected,
            last: target,
            range: SelectionRange::new(self.range.start, target),
        }
    }

    /// Arrow-key transition.
    #[must_use]
    pub fn move_arrow(self, dir: Direction, mods: MoveModifiers, bounds: Bounds) -> Self {
        match (mods.shift, mods.jump) {
            (false, jump) => self.move_selected(dir, jump, bounds),
            (true, false) => self.extend(dir, bounds),
            (true, true) => self.extend_to_extreme(dir, bounds),
        }
    }

    /// Collapse to the cell one row below `selected`, clamped to the last row.
    #[must_use]
    pub fn advance_row(self, bounds: Bounds) -> Self {
        Self::at(bounds.clamp(CellRef::new(
            self.selected.row.saturating_add(1),
            self.selected.col,
        )))
    }

    /// Collapse the rectangle onto `selected`.
    #[must_use]
    pub fn collapse(self) -> Self {
        Self::at(self.selected)
    }

    fn move_selected(self, dir: Direction, jump: bool, bounds: Bounds) -> Self {
        let axis = dir.axis();
        let from = bounds.clamp(self.selected);
        let to = bounds.step(get(from, axis), dir, jump);
        Self::at(with(from, axis, to))
    }

    fn extend(self, dir: Direction, bounds: Bounds) -> Self {
        let axis = dir.axis();
        let (mut lo, mut hi) = self.range.span(axis);
        let last = get(self.last, axis);
        let candidate = bounds.step(last, dir, false);

        if dir.forward() && last <= lo && lo < hi {
            lo = candidate.min(hi);
        } else if !dir.forward() && last >= hi && lo < hi {
            hi = candidate.max(lo);
        } else {
            lo = lo.min(candidate);
            hi = hi.max(candidate);
        }

        Self {
            selected: self.selected,
            last: with(self.last, axis, candidate),
            range: self.range.with_span(axis, lo, hi),
        }
    }

    fn extend_to_extreme(self, dir: Direction, bounds: Bounds) -> Self {
        let axis = dir.axis();
        let (lo, hi) = self.range.span(axis);
        let extreme = bounds.step(get(self.last, axis), dir, true);
        let (lo, hi) = if dir.forward() {
            (lo, extreme)
        } else {
            (extreme, hi)
        };

        Self {
            selected: self.selected,
            last: with(self.last, axis, extreme),
            range: self.range.with_span(axis, lo, hi),
        }
    }
}
