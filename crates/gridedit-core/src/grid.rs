//! The grid model: an ordered sequence of fixed-shape typed rows.
//!
//! Row order is the coordinate system used by selection and clipboard code.
//! Each row also carries a [`RowId`] that survives reordering, so identity
//! and position are never confused.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Number of columns every row has.
pub const COLUMN_COUNT: usize = 3;

/// The three typed columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// ISO date string. Not validated.
    Date,
    /// Free text.
    Title,
    /// Integer.
    Count,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [Column::Date, Column::Title, Column::Count];

    /// Map a column index to its column. Indices past the last column map to `None`.
    pub fn from_index(index: usize) -> Option<Column> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Column::Date => 0,
            Column::Title => 1,
            Column::Count => 2,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Title => "Title",
            Column::Count => "Count",
        }
    }

    fn letter(self) -> char {
        match self {
            Column::Date => 'A',
            Column::Title => 'B',
            Column::Count => 'C',
        }
    }
}

/// A cell coordinate: positional row index and column index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn column(&self) -> Option<Column> {
        Column::from_index(self.col)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column() {
            Some(column) => write!(f, "{}{}", column.letter(), self.row + 1),
            None => write!(f, "?{}", self.row + 1),
        }
    }
}

/// Stable row identity, independent of the row's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// One record of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub date: String,
    pub title: String,
    pub count: i64,
}

impl Row {
    pub fn new(id: RowId, date: impl Into<String>, title: impl Into<String>, count: i64) -> Self {
        Self {
            id,
            date: date.into(),
            title: title.into(),
            count,
        }
    }

    /// Text form of a cell; the count column renders as decimal.
    pub fn cell_text(&self, column: Column) -> String {
        match column {
            Column::Date => self.date.clone(),
            Column::Title => self.title.clone(),
            Column::Count => self.count.to_string(),
        }
    }

    /// Write raw text into a cell with per-column coercion.
    ///
    /// Date and title take the text verbatim. Count takes the leading integer
    /// of the text (see [`parse_count`]) and keeps its prior value when there
    /// is none, including for empty text.
    /// Returns whether the row changed.
    pub fn set_cell_text(&mut self, column: Column, raw: &str) -> bool {
        match column {
            Column::Date => replace_text(&mut self.date, raw),
            Column::Title => replace_text(&mut self.title, raw),
            Column::Count => match parse_count(raw) {
                Some(n) if n != self.count => {
                    self.count = n;
                    true
                }
                Some(_) => false,
                None => {
                    tracing::debug!(raw, "count text has no leading integer, keeping prior value");
                    false
                }
            },
        }
    }
}

fn replace_text(slot: &mut String, raw: &str) -> bool {
    if slot == raw {
        return false;
    }
    slot.clear();
    slot.push_str(raw);
    true
}

/// Parse integer column text.
///
/// Leading whitespace is skipped, then an optional sign and the longest run
/// of ASCII digits are taken; anything after the digits is ignored, so
/// `"12.5"` and `"12 pcs"` both read as 12. Returns `None` when no digit
/// follows the sign or the value does not fit in an `i64`.
pub fn parse_count(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse::<i64>().ok()
}

/// Sort direction for [`GridModel::sorted_by`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Ordered rows with copy-on-write updates.
///
/// Cloning is cheap: the row sequence is shared until one side writes, so a
/// snapshot taken before an update keeps seeing the old values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridModel {
    rows: Arc<Vec<Row>>,
    next_id: u64,
}

impl GridModel {
    pub fn new(rows: Vec<Row>) -> Self {
        let next_id = rows.iter().map(|r| r.id.0).max().map_or(1, |max| max + 1);
        Self {
            rows: Arc::new(rows),
            next_id,
        }
    }

    /// The three seed rows a fresh session starts with.
    pub fn with_default_rows() -> Self {
        Self::new(vec![
            Row::new(RowId(1), "", "行1", 20),
            Row::new(RowId(2), "", "行2", 40),
            Row::new(RowId(3), "", "行3", 60),
        ])
    }

    /// `count` empty rows with fresh identities.
    pub fn blank(count: usize) -> Self {
        let mut grid = Self::default();
        for _ in 0..count {
            grid.push_row(Row::new(RowId(0), "", "", 0));
        }
        grid
    }

    /// Append a row, assigning it the next free identity.
    pub fn push_row(&mut self, mut row: Row) -> RowId {
        let id = RowId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        row.id = id;
        Arc::make_mut(&mut self.rows).push(row);
        id
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the last row. Zero for an empty grid.
    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row < self.rows.len() && cell.col < COLUMN_COUNT
    }

    pub fn cell_text(&self, cell: CellRef) -> Option<String> {
        let column = cell.column()?;
        self.rows.get(cell.row).map(|row| row.cell_text(column))
    }

    /// Position of the row with the given identity.
    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Set one cell from raw text. Out-of-bounds coordinates are ignored.
    /// Returns whether any value changed.
    pub fn set_cell_text(&mut self, cell: CellRef, raw: &str) -> bool {
        let Some(column) = cell.column() else {
            return false;
        };
        if cell.row >= self.rows.len() {
            return false;
        }
        // Check before make_mut so unchanged writes don't detach shared rows.
        let current = &self.rows[cell.row];
        if column == Column::Count && parse_count(raw).is_none_or(|n| n == current.count) {
            return false;
        }
        if column != Column::Count && current.cell_text(column) == raw {
            return false;
        }
        Arc::make_mut(&mut self.rows)[cell.row].set_cell_text(column, raw)
    }

    /// A copy of this model with one cell replaced.
    pub fn with_cell_text(&self, cell: CellRef, raw: &str) -> GridModel {
        let mut next = self.clone();
        next.set_cell_text(cell, raw);
        next
    }

    /// A copy of this model with rows stably sorted on one column.
    pub fn sorted_by(&self, column: Column, order: SortOrder) -> GridModel {
        let mut rows = self.rows.as_ref().clone();
        rows.sort_by(|a, b| {
            let ord = compare_rows(a, b, column);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        GridModel {
            rows: Arc::new(rows),
            next_id: self.next_id,
        }
    }
}

fn compare_rows(a: &Row, b: &Row, column: Column) -> Ordering {
    match column {
        Column::Date => a.date.cmp(&b.date),
        Column::Title => a.title.cmp(&b.title),
        Column::Count => a.count.cmp(&b.count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rows_have_reference_shape() {
        let grid = GridModel::with_default_rows();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.cell_text(CellRef::new(1, 1)).as_deref(), Some("行2"));
        assert_eq!(grid.cell_text(CellRef::new(2, 2)).as_deref(), Some("60"));
        assert_eq!(grid.cell_text(CellRef::new(3, 0)), None);
        assert_eq!(grid.cell_text(CellRef::new(0, 3)), None);
    }

    #[test]
    fn cell_ref_display_uses_column_letters() {
        assert_eq!(CellRef::new(0, 0).to_string(), "A1");
        assert_eq!(CellRef::new(4, 2).to_string(), "C5");
    }

    #[test]
    fn count_keeps_prior_value_on_bad_text() {
        let mut grid = GridModel::with_default_rows();
        assert!(!grid.set_cell_text(CellRef::new(0, 2), "abc"));
        assert!(!grid.set_cell_text(CellRef::new(0, 2), ""));
        assert_eq!(grid.row(0).unwrap().count, 20);

        assert!(grid.set_cell_text(CellRef::new(0, 2), " 7 "));
        assert_eq!(grid.row(0).unwrap().count, 7);
    }

    #[test]
    fn count_takes_leading_integer() {
        assert_eq!(parse_count("12.5"), Some(12));
        assert_eq!(parse_count(" 7 pcs"), Some(7));
        assert_eq!(parse_count("3abc"), Some(3));
        assert_eq!(parse_count("-3abc"), Some(-3));
        assert_eq!(parse_count("+4"), Some(4));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count(".5"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("99999999999999999999"), None);
    }

    #[test]
    fn date_is_taken_verbatim() {
        let mut grid = GridModel::with_default_rows();
        assert!(grid.set_cell_text(CellRef::new(0, 0), "not a date"));
        assert_eq!(grid.row(0).unwrap().date, "not a date");
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = GridModel::with_default_rows();
        let before = grid.clone();
        assert!(!grid.set_cell_text(CellRef::new(9, 0), "x"));
        assert!(!grid.set_cell_text(CellRef::new(0, 5), "x"));
        assert_eq!(grid, before);
    }

    #[test]
    fn snapshots_survive_updates() {
        let grid = GridModel::with_default_rows();
        let snapshot = grid.clone();
        let next = grid.with_cell_text(CellRef::new(0, 1), "changed");
        assert_eq!(snapshot.row(0).unwrap().title, "行1");
        assert_eq!(next.row(0).unwrap().title, "changed");
    }

    #[test]
    fn sorting_preserves_identity() {
        let grid = GridModel::new(vec![
            Row::new(RowId(1), "2024-03-01", "b", 5),
            Row::new(RowId(2), "2024-01-01", "a", 9),
            Row::new(RowId(3), "2024-02-01", "c", 1),
        ]);

        let by_count = grid.sorted_by(Column::Count, SortOrder::Ascending);
        let ids: Vec<u64> = by_count.rows().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(by_count.position_of(RowId(2)), Some(2));

        let by_date = grid.sorted_by(Column::Date, SortOrder::Descending);
        let ids: Vec<u64> = by_date.rows().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn push_row_assigns_fresh_ids() {
        let mut grid = GridModel::with_default_rows();
        let id = grid.push_row(Row::new(RowId(0), "", "new", 0));
        assert_eq!(id, RowId(4));
        assert_eq!(GridModel::blank(2).rows()[1].id, RowId(2));
    }
}
