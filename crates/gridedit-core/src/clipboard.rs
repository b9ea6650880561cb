//! Tab-separated clipboard text.
//!
//! The format is plain spreadsheet TSV: rows separated by `\n`, cells by
//! `\t`, no quoting. Reading is lenient. Ragged rows are kept as they are,
//! cells that fall outside the grid are dropped, and integer cells that don't
//! parse keep their previous value.

use crate::grid::{CellRef, Column, GridModel};
use crate::selection::SelectionRange;

/// Serialize the cells covered by `range` to TSV.
///
/// Rows are joined by `\n` with no trailing newline. Cells outside the grid
/// are skipped.
pub fn serialize(range: SelectionRange, grid: &GridModel) -> String {
    let range = range.normalized();
    let mut lines: Vec<String> = Vec::with_capacity(range.height());

    for row_idx in range.start.row..=range.end.row {
        let Some(row) = grid.row(row_idx) else {
            break;
        };
        let cells: Vec<String> = (range.start.col..=range.end.col)
            .map_while(Column::from_index)
            .map(|column| row.cell_text(column))
            .collect();
        lines.push(cells.join("\t"));
    }

    lines.join("\n")
}

/// Split TSV text into rows of raw cell strings.
///
/// A single trailing line terminator is ignored, and `\r` before each `\n`
/// is stripped. Empty text yields one row holding one empty cell.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let body = match text.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => text,
    };

    body.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.split('\t').map(str::to_string).collect()
        })
        .collect()
}

/// Write parsed cells into a copy of `grid`, starting at `anchor`.
///
/// Offset `(i, j)` lands on `(anchor.row + i, anchor.col + j)`. Rows past the
/// end of the grid and columns past the count column are dropped.
pub fn apply_paste(parsed: &[Vec<String>], anchor: CellRef, grid: &GridModel) -> GridModel {
    let mut next = grid.clone();

    for (i, cells) in parsed.iter().enumerate() {
        let row = anchor.row + i;
        if row >= next.row_count() {
            tracing::debug!(
                skipped = parsed.len() - i,
                "paste runs past the last row, dropping remaining rows"
            );
            break;
        }
        for (j, raw) in cells.iter().enumerate() {
            let target = CellRef::new(row, anchor.col + j);
            if target.column().is_none() {
                break;
            }
            next.set_cell_text(target, raw);
        }
    }

    next
}

/// Parse `text` and paste it at `anchor`.
pub fn paste_text(text: &str, anchor: CellRef, grid: &GridModel) -> GridModel {
    apply_paste(&parse(text), anchor, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Row, RowId};

    fn sample() -> GridModel {
        GridModel::new(vec![
            Row::new(RowId(1), "2024-01-01", "alpha", 1),
            Row::new(RowId(2), "2024-01-02", "beta", 2),
            Row::new(RowId(3), "2024-01-03", "gamma", 3),
            Row::new(RowId(4), "2024-01-04", "delta", 4),
        ])
    }

    fn range(r1: usize, c1: usize, r2: usize, c2: usize) -> SelectionRange {
        SelectionRange::new(CellRef::new(r1, c1), CellRef::new(r2, c2))
    }

    #[test]
    fn serialize_joins_with_tabs_and_newlines() {
        let grid = sample();
        assert_eq!(
            serialize(range(0, 0, 1, 2), &grid),
            "2024-01-01\talpha\t1\n2024-01-02\tbeta\t2"
        );
        assert_eq!(serialize(range(2, 1, 2, 1), &grid), "gamma");
    }

    #[test]
    fn serialize_reads_reversed_corners() {
        let grid = sample();
        assert_eq!(serialize(range(1, 2, 0, 1), &grid), "alpha\t1\nbeta\t2");
    }

    #[test]
    fn serialize_skips_rows_past_the_end() {
        let grid = sample();
        assert_eq!(serialize(range(3, 2, 9, 2), &grid), "4");
    }

    #[test]
    fn parse_keeps_ragged_rows() {
        assert_eq!(
            parse("a\tb\tc\nd\ne\tf"),
            vec![
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                vec!["d".to_string()],
                vec!["e".to_string(), "f".to_string()],
            ]
        );
    }

    #[test]
    fn parse_tolerates_crlf_and_trailing_newline() {
        assert_eq!(
            parse("a\tb\r\nc\td\r\n"),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
        assert_eq!(parse(""), vec![vec![String::new()]]);
    }

    #[test]
    fn round_trip_reproduces_values() {
        let grid = sample();
        for r in [range(0, 0, 3, 2), range(1, 1, 2, 2), range(2, 0, 2, 0)] {
            let text = serialize(r, &grid);
            let blank = GridModel::blank(grid.row_count());
            let restored = paste_text(&text, r.start, &blank);
            for row in r.start.row..=r.end.row {
                for col in r.start.col..=r.end.col {
                    let cell = CellRef::new(row, col);
                    assert_eq!(restored.cell_text(cell), grid.cell_text(cell), "{}", cell);
                }
            }
        }
    }

    #[test]
    fn count_fallback_keeps_prior_value() {
        let grid = sample();
        let anchor = CellRef::new(0, 2);

        let after = paste_text("abc", anchor, &grid);
        assert_eq!(after.row(0).unwrap().count, 1);

        let after = paste_text("", anchor, &grid);
        assert_eq!(after.row(0).unwrap().count, 1);

        let after = paste_text("7", anchor, &grid);
        assert_eq!(after.row(0).unwrap().count, 7);
    }

    #[test]
    fn count_paste_takes_leading_integer() {
        let grid = sample();
        let after = paste_text("12.5", CellRef::new(0, 2), &grid);
        assert_eq!(after.row(0).unwrap().count, 12);

        let after = paste_text("x\t7 pcs\ny\t3abc", CellRef::new(1, 1), &grid);
        assert_eq!(after.row(1).unwrap(), &Row::new(RowId(2), "2024-01-02", "x", 7));
        assert_eq!(after.row(2).unwrap(), &Row::new(RowId(3), "2024-01-03", "y", 3));
    }

    #[test]
    fn overflow_rows_are_dropped() {
        let grid = sample();
        let text = "d1\tt1\t10\nd2\tt2\t20\nd3\tt3\t30";
        let after = paste_text(text, CellRef::new(3, 0), &grid);

        assert_eq!(after.row_count(), 4);
        assert_eq!(after.row(3).unwrap(), &Row::new(RowId(4), "d1", "t1", 10));
        for i in 0..3 {
            assert_eq!(after.row(i), grid.row(i));
        }
    }

    #[test]
    fn overflow_columns_are_dropped() {
        let grid = sample();
        let after = paste_text("x\t5\textra\tmore", CellRef::new(0, 1), &grid);
        assert_eq!(after.row(0).unwrap(), &Row::new(RowId(1), "2024-01-01", "x", 5));
    }

    #[test]
    fn short_input_leaves_other_cells_untouched() {
        let grid = sample();
        let after = paste_text("only", CellRef::new(1, 0), &grid);
        assert_eq!(after.row(1).unwrap(), &Row::new(RowId(2), "only", "beta", 2));
        assert_eq!(after.row(2), grid.row(2));
    }

    #[test]
    fn paste_does_not_touch_the_source_snapshot() {
        let grid = sample();
        let _ = paste_text("changed", CellRef::new(0, 1), &grid);
        assert_eq!(grid.row(0).unwrap().title, "alpha");
    }
}
