//! TSV files: seed rows on startup and export the grid.
//!
//! Files use the clipboard format, one row per line, with the three columns
//! in display order. Reading goes through the same lenient paste path, so a
//! non-numeric count simply stays at zero.

use crate::clipboard;
use crate::error::{GridError, Result};
use crate::grid::{CellRef, GridModel};
use crate::selection::SelectionRange;
use std::path::Path;

/// Build a grid from TSV text.
pub fn parse_tsv(content: &str) -> Result<GridModel> {
    if content.trim().is_empty() {
        return Err(GridError::Parse {
            line: 1,
            message: "file is empty".to_string(),
        });
    }

    let parsed = clipboard::parse(content);
    for (idx, cells) in parsed.iter().enumerate() {
        if cells.len() > 3 {
            tracing::warn!(
                line = idx + 1,
                fields = cells.len(),
                "extra fields ignored"
            );
        }
    }

    let blank = GridModel::blank(parsed.len());
    Ok(clipboard::apply_paste(&parsed, CellRef::new(0, 0), &blank))
}

/// Read a grid from a TSV file.
pub fn read_tsv(path: &Path) -> Result<GridModel> {
    let content = std::fs::read_to_string(path)?;
    let grid = parse_tsv(&content)?;
    tracing::info!(path = %path.display(), rows = grid.row_count(), "loaded rows");
    Ok(grid)
}

/// Serialize the whole grid, one line per row with a trailing newline.
pub fn to_tsv(grid: &GridModel) -> String {
    if grid.is_empty() {
        return String::new();
    }
    let all = SelectionRange::new(
        CellRef::new(0, 0),
        CellRef::new(grid.last_row(), grid.column_count() - 1),
    );
    let mut out = clipboard::serialize(all, grid);
    out.push('\n');
    out
}

/// Write the whole grid to a TSV file.
pub fn write_tsv(path: &Path, grid: &GridModel) -> Result<()> {
    std::fs::write(path, to_tsv(grid))?;
    Ok(())
}
