//! UI rendering

use super::app::App;
use super::help::{get_command_help, get_grid_help, help_title};
use gridedit_core::{COLUMN_COUNT, CellRef, Column, SortOrder};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub(crate) const VALUE_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;
/// Display widths of the date, title and count columns.
pub(crate) const COLUMN_WIDTHS: [u16; COLUMN_COUNT] = [12, 24, 10];

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(VALUE_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Map a screen position to the body cell drawn there.
pub(crate) fn grid_cell_at(
    app: &App,
    grid_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<CellRef> {
    if grid_area.width < 3 || grid_area.height < 4 {
        return None;
    }

    let inner_x = grid_area.x.saturating_add(1);
    let inner_y = grid_area.y.saturating_add(1);
    let inner_right = inner_x.saturating_add(grid_area.width.saturating_sub(2));
    let inner_bottom = inner_y.saturating_add(grid_area.height.saturating_sub(2));

    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row < inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    // Header row holds the column names, not data cells.
    if mouse_row == inner_y {
        return None;
    }

    let rel_row = mouse_row.saturating_sub(inner_y.saturating_add(1)) as usize;
    if rel_row >= app.visible_rows {
        return None;
    }
    let row = app.viewport_row.saturating_add(rel_row);
    if row >= app.grid().row_count() {
        return None;
    }

    let mut x = inner_x.saturating_add(ROW_HEADER_WIDTH);
    if mouse_col < x.saturating_add(GRID_COLUMN_SPACING) {
        return None;
    }
    x = x.saturating_add(GRID_COLUMN_SPACING);

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        let cell_end = x.saturating_add(*width);
        if mouse_col >= x && mouse_col < cell_end {
            return (mouse_col < inner_right).then(|| CellRef::new(row, col));
        }
        x = cell_end.saturating_add(GRID_COLUMN_SPACING);
        if mouse_col < x || x >= inner_right {
            return None;
        }
    }

    None
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // Borders plus the header row.
    app.visible_rows = (chunks[1].height.saturating_sub(3) as usize).max(1);
    app.update_viewport();

    draw_value_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if app.help_modal {
        draw_help_modal(f, app);
    }
}

fn draw_value_bar(f: &mut Frame, app: &App, area: Rect) {
    let label = app.selection_label();
    let editing = app.session.is_editing();

    let content = if editing {
        let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
        format!("{}: {}│{}", label, before, after)
    } else {
        let range = app.session.current_selection().normalized();
        if range.is_single_cell() {
            let text = app.grid().cell_text(range.start).unwrap_or_default();
            format!("{}: {}", label, text)
        } else {
            format!("{} ({} x {})", label, range.height(), range.width())
        }
    };

    let (title, color) = if editing {
        (" Edit ", Color::Yellow)
    } else {
        (" Cell ", Color::White)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn header_label(app: &App, column: Column) -> String {
    match app.session.sort_state() {
        Some((sorted, SortOrder::Ascending)) if sorted == column => {
            format!("{} ▲", column.header())
        }
        Some((sorted, SortOrder::Descending)) if sorted == column => {
            format!("{} ▼", column.header())
        }
        _ => column.header().to_string(),
    }
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let state = app.session.selection_state();
    let range = state.range.normalized();
    let editing = app.session.current_editing_cell();

    let header_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let mut header_cells = vec![Cell::from(" ")];
    header_cells.extend(
        Column::ALL
            .iter()
            .map(|&column| Cell::from(header_label(app, column)).style(header_style)),
    );
    let header = Row::new(header_cells).height(1);

    let grid = app.grid();
    let last_visible = (app.viewport_row + app.visible_rows).min(grid.row_count());
    let mut rows = Vec::new();
    for row in app.viewport_row..last_visible {
        let row_style = if range.start.row <= row && row <= range.end.row {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut cells = vec![Cell::from(format!("{}", row + 1)).style(row_style)];

        for column in Column::ALL {
            let cell = CellRef::new(row, column.index());
            if editing == Some(cell) {
                let style = Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD);
                cells.push(Cell::from(app.edit_buffer.clone()).style(style));
                continue;
            }

            let text = grid.cell_text(cell).unwrap_or_default();
            let style = if cell == state.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if range.contains(cell) {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else {
                Style::default()
            };
            cells.push(Cell::from(text).style(style));
        }
        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend(COLUMN_WIDTHS.iter().map(|&w| Constraint::Length(w)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Gridedit "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = if !app.status_message.is_empty() {
        app.status_message.clone()
    } else {
        format!(
            "{} rows  |  {}",
            app.grid().row_count(),
            app.keymap.status_hint()
        )
    };

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if !app.status_message.is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(status, style)]));
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = centered_rect(80, 80, f.area());
    let modal_style = Style::default().fg(Color::White).bg(Color::Black);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(help_title(&app.keymap))
        .border_style(Style::default().fg(Color::Green))
        .style(modal_style);

    let mut text = get_grid_help();
    text.push(String::new());
    text.extend(get_command_help(&app.keymap));

    let lines: Vec<Line> = text
        .into_iter()
        .map(|line| {
            let style = if line.starts_with("  ") || line.is_empty() {
                Style::default().fg(Color::White)
            } else {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            };
            Line::from(Span::styled(line, style))
        })
        .collect();

    let viewport_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(viewport_height);
    let effective_scroll = app.help_scroll.min(max_scroll);
    let scroll_y = u16::try_from(effective_scroll).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(modal_style)
        .scroll((scroll_y, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
