//! Help text content for the help modal

use super::keymap::{Action, Keymap};
use gridedit_core::Column;

/// Grid keys. These are fixed and cannot be rebound.
pub fn get_grid_help() -> Vec<String> {
    vec![
        "Navigation:",
        "  Arrow keys        Move the selected cell",
        "  Ctrl/Cmd+Arrow    Jump to the first/last row or column",
        "",
        "Selection:",
        "  Shift+Arrow       Grow or shrink the selection",
        "  Shift+Ctrl+Arrow  Extend the selection to the edge",
        "  Click             Select a cell",
        "  Shift+Click       Extend the selection to a cell",
        "",
        "Editing:",
        "  Enter             Edit the selected cell",
        "  Enter (editing)   Finish and move down",
        "  Click (selected)  Edit the cell",
        "  Left/Right        Move the text cursor while editing",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Title of the help overlay, naming the keymap file's description if any.
pub fn help_title(keymap: &Keymap) -> String {
    match keymap.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => format!(" Help: {} ", description),
        _ => " Help ".to_string(),
    }
}

/// App commands with whatever combos the active keymap gives them.
pub fn get_command_help(keymap: &Keymap) -> Vec<String> {
    let actions = [
        Action::Copy,
        Action::Paste,
        Action::Sort(Column::Date),
        Action::Sort(Column::Title),
        Action::Sort(Column::Count),
        Action::Help,
        Action::Quit,
    ];
    let mut lines = vec!["Commands:".to_string()];
    for action in actions {
        let combo = keymap
            .combo_for(action)
            .unwrap_or_else(|| "(unbound)".to_string());
        lines.push(format!("  {:<17} {}", combo, action_label(action)));
    }
    lines.push(String::new());
    lines.push("Press Esc or q to close".to_string());
    lines
}

fn action_label(action: Action) -> &'static str {
    match action {
        Action::Copy => "Copy selection as TSV",
        Action::Paste => "Paste TSV at the selection",
        Action::Sort(Column::Date) => "Sort by date",
        Action::Sort(Column::Title) => "Sort by title",
        Action::Sort(Column::Count) => "Sort by count",
        Action::Help => "Toggle this help",
        Action::Quit => "Quit",
    }
}
