use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gridedit_core::Column;

/// App-level commands reachable from the keyboard.
///
/// Grid navigation and editing keys are not listed here: arrows and Enter
/// always go to the grid router and cannot be rebound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Copy the selection as TSV to the system clipboard.
    Copy,
    /// Paste TSV from the system clipboard at the selection.
    Paste,
    /// Sort rows on a column; repeating reverses the order.
    Sort(Column),
    /// Toggle the help overlay.
    Help,
    /// Exit the application.
    Quit,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Paste => "paste",
            Action::Sort(Column::Date) => "sort_date",
            Action::Sort(Column::Title) => "sort_title",
            Action::Sort(Column::Count) => "sort_count",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    pub fn from_name(input: &str) -> Option<Action> {
        match input.trim().to_ascii_lowercase().as_str() {
            "copy" => Some(Action::Copy),
            "paste" => Some(Action::Paste),
            "sort_date" => Some(Action::Sort(Column::Date)),
            "sort_title" => Some(Action::Sort(Column::Title)),
            "sort_count" => Some(Action::Sort(Column::Count)),
            "help" => Some(Action::Help),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn matches(&self, key: KeyEvent) -> bool {
        let code_matches = match (self.code, key.code) {
            // Terminals report Shift+letter as the uppercase letter.
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        if !code_matches {
            return false;
        }
        if self.modifiers.is_empty() {
            return true;
        }
        key.modifiers.contains(self.modifiers)
    }

    /// Plain characters are text while a cell is being edited.
    fn is_text(&self) -> bool {
        matches!(self.code, KeyCode::Char(_))
            && !self
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }
        let key = match self.code {
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => "Unknown".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}-{}", parts.join("-"), key)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub combo: KeyCombo,
    pub action: Action,
}

/// Active key bindings for app commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    pub bindings: Vec<Binding>,
    /// Free-form label from the keymap file, shown in the help title.
    pub description: Option<String>,
}

impl Keymap {
    /// Translate a key event into an app command.
    ///
    /// Bindings with modifiers win over plain ones. While a cell is being
    /// edited, plain character bindings are skipped so they can be typed.
    pub fn translate(&self, key: KeyEvent, editing: bool) -> Option<Action> {
        let usable = |binding: &&Binding| !(editing && binding.combo.is_text());
        self.bindings
            .iter()
            .filter(usable)
            .filter(|binding| !binding.combo.modifiers.is_empty())
            .find(|binding| binding.combo.matches(key))
            .or_else(|| {
                self.bindings
                    .iter()
                    .filter(usable)
                    .filter(|binding| binding.combo.modifiers.is_empty())
                    .find(|binding| binding.combo.matches(key))
            })
            .map(|binding| binding.action)
    }

    /// Display string of the first combo bound to `action`.
    pub fn combo_for(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|binding| binding.action == action)
            .map(|binding| binding.combo.display())
    }

    /// Add or replace bindings. A combo in `overrides` replaces any default
    /// on the same combo, and an action bound in `overrides` drops its
    /// default combos.
    pub fn merged(mut self, overrides: Vec<Binding>) -> Self {
        self.bindings.retain(|existing| {
            !overrides
                .iter()
                .any(|o| o.combo == existing.combo || o.action == existing.action)
        });
        self.bindings.extend(overrides);
        self
    }

    pub fn status_hint(&self) -> String {
        let mut parts = vec!["arrows:move".to_string(), "Enter:edit".to_string()];
        for action in [Action::Copy, Action::Paste, Action::Help, Action::Quit] {
            if let Some(combo) = self.combo_for(action) {
                parts.push(format!("{}:{}", combo, action.name()));
            }
        }
        parts.join("  ")
    }
}

impl Default for Keymap {
    fn default() -> Self {
        super::defaults::default_keymap()
    }
}
