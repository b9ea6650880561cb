use super::{Action, Binding, KeyCombo, Keymap};
use crossterm::event::{KeyCode, KeyModifiers};
use gridedit_core::Column;

pub(crate) fn default_keymap() -> Keymap {
    let ctrl = |c: char, action: Action| Binding {
        combo: KeyCombo::new(KeyCode::Char(c), KeyModifiers::CONTROL),
        action,
    };
    let function = |n: u8, action: Action| Binding {
        combo: KeyCombo::new(KeyCode::F(n), KeyModifiers::empty()),
        action,
    };

    Keymap {
        bindings: vec![
            ctrl('c', Action::Copy),
            ctrl('v', Action::Paste),
            ctrl('q', Action::Quit),
            function(1, Action::Help),
            function(2, Action::Sort(Column::Date)),
            function(3, Action::Sort(Column::Title)),
            function(4, Action::Sort(Column::Count)),
        ],
        description: None,
    }
}
