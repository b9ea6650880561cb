//! Keyboard routing.
//!
//! Front ends translate their native key events into [`KeyInput`]; the router
//! decides which single handler owns the event. Precedence, highest first:
//!
//! 1. `Enter` commits an active edit, or starts one on the selected cell.
//! 2. Arrows without shift while editing belong to the editor's text cursor
//!    and are not claimed.
//! 3. Shift+arrow while editing closes the edit before touching the selection.
//! 4. Shift+jump, jump, shift, then plain arrow movement.
//!
//! Everything else is left to the caller.

use crate::selection::{Direction, MoveModifiers};

/// Keys the grid reacts to. Anything else is [`Key::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Other,
}

impl Key {
    fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            Key::Enter | Key::Other => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Ctrl and Meta both mean "jump to the edge".
    pub fn jump(&self) -> bool {
        self.ctrl || self.meta
    }

    fn movement(&self) -> MoveModifiers {
        MoveModifiers {
            shift: self.shift,
            jump: self.jump(),
        }
    }
}

/// A key press as seen by the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// What a claimed key press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    BeginEdit,
    CommitAndAdvance,
    Move {
        direction: Direction,
        modifiers: MoveModifiers,
        /// An active edit has to be closed before the move is applied.
        close_edit: bool,
    },
}

/// Whether a handler claimed the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routed {
    Handled,
    Ignored,
}

impl Routed {
    pub fn is_handled(self) -> bool {
        self == Routed::Handled
    }
}

/// Classify a key press given whether a cell is being edited.
///
/// Returns `None` when the grid does not claim the key.
pub fn classify(input: KeyInput, editing: bool) -> Option<KeyCommand> {
    if input.key == Key::Enter {
        return Some(if editing {
            KeyCommand::CommitAndAdvance
        } else {
            KeyCommand::BeginEdit
        });
    }

    let direction = input.key.direction()?;
    let modifiers = input.modifiers.movement();
    if editing && !modifiers.shift {
        return None;
    }

    Some(KeyCommand::Move {
        direction,
        modifiers,
        close_edit: editing,
    })
}

/// Clipboard events belong to the editor while a cell is being edited.
pub fn claims_clipboard(editing: bool) -> bool {
    !editing
}
