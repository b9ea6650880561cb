//! Keymap translation layer.
//!
//! App commands (copy, paste, sort, help, quit) are rebindable from
//! `keymap.toml`. Arrow keys and Enter are not: they go straight to the grid
//! router in `gridedit-core`.

mod defaults;
mod parse;
mod types;

pub use parse::load_keymap;
pub use types::{Action, Binding, KeyCombo, Keymap};
