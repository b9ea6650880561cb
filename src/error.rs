//! Error types for the Gridedit binary

use thiserror::Error;

/// Problems reading a key combo such as `C-S-v` from the keymap file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComboError {
    #[error("empty key")]
    Empty,

    #[error("missing modifier before '-'")]
    MissingModifier,

    #[error("empty modifier segment")]
    EmptyModifier,

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("duplicate modifier '{0}'")]
    DuplicateModifier(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}
