//! Error types for Gridedit core.

use thiserror::Error;

/// Errors that can occur outside the lenient editing paths.
///
/// Selection, editing and paste never fail: they clamp or keep the prior
/// value instead. Errors only come from reading and writing TSV files.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, GridError>;
