//! gridedit-core - UI-agnostic grid model, selection state machine and
//! TSV clipboard codec.

pub mod clipboard;
pub mod editing;
pub mod error;
pub mod grid;
pub mod router;
pub mod selection;
pub mod session;
pub mod storage;

pub use error::{GridError, Result};
pub use grid::{COLUMN_COUNT, CellRef, Column, GridModel, Row, RowId, SortOrder};
pub use router::{Key, KeyInput, Modifiers, Routed};
pub use selection::{Direction, MoveModifiers, SelectionRange, SelectionState};
pub use session::{FocusLog, FocusManager, NoFocus, Session};
