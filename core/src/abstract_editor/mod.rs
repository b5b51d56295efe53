//! Abstract editor framework for reversible editing operations.
//!
//! This module provides the foundational traits and types for building
//! an undo/redo-capable editor system. It is decoupled from specific
//! editable types so that higher-level crates can implement concrete
//! editors.
//!
//! - [`EditAction`]: one reversible edit (Command pattern)
//! - [`EditActionHistory`]: linear undo/redo history with a cursor
//!
//! # Linear history
//!
//! The history keeps every recorded action in one sequence. Undo moves the
//! cursor back, redo moves it forward. Pushing while actions are available
//! for redo destroys them: there is no branching.

mod action;
mod history;

pub use action::{EditAction, EditActionError, EditActionResult};
pub use history::{DEFAULT_MAX_UNDO, EditActionHistory};
