//! Reversible editor actions.
//!
//! This module defines the core abstractions for an undo/redo editor system:
//!
//! - [`EditAction`]: a reversible edit operation (Command pattern)
//! - [`EditActionError`] and [`EditActionResult`]: action failures
//!
//! EditActions are self-contained: each implementation internally stores whatever
//! it needs to reach its target (an instance handle, a setter, old/new values).
//! The history never hands a target to the action.

use std::fmt;

/// Error type for action execution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// The target object was not found.
    TargetNotFound(String),
    /// The target is in an invalid state for this action.
    InvalidState(String),
    /// A custom error with a description.
    Custom(String),
}

impl fmt::Display for EditActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound(msg) => write!(f, "target not found: {msg}"),
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EditActionError {}

/// Result type for action operations.
pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// A reversible editor action (Command pattern).
///
/// An action captures enough state to redo and undo one logical edit. Once
/// pushed into an [`EditActionHistory`](super::EditActionHistory) the history
/// owns it exclusively; discarding an entry simply drops it.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct SetWidth {
///     decal: Weak<RefCell<Decal>>,
///     old: f32,
///     new: f32,
/// }
///
/// impl EditAction for SetWidth {
///     fn apply(&mut self) -> EditActionResult {
///         let decal = self.decal.upgrade()
///             .ok_or_else(|| EditActionError::TargetNotFound("decal".into()))?;
///         decal.borrow_mut().set_width(self.new);
///         Ok(())
///     }
///
///     fn undo(&mut self) -> EditActionResult {
///         /* same, with self.old */
///     }
///
///     fn description(&self) -> &str {
///         "Set width"
///     }
/// }
/// ```
pub trait EditAction: fmt::Debug {
    /// Applies the action (forward / redo direction).
    fn apply(&mut self) -> EditActionResult;

    /// Reverses the action (undo direction).
    ///
    /// Must restore the target to the state before [`apply`](Self::apply)
    /// was called.
    fn undo(&mut self) -> EditActionResult;

    /// A short, human-readable description for display in the edit menu.
    ///
    /// Examples: `"Set width"`, `"Set visible"`.
    fn description(&self) -> &str;
}
