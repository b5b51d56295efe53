//! Undo/redo action history.
//!
//! [`EditActionHistory`] is a linear sequence of [`EditAction`] trait objects
//! with a cursor. Entries before the cursor are applied, entries at or after
//! it are undone and available for redo. Pushing a new action after undoing
//! discards the redo tail (standard editor behavior, no branching).

use std::fmt;

use super::action::{EditAction, EditActionResult};

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Manages a linear undo/redo history of editor actions.
///
/// Invariant: `0 <= index <= actions.len() <= max_undo`.
///
/// # Example
///
/// ```ignore
/// let mut history = EditActionHistory::new(50);
///
/// // Apply and record an action
/// history.push(Box::new(my_action))?;
///
/// // Undo the last action
/// history.undo()?;
///
/// // Redo it
/// history.redo()?;
/// ```
pub struct EditActionHistory {
    actions: Vec<Box<dyn EditAction>>,
    index: usize,
    max_undo: usize,
    /// Cursor position matching the last save.
    ///
    /// `None` when never saved or when the save point is permanently
    /// unreachable (its entries were discarded or dropped by the bound).
    saved_index: Option<usize>,
}

impl EditActionHistory {
    /// Creates a new empty history with the given maximum undo depth.
    ///
    /// When a push exceeds `max_undo`, the oldest action is dropped.
    pub fn new(max_undo: usize) -> Self {
        Self {
            actions: Vec::new(),
            index: 0,
            max_undo: max_undo.max(1),
            saved_index: Some(0),
        }
    }

    /// Creates a history that never drops old entries.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Applies an action and records it at the cursor.
    ///
    /// Every entry at or after the cursor is discarded first, newest first,
    /// so redo is no longer possible once a new action is pushed. If the action fails to
    /// apply it is dropped and the history is left untouched.
    pub fn push(&mut self, mut action: Box<dyn EditAction>) -> EditActionResult {
        action.apply()?;

        let discarded = self.actions.len() - self.index;
        if discarded > 0 {
            log::trace!("Discarding {discarded} redo entries");
            while self.actions.len() > self.index {
                self.actions.pop();
            }
            if self.saved_index.is_some_and(|saved| saved > self.index) {
                self.saved_index = None;
            }
        }

        log::debug!("Push \"{}\" at {}", action.description(), self.index);
        self.actions.push(action);
        self.index += 1;

        if self.actions.len() > self.max_undo {
            self.actions.remove(0);
            self.index -= 1;
            self.saved_index = match self.saved_index {
                Some(0) | None => None,
                Some(saved) => Some(saved - 1),
            };
        }
        Ok(())
    }

    /// Undoes the action just before the cursor.
    ///
    /// Does nothing at the start of the history. If the action fails to
    /// revert, the cursor stays where it was.
    pub fn undo(&mut self) -> EditActionResult {
        if self.index == 0 {
            log::trace!("Nothing to undo");
            return Ok(());
        }
        let action = &mut self.actions[self.index - 1];
        action.undo()?;
        log::debug!("Undo \"{}\"", action.description());
        self.index -= 1;
        Ok(())
    }

    /// Redoes the action at the cursor.
    ///
    /// Does nothing at the end of the history.
    pub fn redo(&mut self) -> EditActionResult {
        let Some(action) = self.actions.get_mut(self.index) else {
            log::trace!("Nothing to redo");
            return Ok(());
        };
        action.apply()?;
        log::debug!("Redo \"{}\"", action.description());
        self.index += 1;
        Ok(())
    }

    /// Number of recorded actions, applied or not.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no actions are recorded.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Cursor position: the number of currently applied actions.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if there are actions that can be undone.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Returns `true` if there are actions that can be redone.
    pub fn can_redo(&self) -> bool {
        self.index < self.actions.len()
    }

    /// Returns the number of actions that can be undone.
    pub fn undo_count(&self) -> usize {
        self.index
    }

    /// Returns the number of actions that can be redone.
    pub fn redo_count(&self) -> usize {
        self.actions.len() - self.index
    }

    /// Returns an iterator over undo action descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.actions[..self.index]
            .iter()
            .rev()
            .map(|a| a.description())
    }

    /// Returns an iterator over redo action descriptions, next to redo first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.actions[self.index..].iter().map(|a| a.description())
    }

    /// Returns the maximum undo depth.
    pub fn max_undo(&self) -> usize {
        self.max_undo
    }

    /// Records the current state as the saved state.
    ///
    /// After calling this, [`has_unsaved_changes`](Self::has_unsaved_changes)
    /// returns `false` until the cursor moves away.
    pub fn mark_saved(&mut self) {
        self.saved_index = Some(self.index);
    }

    /// Returns `true` if the current state differs from the last saved state.
    ///
    /// A save point whose entries were discarded by a push or dropped by the
    /// depth bound can never be reached again.
    pub fn has_unsaved_changes(&self) -> bool {
        self.saved_index != Some(self.index)
    }

    /// Drops every recorded action and resets the cursor.
    ///
    /// The target is not touched, so if the current state was the saved
    /// state it stays saved. Otherwise the save point is lost.
    pub fn clear(&mut self) {
        let at_save = !self.has_unsaved_changes();
        self.actions.clear();
        self.index = 0;
        self.saved_index = at_save.then_some(0);
    }
}

impl Default for EditActionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

impl fmt::Debug for EditActionHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditActionHistory")
            .field("len", &self.actions.len())
            .field("index", &self.index)
            .field("max_undo", &self.max_undo)
            .field("saved_index", &self.saved_index)
            .finish()
    }
}
