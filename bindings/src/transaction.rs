//! Property transactions: one reversible before/after change of a property.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use redlilium_core::abstract_editor::{EditAction, EditActionError, EditActionResult};

use crate::instance::InstanceRef;
use crate::value::PropertyValue;

/// Reads a property from its owning instance.
pub type Getter<I, T> = Rc<dyn Fn(&I) -> T>;

/// Writes a property on its owning instance.
pub type Setter<I, T> = Rc<dyn Fn(&mut I, T)>;

/// Snapshot of one edit of one property.
///
/// `old_value` is captured when the transaction opens, `new_value` tracks
/// the most recent assignment. Applying writes `new_value`, undoing writes
/// `old_value`. The instance is held weakly: if the host drops it, the
/// transaction fails with [`EditActionError::TargetNotFound`] instead of
/// keeping a stale object alive.
pub struct PropertyTransaction<I, T> {
    instance: Weak<RefCell<I>>,
    setter: Setter<I, T>,
    old_value: T,
    new_value: T,
    description: String,
}

impl<I: 'static, T: PropertyValue> PropertyTransaction<I, T> {
    /// Opens a transaction on `instance`, reading the current value through
    /// `getter`. The transaction starts unmodified (`new == old`).
    pub fn new(
        instance: &InstanceRef<I>,
        getter: &Getter<I, T>,
        setter: Setter<I, T>,
        description: String,
    ) -> EditActionResult<Self> {
        let old_value = {
            let borrowed = instance.try_borrow().map_err(|_| {
                EditActionError::InvalidState(format!("{description}: instance is being modified"))
            })?;
            getter(&borrowed)
        };
        Ok(Self {
            instance: Rc::downgrade(instance),
            setter,
            new_value: old_value.clone(),
            old_value,
            description,
        })
    }

    /// Records `value` as the latest assignment without applying it.
    pub fn update(&mut self, value: T) {
        self.new_value = value;
    }

    /// Returns `true` if the latest assignment differs from the snapshot.
    pub fn has_modifications(&self) -> bool {
        !self.new_value.same_value(&self.old_value)
    }

    pub fn old_value(&self) -> &T {
        &self.old_value
    }

    pub fn new_value(&self) -> &T {
        &self.new_value
    }

    fn write(&self, value: T) -> EditActionResult {
        let instance = self.instance.upgrade().ok_or_else(|| {
            EditActionError::TargetNotFound(format!(
                "{}: instance was dropped",
                self.description
            ))
        })?;
        let mut borrowed = instance.try_borrow_mut().map_err(|_| {
            EditActionError::InvalidState(format!(
                "{}: instance is already borrowed",
                self.description
            ))
        })?;
        (self.setter)(&mut borrowed, value);
        Ok(())
    }
}

impl<I: 'static, T: PropertyValue> EditAction for PropertyTransaction<I, T> {
    fn apply(&mut self) -> EditActionResult {
        self.write(self.new_value.clone())
    }

    fn undo(&mut self) -> EditActionResult {
        self.write(self.old_value.clone())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<I, T: fmt::Debug> fmt::Debug for PropertyTransaction<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTransaction")
            .field("description", &self.description)
            .field("old_value", &self.old_value)
            .field("new_value", &self.new_value)
            .field("alive", &(self.instance.strong_count() > 0))
            .finish()
    }
}
