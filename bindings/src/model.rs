//! Transactional property models.
//!
//! A [`PropertyModel`] wraps one gettable/settable value and decides how
//! edits reach the undo history. [`UndoRedoModel`] is the history-backed
//! implementation used by every binding the [`Binder`](crate::Binder) creates.
//!
//! # Edit sessions
//!
//! The model is either **idle** or **editing**:
//!
//! - `set` while idle is an atomic edit: one transaction is pushed
//!   immediately.
//! - `start_updating` opens a transaction without pushing it. Every `set`
//!   during the session updates and re-applies that same transaction, giving
//!   live feedback while a slider is dragged.
//! - `finish_updating` pushes the transaction if the value actually changed
//!   and drops it otherwise.
//! - `cancel_updating` restores the value captured at session start and drops
//!   the transaction without touching the history.
//!
//! Redundant session calls are no-ops, and setting a value equal to the
//! current one does nothing at all.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use redlilium_core::abstract_editor::{
    EditAction, EditActionError, EditActionHistory, EditActionResult,
};

use crate::instance::{InstanceAccessor, InstanceRef};
use crate::transaction::{Getter, PropertyTransaction, Setter};
use crate::value::PropertyValue;

/// Undo history shared by every model of an editing session.
pub type SharedHistory = Rc<RefCell<EditActionHistory>>;

/// Value access plus the edit-session protocol for one property.
pub trait PropertyModel<T> {
    /// Reads the current value from the owning instance.
    fn get(&self) -> EditActionResult<T>;

    /// Assigns `value`. Returns `Ok(false)` when it equals the current
    /// value and nothing happened.
    fn set(&mut self, value: T) -> EditActionResult<bool>;

    /// Opens an edit session. No-op if one is already open.
    fn start_updating(&mut self) -> EditActionResult;

    /// Closes the session, recording it if the value changed.
    fn finish_updating(&mut self) -> EditActionResult;

    /// Closes the session, restoring the value it started from.
    fn cancel_updating(&mut self) -> EditActionResult;

    /// Returns `true` while an edit session is open.
    fn is_updating(&self) -> bool;
}

/// History-backed [`PropertyModel`] over a getter/setter pair.
pub struct UndoRedoModel<I, T> {
    history: SharedHistory,
    instance: InstanceAccessor<I>,
    getter: Getter<I, T>,
    setter: Setter<I, T>,
    name: String,
    transaction: Option<PropertyTransaction<I, T>>,
}

impl<I: 'static, T: PropertyValue> UndoRedoModel<I, T> {
    pub fn new(
        history: SharedHistory,
        instance: InstanceAccessor<I>,
        getter: Getter<I, T>,
        setter: Setter<I, T>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            history,
            instance,
            getter,
            setter,
            name: name.into(),
            transaction: None,
        }
    }

    /// Property name, used in transaction descriptions.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> EditActionResult<InstanceRef<I>> {
        self.instance.resolve().ok_or_else(|| {
            EditActionError::TargetNotFound(format!("{}: instance is not available", self.name))
        })
    }

    fn read(&self, instance: &InstanceRef<I>) -> EditActionResult<T> {
        let borrowed = instance.try_borrow().map_err(|_| {
            EditActionError::InvalidState(format!("{}: instance is being modified", self.name))
        })?;
        Ok((self.getter)(&borrowed))
    }

    fn open_transaction(
        &self,
        instance: &InstanceRef<I>,
    ) -> EditActionResult<PropertyTransaction<I, T>> {
        PropertyTransaction::new(
            instance,
            &self.getter,
            self.setter.clone(),
            format!("Set {}", self.name),
        )
    }

    fn push(&self, transaction: PropertyTransaction<I, T>) -> EditActionResult {
        let mut history = self.history.try_borrow_mut().map_err(|_| {
            EditActionError::InvalidState(format!("{}: history is busy", self.name))
        })?;
        history.push(Box::new(transaction))
    }
}

impl<I: 'static, T: PropertyValue> PropertyModel<T> for UndoRedoModel<I, T> {
    fn get(&self) -> EditActionResult<T> {
        let instance = self.resolve()?;
        self.read(&instance)
    }

    fn set(&mut self, value: T) -> EditActionResult<bool> {
        let instance = self.resolve()?;
        if self.read(&instance)?.same_value(&value) {
            log::trace!("{}: unchanged, ignoring {value:?}", self.name);
            return Ok(false);
        }

        if let Some(transaction) = &mut self.transaction {
            transaction.update(value);
            transaction.apply()?;
        } else {
            let mut transaction = self.open_transaction(&instance)?;
            transaction.update(value);
            self.push(transaction)?;
        }
        Ok(true)
    }

    fn start_updating(&mut self) -> EditActionResult {
        if self.transaction.is_some() {
            return Ok(());
        }
        let instance = self.resolve()?;
        self.transaction = Some(self.open_transaction(&instance)?);
        log::trace!("{}: edit session started", self.name);
        Ok(())
    }

    fn finish_updating(&mut self) -> EditActionResult {
        let Some(transaction) = self.transaction.take() else {
            return Ok(());
        };
        if transaction.has_modifications() {
            log::debug!(
                "{}: committing {:?} -> {:?}",
                self.name,
                transaction.old_value(),
                transaction.new_value()
            );
            self.push(transaction)
        } else {
            log::trace!("{}: edit session finished without changes", self.name);
            Ok(())
        }
    }

    fn cancel_updating(&mut self) -> EditActionResult {
        let Some(mut transaction) = self.transaction.take() else {
            return Ok(());
        };
        log::trace!("{}: edit session cancelled", self.name);
        transaction.undo()
    }

    fn is_updating(&self) -> bool {
        self.transaction.is_some()
    }
}

impl<I, T: fmt::Debug> fmt::Debug for UndoRedoModel<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoRedoModel")
            .field("name", &self.name)
            .field("transaction", &self.transaction)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Decal {
        width: f32,
    }

    struct Fixture {
        decal: InstanceRef<Decal>,
        history: SharedHistory,
        model: UndoRedoModel<Decal, f32>,
    }

    fn fixture(width: f32) -> Fixture {
        let decal = Rc::new(RefCell::new(Decal { width }));
        let history: SharedHistory = Rc::new(RefCell::new(EditActionHistory::default()));
        let model = UndoRedoModel::new(
            history.clone(),
            InstanceAccessor::from_instance(&decal),
            Rc::new(|d: &Decal| d.width),
            Rc::new(|d: &mut Decal, v: f32| d.width = v),
            "width",
        );
        Fixture {
            decal,
            history,
            model,
        }
    }

    impl Fixture {
        fn width(&self) -> f32 {
            self.decal.borrow().width
        }

        fn history_len(&self) -> usize {
            self.history.borrow().len()
        }
    }

    #[test]
    fn session_merges_into_one_entry() {
        let mut f = fixture(10.0);

        f.model.start_updating().unwrap();
        assert!(f.model.is_updating());
        for v in [11.0, 12.0, 13.0] {
            assert!(f.model.set(v).unwrap());
            assert_eq!(f.width(), v);
            assert_eq!(f.history_len(), 0);
        }
        f.model.finish_updating().unwrap();

        assert!(!f.model.is_updating());
        assert_eq!(f.history_len(), 1);
        assert_eq!(f.width(), 13.0);

        f.history.borrow_mut().undo().unwrap();
        assert_eq!(f.width(), 10.0);
        assert_eq!(f.history.borrow().undo_descriptions().next(), None);
        assert_eq!(f.history.borrow().redo_descriptions().next(), Some("Set width"));
    }

    #[test]
    fn cancel_restores_and_does_not_record() {
        let mut f = fixture(10.0);

        f.model.start_updating().unwrap();
        f.model.set(42.0).unwrap();
        assert_eq!(f.width(), 42.0);
        f.model.cancel_updating().unwrap();

        assert_eq!(f.width(), 10.0);
        assert_eq!(f.history_len(), 0);
        assert!(!f.model.is_updating());
    }

    #[test]
    fn unchanged_set_is_ignored() {
        let mut f = fixture(10.0);

        assert!(!f.model.set(10.0).unwrap());
        assert!(!f.model.set(10.0 + 1e-6).unwrap());
        assert_eq!(f.history_len(), 0);
    }

    #[test]
    fn atomic_set_pushes_one_entry() {
        let mut f = fixture(10.0);

        assert!(f.model.set(20.0).unwrap());
        assert_eq!(f.width(), 20.0);
        assert_eq!(f.history_len(), 1);

        assert!(f.model.set(30.0).unwrap());
        assert_eq!(f.history_len(), 2);

        f.history.borrow_mut().undo().unwrap();
        assert_eq!(f.width(), 20.0);
        f.history.borrow_mut().undo().unwrap();
        assert_eq!(f.width(), 10.0);
    }

    #[test]
    fn session_back_to_start_value_is_discarded() {
        let mut f = fixture(10.0);

        f.model.start_updating().unwrap();
        f.model.set(15.0).unwrap();
        f.model.set(10.0).unwrap();
        f.model.finish_updating().unwrap();

        assert_eq!(f.width(), 10.0);
        assert_eq!(f.history_len(), 0);
    }

    #[test]
    fn redundant_session_calls_are_no_ops() {
        let mut f = fixture(10.0);

        f.model.finish_updating().unwrap();
        f.model.cancel_updating().unwrap();
        assert_eq!(f.history_len(), 0);

        f.model.start_updating().unwrap();
        f.model.set(12.0).unwrap();
        // A second start must not re-snapshot 12.0 as the old value.
        f.model.start_updating().unwrap();
        f.model.set(14.0).unwrap();
        f.model.finish_updating().unwrap();

        f.history.borrow_mut().undo().unwrap();
        assert_eq!(f.width(), 10.0);
    }

    #[test]
    fn session_discards_redo_tail_on_commit() {
        let mut f = fixture(0.0);
        for v in [1.0, 2.0, 3.0] {
            f.model.set(v).unwrap();
        }
        f.history.borrow_mut().undo().unwrap();
        f.history.borrow_mut().undo().unwrap();
        assert_eq!(f.width(), 1.0);

        f.model.start_updating().unwrap();
        f.model.set(9.0).unwrap();
        assert_eq!(f.history_len(), 3);
        f.model.finish_updating().unwrap();

        assert_eq!(f.history_len(), 2);
        f.history.borrow_mut().redo().unwrap();
        assert_eq!(f.width(), 9.0);
    }

    #[test]
    fn missing_instance_is_reported() {
        let history: SharedHistory = Rc::new(RefCell::new(EditActionHistory::default()));
        let mut model = UndoRedoModel::new(
            history.clone(),
            InstanceAccessor::<Decal>::new(|| None),
            Rc::new(|d: &Decal| d.width),
            Rc::new(|d: &mut Decal, v: f32| d.width = v),
            "width",
        );

        assert!(matches!(model.get(), Err(EditActionError::TargetNotFound(_))));
        assert!(matches!(model.set(1.0), Err(EditActionError::TargetNotFound(_))));
        assert!(model.start_updating().is_err());
        assert!(!model.is_updating());
        assert!(history.borrow().is_empty());
    }

    #[test]
    fn get_reads_through_getter() {
        let f = fixture(3.5);
        assert_eq!(f.model.get().unwrap(), 3.5);
        assert_eq!(f.model.name(), "width");
        f.decal.borrow_mut().width = 4.5;
        assert_eq!(f.model.get().unwrap(), 4.5);
    }
}
