//! Typed binding factory and per-frame refresh driver.

use std::fmt;
use std::rc::Rc;

use crate::binding::{AnyBinding, Binding};
use crate::instance::InstanceAccessor;
use crate::model::{SharedHistory, UndoRedoModel};
use crate::transaction::{Getter, Setter};
use crate::view::BindableValue;

/// Creates bindings for properties of `I` and refreshes them every frame.
///
/// All bindings share the binder's history and resolve the instance through
/// the binder's accessor.
///
/// ```ignore
/// let mut binder = Binder::new(history, InstanceAccessor::from_slot(slot));
/// binder
///     .create("width", Decal::width, Decal::set_width)
///     .attach(width_edit.clone())
///     .attach(width_slider.clone());
/// let height = binder.create_field("height", |d| &d.height, |d| &mut d.height);
///
/// // once per frame
/// binder.update();
/// ```
pub struct Binder<I> {
    history: SharedHistory,
    instance: InstanceAccessor<I>,
    bindings: Vec<Rc<dyn AnyBinding>>,
}

impl<I: 'static> Binder<I> {
    pub fn new(history: SharedHistory, instance: InstanceAccessor<I>) -> Self {
        Self {
            history,
            instance,
            bindings: Vec::new(),
        }
    }

    /// Binds a property exposed through a getter/setter pair.
    pub fn create<T: BindableValue>(
        &mut self,
        name: impl Into<String>,
        getter: impl Fn(&I) -> T + 'static,
        setter: impl Fn(&mut I, T) + 'static,
    ) -> Rc<Binding<T>> {
        self.register(name.into(), Rc::new(getter), Rc::new(setter))
    }

    /// Binds a plain field, given shared and mutable projections onto it.
    pub fn create_field<T: BindableValue>(
        &mut self,
        name: impl Into<String>,
        field: impl Fn(&I) -> &T + 'static,
        field_mut: impl Fn(&mut I) -> &mut T + 'static,
    ) -> Rc<Binding<T>> {
        self.register(
            name.into(),
            Rc::new(move |instance: &I| field(instance).clone()),
            Rc::new(move |instance: &mut I, value: T| *field_mut(instance) = value),
        )
    }

    fn register<T: BindableValue>(
        &mut self,
        name: String,
        getter: Getter<I, T>,
        setter: Setter<I, T>,
    ) -> Rc<Binding<T>> {
        let model = UndoRedoModel::new(
            self.history.clone(),
            self.instance.clone(),
            getter,
            setter,
            name.clone(),
        );
        let binding = Binding::new(name, Box::new(model));
        log::debug!("Created binding `{}`", binding.name());
        self.bindings.push(binding.clone());
        binding
    }

    /// Refreshes every binding created by this binder, in creation order.
    pub fn update(&self) {
        for binding in &self.bindings {
            binding.update();
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Rc<dyn AnyBinding>> {
        self.bindings.iter()
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }
}

impl<I> fmt::Debug for Binder<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.bindings.iter().map(|b| b.name()).collect();
        f.debug_struct("Binder")
            .field("bindings", &names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use redlilium_core::abstract_editor::EditActionHistory;

    use super::*;
    use crate::headless::{HeadlessEditLine, HeadlessLabel};
    use crate::instance::{InstanceRef, InstanceSlot};
    use crate::widget::{EditLineWidget, LabelWidget};

    #[derive(Debug, Default)]
    struct Decal {
        width: f32,
        height: f32,
        label: String,
    }

    impl Decal {
        fn width(&self) -> f32 {
            self.width
        }

        fn set_width(&mut self, width: f32) {
            self.width = width;
        }
    }

    fn history() -> SharedHistory {
        Rc::new(RefCell::new(EditActionHistory::default()))
    }

    #[test]
    fn create_accepts_method_paths() {
        let decal: InstanceRef<Decal> = Rc::new(RefCell::new(Decal::default()));
        let mut binder = Binder::new(history(), InstanceAccessor::from_instance(&decal));

        let width = binder.create("width", Decal::width, Decal::set_width);
        width.set(4.0).unwrap();

        assert_eq!(decal.borrow().width, 4.0);
        assert_eq!(binder.history().borrow().len(), 1);
        assert_eq!(binder.history().borrow().undo_descriptions().next(), Some("Set width"));
    }

    #[test]
    fn create_field_projects_fields() {
        let decal: InstanceRef<Decal> = Rc::new(RefCell::new(Decal::default()));
        let mut binder = Binder::new(history(), InstanceAccessor::from_instance(&decal));

        let height = binder.create_field("height", |d| &d.height, |d| &mut d.height);
        let label = binder.create_field("label", |d| &d.label, |d| &mut d.label);
        height.set(7.5).unwrap();
        label.set("arrow".to_owned()).unwrap();

        assert_eq!(decal.borrow().height, 7.5);
        assert_eq!(decal.borrow().label, "arrow");
        assert_eq!(binder.len(), 2);
        let names: Vec<&str> = binder.bindings().map(|b| b.name()).collect();
        assert_eq!(names, ["height", "label"]);
    }

    #[test]
    fn update_refreshes_all_bindings() {
        let decal: InstanceRef<Decal> = Rc::new(RefCell::new(Decal::default()));
        let mut binder = Binder::new(history(), InstanceAccessor::from_instance(&decal));
        assert!(binder.is_empty());

        let edit = Rc::new(HeadlessEditLine::new());
        let readout = Rc::new(HeadlessLabel::new());
        binder
            .create("width", Decal::width, Decal::set_width)
            .attach(edit.clone());
        binder
            .create_field("label", |d| &d.label, |d| &mut d.label)
            .attach(readout.clone());

        decal.borrow_mut().width = 3.0;
        decal.borrow_mut().label = "hello".to_owned();
        binder.update();

        assert_eq!(edit.text(), "3.000");
        assert_eq!(readout.text(), "hello");
        assert!(binder.history().borrow().is_empty());
    }

    #[test]
    fn instance_installed_after_creation() {
        let slot: InstanceSlot<Decal> = Rc::new(RefCell::new(None));
        let mut binder = Binder::new(history(), InstanceAccessor::from_slot(slot.clone()));
        let width = binder.create("width", Decal::width, Decal::set_width);
        let edit = Rc::new(HeadlessEditLine::new());
        width.attach(edit.clone());

        binder.update();
        assert_eq!(edit.text(), "");
        assert!(width.get().is_err());

        *slot.borrow_mut() = Some(Rc::new(RefCell::new(Decal {
            width: 2.0,
            ..Decal::default()
        })));
        binder.update();
        assert_eq!(edit.text(), "2.000");
    }
}
