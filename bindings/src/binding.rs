//! Bindings: one property model fanned out to any number of views.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use redlilium_core::abstract_editor::EditActionResult;

use crate::model::PropertyModel;
use crate::view::{BindableValue, View};
use crate::widget::WidgetRef;

/// Couples a [`PropertyModel`] with the views attached to it.
///
/// Bindings are always handled through `Rc`: views keep a weak reference
/// back to their binding so widget callbacks can reach it without keeping
/// it alive.
pub struct Binding<T> {
    name: String,
    model: RefCell<Box<dyn PropertyModel<T>>>,
    views: RefCell<Vec<Box<dyn View>>>,
    range: Cell<Option<(f64, f64)>>,
    this: Weak<Binding<T>>,
}

impl<T: BindableValue> Binding<T> {
    pub fn new(name: impl Into<String>, model: Box<dyn PropertyModel<T>>) -> Rc<Self> {
        let name = name.into();
        Rc::new_cyclic(|this| Self {
            name,
            model: RefCell::new(model),
            views: RefCell::new(Vec::new()),
            range: Cell::new(None),
            this: this.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> EditActionResult<T> {
        self.model.borrow().get()
    }

    /// Assigns `value` through the model and refreshes every view if the
    /// value actually changed. Returns whether it changed.
    pub fn set(&self, value: T) -> EditActionResult<bool> {
        let changed = self.model.borrow_mut().set(value)?;
        if changed {
            self.update();
        }
        Ok(changed)
    }

    pub fn is_updating(&self) -> bool {
        self.model.borrow().is_updating()
    }

    pub fn start_updating(&self) -> EditActionResult {
        if self.is_updating() {
            return Ok(());
        }
        self.model.borrow_mut().start_updating()
    }

    pub fn finish_updating(&self) -> EditActionResult {
        if !self.is_updating() {
            return Ok(());
        }
        self.model.borrow_mut().finish_updating()
    }

    /// Aborts the open session and refreshes the views with the restored
    /// value.
    pub fn cancel_updating(&self) -> EditActionResult {
        if !self.is_updating() {
            return Ok(());
        }
        self.model.borrow_mut().cancel_updating()?;
        self.update();
        Ok(())
    }

    /// Refreshes every attached view, in attachment order.
    pub fn update(&self) {
        for view in self.views.borrow().iter() {
            view.update();
        }
    }

    /// Attaches `widget` through the view adapter matching its kind.
    ///
    /// # Panics
    ///
    /// Panics if `T` cannot be edited with this kind of widget.
    pub fn attach(&self, widget: impl Into<WidgetRef>) -> &Self {
        let widget = widget.into();
        let kind = widget.kind();
        let Some(view) = T::create_view(widget, self.this.clone()) else {
            panic!(
                "binding `{}` of type {} cannot be attached to a {kind}",
                self.name,
                std::any::type_name::<T>()
            );
        };
        self.views.borrow_mut().push(view);
        log::debug!("{}: attached {kind}", self.name);
        self
    }

    /// Detaches the view driving `widget`, unregistering its callbacks.
    /// Returns `false` if the widget was not attached.
    pub fn detach(&self, widget: &WidgetRef) -> bool {
        let removed = {
            let mut views = self.views.borrow_mut();
            let index = views.iter().position(|v| v.is_attached_to(widget));
            index.map(|i| views.remove(i))
        };
        match removed {
            Some(view) => {
                log::debug!("{}: detached {}", self.name, view.kind());
                true
            }
            None => false,
        }
    }

    pub fn detach_all(&self) {
        let views = std::mem::take(&mut *self.views.borrow_mut());
        drop(views);
    }

    pub fn view_count(&self) -> usize {
        self.views.borrow().len()
    }

    /// Sets the logical range slider positions are mapped onto.
    pub fn set_range(&self, min: f64, max: f64) -> &Self {
        self.range.set(Some((min, max)));
        self
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        self.range.get()
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("views", &self.views.borrow().len())
            .field("range", &self.range.get())
            .finish_non_exhaustive()
    }
}

/// Type-erased binding, as stored by the [`Binder`](crate::Binder).
pub trait AnyBinding {
    fn name(&self) -> &str;
    fn update(&self);
    fn attach(&self, widget: WidgetRef);
    fn view_count(&self) -> usize;
}

impl<T: BindableValue> AnyBinding for Binding<T> {
    fn name(&self) -> &str {
        Binding::name(self)
    }

    fn update(&self) {
        Binding::update(self);
    }

    fn attach(&self, widget: WidgetRef) {
        Binding::attach(self, widget);
    }

    fn view_count(&self) -> usize {
        Binding::view_count(self)
    }
}
