//! View adapters between one widget and one [`Binding`].
//!
//! Every adapter follows the same two rules:
//!
//! - a refresh writes the widget with its own `Changed` event muted, so a
//!   value pushed from the model never comes back as a user edit;
//! - a refresh is skipped entirely while the user is interacting with the
//!   widget (focused text field, slider being dragged).
//!
//! Which adapters a value type supports is decided by its
//! [`BindableValue`] implementation.

mod check_box;
mod edit_line;
mod label;
mod slider;

use std::rc::Weak;

use redlilium_core::abstract_editor::EditActionResult;

use crate::binding::Binding;
use crate::value::{PropertyValue, SliderValue, TextValue};
use crate::widget::{WidgetKind, WidgetRef};

pub use check_box::CheckBoxView;
pub use edit_line::EditLineView;
pub use label::LabelView;
pub use slider::SliderView;

/// One attached widget, refreshed from its binding on demand.
pub trait View {
    /// Pulls the binding's current value into the widget.
    fn update(&self);

    fn kind(&self) -> WidgetKind;

    /// Returns `true` if this view drives `widget`.
    fn is_attached_to(&self, widget: &WidgetRef) -> bool;
}

/// A property type together with the widget kinds it can be attached to.
pub trait BindableValue: PropertyValue {
    /// Builds the adapter for `widget`, or returns `None` when this value
    /// type cannot be edited with that kind of widget.
    fn create_view(widget: WidgetRef, binding: Weak<Binding<Self>>) -> Option<Box<dyn View>>;
}

fn numeric_view<T>(widget: WidgetRef, binding: Weak<Binding<T>>) -> Option<Box<dyn View>>
where
    T: BindableValue + TextValue + SliderValue,
{
    match widget {
        WidgetRef::EditLine(w) => Some(Box::new(EditLineView::new(w, binding))),
        WidgetRef::Slider(w) => Some(Box::new(SliderView::new(w, binding))),
        WidgetRef::Label(w) => Some(Box::new(LabelView::new(w, binding))),
        WidgetRef::CheckBox(_) => None,
    }
}

impl BindableValue for f32 {
    fn create_view(widget: WidgetRef, binding: Weak<Binding<Self>>) -> Option<Box<dyn View>> {
        numeric_view(widget, binding)
    }
}

impl BindableValue for f64 {
    fn create_view(widget: WidgetRef, binding: Weak<Binding<Self>>) -> Option<Box<dyn View>> {
        numeric_view(widget, binding)
    }
}

impl BindableValue for i32 {
    fn create_view(widget: WidgetRef, binding: Weak<Binding<Self>>) -> Option<Box<dyn View>> {
        numeric_view(widget, binding)
    }
}

impl BindableValue for bool {
    fn create_view(widget: WidgetRef, binding: Weak<Binding<Self>>) -> Option<Box<dyn View>> {
        match widget {
            WidgetRef::CheckBox(w) => Some(Box::new(CheckBoxView::new(w, binding))),
            WidgetRef::Label(w) => Some(Box::new(LabelView::new(w, binding))),
            WidgetRef::EditLine(_) | WidgetRef::Slider(_) => None,
        }
    }
}

impl BindableValue for String {
    fn create_view(widget: WidgetRef, binding: Weak<Binding<Self>>) -> Option<Box<dyn View>> {
        match widget {
            WidgetRef::EditLine(w) => Some(Box::new(EditLineView::new(w, binding))),
            WidgetRef::Label(w) => Some(Box::new(LabelView::new(w, binding))),
            WidgetRef::Slider(_) | WidgetRef::CheckBox(_) => None,
        }
    }
}

/// Runs a binding call from inside a widget callback.
///
/// Callbacks have nobody to return an error to, so failures are logged and
/// absorbed. A binding that is already gone is silently ignored.
fn with_binding<T: BindableValue>(
    binding: &Weak<Binding<T>>,
    what: &str,
    call: impl FnOnce(&Binding<T>) -> EditActionResult,
) {
    let Some(binding) = binding.upgrade() else {
        return;
    };
    if let Err(e) = call(&binding) {
        log::warn!("{}: {what} failed: {e}", binding.name());
    }
}

/// Reads the value a refresh should display, or `None` when there is
/// nothing to show.
fn current_value<T: BindableValue>(binding: &Weak<Binding<T>>) -> Option<T> {
    let binding = binding.upgrade()?;
    match binding.get() {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("{}: skipping refresh: {e}", binding.name());
            None
        }
    }
}
