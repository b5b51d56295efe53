use std::rc::{Rc, Weak};

use crate::binding::Binding;
use crate::widget::{
    CallbackGuard, CheckBoxWidget, MutedEvent, WidgetEvent, WidgetKind, WidgetRef, connect,
};

use super::{View, current_value, with_binding};

/// Check box adapter. Every toggle is an atomic edit.
pub struct CheckBoxView<T> {
    widget: Rc<dyn CheckBoxWidget>,
    binding: Weak<Binding<T>>,
    _changed: CallbackGuard,
}

impl CheckBoxView<bool> {
    pub fn new(widget: Rc<dyn CheckBoxWidget>, binding: Weak<Binding<bool>>) -> Self {
        let changed = {
            let binding = binding.clone();
            let widget_weak = Rc::downgrade(&widget);
            connect(&widget, WidgetEvent::Changed, move || {
                let Some(widget) = widget_weak.upgrade() else {
                    return;
                };
                let checked = widget.is_checked();
                with_binding(&binding, "toggle", |b| b.set(checked).map(|_| ()));
            })
        };

        Self {
            widget,
            binding,
            _changed: changed,
        }
    }
}

impl View for CheckBoxView<bool> {
    fn update(&self) {
        let Some(value) = current_value(&self.binding) else {
            return;
        };
        if self.widget.is_checked() == value {
            return;
        }

        let _mute = MutedEvent::new(&*self.widget, WidgetEvent::Changed);
        self.widget.set_checked(value);
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::CheckBox
    }

    fn is_attached_to(&self, widget: &WidgetRef) -> bool {
        WidgetRef::CheckBox(self.widget.clone()).same_widget(widget)
    }
}
