use std::rc::{Rc, Weak};

use crate::binding::Binding;
use crate::value::TextValue;
use crate::widget::{
    CallbackGuard, EditLineWidget, MutedEvent, WidgetEvent, WidgetKind, WidgetRef, connect,
};

use super::{BindableValue, View, current_value, with_binding};

/// Text field adapter.
///
/// Focus opens an edit session and losing focus commits it, so everything
/// typed while focused becomes one undo step. Pressing the field (Enter)
/// drops focus, which commits. Text that does not parse is ignored.
pub struct EditLineView<T> {
    widget: Rc<dyn EditLineWidget>,
    binding: Weak<Binding<T>>,
    _callbacks: Vec<CallbackGuard>,
}

impl<T: BindableValue + TextValue> EditLineView<T> {
    pub fn new(widget: Rc<dyn EditLineWidget>, binding: Weak<Binding<T>>) -> Self {
        let focus_in = {
            let binding = binding.clone();
            connect(&widget, WidgetEvent::FocusIn, move || {
                with_binding(&binding, "start editing", |b| b.start_updating());
            })
        };

        let pressed = {
            let widget_weak = Rc::downgrade(&widget);
            connect(&widget, WidgetEvent::Pressed, move || {
                if let Some(widget) = widget_weak.upgrade() {
                    widget.remove_focus();
                }
            })
        };

        let focus_out = {
            let binding = binding.clone();
            connect(&widget, WidgetEvent::FocusOut, move || {
                with_binding(&binding, "finish editing", |b| b.finish_updating());
            })
        };

        let changed = {
            let binding = binding.clone();
            let widget_weak = Rc::downgrade(&widget);
            connect(&widget, WidgetEvent::Changed, move || {
                let Some(widget) = widget_weak.upgrade() else {
                    return;
                };
                let text = widget.text();
                match T::parse_text(&text) {
                    Some(value) => with_binding(&binding, "set", |b| b.set(value).map(|_| ())),
                    None => log::trace!("ignoring unparseable input {text:?}"),
                }
            })
        };

        Self {
            widget,
            binding,
            _callbacks: vec![focus_in, pressed, focus_out, changed],
        }
    }
}

impl<T: BindableValue + TextValue> View for EditLineView<T> {
    fn update(&self) {
        if self.widget.is_focused() {
            return;
        }
        let Some(value) = current_value(&self.binding) else {
            return;
        };
        let text = value.format_text();
        if self.widget.text() == text {
            return;
        }

        let _mute = MutedEvent::new(&*self.widget, WidgetEvent::Changed);
        self.widget.set_text(&text);
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::EditLine
    }

    fn is_attached_to(&self, widget: &WidgetRef) -> bool {
        WidgetRef::EditLine(self.widget.clone()).same_widget(widget)
    }
}
