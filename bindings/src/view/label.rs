use std::rc::{Rc, Weak};

use crate::binding::Binding;
use crate::value::TextValue;
use crate::widget::{LabelWidget, WidgetKind, WidgetRef};

use super::{BindableValue, View, current_value};

/// Read-only display of the formatted value.
pub struct LabelView<T> {
    widget: Rc<dyn LabelWidget>,
    binding: Weak<Binding<T>>,
}

impl<T: BindableValue + TextValue> LabelView<T> {
    pub fn new(widget: Rc<dyn LabelWidget>, binding: Weak<Binding<T>>) -> Self {
        Self { widget, binding }
    }
}

impl<T: BindableValue + TextValue> View for LabelView<T> {
    fn update(&self) {
        let Some(value) = current_value(&self.binding) else {
            return;
        };
        let text = value.format_text();
        if self.widget.text() != text {
            self.widget.set_text(&text);
        }
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Label
    }

    fn is_attached_to(&self, widget: &WidgetRef) -> bool {
        WidgetRef::Label(self.widget.clone()).same_widget(widget)
    }
}
