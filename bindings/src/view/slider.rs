use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::binding::Binding;
use crate::value::{SliderValue, remap};
use crate::widget::{
    CallbackGuard, MutedEvent, SliderWidget, WidgetEvent, WidgetKind, WidgetRef, connect,
};

use super::{BindableValue, View, current_value, with_binding};

/// Slider adapter.
///
/// Pressing the handle opens an edit session and releasing it commits, so
/// a whole drag is one undo step while every intermediate position is
/// applied live. Raw slider positions are remapped from the widget range
/// to the binding's logical range; without a logical range the widget
/// range is used as is.
pub struct SliderView<T> {
    widget: Rc<dyn SliderWidget>,
    binding: Weak<Binding<T>>,
    dragging: Rc<Cell<bool>>,
    _callbacks: Vec<CallbackGuard>,
}

fn widget_range(widget: &dyn SliderWidget) -> (f64, f64) {
    (widget.min_value() as f64, widget.max_value() as f64)
}

impl<T: BindableValue + SliderValue> SliderView<T> {
    pub fn new(widget: Rc<dyn SliderWidget>, binding: Weak<Binding<T>>) -> Self {
        let dragging = Rc::new(Cell::new(false));

        let pressed = {
            let binding = binding.clone();
            let dragging = dragging.clone();
            connect(&widget, WidgetEvent::Pressed, move || {
                dragging.set(true);
                with_binding(&binding, "start dragging", |b| b.start_updating());
            })
        };

        let released = {
            let binding = binding.clone();
            let dragging = dragging.clone();
            connect(&widget, WidgetEvent::Released, move || {
                with_binding(&binding, "finish dragging", |b| b.finish_updating());
                dragging.set(false);
            })
        };

        let changed = {
            let binding = binding.clone();
            let widget_weak = Rc::downgrade(&widget);
            connect(&widget, WidgetEvent::Changed, move || {
                let Some(widget) = widget_weak.upgrade() else {
                    return;
                };
                with_binding(&binding, "set", |b| {
                    let (min, max) = widget_range(&*widget);
                    let (lo, hi) = b.range().unwrap_or((min, max));
                    let value = remap(min, max, lo, hi, widget.value() as f64);
                    b.set(T::from_f64(value)).map(|_| ())
                });
            })
        };

        Self {
            widget,
            binding,
            dragging,
            _callbacks: vec![pressed, released, changed],
        }
    }

    fn position_of(&self, value: &T, range: Option<(f64, f64)>) -> i32 {
        let (min, max) = widget_range(&*self.widget);
        let (lo, hi) = range.unwrap_or((min, max));
        let position = remap(lo, hi, min, max, value.to_f64()).round();
        position.max(min.min(max)).min(min.max(max)) as i32
    }
}

impl<T: BindableValue + SliderValue> View for SliderView<T> {
    fn update(&self) {
        if self.dragging.get() {
            return;
        }
        let Some(binding) = self.binding.upgrade() else {
            return;
        };
        let Some(value) = current_value(&self.binding) else {
            return;
        };
        let position = self.position_of(&value, binding.range());
        if position == self.widget.value() {
            return;
        }

        let _mute = MutedEvent::new(&*self.widget, WidgetEvent::Changed);
        self.widget.set_value(position);
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Slider
    }

    fn is_attached_to(&self, widget: &WidgetRef) -> bool {
        WidgetRef::Slider(self.widget.clone()).same_widget(widget)
    }
}
