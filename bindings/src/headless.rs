//! In-memory widget backend.
//!
//! These widgets have no display. They keep their state in cells and raise
//! events the way a real toolkit does: programmatic writes fire `Changed`
//! whenever the value actually changes, unless delivery is disabled. User
//! interaction is simulated through [`HeadlessEditLine::type_text`],
//! [`HeadlessSlider::drag_to`], [`HeadlessCheckBox::click`] and friends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::widget::{
    CallbackId, CallbackRegistry, CheckBoxWidget, EditLineWidget, LabelWidget, SliderWidget,
    Widget, WidgetCallback, WidgetEvent, WidgetRef,
};

macro_rules! headless_widget {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl Widget for $ty {
                fn add_callback(&self, event: WidgetEvent, callback: WidgetCallback) -> CallbackId {
                    self.callbacks.add(event, callback)
                }

                fn remove_callback(&self, event: WidgetEvent, id: CallbackId) {
                    self.callbacks.remove(event, id);
                }

                fn set_callback_enabled(&self, event: WidgetEvent, enabled: bool) {
                    self.callbacks.set_enabled(event, enabled);
                }

                fn is_callback_enabled(&self, event: WidgetEvent) -> bool {
                    self.callbacks.is_enabled(event)
                }
            }

            impl $ty {
                /// Number of callbacks currently registered on this widget.
                pub fn callback_count(&self) -> usize {
                    self.callbacks.len()
                }
            }

            impl From<Rc<$ty>> for WidgetRef {
                fn from(widget: Rc<$ty>) -> Self {
                    WidgetRef::$variant(widget)
                }
            }
        )*
    };
}

headless_widget!(
    HeadlessEditLine => EditLine,
    HeadlessSlider => Slider,
    HeadlessCheckBox => CheckBox,
);

/// Text field.
#[derive(Debug, Default)]
pub struct HeadlessEditLine {
    callbacks: CallbackRegistry,
    text: RefCell<String>,
    focused: Cell<bool>,
}

impl HeadlessEditLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives the field input focus.
    pub fn focus(&self) {
        if !self.focused.replace(true) {
            self.callbacks.fire(WidgetEvent::FocusIn);
        }
    }

    /// Replaces the content the way a user would: the field is cleared,
    /// then `text` is entered one character at a time.
    pub fn type_text(&self, text: &str) {
        let mut typed = String::with_capacity(text.len());
        self.set_text("");
        for ch in text.chars() {
            typed.push(ch);
            self.set_text(&typed);
        }
    }

    /// Simulates Enter.
    pub fn press(&self) {
        self.callbacks.fire(WidgetEvent::Pressed);
    }
}

impl EditLineWidget for HeadlessEditLine {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        if *self.text.borrow() == text {
            return;
        }
        self.text.replace(text.to_owned());
        self.callbacks.fire(WidgetEvent::Changed);
    }

    fn is_focused(&self) -> bool {
        self.focused.get()
    }

    fn remove_focus(&self) {
        if self.focused.replace(false) {
            self.callbacks.fire(WidgetEvent::FocusOut);
        }
    }
}

/// Integer slider over `[min, max]`.
#[derive(Debug)]
pub struct HeadlessSlider {
    callbacks: CallbackRegistry,
    value: Cell<i32>,
    min: i32,
    max: i32,
}

impl HeadlessSlider {
    /// Creates a slider positioned at `min`. The bounds are swapped if
    /// given in the wrong order.
    pub fn new(min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            callbacks: CallbackRegistry::new(),
            value: Cell::new(min),
            min,
            max,
        }
    }

    /// Grabs the handle.
    pub fn press(&self) {
        self.callbacks.fire(WidgetEvent::Pressed);
    }

    /// Moves the handle to `position`, clamped to the slider range.
    pub fn drag_to(&self, position: i32) {
        self.set_value(position);
    }

    /// Lets go of the handle.
    pub fn release(&self) {
        self.callbacks.fire(WidgetEvent::Released);
    }
}

impl SliderWidget for HeadlessSlider {
    fn value(&self) -> i32 {
        self.value.get()
    }

    fn set_value(&self, value: i32) {
        let value = value.clamp(self.min, self.max);
        if self.value.replace(value) != value {
            self.callbacks.fire(WidgetEvent::Changed);
        }
    }

    fn min_value(&self) -> i32 {
        self.min
    }

    fn max_value(&self) -> i32 {
        self.max
    }
}

/// Two-state toggle, initially unchecked.
#[derive(Debug, Default)]
pub struct HeadlessCheckBox {
    callbacks: CallbackRegistry,
    checked: Cell<bool>,
}

impl HeadlessCheckBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click(&self) {
        self.set_checked(!self.checked.get());
    }
}

impl CheckBoxWidget for HeadlessCheckBox {
    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn set_checked(&self, checked: bool) {
        if self.checked.replace(checked) != checked {
            self.callbacks.fire(WidgetEvent::Changed);
        }
    }
}

/// Read-only text.
#[derive(Debug, Default)]
pub struct HeadlessLabel {
    text: RefCell<String>,
}

impl HeadlessLabel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelWidget for HeadlessLabel {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        self.text.replace(text.to_owned());
    }
}

impl From<Rc<HeadlessLabel>> for WidgetRef {
    fn from(widget: Rc<HeadlessLabel>) -> Self {
        WidgetRef::Label(widget)
    }
}
