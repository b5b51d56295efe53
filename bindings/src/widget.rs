//! Widget capabilities the binding layer relies on.
//!
//! The toolkit itself is external. A widget only has to expose callback
//! registration per [`WidgetEvent`], per-event delivery switches, and the
//! value accessors of its kind. Handles are shared (`Rc`) and mutate through
//! `&self`, the way toolkit widget handles behave.
//!
//! Callback lifetimes are scoped: [`connect`] returns a [`CallbackGuard`]
//! that removes the callback when dropped, and [`MutedEvent`] disables one
//! event for the duration of a programmatic write.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

/// Interaction events a widget can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    FocusIn,
    FocusOut,
    Pressed,
    Released,
    Changed,
}

/// Opaque handle identifying one registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub u64);

/// A widget event callback.
pub type WidgetCallback = Rc<dyn Fn()>;

/// Event source shared by every widget kind.
pub trait Widget {
    fn add_callback(&self, event: WidgetEvent, callback: WidgetCallback) -> CallbackId;
    fn remove_callback(&self, event: WidgetEvent, id: CallbackId);

    /// Enables or disables delivery of `event` to every callback.
    fn set_callback_enabled(&self, event: WidgetEvent, enabled: bool);
    fn is_callback_enabled(&self, event: WidgetEvent) -> bool;
}

/// Single-line text entry.
pub trait EditLineWidget: Widget {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    fn is_focused(&self) -> bool;
    fn remove_focus(&self);
}

/// Integer slider with a fixed range.
pub trait SliderWidget: Widget {
    fn value(&self) -> i32;
    fn set_value(&self, value: i32);
    fn min_value(&self) -> i32;
    fn max_value(&self) -> i32;
}

/// Two-state toggle.
pub trait CheckBoxWidget: Widget {
    fn is_checked(&self) -> bool;
    fn set_checked(&self, checked: bool);
}

/// Read-only text display.
pub trait LabelWidget {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

/// Widget kinds known to the binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    EditLine,
    Slider,
    CheckBox,
    Label,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EditLine => "edit line",
            Self::Slider => "slider",
            Self::CheckBox => "check box",
            Self::Label => "label",
        };
        f.write_str(name)
    }
}

/// A widget handle of any supported kind, as passed to
/// [`Binding::attach`](crate::Binding::attach).
#[derive(Clone)]
pub enum WidgetRef {
    EditLine(Rc<dyn EditLineWidget>),
    Slider(Rc<dyn SliderWidget>),
    CheckBox(Rc<dyn CheckBoxWidget>),
    Label(Rc<dyn LabelWidget>),
}

impl WidgetRef {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::EditLine(_) => WidgetKind::EditLine,
            Self::Slider(_) => WidgetKind::Slider,
            Self::CheckBox(_) => WidgetKind::CheckBox,
            Self::Label(_) => WidgetKind::Label,
        }
    }

    fn address(&self) -> *const () {
        match self {
            Self::EditLine(w) => Rc::as_ptr(w) as *const (),
            Self::Slider(w) => Rc::as_ptr(w) as *const (),
            Self::CheckBox(w) => Rc::as_ptr(w) as *const (),
            Self::Label(w) => Rc::as_ptr(w) as *const (),
        }
    }

    /// Returns `true` if both handles point at the same widget.
    pub fn same_widget(&self, other: &WidgetRef) -> bool {
        self.address() == other.address()
    }
}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetRef")
            .field(&self.kind())
            .field(&self.address())
            .finish()
    }
}

impl From<Rc<dyn EditLineWidget>> for WidgetRef {
    fn from(widget: Rc<dyn EditLineWidget>) -> Self {
        Self::EditLine(widget)
    }
}

impl From<Rc<dyn SliderWidget>> for WidgetRef {
    fn from(widget: Rc<dyn SliderWidget>) -> Self {
        Self::Slider(widget)
    }
}

impl From<Rc<dyn CheckBoxWidget>> for WidgetRef {
    fn from(widget: Rc<dyn CheckBoxWidget>) -> Self {
        Self::CheckBox(widget)
    }
}

impl From<Rc<dyn LabelWidget>> for WidgetRef {
    fn from(widget: Rc<dyn LabelWidget>) -> Self {
        Self::Label(widget)
    }
}

/// Removes its callback from the widget when dropped.
///
/// If the widget is already gone there is nothing to remove.
#[must_use = "dropping the guard unregisters the callback"]
pub struct CallbackGuard {
    remove: Option<Box<dyn FnOnce()>>,
}

impl CallbackGuard {
    /// Forgets the registration without removing the callback.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for CallbackGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackGuard")
            .field("armed", &self.remove.is_some())
            .finish()
    }
}

/// Registers `callback` for `event` and returns the guard owning the
/// registration.
pub fn connect<W>(
    widget: &Rc<W>,
    event: WidgetEvent,
    callback: impl Fn() + 'static,
) -> CallbackGuard
where
    W: Widget + ?Sized + 'static,
{
    let id = widget.add_callback(event, Rc::new(callback));
    let weak: Weak<W> = Rc::downgrade(widget);
    CallbackGuard {
        remove: Some(Box::new(move || {
            if let Some(widget) = weak.upgrade() {
                widget.remove_callback(event, id);
            }
        })),
    }
}

/// Disables delivery of one event until dropped, then restores the previous
/// state.
pub struct MutedEvent<'a, W: Widget + ?Sized> {
    widget: &'a W,
    event: WidgetEvent,
    was_enabled: bool,
}

impl<'a, W: Widget + ?Sized> MutedEvent<'a, W> {
    pub fn new(widget: &'a W, event: WidgetEvent) -> Self {
        let was_enabled = widget.is_callback_enabled(event);
        widget.set_callback_enabled(event, false);
        Self {
            widget,
            event,
            was_enabled,
        }
    }
}

impl<W: Widget + ?Sized> Drop for MutedEvent<'_, W> {
    fn drop(&mut self) {
        self.widget.set_callback_enabled(self.event, self.was_enabled);
    }
}

/// Callback bookkeeping for widget implementations.
///
/// [`fire`](Self::fire) snapshots the callbacks before invoking them, so a
/// callback may register, remove or fire other callbacks on the same widget.
#[derive(Default)]
pub struct CallbackRegistry {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(WidgetEvent, CallbackId, WidgetCallback)>>,
    disabled: RefCell<HashSet<WidgetEvent>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, event: WidgetEvent, callback: WidgetCallback) -> CallbackId {
        let id = CallbackId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.callbacks.borrow_mut().push((event, id, callback));
        id
    }

    pub fn remove(&self, event: WidgetEvent, id: CallbackId) {
        self.callbacks
            .borrow_mut()
            .retain(|(e, i, _)| !(*e == event && *i == id));
    }

    pub fn set_enabled(&self, event: WidgetEvent, enabled: bool) {
        let mut disabled = self.disabled.borrow_mut();
        if enabled {
            disabled.remove(&event);
        } else {
            disabled.insert(event);
        }
    }

    pub fn is_enabled(&self, event: WidgetEvent) -> bool {
        !self.disabled.borrow().contains(&event)
    }

    /// Invokes every callback registered for `event`, in registration order,
    /// unless delivery of `event` is disabled.
    pub fn fire(&self, event: WidgetEvent) {
        if !self.is_enabled(event) {
            return;
        }
        let callbacks: Vec<WidgetCallback> = self
            .callbacks
            .borrow()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Number of registered callbacks, across all events.
    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.borrow().is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &self.len())
            .field("disabled", &self.disabled.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Button {
        callbacks: CallbackRegistry,
    }

    impl Widget for Button {
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

    #[test]
    fn guard_removes_callback_on_drop() {
        let button = Rc::new(Button::default());
        let hits = Rc::new(Cell::new(0));

        let guard = {
            let hits = hits.clone();
            connect(&button, WidgetEvent::Pressed, move || hits.set(hits.get() + 1))
        };
        button.callbacks.fire(WidgetEvent::Pressed);
        assert_eq!(hits.get(), 1);

        drop(guard);
        assert!(button.callbacks.is_empty());
        button.callbacks.fire(WidgetEvent::Pressed);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn guard_outliving_widget_is_harmless() {
        let button = Rc::new(Button::default());
        let guard = connect(&button, WidgetEvent::Changed, || {});
        drop(button);
        drop(guard);
    }

    #[test]
    fn detached_guard_keeps_callback() {
        let button = Rc::new(Button::default());
        connect(&button, WidgetEvent::Changed, || {}).detach();
        assert_eq!(button.callbacks.len(), 1);
    }

    #[test]
    fn fire_only_matching_event() {
        let button = Rc::new(Button::default());
        let pressed = Rc::new(Cell::new(0));
        let _guard = {
            let pressed = pressed.clone();
            connect(&button, WidgetEvent::Pressed, move || pressed.set(pressed.get() + 1))
        };
        button.callbacks.fire(WidgetEvent::Released);
        assert_eq!(pressed.get(), 0);
    }

    #[test]
    fn muted_event_restores_previous_state() {
        let button = Button::default();
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            button
                .callbacks
                .add(WidgetEvent::Changed, Rc::new(move || hits.set(hits.get() + 1)));
        }

        {
            let _mute = MutedEvent::new(&button, WidgetEvent::Changed);
            button.callbacks.fire(WidgetEvent::Changed);
        }
        assert_eq!(hits.get(), 0);
        assert!(button.is_callback_enabled(WidgetEvent::Changed));

        button.set_callback_enabled(WidgetEvent::Changed, false);
        {
            let _mute = MutedEvent::new(&button, WidgetEvent::Changed);
        }
        assert!(!button.is_callback_enabled(WidgetEvent::Changed));
    }

    #[test]
    fn callbacks_may_remove_themselves_while_firing() {
        let button = Rc::new(Button::default());
        let slot: Rc<RefCell<Option<CallbackGuard>>> = Rc::new(RefCell::new(None));
        let guard = {
            let slot = slot.clone();
            connect(&button, WidgetEvent::Pressed, move || {
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(guard);

        button.callbacks.fire(WidgetEvent::Pressed);
        assert!(button.callbacks.is_empty());
    }
}
