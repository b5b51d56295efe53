//! # RedLilium Bindings
//!
//! Connects editable properties of arbitrary objects to editor widgets,
//! with every change going through the undo history of
//! [`redlilium_core::abstract_editor`].
//!
//! A [`Binder`] creates one [`Binding`] per property. Each binding owns an
//! [`UndoRedoModel`] and any number of views, one per attached widget.
//! Widget events flow into the binding (`set`, `start_updating`,
//! `finish_updating`, `cancel_updating`); the model turns them into
//! [`PropertyTransaction`]s on the shared history; [`Binder::update`] pulls
//! the current values back into every widget once per frame.
//!
//! Interactive gestures (typing while focused, dragging a slider) are
//! recorded as a single undo step. Programmatic refreshes never feed back
//! into the model.

pub mod binder;
pub mod binding;
pub mod headless;
pub mod instance;
pub mod model;
pub mod transaction;
pub mod value;
pub mod view;
pub mod widget;

pub use binder::Binder;
pub use binding::{AnyBinding, Binding};
pub use instance::{InstanceAccessor, InstanceRef, InstanceSlot};
pub use model::{PropertyModel, SharedHistory, UndoRedoModel};
pub use transaction::{Getter, PropertyTransaction, Setter};
pub use value::{PropertyValue, SliderValue, TextValue};
pub use view::{BindableValue, View};
pub use widget::{WidgetEvent, WidgetKind, WidgetRef};
