//! Lazily resolved owning instances.
//!
//! The object whose property is edited may not exist when a binding is
//! created, and the host may replace it at any time. Bindings therefore never
//! cache it: every operation goes through an [`InstanceAccessor`].

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Shared handle to an edited object.
pub type InstanceRef<I> = Rc<RefCell<I>>;

/// A host-owned slot the instance can be installed into later.
pub type InstanceSlot<I> = Rc<RefCell<Option<InstanceRef<I>>>>;

/// Zero-argument function returning the current instance, if any.
pub struct InstanceAccessor<I> {
    resolve: Rc<dyn Fn() -> Option<InstanceRef<I>>>,
}

impl<I: 'static> InstanceAccessor<I> {
    /// Wraps an arbitrary resolver closure.
    pub fn new(resolve: impl Fn() -> Option<InstanceRef<I>> + 'static) -> Self {
        Self {
            resolve: Rc::new(resolve),
        }
    }

    /// Resolves to `instance` for as long as someone else keeps it alive.
    pub fn from_instance(instance: &InstanceRef<I>) -> Self {
        let weak: Weak<RefCell<I>> = Rc::downgrade(instance);
        Self::new(move || weak.upgrade())
    }

    /// Resolves to whatever the slot currently holds.
    pub fn from_slot(slot: InstanceSlot<I>) -> Self {
        Self::new(move || slot.borrow().clone())
    }

    /// Invokes the resolver.
    pub fn resolve(&self) -> Option<InstanceRef<I>> {
        (self.resolve)()
    }
}

impl<I> Clone for InstanceAccessor<I> {
    fn clone(&self) -> Self {
        Self {
            resolve: Rc::clone(&self.resolve),
        }
    }
}

impl<I> fmt::Debug for InstanceAccessor<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceAccessor").finish_non_exhaustive()
    }
}
