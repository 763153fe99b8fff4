#![forbid(unsafe_code)]

//! Ordered observer fan-out with capability slots.
//!
//! A [`ListenerRegistry`] holds listeners in insertion order. Each listener
//! declares the callback slots it implements through [`Listener::slots`];
//! [`ListenerRegistry::dispatch`] only invokes listeners whose declared set
//! contains the slot being fired.
//!
//! # Invariants
//!
//! 1. Notification order equals insertion order.
//! 2. Duplicates are permitted: adding the same listener twice notifies it twice.
//! 3. `remove` drops the first occurrence only, matched by allocation identity.
//! 4. The registry is never mutated while it is being iterated; dispatch
//!    borrows it immutably for the whole fan-out.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

bitflags! {
    /// Named callback slots a listener can implement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListenerSlots: u8 {
        /// Undock capability changed.
        const DOCK_ENABLED         = 0b0001;
        /// Close button visibility changed.
        const HIDE_CLOSE_BUTTON    = 0b0010;
        /// Maximize button visibility changed.
        const HIDE_MAXIMIZE_BUTTON = 0b0100;
        /// A dragged tab pushed past a neighbouring slot.
        const MOVE_TAB             = 0b1000;
    }
}

/// Capability declaration shared by every listener trait.
pub trait Listener {
    /// Slots this listener wants to receive.
    fn slots(&self) -> ListenerSlots;
}

/// Ordered collection of listeners.
pub struct ListenerRegistry<L: ?Sized> {
    listeners: Vec<Rc<L>>,
}

impl<L: ?Sized> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<L: ?Sized> fmt::Debug for ListenerRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.listeners.len())
            .finish()
    }
}

impl<L: ?Sized + Listener> ListenerRegistry<L> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn add(&mut self, listener: Rc<L>) {
        self.listeners.push(listener);
    }

    /// Remove the first occurrence of `listener`.
    ///
    /// Returns `false` when the listener was not registered; the registry is
    /// left untouched in that case.
    pub fn remove(&mut self, listener: &Rc<L>) -> bool {
        let Some(index) = self
            .listeners
            .iter()
            .position(|l| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)))
        else {
            return false;
        };
        self.listeners.remove(index);
        true
    }

    /// Whether `listener` is registered at least once.
    #[must_use]
    pub fn contains(&self, listener: &Rc<L>) -> bool {
        self.listeners
            .iter()
            .any(|l| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)))
    }

    /// Number of registered listeners (duplicates counted).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke `f` on every listener implementing `slot`, in insertion order.
    ///
    /// Returns how many listeners were invoked.
    pub fn dispatch(&self, slot: ListenerSlots, mut f: impl FnMut(&L)) -> usize {
        let mut invoked = 0;
        for listener in &self.listeners {
            if listener.slots().contains(slot) {
                f(listener);
                invoked += 1;
            }
        }
        invoked
    }
}
