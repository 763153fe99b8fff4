#![forbid(unsafe_code)]

//! Canonical pointer events and window-level subscription plumbing.
//!
//! The host (browser glue, test harness) normalizes mouse and touch input
//! into [`PointerEvent`] values before handing them to panels and tab
//! handles. Coordinates are client (viewport) CSS pixels.
//!
//! # Design Notes
//!
//! - Touch input is folded into the same event type; [`PointerSource`]
//!   records where it came from so hosts can pick the right native event.
//! - Window-level move/up listeners are not bound here. Components ask an
//!   [`EventBinder`] for them and keep the returned [`SubscriptionId`]s.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Point;

/// A pointer event delivered to a panel or tab handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Client X coordinate.
    pub x: f64,
    /// Client Y coordinate.
    pub y: f64,
    /// Button that triggered the event (`Primary` for moves).
    pub button: PointerButton,
    /// Mouse or touch.
    pub source: PointerSource,
}

impl PointerEvent {
    /// Create a primary-button mouse event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            button: PointerButton::Primary,
            source: PointerSource::Mouse,
        }
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Mark the event as coming from a touch surface.
    #[must_use]
    pub const fn touch(mut self) -> Self {
        self.source = PointerSource::Touch;
        self
    }

    /// Event position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True for the secondary (right) button.
    #[must_use]
    pub const fn is_secondary(&self) -> bool {
        matches!(self.button, PointerButton::Secondary)
    }
}

/// Kinds of pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// `mousedown` / `touchstart`.
    Down,
    /// `mousemove` / `touchmove`.
    Move,
    /// `mouseup` / `touchend`.
    Up,
    /// `click`.
    Click,
    /// `dblclick`.
    DoubleClick,
    /// `auxclick` (middle button).
    AuxClick,
    /// `contextmenu`.
    ContextMenu,
}

/// Pointer buttons, numbered like `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Button 0, usually left.
    #[default]
    Primary,
    /// Button 1, usually the wheel.
    Auxiliary,
    /// Button 2, usually right.
    Secondary,
}

/// Where the pointer event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Opaque identifier for a host element (used for composed-path hit tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Allocate an id for an element created by this crate's consumers.
    ///
    /// Fresh ids count down from `u64::MAX` so they never collide with ids a
    /// host assigns from zero upward.
    #[must_use]
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(u64::MAX);
        Self(NEXT.fetch_sub(1, Ordering::Relaxed))
    }
}

/// Target of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The global window.
    Window,
    /// A specific element.
    Element(ElementId),
}

/// Native event types a component can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEventKind {
    MouseMove,
    TouchMove,
    MouseUp,
    TouchEnd,
}

/// Options bag for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// Passive listeners cannot call `preventDefault`. Touch-move handlers
    /// must be non-passive to suppress scrolling during a drag.
    ///
    /// `None` leaves the choice to the host, which may make touch and wheel
    /// listeners on the window passive.
    pub passive: Option<bool>,
}

impl ListenerOptions {
    /// Passive left unset.
    pub const DEFAULT: Self = Self { passive: None };

    /// Explicitly non-passive.
    pub const NON_PASSIVE: Self = Self {
        passive: Some(false),
    };

    /// Explicitly passive.
    pub const PASSIVE: Self = Self {
        passive: Some(true),
    };

    /// Whether the listener may call `preventDefault` for certain.
    #[must_use]
    pub const fn can_prevent_default(&self) -> bool {
        matches!(self.passive, Some(false))
    }
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Handle returned by an [`EventBinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Low-level event binding, implemented by the host.
///
/// Components never bind native listeners themselves; they request them
/// here and cancel them through the returned id.
pub trait EventBinder {
    /// Subscribe to `kind` on `target`.
    fn subscribe(
        &mut self,
        target: EventTarget,
        kind: NativeEventKind,
        options: ListenerOptions,
    ) -> SubscriptionId;

    /// Cancel a subscription. Cancelling an unknown id is a no-op.
    fn cancel(&mut self, id: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let ev = PointerEvent::new(PointerEventKind::Down, 4.0, 8.0)
            .with_button(PointerButton::Secondary)
            .touch();
        assert!(ev.is_secondary());
        assert_eq!(ev.source, PointerSource::Touch);
        assert_eq!(ev.position(), Point::new(4.0, 8.0));
    }

    #[test]
    fn fresh_element_ids_are_distinct() {
        assert_ne!(ElementId::fresh(), ElementId::fresh());
    }

    #[test]
    fn listener_option_presets_are_distinct() {
        assert_eq!(ListenerOptions::default().passive, None);
        assert_ne!(ListenerOptions::DEFAULT, ListenerOptions::NON_PASSIVE);
        assert_ne!(ListenerOptions::NON_PASSIVE, ListenerOptions::PASSIVE);
        assert!(ListenerOptions::NON_PASSIVE.can_prevent_default());
        assert!(!ListenerOptions::DEFAULT.can_prevent_default());
        assert!(!ListenerOptions::PASSIVE.can_prevent_default());
    }
}
