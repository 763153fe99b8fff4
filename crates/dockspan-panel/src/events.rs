#![forbid(unsafe_code)]

//! Listener traits for panels and tab handles.
//!
//! Both traits extend [`Listener`]: a listener declares the slots it
//! implements and the registry only calls those. The default method bodies
//! are never reached through dispatch for undeclared slots.

use dockspan_core::geometry::Rect;
use dockspan_core::gesture::TabMoveDirection;
use dockspan_core::listener::Listener;

use crate::host::PanelId;

/// Payload for panel notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent {
    pub source: PanelId,
    /// For the button slots, `true` means hidden. For the dock slot, `true`
    /// means undocking is enabled.
    pub state: bool,
}

/// Observer of a panel's capability and button-visibility changes.
pub trait PanelListener: Listener {
    fn on_dock_enabled(&self, event: PanelEvent) {
        let _ = event;
    }

    fn on_hide_close_button(&self, event: PanelEvent) {
        let _ = event;
    }

    fn on_hide_maximize_button(&self, event: PanelEvent) {
        let _ = event;
    }
}

/// Payload for move-tab notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveTabEvent {
    /// Panel whose tab is being dragged.
    pub source: PanelId,
    pub state: TabMoveDirection,
    /// Tab bounds when the crossing happened.
    pub rect: Rect,
}

/// Observer of tab reordering requests.
pub trait TabHandleListener: Listener {
    fn on_move_tab(&self, event: MoveTabEvent);
}
