#![forbid(unsafe_code)]

//! Collaborator seams.
//!
//! A panel owns no layout math and no window chrome. Everything that touches
//! the dock tree, the dock manager, the tab strip or a floating dialog goes
//! through the traits in this module. Collaborators are handed to each
//! operation as a `&mut dyn DockHost` argument and never hold a reference
//! back into a panel; the tree reports position changes by calling
//! [`Panel::on_panel_dock`](crate::Panel::on_panel_dock).

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dockspan_core::event::PointerEvent;
use dockspan_core::geometry::{Point, Size};

use crate::panel::Panel;

static NEXT_PANEL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a panel, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    /// Allocate the next identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_PANEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel_{}", self.0)
    }
}

/// Opaque handle to a node in the dock tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DockNodeId(pub u64);

/// What a panel hosts. Only documents get the tab context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    any(feature = "config", feature = "state-persistence"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(
    any(feature = "config", feature = "state-persistence"),
    serde(rename_all = "lowercase")
)]
pub enum PanelType {
    #[default]
    Panel,
    Document,
}

/// Kind of container a tab page hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerType {
    /// A plain panel; the only kind a tab pull can undock.
    #[default]
    Panel,
    HorizontalDock,
    VerticalDock,
    FillDock,
}

/// A floating dialog window hosting a panel.
pub trait FloatingDialog {
    /// Current top-left corner in viewport coordinates.
    fn position(&self) -> Point;

    /// Move the dialog.
    fn set_position(&self, x: f64, y: f64);

    /// Close the dialog. The dialog fires its own close notification.
    fn close(&self);
}

/// Shared handle to a floating dialog.
pub type DialogHandle = Rc<dyn FloatingDialog>;

/// Future resolving to the close approval.
pub type CloseFuture = Pin<Box<dyn Future<Output = bool>>>;

/// Asynchronous close-approval predicate.
pub type CloseCallback = Rc<dyn Fn(&CloseRequest) -> CloseFuture>;

/// What a close-approval callback gets to look at.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseRequest {
    pub panel: PanelId,
    pub title: String,
    pub panel_type: PanelType,
}

/// Dock tree, dock manager and tab host rolled into one seam.
pub trait DockHost {
    /// Dock `panel` so that it fills the node at `at`. Returns the node the
    /// panel now occupies.
    fn dock_fill(&mut self, at: Option<DockNodeId>, panel: &Panel) -> DockNodeId;

    /// Dock the panel hosted by `dialog` so that it fills the node at `at`.
    fn dock_dialog_fill(&mut self, at: Option<DockNodeId>, dialog: &DialogHandle) -> DockNodeId;

    /// Detach a panel from the tree.
    fn request_undock(&mut self, panel: PanelId);

    /// Detach a panel and host it in a new dialog. `None` means refusal.
    fn request_undock_to_dialog(
        &mut self,
        panel: &Panel,
        event: &PointerEvent,
        drag_offset: Point,
    ) -> Option<DialogHandle>;

    /// Remove a closing panel from the tree.
    fn request_close(&mut self, panel: PanelId);

    /// Float `panel` in a dialog at `(x, y)`. `None` means refusal.
    fn float_dialog(&mut self, panel: &Panel, x: f64, y: f64) -> Option<DialogHandle>;

    /// A docked panel has been closed.
    fn notify_on_close_panel(&mut self, panel: PanelId);

    /// A panel was maximized or restored.
    fn notify_on_maximize_panel(&mut self, panel: PanelId, maximized: bool);

    /// Select the tab showing `panel` in its tab strip.
    fn set_active_tab(&mut self, panel: PanelId);

    /// Make `panel` the manager's active panel.
    fn set_active_panel(&mut self, panel: PanelId) {
        let _ = panel;
    }

    /// Viewport dimensions used for a maximized panel.
    fn viewport_size(&self) -> Size;

    /// Manager-wide undock default for new panels.
    fn undock_enabled(&self) -> bool {
        true
    }

    /// Manager-wide close-approval callback.
    fn default_close_callback(&self) -> Option<CloseCallback> {
        None
    }

    /// Panels in the document manager node, in tab order.
    fn document_panels(&self) -> Vec<(PanelId, PanelType)> {
        Vec::new()
    }
}
