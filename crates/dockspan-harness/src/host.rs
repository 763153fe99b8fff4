#![forbid(unsafe_code)]

//! Dock host stand-in.
//!
//! [`RecordingDockHost`] hands out fresh node ids, creates
//! [`RecordingDialog`]s when asked to float or undock a panel, and appends
//! every call to an ordered log. Refusals are switched on per test.

use std::collections::BTreeSet;
use std::rc::Rc;

use dockspan_core::event::PointerEvent;
use dockspan_core::geometry::{Point, Size};
use dockspan_panel::{
    CloseCallback, DialogHandle, DockHost, DockNodeId, Panel, PanelId, PanelType,
};

use crate::dialog::RecordingDialog;

/// One call into the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    DockFill {
        at: Option<DockNodeId>,
        panel: PanelId,
        node: DockNodeId,
    },
    DockDialogFill {
        at: Option<DockNodeId>,
        node: DockNodeId,
    },
    RequestUndock(PanelId),
    RequestUndockToDialog {
        panel: PanelId,
        drag_offset: Point,
    },
    RequestClose(PanelId),
    FloatDialog {
        panel: PanelId,
        x: f64,
        y: f64,
    },
    NotifyClosePanel(PanelId),
    NotifyMaximizePanel {
        panel: PanelId,
        maximized: bool,
    },
    SetActiveTab(PanelId),
    SetActivePanel(PanelId),
}

/// Dock host that records everything and refuses on request.
pub struct RecordingDockHost {
    pub calls: Vec<HostCall>,
    pub viewport: Size,
    pub refuse_float: bool,
    pub refuse_undock: bool,
    pub undock_enabled: bool,
    pub default_close: Option<CloseCallback>,
    pub documents: Vec<(PanelId, PanelType)>,
    dialogs: Vec<Rc<RecordingDialog>>,
    shadows: BTreeSet<PanelId>,
    next_node: u64,
}

impl std::fmt::Debug for RecordingDockHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingDockHost")
            .field("calls", &self.calls)
            .field("viewport", &self.viewport)
            .field("dialogs", &self.dialogs.len())
            .finish_non_exhaustive()
    }
}

impl Default for RecordingDockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDockHost {
    /// A host with a 1024x768 viewport that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            viewport: Size::new(1024.0, 768.0),
            refuse_float: false,
            refuse_undock: false,
            undock_enabled: true,
            default_close: None,
            documents: Vec::new(),
            dialogs: Vec::new(),
            shadows: BTreeSet::new(),
            next_node: 0,
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Allocate a node id, e.g. to seed a panel's initial position.
    pub fn fresh_node(&mut self) -> DockNodeId {
        self.next_node += 1;
        DockNodeId(self.next_node)
    }

    /// Dialogs created by this host, oldest first.
    #[must_use]
    pub fn dialogs(&self) -> &[Rc<RecordingDialog>] {
        &self.dialogs
    }

    #[must_use]
    pub fn last_dialog(&self) -> Option<Rc<RecordingDialog>> {
        self.dialogs.last().cloned()
    }

    /// Placeholder panels docked and not yet closed.
    #[must_use]
    pub fn live_shadows(&self) -> usize {
        self.shadows.len()
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Panels passed to `set_active_tab`, in order.
    #[must_use]
    pub fn active_tabs(&self) -> Vec<PanelId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::SetActiveTab(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn new_dialog(&mut self, x: f64, y: f64) -> DialogHandle {
        let dialog = Rc::new(RecordingDialog::at(x, y));
        self.dialogs.push(Rc::clone(&dialog));
        dialog
    }
}

impl DockHost for RecordingDockHost {
    fn dock_fill(&mut self, at: Option<DockNodeId>, panel: &Panel) -> DockNodeId {
        let node = self.fresh_node();
        if panel.is_shadow() {
            self.shadows.insert(panel.id());
        }
        self.calls.push(HostCall::DockFill {
            at,
            panel: panel.id(),
            node,
        });
        node
    }

    fn dock_dialog_fill(&mut self, at: Option<DockNodeId>, _dialog: &DialogHandle) -> DockNodeId {
        let node = self.fresh_node();
        self.calls.push(HostCall::DockDialogFill { at, node });
        node
    }

    fn request_undock(&mut self, panel: PanelId) {
        self.calls.push(HostCall::RequestUndock(panel));
    }

    fn request_undock_to_dialog(
        &mut self,
        panel: &Panel,
        event: &PointerEvent,
        drag_offset: Point,
    ) -> Option<DialogHandle> {
        self.calls.push(HostCall::RequestUndockToDialog {
            panel: panel.id(),
            drag_offset,
        });
        if self.refuse_undock {
            return None;
        }
        Some(self.new_dialog(event.x - drag_offset.x, event.y - drag_offset.y))
    }

    fn request_close(&mut self, panel: PanelId) {
        self.calls.push(HostCall::RequestClose(panel));
    }

    fn float_dialog(&mut self, panel: &Panel, x: f64, y: f64) -> Option<DialogHandle> {
        self.calls.push(HostCall::FloatDialog {
            panel: panel.id(),
            x,
            y,
        });
        if self.refuse_float {
            return None;
        }
        Some(self.new_dialog(x, y))
    }

    fn notify_on_close_panel(&mut self, panel: PanelId) {
        self.shadows.remove(&panel);
        self.calls.push(HostCall::NotifyClosePanel(panel));
    }

    fn notify_on_maximize_panel(&mut self, panel: PanelId, maximized: bool) {
        self.calls
            .push(HostCall::NotifyMaximizePanel { panel, maximized });
    }

    fn set_active_tab(&mut self, panel: PanelId) {
        self.calls.push(HostCall::SetActiveTab(panel));
    }

    fn set_active_panel(&mut self, panel: PanelId) {
        self.calls.push(HostCall::SetActivePanel(panel));
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn undock_enabled(&self) -> bool {
        self.undock_enabled
    }

    fn default_close_callback(&self) -> Option<CloseCallback> {
        self.default_close.clone()
    }

    fn document_panels(&self) -> Vec<(PanelId, PanelType)> {
        self.documents.clone()
    }
}
