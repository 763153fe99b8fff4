#![forbid(unsafe_code)]

//! Listener stand-ins.

use std::cell::RefCell;
use std::rc::Rc;

use dockspan_core::listener::{Listener, ListenerSlots};
use dockspan_panel::{MoveTabEvent, PanelEvent, PanelListener, TabHandleListener};

/// One recorded panel notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelNotification {
    DockEnabled(bool),
    HideCloseButton(bool),
    HideMaximizeButton(bool),
}

/// Panel listener implementing a configurable subset of slots.
#[derive(Debug)]
pub struct RecordingListener {
    slots: ListenerSlots,
    seen: RefCell<Vec<PanelNotification>>,
}

impl RecordingListener {
    /// Listener for every panel slot.
    #[must_use]
    pub fn all() -> Rc<Self> {
        Self::with_slots(
            ListenerSlots::DOCK_ENABLED
                | ListenerSlots::HIDE_CLOSE_BUTTON
                | ListenerSlots::HIDE_MAXIMIZE_BUTTON,
        )
    }

    #[must_use]
    pub fn with_slots(slots: ListenerSlots) -> Rc<Self> {
        Rc::new(Self {
            slots,
            seen: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn seen(&self) -> Vec<PanelNotification> {
        self.seen.borrow().clone()
    }

    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl Listener for RecordingListener {
    fn slots(&self) -> ListenerSlots {
        self.slots
    }
}

impl PanelListener for RecordingListener {
    fn on_dock_enabled(&self, event: PanelEvent) {
        self.seen
            .borrow_mut()
            .push(PanelNotification::DockEnabled(event.state));
    }

    fn on_hide_close_button(&self, event: PanelEvent) {
        self.seen
            .borrow_mut()
            .push(PanelNotification::HideCloseButton(event.state));
    }

    fn on_hide_maximize_button(&self, event: PanelEvent) {
        self.seen
            .borrow_mut()
            .push(PanelNotification::HideMaximizeButton(event.state));
    }
}

/// Tab listener collecting move-tab events.
#[derive(Debug, Default)]
pub struct MoveTabRecorder {
    seen: RefCell<Vec<MoveTabEvent>>,
}

impl MoveTabRecorder {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    #[must_use]
    pub fn seen(&self) -> Vec<MoveTabEvent> {
        self.seen.borrow().clone()
    }
}

impl Listener for MoveTabRecorder {
    fn slots(&self) -> ListenerSlots {
        ListenerSlots::MOVE_TAB
    }
}

impl TabHandleListener for MoveTabRecorder {
    fn on_move_tab(&self, event: MoveTabEvent) {
        self.seen.borrow_mut().push(event);
    }
}
