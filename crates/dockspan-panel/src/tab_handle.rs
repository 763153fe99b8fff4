#![forbid(unsafe_code)]

//! Tab handle: the clickable tab that represents a panel in a tab strip.
//!
//! The handle mirrors the panel's button visibility and undock capability
//! through a listener it registers on the panel; it never reads the panel's
//! flags directly after construction. Drag handling is split between a
//! [`TabDragRecognizer`] (reordering) and an [`UndockInitiator`] (tearing
//! the panel off). Reordering itself belongs to whoever listens for
//! move-tab events.
//!
//! # Lifecycle
//!
//! ```text
//! new(panel) ──► pointer down ──► moves ──► pointer up
//!    │              (window subscriptions live in between)
//!    └─────────────────────────────────────────► destroy(panel)
//! ```

use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;

use dockspan_core::event::{
    ElementId, EventBinder, EventTarget, ListenerOptions, NativeEventKind, PointerButton,
    PointerEvent, SubscriptionId,
};
use dockspan_core::geometry::Rect;
use dockspan_core::gesture::{TabDragEffect, TabDragRecognizer, UndockInitiator};
use dockspan_core::listener::{Listener, ListenerRegistry, ListenerSlots};

use crate::close::CloseOutcome;
use crate::config::DockConfig;
use crate::context_menu::{ContextMenu, ContextMenuItem};
use crate::events::{MoveTabEvent, PanelEvent, PanelListener, TabHandleListener};
use crate::host::{ContainerType, DialogHandle, DockHost, PanelId, PanelType};
use crate::maximize::MaximizeOutcome;
use crate::panel::Panel;

bitflags! {
    /// CSS state classes on the tab element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TabClasses: u8 {
        /// `dockspan-tab-handle-dragged`
        const DRAGGED  = 0b001;
        /// `dockspan-tab-handle-selected`
        const SELECTED = 0b010;
        /// `dockspan-tab-handle-active`
        const ACTIVE   = 0b100;
    }
}

/// Local copy of the panel flags the tab renders.
#[derive(Debug)]
struct TabMirror {
    close_hidden: Cell<bool>,
    maximize_hidden: Cell<bool>,
    // Last undock capability heard from the panel, not yet applied.
    pending_undock: Cell<Option<bool>>,
}

impl Listener for TabMirror {
    fn slots(&self) -> ListenerSlots {
        ListenerSlots::DOCK_ENABLED
            | ListenerSlots::HIDE_CLOSE_BUTTON
            | ListenerSlots::HIDE_MAXIMIZE_BUTTON
    }
}

impl PanelListener for TabMirror {
    fn on_dock_enabled(&self, event: PanelEvent) {
        self.pending_undock.set(Some(event.state));
    }

    fn on_hide_close_button(&self, event: PanelEvent) {
        self.close_hidden.set(event.state);
    }

    fn on_hide_maximize_button(&self, event: PanelEvent) {
        self.maximize_hidden.set(event.state);
    }
}

/// What a pointer move did.
#[derive(Clone)]
pub enum TabPointerEffect {
    /// No press in progress.
    Idle,
    /// Still within the click threshold.
    Pressed,
    /// The drag recognizer consumed the move.
    Dragged(TabDragEffect),
    /// The vertical pull tore the panel off; `None` if the tree refused.
    Undocked(Option<DialogHandle>),
}

impl std::fmt::Debug for TabPointerEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Pressed => f.write_str("Pressed"),
            Self::Dragged(effect) => f.debug_tuple("Dragged").field(effect).finish(),
            Self::Undocked(dialog) => f.debug_tuple("Undocked").field(&dialog.is_some()).finish(),
        }
    }
}

/// What a right-click did to the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuAction {
    Opened,
    Closed,
    /// Not a document panel.
    Ignored,
}

/// The tab representing one panel.
pub struct TabHandle {
    panel: PanelId,
    panel_type: PanelType,
    container_type: ContainerType,
    element: ElementId,
    mirror: Rc<TabMirror>,
    subscription: Rc<dyn PanelListener>,
    undock: UndockInitiator,
    drag: TabDragRecognizer,
    drag_subscriptions: Vec<SubscriptionId>,
    listeners: ListenerRegistry<dyn TabHandleListener>,
    context_menu: Option<ContextMenu>,
    title_html: String,
    tooltip: String,
    classes: TabClasses,
    z_index: i32,
    z_index_counter: i32,
    close_button_attached: bool,
    maximize_button_attached: bool,
}

impl std::fmt::Debug for TabHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabHandle")
            .field("panel", &self.panel)
            .field("container_type", &self.container_type)
            .field("classes", &self.classes)
            .field("z_index", &self.z_index)
            .field("dragging", &self.drag.is_dragging())
            .field("context_menu", &self.context_menu.is_some())
            .finish_non_exhaustive()
    }
}

impl TabHandle {
    /// Create the tab for `panel` and subscribe to its notifications.
    #[must_use]
    pub fn new(panel: &mut Panel, container_type: ContainerType, config: &DockConfig) -> Self {
        let mirror = Rc::new(TabMirror {
            close_hidden: Cell::new(panel.is_close_button_hidden() || panel.is_grayed_out()),
            maximize_hidden: Cell::new(
                panel.is_maximize_button_hidden() || panel.is_grayed_out(),
            ),
            pending_undock: Cell::new(None),
        });
        let subscription: Rc<dyn PanelListener> = mirror.clone();
        panel.add_listener(Rc::clone(&subscription));

        let mut undock = UndockInitiator::new(config.undock_threshold);
        undock.set_enabled(panel.can_undock());

        let title_html = panel.raw_title().to_owned();
        let mut handle = Self {
            panel: panel.id(),
            panel_type: panel.panel_type(),
            container_type,
            element: ElementId::fresh(),
            mirror,
            subscription,
            undock,
            drag: TabDragRecognizer::new(config.tab_drag_threshold),
            drag_subscriptions: Vec::new(),
            listeners: ListenerRegistry::new(),
            context_menu: None,
            tooltip: inner_text(&title_html),
            title_html,
            classes: TabClasses::empty(),
            z_index: 0,
            z_index_counter: config.tab_handle_z_index,
            close_button_attached: config.display_close_button,
            maximize_button_attached: config.display_maximize_button,
        };
        handle.bring_to_front();
        handle
    }

    // --- View ---

    #[must_use]
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn title_html(&self) -> &str {
        &self.title_html
    }

    /// Plain-text title used as the tooltip.
    #[must_use]
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    #[must_use]
    pub fn classes(&self) -> TabClasses {
        self.classes
    }

    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    #[must_use]
    pub fn close_button_attached(&self) -> bool {
        self.close_button_attached
    }

    #[must_use]
    pub fn maximize_button_attached(&self) -> bool {
        self.maximize_button_attached
    }

    #[must_use]
    pub fn is_close_button_visible(&self) -> bool {
        !self.mirror.close_hidden.get()
    }

    #[must_use]
    pub fn is_maximize_button_visible(&self) -> bool {
        !self.mirror.maximize_hidden.get()
    }

    /// Undock capability as last heard from the panel.
    #[must_use]
    pub fn undock_enabled(&self) -> bool {
        match self.mirror.pending_undock.get() {
            Some(enabled) => enabled,
            None => self.undock.enabled(),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    #[must_use]
    pub fn has_drag_subscriptions(&self) -> bool {
        !self.drag_subscriptions.is_empty()
    }

    pub fn update_title(&mut self, panel: &Panel) {
        if self.container_type == ContainerType::Panel {
            self.title_html = panel.raw_title().to_owned();
            self.tooltip = inner_text(&self.title_html);
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.classes.insert(TabClasses::SELECTED);
        } else {
            self.classes.remove(TabClasses::SELECTED | TabClasses::ACTIVE);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.classes.set(TabClasses::ACTIVE, active);
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    fn bring_to_front(&mut self) {
        self.z_index = self.z_index_counter;
        self.z_index_counter += 1;
    }

    // --- Listeners ---

    pub fn add_listener(&mut self, listener: Rc<dyn TabHandleListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&mut self, listener: &Rc<dyn TabHandleListener>) -> bool {
        self.listeners.remove(listener)
    }

    // --- Drag ---

    fn apply_pending_undock(&mut self) {
        if let Some(enabled) = self.mirror.pending_undock.take() {
            self.undock.set_enabled(enabled);
        }
    }

    fn cancel_drag_subscriptions(&mut self, events: &mut dyn EventBinder) {
        for id in self.drag_subscriptions.drain(..) {
            events.cancel(id);
        }
    }

    /// Pointer pressed on the tab at `tab_rect`.
    ///
    /// Activates the tab, discards any interaction whose release was missed,
    /// and subscribes window-level move and up handlers.
    pub fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        tab_rect: Rect,
        dock: &mut dyn DockHost,
        events: &mut dyn EventBinder,
    ) {
        self.apply_pending_undock();
        dock.set_active_tab(self.panel);

        self.cancel_drag_subscriptions(events);
        self.drag.press(event.x);
        self.undock.press(event, tab_rect);

        let window = EventTarget::Window;
        self.drag_subscriptions = vec![
            events.subscribe(window, NativeEventKind::MouseMove, ListenerOptions::DEFAULT),
            events.subscribe(window, NativeEventKind::TouchMove, ListenerOptions::NON_PASSIVE),
            events.subscribe(window, NativeEventKind::MouseUp, ListenerOptions::DEFAULT),
            events.subscribe(window, NativeEventKind::TouchEnd, ListenerOptions::DEFAULT),
        ];
    }

    /// Window-level pointer move while pressed. `tab_rect` is the tab's
    /// current bounds.
    ///
    /// A vertical pull past the undock threshold takes priority over
    /// reordering, but only plain panels can be pulled off this way.
    pub fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        tab_rect: Rect,
        panel: &mut Panel,
        dock: &mut dyn DockHost,
    ) -> TabPointerEffect {
        self.apply_pending_undock();

        if self.container_type == ContainerType::Panel {
            if let Some(request) = self.undock.moved(event) {
                self.drag.release();
                self.classes.remove(TabClasses::DRAGGED);
                let dialog = panel.begin_undock_to_dialog(&request.event, request.drag_offset, dock);
                if dialog.is_none() {
                    // Refused; the tab stays pullable.
                    self.undock.set_enabled(panel.can_undock());
                }
                return TabPointerEffect::Undocked(dialog);
            }
        }

        let effect = self.drag.moved(event.x, tab_rect);
        match effect {
            TabDragEffect::Ignored => TabPointerEffect::Idle,
            TabDragEffect::BelowThreshold => TabPointerEffect::Pressed,
            TabDragEffect::Dragged { move_tab, .. } => {
                self.classes.insert(TabClasses::DRAGGED);
                if let Some(mv) = move_tab {
                    let payload = MoveTabEvent {
                        source: self.panel,
                        state: mv.direction,
                        rect: mv.rect,
                    };
                    let notified = self
                        .listeners
                        .dispatch(ListenerSlots::MOVE_TAB, |l| l.on_move_tab(payload));
                    tracing::debug!(
                        target: "dockspan.tab",
                        panel = %self.panel,
                        direction = mv.direction.as_str(),
                        notified,
                        "tab.move"
                    );
                }
                TabPointerEffect::Dragged(effect)
            }
        }
    }

    /// Window-level pointer up: end the interaction.
    pub fn on_pointer_up(&mut self, events: &mut dyn EventBinder) {
        self.classes.remove(TabClasses::DRAGGED);
        self.drag.release();
        self.undock.release();
        self.cancel_drag_subscriptions(events);
    }

    // --- Buttons ---

    /// Double-click toggles maximize when the panel allows both undocking
    /// and maximizing.
    pub fn on_double_click(
        &mut self,
        event: &PointerEvent,
        panel: &mut Panel,
        dock: &mut dyn DockHost,
    ) -> Option<MaximizeOutcome> {
        if event.is_secondary() {
            return None;
        }
        if !panel.can_undock() || panel.is_maximize_button_hidden() {
            return None;
        }
        Some(panel.toggle_maximize(dock))
    }

    /// Tab close button or middle click.
    ///
    /// Ignored for the right button, while the close control is hidden, and
    /// for tab pages that do not host a plain panel.
    pub async fn on_close_button_clicked(
        &self,
        event: &PointerEvent,
        panel: &mut Panel,
        dock: &mut dyn DockHost,
    ) -> Option<CloseOutcome> {
        if !self.is_close_button_visible() || event.is_secondary() {
            return None;
        }
        if self.container_type != ContainerType::Panel {
            return None;
        }
        Some(panel.close(dock).await)
    }

    /// Auxiliary-button click anywhere on the tab.
    pub async fn on_aux_click(
        &self,
        event: &PointerEvent,
        panel: &mut Panel,
        dock: &mut dyn DockHost,
    ) -> Option<CloseOutcome> {
        if event.button != PointerButton::Auxiliary {
            return None;
        }
        self.on_close_button_clicked(event, panel, dock).await
    }

    /// Tab maximize button.
    pub fn on_maximize_button_clicked(
        &mut self,
        event: &PointerEvent,
        panel: &mut Panel,
        dock: &mut dyn DockHost,
    ) -> Option<MaximizeOutcome> {
        if !self.is_maximize_button_visible() || event.is_secondary() {
            return None;
        }
        Some(panel.toggle_maximize(dock))
    }

    // --- Context menu ---

    /// Right click: open the menu for document panels, or close an open one.
    pub fn on_context_menu(
        &mut self,
        event: &PointerEvent,
        events: &mut dyn EventBinder,
    ) -> ContextMenuAction {
        if self.context_menu.is_some() {
            self.close_context_menu(events);
            return ContextMenuAction::Closed;
        }
        if self.panel_type != PanelType::Document {
            return ContextMenuAction::Ignored;
        }
        let subscription = events.subscribe(
            EventTarget::Window,
            NativeEventKind::MouseUp,
            ListenerOptions::DEFAULT,
        );
        self.context_menu = Some(ContextMenu::new(event.position(), subscription));
        ContextMenuAction::Opened
    }

    pub fn close_context_menu(&mut self, events: &mut dyn EventBinder) {
        if let Some(menu) = self.context_menu.take() {
            events.cancel(menu.window_subscription());
        }
    }

    /// Window pointer-up while the menu is open. `composed_path` lists the
    /// elements the event passed through; the menu stays open if it is one
    /// of them.
    pub fn on_window_pointer_up(&mut self, composed_path: &[ElementId], events: &mut dyn EventBinder) {
        let Some(menu) = &self.context_menu else {
            return;
        };
        if composed_path.contains(&menu.element()) {
            return;
        }
        self.close_context_menu(events);
    }

    /// Run a menu entry. Returns the panels the host should close, in order,
    /// and closes the menu.
    pub fn activate_context_menu_item(
        &mut self,
        item: ContextMenuItem,
        dock: &dyn DockHost,
        events: &mut dyn EventBinder,
    ) -> Vec<PanelId> {
        if self.context_menu.is_none() {
            return Vec::new();
        }
        let targets = item.close_targets(&dock.document_panels(), self.panel);
        self.close_context_menu(events);
        targets
    }

    /// Leave the tab strip. The panel subscription goes first so the panel
    /// never notifies a torn-down handle.
    pub fn destroy(mut self, panel: &mut Panel, events: &mut dyn EventBinder) {
        panel.remove_listener(&self.subscription);
        self.cancel_drag_subscriptions(events);
        self.close_context_menu(events);
    }
}

/// Text content of title markup.
fn inner_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
