#![forbid(unsafe_code)]

//! The panel: presentation state for one piece of hosted content.
//!
//! A [`Panel`] tracks whether it is docked or floating, which title-bar
//! controls it shows, its cached size and its listeners. The maximize/restore
//! machine lives in [`crate::maximize`], the close protocol in
//! [`crate::close`] and state snapshots in [`crate::state`]; all of them are
//! `impl Panel` blocks over the fields defined here.
//!
//! # Invariants
//!
//! 1. While grayed out, both title-bar controls are hidden regardless of the
//!    underlying hide flags; leaving grayout restores each from its own flag.
//! 2. The cached size setters only write layout when the value changes;
//!    [`Panel::resize`] always writes.
//! 3. A failure in the content's resize hook is logged and never propagated.
//! 4. The title-bar undock initiator is enabled only while the panel is
//!    docked, undockable, and not hosted in a floating dialog.

use std::fmt;
use std::rc::Rc;

use dockspan_core::event::PointerEvent;
use dockspan_core::geometry::{Point, Rect, Size};
use dockspan_core::gesture::UndockInitiator;
use dockspan_core::listener::{ListenerRegistry, ListenerSlots};

use crate::close::CloseTicket;
use crate::config::DockConfig;
use crate::content::PanelContent;
use crate::events::{PanelEvent, PanelListener};
use crate::host::{CloseCallback, DialogHandle, DockHost, DockNodeId, PanelId, PanelType};
use crate::maximize::{MaximizeSession, MaximizeTransition};

/// Which glyph the title-bar maximize control shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaximizeIcon {
    #[default]
    Maximize,
    Restore,
}

/// Render model for the panel's own chrome.
///
/// The host owns the actual elements; this is what they should look like.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelChrome {
    pub close_button_visible: bool,
    pub maximize_button_visible: bool,
    pub maximize_icon: MaximizeIcon,
    /// Grayout overlay over the content wrapper.
    pub gray_out_overlay: bool,
    /// Content wrapper switched to block layout (set when leaving the tree).
    pub content_wrapper_block: bool,
    pub title_html: String,
    /// `panel-has-changes` class on the title text.
    pub has_changes_marker: bool,
    pub close_icon_template: Option<String>,
    pub panel_size: Size,
    pub content_size: Size,
    /// Number of layout writes issued so far.
    pub layout_writes: usize,
}

/// Outcome of a tree position notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockNotice {
    /// Position recorded; nothing else to do.
    Recorded,
    /// Caused by an in-flight maximize or restore of this panel.
    SelfInitiated,
    /// The panel was maximized and something else moved it; the maximize
    /// state was dropped without running the restore sequence.
    ForcedUnmaximize,
}

/// Construction options.
#[derive(Debug, Clone, Default)]
pub struct PanelOptions {
    /// Title; falls back to the configured default.
    pub title: Option<String>,
    pub panel_type: PanelType,
    pub hide_close_button: bool,
    pub hide_maximize_button: bool,
    /// Undock capability; falls back to the dock manager setting.
    pub can_undock: Option<bool>,
}

impl PanelOptions {
    /// Options seeded from the dock manager's undock setting.
    #[must_use]
    pub fn for_host(dock: &dyn DockHost) -> Self {
        Self {
            can_undock: Some(dock.undock_enabled()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn panel_type(mut self, panel_type: PanelType) -> Self {
        self.panel_type = panel_type;
        self
    }

    #[must_use]
    pub fn hide_close_button(mut self, hide: bool) -> Self {
        self.hide_close_button = hide;
        self
    }

    #[must_use]
    pub fn hide_maximize_button(mut self, hide: bool) -> Self {
        self.hide_maximize_button = hide;
        self
    }

    #[must_use]
    pub fn can_undock(mut self, can_undock: bool) -> Self {
        self.can_undock = Some(can_undock);
        self
    }
}

type TitleChanged = Box<dyn FnMut(PanelId, &str)>;

/// A dockable panel.
pub struct Panel {
    pub(crate) id: PanelId,
    pub(crate) title: String,
    pub(crate) icon: Option<String>,
    pub(crate) has_changes: bool,
    pub(crate) panel_type: PanelType,
    pub(crate) content: Box<dyn PanelContent>,
    pub(crate) config: DockConfig,
    pub(crate) is_dialog: bool,
    pub(crate) can_undock: bool,
    pub(crate) hide_close_button: bool,
    pub(crate) hide_maximize_button: bool,
    pub(crate) grayed_out: bool,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) chrome: PanelChrome,
    pub(crate) floating_dialog: Option<DialogHandle>,
    pub(crate) dock_at: Option<DockNodeId>,
    pub(crate) maximize: Option<MaximizeSession>,
    pub(crate) transition: Option<MaximizeTransition>,
    pub(crate) close_ticket: Option<CloseTicket>,
    pub(crate) close_callback: Option<CloseCallback>,
    on_title_changed: Option<TitleChanged>,
    listeners: ListenerRegistry<dyn PanelListener>,
    pub(crate) undock_initiator: UndockInitiator,
    pub(crate) is_shadow: bool,
    attached: bool,
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("panel_type", &self.panel_type)
            .field("is_dialog", &self.is_dialog)
            .field("is_maximized", &self.is_maximized())
            .field("can_undock", &self.can_undock)
            .field("grayed_out", &self.grayed_out)
            .field("size", &(self.width, self.height))
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Panel {
    /// Wrap `content` in a new panel.
    ///
    /// A caption or icon supplied by the content overrides the option title.
    /// The initial size is the content's client size plus the title bar.
    #[must_use]
    pub fn new(content: Box<dyn PanelContent>, options: PanelOptions, config: &DockConfig) -> Self {
        let title = content
            .caption()
            .or(options.title)
            .unwrap_or_else(|| config.default_title.clone());
        let icon = content.icon();
        let can_undock = options.can_undock.unwrap_or(config.undock_enabled);
        let mut undock_initiator = UndockInitiator::new(config.undock_threshold);
        undock_initiator.set_enabled(can_undock);

        let mut panel = Self {
            id: PanelId::next(),
            title,
            icon,
            has_changes: false,
            panel_type: options.panel_type,
            content,
            config: config.clone(),
            is_dialog: false,
            can_undock,
            hide_close_button: options.hide_close_button,
            hide_maximize_button: options.hide_maximize_button,
            grayed_out: false,
            width: 0.0,
            height: 0.0,
            chrome: PanelChrome {
                close_button_visible: !options.hide_close_button,
                maximize_button_visible: !options.hide_maximize_button,
                maximize_icon: MaximizeIcon::Maximize,
                gray_out_overlay: false,
                content_wrapper_block: false,
                title_html: String::new(),
                has_changes_marker: false,
                close_icon_template: None,
                panel_size: Size::default(),
                content_size: Size::default(),
                layout_writes: 0,
            },
            floating_dialog: None,
            dock_at: None,
            maximize: None,
            transition: None,
            close_ticket: None,
            close_callback: None,
            on_title_changed: None,
            listeners: ListenerRegistry::new(),
            undock_initiator,
            is_shadow: false,
            attached: true,
        };

        let natural = panel.content.client_size();
        panel.set_panel_dimensions(natural.width, natural.height + config.title_bar_height);
        panel.update_title();
        panel
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    #[must_use]
    pub fn panel_type(&self) -> PanelType {
        self.panel_type
    }

    /// Floating outside the dock tree (normal dialog or maximized).
    #[inline]
    #[must_use]
    pub fn is_dialog(&self) -> bool {
        self.is_dialog
    }

    #[inline]
    #[must_use]
    pub fn can_undock(&self) -> bool {
        self.can_undock
    }

    #[must_use]
    pub fn is_close_button_hidden(&self) -> bool {
        self.hide_close_button
    }

    #[must_use]
    pub fn is_maximize_button_hidden(&self) -> bool {
        self.hide_maximize_button
    }

    #[must_use]
    pub fn is_grayed_out(&self) -> bool {
        self.grayed_out
    }

    /// A throwaway placeholder standing in for a maximized panel.
    #[must_use]
    pub fn is_shadow(&self) -> bool {
        self.is_shadow
    }

    /// False once [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn chrome(&self) -> &PanelChrome {
        &self.chrome
    }

    #[must_use]
    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    #[must_use]
    pub fn dock_at(&self) -> Option<DockNodeId> {
        self.dock_at
    }

    #[must_use]
    pub fn floating_dialog(&self) -> Option<&DialogHandle> {
        self.floating_dialog.as_ref()
    }

    #[must_use]
    pub fn content(&self) -> &dyn PanelContent {
        self.content.as_ref()
    }

    #[must_use]
    pub fn undock_initiator(&self) -> &UndockInitiator {
        &self.undock_initiator
    }

    // --- Listeners ---

    /// Append a listener. Duplicates are notified once per registration.
    pub fn add_listener(&mut self, listener: Rc<dyn PanelListener>) {
        self.listeners.add(listener);
    }

    /// Remove the first registration of `listener`.
    pub fn remove_listener(&mut self, listener: &Rc<dyn PanelListener>) -> bool {
        self.listeners.remove(listener)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify_dock_enabled(&self, state: bool) {
        let event = PanelEvent {
            source: self.id,
            state,
        };
        self.listeners
            .dispatch(ListenerSlots::DOCK_ENABLED, |l| l.on_dock_enabled(event));
    }

    fn notify_close_button(&self, hidden: bool) {
        let event = PanelEvent {
            source: self.id,
            state: hidden,
        };
        self.listeners
            .dispatch(ListenerSlots::HIDE_CLOSE_BUTTON, |l| l.on_hide_close_button(event));
    }

    fn notify_maximize_button(&self, hidden: bool) {
        let event = PanelEvent {
            source: self.id,
            state: hidden,
        };
        self.listeners.dispatch(ListenerSlots::HIDE_MAXIMIZE_BUTTON, |l| {
            l.on_hide_maximize_button(event)
        });
    }

    // --- Button policy ---

    /// Set the close-button hide flag and notify listeners.
    ///
    /// While grayed out the control stays hidden and listeners hear `true`.
    pub fn hide_close_button(&mut self, state: bool) {
        self.hide_close_button = state;
        let hidden = state || self.grayed_out;
        self.chrome.close_button_visible = !hidden;
        self.notify_close_button(hidden);
    }

    /// Set the maximize-button hide flag and notify listeners.
    pub fn hide_maximize_button(&mut self, state: bool) {
        self.hide_maximize_button = state;
        let hidden = state || self.grayed_out;
        self.chrome.maximize_button_visible = !hidden;
        self.notify_maximize_button(hidden);
    }

    /// Enter or leave grayout. Returns whether anything changed.
    pub fn set_grayed_out(&mut self, show: bool) -> bool {
        if show == self.grayed_out {
            return false;
        }
        self.grayed_out = show;
        self.chrome.gray_out_overlay = show;

        if show {
            self.chrome.close_button_visible = false;
            self.notify_close_button(true);
            self.chrome.maximize_button_visible = false;
            self.notify_maximize_button(true);
        } else {
            self.chrome.close_button_visible = !self.hide_close_button;
            if !self.hide_close_button {
                self.notify_close_button(false);
            }
            self.chrome.maximize_button_visible = !self.hide_maximize_button;
            if !self.hide_maximize_button {
                self.notify_maximize_button(false);
            }
        }
        true
    }

    // --- Size ---

    /// Cached width setter; writes layout only when the value changes.
    pub fn set_width(&mut self, width: f64) {
        if width != self.width {
            self.width = width;
            self.chrome.panel_size.width = width;
            self.chrome.layout_writes += 1;
        }
    }

    /// Cached height setter; writes layout only when the value changes.
    pub fn set_height(&mut self, height: f64) {
        if height != self.height {
            self.height = height;
            self.chrome.panel_size.height = height;
            self.chrome.layout_writes += 1;
        }
    }

    /// Apply a size unconditionally and forward it to the content.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.set_panel_dimensions(width, height);
        let content_height = height - self.config.title_bar_height;
        if let Err(err) = self.content.resize(width, content_height) {
            tracing::warn!(
                target: "dockspan.panel",
                panel = %self.id,
                width,
                height = content_height,
                error = %err,
                "content resize hook failed"
            );
        }
    }

    fn set_panel_dimensions(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.chrome.panel_size = Size::new(width, height);
        self.chrome.content_size = Size::new(width, height - self.config.title_bar_height);
        self.chrome.layout_writes += 1;
    }

    // --- Title ---

    /// Register the single owner notified on title changes.
    pub fn set_title_changed_handler(&mut self, handler: impl FnMut(PanelId, &str) + 'static) {
        self.on_title_changed = Some(Box::new(handler));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.update_title();
        self.fire_title_changed();
    }

    pub fn set_title_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
        self.update_title();
        self.fire_title_changed();
    }

    pub fn set_has_changes(&mut self, changes: bool) {
        self.has_changes = changes;
        self.update_title();
        self.chrome.has_changes_marker = changes;
        self.fire_title_changed();
    }

    /// Replace the close-button markup.
    pub fn set_close_icon_template(&mut self, template: impl Into<String>) {
        self.chrome.close_icon_template = Some(template.into());
    }

    /// Title markup: icon image plus title, or the bare title.
    #[must_use]
    pub fn raw_title(&self) -> &str {
        &self.chrome.title_html
    }

    fn update_title(&mut self) {
        self.chrome.title_html = match &self.icon {
            Some(icon) => format!(
                "<img class=\"panel-titlebar-icon\" src=\"{icon}\"><span>{}</span>",
                self.title
            ),
            None => self.title.clone(),
        };
    }

    fn fire_title_changed(&mut self) {
        let id = self.id;
        if let Some(handler) = self.on_title_changed.as_mut() {
            handler(id, &self.title);
        }
    }

    // --- Docking ---

    /// Enable or disable undocking and notify listeners.
    pub fn set_can_undock(&mut self, state: bool) {
        self.can_undock = state;
        self.undock_initiator.set_enabled(state && self.floating_dialog.is_none());
        self.notify_dock_enabled(state);
    }

    /// Attach or detach the floating dialog hosting this panel.
    pub fn set_floating_dialog(&mut self, dialog: Option<DialogHandle>) {
        let docked = dialog.is_none();
        self.floating_dialog = dialog;
        self.undock_initiator.set_enabled(docked && self.can_undock);
    }

    /// Called by the tree just before the panel is docked again.
    pub fn prepare_for_docking(&mut self) {
        self.is_dialog = false;
        self.undock_initiator.set_enabled(self.can_undock);
    }

    /// Detach from the tree without creating a dialog.
    pub fn perform_undock(&mut self, dock: &mut dyn DockHost) {
        self.undock_initiator.set_enabled(false);
        tracing::debug!(target: "dockspan.panel", panel = %self.id, "panel.undock");
        dock.request_undock(self.id);
    }

    /// Tear the panel off into a floating dialog.
    ///
    /// Returns the dialog, or `None` when undocking is disabled or the tree
    /// refuses. A refusal leaves the panel as it was.
    pub fn begin_undock_to_dialog(
        &mut self,
        event: &PointerEvent,
        drag_offset: Point,
        dock: &mut dyn DockHost,
    ) -> Option<DialogHandle> {
        if !self.can_undock {
            return None;
        }
        let was_dialog = self.is_dialog;
        let was_block = self.chrome.content_wrapper_block;
        let was_enabled = self.undock_initiator.enabled();

        self.is_dialog = true;
        self.undock_initiator.set_enabled(false);
        self.chrome.content_wrapper_block = true;

        match dock.request_undock_to_dialog(self, event, drag_offset) {
            Some(dialog) => {
                tracing::debug!(
                    target: "dockspan.panel",
                    panel = %self.id,
                    x = event.x,
                    y = event.y,
                    "panel.undock"
                );
                self.set_floating_dialog(Some(Rc::clone(&dialog)));
                Some(dialog)
            }
            None => {
                self.is_dialog = was_dialog;
                self.chrome.content_wrapper_block = was_block;
                self.undock_initiator.set_enabled(was_enabled);
                None
            }
        }
    }

    /// Docked-close path: mark in transit and ask the tree to prune the panel.
    pub fn perform_close(&mut self, dock: &mut dyn DockHost) {
        self.is_dialog = true;
        self.undock_initiator.set_enabled(false);
        self.chrome.content_wrapper_block = true;
        dock.request_close(self.id);
    }

    /// Tree position changed.
    ///
    /// Outside a maximize or restore of this panel, a position change while
    /// maximized drops the maximize state: the icon is reset, the placeholder
    /// (if any) is disposed and this panel's tab is re-activated.
    pub fn on_panel_dock(&mut self, at: DockNodeId, dock: &mut dyn DockHost) -> DockNotice {
        self.dock_at = Some(at);
        if self.transition.is_some() {
            return DockNotice::SelfInitiated;
        }
        let Some(session) = self.maximize.take() else {
            return DockNotice::Recorded;
        };

        self.chrome.maximize_icon = MaximizeIcon::Maximize;
        if let MaximizeSession::FromDocked { shadow, .. } = session {
            dispose_shadow(*shadow, dock);
        }
        dock.set_active_tab(self.id);
        tracing::debug!(
            target: "dockspan.panel",
            panel = %self.id,
            node = at.0,
            "panel.restore.forced"
        );
        DockNotice::ForcedUnmaximize
    }

    // --- Input ---

    /// Pointer pressed anywhere on the panel.
    pub fn on_pointer_down(&mut self, dock: &mut dyn DockHost) {
        dock.set_active_panel(self.id);
    }

    /// Pointer pressed on the title bar at `title_rect`.
    pub fn on_title_pointer_down(&mut self, event: &PointerEvent, title_rect: Rect) -> bool {
        self.undock_initiator.press(event, title_rect)
    }

    /// Pointer moved after a title-bar press. Undocks once the vertical pull
    /// passes the threshold.
    pub fn on_title_pointer_move(
        &mut self,
        event: &PointerEvent,
        dock: &mut dyn DockHost,
    ) -> Option<DialogHandle> {
        let request = self.undock_initiator.moved(event)?;
        self.begin_undock_to_dialog(&request.event, request.drag_offset, dock)
    }

    pub fn on_title_pointer_up(&mut self) {
        self.undock_initiator.release();
    }

    /// Tear down input handling. The panel stays inspectable.
    pub fn destroy(&mut self) {
        self.undock_initiator.set_enabled(false);
        self.attached = false;
    }

    /// Placeholder standing in for this panel while maximized from the tree.
    pub(crate) fn spawn_shadow(&self) -> Self {
        let options = PanelOptions::default()
            .title(format!("{}{}", self.title, self.config.shadow_title_suffix))
            .hide_close_button(true)
            .hide_maximize_button(true)
            .can_undock(false);
        let mut shadow = Self::new(
            Box::new(crate::content::PlaceholderContent::new()),
            options,
            &self.config,
        );
        shadow.is_shadow = true;
        shadow
    }
}

/// Close a placeholder directly, without consulting any approval callback.
pub(crate) fn dispose_shadow(mut shadow: Panel, dock: &mut dyn DockHost) {
    shadow.perform_close(dock);
    dock.notify_on_close_panel(shadow.id);
    shadow.destroy();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentResizeError;
    use dockspan_core::event::ElementId;
    use dockspan_core::listener::Listener;
    use std::cell::RefCell;

    struct Fixed {
        element: ElementId,
        caption: Option<String>,
        resizes: Rc<RefCell<Vec<(f64, f64)>>>,
        fail: bool,
    }

    impl Fixed {
        fn boxed() -> Box<Self> {
            Box::new(Self {
                element: ElementId(7),
                caption: None,
                resizes: Rc::default(),
                fail: false,
            })
        }
    }

    impl PanelContent for Fixed {
        fn element_id(&self) -> ElementId {
            self.element
        }
        fn client_size(&self) -> Size {
            Size::new(200.0, 100.0)
        }
        fn caption(&self) -> Option<String> {
            self.caption.clone()
        }
        fn resize(&mut self, width: f64, height: f64) -> Result<(), ContentResizeError> {
            self.resizes.borrow_mut().push((width, height));
            if self.fail {
                Err(ContentResizeError::new("boom"))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct Log {
        events: RefCell<Vec<(&'static str, bool)>>,
    }

    impl Listener for Log {
        fn slots(&self) -> ListenerSlots {
            ListenerSlots::DOCK_ENABLED
                | ListenerSlots::HIDE_CLOSE_BUTTON
                | ListenerSlots::HIDE_MAXIMIZE_BUTTON
        }
    }

    impl PanelListener for Log {
        fn on_dock_enabled(&self, event: PanelEvent) {
            self.events.borrow_mut().push(("dock", event.state));
        }
        fn on_hide_close_button(&self, event: PanelEvent) {
            self.events.borrow_mut().push(("close", event.state));
        }
        fn on_hide_maximize_button(&self, event: PanelEvent) {
            self.events.borrow_mut().push(("max", event.state));
        }
    }

    fn panel() -> Panel {
        Panel::new(Fixed::boxed(), PanelOptions::default(), &DockConfig::default())
    }

    fn with_log(panel: &mut Panel) -> Rc<Log> {
        let log = Rc::new(Log::default());
        let as_listener: Rc<dyn PanelListener> = log.clone();
        panel.add_listener(as_listener);
        log
    }

    #[test]
    fn construction_defaults() {
        let p = panel();
        assert_eq!(p.title(), "Panel");
        assert_eq!(p.panel_type(), PanelType::Panel);
        assert!(!p.is_dialog());
        assert!(!p.is_maximized());
        assert!(p.can_undock());
        assert_eq!(p.size(), Size::new(200.0, 125.0));
        assert_eq!(p.chrome().content_size, Size::new(200.0, 100.0));
        assert_eq!(p.raw_title(), "Panel");
    }

    #[test]
    fn content_caption_overrides_title() {
        let mut content = Fixed::boxed();
        content.caption = Some("Inspector".into());
        let p = Panel::new(content, PanelOptions::default().title("x"), &DockConfig::default());
        assert_eq!(p.title(), "Inspector");
    }

    #[test]
    fn cached_setters_skip_redundant_writes() {
        let mut p = panel();
        let writes = p.chrome().layout_writes;
        p.set_width(200.0);
        p.set_height(125.0);
        assert_eq!(p.chrome().layout_writes, writes);
        p.set_width(240.0);
        assert_eq!(p.chrome().layout_writes, writes + 1);
        assert_eq!(p.width(), 240.0);
    }

    #[test]
    fn resize_always_writes_and_forwards_content_height() {
        let content = Fixed::boxed();
        let resizes = Rc::clone(&content.resizes);
        let mut p = Panel::new(content, PanelOptions::default(), &DockConfig::default());
        let writes = p.chrome().layout_writes;
        p.resize(200.0, 125.0);
        p.resize(200.0, 125.0);
        assert_eq!(p.chrome().layout_writes, writes + 2);
        assert_eq!(*resizes.borrow(), vec![(200.0, 100.0), (200.0, 100.0)]);
    }

    #[test]
    fn failing_content_resize_is_absorbed() {
        let mut content = Fixed::boxed();
        content.fail = true;
        let mut p = Panel::new(content, PanelOptions::default(), &DockConfig::default());
        p.resize(400.0, 300.0);
        assert_eq!(p.size(), Size::new(400.0, 300.0));
    }

    #[test]
    fn hide_buttons_notify_listeners() {
        let mut p = panel();
        let log = with_log(&mut p);
        p.hide_close_button(true);
        p.hide_maximize_button(false);
        assert!(!p.chrome().close_button_visible);
        assert!(p.chrome().maximize_button_visible);
        assert_eq!(*log.events.borrow(), vec![("close", true), ("max", false)]);
    }

    #[test]
    fn grayout_is_idempotent_and_restores_independently() {
        let mut p = Panel::new(
            Fixed::boxed(),
            PanelOptions::default().hide_maximize_button(true),
            &DockConfig::default(),
        );
        let log = with_log(&mut p);
        assert!(p.set_grayed_out(true));
        assert!(!p.set_grayed_out(true));
        assert!(!p.chrome().close_button_visible);
        assert!(!p.chrome().maximize_button_visible);
        assert!(p.set_grayed_out(false));
        assert!(p.chrome().close_button_visible);
        assert!(!p.chrome().maximize_button_visible);
        assert_eq!(
            *log.events.borrow(),
            vec![("close", true), ("max", true), ("close", false)]
        );
    }

    #[test]
    fn grayout_leave_without_enter_is_noop() {
        let mut p = panel();
        let log = with_log(&mut p);
        assert!(!p.set_grayed_out(false));
        assert!(log.events.borrow().is_empty());
    }

    #[test]
    fn set_can_undock_notifies_and_gates_initiator() {
        let mut p = panel();
        let log = with_log(&mut p);
        p.set_can_undock(false);
        assert!(!p.undock_initiator().enabled());
        p.set_can_undock(true);
        assert!(p.undock_initiator().enabled());
        assert_eq!(*log.events.borrow(), vec![("dock", false), ("dock", true)]);
    }

    #[test]
    fn removed_listener_is_not_notified() {
        let mut p = panel();
        let log = Rc::new(Log::default());
        let l: Rc<dyn PanelListener> = log.clone();
        p.add_listener(Rc::clone(&l));
        assert!(p.remove_listener(&l));
        assert!(!p.remove_listener(&l));
        p.hide_close_button(true);
        assert!(log.events.borrow().is_empty());
    }

    #[test]
    fn title_markup_and_change_handler() {
        let mut p = panel();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        p.set_title_changed_handler(move |_, title| sink.borrow_mut().push(title.to_owned()));
        p.set_title("Log");
        p.set_title_icon(Some("log.png".into()));
        assert_eq!(
            p.raw_title(),
            "<img class=\"panel-titlebar-icon\" src=\"log.png\"><span>Log</span>"
        );
        p.set_has_changes(true);
        assert!(p.chrome().has_changes_marker);
        assert_eq!(*seen.borrow(), vec!["Log", "Log", "Log"]);
    }

    #[test]
    fn close_icon_template_is_stored() {
        let mut p = panel();
        p.set_close_icon_template("<i>x</i>");
        assert_eq!(p.chrome().close_icon_template.as_deref(), Some("<i>x</i>"));
    }

    #[test]
    fn shadow_is_inert() {
        let p = panel();
        let shadow = p.spawn_shadow();
        assert!(shadow.is_shadow());
        assert_eq!(shadow.title(), "Panel (popped up)");
        assert!(!shadow.can_undock());
        assert!(!shadow.chrome().close_button_visible);
        assert!(!shadow.chrome().maximize_button_visible);
        assert_ne!(shadow.id(), p.id());
    }

    #[test]
    fn floating_dialog_toggles_title_bar_initiator() {
        struct Still;
        impl crate::host::FloatingDialog for Still {
            fn position(&self) -> Point {
                Point::ORIGIN
            }
            fn set_position(&self, _: f64, _: f64) {}
            fn close(&self) {}
        }
        let mut p = panel();
        let dialog: DialogHandle = Rc::new(Still);
        p.set_floating_dialog(Some(dialog));
        assert!(!p.undock_initiator().enabled());
        p.set_floating_dialog(None);
        assert!(p.undock_initiator().enabled());
    }
}
