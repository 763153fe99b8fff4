//! Undocking, activation and snapshot reloads against a recording host.

use std::rc::Rc;

use dockspan_core::event::{PointerButton, PointerEvent, PointerEventKind};
use dockspan_core::geometry::{Point, Rect};
use dockspan_harness::{
    HostCall, PanelNotification, RecordingDockHost, RecordingListener, ScriptedContent,
};
use dockspan_panel::{DockConfig, FloatingDialog, Panel, PanelListener, PanelOptions, PanelType};
use pretty_assertions::assert_eq;

const TITLE_BAR: Rect = Rect::new(0.0, 0.0, 300.0, 25.0);

fn docked(host: &mut RecordingDockHost, options: PanelOptions) -> Panel {
    let mut panel = Panel::new(
        ScriptedContent::new(300.0, 175.0).boxed(),
        options,
        &DockConfig::default(),
    );
    let node = host.fresh_node();
    panel.on_panel_dock(node, host);
    host.clear_calls();
    panel
}

fn at(kind: PointerEventKind, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(kind, x, y)
}

#[test]
fn title_bar_pull_tears_panel_off() {
    let mut host = RecordingDockHost::new();
    let options = PanelOptions::for_host(&host);
    let mut panel = docked(&mut host, options);

    assert!(panel.on_title_pointer_down(&at(PointerEventKind::Down, 40.0, 12.0), TITLE_BAR));
    assert!(
        panel
            .on_title_pointer_move(&at(PointerEventKind::Move, 90.0, 18.0), &mut host)
            .is_none()
    );
    let dialog = panel
        .on_title_pointer_move(&at(PointerEventKind::Move, 42.0, 30.0), &mut host)
        .expect("undocked");

    assert_eq!(
        host.calls,
        vec![HostCall::RequestUndockToDialog {
            panel: panel.id(),
            drag_offset: Point::new(40.0, 12.0),
        }]
    );
    assert_eq!(dialog.position(), Point::new(2.0, 18.0));
    assert!(panel.is_dialog());
    assert!(panel.chrome().content_wrapper_block);
    assert!(!panel.undock_initiator().enabled());
    assert!(panel.floating_dialog().is_some());
}

#[test]
fn released_title_press_does_not_undock() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());

    panel.on_title_pointer_down(&at(PointerEventKind::Down, 40.0, 12.0), TITLE_BAR);
    panel.on_title_pointer_up();
    assert!(
        panel
            .on_title_pointer_move(&at(PointerEventKind::Move, 40.0, 80.0), &mut host)
            .is_none()
    );
    assert!(host.calls.is_empty());
}

#[test]
fn right_button_never_arms_the_title_bar() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());
    let right = at(PointerEventKind::Down, 40.0, 12.0).with_button(PointerButton::Secondary);
    assert!(!panel.on_title_pointer_down(&right, TITLE_BAR));
}

#[test]
fn refused_undock_is_propagated_and_rolled_back() {
    let mut host = RecordingDockHost::new();
    host.refuse_undock = true;
    let mut panel = docked(&mut host, PanelOptions::default());
    let before = panel.chrome().clone();

    let grab = at(PointerEventKind::Move, 60.0, 40.0);
    assert!(
        panel
            .begin_undock_to_dialog(&grab, Point::new(10.0, 10.0), &mut host)
            .is_none()
    );
    assert!(!panel.is_dialog());
    assert!(panel.undock_initiator().enabled());
    assert_eq!(panel.chrome(), &before);
    assert!(panel.floating_dialog().is_none());
}

#[test]
fn undock_disabled_panel_is_a_noop() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default().can_undock(false));

    assert!(!panel.on_title_pointer_down(&at(PointerEventKind::Down, 40.0, 12.0), TITLE_BAR));
    let grab = at(PointerEventKind::Move, 60.0, 40.0);
    assert!(
        panel
            .begin_undock_to_dialog(&grab, Point::ORIGIN, &mut host)
            .is_none()
    );
    assert!(host.calls.is_empty());
    assert!(!panel.is_dialog());
}

#[test]
fn manager_undock_default_applies_to_new_panels() {
    let mut host = RecordingDockHost::new();
    host.undock_enabled = false;
    let options = PanelOptions::for_host(&host);
    let panel = docked(&mut host, options);
    assert!(!panel.can_undock());
    assert!(!panel.undock_initiator().enabled());
}

#[test]
fn perform_undock_detaches_without_dialog() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());
    panel.perform_undock(&mut host);
    assert_eq!(host.calls, vec![HostCall::RequestUndock(panel.id())]);
    assert!(!panel.undock_initiator().enabled());
}

#[test]
fn redocking_a_dialog_reenables_the_title_bar() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());
    let grab = at(PointerEventKind::Move, 60.0, 40.0);
    panel
        .begin_undock_to_dialog(&grab, Point::new(10.0, 10.0), &mut host)
        .expect("undocked");

    panel.prepare_for_docking();
    panel.set_floating_dialog(None);
    let node = host.fresh_node();
    panel.on_panel_dock(node, &mut host);

    assert!(!panel.is_dialog());
    assert!(panel.undock_initiator().enabled());
    assert_eq!(panel.dock_at(), Some(node));
}

#[test]
fn pointer_down_activates_panel() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());
    panel.on_pointer_down(&mut host);
    assert_eq!(host.calls, vec![HostCall::SetActivePanel(panel.id())]);
}

#[test]
fn load_state_reapplies_and_notifies() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());
    let listener = RecordingListener::all();
    let subscription: Rc<dyn PanelListener> = listener.clone();
    panel.add_listener(subscription);

    let mut state = panel.save_state().expect("regular panels save");
    state.width = 640.0;
    state.height = 480.0;
    state.can_undock = false;
    state.hide_close_button = true;
    state.panel_type = PanelType::Document;
    panel.load_state(&state);

    assert_eq!(panel.width(), 640.0);
    assert_eq!(panel.height(), 480.0);
    assert!(!panel.can_undock());
    assert!(panel.is_close_button_hidden());
    assert!(!panel.chrome().close_button_visible);
    assert_eq!(panel.panel_type(), PanelType::Document);
    assert_eq!(
        listener.seen(),
        vec![
            PanelNotification::DockEnabled(false),
            PanelNotification::HideCloseButton(true),
            PanelNotification::HideMaximizeButton(false),
        ]
    );
}

#[test]
fn destroyed_panel_ignores_title_presses() {
    let mut host = RecordingDockHost::new();
    let mut panel = docked(&mut host, PanelOptions::default());
    panel.destroy();
    assert!(!panel.is_attached());
    assert!(!panel.on_title_pointer_down(&at(PointerEventKind::Down, 40.0, 12.0), TITLE_BAR));
}
