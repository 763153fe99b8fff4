//! Property-based invariant tests for panel presentation state.
//!
//! 1. A tab handle's button visibility always equals the panel's chrome
//! 2. Leaving grayout shows exactly the controls whose hide flag is clear
//! 3. Any number of maximize/restore cycles from the tree returns the panel
//!    to its original size and slot with no placeholder left behind
//! 4. At most one placeholder is live, and only while maximized from the tree
//! 5. No panics on arbitrary sequences of toggles, docks and grayouts

use dockspan_core::event::{PointerEvent, PointerEventKind};
use dockspan_core::geometry::{Point, Size};
use dockspan_harness::{RecordingDockHost, ScriptedContent};
use dockspan_panel::{ContainerType, DockConfig, Panel, PanelOptions, PresentationState, TabHandle};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum ChromeOp {
    HideClose(bool),
    HideMaximize(bool),
    GrayOut(bool),
}

fn chrome_op() -> impl Strategy<Value = ChromeOp> {
    prop_oneof![
        any::<bool>().prop_map(ChromeOp::HideClose),
        any::<bool>().prop_map(ChromeOp::HideMaximize),
        any::<bool>().prop_map(ChromeOp::GrayOut),
    ]
}

#[derive(Debug, Clone)]
enum LifecycleOp {
    ToggleMaximize,
    DockElsewhere,
    Undock { x: f64, y: f64 },
    GrayOut(bool),
}

fn lifecycle_op() -> impl Strategy<Value = LifecycleOp> {
    prop_oneof![
        3 => Just(LifecycleOp::ToggleMaximize),
        1 => Just(LifecycleOp::DockElsewhere),
        1 => (0.0f64..800.0, 0.0f64..600.0).prop_map(|(x, y)| LifecycleOp::Undock { x, y }),
        1 => any::<bool>().prop_map(LifecycleOp::GrayOut),
    ]
}

fn docked(host: &mut RecordingDockHost, size: Size) -> Panel {
    let config = DockConfig::default();
    let content = ScriptedContent::new(size.width, size.height - config.title_bar_height);
    let mut panel = Panel::new(content.boxed(), PanelOptions::for_host(host), &config);
    let node = host.fresh_node();
    panel.on_panel_dock(node, host);
    panel
}

fn apply_chrome(panel: &mut Panel, op: &ChromeOp) {
    match *op {
        ChromeOp::HideClose(hide) => panel.hide_close_button(hide),
        ChromeOp::HideMaximize(hide) => panel.hide_maximize_button(hide),
        ChromeOp::GrayOut(show) => {
            panel.set_grayed_out(show);
        }
    }
}

proptest! {
    #[test]
    fn tab_mirror_tracks_panel_chrome(ops in prop::collection::vec(chrome_op(), 0..48)) {
        let mut host = RecordingDockHost::new();
        let mut panel = docked(&mut host, Size::new(300.0, 200.0));
        let tab = TabHandle::new(&mut panel, ContainerType::Panel, &DockConfig::default());

        for op in &ops {
            apply_chrome(&mut panel, op);
            prop_assert_eq!(tab.is_close_button_visible(), panel.chrome().close_button_visible);
            prop_assert_eq!(
                tab.is_maximize_button_visible(),
                panel.chrome().maximize_button_visible
            );
        }
    }

    #[test]
    fn leaving_grayout_restores_per_control_flags(
        ops in prop::collection::vec(chrome_op(), 0..48),
    ) {
        let mut host = RecordingDockHost::new();
        let mut panel = docked(&mut host, Size::new(300.0, 200.0));
        for op in &ops {
            apply_chrome(&mut panel, op);
        }
        panel.set_grayed_out(true);
        panel.set_grayed_out(false);

        prop_assert!(!panel.is_grayed_out());
        prop_assert!(!panel.chrome().gray_out_overlay);
        prop_assert_eq!(
            panel.chrome().close_button_visible,
            !panel.is_close_button_hidden()
        );
        prop_assert_eq!(
            panel.chrome().maximize_button_visible,
            !panel.is_maximize_button_hidden()
        );
    }

    #[test]
    fn maximize_cycles_restore_size_and_slot(
        width in 80u16..900,
        height in 60u16..700,
        vw in 320.0f64..2560.0,
        vh in 240.0f64..1440.0,
        cycles in 1usize..6,
    ) {
        let mut host = RecordingDockHost::new().with_viewport(vw, vh);
        // Whole pixels, so the title-bar split is exact.
        let original = Size::new(f64::from(width), f64::from(height));
        let mut panel = docked(&mut host, original);

        for _ in 0..cycles {
            panel.toggle_maximize(&mut host);
            prop_assert!(panel.is_maximized());
            prop_assert_eq!(panel.size(), Size::new(vw, vh));
            prop_assert_eq!(host.live_shadows(), 1);

            panel.toggle_maximize(&mut host);
            prop_assert!(!panel.is_maximized());
            prop_assert!(!panel.is_dialog());
            prop_assert_eq!(panel.size(), original);
            prop_assert_eq!(host.live_shadows(), 0);
            prop_assert!(panel.dock_at().is_some());
        }
    }

    #[test]
    fn placeholder_lives_only_while_maximized_from_tree(
        ops in prop::collection::vec(lifecycle_op(), 0..40),
    ) {
        let mut host = RecordingDockHost::new();
        let mut panel = docked(&mut host, Size::new(300.0, 200.0));

        for op in &ops {
            match *op {
                LifecycleOp::ToggleMaximize => {
                    panel.toggle_maximize(&mut host);
                }
                LifecycleOp::DockElsewhere => {
                    let node = host.fresh_node();
                    panel.prepare_for_docking();
                    panel.set_floating_dialog(None);
                    panel.on_panel_dock(node, &mut host);
                }
                LifecycleOp::Undock { x, y } => {
                    if panel.presentation_state() == PresentationState::Docked {
                        let grab = PointerEvent::new(PointerEventKind::Move, x, y);
                        panel.begin_undock_to_dialog(&grab, Point::new(5.0, 5.0), &mut host);
                    }
                }
                LifecycleOp::GrayOut(show) => {
                    panel.set_grayed_out(show);
                }
            }

            let from_tree = panel.presentation_state() == PresentationState::MaximizedFromDocked;
            prop_assert_eq!(panel.shadow().is_some(), from_tree);
            prop_assert_eq!(host.live_shadows(), usize::from(from_tree));
            prop_assert_eq!(panel.is_maximized(), panel.maximize_session().is_some());
        }
    }
}
