#![forbid(unsafe_code)]

//! Per-panel state snapshots.
//!
//! The surrounding layout format is the host's business; this is only the
//! record a single panel contributes to it. Placeholder panels contribute
//! nothing.

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

use dockspan_core::event::ElementId;

use crate::config::DockConfig;
use crate::content::PanelContent;
use crate::host::PanelType;
use crate::panel::{Panel, PanelOptions};

/// What a panel saves into a layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "state-persistence", serde(rename_all = "camelCase"))]
pub struct PanelState {
    /// Id of the hosted element.
    pub element: u64,
    pub width: f64,
    pub height: f64,
    pub can_undock: bool,
    pub hide_close_button: bool,
    pub hide_maximize_button: bool,
    pub panel_type: PanelType,
}

impl Panel {
    /// Snapshot for a layout. Placeholders are never saved.
    #[must_use]
    pub fn save_state(&self) -> Option<PanelState> {
        if self.is_shadow {
            return None;
        }
        Some(PanelState {
            element: self.content.element_id().0,
            width: self.width,
            height: self.height,
            can_undock: self.can_undock,
            hide_close_button: self.hide_close_button,
            hide_maximize_button: self.hide_maximize_button,
            panel_type: self.panel_type,
        })
    }

    /// Re-apply a snapshot. Capability and button changes notify listeners.
    pub fn load_state(&mut self, state: &PanelState) {
        self.set_width(state.width);
        self.set_height(state.height);
        self.set_can_undock(state.can_undock);
        self.hide_close_button(state.hide_close_button);
        self.hide_maximize_button(state.hide_maximize_button);
        self.panel_type = state.panel_type;
    }

    /// Rebuild a panel from a snapshot.
    ///
    /// `resolve` looks the element up; `None` when it no longer exists.
    pub fn load_from_state<F>(state: &PanelState, resolve: F, config: &DockConfig) -> Option<Self>
    where
        F: FnOnce(ElementId) -> Option<Box<dyn PanelContent>>,
    {
        let content = resolve(ElementId(state.element))?;
        let mut panel = Self::new(content, PanelOptions::default(), config);
        panel.load_state(state);
        Some(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockspan_core::geometry::Size;

    struct Element(u64);

    impl PanelContent for Element {
        fn element_id(&self) -> ElementId {
            ElementId(self.0)
        }
        fn client_size(&self) -> Size {
            Size::new(100.0, 50.0)
        }
    }

    fn config() -> DockConfig {
        DockConfig::default()
    }

    #[test]
    fn save_records_each_flag_from_its_own_field() {
        let mut p = Panel::new(
            Box::new(Element(3)),
            PanelOptions::default()
                .panel_type(PanelType::Document)
                .hide_maximize_button(true),
            &config(),
        );
        p.resize(320.0, 240.0);
        let state = p.save_state().expect("saved");
        assert_eq!(
            state,
            PanelState {
                element: 3,
                width: 320.0,
                height: 240.0,
                can_undock: true,
                hide_close_button: false,
                hide_maximize_button: true,
                panel_type: PanelType::Document,
            }
        );
    }

    #[test]
    fn shadow_is_never_saved() {
        let p = Panel::new(Box::new(Element(1)), PanelOptions::default(), &config());
        assert!(p.spawn_shadow().save_state().is_none());
    }

    #[test]
    fn load_from_state_resolves_element() {
        let state = PanelState {
            element: 9,
            width: 150.0,
            height: 90.0,
            can_undock: false,
            hide_close_button: true,
            hide_maximize_button: false,
            panel_type: PanelType::Document,
        };
        let p = Panel::load_from_state(
            &state,
            |id| Some(Box::new(Element(id.0)) as Box<dyn PanelContent>),
            &config(),
        )
        .expect("element exists");
        assert_eq!(p.save_state(), Some(state));
        assert!(!p.undock_initiator().enabled());
    }

    #[test]
    fn load_from_state_missing_element() {
        let state = PanelState {
            element: 404,
            width: 1.0,
            height: 1.0,
            can_undock: true,
            hide_close_button: false,
            hide_maximize_button: false,
            panel_type: PanelType::Panel,
        };
        assert!(Panel::load_from_state(&state, |_| None, &config()).is_none());
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn state_serializes_with_camel_case_keys() {
        let p = Panel::new(Box::new(Element(5)), PanelOptions::default(), &config());
        let json = serde_json::to_value(p.save_state().expect("saved")).expect("json");
        assert_eq!(json["element"], 5);
        assert_eq!(json["hideMaximizeButton"], false);
        assert_eq!(json["panelType"], "panel");
    }
}
