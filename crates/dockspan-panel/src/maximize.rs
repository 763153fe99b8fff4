#![forbid(unsafe_code)]

//! Maximize and restore.
//!
//! # State Machine
//!
//! ```text
//!                maximize                               maximize
//!   Docked  ------------------> MaximizedFromDocked     DialogNormal ---------> MaximizedFromDialog
//!     ^                               |                      ^                          |
//!     +------------ restore ----------+                      +--------- restore --------+
//! ```
//!
//! Maximizing a docked panel floats it full-screen and parks a placeholder
//! panel in its tree slot so the layout keeps its shape. Maximizing a dialog
//! only moves and resizes the dialog. The [`MaximizeSession`] holds what the
//! matching restore needs; its presence is what makes a restore legal.
//!
//! # Invariants
//!
//! 1. A placeholder exists iff the session is `FromDocked`.
//! 2. Restore returns the panel to exactly the size captured when the
//!    session was created (and, for dialogs, the position).
//! 3. Entering maximize is gated on the maximize control not being hidden;
//!    restoring is always allowed.
//! 4. A refused float rolls back every step taken so far.

use dockspan_core::geometry::{Point, Size};

use crate::host::DockHost;
use crate::panel::{MaximizeIcon, Panel, dispose_shadow};

/// Presentation state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationState {
    Docked,
    DialogNormal,
    MaximizedFromDocked,
    MaximizedFromDialog,
}

/// What a restore needs, captured when the panel was maximized.
#[derive(Debug)]
pub enum MaximizeSession {
    FromDocked {
        restore_size: Size,
        shadow: Box<Panel>,
    },
    FromDialog {
        restore_size: Size,
        restore_position: Point,
    },
}

impl MaximizeSession {
    #[must_use]
    pub fn restore_size(&self) -> Size {
        match self {
            Self::FromDocked { restore_size, .. } | Self::FromDialog { restore_size, .. } => {
                *restore_size
            }
        }
    }
}

/// A maximize or restore of this panel is running; tree notifications that
/// arrive meanwhile are its own doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeTransition {
    Maximizing,
    Restoring,
}

/// Why a maximize toggle did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeNoopReason {
    /// The maximize control is hidden.
    MaximizeHidden,
    /// A docked panel without a tree position.
    NotDocked,
    /// Floating, but no dialog is attached.
    NoDialog,
    /// The dock host refused to float the panel.
    CollaboratorRefused,
    /// Restore requested with no maximize in effect.
    NotMaximized,
}

/// Result of a maximize toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeOutcome {
    Maximized { from: PresentationState },
    Restored { to: PresentationState },
    Noop { reason: MaximizeNoopReason },
}

impl Panel {
    /// Whether the panel currently fills the viewport.
    #[inline]
    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.maximize.is_some()
    }

    #[must_use]
    pub fn presentation_state(&self) -> PresentationState {
        match (&self.maximize, self.is_dialog) {
            (Some(MaximizeSession::FromDocked { .. }), _) => PresentationState::MaximizedFromDocked,
            (Some(MaximizeSession::FromDialog { .. }), _) => PresentationState::MaximizedFromDialog,
            (None, true) => PresentationState::DialogNormal,
            (None, false) => PresentationState::Docked,
        }
    }

    /// The placeholder occupying this panel's tree slot, if maximized from
    /// the tree.
    #[must_use]
    pub fn shadow(&self) -> Option<&Panel> {
        match &self.maximize {
            Some(MaximizeSession::FromDocked { shadow, .. }) => Some(shadow.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn maximize_session(&self) -> Option<&MaximizeSession> {
        self.maximize.as_ref()
    }

    /// Title-bar maximize control pressed.
    ///
    /// Ignored while the control is not shown, unless the press restores.
    pub fn on_maximize_button_clicked(&mut self, dock: &mut dyn DockHost) -> MaximizeOutcome {
        if !self.is_maximized() && !self.chrome.maximize_button_visible {
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::MaximizeHidden,
            };
        }
        self.toggle_maximize(dock)
    }

    /// Maximize, or restore if already maximized.
    pub fn toggle_maximize(&mut self, dock: &mut dyn DockHost) -> MaximizeOutcome {
        if self.is_maximized() {
            self.transition = Some(MaximizeTransition::Restoring);
            let outcome = self.restore(dock);
            self.transition = None;
            return outcome;
        }
        if self.hide_maximize_button {
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::MaximizeHidden,
            };
        }
        self.transition = Some(MaximizeTransition::Maximizing);
        let outcome = if self.is_dialog {
            self.maximize_from_dialog(dock)
        } else {
            self.maximize_from_docked(dock)
        };
        self.transition = None;
        outcome
    }

    fn maximize_from_docked(&mut self, dock: &mut dyn DockHost) -> MaximizeOutcome {
        let Some(original_at) = self.dock_at else {
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::NotDocked,
            };
        };
        let restore_size = self.size();

        let mut shadow = self.spawn_shadow();
        let shadow_at = dock.dock_fill(Some(original_at), &shadow);
        shadow.on_panel_dock(shadow_at, dock);
        self.dock_at = Some(shadow_at);

        // The tree must lay out the placeholder before this panel leaves it.
        dock.set_active_tab(shadow.id());

        let Some(dialog) = dock.float_dialog(self, 0.0, 0.0) else {
            dispose_shadow(shadow, dock);
            self.dock_at = Some(original_at);
            dock.set_active_tab(self.id);
            tracing::debug!(
                target: "dockspan.panel",
                panel = %self.id,
                "panel.maximize refused by dock host"
            );
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::CollaboratorRefused,
            };
        };
        self.set_floating_dialog(Some(dialog));
        self.is_dialog = true;

        let viewport = dock.viewport_size();
        self.resize(viewport.width, viewport.height);

        self.maximize = Some(MaximizeSession::FromDocked {
            restore_size,
            shadow: Box::new(shadow),
        });
        self.finish_maximize(dock, PresentationState::Docked)
    }

    fn maximize_from_dialog(&mut self, dock: &mut dyn DockHost) -> MaximizeOutcome {
        let Some(dialog) = self.floating_dialog.clone() else {
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::NoDialog,
            };
        };
        let restore_size = self.size();
        let restore_position = dialog.position();
        dialog.set_position(0.0, 0.0);

        let viewport = dock.viewport_size();
        self.resize(viewport.width, viewport.height);

        self.maximize = Some(MaximizeSession::FromDialog {
            restore_size,
            restore_position,
        });
        self.finish_maximize(dock, PresentationState::DialogNormal)
    }

    fn finish_maximize(&mut self, dock: &mut dyn DockHost, from: PresentationState) -> MaximizeOutcome {
        self.chrome.maximize_icon = MaximizeIcon::Restore;
        dock.notify_on_maximize_panel(self.id, true);
        tracing::debug!(
            target: "dockspan.panel",
            panel = %self.id,
            from = ?from,
            width = self.width,
            height = self.height,
            "panel.maximize"
        );
        MaximizeOutcome::Maximized { from }
    }

    fn restore(&mut self, dock: &mut dyn DockHost) -> MaximizeOutcome {
        let Some(dialog) = self.floating_dialog.clone() else {
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::NoDialog,
            };
        };
        let Some(session) = self.maximize.take() else {
            return MaximizeOutcome::Noop {
                reason: MaximizeNoopReason::NotMaximized,
            };
        };

        let to = match session {
            MaximizeSession::FromDocked {
                restore_size,
                shadow,
            } => {
                self.resize(restore_size.width, restore_size.height);

                let at = dock.dock_dialog_fill(shadow.dock_at(), &dialog);
                self.prepare_for_docking();
                self.set_floating_dialog(None);
                self.on_panel_dock(at, dock);

                // Placeholder first, then this panel; the reverse leaves the
                // content with no measured height.
                dock.set_active_tab(shadow.id());
                dock.set_active_tab(self.id);

                dispose_shadow(*shadow, dock);
                PresentationState::Docked
            }
            MaximizeSession::FromDialog {
                restore_size,
                restore_position,
            } => {
                self.resize(restore_size.width, restore_size.height);
                dialog.set_position(restore_position.x, restore_position.y);
                PresentationState::DialogNormal
            }
        };

        self.chrome.maximize_icon = MaximizeIcon::Maximize;
        dock.notify_on_maximize_panel(self.id, false);
        tracing::debug!(
            target: "dockspan.panel",
            panel = %self.id,
            to = ?to,
            width = self.width,
            height = self.height,
            "panel.restore"
        );
        MaximizeOutcome::Restored { to }
    }
}
