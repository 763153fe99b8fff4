#![forbid(unsafe_code)]

//! The close protocol.
//!
//! Closing is asynchronous and vetoable. The effective approval predicate is
//! resolved once per close from two tiers (the panel's own callback, then the
//! dock manager's default) and otherwise approves unconditionally.
//!
//! The protocol is split in two so a host that cannot hold `&mut Panel`
//! across an await can still drive it:
//!
//! 1. [`Panel::begin_close`] resolves the policy and returns a
//!    [`PendingClose`] future. Nothing about the panel changes except that it
//!    is now marked as closing.
//! 2. [`Panel::finish_close`] applies the resolved answer.
//!
//! [`Panel::close`] does both. While one close is pending, further requests
//! resolve immediately to [`CloseOutcome::AlreadyPending`]. Dropping the
//! [`PendingClose`] unanswered, or calling [`Panel::cancel_close`], ends the
//! pending state.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::host::{CloseCallback, CloseFuture, CloseRequest, DockHost, PanelId};
use crate::maximize::MaximizeSession;
use crate::panel::{MaximizeIcon, Panel, dispose_shadow};

/// Which tier supplied the approval predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePolicySource {
    /// The panel's own callback.
    Panel,
    /// The dock manager's default callback.
    DockManager,
    /// Nobody; approval is unconditional.
    Default,
}

/// The single effective approval predicate for one close.
#[derive(Clone)]
pub struct ClosePolicy {
    source: ClosePolicySource,
    callback: Option<CloseCallback>,
}

impl fmt::Debug for ClosePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosePolicy")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl ClosePolicy {
    /// Panel callback wins, then the manager's, then unconditional approval.
    #[must_use]
    pub fn resolve(panel: Option<CloseCallback>, manager: Option<CloseCallback>) -> Self {
        match (panel, manager) {
            (Some(callback), _) => Self {
                source: ClosePolicySource::Panel,
                callback: Some(callback),
            },
            (None, Some(callback)) => Self {
                source: ClosePolicySource::DockManager,
                callback: Some(callback),
            },
            (None, None) => Self {
                source: ClosePolicySource::Default,
                callback: None,
            },
        }
    }

    #[must_use]
    pub fn source(&self) -> ClosePolicySource {
        self.source
    }

    /// Start evaluating the predicate.
    #[must_use]
    pub fn evaluate(&self, request: &CloseRequest) -> CloseFuture {
        match &self.callback {
            Some(callback) => callback(request),
            None => Box::pin(std::future::ready(true)),
        }
    }
}

/// Shared liveness flag of one close. Cleared when the close is abandoned.
pub(crate) type CloseTicket = Rc<Cell<bool>>;

/// An approval in flight. Resolves to the approval answer.
///
/// Dropping it before it resolves abandons the close, so the panel accepts
/// new close requests again.
pub struct PendingClose {
    panel: PanelId,
    source: ClosePolicySource,
    approval: CloseFuture,
    ticket: CloseTicket,
    answered: bool,
}

impl PendingClose {
    #[must_use]
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    #[must_use]
    pub fn source(&self) -> ClosePolicySource {
        self.source
    }
}

impl fmt::Debug for PendingClose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingClose")
            .field("panel", &self.panel)
            .field("source", &self.source)
            .field("answered", &self.answered)
            .finish_non_exhaustive()
    }
}

impl Future for PendingClose {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let answer = self.approval.as_mut().poll(cx);
        if answer.is_ready() {
            self.answered = true;
        }
        answer
    }
}

impl Drop for PendingClose {
    fn drop(&mut self) {
        if !self.answered {
            self.ticket.set(false);
        }
    }
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The predicate said no. Nothing changed.
    Vetoed,
    /// Approved while floating; the dialog was asked to close.
    ClosedDialog,
    /// Approved while docked; the tree was asked to prune the panel.
    ClosedDocked,
    /// Approved, but the panel is floating with no dialog attached.
    /// Nothing changed.
    AlreadyDetached,
    /// Another close of this panel is still waiting for its answer.
    AlreadyPending,
    /// `finish_close` called with no close in flight.
    NotPending,
}

impl Panel {
    /// Install or clear the panel's own approval callback.
    pub fn set_close_callback(&mut self, callback: Option<CloseCallback>) {
        self.close_callback = callback;
    }

    /// Resolve the approval predicate for a close starting now.
    #[must_use]
    pub fn close_policy(&self, dock: &dyn DockHost) -> ClosePolicy {
        ClosePolicy::resolve(self.close_callback.clone(), dock.default_close_callback())
    }

    /// Whether a close is waiting for its approval.
    #[must_use]
    pub fn is_close_pending(&self) -> bool {
        self.close_ticket.as_ref().is_some_and(|ticket| ticket.get())
    }

    /// Start a close. Returns `None` if one is already pending.
    pub fn begin_close(&mut self, dock: &dyn DockHost) -> Option<PendingClose> {
        if self.is_close_pending() {
            return None;
        }
        let policy = self.close_policy(dock);
        let request = CloseRequest {
            panel: self.id,
            title: self.title.clone(),
            panel_type: self.panel_type,
        };
        let ticket = Rc::new(Cell::new(true));
        self.close_ticket = Some(Rc::clone(&ticket));
        Some(PendingClose {
            panel: self.id,
            source: policy.source(),
            approval: policy.evaluate(&request),
            ticket,
            answered: false,
        })
    }

    /// Abandon the pending close, if any. Returns whether one was pending.
    ///
    /// A [`PendingClose`] still held by the caller may resolve later; while
    /// no newer close is pending, [`Panel::finish_close`] refuses its answer.
    pub fn cancel_close(&mut self) -> bool {
        match self.close_ticket.take() {
            Some(ticket) => {
                let live = ticket.replace(false);
                if live {
                    tracing::debug!(target: "dockspan.panel", panel = %self.id, "panel.close cancelled");
                }
                live
            }
            None => false,
        }
    }

    /// Apply the answer of the pending close.
    pub fn finish_close(&mut self, approved: bool, dock: &mut dyn DockHost) -> CloseOutcome {
        match self.close_ticket.take() {
            Some(ticket) if ticket.replace(false) => {}
            _ => return CloseOutcome::NotPending,
        }

        if !approved {
            tracing::debug!(target: "dockspan.panel", panel = %self.id, "panel.close vetoed");
            return CloseOutcome::Vetoed;
        }

        let outcome = if self.is_dialog {
            match self.floating_dialog.clone() {
                Some(dialog) => {
                    if let Some(session) = self.maximize.take() {
                        self.chrome.maximize_icon = MaximizeIcon::Maximize;
                        if let MaximizeSession::FromDocked { shadow, .. } = session {
                            dispose_shadow(*shadow, dock);
                        }
                    }
                    dialog.close();
                    CloseOutcome::ClosedDialog
                }
                None => CloseOutcome::AlreadyDetached,
            }
        } else {
            self.perform_close(dock);
            dock.notify_on_close_panel(self.id);
            CloseOutcome::ClosedDocked
        };
        tracing::debug!(
            target: "dockspan.panel",
            panel = %self.id,
            outcome = ?outcome,
            "panel.close"
        );
        outcome
    }

    /// Ask for approval, then close.
    pub async fn close(&mut self, dock: &mut dyn DockHost) -> CloseOutcome {
        let Some(pending) = self.begin_close(dock) else {
            return CloseOutcome::AlreadyPending;
        };
        let approved = pending.await;
        self.finish_close(approved, dock)
    }

    /// Title-bar close control pressed. `None` while the control is hidden.
    pub async fn on_close_button_clicked(&mut self, dock: &mut dyn DockHost) -> Option<CloseOutcome> {
        if !self.chrome.close_button_visible {
            return None;
        }
        Some(self.close(dock).await)
    }
}
