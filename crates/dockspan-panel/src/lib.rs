#![forbid(unsafe_code)]

//! Panel interaction state for a docking layout.
//!
//! # Role in dockspan
//! `dockspan-panel` decides how one panel moves between docked, floating,
//! maximized and closed presentation, and how its tab reacts to clicks and
//! drags. Layout, dialog chrome and element construction stay with the host,
//! which plugs in through [`DockHost`], [`FloatingDialog`], [`PanelContent`]
//! and [`EventBinder`](dockspan_core::event::EventBinder).
//!
//! # Key types
//! - [`Panel`]: presentation state, button policy, undock and close protocols.
//! - [`MaximizeOutcome`] / [`CloseOutcome`]: what a maximize toggle or a
//!   close request actually did.
//! - [`TabHandle`]: gesture handling and visual mirror for a panel's tab.
//! - [`DockConfig`]: thresholds and defaults, loadable from TOML or JSON
//!   with the `config` feature.
//!
//! # Logging
//! Lifecycle transitions emit `tracing` events under the `dockspan.panel`
//! and `dockspan.tab` targets.

pub mod close;
pub mod config;
pub mod content;
pub mod context_menu;
pub mod error;
pub mod events;
pub mod host;
pub mod maximize;
pub mod panel;
pub mod state;
pub mod tab_handle;

pub use close::{CloseOutcome, ClosePolicy, ClosePolicySource, PendingClose};
pub use config::DockConfig;
pub use content::{PanelContent, PlaceholderContent};
pub use context_menu::{ContextMenu, ContextMenuItem};
pub use error::{ConfigError, ContentResizeError};
pub use events::{MoveTabEvent, PanelEvent, PanelListener, TabHandleListener};
pub use host::{
    CloseCallback, CloseFuture, CloseRequest, ContainerType, DialogHandle, DockHost, DockNodeId,
    FloatingDialog, PanelId, PanelType,
};
pub use maximize::{MaximizeNoopReason, MaximizeOutcome, MaximizeSession, PresentationState};
pub use panel::{DockNotice, MaximizeIcon, Panel, PanelChrome, PanelOptions};
pub use state::PanelState;
pub use tab_handle::{ContextMenuAction, TabClasses, TabHandle, TabPointerEffect};
