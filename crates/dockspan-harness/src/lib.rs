#![forbid(unsafe_code)]

//! Test fixtures for dockspan.
//!
//! Every collaborator seam of `dockspan-panel` has a recording stand-in here:
//!
//! | Fixture | Seam |
//! |---------|------|
//! | [`RecordingDockHost`] | `DockHost` (tree, manager and tab host) |
//! | [`RecordingDialog`] | `FloatingDialog` |
//! | [`RecordingBinder`] | `EventBinder` |
//! | [`ScriptedContent`] | `PanelContent` |
//! | [`RecordingListener`], [`MoveTabRecorder`] | listener traits |
//!
//! The fixtures only record; assertions live in the tests that use them.

pub mod binder;
pub mod content;
pub mod dialog;
pub mod host;
pub mod listener;

pub use binder::RecordingBinder;
pub use content::ScriptedContent;
pub use dialog::RecordingDialog;
pub use host::{HostCall, RecordingDockHost};
pub use listener::{MoveTabRecorder, PanelNotification, RecordingListener};
