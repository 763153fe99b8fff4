#![forbid(unsafe_code)]

//! Core: pointer events, geometry, listener fan-out and drag gestures.
//!
//! # Role in dockspan
//! `dockspan-core` is the input layer. It owns the normalized pointer event
//! vocabulary the host pushes in, the CSS-pixel geometry shared by panels and
//! tab handles, the ordered listener registry used for observer fan-out, and
//! the two drag recognizers (tab reordering and undock initiation).
//!
//! # How it fits in the system
//! `dockspan-panel` consumes these types to drive panel presentation state.
//! Nothing in this crate touches a dock tree or a dialog; it only classifies
//! input and delivers notifications.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod listener;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
