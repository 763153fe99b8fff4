#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can log through `dockspan_core::debug!` and
//! friends. Without the feature nothing is exported and no logging code is
//! compiled in.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};
