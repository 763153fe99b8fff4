#![forbid(unsafe_code)]

//! Hosted content.

use dockspan_core::event::ElementId;
use dockspan_core::geometry::Size;

use crate::error::ContentResizeError;

/// The element a panel wraps.
///
/// Only `element_id` and `client_size` are required; everything else has a
/// neutral default.
pub trait PanelContent {
    /// Element identity, recorded in saved state.
    fn element_id(&self) -> ElementId;

    /// Natural size of the element before it is docked.
    fn client_size(&self) -> Size;

    /// Caption data attribute; overrides the constructor title when present.
    fn caption(&self) -> Option<String> {
        None
    }

    /// Icon data attribute.
    fn icon(&self) -> Option<String> {
        None
    }

    /// Resize hook. `height` excludes the title bar.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), ContentResizeError> {
        let _ = (width, height);
        Ok(())
    }
}

/// Empty element used as the stand-in while the real panel is maximized.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderContent {
    element: ElementId,
}

impl PlaceholderContent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            element: ElementId::fresh(),
        }
    }
}

impl Default for PlaceholderContent {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelContent for PlaceholderContent {
    fn element_id(&self) -> ElementId {
        self.element
    }

    fn client_size(&self) -> Size {
        Size::default()
    }
}
