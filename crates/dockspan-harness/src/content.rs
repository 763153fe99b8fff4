#![forbid(unsafe_code)]

//! Hosted content stand-in.

use std::cell::RefCell;
use std::rc::Rc;

use dockspan_core::event::ElementId;
use dockspan_core::geometry::Size;
use dockspan_panel::{ContentResizeError, PanelContent};

/// Content with a fixed natural size that logs its resize calls.
#[derive(Debug, Clone)]
pub struct ScriptedContent {
    element: ElementId,
    size: Size,
    caption: Option<String>,
    icon: Option<String>,
    fail_resize: bool,
    resizes: Rc<RefCell<Vec<Size>>>,
}

impl ScriptedContent {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            element: ElementId::fresh(),
            size: Size::new(width, height),
            caption: None,
            icon: None,
            fail_resize: false,
            resizes: Rc::default(),
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Make every resize call fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_resize = true;
        self
    }

    /// Shared log of the sizes the panel pushed into this content.
    #[must_use]
    pub fn resize_log(&self) -> Rc<RefCell<Vec<Size>>> {
        Rc::clone(&self.resizes)
    }

    #[must_use]
    pub fn boxed(self) -> Box<dyn PanelContent> {
        Box::new(self)
    }
}

impl PanelContent for ScriptedContent {
    fn element_id(&self) -> ElementId {
        self.element
    }

    fn client_size(&self) -> Size {
        self.size
    }

    fn caption(&self) -> Option<String> {
        self.caption.clone()
    }

    fn icon(&self) -> Option<String> {
        self.icon.clone()
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), ContentResizeError> {
        self.resizes.borrow_mut().push(Size::new(width, height));
        if self.fail_resize {
            return Err(ContentResizeError::new(format!(
                "scripted failure at {width}x{height}"
            )));
        }
        Ok(())
    }
}
