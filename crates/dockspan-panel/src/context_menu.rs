#![forbid(unsafe_code)]

//! Tab context menu for document panels.

use dockspan_core::event::{ElementId, SubscriptionId};
use dockspan_core::geometry::Point;

use crate::host::{PanelId, PanelType};

/// Entries of the document tab context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextMenuItem {
    CloseAllDocuments,
    CloseAllDocumentsButThis,
}

impl ContextMenuItem {
    /// Entries in display order.
    pub const ALL: [Self; 2] = [Self::CloseAllDocuments, Self::CloseAllDocumentsButThis];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CloseAllDocuments => "Close all documents",
            Self::CloseAllDocumentsButThis => "Close all documents but this",
        }
    }

    /// Panels to close, in close order.
    ///
    /// Walks `documents` from the back so removing each one does not shift
    /// the ones still to visit. Only `Document` panels qualify.
    #[must_use]
    pub fn close_targets(self, documents: &[(PanelId, PanelType)], this: PanelId) -> Vec<PanelId> {
        documents
            .iter()
            .rev()
            .filter(|(_, ty)| *ty == PanelType::Document)
            .filter(|(id, _)| self == Self::CloseAllDocuments || *id != this)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    element: ElementId,
    position: Point,
    window_subscription: SubscriptionId,
}

impl ContextMenu {
    pub(crate) fn new(position: Point, window_subscription: SubscriptionId) -> Self {
        Self {
            element: ElementId::fresh(),
            position,
            window_subscription,
        }
    }

    /// Menu element; pointer-ups whose path contains it keep the menu open.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Page position the menu opened at.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn items(&self) -> &'static [ContextMenuItem] {
        &ContextMenuItem::ALL
    }

    pub(crate) fn window_subscription(&self) -> SubscriptionId {
        self.window_subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(ContextMenuItem::CloseAllDocuments.label(), "Close all documents");
        assert_eq!(
            ContextMenuItem::CloseAllDocumentsButThis.label(),
            "Close all documents but this"
        );
    }

    #[test]
    fn close_targets_walk_backwards_over_documents_only() {
        let a = PanelId::next();
        let b = PanelId::next();
        let c = PanelId::next();
        let docs = [
            (a, PanelType::Document),
            (b, PanelType::Panel),
            (c, PanelType::Document),
        ];
        assert_eq!(ContextMenuItem::CloseAllDocuments.close_targets(&docs, a), vec![c, a]);
        assert_eq!(
            ContextMenuItem::CloseAllDocumentsButThis.close_targets(&docs, a),
            vec![c]
        );
    }
}
