#![forbid(unsafe_code)]

//! Floating dialog stand-in.

use std::cell::{Cell, RefCell};

use dockspan_core::geometry::Point;
use dockspan_panel::FloatingDialog;

/// Dialog that remembers where it was moved and how often it was closed.
#[derive(Debug, Default)]
pub struct RecordingDialog {
    position: Cell<Point>,
    moves: RefCell<Vec<Point>>,
    closes: Cell<usize>,
}

impl RecordingDialog {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Cell::new(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// Every `set_position` call, in order.
    #[must_use]
    pub fn moves(&self) -> Vec<Point> {
        self.moves.borrow().clone()
    }

    #[must_use]
    pub fn close_count(&self) -> usize {
        self.closes.get()
    }
}

impl FloatingDialog for RecordingDialog {
    fn position(&self) -> Point {
        self.position.get()
    }

    fn set_position(&self, x: f64, y: f64) {
        let point = Point::new(x, y);
        self.position.set(point);
        self.moves.borrow_mut().push(point);
    }

    fn close(&self) {
        self.closes.set(self.closes.get() + 1);
    }
}
