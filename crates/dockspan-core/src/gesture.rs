#![forbid(unsafe_code)]

//! Drag gestures for tab handles and title bars.
//!
//! Two independent recognizers live here:
//!
//! - [`TabDragRecognizer`] distinguishes a click from a horizontal tab drag
//!   and reports when the pointer pushes past the tab's own edge, which is
//!   the signal a tab strip uses to swap the tab with its neighbour.
//! - [`UndockInitiator`] watches for vertical displacement beyond a
//!   threshold and asks for the owning panel to be torn off into a dialog.
//!
//! # State Machine
//!
//! ```text
//! TabDragRecognizer:  Idle --press--> Pressed --move >= threshold--> Dragging
//!                       ^                |                              |
//!                       +----release-----+------------release-----------+
//! ```
//!
//! # Invariants
//!
//! 1. Movement whose cumulative horizontal displacement from the press point
//!    stays under the threshold never produces a move-tab signal.
//! 2. A move-tab signal fires once per boundary crossing: after firing on one
//!    side it re-arms only when the pointer is back inside the tab rectangle.
//! 3. `press` always discards scratch state from any earlier interaction,
//!    including one whose release was never observed.
//! 4. An [`UndockInitiator`] fires at most once per enable; it disables
//!    itself when it fires.

use crate::event::{PointerButton, PointerEvent};
use crate::geometry::{Point, Rect};

/// Horizontal displacement (px) separating a click from a tab drag.
pub const TAB_DRAG_THRESHOLD: f64 = 10.0;

/// Vertical displacement (px) that triggers an undock.
pub const UNDOCK_DRAG_THRESHOLD: f64 = 10.0;

// ---------------------------------------------------------------------------
// Tab drag
// ---------------------------------------------------------------------------

/// Which neighbouring slot a dragged tab has pushed past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabMoveDirection {
    Left,
    Right,
}

impl TabMoveDirection {
    /// Wire name used by move-tab listeners.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Move-tab signal: the drag crossed the tab's edge in the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabMove {
    pub direction: TabMoveDirection,
    /// The tab's bounding rectangle at the time of the crossing.
    pub rect: Rect,
}

/// Recognizer state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TabDragState {
    #[default]
    Idle,
    /// Pointer is down but has not moved past the threshold.
    Pressed { start_x: f64 },
    /// Pointer moved past the threshold; the tab is being dragged.
    Dragging {
        start_x: f64,
        prev: f64,
        current: f64,
        direction: f64,
    },
}

/// Outcome of feeding one pointer move to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabDragEffect {
    /// No press is active.
    Ignored,
    /// Still within the click threshold.
    BelowThreshold,
    /// The tab is being dragged.
    Dragged {
        /// True on the sample that crossed the threshold.
        started: bool,
        /// Signed delta from the previous sample.
        direction: f64,
        move_tab: Option<TabMove>,
    },
}

/// Click-versus-drag recognizer for a single tab handle.
#[derive(Debug, Clone)]
pub struct TabDragRecognizer {
    threshold: f64,
    state: TabDragState,
    // Side of the tab the pointer was on when we last fired.
    fired_side: Option<TabMoveDirection>,
}

impl Default for TabDragRecognizer {
    fn default() -> Self {
        Self::new(TAB_DRAG_THRESHOLD)
    }
}

impl TabDragRecognizer {
    /// Create a recognizer with the given click/drag threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: TabDragState::Idle,
            fired_side: None,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> TabDragState {
        self.state
    }

    /// Whether the threshold has been crossed during the current press.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, TabDragState::Dragging { .. })
    }

    /// Whether a press is active (pressed or dragging).
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, TabDragState::Idle)
    }

    /// Start a new interaction at `x`, discarding any previous scratch state.
    pub fn press(&mut self, x: f64) {
        self.state = TabDragState::Pressed { start_x: x };
        self.fired_side = None;
    }

    /// Feed a pointer move.
    ///
    /// `tab_rect` is the tab's current bounding rectangle; it moves when a
    /// listener reorders the tab in response to a previous signal.
    pub fn moved(&mut self, x: f64, tab_rect: Rect) -> TabDragEffect {
        let (start_x, current, was_dragging) = match self.state {
            TabDragState::Idle => return TabDragEffect::Ignored,
            TabDragState::Pressed { start_x } => (start_x, start_x, false),
            TabDragState::Dragging {
                start_x, current, ..
            } => (start_x, current, true),
        };

        if (start_x - x).abs() < self.threshold {
            return TabDragEffect::BelowThreshold;
        }

        let prev = current;
        let direction = x - prev;
        self.state = TabDragState::Dragging {
            start_x,
            prev,
            current: x,
            direction,
        };

        let side = if x < tab_rect.left() {
            Some(TabMoveDirection::Left)
        } else if x > tab_rect.right() {
            Some(TabMoveDirection::Right)
        } else {
            None
        };

        let travelling_toward_side = match side {
            Some(TabMoveDirection::Left) => direction < 0.0,
            Some(TabMoveDirection::Right) => direction > 0.0,
            None => false,
        };

        let move_tab = if travelling_toward_side && self.fired_side != side {
            self.fired_side = side;
            side.map(|direction| TabMove {
                direction,
                rect: tab_rect,
            })
        } else {
            if side.is_none() {
                self.fired_side = None;
            }
            None
        };

        #[cfg(feature = "tracing")]
        if let Some(mv) = &move_tab {
            crate::debug!(
                target: "dockspan.gesture",
                direction = mv.direction.as_str(),
                x,
                "tab_drag.cross"
            );
        }

        TabDragEffect::Dragged {
            started: !was_dragging,
            direction,
            move_tab,
        }
    }

    /// End the interaction. Returns whether the press had become a drag.
    pub fn release(&mut self) -> bool {
        let dragged = self.is_dragging();
        self.state = TabDragState::Idle;
        self.fired_side = None;
        dragged
    }
}

// ---------------------------------------------------------------------------
// Undock
// ---------------------------------------------------------------------------

/// Request produced when an undock gesture completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndockRequest {
    /// The move event that crossed the threshold.
    pub event: PointerEvent,
    /// Press position relative to the element's top-left corner.
    pub drag_offset: Point,
}

/// Drag-threshold helper that turns a vertical pull into an undock request.
#[derive(Debug, Clone)]
pub struct UndockInitiator {
    enabled: bool,
    threshold: f64,
    drag_start: Option<Point>,
    element_origin: Point,
}

impl Default for UndockInitiator {
    fn default() -> Self {
        Self::new(UNDOCK_DRAG_THRESHOLD)
    }
}

impl UndockInitiator {
    /// Create an enabled initiator with the given vertical threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            enabled: true,
            threshold,
            drag_start: None,
            element_origin: Point::ORIGIN,
        }
    }

    /// Whether the initiator reacts to presses.
    #[inline]
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable. Disabling abandons any armed press.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag_start = None;
        }
    }

    /// Whether a press is armed.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Arm on a primary-button press over the element at `element_rect`.
    ///
    /// Returns whether the press was accepted.
    pub fn press(&mut self, event: &PointerEvent, element_rect: Rect) -> bool {
        if !self.enabled || event.button != PointerButton::Primary {
            return false;
        }
        self.drag_start = Some(event.position());
        self.element_origin = element_rect.origin();
        true
    }

    /// Feed a pointer move; fires once vertical displacement exceeds the threshold.
    pub fn moved(&mut self, event: &PointerEvent) -> Option<UndockRequest> {
        if !self.enabled {
            return None;
        }
        let start = self.drag_start?;
        let dy = event.y - start.y;
        if dy.abs() <= self.threshold {
            return None;
        }
        self.enabled = false;
        self.drag_start = None;
        Some(UndockRequest {
            event: *event,
            drag_offset: start.offset_from(self.element_origin),
        })
    }

    /// Pointer released without undocking.
    pub fn release(&mut self) {
        self.drag_start = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerEventKind;

    fn tab() -> Rect {
        Rect::new(100.0, 0.0, 80.0, 24.0)
    }

    fn move_to(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Move, x, y)
    }

    fn down_at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Down, x, y)
    }

    // --- Tab drag ---

    #[test]
    fn move_without_press_is_ignored() {
        let mut gr = TabDragRecognizer::default();
        assert_eq!(gr.moved(300.0, tab()), TabDragEffect::Ignored);
    }

    #[test]
    fn small_moves_stay_below_threshold() {
        let mut gr = TabDragRecognizer::default();
        gr.press(140.0);
        assert_eq!(gr.moved(149.0, tab()), TabDragEffect::BelowThreshold);
        assert_eq!(gr.moved(131.0, tab()), TabDragEffect::BelowThreshold);
        assert!(!gr.is_dragging());
        assert!(!gr.release());
    }

    #[test]
    fn threshold_crossing_starts_drag_without_move_tab() {
        let mut gr = TabDragRecognizer::default();
        gr.press(140.0);
        let effect = gr.moved(150.0, tab());
        assert_eq!(
            effect,
            TabDragEffect::Dragged {
                started: true,
                direction: 10.0,
                move_tab: None,
            }
        );
        assert!(gr.is_dragging());
    }

    #[test]
    fn crossing_right_edge_fires_once() {
        let mut gr = TabDragRecognizer::default();
        gr.press(170.0);
        let fired: Vec<_> = [178.0, 182.0, 185.0, 190.0, 200.0]
            .into_iter()
            .filter_map(|x| match gr.moved(x, tab()) {
                TabDragEffect::Dragged { move_tab, .. } => move_tab,
                _ => None,
            })
            .collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].direction, TabMoveDirection::Right);
        assert_eq!(fired[0].rect, tab());
    }

    #[test]
    fn crossing_left_edge_fires_left() {
        let mut gr = TabDragRecognizer::default();
        gr.press(110.0);
        let effect = gr.moved(95.0, tab());
        let TabDragEffect::Dragged { move_tab, .. } = effect else {
            panic!("expected drag, got {effect:?}");
        };
        assert_eq!(move_tab.map(|m| m.direction), Some(TabMoveDirection::Left));
    }

    #[test]
    fn rearms_after_tab_moves_under_pointer() {
        let mut gr = TabDragRecognizer::default();
        gr.press(170.0);
        assert!(matches!(
            gr.moved(185.0, tab()),
            TabDragEffect::Dragged { move_tab: Some(_), .. }
        ));
        // A listener swapped the tab one slot to the right.
        let shifted = Rect::new(180.0, 0.0, 80.0, 24.0);
        assert!(matches!(
            gr.moved(200.0, shifted),
            TabDragEffect::Dragged { move_tab: None, .. }
        ));
        assert!(matches!(
            gr.moved(265.0, shifted),
            TabDragEffect::Dragged {
                move_tab: Some(TabMove {
                    direction: TabMoveDirection::Right,
                    ..
                }),
                ..
            }
        ));
    }

    #[test]
    fn outside_but_moving_back_does_not_fire() {
        let mut gr = TabDragRecognizer::default();
        gr.press(150.0);
        gr.moved(200.0, tab());
        let effect = gr.moved(195.0, tab());
        assert!(matches!(
            effect,
            TabDragEffect::Dragged { move_tab: None, .. }
        ));
    }

    #[test]
    fn press_resets_stale_state() {
        let mut gr = TabDragRecognizer::default();
        gr.press(150.0);
        gr.moved(200.0, tab());
        // Release never observed; a new press starts fresh.
        gr.press(120.0);
        assert_eq!(gr.state(), TabDragState::Pressed { start_x: 120.0 });
        assert_eq!(gr.moved(125.0, tab()), TabDragEffect::BelowThreshold);
    }

    #[test]
    fn release_reports_drag_and_returns_to_idle() {
        let mut gr = TabDragRecognizer::default();
        gr.press(150.0);
        gr.moved(170.0, tab());
        assert!(gr.release());
        assert_eq!(gr.state(), TabDragState::Idle);
        assert!(!gr.is_active());
    }

    #[test]
    fn direction_tracks_consecutive_samples() {
        let mut gr = TabDragRecognizer::default();
        gr.press(140.0);
        gr.moved(160.0, tab());
        let effect = gr.moved(155.0, tab());
        assert!(matches!(
            effect,
            TabDragEffect::Dragged { direction, started: false, .. } if direction == -5.0
        ));
    }

    #[test]
    fn direction_names() {
        assert_eq!(TabMoveDirection::Left.as_str(), "left");
        assert_eq!(TabMoveDirection::Right.as_str(), "right");
    }

    // --- Undock ---

    #[test]
    fn undock_fires_on_vertical_pull() {
        let mut ui = UndockInitiator::default();
        assert!(ui.press(&down_at(120.0, 10.0), Rect::new(100.0, 0.0, 200.0, 24.0)));
        assert_eq!(ui.moved(&move_to(160.0, 15.0)), None);
        let req = ui.moved(&move_to(125.0, 25.0)).expect("undock");
        assert_eq!(req.drag_offset, Point::new(20.0, 10.0));
        assert!(!ui.enabled());
        assert_eq!(ui.moved(&move_to(125.0, 60.0)), None);
    }

    #[test]
    fn horizontal_drag_never_undocks() {
        let mut ui = UndockInitiator::default();
        ui.press(&down_at(120.0, 10.0), Rect::default());
        assert_eq!(ui.moved(&move_to(400.0, 12.0)), None);
        assert!(ui.is_armed());
    }

    #[test]
    fn disabled_initiator_ignores_press() {
        let mut ui = UndockInitiator::default();
        ui.set_enabled(false);
        assert!(!ui.press(&down_at(0.0, 0.0), Rect::default()));
        assert_eq!(ui.moved(&move_to(0.0, 100.0)), None);
    }

    #[test]
    fn secondary_button_does_not_arm() {
        let mut ui = UndockInitiator::default();
        let ev = down_at(0.0, 0.0).with_button(PointerButton::Secondary);
        assert!(!ui.press(&ev, Rect::default()));
    }

    #[test]
    fn release_disarms() {
        let mut ui = UndockInitiator::default();
        ui.press(&down_at(0.0, 0.0), Rect::default());
        ui.release();
        assert_eq!(ui.moved(&move_to(0.0, 100.0)), None);
        assert!(ui.enabled());
    }
}
