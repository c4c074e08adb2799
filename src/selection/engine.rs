//! Rectangle selection gestures.
//!
//! A drag that starts over empty board space grows a selection rectangle.
//! On release, if the pointer travelled further than the drag threshold,
//! the acting player's cards under the rectangle become the selection;
//! shorter drags count as a click on empty space and clear it.
//!
//! ```
//! use ccg_table::selection::{GestureOutcome, PointerTarget, SelectionEngine};
//! use ccg_table::spatial::Footprint;
//! # use ccg_table::core::{PlayerId, Session, SessionId};
//! # use ccg_table::spatial::{Bounds, Viewport};
//! use glam::Vec2;
//!
//! # let session = Session::new(SessionId::new(1), Bounds::new(Footprint::new(100.0, 140.0), Viewport::new(800.0, 600.0)));
//! let mut engine = SelectionEngine::new(5.0);
//! engine.pointer_down(Vec2::new(10.0, 10.0), PointerTarget::EmptySpace);
//! let outcome = engine.pointer_up(Vec2::new(12.0, 11.0), &session, PlayerId::new(1), Footprint::new(100.0, 140.0));
//!
//! assert_eq!(outcome, GestureOutcome::Cleared);
//! ```

use glam::Vec2;
use im::OrdSet;
use tracing::trace;

use super::batch::{self, BatchActions};
use super::rect::Rect;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::state::Session;
use crate::spatial::{Footprint, Position};

/// What the pointer went down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    EmptySpace,
    /// A card; dragging it is a move, not a selection.
    Card(InstanceId),
}

/// Result of releasing the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No selection gesture was in progress.
    Ignored,
    /// The rectangle finalized; holds the number of cards selected.
    Selected(usize),
    /// Treated as a click on empty space; selection cleared.
    Cleared,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    origin: Vec2,
    current: Vec2,
}

/// Selection state for one local player.
#[derive(Clone, Debug)]
pub struct SelectionEngine {
    threshold: f32,
    drag: Option<Drag>,
    selected: OrdSet<InstanceId>,
}

impl SelectionEngine {
    /// `threshold`: minimum drag distance for a rectangle to count.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            drag: None,
            selected: OrdSet::new(),
        }
    }

    /// Start a gesture. Returns true if a selection rectangle began.
    pub fn pointer_down(&mut self, at: Vec2, target: PointerTarget) -> bool {
        match target {
            PointerTarget::EmptySpace => {
                self.drag = Some(Drag {
                    origin: at,
                    current: at,
                });
                true
            }
            PointerTarget::Card(_) => false,
        }
    }

    /// Grow the rectangle. No-op outside a gesture.
    pub fn pointer_move(&mut self, at: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = at;
        }
    }

    /// Finish the gesture.
    pub fn pointer_up(
        &mut self,
        at: Vec2,
        session: &Session,
        actor: PlayerId,
        footprint: Footprint,
    ) -> GestureOutcome {
        let Some(mut drag) = self.drag.take() else {
            return GestureOutcome::Ignored;
        };
        drag.current = at;

        if drag.origin.distance(drag.current) <= self.threshold {
            self.clear();
            return GestureOutcome::Cleared;
        }

        let rect = Rect::from_corners(drag.origin, drag.current);
        self.selected = hit_test(session, actor, &rect, footprint);
        trace!(player = %actor, count = self.selected.len(), "rectangle selection");
        GestureOutcome::Selected(self.selected.len())
    }

    /// Escape key: abort any gesture and clear the selection.
    pub fn escape(&mut self) {
        self.drag = None;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.selected = OrdSet::new();
    }

    /// The in-progress rectangle, for drawing.
    #[must_use]
    pub fn active_rect(&self) -> Option<Rect> {
        self.drag.map(|d| Rect::from_corners(d.origin, d.current))
    }

    #[must_use]
    pub fn selected(&self) -> &OrdSet<InstanceId> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, instance: InstanceId) -> bool {
        self.selected.contains(&instance)
    }

    // === Batch actions (clear the selection once issued) ===

    /// Tap or untap every selected card; see [`batch::batch_tap_target`].
    pub fn tap_selected(&mut self, session: &Session, actor: PlayerId) -> BatchActions {
        let actions = batch::batch_tap(session, actor, &self.selected);
        self.clear();
        actions
    }

    /// Move every selected card by `delta`.
    pub fn move_selected(
        &mut self,
        session: &Session,
        actor: PlayerId,
        delta: Position,
    ) -> BatchActions {
        let actions = batch::batch_move(session, actor, &self.selected, delta);
        self.clear();
        actions
    }

    /// Return every selected card to hand.
    pub fn return_selected(&mut self, session: &Session, actor: PlayerId) -> BatchActions {
        let actions = batch::batch_return(session, actor, &self.selected);
        self.clear();
        actions
    }
}

/// The acting player's battlefield cards whose box intersects `rect`.
///
/// Other players' cards are never eligible, even if visually inside.
#[must_use]
pub fn hit_test(session: &Session, actor: PlayerId, rect: &Rect, footprint: Footprint) -> OrdSet<InstanceId> {
    session
        .player(actor)
        .map(|p| {
            p.battlefield()
                .values()
                .filter(|card| rect.intersects(&Rect::around(card.position, footprint)))
                .map(|card| card.instance_id())
                .collect()
        })
        .unwrap_or_default()
}
