//! The local action facade.
//!
//! `ActionFacade` owns one participant's replica of a session. UI code calls
//! its methods; each builds the matching `GameAction`, runs it through the
//! dispatcher with `Local` origin and hands back the `ActionResult`.
//!
//! ## Notifications
//!
//! - Success callbacks (`on_success`) see every successful *local* action.
//!   The network bridge registers one to relay actions to peers.
//! - Subscribers (`subscribe`) receive a `TableChange` with the new snapshot
//!   after every state change, local or remote.
//!
//! Remote replays (`apply_remote`) never trigger success callbacks, so a
//! replayed action is not echoed back onto the wire.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Instant;

use glam::Vec2;
use im::Vector;
use tracing::{debug, info};

use super::hover::HoverPreview;
use crate::cards::CardInstance;
use crate::core::action::{ActionOrigin, GameAction};
use crate::core::config::TableConfig;
use crate::core::entity::{InstanceId, SessionId};
use crate::core::player::{PlayerId, PlayerState};
use crate::core::state::Session;
use crate::rules::{self, ActionOutcome, ActionResult};
use crate::selection::{GestureOutcome, PointerTarget, SelectionEngine};
use crate::spatial::{BoardLayout, Bounds, Footprint, Position, Viewport};

/// Callback run after each successful local action.
pub type SuccessCallback = Box<dyn FnMut(&GameAction)>;

/// What caused a `TableChange`.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeCause {
    /// An action was applied.
    Action {
        action: GameAction,
        origin: ActionOrigin,
    },
    /// The viewport changed and positions were reclamped.
    Resized(Viewport),
    Connection { player: PlayerId, connected: bool },
    /// A player's replica was replaced by their own snapshot.
    Snapshot(PlayerId),
    Ended,
}

/// A state-change notification.
#[derive(Clone, Debug, PartialEq)]
pub struct TableChange {
    pub snapshot: Session,
    pub cause: ChangeCause,
}

/// One participant's entry point into a session.
pub struct ActionFacade {
    local: PlayerId,
    state: Session,
    layout: BoardLayout,
    selection: SelectionEngine,
    hover: HoverPreview,
    callbacks: Vec<SuccessCallback>,
    subscribers: Vec<Sender<TableChange>>,
}

impl ActionFacade {
    /// Create an empty replica of `session` for the `local` participant.
    #[must_use]
    pub fn new(session: SessionId, local: PlayerId, config: &TableConfig) -> Self {
        let layout = config.layout();
        Self {
            local,
            state: Session::new(session, layout.bounds()).with_history_limit(config.history_limit),
            layout,
            selection: SelectionEngine::new(config.drag_threshold),
            hover: HoverPreview::from_millis(config.hover_delay_ms),
            callbacks: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub fn local_player(&self) -> PlayerId {
        self.local
    }

    /// The current snapshot. Borrowing it is free; clone to keep it.
    #[must_use]
    pub fn state(&self) -> &Session {
        &self.state
    }

    /// An owned snapshot (O(1) clone).
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.clone()
    }

    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    #[must_use]
    pub fn footprint(&self) -> Footprint {
        self.layout.footprint()
    }

    // === Notifications ===

    /// Register a callback for successful local actions.
    pub fn on_success(&mut self, callback: impl FnMut(&GameAction) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Stream of state changes. Dropped receivers are pruned on the next change.
    pub fn subscribe(&mut self) -> Receiver<TableChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, cause: ChangeCause) {
        if self.subscribers.is_empty() {
            return;
        }
        let change = TableChange {
            snapshot: self.state.clone(),
            cause,
        };
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    // === Local actions ===

    /// Join (or rejoin) as the local participant with a seeded library.
    pub fn join(&mut self, username: impl Into<String>, library: Vector<CardInstance>) -> ActionResult {
        let result = self.submit(GameAction::PlayerJoined {
            player: self.local,
            username: username.into(),
            library,
        });
        if result.is_ok() {
            info!(session = %self.state.id(), player = %self.local, "joined session");
        }
        result
    }

    pub fn draw_card(&mut self) -> ActionResult {
        self.submit(GameAction::DrawCard { player: self.local })
    }

    pub fn play_card(&mut self, instance: InstanceId, position: Position) -> ActionResult {
        self.submit(GameAction::PlayCard {
            player: self.local,
            instance,
            position,
        })
    }

    pub fn tap_card(&mut self, instance: InstanceId, tapped: bool) -> ActionResult {
        self.submit(GameAction::TapCard {
            player: self.local,
            instance,
            tapped,
        })
    }

    pub fn move_card(&mut self, instance: InstanceId, position: Position) -> ActionResult {
        self.submit(GameAction::MoveCard {
            player: self.local,
            instance,
            position,
        })
    }

    pub fn return_to_hand(&mut self, instance: InstanceId) -> ActionResult {
        self.submit(GameAction::ReturnToHand {
            player: self.local,
            instance,
        })
    }

    /// Dispatch an action as the local participant.
    ///
    /// On success the state advances, success callbacks run with the
    /// original action and subscribers are notified. Failures change nothing.
    pub fn submit(&mut self, action: GameAction) -> ActionResult {
        let outcome = rules::dispatch(&self.state, &action, ActionOrigin::Local);
        if let Ok(result) = &outcome.result {
            let changed = result.changed_state();
            self.state = outcome.state;
            for callback in &mut self.callbacks {
                callback(&action);
            }
            if changed {
                self.publish(ChangeCause::Action {
                    action,
                    origin: ActionOrigin::Local,
                });
            }
        }
        outcome.result
    }

    /// Dispatch a batch one action at a time, in order.
    pub fn submit_all(&mut self, actions: impl IntoIterator<Item = GameAction>) -> Vec<ActionResult> {
        actions.into_iter().map(|action| self.submit(action)).collect()
    }

    /// Replay an action received from a peer. No success callbacks.
    pub fn apply_remote(&mut self, action: GameAction) -> ActionResult {
        let outcome = rules::dispatch(&self.state, &action, ActionOrigin::Remote);
        if outcome.result.as_ref().is_ok_and(ActionOutcome::changed_state) {
            self.state = outcome.state;
            self.publish(ChangeCause::Action {
                action,
                origin: ActionOrigin::Remote,
            });
        }
        outcome.result
    }

    // === Replica-local changes ===

    /// Switch viewport, re-evaluate the footprint and reclamp every card.
    pub fn resize(&mut self, viewport: Viewport) -> Bounds {
        let bounds = self.layout.resize(viewport);
        debug!(
            session = %self.state.id(),
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        self.state = rules::reclamp(&self.state, bounds);
        self.publish(ChangeCause::Resized(viewport));
        bounds
    }

    /// Mark a participant connected or disconnected.
    pub fn set_connected(&mut self, player: PlayerId, connected: bool) {
        let next = rules::set_connection(&self.state, player, connected);
        if next != self.state {
            self.state = next;
            self.publish(ChangeCause::Connection { player, connected });
        }
    }

    /// Replace another participant's replica with their own snapshot.
    ///
    /// Snapshots of the local player are ignored; this replica is
    /// authoritative for its own zones.
    pub fn install_snapshot(&mut self, snapshot: PlayerState) -> bool {
        let player = snapshot.id();
        if player == self.local {
            return false;
        }
        self.state = rules::install_player(&self.state, snapshot);
        self.publish(ChangeCause::Snapshot(player));
        true
    }

    /// End the session on this replica.
    pub fn end(&mut self) {
        self.state = rules::end_session(&self.state);
        self.selection.escape();
        self.hover.cancel();
        self.publish(ChangeCause::Ended);
    }

    // === Selection ===

    #[must_use]
    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn pointer_down(&mut self, at: Vec2, target: PointerTarget) -> bool {
        self.selection.pointer_down(at, target)
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.selection.pointer_move(at);
    }

    pub fn pointer_up(&mut self, at: Vec2) -> GestureOutcome {
        let footprint = self.footprint();
        self.selection.pointer_up(at, &self.state, self.local, footprint)
    }

    pub fn escape(&mut self) {
        self.selection.escape();
    }

    /// Tap or untap the whole selection, then clear it.
    pub fn tap_selected(&mut self) -> Vec<ActionResult> {
        let actions = self.selection.tap_selected(&self.state, self.local);
        self.submit_all(actions)
    }

    /// Move the whole selection by `delta`, then clear it.
    pub fn move_selected(&mut self, delta: Position) -> Vec<ActionResult> {
        let actions = self.selection.move_selected(&self.state, self.local, delta);
        self.submit_all(actions)
    }

    pub fn return_selected(&mut self) -> Vec<ActionResult> {
        let actions = self.selection.return_selected(&self.state, self.local);
        self.submit_all(actions)
    }

    // === Hover ===

    pub fn hover_enter(&mut self, instance: InstanceId, now: Instant) {
        self.hover.start(instance, now);
    }

    pub fn hover_leave(&mut self) {
        self.hover.cancel();
    }

    pub fn poll_hover(&mut self, now: Instant) -> Option<InstanceId> {
        self.hover.poll(now)
    }
}

impl std::fmt::Debug for ActionFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionFacade")
            .field("local", &self.local)
            .field("session", &self.state.id())
            .field("callbacks", &self.callbacks.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardKey};
    use crate::rules::ActionError;
    use crate::spatial::{Footprint, FootprintTable};
    use std::cell::RefCell;
    use std::rc::Rc;

    const ALICE: PlayerId = PlayerId::new(1);
    const BOB: PlayerId = PlayerId::new(2);

    fn library(player: PlayerId, names: &[&str]) -> Vector<CardInstance> {
        names
            .iter()
            .zip(0u32..)
            .map(|(name, serial)| {
                CardInstance::new(InstanceId::new(player, serial), CardDefinition::new(CardKey::new(*name), *name))
            })
            .collect()
    }

    fn facade() -> ActionFacade {
        let mut facade = ActionFacade::new(SessionId::new(7), ALICE, &TableConfig::new());
        facade.join("alice", library(ALICE, &["Bolt", "Counterspell", "Ritual"])).unwrap();
        facade
    }

    #[test]
    fn test_callbacks_see_successful_local_actions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut facade = facade();
        let sink = Rc::clone(&seen);
        facade.on_success(move |action| sink.borrow_mut().push(action.clone()));

        facade.draw_card().unwrap();
        assert!(facade.tap_card(InstanceId::new(ALICE, 0), true).is_err());
        facade.apply_remote(GameAction::DrawCard { player: ALICE }).unwrap();

        assert_eq!(*seen.borrow(), vec![GameAction::DrawCard { player: ALICE }]);
    }

    #[test]
    fn test_failure_leaves_state() {
        let mut facade = facade();
        let before = facade.snapshot();

        let result = facade.play_card(InstanceId::new(ALICE, 2), Vec2::new(10.0, 10.0));

        assert_eq!(result, Err(ActionError::CardNotInHand { player: ALICE, instance: InstanceId::new(ALICE, 2) }));
        assert_eq!(facade.state(), &before);
    }

    #[test]
    fn test_subscribers_get_snapshots() {
        let mut facade = facade();
        let changes = facade.subscribe();

        facade.draw_card().unwrap();
        facade.play_card(InstanceId::new(ALICE, 0), Vec2::new(500.0, 500.0)).unwrap();

        let received: Vec<TableChange> = changes.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[1].snapshot, facade.snapshot());
        assert!(matches!(
            received[0].cause,
            ChangeCause::Action { action: GameAction::DrawCard { .. }, origin: ActionOrigin::Local }
        ));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut facade = facade();
        drop(facade.subscribe());
        let live = facade.subscribe();

        facade.draw_card().unwrap();

        assert_eq!(live.try_iter().count(), 1);
        assert_eq!(facade.subscribers.len(), 1);
    }

    #[test]
    fn test_resize_reclamps() {
        let config = TableConfig::new().with_footprints(
            FootprintTable::uniform(Footprint::new(20.0, 20.0)).with_tier(768.0, Footprint::new(100.0, 140.0)),
        );
        let mut facade = ActionFacade::new(SessionId::new(1), ALICE, &config);
        facade.join("alice", library(ALICE, &["Bolt"])).unwrap();
        facade.draw_card().unwrap();
        let played = facade.play_card(InstanceId::new(ALICE, 0), Vec2::new(10.0, 10.0)).unwrap();
        assert!(!played.hit_boundary());

        facade.resize(Viewport::new(480.0, 1080.0));

        let card = facade.state().battlefield_card(InstanceId::new(ALICE, 0)).unwrap();
        assert_eq!(card.position, Vec2::new(50.0, 70.0));
        assert_eq!(facade.footprint(), Footprint::new(100.0, 140.0));
    }

    #[test]
    fn test_selection_round_trip() {
        let mut facade = facade();
        for serial in 0..2 {
            facade.draw_card().unwrap();
            facade
                .play_card(InstanceId::new(ALICE, serial), Vec2::new(400.0 + 300.0 * serial as f32, 400.0))
                .unwrap();
        }

        facade.pointer_down(Vec2::new(0.0, 0.0), PointerTarget::EmptySpace);
        facade.pointer_move(Vec2::new(1000.0, 800.0));
        assert_eq!(facade.pointer_up(Vec2::new(1000.0, 800.0)), GestureOutcome::Selected(2));

        let results = facade.tap_selected();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(Result::is_ok));
        assert!(facade.selection().selected().is_empty());
        assert!(facade.state().battlefield().all(|c| c.tapped));
    }

    #[test]
    fn test_own_snapshot_ignored() {
        let mut facade = facade();
        let own = PlayerState::new(ALICE, "impostor");
        assert!(!facade.install_snapshot(own));
        assert_eq!(facade.state().player(ALICE).unwrap().username(), "alice");

        let bob = PlayerState::new(BOB, "bob");
        assert!(facade.install_snapshot(bob));
        assert_eq!(facade.state().player_count(), 2);
    }

    #[test]
    fn test_rejoin_outcome() {
        let mut facade = facade();
        assert_eq!(facade.join("alice", Vector::new()), Ok(ActionOutcome::AlreadyPresent(ALICE)));
    }

    #[test]
    fn test_end_rejects_later_actions() {
        let mut facade = facade();
        facade.end();
        assert_eq!(facade.draw_card(), Err(ActionError::SessionEnded));
    }

    #[test]
    fn test_drag_moves_keep_history_bounded() {
        let config = TableConfig::new().with_history_limit(100);
        let mut facade = ActionFacade::new(SessionId::new(7), ALICE, &config);
        facade.join("alice", library(ALICE, &["Bolt"])).unwrap();
        let bolt = InstanceId::new(ALICE, 0);
        facade.draw_card().unwrap();
        facade.play_card(bolt, Vec2::new(300.0, 300.0)).unwrap();

        for step in 0..10_000u32 {
            facade.move_card(bolt, Vec2::new(200.0 + (step % 400) as f32, 300.0)).unwrap();
        }

        let history = facade.state().history();
        assert_eq!(history.len(), 100);
        assert_eq!(history.back().unwrap().sequence, 10_002);
        assert!(matches!(history.front().unwrap().action, GameAction::MoveCard { .. }));
    }
}
