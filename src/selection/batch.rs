//! Batch actions over a selection.
//!
//! Each helper turns a selection into one `GameAction` per card, skipping
//! anything that left the battlefield or changed hands since it was selected.

use im::OrdSet;
use smallvec::SmallVec;

use crate::cards::BattlefieldCard;
use crate::core::action::GameAction;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::state::Session;
use crate::spatial::Position;

/// Actions produced by a batch operation.
pub type BatchActions = SmallVec<[GameAction; 8]>;

fn live<'a>(
    session: &'a Session,
    actor: PlayerId,
    selection: &'a OrdSet<InstanceId>,
) -> impl Iterator<Item = &'a BattlefieldCard> + 'a {
    selection
        .iter()
        .filter_map(move |id| session.battlefield_card(*id))
        .filter(move |card| card.owner == actor)
}

/// Tapped state a batch tap should set: untapped wins.
///
/// `Some(true)` if any selected card is untapped, `Some(false)` if all are
/// tapped, `None` if nothing selected is still on the battlefield.
#[must_use]
pub fn batch_tap_target(session: &Session, actor: PlayerId, selection: &OrdSet<InstanceId>) -> Option<bool> {
    let mut any = false;
    for card in live(session, actor, selection) {
        if !card.tapped {
            return Some(true);
        }
        any = true;
    }
    any.then_some(false)
}

/// Tap (or untap) every selected card to the same state.
#[must_use]
pub fn batch_tap(session: &Session, actor: PlayerId, selection: &OrdSet<InstanceId>) -> BatchActions {
    let Some(tapped) = batch_tap_target(session, actor, selection) else {
        return BatchActions::new();
    };
    live(session, actor, selection)
        .map(|card| GameAction::TapCard {
            player: actor,
            instance: card.instance_id(),
            tapped,
        })
        .collect()
}

/// Shift every selected card by `delta`. Clamping happens at dispatch.
#[must_use]
pub fn batch_move(
    session: &Session,
    actor: PlayerId,
    selection: &OrdSet<InstanceId>,
    delta: Position,
) -> BatchActions {
    live(session, actor, selection)
        .map(|card| GameAction::MoveCard {
            player: actor,
            instance: card.instance_id(),
            position: card.position + delta,
        })
        .collect()
}

#[must_use]
pub fn batch_return(session: &Session, actor: PlayerId, selection: &OrdSet<InstanceId>) -> BatchActions {
    live(session, actor, selection)
        .map(|card| GameAction::ReturnToHand {
            player: actor,
            instance: card.instance_id(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardInstance, CardKey};
    use crate::core::action::ActionOrigin;
    use crate::core::entity::SessionId;
    use crate::rules::dispatch;
    use crate::spatial::{Bounds, Footprint, Viewport};
    use glam::Vec2;
    use im::Vector;

    const ALICE: PlayerId = PlayerId::new(1);
    const BOB: PlayerId = PlayerId::new(2);

    fn apply(state: Session, actions: &[GameAction]) -> Session {
        actions
            .iter()
            .fold(state, |s, a| dispatch(&s, a, ActionOrigin::Local).state)
    }

    fn board() -> Session {
        let bounds = Bounds::new(Footprint::new(100.0, 140.0), Viewport::new(1920.0, 1080.0));
        let mut actions = Vec::new();
        for player in [ALICE, BOB] {
            let library: Vector<CardInstance> = (0..3)
                .map(|i| CardInstance::new(InstanceId::new(player, i), CardDefinition::new(CardKey::new("c"), "C")))
                .collect();
            actions.push(GameAction::PlayerJoined { player, username: "u".into(), library });
            for i in 0..3 {
                actions.push(GameAction::DrawCard { player });
                actions.push(GameAction::PlayCard {
                    player,
                    instance: InstanceId::new(player, i),
                    position: Vec2::new(300.0 + 200.0 * i as f32, 400.0),
                });
            }
        }
        apply(Session::new(SessionId::new(1), bounds), &actions)
    }

    fn alice_all() -> OrdSet<InstanceId> {
        (0..3).map(|i| InstanceId::new(ALICE, i)).collect()
    }

    #[test]
    fn test_mixed_selection_taps_all() {
        let state = apply(
            board(),
            &[GameAction::TapCard { player: ALICE, instance: InstanceId::new(ALICE, 1), tapped: true }],
        );
        assert_eq!(batch_tap_target(&state, ALICE, &alice_all()), Some(true));

        let actions = batch_tap(&state, ALICE, &alice_all());
        assert_eq!(actions.len(), 3);
        let state = apply(state, &actions);
        assert!(state.player(ALICE).unwrap().battlefield().values().all(|c| c.tapped));

        assert_eq!(batch_tap_target(&state, ALICE, &alice_all()), Some(false));
        let actions = batch_tap(&state, ALICE, &alice_all());
        let state = apply(state, &actions);
        assert!(state.player(ALICE).unwrap().battlefield().values().all(|c| !c.tapped));
    }

    #[test]
    fn test_stale_and_foreign_entries_skipped() {
        let state = apply(
            board(),
            &[GameAction::ReturnToHand { player: ALICE, instance: InstanceId::new(ALICE, 2) }],
        );
        let mut selection = alice_all();
        selection.insert(InstanceId::new(BOB, 0));

        let actions = batch_return(&state, ALICE, &selection);

        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.instance().map(|i| i.player()) == Some(ALICE)));
    }

    #[test]
    fn test_batch_move_keeps_offsets() {
        let state = board();
        let actions = batch_move(&state, ALICE, &alice_all(), Vec2::new(10.0, -20.0));
        let moved = apply(state, &actions);

        let xs: Vec<f32> = moved
            .player(ALICE)
            .unwrap()
            .battlefield()
            .values()
            .map(|c| c.position.x)
            .collect();
        assert_eq!(xs, vec![310.0, 510.0, 710.0]);
        assert!(moved.player(ALICE).unwrap().battlefield().values().all(|c| c.position.y == 380.0));
    }

    #[test]
    fn test_empty_selection() {
        let state = board();
        assert_eq!(batch_tap_target(&state, ALICE, &OrdSet::new()), None);
        assert!(batch_tap(&state, ALICE, &OrdSet::new()).is_empty());
    }
}
