//! Action dispatcher: `(state, action) → (new state, result)`.
//!
//! `dispatch` never mutates its input. It works on an O(1) clone of the
//! session and returns that clone on success, or the untouched input on
//! failure, so every applied action yields a structurally new snapshot.
//!
//! Actions are applied one at a time in the order the caller hands them
//! over. There is no locking; a session replica has exactly one writer.
//!
//! ## Authorization
//!
//! `TapCard` and `ReturnToHand` check card ownership for `Local` origin only.
//! `Remote` replays skip the check: the remote participant already passed it
//! on their own replica and is authoritative over their cards. `MoveCard`
//! succeeds for any existing card.

use tracing::debug;

use super::error::{ActionError, ActionOutcome, ActionResult};
use crate::cards::BattlefieldCard;
use crate::core::action::{ActionOrigin, GameAction};
use crate::core::entity::InstanceId;
use crate::core::player::{PlayerId, PlayerState};
use crate::core::state::{Session, SessionStatus};
use crate::spatial::{Bounds, Position};

/// A dispatched action: the resulting snapshot and what happened.
#[derive(Clone, Debug)]
pub struct Dispatch {
    pub state: Session,
    pub result: ActionResult,
}

impl Dispatch {
    fn unchanged(state: &Session, result: ActionResult) -> Self {
        Self {
            state: state.clone(),
            result,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Apply one action to a session snapshot.
///
/// Always returns; failures leave the returned state equal to the input.
#[must_use]
pub fn dispatch(state: &Session, action: &GameAction, origin: ActionOrigin) -> Dispatch {
    let mut next = state.clone();

    match apply(&mut next, action, origin) {
        Ok(outcome) if outcome.changed_state() => {
            let seq = next.record(action.clone(), origin);
            debug!(
                session = %state.id(),
                action = action.kind(),
                player = %action.player(),
                ?origin,
                seq,
                "action applied"
            );
            Dispatch {
                state: next,
                result: Ok(outcome),
            }
        }
        Ok(outcome) => Dispatch::unchanged(state, Ok(outcome)),
        Err(err) => {
            debug!(
                session = %state.id(),
                action = action.kind(),
                ?origin,
                %err,
                "action rejected"
            );
            Dispatch::unchanged(state, Err(err))
        }
    }
}

fn apply(state: &mut Session, action: &GameAction, origin: ActionOrigin) -> ActionResult {
    if state.status() == SessionStatus::Ended {
        return Err(ActionError::SessionEnded);
    }

    match action {
        GameAction::PlayerJoined {
            player,
            username,
            library,
        } => {
            if let Some(existing) = state.player_mut(*player) {
                if existing.is_connected() {
                    return Ok(ActionOutcome::AlreadyPresent(*player));
                }
                existing.set_connected(true);
                return Ok(ActionOutcome::Rejoined(*player));
            }
            state.insert_player(PlayerState::new(*player, username.clone()).with_library(library.clone()));
            Ok(ActionOutcome::Joined(*player))
        }

        GameAction::DrawCard { player } => {
            let state = acting_player(state, *player)?;
            state
                .draw()
                .map(ActionOutcome::Drew)
                .ok_or(ActionError::EmptyLibrary(*player))
        }

        GameAction::PlayCard {
            player,
            instance,
            position,
        } => {
            let bounds = state.bounds();
            let z_index = state.max_z_index() + 1;
            let actor = acting_player(state, *player)?;
            let card = actor
                .take_from_hand(*instance)
                .ok_or(ActionError::CardNotInHand {
                    player: *player,
                    instance: *instance,
                })?;

            let clamped = bounds.clamp(*position);
            actor.place(BattlefieldCard::new(card, *player, clamped.position, z_index));

            Ok(ActionOutcome::Played {
                instance: *instance,
                position: clamped.position,
                clamped: clamped.clamped,
            })
        }

        GameAction::TapCard {
            player,
            instance,
            tapped,
        } => {
            acting_player(state, *player)?;
            let owner = authorized_owner(state, *player, *instance, origin)?;
            let card = battlefield_card_mut(state, owner, *instance)?;
            card.tapped = *tapped;

            Ok(ActionOutcome::Tapped {
                instance: *instance,
                tapped: *tapped,
            })
        }

        GameAction::MoveCard {
            player,
            instance,
            position,
        } => {
            acting_player(state, *player)?;
            let owner = owner_of(state, *instance)?;
            let clamped = state.bounds().clamp(*position);
            let z_index = next_z_for(state, *instance);
            let card = battlefield_card_mut(state, owner, *instance)?;
            card.position = clamped.position;
            card.z_index = z_index;

            Ok(ActionOutcome::Moved {
                instance: *instance,
                position: clamped.position,
                clamped: clamped.clamped,
            })
        }

        GameAction::ReturnToHand { player, instance } => {
            acting_player(state, *player)?;
            let owner = authorized_owner(state, *player, *instance, origin)?;
            let owner_state = state
                .player_mut(owner)
                .ok_or(ActionError::CardNotOnBattlefield(*instance))?;
            let card = owner_state
                .take_from_battlefield(*instance)
                .ok_or(ActionError::CardNotOnBattlefield(*instance))?;
            owner_state.push_hand(card.into_instance());

            Ok(ActionOutcome::Returned(*instance))
        }
    }
}

fn acting_player(state: &mut Session, player: PlayerId) -> Result<&mut PlayerState, ActionError> {
    state
        .player_mut(player)
        .ok_or(ActionError::UnknownPlayer(player))
}

fn owner_of(state: &Session, instance: InstanceId) -> Result<PlayerId, ActionError> {
    state
        .battlefield_card(instance)
        .map(|card| card.owner)
        .ok_or(ActionError::CardNotOnBattlefield(instance))
}

fn authorized_owner(
    state: &Session,
    player: PlayerId,
    instance: InstanceId,
    origin: ActionOrigin,
) -> Result<PlayerId, ActionError> {
    let owner = owner_of(state, instance)?;
    if origin == ActionOrigin::Local && owner != player {
        return Err(ActionError::NotOwner { player, instance });
    }
    Ok(owner)
}

fn battlefield_card_mut(
    state: &mut Session,
    owner: PlayerId,
    instance: InstanceId,
) -> Result<&mut BattlefieldCard, ActionError> {
    state
        .player_mut(owner)
        .and_then(|p| p.battlefield_card_mut(instance))
        .ok_or(ActionError::CardNotOnBattlefield(instance))
}

/// Stacking index that puts `instance` on top. A card already on top keeps
/// its index so repeated moves don't inflate the counter.
fn next_z_for(state: &Session, instance: InstanceId) -> u32 {
    let current = state.battlefield_card(instance).map_or(0, |c| c.z_index);
    let others = state
        .battlefield()
        .filter(|c| c.instance_id() != instance)
        .map(|c| c.z_index)
        .max()
        .unwrap_or(0);
    if current > others {
        current
    } else {
        others + 1
    }
}

// === Replica-local operations (not broadcast) ===

/// Switch to new bounds and reclamp every battlefield card.
///
/// Cards already inside the new bounds keep their position.
#[must_use]
pub fn reclamp(state: &Session, bounds: Bounds) -> Session {
    let mut next = state.clone();
    next.set_bounds(bounds);

    let outside: Vec<(PlayerId, InstanceId, Position)> = state
        .battlefield()
        .filter(|card| !bounds.contains(card.position))
        .map(|card| (card.owner, card.instance_id(), card.position))
        .collect();

    if !outside.is_empty() {
        debug!(session = %state.id(), cards = outside.len(), "battlefield reclamped");
    }

    for (owner, instance, position) in outside {
        if let Some(card) = next
            .player_mut(owner)
            .and_then(|p| p.battlefield_card_mut(instance))
        {
            card.position = bounds.clamp(position).position;
        }
    }
    next
}

/// Mark a player connected or disconnected. Their cards stay where they are.
///
/// Unknown players are ignored.
#[must_use]
pub fn set_connection(state: &Session, player: PlayerId, connected: bool) -> Session {
    let mut next = state.clone();
    match next.player_mut(player) {
        Some(p) if p.is_connected() != connected => {
            p.set_connected(connected);
            next
        }
        _ => state.clone(),
    }
}

/// Replace one player's replica with an authoritative snapshot.
///
/// Battlefield positions are reclamped against this replica's bounds.
#[must_use]
pub fn install_player(state: &Session, snapshot: PlayerState) -> Session {
    let bounds = state.bounds();
    let mut player = snapshot;

    let ids: Vec<InstanceId> = player.battlefield().keys().copied().collect();
    for id in ids {
        if let Some(card) = player.battlefield_card_mut(id) {
            card.position = bounds.clamp(card.position).position;
        }
    }

    let mut next = state.clone();
    next.insert_player(player);
    next
}

/// Tear the session down. Every later dispatch fails with `SessionEnded`.
#[must_use]
pub fn end_session(state: &Session) -> Session {
    let mut next = state.clone();
    next.end();
    next
}
