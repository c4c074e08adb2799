//! Session state: one game's complete replica.
//!
//! ## Session
//!
//! - Id, turn counter, phase, status
//! - Players by id (ordered map of `PlayerState`)
//! - Current player
//! - Replica-local bounds used to clamp positions
//! - Action history, capped at the most recent `history_limit` records
//!
//! Uses `im` persistent data structures, so `clone()` is O(1) and every
//! dispatch can hand out a structurally new snapshot that shares unchanged
//! players with the previous one. Readers holding an old snapshot never
//! observe a half-applied action.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::{ActionOrigin, ActionRecord, GameAction};
use super::config::PhaseId;
use super::entity::{InstanceId, SessionId};
use super::player::{PlayerId, PlayerState};
use crate::cards::BattlefieldCard;
use crate::spatial::Bounds;

/// Records kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Created, nobody has joined yet.
    #[default]
    Waiting,
    /// At least one player has joined.
    Active,
    /// Torn down; every further action is rejected.
    Ended,
}

/// One session replica.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,

    /// Turn counter (starts at 1). No progression rules are enforced.
    pub turn: u32,

    /// Current phase (opaque to the engine).
    pub phase: PhaseId,

    status: SessionStatus,
    players: OrdMap<PlayerId, PlayerState>,
    current_player: Option<PlayerId>,
    bounds: Bounds,
    history: Vector<ActionRecord>,
    #[serde(default = "default_history_limit")]
    history_limit: usize,
    sequence: u32,
}

impl Session {
    /// Create an empty session clamping against `bounds`.
    #[must_use]
    pub fn new(id: SessionId, bounds: Bounds) -> Self {
        Self {
            id,
            turn: 1,
            phase: PhaseId::default(),
            status: SessionStatus::Waiting,
            players: OrdMap::new(),
            current_player: None,
            bounds,
            history: Vector::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            sequence: 0,
        }
    }

    /// Keep at most `limit` history records (at least one).
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self.trim_history();
        self
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_player
    }

    /// Bounds every battlefield position currently satisfies.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    #[must_use]
    pub fn players(&self) -> &OrdMap<PlayerId, PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // === Battlefield ===

    /// Find a battlefield card by instance, whoever owns it.
    #[must_use]
    pub fn battlefield_card(&self, instance: InstanceId) -> Option<&BattlefieldCard> {
        self.players
            .get(&instance.player())
            .and_then(|p| p.battlefield().get(&instance))
            .or_else(|| self.players.values().find_map(|p| p.battlefield().get(&instance)))
    }

    /// Every battlefield card across all players.
    pub fn battlefield(&self) -> impl Iterator<Item = &BattlefieldCard> {
        self.players.values().flat_map(|p| p.battlefield().values())
    }

    /// Highest stacking index on the board (0 when empty).
    #[must_use]
    pub fn max_z_index(&self) -> u32 {
        self.battlefield().map(|c| c.z_index).max().unwrap_or(0)
    }

    // === History ===

    /// The most recent applied actions in local arrival order.
    ///
    /// Older records are dropped once `history_limit` is reached; sequence
    /// numbers keep counting, so gaps at the front show what was dropped.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    // === Mutation (dispatcher only) ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    /// Insert or replace a player. The first player becomes current and
    /// moves the session out of `Waiting`.
    pub(crate) fn insert_player(&mut self, player: PlayerState) {
        let id = player.id();
        self.players.insert(id, player);
        if self.current_player.is_none() {
            self.current_player = Some(id);
        }
        if self.status == SessionStatus::Waiting {
            self.status = SessionStatus::Active;
        }
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub(crate) fn end(&mut self) {
        self.status = SessionStatus::Ended;
    }

    /// Append to history and return the sequence number used.
    pub(crate) fn record(&mut self, action: GameAction, origin: ActionOrigin) -> u32 {
        let seq = self.sequence;
        self.history
            .push_back(ActionRecord::new(action, origin, self.turn, seq));
        self.trim_history();
        self.sequence += 1;
        seq
    }
}
