//! Owner of every session this process takes part in.
//!
//! Sessions are isolated: each `Table` has its own replica, facade and
//! bridge, keyed by `SessionId`. Nothing is shared between them.

use rustc_hash::FxHashMap;
use tracing::info;

use super::seat::{Table, TableError};
use crate::cards::DeckLoader;
use crate::core::config::TableConfig;
use crate::core::entity::SessionId;
use crate::core::player::PlayerId;
use crate::core::state::Session;
use crate::net::Transport;

/// Map of open sessions for one local participant.
#[derive(Debug)]
pub struct TableManager {
    config: TableConfig,
    tables: FxHashMap<SessionId, Table>,
}

impl TableManager {
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            tables: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Load `local`'s deck, open the session and join it.
    pub fn open(
        &mut self,
        transport: &mut dyn Transport,
        session: SessionId,
        local: PlayerId,
        username: impl Into<String>,
        decks: &dyn DeckLoader,
    ) -> Result<&mut Table, TableError> {
        if self.tables.contains_key(&session) {
            return Err(TableError::AlreadyOpen(session));
        }
        let deck = decks.load_deck(local)?;
        let table = Table::open(transport, session, local, username, &deck, &self.config)?;
        Ok(self.tables.entry(session).or_insert(table))
    }

    #[must_use]
    pub fn get(&self, session: SessionId) -> Option<&Table> {
        self.tables.get(&session)
    }

    pub fn get_mut(&mut self, session: SessionId) -> Option<&mut Table> {
        self.tables.get_mut(&session)
    }

    /// Leave and tear down a session. Returns its final, ended snapshot.
    pub fn close(&mut self, session: SessionId) -> Option<Session> {
        let table = self.tables.remove(&session)?;
        let last = table.close();
        info!(%session, remaining = self.tables.len(), "table closed");
        Some(last)
    }

    /// Open session ids, ascending.
    #[must_use]
    pub fn sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Pump every table once. Returns the number of remote events applied.
    pub fn pump_all(&mut self) -> usize {
        self.tables.values_mut().map(Table::pump).sum()
    }
}
