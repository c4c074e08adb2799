//! One local participant seated at one session.

use thiserror::Error;
use tracing::info;

use crate::cards::{seed_library, DeckError, DeckList};
use crate::core::config::{ConfigError, TableConfig};
use crate::core::entity::SessionId;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::Session;
use crate::facade::ActionFacade;
use crate::net::{NetError, SyncBridge, Transport};
use crate::rules::ActionError;

/// Why a table could not be opened or rejoined.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("join rejected: {0}")]
    Join(#[from] ActionError),

    #[error("{0} is already open")]
    AlreadyOpen(SessionId),
}

/// A facade wired to a sync bridge.
///
/// `pump` moves frames in both directions; call it from the host's event
/// loop after handling local input.
#[derive(Debug)]
pub struct Table {
    facade: ActionFacade,
    bridge: SyncBridge,
}

impl Table {
    /// Connect to `session`, seed the local library from `deck` and join.
    ///
    /// The join and a snapshot of the fresh zones are broadcast before this
    /// returns, so peers that saw an earlier seat of ours replace it.
    pub fn open(
        transport: &mut dyn Transport,
        session: SessionId,
        local: PlayerId,
        username: impl Into<String>,
        deck: &DeckList,
        config: &TableConfig,
    ) -> Result<Self, TableError> {
        config.validate()?;

        let mut facade = ActionFacade::new(session, local, config);
        let mut bridge = SyncBridge::connect(transport, &mut facade)?;

        let mut rng = config
            .shuffle_libraries
            .then(|| GameRng::new(config.seed).for_context(&format!("library:{}", local.raw())));
        let library = seed_library(local, deck, rng.as_mut());

        facade.join(username, library)?;
        bridge.flush();
        bridge.announce(&facade);
        info!(%session, player = %local, cards = deck.len(), "table opened");

        Ok(Self { facade, bridge })
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.bridge.session()
    }

    #[must_use]
    pub fn facade(&self) -> &ActionFacade {
        &self.facade
    }

    /// Local actions go through here; call `pump` afterwards to relay them.
    pub fn facade_mut(&mut self) -> &mut ActionFacade {
        &mut self.facade
    }

    #[must_use]
    pub fn bridge(&self) -> &SyncBridge {
        &self.bridge
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.facade.snapshot()
    }

    /// Send queued local events and replay everything received.
    pub fn pump(&mut self) -> usize {
        self.bridge.poll(&mut self.facade)
    }

    pub fn reconnect(&mut self, transport: &mut dyn Transport) -> Result<(), TableError> {
        self.bridge.reconnect(transport, &self.facade)?;
        Ok(())
    }

    /// Leave the session, release the connection and end it locally.
    /// Returns the final snapshot.
    pub fn close(mut self) -> Session {
        self.bridge.leave();
        self.facade.end();
        self.facade.snapshot()
    }
}
