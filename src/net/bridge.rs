//! Network synchronization bridge.
//!
//! The bridge sits between an `ActionFacade` and a `Connection`:
//!
//! - **Outbound**: it registers a success callback on the facade, so every
//!   successfully dispatched local action is queued as a `RemoteEvent`.
//!   `flush` encodes and emits the queue.
//! - **Inbound**: `poll` drains the connection and replays each event
//!   through the facade with `Remote` origin.
//!
//! ## Join protocol
//!
//! A participant broadcasts its own `PlayerJoined` (with its seeded library).
//! Whoever sees a *new* player join replies with a `PlayerSnapshot` of its
//! own zones, so the newcomer learns the existing table without a global
//! snapshot. Each participant is authoritative for its own zones.
//!
//! ## Failures
//!
//! Decode errors, foreign-session frames, events naming a player other than
//! their sender, and rejected remote actions are logged and counted in `BridgeStats`; nothing is reported back to the
//! sender. While disconnected, local actions keep applying locally and their
//! events are dropped, not queued for retry.

use std::sync::mpsc::{channel, Receiver};

use tracing::{debug, info, warn};

use super::codec::{Envelope, NetError};
use super::event::RemoteEvent;
use super::transport::{Connection, Transport, TransportEvent};
use crate::core::entity::SessionId;
use crate::core::player::PlayerId;
use crate::facade::ActionFacade;
use crate::rules::ActionOutcome;

/// Whether the bridge currently has a usable connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Counters for what the bridge has seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub sent: u64,
    /// Outbound events discarded while disconnected.
    pub dropped: u64,
    pub received: u64,
    pub applied: u64,
    /// Remote events the local dispatcher refused.
    pub rejected: u64,
    pub decode_errors: u64,
    pub foreign_frames: u64,
}

/// Relays one participant's actions to and from a session channel.
pub struct SyncBridge {
    session: SessionId,
    local: PlayerId,
    connection: Box<dyn Connection>,
    outbox: Receiver<RemoteEvent>,
    seq: u64,
    state: ConnectionState,
    stats: BridgeStats,
}

impl SyncBridge {
    /// Subscribe `facade`'s participant to its session and start relaying
    /// its successful local actions.
    pub fn connect(transport: &mut dyn Transport, facade: &mut ActionFacade) -> Result<Self, NetError> {
        let session = facade.state().id();
        let local = facade.local_player();
        let connection = transport.subscribe(session, local)?;

        let (tx, outbox) = channel();
        facade.on_success(move |action| {
            // The receiver only goes away with the bridge.
            let _ = tx.send(RemoteEvent::from(action.clone()));
        });
        info!(%session, player = %local, "bridge connected");

        Ok(Self {
            session,
            local,
            connection,
            outbox,
            seq: 0,
            state: ConnectionState::Connected,
            stats: BridgeStats::default(),
        })
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    #[must_use]
    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Emit every queued local event. Returns how many were sent.
    pub fn flush(&mut self) -> usize {
        let mut sent = 0;
        while let Ok(event) = self.outbox.try_recv() {
            if self.send(event) {
                sent += 1;
            }
        }
        sent
    }

    fn send(&mut self, event: RemoteEvent) -> bool {
        if self.state == ConnectionState::Disconnected {
            self.stats.dropped += 1;
            return false;
        }

        let envelope = Envelope::new(self.session, self.local, self.seq, event);
        let frame = match envelope.encode() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(session = %self.session, event = envelope.event.kind(), %err, "failed to encode event");
                self.stats.dropped += 1;
                return false;
            }
        };

        match self.connection.emit(frame) {
            Ok(()) => {
                self.seq += 1;
                self.stats.sent += 1;
                true
            }
            Err(err) => {
                warn!(session = %self.session, %err, "emit failed, marking bridge disconnected");
                self.state = ConnectionState::Disconnected;
                self.stats.dropped += 1;
                false
            }
        }
    }

    /// Drain the connection, replaying remote events into `facade`.
    ///
    /// Also flushes anything queued locally, including snapshot replies.
    /// Returns the number of events applied.
    pub fn poll(&mut self, facade: &mut ActionFacade) -> usize {
        self.flush();

        let mut applied = 0;
        while let Some(event) = self.connection.recv() {
            match event {
                TransportEvent::Frame(frame) => {
                    if self.receive(facade, &frame) {
                        applied += 1;
                    }
                }
                TransportEvent::PeerConnected(peer) => {
                    debug!(session = %self.session, %peer, "peer connected");
                }
                TransportEvent::PeerDisconnected(peer) => {
                    info!(session = %self.session, %peer, "peer disconnected");
                    facade.set_connected(peer, false);
                }
            }
        }

        if self.state == ConnectionState::Connected && !self.connection.is_open() {
            warn!(session = %self.session, "connection closed");
            self.state = ConnectionState::Disconnected;
        }

        self.flush();
        applied
    }

    fn receive(&mut self, facade: &mut ActionFacade, frame: &[u8]) -> bool {
        self.stats.received += 1;
        let envelope = match Envelope::decode_for(self.session, frame) {
            Ok(envelope) => envelope,
            Err(NetError::SessionMismatch { found, .. }) => {
                warn!(session = %self.session, %found, "dropping frame for another session");
                self.stats.foreign_frames += 1;
                return false;
            }
            Err(err) => {
                warn!(session = %self.session, %err, "dropping undecodable frame");
                self.stats.decode_errors += 1;
                return false;
            }
        };

        let sender = envelope.sender;
        let kind = envelope.event.kind();
        let about = envelope.event.player();
        if about != sender {
            warn!(session = %self.session, %sender, %about, event = kind, "ignoring event sent on behalf of another player");
            self.stats.rejected += 1;
            return false;
        }

        match envelope.event {
            RemoteEvent::PlayerSnapshot(snapshot) => {
                let installed = facade.install_snapshot(snapshot);
                if installed {
                    self.stats.applied += 1;
                }
                installed
            }
            RemoteEvent::PlayerLeft { player } => {
                info!(session = %self.session, %player, "player left");
                facade.set_connected(player, false);
                self.stats.applied += 1;
                true
            }
            event => {
                let Some(action) = event.into_action() else {
                    return false;
                };
                match facade.apply_remote(action) {
                    Ok(outcome) => {
                        self.stats.applied += 1;
                        if let ActionOutcome::Joined(player) | ActionOutcome::Rejoined(player) = outcome {
                            info!(session = %self.session, %player, "player joined");
                            self.reply_with_snapshot(facade);
                        }
                        true
                    }
                    Err(err) => {
                        warn!(session = %self.session, %sender, event = kind, %err, "remote event rejected");
                        self.stats.rejected += 1;
                        false
                    }
                }
            }
        }
    }

    fn reply_with_snapshot(&mut self, facade: &ActionFacade) {
        if let Some(own) = facade.state().player(self.local) {
            self.send(RemoteEvent::PlayerSnapshot(own.clone()));
        }
    }

    /// Announce a graceful exit and release the connection.
    ///
    /// The participant can subscribe to the session again afterwards.
    pub fn leave(&mut self) {
        self.flush();
        self.send(RemoteEvent::PlayerLeft { player: self.local });
        self.connection.close();
        self.state = ConnectionState::Disconnected;
        info!(session = %self.session, player = %self.local, "left session");
    }

    /// Broadcast a snapshot of the local player's zones.
    ///
    /// Peers that still hold an older replica of us (from before a close and
    /// reopen) replace it.
    pub fn announce(&mut self, facade: &ActionFacade) {
        self.reply_with_snapshot(facade);
    }

    /// Resubscribe after a disconnect and resync peers.
    ///
    /// Peers receive our `PlayerJoined` (marking us connected again) followed
    /// by a snapshot of our zones, which replaces whatever they last saw.
    pub fn reconnect(&mut self, transport: &mut dyn Transport, facade: &ActionFacade) -> Result<(), NetError> {
        self.connection = transport.subscribe(self.session, self.local)?;
        self.state = ConnectionState::Connected;
        info!(session = %self.session, player = %self.local, "bridge reconnected");

        // Anything queued while offline was never applied remotely.
        while self.outbox.try_recv().is_ok() {
            self.stats.dropped += 1;
        }
        if let Some(own) = facade.state().player(self.local) {
            self.send(RemoteEvent::PlayerJoined {
                player: self.local,
                username: own.username().to_owned(),
                library: own.library().clone(),
            });
            self.send(RemoteEvent::PlayerSnapshot(own.clone()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SyncBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncBridge")
            .field("session", &self.session)
            .field("local", &self.local)
            .field("seq", &self.seq)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardInstance, CardKey};
    use crate::core::config::TableConfig;
    use crate::core::entity::InstanceId;
    use crate::net::transport::LoopbackHub;
    use glam::Vec2;
    use im::Vector;

    const ALICE: PlayerId = PlayerId::new(1);
    const BOB: PlayerId = PlayerId::new(2);
    const SESSION: SessionId = SessionId::new(11);

    fn library(player: PlayerId, names: &[&str]) -> Vector<CardInstance> {
        names
            .iter()
            .zip(0u32..)
            .map(|(name, serial)| {
                CardInstance::new(InstanceId::new(player, serial), CardDefinition::new(CardKey::new(*name), *name))
            })
            .collect()
    }

    fn participant(hub: &mut LoopbackHub, player: PlayerId) -> (ActionFacade, SyncBridge) {
        let mut facade = ActionFacade::new(SESSION, player, &TableConfig::new());
        let bridge = SyncBridge::connect(hub, &mut facade).unwrap();
        (facade, bridge)
    }

    #[test]
    fn test_actions_replicate() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        let (mut b, mut b_bridge) = participant(&mut hub, BOB);

        a.join("alice", library(ALICE, &["Bolt", "Counterspell"])).unwrap();
        a.draw_card().unwrap();
        a.play_card(InstanceId::new(ALICE, 0), Vec2::new(500.0, 500.0)).unwrap();
        a_bridge.flush();

        assert_eq!(b_bridge.poll(&mut b), 3);
        assert_eq!(b.state().player(ALICE), a.state().player(ALICE));
        assert_eq!(a_bridge.stats().sent, 3);
    }

    #[test]
    fn test_late_joiner_gets_snapshot() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        a.join("alice", library(ALICE, &["Bolt", "Ritual"])).unwrap();
        a.draw_card().unwrap();
        a.play_card(InstanceId::new(ALICE, 0), Vec2::new(300.0, 300.0)).unwrap();
        a_bridge.flush();

        let (mut b, mut b_bridge) = participant(&mut hub, BOB);
        b.join("bob", library(BOB, &["Forest"])).unwrap();
        b_bridge.flush();

        a_bridge.poll(&mut a);
        b_bridge.poll(&mut b);

        assert_eq!(a.state().player(BOB), b.state().player(BOB));
        assert_eq!(b.state().player(ALICE), a.state().player(ALICE));
        assert!(b.state().battlefield_card(InstanceId::new(ALICE, 0)).is_some());
    }

    #[test]
    fn test_rejected_remote_is_counted_not_raised() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        let (mut b, mut b_bridge) = participant(&mut hub, BOB);
        a.join("alice", library(ALICE, &["Bolt"])).unwrap();
        a_bridge.flush();
        b_bridge.poll(&mut b);

        // B never saw this draw, so it cannot replay the play.
        a.draw_card().unwrap();
        let _ = a_bridge.outbox.try_recv();
        a.play_card(InstanceId::new(ALICE, 0), Vec2::new(500.0, 500.0)).unwrap();
        a_bridge.flush();

        assert_eq!(b_bridge.poll(&mut b), 0);
        assert_eq!(b_bridge.stats().rejected, 1);
    }

    #[test]
    fn test_disconnect_marks_player_and_drops_outbound() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        let (mut b, mut b_bridge) = participant(&mut hub, BOB);
        a.join("alice", library(ALICE, &["Bolt", "Ritual"])).unwrap();
        a.draw_card().unwrap();
        a.play_card(InstanceId::new(ALICE, 0), Vec2::new(500.0, 500.0)).unwrap();
        a_bridge.flush();
        b_bridge.poll(&mut b);

        hub.disconnect(SESSION, ALICE);
        b_bridge.poll(&mut b);
        let alice_on_b = b.state().player(ALICE).unwrap();
        assert!(!alice_on_b.is_connected());
        assert!(b.state().battlefield_card(InstanceId::new(ALICE, 0)).is_some());

        a.draw_card().unwrap();
        a_bridge.poll(&mut a);
        assert_eq!(a_bridge.state(), ConnectionState::Disconnected);
        assert_eq!(a_bridge.stats().dropped, 1);
        assert_eq!(a.state().player(ALICE).unwrap().hand().len(), 1);

        a_bridge.reconnect(&mut hub, &a).unwrap();
        b_bridge.poll(&mut b);
        assert!(b.state().player(ALICE).unwrap().is_connected());
        assert_eq!(b.state().player(ALICE), a.state().player(ALICE));
    }

    #[test]
    fn test_garbage_frame_counted() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        let mut rogue = hub.subscribe(SESSION, PlayerId::new(9)).unwrap();

        rogue.emit(vec![1, 2, 3]).unwrap();
        let foreign = Envelope::new(
            SessionId::new(99),
            PlayerId::new(9),
            0,
            RemoteEvent::CardDrawn { player: PlayerId::new(9) },
        );
        rogue.emit(foreign.encode().unwrap()).unwrap();

        assert_eq!(a_bridge.poll(&mut a), 0);
        assert_eq!(a_bridge.stats().decode_errors, 1);
        assert_eq!(a_bridge.stats().foreign_frames, 1);
    }

    #[test]
    fn test_events_for_another_player_are_rejected() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        let (mut b, mut b_bridge) = participant(&mut hub, BOB);
        a.join("alice", library(ALICE, &["Bolt"])).unwrap();
        b.join("bob", library(BOB, &["Forest"])).unwrap();
        a_bridge.flush();
        b_bridge.poll(&mut b);
        a_bridge.poll(&mut a);
        b_bridge.poll(&mut b);

        let rogue_id = PlayerId::new(9);
        let mut rogue = hub.subscribe(SESSION, rogue_id).unwrap();
        let forged = Envelope::new(SESSION, rogue_id, 0, RemoteEvent::CardDrawn { player: ALICE });
        rogue.emit(forged.encode().unwrap()).unwrap();
        let before = b.snapshot();

        assert_eq!(b_bridge.poll(&mut b), 0);
        assert_eq!(b_bridge.stats().rejected, 1);
        assert_eq!(b.state(), &before);
    }

    #[test]
    fn test_leave_releases_connection() {
        let mut hub = LoopbackHub::new();
        let (mut a, mut a_bridge) = participant(&mut hub, ALICE);
        let (mut b, mut b_bridge) = participant(&mut hub, BOB);
        a.join("alice", library(ALICE, &["Bolt"])).unwrap();
        b.join("bob", library(BOB, &["Forest"])).unwrap();
        a_bridge.flush();
        b_bridge.flush();

        a_bridge.leave();
        assert_eq!(hub.pending(SESSION, ALICE), 0);

        b.draw_card().unwrap();
        b_bridge.poll(&mut b);
        assert_eq!(hub.pending(SESSION, ALICE), 0);
        assert!(!b.state().player(ALICE).unwrap().is_connected());
        assert!(hub.subscribe(SESSION, ALICE).is_ok());
    }
}
