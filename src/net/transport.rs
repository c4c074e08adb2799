//! Transport abstraction and the in-process loopback hub.
//!
//! A `Transport` hands out one `Connection` per participant per session.
//! Frames emitted on a connection reach every *other* open connection of the
//! same session, in emission order. Delivery is fire-and-forget.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::codec::{Frame, NetError};
use crate::core::entity::SessionId;
use crate::core::player::PlayerId;

/// Something a connection can receive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Frame(Frame),
    PeerConnected(PlayerId),
    PeerDisconnected(PlayerId),
}

/// One participant's attachment to a session channel.
pub trait Connection {
    fn session(&self) -> SessionId;

    fn participant(&self) -> PlayerId;

    /// Broadcast a frame to the other participants.
    fn emit(&mut self, frame: Frame) -> Result<(), NetError>;

    /// Next pending event, if any. Never blocks.
    fn recv(&mut self) -> Option<TransportEvent>;

    fn is_open(&self) -> bool;

    /// Release the attachment. Peers see the participant disconnect and it
    /// may subscribe again. Closing twice is a no-op.
    fn close(&mut self);
}

/// A source of per-session connections.
pub trait Transport {
    fn subscribe(&mut self, session: SessionId, participant: PlayerId) -> Result<Box<dyn Connection>, NetError>;
}

#[derive(Debug, Default)]
struct Mailbox {
    queue: VecDeque<TransportEvent>,
    open: bool,
}

#[derive(Debug, Default)]
struct Hub {
    sessions: FxHashMap<SessionId, FxHashMap<PlayerId, Mailbox>>,
}

impl Hub {
    fn broadcast(&mut self, session: SessionId, from: PlayerId, event: &TransportEvent) -> usize {
        let Some(members) = self.sessions.get_mut(&session) else {
            return 0;
        };
        let mut delivered = 0;
        for (participant, mailbox) in members.iter_mut() {
            if *participant != from && mailbox.open {
                mailbox.queue.push_back(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// Close a mailbox and tell its peers. False if it was not open.
    fn close(&mut self, session: SessionId, participant: PlayerId) -> bool {
        let closed = match self.sessions.get_mut(&session).and_then(|m| m.get_mut(&participant)) {
            Some(mailbox) if mailbox.open => {
                mailbox.open = false;
                mailbox.queue.clear();
                true
            }
            _ => false,
        };
        if closed {
            self.broadcast(session, participant, &TransportEvent::PeerDisconnected(participant));
        }
        closed
    }

    fn is_open(&self, session: SessionId, participant: PlayerId) -> bool {
        self.sessions
            .get(&session)
            .and_then(|members| members.get(&participant))
            .is_some_and(|mailbox| mailbox.open)
    }
}

/// In-process transport for tests and hot-seat play.
///
/// Single-threaded; clones share the same hub.
#[derive(Clone, Debug, Default)]
pub struct LoopbackHub {
    hub: Rc<RefCell<Hub>>,
}

impl LoopbackHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a participant's connection as if the network went away.
    ///
    /// Pending frames for it are discarded; peers see `PeerDisconnected`.
    pub fn disconnect(&self, session: SessionId, participant: PlayerId) {
        self.hub.borrow_mut().close(session, participant);
    }

    /// Frames and notices waiting for a participant.
    #[must_use]
    pub fn pending(&self, session: SessionId, participant: PlayerId) -> usize {
        self.hub
            .borrow()
            .sessions
            .get(&session)
            .and_then(|members| members.get(&participant))
            .map_or(0, |mailbox| mailbox.queue.len())
    }
}

impl Transport for LoopbackHub {
    fn subscribe(&mut self, session: SessionId, participant: PlayerId) -> Result<Box<dyn Connection>, NetError> {
        let mut hub = self.hub.borrow_mut();
        let members = hub.sessions.entry(session).or_default();
        let mailbox = members.entry(participant).or_default();
        if mailbox.open {
            return Err(NetError::AlreadySubscribed(participant));
        }
        mailbox.open = true;
        hub.broadcast(session, participant, &TransportEvent::PeerConnected(participant));

        Ok(Box::new(LoopbackConnection {
            hub: Rc::clone(&self.hub),
            session,
            participant,
        }))
    }
}

struct LoopbackConnection {
    hub: Rc<RefCell<Hub>>,
    session: SessionId,
    participant: PlayerId,
}

impl Connection for LoopbackConnection {
    fn session(&self) -> SessionId {
        self.session
    }

    fn participant(&self) -> PlayerId {
        self.participant
    }

    fn emit(&mut self, frame: Frame) -> Result<(), NetError> {
        let mut hub = self.hub.borrow_mut();
        if !hub.is_open(self.session, self.participant) {
            return Err(NetError::Disconnected);
        }
        hub.broadcast(self.session, self.participant, &TransportEvent::Frame(frame));
        Ok(())
    }

    fn recv(&mut self) -> Option<TransportEvent> {
        self.hub
            .borrow_mut()
            .sessions
            .get_mut(&self.session)
            .and_then(|members| members.get_mut(&self.participant))
            .and_then(|mailbox| mailbox.queue.pop_front())
    }

    fn is_open(&self) -> bool {
        self.hub.borrow().is_open(self.session, self.participant)
    }

    fn close(&mut self) {
        self.hub.borrow_mut().close(self.session, self.participant);
    }
}
