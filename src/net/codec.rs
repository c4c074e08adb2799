//! Frame encoding.
//!
//! Every frame is one bincode-encoded `Envelope`: the session it belongs to,
//! the sending participant, a per-sender sequence number and the event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::RemoteEvent;
use crate::core::entity::SessionId;
use crate::core::player::PlayerId;

/// Raw bytes on the wire.
pub type Frame = Vec<u8>;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("frame could not be encoded or decoded: {0}")]
    Codec(#[from] bincode::Error),

    #[error("frame for {found} arrived on {expected}")]
    SessionMismatch { expected: SessionId, found: SessionId },

    #[error("{0} is already subscribed to this session")]
    AlreadySubscribed(PlayerId),

    #[error("connection is closed")]
    Disconnected,
}

/// One event with its routing header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub session: SessionId,
    pub sender: PlayerId,
    /// Per-sender, starts at 0. Informational; receivers apply in arrival order.
    pub seq: u64,
    pub event: RemoteEvent,
}

impl Envelope {
    #[must_use]
    pub fn new(session: SessionId, sender: PlayerId, seq: u64, event: RemoteEvent) -> Self {
        Self { session, sender, seq, event }
    }

    pub fn encode(&self) -> Result<Frame, NetError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(frame: &[u8]) -> Result<Self, NetError> {
        Ok(bincode::deserialize(frame)?)
    }

    /// Decode and check the frame belongs to `session`.
    pub fn decode_for(session: SessionId, frame: &[u8]) -> Result<Self, NetError> {
        let envelope = Self::decode(frame)?;
        if envelope.session != session {
            return Err(NetError::SessionMismatch {
                expected: session,
                found: envelope.session,
            });
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardInstance, CardKey};
    use crate::core::entity::InstanceId;
    use glam::Vec2;

    fn alice() -> PlayerId {
        PlayerId::new(1)
    }

    #[test]
    fn test_join_frame_carries_library() {
        let library = (0..2)
            .map(|i| {
                CardInstance::new(
                    InstanceId::new(alice(), i),
                    CardDefinition::new(CardKey::new("bolt"), "Lightning Bolt").with_mana_cost("{R}"),
                )
            })
            .collect();
        let envelope = Envelope::new(
            SessionId::new(3),
            alice(),
            0,
            RemoteEvent::PlayerJoined { player: alice(), username: "alice".into(), library },
        );

        let decoded = Envelope::decode(&envelope.encode().unwrap()).unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_foreign_session_rejected() {
        let frame = Envelope::new(SessionId::new(3), alice(), 7, RemoteEvent::CardDrawn { player: alice() })
            .encode()
            .unwrap();

        let err = Envelope::decode_for(SessionId::new(4), &frame).unwrap_err();

        assert!(matches!(
            err,
            NetError::SessionMismatch { expected, found } if expected == SessionId::new(4) && found == SessionId::new(3)
        ));
    }

    #[test]
    fn test_garbage_is_codec_error() {
        assert!(matches!(Envelope::decode(&[0xff, 0x01]), Err(NetError::Codec(_))));
    }

    #[test]
    fn test_move_frame_is_compact() {
        let frame = Envelope::new(
            SessionId::new(1),
            alice(),
            1,
            RemoteEvent::CardMoved { player: alice(), instance: InstanceId::new(alice(), 0), position: Vec2::new(1.0, 2.0) },
        )
        .encode()
        .unwrap();

        assert!(frame.len() < 64);
    }
}
