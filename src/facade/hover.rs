//! Delayed hover preview.
//!
//! Pointer-enter arms a timer; pointer-leave cancels it. The preview fires
//! at most once per hover, the first time `poll` sees the deadline passed.
//! Callers pass the clock in, so tests never sleep.

use std::time::{Duration, Instant};

use crate::core::entity::InstanceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoverState {
    Idle,
    Pending { instance: InstanceId, due: Instant },
    Shown(InstanceId),
}

/// Hover-preview timer for one pointer.
#[derive(Clone, Debug)]
pub struct HoverPreview {
    delay: Duration,
    state: HoverState,
}

impl HoverPreview {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: HoverState::Idle,
        }
    }

    #[must_use]
    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pointer entered `instance`. Re-entering the same card keeps its deadline.
    pub fn start(&mut self, instance: InstanceId, now: Instant) {
        match self.state {
            HoverState::Pending { instance: current, .. } | HoverState::Shown(current) if current == instance => {}
            _ => {
                self.state = HoverState::Pending {
                    instance,
                    due: now + self.delay,
                };
            }
        }
    }

    /// Pointer left; drops any pending or shown preview.
    pub fn cancel(&mut self) {
        self.state = HoverState::Idle;
    }

    /// Returns the card to preview once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<InstanceId> {
        match self.state {
            HoverState::Pending { instance, due } if now >= due => {
                self.state = HoverState::Shown(instance);
                Some(instance)
            }
            _ => None,
        }
    }

    /// The card whose preview is currently showing.
    #[must_use]
    pub fn showing(&self) -> Option<InstanceId> {
        match self.state {
            HoverState::Shown(instance) => Some(instance),
            _ => None,
        }
    }
}
