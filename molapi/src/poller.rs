//! Periodic player-state polling
//!
//! The poller owns no thread: the host loop calls [`StatePoller::tick`] on
//! every iteration and the poller decides whether the interval elapsed.
//! One poll runs to completion per tick, so there is never more than one
//! request in flight.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::client::MusicClient;
use crate::models::PlayerState;

/// Callback invoked with each polled state
pub type StateCallback = Box<dyn FnMut(PlayerState) + Send>;

/// Interval-gated poller for the bound player's state
pub struct StatePoller {
    interval: Duration,
    last_poll: Option<Instant>,
    on_state_changed: Option<StateCallback>,
}

impl StatePoller {
    /// Default poll interval (1 second)
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

    pub fn new() -> Self {
        Self::with_interval(Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_poll: None,
            on_state_changed: None,
        }
    }

    /// Register the state-changed callback.
    ///
    /// Without a registered callback the poller never issues a request.
    pub fn set_on_state_changed(&mut self, callback: impl FnMut(PlayerState) + Send + 'static) {
        self.on_state_changed = Some(Box::new(callback));
    }

    /// True when the interval elapsed since the last poll (or none ran yet)
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_poll {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// Poll the player state if the interval elapsed.
    pub fn tick(&mut self, now: Instant, client: &MusicClient) {
        self.poll_with(now, || client.player_state());
    }

    fn poll_with<F: FnOnce() -> PlayerState>(&mut self, now: Instant, fetch: F) {
        if !self.is_due(now) {
            return;
        }
        self.last_poll = Some(now);

        let Some(callback) = self.on_state_changed.as_mut() else {
            return;
        };

        let state = fetch();
        trace!(
            "Polled player {}: playing={} volume={}",
            state.player_id, state.is_playing, state.volume
        );
        callback(state);
    }
}

impl Default for StatePoller {
    fn default() -> Self {
        Self::new()
    }
}
