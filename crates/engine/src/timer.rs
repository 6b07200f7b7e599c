//! Turn timer - a restartable single-shot countdown
//!
//! The timer is polled from the same task that applies intents, so arming,
//! cancelling and expiring can never interleave with a placement. A cancelled
//! timer has no pending wake-up left to fire.

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep_until, Instant, Sleep};

#[derive(Debug, Default)]
pub struct TurnTimer {
    sleep: Option<Pin<Box<Sleep>>>,
    delay_ms: u32,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the countdown, replacing any running one
    pub fn arm(&mut self, delay_ms: u32) {
        let deadline = Instant::now() + Duration::from_millis(u64::from(delay_ms));
        match self.sleep.as_mut() {
            Some(sleep) => sleep.as_mut().reset(deadline),
            None => self.sleep = Some(Box::pin(sleep_until(deadline))),
        }
        self.delay_ms = delay_ms;
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    /// Delay the timer was last armed with
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Time left before expiry, if armed
    pub fn remaining(&self) -> Option<Duration> {
        self.sleep
            .as_ref()
            .map(|sleep| sleep.deadline().saturating_duration_since(Instant::now()))
    }

    /// Resolves when the armed countdown runs out, leaving the timer disarmed.
    ///
    /// Never resolves while disarmed. Dropping the future before it resolves
    /// leaves the timer untouched, so it is safe inside `tokio::select!`.
    pub async fn expired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => pending::<()>().await,
        }
    }
}
