//! Debouncing of change signals into rebuilds.
//!
//! A burst of signals collapses into one rebuild fired `interval` after the
//! last signal. The debouncer is owned by a single task, so the deadline is
//! only ever moved from one place.

use std::future::Future;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

/// Debounce state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    PendingRebuild { deadline: Instant },
}

/// Debounce state machine
#[derive(Debug)]
pub struct Debouncer {
    state: DebounceState,
    interval: Duration,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: DebounceState::Idle,
            interval,
        }
    }

    pub fn from_millis(debounce_ms: u64) -> Self {
        Self::new(Duration::from_millis(debounce_ms))
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a change at `now`, scheduling or rescheduling the rebuild
    pub fn record(&mut self, now: Instant) {
        self.state = DebounceState::PendingRebuild {
            deadline: now + self.interval,
        };
    }

    /// Deadline of the pending rebuild, if any
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::PendingRebuild { deadline } => Some(deadline),
        }
    }

    /// Return to idle and report `true` if the pending deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.state {
            DebounceState::PendingRebuild { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drive the debouncer from a channel of change signals.
    ///
    /// `on_fire` runs to completion each time a deadline elapses; signals
    /// arriving meanwhile queue in the channel. The loop ends when every
    /// sender is dropped, discarding a rebuild that has not fired yet.
    /// Returns the number of rebuilds fired.
    pub async fn run<T, F, Fut>(mut self, mut signals: mpsc::Receiver<T>, mut on_fire: F) -> usize
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut fired = 0;
        loop {
            let signal = match self.deadline() {
                Some(deadline) => {
                    tokio::select! {
                        signal = signals.recv() => signal,
                        _ = sleep_until(deadline) => {
                            if self.fire_if_due(Instant::now()) {
                                on_fire().await;
                                fired += 1;
                            }
                            continue;
                        }
                    }
                }
                None => signals.recv().await,
            };

            match signal {
                Some(_) => self.record(Instant::now()),
                None => break,
            }
        }
        fired
    }
}
