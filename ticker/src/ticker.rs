//! Caller-driven tick loop
//!
//! Re-evaluates the timer state of the current fast once per interval and
//! whenever the fast record changes. Ticking stops as soon as there is
//! nothing left that changes with time: the fast was closed or removed.

use crate::clock::{Clock, SystemClock};
use fasting_tracker_core::{compute_timer_state, should_tick, FastRecord, TimerState};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default re-evaluation period
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Why a tick loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The fast has an end time; its state is frozen
    FastClosed,
    /// There is no fast to track
    NoActiveFast,
    /// The shutdown future resolved
    Shutdown,
    /// The sender side of the fast channel was dropped
    SourceClosed,
}

/// Periodic driver for [`compute_timer_state`]
#[derive(Debug, Clone)]
pub struct Ticker<C = SystemClock> {
    clock: C,
    interval: Duration,
}

impl Ticker<SystemClock> {
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(SystemClock, interval)
    }
}

impl Default for Ticker<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl<C: Clock> Ticker<C> {
    /// Create a ticker reading time from `clock`
    ///
    /// A zero interval is raised to 1 ms.
    pub fn with_clock(clock: C, interval: Duration) -> Self {
        Self {
            clock,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// State of `fast` right now
    pub fn snapshot(&self, fast: Option<&FastRecord>) -> TimerState {
        compute_timer_state(fast, self.clock.now())
    }

    /// Run until the fast stops changing with time or `shutdown` resolves
    ///
    /// `on_tick` receives a state immediately, then once per interval and
    /// once after every change to the watched record. When the record is
    /// closed or absent the final state is still delivered before returning.
    pub async fn run<F, S>(
        &self,
        mut fasts: watch::Receiver<Option<FastRecord>>,
        mut on_tick: F,
        shutdown: S,
    ) -> TickOutcome
    where
        F: FnMut(&TimerState),
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately
        interval.tick().await;

        loop {
            let fast = fasts.borrow_and_update().clone();
            let state = self.snapshot(fast.as_ref());
            debug!(
                elapsed_ms = state.elapsed_ms,
                progress = ?state.progress,
                phase = %state.phase,
                "Timer tick"
            );
            on_tick(&state);

            if !should_tick(fast.as_ref()) {
                let outcome = if fast.is_some() {
                    TickOutcome::FastClosed
                } else {
                    TickOutcome::NoActiveFast
                };
                info!(?outcome, "Stopping timer");
                return outcome;
            }

            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Timer shutdown requested");
                    return TickOutcome::Shutdown;
                }
                changed = fasts.changed() => {
                    if changed.is_err() {
                        warn!("Fast record source dropped, stopping timer");
                        return TickOutcome::SourceClosed;
                    }
                    debug!("Fast record updated");
                }
                _ = interval.tick() => {}
            }
        }
    }
}
