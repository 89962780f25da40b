//! Tick loop tests
//!
//! Run on tokio's paused clock so interval ticks happen instantly and
//! at exact offsets.

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use fasting_tracker_core::{FastRecord, Phase, TimerState};
use fasting_tracker_ticker::{Clock, TickOutcome, Ticker};
use std::future::pending;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};

/// Wall clock that follows tokio's (paused) time from a fixed anchor
struct TokioClock {
    anchor: DateTime<Utc>,
    started: Instant,
}

impl TokioClock {
    fn starting_at(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            started: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = ChronoDuration::from_std(self.started.elapsed()).unwrap();
        self.anchor + elapsed
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()
}

fn sixteen_hour_fast() -> FastRecord {
    FastRecord {
        target_duration_hours: Some(16.0),
        fast_target_end_at: Some(t0() + ChronoDuration::hours(16)),
        ..FastRecord::started_at(t0())
    }
}

fn ticker_at(offset: ChronoDuration) -> Ticker<TokioClock> {
    Ticker::with_clock(TokioClock::starting_at(t0() + offset), Duration::from_secs(1))
}

#[tokio::test(start_paused = true)]
async fn test_ticks_once_per_interval_until_shutdown() {
    let ticker = ticker_at(ChronoDuration::hours(8));
    let (_tx, rx) = watch::channel(Some(sixteen_hour_fast()));
    let mut states: Vec<TimerState> = Vec::new();

    let outcome = ticker
        .run(rx, |s| states.push(s.clone()), sleep(Duration::from_millis(3500)))
        .await;

    assert_eq!(outcome, TickOutcome::Shutdown);
    assert_eq!(states.len(), 4);
    for (i, state) in states.iter().enumerate() {
        assert_eq!(state.elapsed_ms, 8 * 3_600_000 + i as i64 * 1000);
        assert_eq!(state.phase, Phase::FastingWindow);
    }
    assert_eq!(states[0].progress, Some(0.5));
}

#[tokio::test(start_paused = true)]
async fn test_stops_after_fast_is_closed() {
    let ticker = ticker_at(ChronoDuration::hours(10));
    let (tx, rx) = watch::channel(Some(sixteen_hour_fast()));
    let mut states: Vec<TimerState> = Vec::new();

    let closed = FastRecord {
        end_at: Some(t0() + ChronoDuration::hours(10) + ChronoDuration::seconds(2)),
        ..sixteen_hour_fast()
    };

    let (outcome, _) = tokio::join!(
        ticker.run(rx, |s| states.push(s.clone()), pending()),
        async {
            sleep(Duration::from_millis(2500)).await;
            tx.send(Some(closed)).unwrap();
        }
    );

    assert_eq!(outcome, TickOutcome::FastClosed);
    // 0s, 1s, 2s on the interval, then the update at 2.5s
    assert_eq!(states.len(), 4);
    let last = states.last().unwrap();
    assert_eq!(last.elapsed_ms, 10 * 3_600_000 + 2000);
    assert_eq!(last.now, t0() + ChronoDuration::hours(10) + ChronoDuration::milliseconds(2500));
}

#[tokio::test(start_paused = true)]
async fn test_no_fast_emits_idle_state_once() {
    let ticker = ticker_at(ChronoDuration::zero());
    let (_tx, rx) = watch::channel(None);
    let mut states: Vec<TimerState> = Vec::new();

    let outcome = ticker.run(rx, |s| states.push(s.clone()), pending()).await;

    assert_eq!(outcome, TickOutcome::NoActiveFast);
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].phase_label, "no active fast");
}

#[tokio::test(start_paused = true)]
async fn test_closed_fast_emits_frozen_state_once() {
    let ticker = ticker_at(ChronoDuration::days(2));
    let closed = FastRecord {
        end_at: Some(t0() + ChronoDuration::hours(18)),
        ..sixteen_hour_fast()
    };
    let (_tx, rx) = watch::channel(Some(closed));
    let mut states: Vec<TimerState> = Vec::new();

    let outcome = ticker.run(rx, |s| states.push(s.clone()), pending()).await;

    assert_eq!(outcome, TickOutcome::FastClosed);
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].elapsed_hours, 18.0);
    assert!(states[0].is_over_target);
    assert_eq!(states[0].progress, Some(1.0));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_source_stops_loop() {
    let ticker = ticker_at(ChronoDuration::hours(1));
    let (tx, rx) = watch::channel(Some(sixteen_hour_fast()));
    drop(tx);
    let mut ticks = 0;

    let outcome = ticker.run(rx, |_| ticks += 1, pending()).await;

    assert_eq!(outcome, TickOutcome::SourceClosed);
    assert_eq!(ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn test_phase_changes_at_fasting_window_end() {
    // Start 1.5s before the fasting window closes
    let ticker = ticker_at(ChronoDuration::hours(16) - ChronoDuration::milliseconds(1500));
    let (_tx, rx) = watch::channel(Some(sixteen_hour_fast()));
    let mut phases = Vec::new();

    let outcome = ticker
        .run(rx, |s| phases.push(s.phase), sleep(Duration::from_millis(2500)))
        .await;

    assert_eq!(outcome, TickOutcome::Shutdown);
    assert_eq!(
        phases,
        vec![Phase::FastingWindow, Phase::FastingWindow, Phase::OutsideWindows]
    );
}

#[tokio::test(start_paused = true)]
async fn test_opening_a_fast_starts_ticking_from_update() {
    let ticker = ticker_at(ChronoDuration::hours(2));
    let (tx, rx) = watch::channel(Some(sixteen_hour_fast()));
    let mut states: Vec<TimerState> = Vec::new();

    let restarted = FastRecord::started_at(t0() + ChronoDuration::hours(2));

    let (outcome, _) = tokio::join!(
        ticker.run(rx, |s| states.push(s.clone()), sleep(Duration::from_millis(2200))),
        async {
            sleep(Duration::from_millis(500)).await;
            tx.send(Some(restarted)).unwrap();
        }
    );

    assert_eq!(outcome, TickOutcome::Shutdown);
    // 0s (old fast), 0.5s (update), 1s, 2s
    let elapsed: Vec<i64> = states.iter().map(|s| s.elapsed_ms).collect();
    assert_eq!(elapsed, vec![2 * 3_600_000, 500, 1000, 2000]);
    assert_eq!(states[3].progress, None);
}
