//! Fasting window and progress engine
//!
//! Derives the live state of a fast (elapsed and remaining time, progress
//! toward the target, and which window "now" falls in) from a fast record
//! and an explicit timestamp.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No clock access, no I/O; `now` is always a parameter
//! 2. **Total**: Every input produces a fully populated state, never a panic
//! 3. **Clamped**: Malformed records yield bounded values instead of errors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one hour
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Label used when there is no fast to report on
pub const NO_ACTIVE_FAST_LABEL: &str = "no active fast";

// ============================================================================
// Fast Record
// ============================================================================

/// A fast as delivered by the API
///
/// Owned by the backend; the engine only reads it. Field names follow the
/// API's camelCase JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastRecord {
    /// Start of the fast
    pub start_at: DateTime<Utc>,
    /// Present once the fast has been closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    /// Planned fasting duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_duration_hours: Option<f64>,
    /// Boundary at which the fasting window is expected to end.
    /// Not re-derived from `target_duration_hours`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_target_end_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eating_window_start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eating_window_end_at: Option<DateTime<Utc>>,
}

impl FastRecord {
    /// Open fast starting at `start_at` with no target or windows
    pub fn started_at(start_at: DateTime<Utc>) -> Self {
        Self {
            start_at,
            end_at: None,
            target_duration_hours: None,
            fast_target_end_at: None,
            eating_window_start_at: None,
            eating_window_end_at: None,
        }
    }

    /// Whether the fast has been closed
    pub fn is_closed(&self) -> bool {
        self.end_at.is_some()
    }

    /// Target duration in milliseconds, if a usable target is set
    ///
    /// Zero, negative and NaN targets count as "no target".
    pub fn target_ms(&self) -> Option<f64> {
        self.target_duration_hours
            .filter(|hours| *hours > 0.0)
            .map(|hours| hours * MS_PER_HOUR)
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Where "now" falls relative to the fast's windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    FastingWindow,
    EatingWindow,
    #[default]
    OutsideWindows,
}

impl Phase {
    /// Human-readable tag shown on badges
    pub fn label(&self) -> &'static str {
        match self {
            Phase::FastingWindow => "fasting window",
            Phase::EatingWindow => "eating window",
            Phase::OutsideWindows => "outside windows",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `now` against the fast's windows
///
/// Rules are evaluated in order and the first match wins:
/// 1. `now < fast_target_end_at` → fasting window
/// 2. `eating_window_start_at <= now < eating_window_end_at` → eating window
/// 3. otherwise → outside windows
pub fn derive_phase(fast: &FastRecord, now: DateTime<Utc>) -> Phase {
    if let Some(target_end) = fast.fast_target_end_at {
        if now < target_end {
            return Phase::FastingWindow;
        }
    }

    if let (Some(start), Some(end)) = (fast.eating_window_start_at, fast.eating_window_end_at) {
        if start <= now && now < end {
            return Phase::EatingWindow;
        }
    }

    Phase::OutsideWindows
}

// ============================================================================
// Timer State
// ============================================================================

/// Snapshot of a fast at one instant, recomputed on every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub now: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub elapsed_hours: f64,
    /// `None` when the fast has no target
    pub remaining_ms: Option<i64>,
    pub remaining_hours: Option<f64>,
    /// Fraction of the target elapsed, capped at 1. `None` without a target.
    pub progress: Option<f64>,
    pub is_over_target: bool,
    pub phase: Phase,
    pub is_in_fasting_window: bool,
    pub is_in_eating_window: bool,
    pub phase_label: String,
}

impl TimerState {
    /// State reported when there is no fast
    pub fn idle(now: DateTime<Utc>) -> Self {
        Self {
            now,
            elapsed_ms: 0,
            elapsed_hours: 0.0,
            remaining_ms: None,
            remaining_hours: None,
            progress: None,
            is_over_target: false,
            phase: Phase::OutsideWindows,
            is_in_fasting_window: false,
            is_in_eating_window: false,
            phase_label: NO_ACTIVE_FAST_LABEL.to_string(),
        }
    }
}

/// Compute the timer state of `fast` at `now`
///
/// Closed fasts report elapsed time frozen at `end_at - start_at`; open
/// fasts measure up to `now`. Elapsed time never goes negative, remaining
/// time is floored at zero and progress is capped at 1.
pub fn compute_timer_state(fast: Option<&FastRecord>, now: DateTime<Utc>) -> TimerState {
    let Some(fast) = fast else {
        return TimerState::idle(now);
    };

    let end = fast.end_at.unwrap_or(now);
    let elapsed_ms = (end - fast.start_at).num_milliseconds().max(0);
    let elapsed_hours = elapsed_ms as f64 / MS_PER_HOUR;

    let (remaining_ms, progress, is_over_target) = match fast.target_ms() {
        Some(target_ms) => {
            let elapsed = elapsed_ms as f64;
            // Partial milliseconds count as remaining so zero means over target
            let remaining = (target_ms - elapsed).max(0.0).ceil() as i64;
            let progress = (elapsed / target_ms).min(1.0);
            (Some(remaining), Some(progress), elapsed >= target_ms)
        }
        None => (None, None, false),
    };

    let phase = derive_phase(fast, now);

    TimerState {
        now,
        elapsed_ms,
        elapsed_hours,
        remaining_ms,
        remaining_hours: remaining_ms.map(|ms| ms as f64 / MS_PER_HOUR),
        progress,
        is_over_target,
        phase,
        is_in_fasting_window: phase == Phase::FastingWindow,
        is_in_eating_window: phase == Phase::EatingWindow,
        phase_label: phase.label().to_string(),
    }
}

/// Whether a caller should keep re-evaluating the state on a timer
///
/// Only an open fast changes over time; closed or absent fasts are static.
pub fn should_tick(fast: Option<&FastRecord>) -> bool {
    fast.is_some_and(|f| !f.is_closed())
}
