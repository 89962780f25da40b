//! Fasting Tracker WASM Module
//!
//! Browser bindings for the timer and calorie calculations so the web
//! client can recompute state on every tick without a round trip.
//!
//! Records and results cross the boundary as JSON strings; timestamps as
//! milliseconds since the Unix epoch.

use chrono::{DateTime, Utc};
use fasting_tracker_core::{self as tracker, FastRecord, Goal, ParseError};
use wasm_bindgen::prelude::*;

/// Compute the timer state for a fast at `now_ms`
///
/// `fast_json` may be empty or `"null"` when there is no active fast.
#[wasm_bindgen]
pub fn compute_timer_state(fast_json: &str, now_ms: f64) -> Result<String, JsValue> {
    timer_state_json(fast_json, now_ms).map_err(|e| JsValue::from_str(&e))
}

/// Estimate maintenance and target calories for a profile
#[wasm_bindgen]
pub fn estimate_calories(profile_json: &str) -> Result<String, JsValue> {
    energy_estimate_json(profile_json).map_err(|e| JsValue::from_str(&e))
}

/// Preset calorie target for a goal tag such as `"WEIGHT_LOSS"`
#[wasm_bindgen]
pub fn default_calories_for_goal(goal: &str) -> Result<i32, JsValue> {
    goal.parse::<Goal>()
        .map(tracker::default_calories_for_goal)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether the client should keep its per-second tick running
#[wasm_bindgen]
pub fn should_tick(fast_json: &str) -> Result<bool, JsValue> {
    parse_fast(fast_json)
        .map(|fast| tracker::should_tick(fast.as_ref()))
        .map_err(|e| JsValue::from_str(&e))
}

/// Render milliseconds as `HH:MM:SS`
#[wasm_bindgen]
pub fn format_duration(ms: f64) -> String {
    tracker::format_duration(ms as i64)
}

fn parse_fast(fast_json: &str) -> Result<Option<FastRecord>, String> {
    let trimmed = fast_json.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map_err(|e| format!("Invalid fast record: {}", e))
}

fn timestamp_from_ms(ms: f64) -> Result<DateTime<Utc>, ParseError> {
    // `as` would quietly turn NaN into the epoch
    if !ms.is_finite() {
        return Err(ParseError::NonFiniteTimestamp);
    }
    let ms = ms as i64;
    DateTime::from_timestamp_millis(ms).ok_or(ParseError::InvalidTimestamp(ms))
}

fn timer_state_json(fast_json: &str, now_ms: f64) -> Result<String, String> {
    let fast = parse_fast(fast_json)?;
    let now = timestamp_from_ms(now_ms).map_err(|e| e.to_string())?;
    let state = tracker::compute_timer_state(fast.as_ref(), now);
    serde_json::to_string(&state).map_err(|e| e.to_string())
}

fn energy_estimate_json(profile_json: &str) -> Result<String, String> {
    let profile: tracker::BodyProfile =
        serde_json::from_str(profile_json).map_err(|e| format!("Invalid profile: {}", e))?;
    serde_json::to_string(&tracker::estimate_calories(&profile)).map_err(|e| e.to_string())
}
