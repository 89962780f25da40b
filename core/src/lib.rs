//! Fasting Tracker Core
//!
//! Pure calculations shared by the ticker service and the WASM bindings:
//! the fasting window and progress engine, and the daily energy estimator.
//! Nothing in this crate reads the clock or performs I/O.

pub mod energy;
pub mod errors;
pub mod units;
pub mod validation;
pub mod window;

// Re-export commonly used items
pub use energy::{
    calculate_bmr, default_calories_for_goal, estimate_calories, ActivityLevel, BodyProfile,
    EnergyEstimate, Goal, Sex,
};
pub use errors::*;
pub use units::{format_duration, EnergyUnit};
pub use validation::{validate_profile, ValidationError};
pub use window::{compute_timer_state, derive_phase, should_tick, FastRecord, Phase, TimerState};
