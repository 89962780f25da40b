//! Fasting Tracker Ticker
//!
//! Drives the fasting window engine from a periodic timer. The engine is
//! pure; this crate owns the clock, the tick interval and the decision to
//! stop ticking once a fast is closed or gone.

pub mod clock;
pub mod config;
pub mod energy;
pub mod error;
pub mod ticker;

pub use clock::{Clock, SystemClock};
pub use ticker::{TickOutcome, Ticker};
