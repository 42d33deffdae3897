//! fr-bout
//!
//! Bout state machine for a one-on-one timed fencing bout.
//!
//! Architectural decisions:
//! - Two fencers, each owning its own score and card escalation rule
//! - Repeated yellow escalates to red; red awards a touch to the opponent
//! - Append-only chronological event log for scoring actions
//! - Display collaborators subscribe as listeners; the controller never
//!   holds a concrete view
//! - The countdown clock is owned by the controller and driven from outside
//!
//! Pure deterministic logic. No IO, no wall-clock. Runtime advances the clock.

mod clock;
mod controller;
mod event_log;
mod fencer;
mod listener;
mod types;

pub use clock::{Clock, ClockSignal, CountdownClock};
pub use controller::{BoutController, BoutSnapshot};
pub use event_log::EventLog;
pub use fencer::FencerState;
pub use listener::{BoutListener, RecordingListener};
pub use types::*;
