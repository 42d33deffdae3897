//! fr-runtime
//!
//! Async shell around a single bout.
//!
//! - One `BoutController` behind a tokio mutex; actions are serialized by the lock
//! - A tokio interval drives the countdown clock
//! - Every display notice is published on a broadcast bus
//! - Referee actions have a textual form shared by scripts and front ends

mod action;
mod session;

pub use action::RefereeAction;
pub use session::{spawn_clock_driver, BoutSession, BusListener, BusMsg, Dispatched};
