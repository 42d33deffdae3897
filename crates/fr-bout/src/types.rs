use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bout duration in seconds (three minutes).
pub const DEFAULT_BOUT_SECS: f64 = 180.0;

/// Default clock resolution in seconds.
pub const DEFAULT_TICK_SECS: f64 = 0.1;

/// Which fencer an action targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Penalty card. Variant order is severity order: None < Yellow < Red < Black.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    #[default]
    None,
    Yellow,
    Red,
    Black,
}

impl Card {
    pub fn as_str(self) -> &'static str {
        match self {
            Card::None => "None",
            Card::Yellow => "Yellow",
            Card::Red => "Red",
            Card::Black => "Black",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a card that would lower a Red or Black is treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPolicy {
    /// Downgrades out of Red or Black are rejected as no-ops. Black is terminal.
    #[default]
    Strict,
    /// Any card overwrites the current one unconditionally.
    Overwrite,
}

/// Result of assigning a card to one fencer.
///
/// The fencer never touches its opponent; the caller credits the point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardOutcome {
    /// Card held after the assignment (unchanged when rejected).
    pub card: Card,
    /// True if the opponent must be credited one touch.
    pub award_opponent_point: bool,
    /// False if the policy refused the assignment.
    pub accepted: bool,
}

impl CardOutcome {
    pub fn rejected(current: Card) -> Self {
        Self {
            card: current,
            award_opponent_point: false,
            accepted: false,
        }
    }
}

/// Immutable record of one scoring-relevant occurrence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoutEvent {
    /// Seconds remaining on the clock when the event happened.
    pub timestamp: f64,
    pub left_score: u32,
    pub right_score: u32,
    pub message: String,
}

impl BoutEvent {
    pub fn new(timestamp: f64, left_score: u32, right_score: u32, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            left_score,
            right_score,
            message: message.into(),
        }
    }
}

/// Render instructions emitted to display listeners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoutNotice {
    Score { side: Side, score: u32 },
    Card { side: Side, card: Card },
    Time { remaining: f64 },
    TimerStopped,
    Period { period: u32 },
}

/// Static bout configuration. Built directly or from layered YAML (fr-config).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoutConfig {
    /// Clock value a fresh or reset bout starts from.
    pub default_time_secs: f64,
    /// Countdown step between ticks.
    pub tick_interval_secs: f64,
    pub card_policy: CardPolicy,
    /// Append an event log entry for every accepted card.
    pub record_cards: bool,
    /// Start a fresh event log on reset.
    pub clear_log_on_reset: bool,
}

impl Default for BoutConfig {
    fn default() -> Self {
        Self {
            default_time_secs: DEFAULT_BOUT_SECS,
            tick_interval_secs: DEFAULT_TICK_SECS,
            card_policy: CardPolicy::Strict,
            record_cards: false,
            clear_log_on_reset: false,
        }
    }
}

impl BoutConfig {
    pub fn with_default_time(default_time_secs: f64) -> Self {
        Self {
            default_time_secs,
            ..Self::default()
        }
    }

    /// Reject configurations that cannot run a bout.
    pub fn validate(&self) -> Result<()> {
        if !self.default_time_secs.is_finite() || self.default_time_secs <= 0.0 {
            bail!(
                "BOUT_INVALID_DEFAULT_TIME: default_time_secs must be finite and > 0 (got {})",
                self.default_time_secs
            );
        }
        if !self.tick_interval_secs.is_finite() || self.tick_interval_secs <= 0.0 {
            bail!(
                "BOUT_INVALID_TICK_INTERVAL: tick_interval_secs must be finite and > 0 (got {})",
                self.tick_interval_secs
            );
        }
        if self.tick_interval_secs > self.default_time_secs {
            bail!(
                "BOUT_INVALID_TICK_INTERVAL: tick_interval_secs {} exceeds default_time_secs {}",
                self.tick_interval_secs,
                self.default_time_secs
            );
        }
        Ok(())
    }
}
