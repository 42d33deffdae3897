//! Bout controller: the single entry point a referee interface drives.
//!
//! # Invariants
//!
//! - Every operation is a synchronous step; callers serialize actions.
//! - Scoring actions (touch, double touch) append exactly one event, in call
//!   order. Reversals never append and never edit earlier entries.
//! - Card assignments only log when `BoutConfig::record_cards` is set.
//! - Clock ticks only render time; they never change scores or cards.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    BoutConfig, BoutEvent, BoutListener, BoutNotice, Card, CardOutcome, Clock, ClockSignal,
    CountdownClock, EventLog, FencerState, Side,
};

const DOUBLE_TOUCH_MESSAGE: &str = "Double-touch";

/// Point-in-time view of a bout (for reports and status endpoints).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoutSnapshot {
    pub left_score: u32,
    pub right_score: u32,
    pub left_card: Card,
    pub right_card: Card,
    pub period: u32,
    pub remaining_secs: f64,
    pub clock_running: bool,
    pub events_recorded: usize,
}

pub struct BoutController<C: Clock = CountdownClock> {
    config: BoutConfig,
    left: FencerState,
    right: FencerState,
    log: EventLog,
    clock: C,
    period: u32,
    listeners: Vec<Box<dyn BoutListener>>,
}

impl BoutController<CountdownClock> {
    /// Build a bout with its own countdown clock. Fails if the config cannot run a bout.
    pub fn new(config: BoutConfig) -> Result<Self> {
        config.validate()?;
        let clock = CountdownClock::new(config.default_time_secs, config.tick_interval_secs);
        Self::with_clock(config, clock)
    }
}

impl<C: Clock> BoutController<C> {
    /// Build a bout around a caller-supplied clock, positioned at the default time.
    pub fn with_clock(config: BoutConfig, mut clock: C) -> Result<Self> {
        config.validate()?;
        clock.set_current_time(config.default_time_secs);
        Ok(Self {
            config,
            left: FencerState::new(),
            right: FencerState::new(),
            log: EventLog::new(),
            clock,
            period: 1,
            listeners: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Register a display listener and replay the current time and scores to it.
    pub fn subscribe<L: BoutListener + 'static>(&mut self, listener: L) {
        let mut listener: Box<dyn BoutListener> = Box::new(listener);
        listener.notify(&BoutNotice::Time {
            remaining: self.clock.current_time(),
        });
        listener.notify(&BoutNotice::Score {
            side: Side::Left,
            score: self.left.score(),
        });
        listener.notify(&BoutNotice::Score {
            side: Side::Right,
            score: self.right.score(),
        });
        self.listeners.push(listener);
    }

    fn emit(&mut self, notice: BoutNotice) {
        for l in self.listeners.iter_mut() {
            l.notify(&notice);
        }
    }

    fn emit_score(&mut self, side: Side) {
        let score = self.fencer(side).score();
        self.emit(BoutNotice::Score { side, score });
    }

    fn emit_card(&mut self, side: Side) {
        let card = self.fencer(side).card();
        self.emit(BoutNotice::Card { side, card });
    }

    // -----------------------------------------------------------------------
    // Timer control
    // -----------------------------------------------------------------------

    pub fn start(&mut self) {
        debug!(remaining = self.clock.current_time(), "clock start");
        self.clock.start();
    }

    pub fn halt(&mut self) {
        debug!(remaining = self.clock.current_time(), "clock halt");
        self.clock.stop();
    }

    pub fn toggle_timer(&mut self) {
        self.clock.toggle();
        debug!(running = self.clock.is_running(), "clock toggle");
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    /// Credit one touch to `side` and log it.
    pub fn touch(&mut self, side: Side) {
        let score = self.fencer_mut(side).apply_touch(1);
        debug!(side = ?side, score, "touch");
        self.emit_score(side);
        self.record(format!("{side} scores"));
    }

    pub fn touch_left(&mut self) {
        self.touch(Side::Left);
    }

    pub fn touch_right(&mut self) {
        self.touch(Side::Right);
    }

    /// Remove one touch from `side`. Clamped at zero; not logged.
    pub fn reverse_touch(&mut self, side: Side) {
        let score = self.fencer_mut(side).apply_touch(-1);
        debug!(side = ?side, score, "reverse touch");
        self.emit_score(side);
    }

    pub fn reverse_touch_left(&mut self) {
        self.reverse_touch(Side::Left);
    }

    pub fn reverse_touch_right(&mut self) {
        self.reverse_touch(Side::Right);
    }

    /// Credit both fencers and log a single entry.
    pub fn touch_double(&mut self) {
        self.left.apply_touch(1);
        self.right.apply_touch(1);
        debug!(
            left = self.left.score(),
            right = self.right.score(),
            "double touch"
        );
        self.emit_score(Side::Left);
        self.emit_score(Side::Right);
        self.record(DOUBLE_TOUCH_MESSAGE.to_string());
    }

    // -----------------------------------------------------------------------
    // Cards
    // -----------------------------------------------------------------------

    /// Assign a card to `side`, crediting the opponent when the card is red.
    ///
    /// The opponent's score is re-rendered even when unchanged.
    pub fn card(&mut self, side: Side, card: Card) -> CardOutcome {
        let policy = self.config.card_policy;
        let outcome = self.fencer_mut(side).apply_card(card, policy);

        if !outcome.accepted {
            warn!(
                side = ?side,
                requested = %card,
                current = %outcome.card,
                "card rejected: downgrade from red or black"
            );
        }

        let opponent = side.opponent();
        if outcome.award_opponent_point {
            self.fencer_mut(opponent).apply_touch(1);
        }
        debug!(
            side = ?side,
            card = %outcome.card,
            awarded = outcome.award_opponent_point,
            "card"
        );

        self.emit_card(side);
        self.emit_score(opponent);

        if self.config.record_cards && outcome.accepted {
            self.record(format!("{side} card: {}", outcome.card));
        }
        outcome
    }

    pub fn card_left(&mut self, card: Card) -> CardOutcome {
        self.card(Side::Left, card)
    }

    pub fn card_right(&mut self, card: Card) -> CardOutcome {
        self.card(Side::Right, card)
    }

    // -----------------------------------------------------------------------
    // Bout management
    // -----------------------------------------------------------------------

    /// Fresh fencers, clock back to the default time.
    ///
    /// The event log survives unless `clear_log_on_reset` is set, in which case
    /// the retired log is handed back. The period counter is left alone.
    pub fn reset_to_default(&mut self) -> Option<EventLog> {
        self.left = FencerState::new();
        self.right = FencerState::new();
        self.clock.set_current_time(self.config.default_time_secs);

        let retired = if self.config.clear_log_on_reset {
            Some(std::mem::take(&mut self.log))
        } else {
            None
        };
        debug!(
            cleared_log = retired.is_some(),
            default_time = self.config.default_time_secs,
            "reset to default"
        );

        self.emit_score(Side::Left);
        self.emit_score(Side::Right);
        self.emit_card(Side::Left);
        self.emit_card(Side::Right);
        self.emit(BoutNotice::Time {
            remaining: self.config.default_time_secs,
        });
        retired
    }

    /// Advance the period counter. Rules for when to do so live outside the bout.
    pub fn next_period(&mut self) -> u32 {
        self.period = self.period.saturating_add(1);
        debug!(period = self.period, "next period");
        self.emit(BoutNotice::Period {
            period: self.period,
        });
        self.period
    }

    // -----------------------------------------------------------------------
    // Clock callbacks
    // -----------------------------------------------------------------------

    /// Step the owned clock once and dispatch its signal.
    pub fn advance_clock(&mut self) -> Option<ClockSignal> {
        let signal = self.clock.advance()?;
        match signal {
            ClockSignal::Tick(remaining) => self.on_tick(remaining),
            ClockSignal::Finished => self.on_finish(),
        }
        Some(signal)
    }

    pub fn on_tick(&mut self, remaining: f64) {
        self.emit(BoutNotice::Time { remaining });
    }

    pub fn on_finish(&mut self) {
        debug!(period = self.period, "time expired");
        self.emit(BoutNotice::Time { remaining: 0.0 });
        self.emit(BoutNotice::TimerStopped);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn fencer(&self, side: Side) -> &FencerState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn fencer_mut(&mut self, side: Side) -> &mut FencerState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.fencer(side).score()
    }

    pub fn left_score(&self) -> u32 {
        self.left.score()
    }

    pub fn right_score(&self) -> u32 {
        self.right.score()
    }

    pub fn card_of(&self, side: Side) -> Card {
        self.fencer(side).card()
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &BoutConfig {
        &self.config
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn snapshot(&self) -> BoutSnapshot {
        BoutSnapshot {
            left_score: self.left.score(),
            right_score: self.right.score(),
            left_card: self.left.card(),
            right_card: self.right.card(),
            period: self.period,
            remaining_secs: self.clock.current_time(),
            clock_running: self.clock.is_running(),
            events_recorded: self.log.len(),
        }
    }

    fn record(&mut self, message: String) {
        let event = BoutEvent::new(
            self.clock.current_time(),
            self.left.score(),
            self.right.score(),
            message,
        );
        self.log.record(event);
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for BoutController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoutController")
            .field("config", &self.config)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("log", &self.log)
            .field("clock", &self.clock)
            .field("period", &self.period)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingListener;

    fn bout() -> (BoutController, RecordingListener) {
        let mut b = BoutController::new(BoutConfig::default()).unwrap();
        let rec = RecordingListener::new();
        b.subscribe(rec.clone());
        rec.clear();
        (b, rec)
    }

    #[test]
    fn touch_renders_then_logs_snapshot() {
        let (mut b, rec) = bout();
        b.touch_right();
        assert_eq!(
            rec.notices(),
            vec![BoutNotice::Score {
                side: Side::Right,
                score: 1
            }]
        );
        let ev = b.event_log().last().unwrap();
        assert_eq!(ev.message, "Right scores");
        assert_eq!((ev.left_score, ev.right_score), (0, 1));
        assert_eq!(ev.timestamp, 180.0);
    }

    #[test]
    fn card_renders_card_then_opponent_score() {
        let (mut b, rec) = bout();
        b.card_left(Card::Yellow);
        assert_eq!(
            rec.notices(),
            vec![
                BoutNotice::Card {
                    side: Side::Left,
                    card: Card::Yellow
                },
                BoutNotice::Score {
                    side: Side::Right,
                    score: 0
                },
            ]
        );
    }

    #[test]
    fn rejected_card_changes_nothing() {
        let (mut b, _rec) = bout();
        b.card_right(Card::Black);
        let out = b.card_right(Card::Red);
        assert!(!out.accepted);
        assert_eq!(b.card_of(Side::Right), Card::Black);
        assert_eq!(b.left_score(), 0);
    }

    #[test]
    fn record_cards_logs_accepted_cards_only() {
        let cfg = BoutConfig {
            record_cards: true,
            ..BoutConfig::default()
        };
        let mut b = BoutController::new(cfg).unwrap();
        b.card_left(Card::Yellow);
        b.card_left(Card::Yellow);
        b.card_left(Card::Yellow); // Red -> Yellow rejected
        let msgs: Vec<_> = b.event_log().iter().map(|e| e.message.clone()).collect();
        assert_eq!(msgs, vec!["Left card: Yellow", "Left card: Red"]);
        assert_eq!(b.event_log().last().unwrap().right_score, 1);
    }

    #[test]
    fn advance_clock_forwards_ticks_and_finish() {
        let cfg = BoutConfig {
            default_time_secs: 0.2,
            tick_interval_secs: 0.1,
            ..BoutConfig::default()
        };
        let mut b = BoutController::new(cfg).unwrap();
        let rec = RecordingListener::new();
        b.subscribe(rec.clone());
        rec.clear();

        assert_eq!(b.advance_clock(), None);
        b.start();
        assert_eq!(b.advance_clock(), Some(ClockSignal::Tick(0.1)));
        assert_eq!(b.advance_clock(), Some(ClockSignal::Finished));
        assert_eq!(b.advance_clock(), None);
        assert_eq!(
            rec.notices(),
            vec![
                BoutNotice::Time { remaining: 0.1 },
                BoutNotice::Time { remaining: 0.0 },
                BoutNotice::TimerStopped,
            ]
        );
    }

    #[test]
    fn next_period_increments_and_survives_reset() {
        let (mut b, rec) = bout();
        assert_eq!(b.period(), 1);
        assert_eq!(b.next_period(), 2);
        b.reset_to_default();
        assert_eq!(b.period(), 2);
        assert!(rec.notices().contains(&BoutNotice::Period { period: 2 }));
    }

    #[test]
    fn closure_listener_receives_notices() {
        let mut b = BoutController::new(BoutConfig::default()).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        b.subscribe(move |n: &BoutNotice| {
            let _ = tx.send(n.clone());
        });
        b.touch_double();
        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(got.len(), 5);
        assert_eq!(
            got[4],
            BoutNotice::Score {
                side: Side::Right,
                score: 1
            }
        );
    }
}
