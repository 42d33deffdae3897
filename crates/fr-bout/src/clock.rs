//! Countdown clock seam.
//!
//! The controller owns exactly one clock. A runtime (tokio interval, test
//! harness, CLI script) calls [`Clock::advance`] once per interval; the
//! returned signal is what the controller forwards to listeners.

/// Signal produced by one clock step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClockSignal {
    /// Remaining seconds after the step.
    Tick(f64),
    /// Countdown reached zero. Emitted once; the clock stops itself.
    Finished,
}

pub trait Clock {
    fn start(&mut self);
    fn stop(&mut self);
    fn toggle(&mut self);
    fn is_running(&self) -> bool;
    /// Remaining seconds.
    fn current_time(&self) -> f64;
    /// Reposition the countdown.
    fn set_current_time(&mut self, secs: f64);
    /// Step one interval. `None` while stopped.
    fn advance(&mut self) -> Option<ClockSignal>;
}

/// Deterministic countdown in integer milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownClock {
    remaining_ms: u64,
    interval_ms: u64,
    running: bool,
}

impl CountdownClock {
    pub fn new(duration_secs: f64, interval_secs: f64) -> Self {
        Self {
            remaining_ms: secs_to_ms(duration_secs),
            interval_ms: secs_to_ms(interval_secs).max(1),
            running: false,
        }
    }
}

impl Clock for CountdownClock {
    fn start(&mut self) {
        // An expired clock has nothing left to count.
        if self.remaining_ms > 0 {
            self.running = true;
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn current_time(&self) -> f64 {
        ms_to_secs(self.remaining_ms)
    }

    fn set_current_time(&mut self, secs: f64) {
        self.remaining_ms = secs_to_ms(secs);
        if self.remaining_ms == 0 {
            self.running = false;
        }
    }

    fn advance(&mut self) -> Option<ClockSignal> {
        if !self.running {
            return None;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(self.interval_ms);
        if self.remaining_ms == 0 {
            self.running = false;
            return Some(ClockSignal::Finished);
        }
        Some(ClockSignal::Tick(ms_to_secs(self.remaining_ms)))
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0).round() as u64
}

fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
