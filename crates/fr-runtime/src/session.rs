//! Shared bout session.
//!
//! All types here are `Clone`-able (via `Arc`). The controller itself is
//! synchronous; this module owns the lock, the bus and the clock task.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use fr_bout::{
    BoutConfig, BoutController, BoutListener, BoutNotice, BoutSnapshot, ClockSignal, EventLog,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info};

use crate::RefereeAction;

const BUS_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// BusMsg
// ---------------------------------------------------------------------------

/// Messages broadcast to display front ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BusMsg {
    Notice(BoutNotice),
    Status(BoutSnapshot),
    LogLine { level: String, msg: String },
}

/// Listener that republishes every controller notice on the bus.
#[derive(Clone, Debug)]
pub struct BusListener {
    bus: broadcast::Sender<BusMsg>,
}

impl BusListener {
    pub fn new(bus: broadcast::Sender<BusMsg>) -> Self {
        Self { bus }
    }
}

impl BoutListener for BusListener {
    fn notify(&mut self, notice: &BoutNotice) {
        // No receivers is fine: nobody is watching yet.
        let _ = self.bus.send(BusMsg::Notice(notice.clone()));
    }
}

// ---------------------------------------------------------------------------
// BoutSession
// ---------------------------------------------------------------------------

/// What one dispatched action left behind.
#[derive(Clone, Debug)]
pub struct Dispatched {
    /// Bout state after the action; the same value went out as `BusMsg::Status`.
    pub snapshot: BoutSnapshot,
    /// Log handed back by a reset when `clear_log_on_reset` is set.
    pub retired_log: Option<EventLog>,
}

/// Cloneable handle to the one active bout of a referee session.
#[derive(Clone)]
pub struct BoutSession {
    /// Broadcast bus for display front ends.
    pub bus: broadcast::Sender<BusMsg>,
    /// The bout. Holding the lock serializes referee actions and clock steps.
    pub bout: Arc<Mutex<BoutController>>,
    tick_interval: Duration,
}

impl BoutSession {
    pub fn new(config: BoutConfig) -> Result<Self> {
        let (bus, _rx) = broadcast::channel::<BusMsg>(BUS_CAPACITY);

        // Validates the config; nothing below may see a bad interval.
        let mut bout = BoutController::new(config)?;
        let tick_secs = bout.config().tick_interval_secs;
        let tick_interval = Duration::try_from_secs_f64(tick_secs)
            .with_context(|| format!("BOUT_INVALID_TICK_INTERVAL: {tick_secs} s"))?;

        bout.subscribe(BusListener::new(bus.clone()));
        info!(
            default_time = bout.config().default_time_secs,
            tick_interval_secs = tick_secs,
            "bout session created"
        );

        Ok(Self {
            bus,
            bout: Arc::new(Mutex::new(bout)),
            tick_interval,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusMsg> {
        self.bus.subscribe()
    }

    /// Bus messages as a stream. Lagged receivers yield `Err` items.
    pub fn notices(&self) -> BroadcastStream<BusMsg> {
        BroadcastStream::new(self.bus.subscribe())
    }

    /// Apply one referee action and publish the resulting status.
    pub async fn dispatch(&self, action: RefereeAction) -> Dispatched {
        let (snapshot, retired_log) = {
            let mut bout = self.bout.lock().await;
            let retired = action.apply(&mut *bout);
            (bout.snapshot(), retired)
        };
        info!(
            %action,
            left = snapshot.left_score,
            right = snapshot.right_score,
            remaining = snapshot.remaining_secs,
            retired_events = retired_log.as_ref().map(EventLog::len),
            "referee action"
        );
        let _ = self.bus.send(BusMsg::Status(snapshot.clone()));
        Dispatched {
            snapshot,
            retired_log,
        }
    }

    pub async fn snapshot(&self) -> BoutSnapshot {
        self.bout.lock().await.snapshot()
    }
}

/// Spawn the task that steps the bout clock every tick interval.
///
/// The task keeps running after time expires so a reset and restart keeps
/// counting; abort the handle to end it.
pub fn spawn_clock_driver(session: BoutSession) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(session.tick_interval());
        // The first tick completes immediately; the countdown starts one interval in.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let signal = {
                let mut bout = session.bout.lock().await;
                bout.advance_clock()
            };
            match signal {
                Some(ClockSignal::Finished) => {
                    info!("bout time expired");
                    let _ = session.bus.send(BusMsg::LogLine {
                        level: "INFO".to_string(),
                        msg: "time expired".to_string(),
                    });
                }
                Some(ClockSignal::Tick(remaining)) => debug!(remaining, "clock tick"),
                None => {}
            }
        }
    })
}
