//! `fr-cli live`: interactive bout on stdin with a real-time clock.

use anyhow::{Context, Result};
use fr_runtime::{spawn_clock_driver, BoutSession, RefereeAction};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use super::{load_bout_config, strip_comment};

pub async fn run_live(config_paths: &[String], strict_keys: bool) -> Result<()> {
    let (loaded, cfg) = load_bout_config(config_paths, strict_keys)?;
    info!(config_hash = %loaded.config_hash, "live bout starting");

    let session = BoutSession::new(cfg)?;

    // Display: one JSON bus message per stdout line.
    let mut rx = session.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => match serde_json::to_string(&msg) {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!(error = %e, "bus message not serializable"),
                },
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "display lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let driver = spawn_clock_driver(session.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await.context("read stdin failed")? {
        line_no += 1;
        let text = strip_comment(&line);
        if text.is_empty() {
            continue;
        }
        match text.parse::<RefereeAction>() {
            Ok(action) => {
                let out = session.dispatch(action).await;
                if let Some(retired) = out.retired_log {
                    info!(events = retired.len(), "event log retired by reset");
                }
            }
            Err(e) => warn!(line = line_no, error = %e, "ignoring input"),
        }
    }

    // Stop the clock task and wait until it has released its session clone.
    driver.abort();
    let _ = driver.await;
    let snap = session.snapshot().await;

    // Dropping the last session handle drops every bus sender. The printer then
    // drains what is queued and sees `Closed`.
    drop(session);
    printer.await.context("display task failed")?;

    println!("{}", serde_json::to_string(&snap)?);
    info!(
        left = snap.left_score,
        right = snap.right_score,
        "live bout ended"
    );
    Ok(())
}
