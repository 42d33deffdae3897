//! `fr-cli simulate`: replay a referee script against a fresh bout.

use anyhow::{Context, Result};
use fr_bout::{BoutController, BoutNotice, BoutSnapshot, EventLog};
use fr_runtime::RefereeAction;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{load_bout_config, strip_comment};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config_hash: String,
    pub actions_applied: usize,
    pub snapshot: BoutSnapshot,
    pub events: EventLog,
    /// Logs handed back by resets when `log.clear_on_reset` is set, oldest first.
    pub retired_logs: Vec<EventLog>,
}

pub fn simulate(config_paths: &[String], script: &Path, strict_keys: bool) -> Result<SimulationReport> {
    let (loaded, cfg) = load_bout_config(config_paths, strict_keys)?;
    let raw = fs::read_to_string(script)
        .with_context(|| format!("read script failed: {}", script.display()))?;

    let actions = parse_script(&raw)?;

    let mut bout = BoutController::new(cfg)?;
    bout.subscribe(|n: &BoutNotice| debug!(notice = ?n, "display"));

    let mut retired_logs = Vec::new();
    for &action in &actions {
        if let Some(old) = action.apply(&mut bout) {
            retired_logs.push(old);
        }
    }

    info!(
        actions = actions.len(),
        left = bout.left_score(),
        right = bout.right_score(),
        "simulation complete"
    );

    Ok(SimulationReport {
        config_hash: loaded.config_hash,
        actions_applied: actions.len(),
        snapshot: bout.snapshot(),
        events: bout.event_log().clone(),
        retired_logs,
    })
}

/// Parse every non-empty line; errors carry the 1-based line number.
pub fn parse_script(raw: &str) -> Result<Vec<RefereeAction>> {
    let mut out = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let text = strip_comment(line);
        if text.is_empty() {
            continue;
        }
        let action = text
            .parse::<RefereeAction>()
            .with_context(|| format!("script line {}: '{}'", i + 1, text))?;
        out.push(action);
    }
    Ok(out)
}
