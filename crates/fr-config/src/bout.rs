use anyhow::{anyhow, Context, Result};
use fr_bout::{BoutConfig, CardPolicy};
use serde_json::Value;

/// Every pointer `bout_config_from_json` reads. Keep in sync with the reads below.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/bout/default_time_secs",
    "/bout/tick_interval_secs",
    "/cards/policy",
    "/log/record_cards",
    "/log/clear_on_reset",
];

/// Build a validated [`BoutConfig`] from merged config JSON.
///
/// Missing keys fall back to `BoutConfig::default()`; a present key with the
/// wrong type is an error naming its pointer.
pub fn bout_config_from_json(cfg: &Value) -> Result<BoutConfig> {
    let defaults = BoutConfig::default();

    let default_time_secs =
        read_f64(cfg, "/bout/default_time_secs")?.unwrap_or(defaults.default_time_secs);
    let tick_interval_secs =
        read_f64(cfg, "/bout/tick_interval_secs")?.unwrap_or(defaults.tick_interval_secs);

    let card_policy = match read_str(cfg, "/cards/policy")? {
        None => defaults.card_policy,
        Some(s) => parse_card_policy(s)?,
    };

    let record_cards = read_bool(cfg, "/log/record_cards")?.unwrap_or(defaults.record_cards);
    let clear_log_on_reset =
        read_bool(cfg, "/log/clear_on_reset")?.unwrap_or(defaults.clear_log_on_reset);

    let out = BoutConfig {
        default_time_secs,
        tick_interval_secs,
        card_policy,
        record_cards,
        clear_log_on_reset,
    };
    out.validate().context("bout config rejected")?;
    Ok(out)
}

fn parse_card_policy(s: &str) -> Result<CardPolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(CardPolicy::Strict),
        "overwrite" => Ok(CardPolicy::Overwrite),
        other => Err(anyhow!(
            "cards.policy must be one of strict|overwrite (got '{other}')"
        )),
    }
}

fn present<'a>(cfg: &'a Value, ptr: &str) -> Option<&'a Value> {
    cfg.pointer(ptr).filter(|v| !v.is_null())
}

fn read_f64(cfg: &Value, ptr: &str) -> Result<Option<f64>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| anyhow!("config {ptr} must be a number (got {v})")),
    }
}

fn read_bool(cfg: &Value, ptr: &str) -> Result<Option<bool>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| anyhow!("config {ptr} must be a boolean (got {v})")),
    }
}

fn read_str<'a>(cfg: &'a Value, ptr: &str) -> Result<Option<&'a str>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| anyhow!("config {ptr} must be a string (got {v})")),
    }
}
