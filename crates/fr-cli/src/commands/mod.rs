//! Command handler modules for fr-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod live;
pub mod simulate;

use anyhow::{Context, Result};
use fr_bout::BoutConfig;
use fr_config::{LoadedConfig, UnusedKeyPolicy};
use tracing::warn;

/// Execute `fr-cli config-hash`.
pub fn config_hash(paths: &[String]) -> Result<()> {
    let loaded = fr_config::load_layered_yaml(paths)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

/// Load layered config and map it to a validated [`BoutConfig`].
///
/// No paths means an empty document, i.e. all defaults.
pub fn load_bout_config(paths: &[String], strict_keys: bool) -> Result<(LoadedConfig, BoutConfig)> {
    let loaded = if paths.is_empty() {
        fr_config::load_layered_yaml_from_strings(&[])?
    } else {
        fr_config::load_layered_yaml(paths)?
    };

    let policy = if strict_keys {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = fr_config::report_unused_keys(&loaded.config_json, policy)?;
    for ptr in &report.unused_leaf_pointers {
        warn!(pointer = %ptr, "config key not read by any bout setting");
    }

    let bout = fr_config::bout_config_from_json(&loaded.config_json)
        .with_context(|| format!("config_hash={}", loaded.config_hash))?;
    Ok((loaded, bout))
}

/// Drop a trailing `#` comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}
