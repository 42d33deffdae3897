//! Config hash stability.
//!
//! GREEN when:
//! - Loading the same layers twice yields the same hash.
//! - Reordering keys within a layer does not change the hash.
//! - Different values produce different hashes.
//! - File-based loading matches string-based loading.

use fr_config::{load_layered_yaml, load_layered_yaml_from_strings};
use std::io::Write;

const BASE_YAML: &str = r#"
bout:
  default_time_secs: 180.0
  tick_interval_secs: 0.1
cards:
  policy: strict
log:
  record_cards: false
"#;

const BASE_YAML_REORDERED: &str = r#"
log:
  record_cards: false
cards:
  policy: strict
bout:
  tick_interval_secs: 0.1
  default_time_secs: 180.0
"#;

const POOL_OVERLAY: &str = r#"
bout:
  default_time_secs: 180.0
log:
  clear_on_reset: true
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64, "sha256 hex digest");
}

#[test]
fn key_order_does_not_change_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_changes_hash_and_values() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let layered = load_layered_yaml_from_strings(&[BASE_YAML, POOL_OVERLAY]).unwrap();
    assert_ne!(base.config_hash, layered.config_hash);
    assert_eq!(layered.config_json["log"]["clear_on_reset"], true);
    assert_eq!(layered.config_json["log"]["record_cards"], false);
}

#[test]
fn empty_layer_is_ignored() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, ""]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn file_loading_matches_string_loading() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(BASE_YAML.as_bytes()).unwrap();
    let path = f.path().to_string_lossy().to_string();

    let from_file = load_layered_yaml(&[path]).unwrap();
    let from_str = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(from_file.config_hash, from_str.config_hash);
}

#[test]
fn missing_file_reports_path() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
}
