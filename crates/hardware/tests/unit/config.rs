//! # Configuration Tests
//!
//! Defaults, partial JSON documents, file loading, and error reporting.

use std::io::Write;

use ripplesim_core::common::{CircuitError, Result};
use ripplesim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.simulation.cycles, 16);
    assert!(config.simulation.monitors.is_empty());
    assert!(config.simulation.record_trace);
    assert_eq!(config.circuit.width, 3);
    assert_eq!(config.circuit.reset_value, 0);
    assert_eq!(config.circuit.name, "counter");
}

#[test]
fn test_empty_json_uses_defaults() -> Result<()> {
    let config = Config::from_json("{}")?;
    assert_eq!(config.simulation.cycles, 16);
    assert_eq!(config.circuit.width, 3);
    Ok(())
}

#[test]
fn test_partial_sections() -> Result<()> {
    let config = Config::from_json(
        r#"{ "simulation": { "record_trace": false }, "circuit": { "width": 8, "reset_value": 200 } }"#,
    )?;
    assert!(!config.simulation.record_trace);
    assert_eq!(config.simulation.cycles, 16);
    assert_eq!(config.circuit.width, 8);
    assert_eq!(config.circuit.reset_value, 200);
    assert_eq!(config.circuit.name, "counter");
    Ok(())
}

#[test]
fn test_invalid_json_is_a_config_error() {
    assert!(matches!(Config::from_json("{ not json"), Err(CircuitError::Config(_))));
    assert!(matches!(
        Config::from_json(r#"{ "simulation": { "cycles": "many" } }"#),
        Err(CircuitError::Config(_))
    ));
}

#[test]
fn test_from_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new().map_err(|e| CircuitError::Config(e.to_string()))?;
    file.write_all(br#"{ "simulation": { "cycles": 15, "monitors": ["counter"] } }"#)
        .map_err(|e| CircuitError::Config(e.to_string()))?;

    let config = Config::from_file(file.path())?;
    assert_eq!(config.simulation.cycles, 15);
    assert_eq!(config.simulation.monitors, vec!["counter".to_string()]);
    Ok(())
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = tempfile::tempdir().ok();
    let path = dir.as_ref().map(|d| d.path().join("absent.json")).unwrap_or_default();
    match Config::from_file(&path) {
        Err(CircuitError::Config(msg)) => assert!(msg.contains("absent.json")),
        other => panic!("expected a config error, got {other:?}"),
    }
}
