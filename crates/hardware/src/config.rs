//! Configuration system for the circuit simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation run. It provides:
//! 1. **Defaults:** Baseline cycle count and counter circuit parameters.
//! 2. **Structures:** Hierarchical config for the simulation loop and the built circuit.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; missing fields take the values from `defaults`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{CircuitError, Result};

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of cycles simulated when none is specified.
    pub const CYCLES: u64 = 16;

    /// Whether snapshots are kept in the trace.
    pub const RECORD_TRACE: bool = true;

    /// Width of the counter register, in bits.
    pub const COUNTER_WIDTH: u32 = 3;

    /// Name of the counter register.
    pub const COUNTER_NAME: &str = "counter";
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use ripplesim_core::config::Config;
///
/// let json = r#"{
///     "simulation": { "cycles": 15, "monitors": ["counter"] },
///     "circuit": { "width": 3 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.simulation.cycles, 15);
/// assert_eq!(config.simulation.monitors, vec!["counter".to_string()]);
/// assert_eq!(config.circuit.width, 3);
/// assert!(config.simulation.record_trace);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Simulation loop settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Parameters of the circuit being built
    #[serde(default)]
    pub circuit: CircuitConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CircuitError::Config(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CircuitError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}

/// Simulation loop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Number of cycles to run
    #[serde(default = "SimulationConfig::default_cycles")]
    pub cycles: u64,

    /// Names of the registers and signals to record; empty records every named entity
    #[serde(default)]
    pub monitors: Vec<String>,

    /// Keep per-cycle snapshots in the trace
    #[serde(default = "SimulationConfig::default_record_trace")]
    pub record_trace: bool,
}

impl SimulationConfig {
    /// Returns the default cycle count.
    const fn default_cycles() -> u64 {
        defaults::CYCLES
    }

    /// Returns the default trace recording setting.
    const fn default_record_trace() -> bool {
        defaults::RECORD_TRACE
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycles: defaults::CYCLES,
            monitors: Vec::new(),
            record_trace: defaults::RECORD_TRACE,
        }
    }
}

/// Parameters of the counter circuit.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitConfig {
    /// Register width in bits
    #[serde(default = "CircuitConfig::default_width")]
    pub width: u32,

    /// Register value before the first cycle
    #[serde(default)]
    pub reset_value: u64,

    /// Register name
    #[serde(default = "CircuitConfig::default_name")]
    pub name: String,
}

impl CircuitConfig {
    /// Returns the default counter width.
    const fn default_width() -> u32 {
        defaults::COUNTER_WIDTH
    }

    /// Returns the default counter register name.
    fn default_name() -> String {
        defaults::COUNTER_NAME.to_string()
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            width: defaults::COUNTER_WIDTH,
            reset_value: 0,
            name: defaults::COUNTER_NAME.to_string(),
        }
    }
}
