//! Per-cycle value recording.
//!
//! A [`Trace`] is an ordered list of [`Snapshot`]s, one per simulated cycle.
//! Snapshot `k` holds what was observable during cycle `k`: register values at
//! the start of the cycle and the combinational values computed from them.

use std::collections::BTreeMap;
use std::io;

use serde::Serialize;

use crate::common::{CircuitError, Result};

/// Values of every monitored entity during one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycle index, starting at zero.
    pub cycle: u64,
    /// Monitor name to observed value.
    pub values: BTreeMap<String, u128>,
}

impl Snapshot {
    /// Value recorded for `name` in this cycle.
    pub fn get(&self, name: &str) -> Option<u128> {
        self.values.get(name).copied()
    }
}

/// Ordered sequence of per-cycle snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trace {
    monitors: Vec<String>,
    snapshots: Vec<Snapshot>,
}

impl Trace {
    /// An empty trace for the given monitor names.
    pub fn new(monitors: Vec<String>) -> Self {
        Self {
            monitors,
            snapshots: Vec::new(),
        }
    }

    /// Monitor names, in the order they were requested.
    pub fn monitors(&self) -> &[String] {
        &self.monitors
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of recorded cycles.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when no cycle has been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Every recorded value of one monitor, in cycle order.
    ///
    /// Returns `None` for a name that is not monitored.
    pub fn values(&self, name: &str) -> Option<Vec<u128>> {
        if !self.monitors.iter().any(|m| m == name) {
            return None;
        }
        Some(self.snapshots.iter().filter_map(|s| s.get(name)).collect())
    }

    pub(crate) fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Serializes the trace as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CircuitError::Export(e.to_string()))
    }

    /// Writes one line per monitor, sorted by name: `name v0 v1 v2 ...`.
    pub fn write_text(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut names: Vec<&String> = self.monitors.iter().collect();
        names.sort();
        for name in names {
            write!(out, "{name}")?;
            for snapshot in &self.snapshots {
                if let Some(value) = snapshot.get(name) {
                    write!(out, " {value}")?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
