//! Cycle-by-cycle simulation of a finished circuit.
//!
//! This module provides:
//! 1. **Scheduling:** Topological evaluation order and combinational loop detection.
//! 2. **Simulation:** The [`Simulator`] and its evaluate-then-commit cycle.
//! 3. **Recording:** Per-cycle [`Trace`] snapshots and the [`CycleObserver`] hook.

/// Cycle observers.
pub mod observer;
/// Evaluation ordering.
pub mod schedule;
/// The simulator.
pub mod simulator;
/// Per-cycle value recording.
pub mod trace;

pub use observer::CycleObserver;
pub use simulator::Simulator;
pub use trace::{Snapshot, Trace};
