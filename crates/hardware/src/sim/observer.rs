//! Cycle observers.

use super::trace::Snapshot;

/// Receives every snapshot a simulator records.
///
/// Observers are called after the snapshot for a cycle is taken and before
/// the registers commit, once per simulated cycle.
pub trait CycleObserver {
    /// Called once per cycle with the values observed during it.
    fn on_cycle(&mut self, snapshot: &Snapshot);
}
