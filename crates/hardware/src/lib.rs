//! Digital circuit construction and cycle-accurate simulation.
//!
//! This crate builds small synchronous circuits and simulates them one clock cycle at a time:
//! 1. **Circuit:** An explicit graph-builder context holding signals, combinational nodes, and
//!    registers.
//! 2. **Arithmetic:** A one-bit full adder and a recursive ripple-carry adder over any width.
//! 3. **Simulation:** Topological evaluation with register reads fixed for the cycle, then an
//!    atomic commit of every register.
//! 4. **Trace:** Per-cycle snapshots of monitored registers and signals, exportable as JSON.
//!
//! # Examples
//!
//! A three-bit counter built from a ripple-carry adder:
//!
//! ```
//! use ripplesim_core::{Circuit, Simulator};
//!
//! # fn main() -> ripplesim_core::common::Result<()> {
//! let mut circuit = Circuit::new();
//! let counter = circuit.register("counter", 3)?;
//! let (next, _carry) = circuit.ripple_add(counter, 1u8)?;
//! counter.drive_next(&mut circuit, next)?;
//!
//! let mut sim = Simulator::new(&circuit, &[counter.into()])?;
//! sim.step(10)?;
//! assert_eq!(sim.trace().values("counter"), Some(vec![0, 1, 2, 3, 4, 5, 6, 7, 0, 1]));
//! assert_eq!(sim.read(counter)?, 2);
//! # Ok(())
//! # }
//! ```

/// Arithmetic circuit construction (full adder, ripple-carry adder).
pub mod arith;
/// Circuit graph construction (signals, nodes, registers).
pub mod circuit;
/// Common types (widths, errors).
pub mod common;
/// Simulation configuration (defaults, JSON loading).
pub mod config;
/// Scheduling, simulation, and tracing.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Graph-builder context; start every circuit with `Circuit::new()`.
pub use crate::circuit::{Circuit, Entity, Operand, Register, Signal};
/// Crate-wide error type.
pub use crate::common::CircuitError;
/// Root configuration type; use `Config::default()` or parse JSON.
pub use crate::config::Config;
/// Simulator and trace types.
pub use crate::sim::{CycleObserver, Simulator, Snapshot, Trace};
