//! Common utilities and types shared by the whole simulator.
//!
//! This module provides:
//! 1. **Widths:** Bit-width bounds, masks, and range checks.
//! 2. **Error Handling:** The crate-wide error type and the finalization errors it wraps.

/// Error types for construction and simulation.
pub mod error;

/// Bit-width bounds and masking helpers.
pub mod width;

pub use error::{CircuitError, FinalizeError, Result};
pub use width::{MAX_WIDTH, MIN_WIDTH, mask};
