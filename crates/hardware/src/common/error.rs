//! Circuit construction and simulation errors.
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate. It provides:
//! 1. **Construction errors:** Width, naming, and drive-discipline violations raised while
//!    building a circuit. They are reported before any node is added, so the graph stays in
//!    its last valid state.
//! 2. **Finalization errors:** Incomplete graphs detected once, when a simulator is created.
//! 3. **Simulation errors:** Bad step inputs and reads of values that do not exist yet.

use thiserror::Error;

use crate::circuit::SignalId;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Reasons a circuit cannot be simulated yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinalizeError {
    /// A register was created but its next-value signal was never assigned.
    #[error("register `{0}` has no next-value signal")]
    UndrivenRegister(String),

    /// A forward-declared wire was never driven.
    #[error("wire {0} is never driven")]
    UndrivenWire(SignalId),
}

/// Errors raised while building or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// A width of zero, or wider than the value container, was requested.
    #[error("invalid bit width {width}")]
    InvalidWidth {
        /// The rejected width.
        width: u32,
    },

    /// An operation received operands of unequal or unexpected width.
    #[error("{op}: expected width {expected}, found {found}")]
    WidthMismatch {
        /// Operation that rejected the operand.
        op: &'static str,
        /// Width the operation required.
        expected: u32,
        /// Width it was given.
        found: u32,
    },

    /// A register, input, or named signal reused an existing name.
    #[error("name `{0}` is already used in this circuit")]
    DuplicateName(String),

    /// A register or wire was driven a second time.
    #[error("`{0}` is already driven")]
    AlreadyDriven(String),

    /// Simulation was requested on an incomplete graph.
    #[error("circuit is not finalized: {0}")]
    GraphNotFinalized(#[source] FinalizeError),

    /// The graph contains a feedback path that does not pass through a register.
    #[error("combinational cycle through {}", format_path(.path))]
    CombinationalCycle {
        /// Signals on the loop; each reads the next, and the last reads the first.
        path: Vec<SignalId>,
    },

    /// A constant, reset, or input value does not fit its width.
    #[error("value {value:#x} does not fit in {width} bits")]
    ValueOutOfRange {
        /// The rejected value.
        value: u128,
        /// The width it had to fit.
        width: u32,
    },

    /// A bit-select reached past the top of its source signal.
    #[error("bits [{low}, {low}+{width}) out of range for a {source_width}-bit signal")]
    BitRange {
        /// Lowest selected bit.
        low: u32,
        /// Number of selected bits.
        width: u32,
        /// Width of the signal being selected from.
        source_width: u32,
    },

    /// A signal or register handle belongs to a different circuit.
    #[error("signal belongs to a different circuit")]
    ForeignSignal,

    /// No register, input, or named signal has this name.
    #[error("no entity named `{0}`")]
    UnknownName(String),

    /// A step was taken without a value for this input.
    #[error("missing value for input `{0}`")]
    MissingInput(String),

    /// A combinational value was read before any cycle evaluated it.
    #[error("`{0}` has not been evaluated yet")]
    NotEvaluated(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A trace could not be serialized.
    #[error("trace export failed: {0}")]
    Export(String),
}

impl From<FinalizeError> for CircuitError {
    fn from(err: FinalizeError) -> Self {
        Self::GraphNotFinalized(err)
    }
}

fn format_path(path: &[SignalId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
