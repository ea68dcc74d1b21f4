//! Registers: the only stateful nodes of a circuit.
//!
//! A register is declared with a name, a width, and a reset value. Reading it
//! yields a [`Signal`] whose value is fixed for the whole of a cycle; its next
//! value is assigned exactly once with [`Register::drive_next`] and takes effect
//! at the following cycle boundary.

use super::signal::{Operand, Signal, SignalId};
use super::Circuit;
use crate::common::Result;

/// Index of a register within its circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub(crate) usize);

impl RegisterId {
    /// Returns the raw register index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle to a register declared in a [`Circuit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Register {
    pub(crate) id: RegisterId,
    pub(crate) output: Signal,
}

impl Register {
    /// Register index.
    #[inline]
    pub const fn id(&self) -> RegisterId {
        self.id
    }

    /// The register's current value as a signal.
    ///
    /// Every read during a cycle observes the value held at the start of
    /// that cycle.
    #[inline]
    pub const fn signal(&self) -> Signal {
        self.output
    }

    /// Register width in bits.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.output.width
    }

    /// Assigns the next-value signal. See [`Circuit::drive_next`].
    pub fn drive_next(self, circuit: &mut Circuit, next: impl Into<Operand>) -> Result<()> {
        circuit.drive_next(self, next)
    }
}

/// Declaration of a register as stored in the circuit.
#[derive(Debug, Clone)]
pub struct RegisterDecl {
    pub(crate) name: String,
    pub(crate) reset_value: u128,
    pub(crate) output: SignalId,
    pub(crate) next: Option<SignalId>,
}

impl RegisterDecl {
    /// Unique register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value held before the first cycle.
    pub const fn reset_value(&self) -> u128 {
        self.reset_value
    }

    /// Node that reads this register.
    pub const fn output(&self) -> SignalId {
        self.output
    }

    /// Next-value signal, once driven.
    pub const fn next(&self) -> Option<SignalId> {
        self.next
    }
}
