//! Signal handles and operands.
//!
//! A [`Signal`] is a small `Copy` handle into a [`Circuit`](super::Circuit):
//! the producing node lives in the circuit, the handle only carries its index,
//! its width, and the identity of the owning circuit.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::register::Register;

/// Index of a node within its circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SignalId(pub(crate) usize);

impl SignalId {
    /// Returns the raw node index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Process-unique identity of a [`Circuit`](super::Circuit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CircuitId(u64);

impl CircuitId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Immutable handle to a bit-vector valued node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Signal {
    pub(crate) id: SignalId,
    pub(crate) width: u32,
    pub(crate) circuit: CircuitId,
}

impl Signal {
    /// Node index of this signal.
    #[inline]
    pub const fn id(&self) -> SignalId {
        self.id
    }

    /// Bit width, fixed when the signal was created.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }
}

/// Either an existing signal or a plain value to be turned into a constant.
///
/// Bare values become constants of their minimal width (at least one bit),
/// unless the receiving operation knows the width it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// An existing signal.
    Signal(Signal),
    /// A value that will become a constant node.
    Value(u128),
}

impl From<Signal> for Operand {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

impl From<Register> for Operand {
    fn from(reg: Register) -> Self {
        Self::Signal(reg.signal())
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Value(u128::from(value))
    }
}

macro_rules! operand_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Self::Value(value as u128)
                }
            }
        )*
    };
}

operand_from_uint!(u8, u16, u32, u64, u128, usize);
